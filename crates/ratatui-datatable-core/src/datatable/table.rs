use super::column::ColumnSpec;
use super::column::Columns;
use super::column::HeaderContext;
use super::error::DataTableError;
use super::layout::ColumnSlot;
use super::layout::LayoutRequest;
use super::layout::NEXT_LABEL;
use super::layout::PREV_LABEL;
use super::layout::TableLayout;
use super::pipeline;
use super::router::ActionSinks;
use super::router::ActionTarget;
use super::router::ClickRoute;
use super::router::ROW_CLICK;
use super::router::RowClickPolicy;
use super::router::route_click;
use super::state::DEFAULT_PAGE_SIZE;
use super::state::InteractionState;
use super::view::DerivedView;
use super::view::derive_view;
use super::view::resolved_sort;
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::keymap;
use crate::render;
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Alignment;
use ratatui::layout::Constraint;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::text::Text;
use std::collections::HashMap;

const SKELETON_SYMBOL: &str = "░";
const GRID_LINE_SYMBOL: &str = "│";
const MORE_ABOVE_SYMBOL: &str = "▲";
const MORE_BELOW_SYMBOL: &str = "▼";

/// Outcome of [`DataTable::handle_event`] and friends.
///
/// Row and cell actions are also delivered to the registered handlers; the returned value lets
/// apps that prefer a message loop react without registering any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataTableAction {
    None,
    Redraw,
    /// A row handler action. `row` is the row's index in the table's row vector.
    RowAction {
        action: String,
        row: usize,
    },
    CellAction {
        action: String,
        row: usize,
        column: String,
    },
    SortChanged,
    PageChanged(usize),
    SelectionChanged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableCommand {
    CursorUp,
    CursorDown,
    PrevPage,
    NextPage,
    FirstPage,
    LastPage,
    Activate,
    ToggleSelect,
    FocusNextColumn,
    FocusPrevColumn,
    Sort,
    MultiSort,
}

/// Key bindings for [`DataTable`].
#[derive(Clone, Debug)]
pub struct DataTableBindings {
    pub cursor_up: Vec<KeyEvent>,
    pub cursor_down: Vec<KeyEvent>,
    pub prev_page: Vec<KeyEvent>,
    pub next_page: Vec<KeyEvent>,
    pub first_page: Vec<KeyEvent>,
    pub last_page: Vec<KeyEvent>,
    pub activate: Vec<KeyEvent>,
    pub toggle_select: Vec<KeyEvent>,
    pub focus_next_column: Vec<KeyEvent>,
    pub focus_prev_column: Vec<KeyEvent>,
    pub sort: Vec<KeyEvent>,
    pub multi_sort: Vec<KeyEvent>,
}

impl Default for DataTableBindings {
    fn default() -> Self {
        Self {
            cursor_up: vec![keymap::key(KeyCode::Up), keymap::key_char('k')],
            cursor_down: vec![keymap::key(KeyCode::Down), keymap::key_char('j')],
            prev_page: vec![keymap::key(KeyCode::Left), keymap::key_char('h')],
            next_page: vec![keymap::key(KeyCode::Right), keymap::key_char('l')],
            first_page: vec![keymap::key(KeyCode::Home), keymap::key_char('g')],
            last_page: vec![keymap::key(KeyCode::End), keymap::key_char('G')],
            activate: vec![keymap::key(KeyCode::Enter)],
            toggle_select: vec![keymap::key_char(' ')],
            focus_next_column: vec![keymap::key(KeyCode::Tab)],
            focus_prev_column: vec![keymap::key(KeyCode::BackTab)],
            sort: vec![keymap::key_char('s')],
            multi_sort: vec![keymap::key_char('S')],
        }
    }
}

impl DataTableBindings {
    pub fn action_for(&self, key: &KeyEvent) -> Option<TableCommand> {
        let table = [
            (&self.cursor_up, TableCommand::CursorUp),
            (&self.cursor_down, TableCommand::CursorDown),
            (&self.prev_page, TableCommand::PrevPage),
            (&self.next_page, TableCommand::NextPage),
            (&self.first_page, TableCommand::FirstPage),
            (&self.last_page, TableCommand::LastPage),
            (&self.activate, TableCommand::Activate),
            (&self.toggle_select, TableCommand::ToggleSelect),
            (&self.focus_next_column, TableCommand::FocusNextColumn),
            (&self.focus_prev_column, TableCommand::FocusPrevColumn),
            (&self.sort, TableCommand::Sort),
            (&self.multi_sort, TableCommand::MultiSort),
        ];
        table
            .into_iter()
            .find(|(patterns, _)| keymap::matches_any(patterns, key))
            .map(|(_, command)| command)
    }
}

/// Options for [`DataTable`].
///
/// Style slots left at `Style::default()` fall back to the [`Theme`] passed to
/// [`DataTable::render`].
#[derive(Clone, Debug)]
pub struct DataTableOptions {
    pub page_size: usize,
    /// Initial column visibility; columns without an entry are visible.
    pub column_visibility: HashMap<String, bool>,
    /// Plain clicks on a row fire `"row-click"` (needs a row handler too).
    pub clickable_rows: bool,
    pub selectable: bool,
    /// Draws [`DataTable::set_inner_content`] instead of the table.
    pub hide_table: bool,
    /// Hides the title bar.
    pub hide_header: bool,
    /// Hides the column header row.
    pub hide_table_header: bool,
    pub title: Option<String>,
    pub show_data_count: bool,
    pub skeleton_rows: usize,
    pub col_gap: u16,
    pub null_placeholder: String,
    pub empty_message: String,
    pub bindings: DataTableBindings,
    pub style: Style,
    pub header_style: Style,
    pub cursor_style: Style,
    pub selected_style: Style,
    pub disabled_style: Style,
    pub grid_line_style: Style,
}

impl Default for DataTableOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            column_visibility: HashMap::new(),
            clickable_rows: false,
            selectable: false,
            hide_table: false,
            hide_header: false,
            hide_table_header: false,
            title: None,
            show_data_count: false,
            skeleton_rows: 4,
            col_gap: 1,
            null_placeholder: "—".to_string(),
            empty_message: "No data.".to_string(),
            bindings: DataTableBindings::default(),
            style: Style::default(),
            header_style: Style::default().add_modifier(Modifier::BOLD),
            cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            selected_style: Style::default().add_modifier(Modifier::BOLD),
            disabled_style: Style::default(),
            grid_line_style: Style::default(),
        }
    }
}

#[derive(Clone, Copy)]
struct TableStyles {
    base: Style,
    header: Style,
    cursor: Style,
    selected: Style,
    disabled: Style,
    grid_line: Style,
    muted: Style,
    accent: Style,
}

/// A paginated, sortable table over rows of type `R`.
///
/// The table owns its rows and its [`InteractionState`]; every view is derived from the two on
/// demand, so there is nothing to keep in sync. Drive it from the app loop with
/// [`DataTable::handle_event_in_area`] and [`DataTable::render`], using the same `area` for both.
///
/// A page taller than the body scrolls: the cursor line is always kept on screen, and `▲`/`▼`
/// markers at the right edge show that more rows of the page are above or below.
pub struct DataTable<R> {
    columns: Columns<R>,
    rows: Vec<R>,
    state: InteractionState,
    options: DataTableOptions,
    sinks: ActionSinks<R>,
    loading: bool,
    inner_content: Option<Text<'static>>,
    /// Cursor line within the current page.
    cursor: Option<usize>,
    /// Focused column, as an index into `columns`.
    focused_col: Option<usize>,
    /// First page line drawn in the body.
    scroll: usize,
    /// Body height from the last render or mouse event; 0 until one happens.
    viewport_rows: usize,
}

impl<R: 'static> DataTable<R> {
    pub fn new(columns: Vec<ColumnSpec<R>>) -> Result<Self, DataTableError> {
        Self::with_options(columns, DataTableOptions::default())
    }

    pub fn with_options(
        columns: Vec<ColumnSpec<R>>,
        options: DataTableOptions,
    ) -> Result<Self, DataTableError> {
        let columns = Columns::new(columns)?;
        let mut state = InteractionState::new(options.page_size);
        state.replace_column_visibility(options.column_visibility.clone());
        Ok(Self {
            columns,
            rows: Vec::new(),
            state,
            options,
            sinks: ActionSinks::default(),
            loading: false,
            inner_content: None,
            cursor: None,
            focused_col: None,
            scroll: 0,
            viewport_rows: 0,
        })
    }

    /// Registers the row handler. It receives `"row-click"` for plain row clicks and any action
    /// a cell declared with [`super::router::TableActions::row`].
    pub fn set_on_row_action(&mut self, handler: impl FnMut(&str, &R) + 'static) {
        self.sinks.set_on_row_action(Some(Box::new(handler)));
    }

    pub fn set_on_cell_action(&mut self, handler: impl FnMut(&str, &R) + 'static) {
        self.sinks.set_on_cell_action(Some(Box::new(handler)));
    }

    pub fn clear_action_handlers(&mut self) {
        self.sinks.set_on_row_action(None);
        self.sinks.set_on_cell_action(None);
    }
}

impl<R> DataTable<R> {
    pub fn options(&self) -> &DataTableOptions {
        &self.options
    }

    /// Replaces the options. Page size and column visibility are re-applied to the state.
    pub fn set_options(&mut self, options: DataTableOptions) {
        self.state.set_page_size(options.page_size);
        self.state
            .replace_column_visibility(options.column_visibility.clone());
        self.options = options;
        self.focused_col = self
            .focused_col
            .filter(|&c| self.state.is_column_visible(self.columns[c].id()));
        self.reset_scroll();
    }

    pub fn columns(&self) -> &Columns<R> {
        &self.columns
    }

    /// Swaps the column set. Sort entries for removed columns stay and are ignored.
    pub fn set_columns(&mut self, columns: Vec<ColumnSpec<R>>) -> Result<(), DataTableError> {
        self.columns = Columns::new(columns)?;
        self.focused_col = self.focused_col.filter(|&c| c < self.columns.len());
        Ok(())
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Replaces the rows and returns to the first page. Selected indices past the end are
    /// dropped.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        tracing::debug!(rows = rows.len(), "rows replaced");
        self.rows = rows;
        self.state.set_page(0);
        self.state.retain_selection_below(self.rows.len());
        self.cursor = None;
        self.scroll = 0;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_inner_content(&mut self, content: Option<Text<'static>>) {
        self.inner_content = content;
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut InteractionState {
        &mut self.state
    }

    /// Cursor line within the current page, if any.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// First line of the current page shown at the top of the body.
    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// Records the body height for `area` and scrolls the cursor line into view.
    ///
    /// [`DataTable::render`] and mouse handling call this; call it yourself after a resize if
    /// keyboard input arrives before the next frame.
    pub fn set_viewport(&mut self, area: Rect) {
        let view = self.is_table_live().then(|| self.view());
        let layout = self.layout_for(area, view.as_ref());
        self.apply_viewport(&layout, view.as_ref());
    }

    pub fn focused_column(&self) -> Option<&str> {
        self.focused_col.map(|c| self.columns[c].id())
    }

    /// The current page of rows.
    pub fn view(&self) -> DerivedView {
        derive_view(&self.rows, &self.columns, &self.state)
    }

    /// Geometry for `area`. Event handling uses the same computation.
    pub fn layout(&self, area: Rect) -> TableLayout {
        let view = self.is_table_live().then(|| self.view());
        self.layout_for(area, view.as_ref())
    }

    /// Rows react to plain clicks only when enabled and a row handler is registered.
    pub fn rows_interactive(&self) -> bool {
        self.click_policy().rows_interactive()
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let view = self.is_table_live().then(|| self.view());
        let layout = self.layout_for(area, view.as_ref());
        self.apply_viewport(&layout, view.as_ref());

        let styles = self.styles(theme);
        buf.set_style(area, styles.base);

        if let Some(title) = layout.title {
            self.render_title(title, buf, theme, &styles);
        }
        if self.options.hide_table {
            if let Some(text) = &self.inner_content {
                render_text(layout.body, buf, text, styles.base);
            }
            return;
        }
        if self.loading {
            render_skeleton(&layout, self.options.skeleton_rows, buf, theme.skeleton);
            return;
        }
        let Some(view) = view else {
            return;
        };
        if let Some(header) = layout.header {
            self.render_header(header, &layout.columns, buf, &styles);
        }
        self.render_body(&layout, &view, buf, &styles);
        if let Some(footer) = layout.footer {
            self.render_footer(footer, &layout, &view, buf, &styles);
        }
    }

    /// Handles keyboard input. Mouse events need an area; use
    /// [`DataTable::handle_event_in_area`].
    pub fn handle_event(&mut self, event: InputEvent) -> DataTableAction {
        match event {
            InputEvent::Key(key) => self.handle_key(&key),
            InputEvent::Paste(_) | InputEvent::Mouse(_) => DataTableAction::None,
        }
    }

    pub fn handle_event_in_area(&mut self, area: Rect, event: InputEvent) -> DataTableAction {
        match event {
            InputEvent::Mouse(m) => self.handle_mouse_event(area, m),
            other => self.handle_event(other),
        }
    }

    /// Handles a mouse event for a table rendered at `area`.
    pub fn handle_mouse_event(&mut self, area: Rect, event: MouseEvent) -> DataTableAction {
        if !render::hit(area, event.x, event.y) || !self.is_table_live() {
            return DataTableAction::None;
        }
        let view = self.view();
        let layout = self.layout_for(area, Some(&view));
        self.apply_viewport(&layout, Some(&view));
        match event.kind {
            MouseEventKind::ScrollDown => {
                if self.scroll_body(&view, 1) {
                    return DataTableAction::Redraw;
                }
                let moved = self.state.next_page(view.page_count);
                self.page_moved(moved)
            }
            MouseEventKind::ScrollUp => {
                if self.scroll_body(&view, -1) {
                    return DataTableAction::Redraw;
                }
                let moved = self.state.prev_page(view.page_count);
                self.page_moved(moved)
            }
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(&layout, &view, event),
            _ => DataTableAction::None,
        }
    }

    fn handle_click(
        &mut self,
        layout: &TableLayout,
        view: &DerivedView,
        event: MouseEvent,
    ) -> DataTableAction {
        let (x, y) = (event.x, event.y);
        if layout.header.is_some_and(|h| render::hit(h, x, y)) {
            let Some(column) = layout.slot_at(x).map(|s| s.column) else {
                return DataTableAction::None;
            };
            return self.click_header(column, event.modifiers.shift);
        }
        if layout.prev_button.is_some_and(|b| render::hit(b, x, y)) {
            let moved = self.state.prev_page(view.page_count);
            return self.page_moved(moved);
        }
        if layout.next_button.is_some_and(|b| render::hit(b, x, y)) {
            let moved = self.state.next_page(view.page_count);
            return self.page_moved(moved);
        }
        match layout.body_row_at(x, y) {
            Some(line) => {
                let line = self.scroll + line;
                self.click_body(layout.slot_at(x).copied(), line, view)
            }
            None => DataTableAction::None,
        }
    }

    fn click_header(&mut self, column: usize, multi: bool) -> DataTableAction {
        let focus_changed = self.focused_col != Some(column);
        self.focused_col = Some(column);
        if self.columns[column].is_sortable() {
            return self.toggle_sort_at(column, multi);
        }
        if focus_changed {
            DataTableAction::Redraw
        } else {
            DataTableAction::None
        }
    }

    fn click_body(
        &mut self,
        slot: Option<ColumnSlot>,
        line: usize,
        view: &DerivedView,
    ) -> DataTableAction {
        let Some(&row_index) = view.visible_rows.get(line) else {
            tracing::trace!(line, "click below the last row");
            return DataTableAction::None;
        };
        let policy = self.click_policy();
        if policy.rows_interactive() || self.options.selectable {
            self.cursor = Some(line);
        }

        let (route, column_id) = match slot {
            Some(slot) => {
                let column = &self.columns[slot.column];
                let declared = pipeline::cell_content(
                    column,
                    &self.rows[row_index],
                    row_index,
                    self.state.is_selected(row_index),
                    self.sinks.table_actions(),
                    &self.options.null_placeholder,
                )
                .on_click;
                (
                    route_click(column, declared, policy),
                    column.id().to_string(),
                )
            }
            None if policy.rows_interactive() => (ClickRoute::RowClick, String::new()),
            None => (ClickRoute::Ignored, String::new()),
        };

        match route {
            ClickRoute::Action(target) => {
                self.sinks.dispatch(&target, &self.rows[row_index]);
                match target {
                    ActionTarget::Row(action) => DataTableAction::RowAction {
                        action,
                        row: row_index,
                    },
                    ActionTarget::Cell(action) => DataTableAction::CellAction {
                        action,
                        row: row_index,
                        column: column_id,
                    },
                }
            }
            ClickRoute::RowClick => self.fire_row_click(row_index),
            route => {
                tracing::trace!(row_index, ?route, "click produced no action");
                DataTableAction::None
            }
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> DataTableAction {
        if !self.is_table_live() {
            return DataTableAction::None;
        }
        let Some(command) = self.options.bindings.action_for(key) else {
            return DataTableAction::None;
        };
        let view = self.view();
        match command {
            TableCommand::CursorUp => self.move_cursor(&view, -1),
            TableCommand::CursorDown => self.move_cursor(&view, 1),
            TableCommand::PrevPage => {
                let moved = self.state.prev_page(view.page_count);
                self.page_moved(moved)
            }
            TableCommand::NextPage => {
                let moved = self.state.next_page(view.page_count);
                self.page_moved(moved)
            }
            TableCommand::FirstPage => {
                let moved = view.page != 0 && self.state.first_page();
                self.page_moved(moved)
            }
            TableCommand::LastPage => {
                let moved = !view.is_last_page() && self.state.last_page(view.page_count);
                self.page_moved(moved)
            }
            TableCommand::Activate => match self.cursor_row(&view) {
                Some(row_index) if self.rows_interactive() => self.fire_row_click(row_index),
                _ => DataTableAction::None,
            },
            TableCommand::ToggleSelect => match self.cursor_row(&view) {
                Some(row_index) if self.options.selectable => {
                    let selected = self.state.toggle_row_selection(row_index);
                    tracing::debug!(row_index, selected, "selection toggled");
                    DataTableAction::SelectionChanged
                }
                _ => DataTableAction::None,
            },
            TableCommand::FocusNextColumn => self.focus_column(1),
            TableCommand::FocusPrevColumn => self.focus_column(-1),
            TableCommand::Sort | TableCommand::MultiSort => match self.focused_col {
                Some(c) if self.columns[c].is_sortable() => {
                    self.toggle_sort_at(c, command == TableCommand::MultiSort)
                }
                _ => DataTableAction::None,
            },
        }
    }

    fn move_cursor(&mut self, view: &DerivedView, delta: isize) -> DataTableAction {
        if !(self.rows_interactive() || self.options.selectable) || view.is_empty() {
            return DataTableAction::None;
        }
        let last = view.visible_rows.len() - 1;
        let next = match self.cursor_line(view) {
            None => 0,
            Some(c) => c.saturating_add_signed(delta).min(last),
        };
        if self.cursor_line(view) == Some(next) {
            return DataTableAction::None;
        }
        self.cursor = Some(next);
        self.ensure_cursor_visible(view.visible_rows.len());
        DataTableAction::Redraw
    }

    /// Scrolls a page that overflows the body by one line, dragging the cursor along so it stays
    /// on screen. Returns `false` at either end, where the wheel pages instead.
    fn scroll_body(&mut self, view: &DerivedView, delta: isize) -> bool {
        let rows = self.viewport_rows;
        let max = view.visible_rows.len().saturating_sub(rows);
        if rows == 0 || max == 0 {
            return false;
        }
        let next = self.scroll.saturating_add_signed(delta).min(max);
        if next == self.scroll {
            return false;
        }
        self.scroll = next;
        self.cursor = self.cursor.map(|c| c.clamp(next, next + rows - 1));
        true
    }

    fn apply_viewport(&mut self, layout: &TableLayout, view: Option<&DerivedView>) {
        self.viewport_rows = layout.body.height as usize;
        self.ensure_cursor_visible(view.map_or(0, |v| v.visible_rows.len()));
    }

    fn ensure_cursor_visible(&mut self, page_len: usize) {
        let rows = self.viewport_rows;
        if rows == 0 {
            return;
        }
        if let Some(c) = self.cursor.filter(|&c| c < page_len) {
            if c < self.scroll {
                self.scroll = c;
            } else if c >= self.scroll + rows {
                self.scroll = c + 1 - rows;
            }
        }
        self.scroll = self.scroll.min(page_len.saturating_sub(rows));
    }

    fn reset_scroll(&mut self) {
        self.scroll = 0;
        self.cursor = self.cursor.map(|_| 0);
    }

    fn focus_column(&mut self, delta: isize) -> DataTableAction {
        let visible = self.visible_columns();
        if visible.is_empty() {
            return DataTableAction::None;
        }
        let n = visible.len() as isize;
        let next = match self
            .focused_col
            .and_then(|c| visible.iter().position(|&v| v == c))
        {
            None if delta >= 0 => 0,
            None => visible.len() - 1,
            Some(pos) => (pos as isize + delta).rem_euclid(n) as usize,
        };
        self.focused_col = Some(visible[next]);
        DataTableAction::Redraw
    }

    fn toggle_sort_at(&mut self, column: usize, multi: bool) -> DataTableAction {
        let id = self.columns[column].id().to_string();
        self.state.toggle_sort(&id, multi);
        self.reset_scroll();
        DataTableAction::SortChanged
    }

    fn page_moved(&mut self, moved: bool) -> DataTableAction {
        if !moved {
            return DataTableAction::None;
        }
        self.reset_scroll();
        tracing::debug!(page = self.state.page(), "page changed");
        DataTableAction::PageChanged(self.state.page())
    }

    fn fire_row_click(&mut self, row_index: usize) -> DataTableAction {
        self.sinks
            .dispatch(&ActionTarget::Row(ROW_CLICK.to_string()), &self.rows[row_index]);
        DataTableAction::RowAction {
            action: ROW_CLICK.to_string(),
            row: row_index,
        }
    }

    fn click_policy(&self) -> RowClickPolicy {
        RowClickPolicy {
            clickable_rows: self.options.clickable_rows,
            has_row_handler: self.sinks.has_row_handler(),
        }
    }

    fn is_table_live(&self) -> bool {
        !self.loading && !self.options.hide_table
    }

    fn cursor_line(&self, view: &DerivedView) -> Option<usize> {
        self.cursor.filter(|&c| c < view.visible_rows.len())
    }

    fn cursor_row(&self, view: &DerivedView) -> Option<usize> {
        self.cursor_line(view).map(|c| view.visible_rows[c])
    }

    fn visible_columns(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| self.state.is_column_visible(c.id()))
            .map(|(i, _)| i)
            .collect()
    }

    fn layout_for(&self, area: Rect, view: Option<&DerivedView>) -> TableLayout {
        let columns: Vec<(usize, Constraint)> = if self.options.hide_table {
            Vec::new()
        } else if self.loading {
            self.columns
                .iter()
                .enumerate()
                .map(|(i, c)| (i, c.width_constraint()))
                .collect()
        } else {
            self.visible_columns()
                .into_iter()
                .map(|i| (i, self.columns[i].width_constraint()))
                .collect()
        };
        let show_footer =
            view.is_some_and(|v| pipeline::footer_visible(v, self.state.selection().len()));
        TableLayout::compute(
            area,
            &LayoutRequest {
                show_title: self.options.title.is_some() && !self.options.hide_header,
                show_header: !self.options.hide_table && !self.options.hide_table_header,
                show_footer,
                columns: &columns,
                col_gap: self.options.col_gap,
            },
        )
    }

    fn styles(&self, theme: &Theme) -> TableStyles {
        let or_theme = |style: Style, fallback: Style| {
            if style == Style::default() {
                fallback
            } else {
                style
            }
        };
        TableStyles {
            base: or_theme(self.options.style, theme.text_primary),
            header: self.options.header_style.patch(theme.accent),
            cursor: self.options.cursor_style.patch(theme.accent),
            selected: self.options.selected_style.patch(theme.accent),
            disabled: or_theme(self.options.disabled_style, theme.text_muted),
            grid_line: or_theme(self.options.grid_line_style, theme.border),
            muted: theme.text_muted,
            accent: theme.accent,
        }
    }

    fn render_title(&self, area: Rect, buf: &mut Buffer, theme: &Theme, styles: &TableStyles) {
        let Some(title) = &self.options.title else {
            return;
        };
        let mut spans = vec![Span::styled(
            title.clone(),
            styles.base.add_modifier(Modifier::BOLD),
        )];
        if self.options.show_data_count {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!(" {} ", pipeline::format_count(self.rows.len())),
                theme.badge,
            ));
        }
        render::render_line_clipped(area.x, area.y, area.width, buf, &Line::from(spans), styles.base);
    }

    fn render_header(
        &self,
        area: Rect,
        slots: &[ColumnSlot],
        buf: &mut Buffer,
        styles: &TableStyles,
    ) {
        buf.set_style(area, styles.header);
        let sort = resolved_sort(&self.columns, &self.state);
        for slot in slots {
            let column = &self.columns[slot.column];
            let is_focused = self.focused_col == Some(slot.column);
            let sort_priority = sort.iter().position(|&(c, _)| c == slot.column);
            let ctx = HeaderContext {
                column_id: column.id(),
                sort: sort_priority.map(|p| sort[p].1),
                sort_priority,
                sort_count: sort.len(),
                is_focused,
            };
            let style = if is_focused {
                styles.header.add_modifier(Modifier::UNDERLINED)
            } else {
                styles.header
            };
            render::render_line_aligned(
                TableLayout::slot_rect(slot, area),
                buf,
                &pipeline::header_line(column, &ctx),
                column.cell_alignment(),
                style,
            );
        }
        draw_grid_lines(slots, area, self.options.col_gap, buf, styles.grid_line);
    }

    fn render_body(
        &self,
        layout: &TableLayout,
        view: &DerivedView,
        buf: &mut Buffer,
        styles: &TableStyles,
    ) {
        if view.is_empty() {
            if let Some(line) = layout.body_row(0) {
                render::render_line_aligned(
                    line,
                    buf,
                    &Line::from(self.options.empty_message.as_str()),
                    Alignment::Center,
                    styles.muted,
                );
            }
            return;
        }

        let actions = self.sinks.table_actions();
        let highlight = self.rows_interactive() || self.options.selectable;
        let cursor = self.cursor_line(view);
        for (i, (row_index, row)) in view.rows(&self.rows).enumerate().skip(self.scroll) {
            let Some(line) = layout.body_row(i - self.scroll) else {
                break;
            };
            let is_selected = self.state.is_selected(row_index);
            let row_style = if highlight && cursor == Some(i) {
                styles.cursor
            } else if is_selected {
                styles.selected
            } else {
                styles.base
            };
            buf.set_style(line, row_style);
            for slot in &layout.columns {
                let column = &self.columns[slot.column];
                let content = pipeline::cell_content(
                    column,
                    row,
                    row_index,
                    is_selected,
                    actions,
                    &self.options.null_placeholder,
                );
                render::render_line_aligned(
                    TableLayout::slot_rect(slot, line),
                    buf,
                    &content.line,
                    column.cell_alignment(),
                    row_style,
                );
            }
            draw_grid_lines(
                &layout.columns,
                line,
                self.options.col_gap,
                buf,
                styles.grid_line,
            );
        }
        render_overflow_markers(
            layout.body,
            self.scroll,
            view.visible_rows.len(),
            buf,
            styles.accent,
        );
    }

    fn render_footer(
        &self,
        area: Rect,
        layout: &TableLayout,
        view: &DerivedView,
        buf: &mut Buffer,
        styles: &TableStyles,
    ) {
        let status = pipeline::footer_status(view, self.state.selection().len());
        render::render_line_clipped(
            area.x,
            area.y,
            area.width,
            buf,
            &Line::from(status),
            styles.muted,
        );

        let button_style = |enabled: bool| {
            if enabled {
                styles.accent.add_modifier(Modifier::BOLD)
            } else {
                styles.disabled
            }
        };
        let buttons = [
            (layout.prev_button, PREV_LABEL, !view.is_first_page()),
            (layout.next_button, NEXT_LABEL, !view.is_last_page()),
        ];
        for (rect, label, enabled) in buttons {
            let Some(rect) = rect else {
                continue;
            };
            let style = button_style(enabled);
            buf.set_style(rect, style);
            render::render_line_clipped(rect.x, rect.y, rect.width, buf, &Line::from(label), style);
        }
    }
}

impl<R> std::fmt::Debug for DataTable<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("state", &self.state)
            .field("loading", &self.loading)
            .field("scroll", &self.scroll)
            .field("sinks", &self.sinks)
            .finish_non_exhaustive()
    }
}

fn draw_grid_lines(slots: &[ColumnSlot], line: Rect, gap: u16, buf: &mut Buffer, style: Style) {
    if gap == 0 {
        return;
    }
    for slot in slots.iter().take(slots.len().saturating_sub(1)) {
        let x = slot.x.saturating_add(slot.width);
        for y in line.top()..line.bottom() {
            if render::hit(line, x, y) {
                render::fill(Rect::new(x, y, 1, 1), buf, GRID_LINE_SYMBOL, style);
            }
        }
    }
}

fn render_overflow_markers(
    body: Rect,
    scroll: usize,
    page_len: usize,
    buf: &mut Buffer,
    style: Style,
) {
    if body.width == 0 || body.height == 0 {
        return;
    }
    let x = body.right() - 1;
    if scroll > 0 {
        render::fill(Rect::new(x, body.y, 1, 1), buf, MORE_ABOVE_SYMBOL, style);
    }
    if scroll + (body.height as usize) < page_len {
        render::fill(Rect::new(x, body.bottom() - 1, 1, 1), buf, MORE_BELOW_SYMBOL, style);
    }
}

fn render_skeleton(layout: &TableLayout, rows: usize, buf: &mut Buffer, style: Style) {
    let lines = layout
        .header
        .into_iter()
        .chain((0..rows).map_while(|i| layout.body_row(i)));
    for line in lines {
        for slot in &layout.columns {
            render::fill(TableLayout::slot_rect(slot, line), buf, SKELETON_SYMBOL, style);
        }
    }
}

fn render_text(area: Rect, buf: &mut Buffer, text: &Text<'_>, base: Style) {
    let style = base.patch(text.style);
    for (i, line) in text.lines.iter().enumerate().take(area.height as usize) {
        let row = Rect::new(area.x, area.y + i as u16, area.width, 1);
        let alignment = line.alignment.or(text.alignment).unwrap_or(Alignment::Left);
        render::render_line_aligned(row, buf, line, alignment, style);
    }
}
