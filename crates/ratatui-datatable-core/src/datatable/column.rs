//! Column specifications: how one field is extracted from a row, labeled, and rendered.

use super::error::DataTableError;
use super::router::ActionTarget;
use super::router::TableActions;
use super::state::SortDirection;
use super::value::CellValue;
use ratatui::layout::Alignment;
use ratatui::layout::Constraint;
use ratatui::text::Line;
use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

pub type Accessor<R> = Arc<dyn Fn(&R) -> CellValue + Send + Sync>;
pub type CellRenderer<R> = Arc<dyn Fn(&CellContext<'_, R>) -> CellContent + Send + Sync>;
pub type HeaderRenderer = Arc<dyn Fn(&HeaderContext<'_>) -> Line<'static> + Send + Sync>;

/// Everything a cell renderer gets to see for one `(row, column)` pair.
///
/// `actions` is injected by the table on every render call; column specs never hold callbacks
/// themselves, so the same spec can be shared by several tables.
pub struct CellContext<'a, R> {
    pub value: &'a CellValue,
    pub row: &'a R,
    /// Index of `row` in the table's row vector (not its position on screen).
    pub row_index: usize,
    pub is_selected: bool,
    pub actions: TableActions,
}

/// Context for [`Header::Render`].
#[derive(Clone, Copy, Debug)]
pub struct HeaderContext<'a> {
    pub column_id: &'a str,
    pub sort: Option<SortDirection>,
    /// 0-based position of this column in the sort order, if sorted.
    pub sort_priority: Option<usize>,
    /// Number of active sort entries.
    pub sort_count: usize,
    pub is_focused: bool,
}

/// What a cell renderer returns: the text to draw plus an optional click action.
///
/// The action only takes effect for columns flagged with
/// [`ColumnMeta::has_cell_action`]; elsewhere a click is a plain row click.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellContent {
    pub line: Line<'static>,
    pub on_click: Option<ActionTarget>,
}

impl CellContent {
    pub fn new(line: impl Into<Line<'static>>) -> Self {
        Self {
            line: line.into(),
            on_click: None,
        }
    }

    pub fn on_click(mut self, target: ActionTarget) -> Self {
        self.on_click = Some(target);
        self
    }
}

impl From<Line<'static>> for CellContent {
    fn from(line: Line<'static>) -> Self {
        Self::new(line)
    }
}

impl From<String> for CellContent {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for CellContent {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

#[derive(Clone)]
pub enum Header {
    Text(String),
    Render(HeaderRenderer),
}

pub enum CellSpec<R> {
    /// Fixed content, identical on every row.
    Static(Line<'static>),
    Render(CellRenderer<R>),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColumnMeta {
    /// The cell renderer handles clicks itself; clicks on this column never reach the row.
    pub has_cell_action: bool,
}

/// Declarative description of one table column.
///
/// ```
/// use ratatui_datatable_core::datatable::column::{CellContent, ColumnSpec};
///
/// struct User { name: String, age: u32 }
///
/// let name = ColumnSpec::new("name", |u: &User| u.name.clone()).header("Name");
/// let edit = ColumnSpec::<User>::display("edit")
///     .cell(|ctx| CellContent::from("Edit").on_click(ctx.actions.cell("edit")))
///     .with_cell_action();
/// # let _ = (name, edit);
/// ```
pub struct ColumnSpec<R> {
    id: String,
    header: Header,
    accessor: Option<Accessor<R>>,
    cell: Option<CellSpec<R>>,
    meta: ColumnMeta,
    sortable: bool,
    width: Constraint,
    alignment: Alignment,
}

impl<R: 'static> ColumnSpec<R> {
    /// A data column. Sortable by default; the header defaults to the id.
    pub fn new<V>(
        id: impl Into<String>,
        accessor: impl Fn(&R) -> V + Send + Sync + 'static,
    ) -> Self
    where
        V: Into<CellValue>,
    {
        let id = id.into();
        Self {
            header: Header::Text(id.clone()),
            id,
            accessor: Some(Arc::new(move |row: &R| accessor(row).into())),
            cell: None,
            meta: ColumnMeta::default(),
            sortable: true,
            width: Constraint::Fill(1),
            alignment: Alignment::Left,
        }
    }

    /// A column without an accessor (action buttons, decorations). Never sortable; its value is
    /// always [`CellValue::Null`].
    pub fn display(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            header: Header::Text(String::new()),
            id,
            accessor: None,
            cell: None,
            meta: ColumnMeta::default(),
            sortable: false,
            width: Constraint::Fill(1),
            alignment: Alignment::Left,
        }
    }

    pub fn header(mut self, title: impl Into<String>) -> Self {
        self.header = Header::Text(title.into());
        self
    }

    pub fn header_with(
        mut self,
        render: impl Fn(&HeaderContext<'_>) -> Line<'static> + Send + Sync + 'static,
    ) -> Self {
        self.header = Header::Render(Arc::new(render));
        self
    }

    pub fn cell(
        mut self,
        render: impl Fn(&CellContext<'_, R>) -> CellContent + Send + Sync + 'static,
    ) -> Self {
        self.cell = Some(CellSpec::Render(Arc::new(render)));
        self
    }

    pub fn static_cell(mut self, line: impl Into<Line<'static>>) -> Self {
        self.cell = Some(CellSpec::Static(line.into()));
        self
    }

    /// Shorthand for setting [`ColumnMeta::has_cell_action`].
    pub fn with_cell_action(mut self) -> Self {
        self.meta.has_cell_action = true;
        self
    }

    pub fn meta(mut self, meta: ColumnMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn width(mut self, width: Constraint) -> Self {
        self.width = width;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl<R> ColumnSpec<R> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn header_spec(&self) -> &Header {
        &self.header
    }

    pub fn cell_spec(&self) -> Option<&CellSpec<R>> {
        self.cell.as_ref()
    }

    pub fn column_meta(&self) -> ColumnMeta {
        self.meta
    }

    pub fn width_constraint(&self) -> Constraint {
        self.width
    }

    pub fn cell_alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn has_accessor(&self) -> bool {
        self.accessor.is_some()
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable && self.accessor.is_some()
    }

    pub fn value(&self, row: &R) -> CellValue {
        self.accessor
            .as_ref()
            .map(|f| f(row))
            .unwrap_or(CellValue::Null)
    }

    /// Clicks on this column are handled by the cell and must not reach the row.
    ///
    /// Requires both the metadata flag and a function cell; a static cell never intercepts.
    pub fn intercepts_clicks(&self) -> bool {
        self.meta.has_cell_action && matches!(self.cell, Some(CellSpec::Render(_)))
    }
}

impl<R> Clone for ColumnSpec<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            cell: self.cell.clone(),
            meta: self.meta,
            sortable: self.sortable,
            width: self.width,
            alignment: self.alignment,
        }
    }
}

impl<R> Clone for CellSpec<R> {
    fn clone(&self) -> Self {
        match self {
            CellSpec::Static(line) => CellSpec::Static(line.clone()),
            CellSpec::Render(f) => CellSpec::Render(f.clone()),
        }
    }
}

impl<R> fmt::Debug for ColumnSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = match self.cell {
            None => "none",
            Some(CellSpec::Static(_)) => "static",
            Some(CellSpec::Render(_)) => "render",
        };
        f.debug_struct("ColumnSpec")
            .field("id", &self.id)
            .field("accessor", &self.accessor.is_some())
            .field("cell", &cell)
            .field("meta", &self.meta)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .finish()
    }
}

/// A column list whose ids are known to be non-empty and unique.
pub struct Columns<R> {
    specs: Vec<ColumnSpec<R>>,
}

impl<R> Columns<R> {
    pub fn new(specs: Vec<ColumnSpec<R>>) -> Result<Self, DataTableError> {
        let mut seen = HashSet::with_capacity(specs.len());
        for (index, spec) in specs.iter().enumerate() {
            if spec.id.is_empty() {
                return Err(DataTableError::EmptyColumnId { index });
            }
            if !seen.insert(spec.id.as_str()) {
                return Err(DataTableError::DuplicateColumnId(spec.id.clone()));
            }
        }
        Ok(Self { specs })
    }

    pub fn empty() -> Self {
        Self { specs: Vec::new() }
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.specs.iter().position(|c| c.id == id)
    }

    pub fn find(&self, id: &str) -> Option<&ColumnSpec<R>> {
        self.specs.iter().find(|c| c.id == id)
    }

    pub fn into_inner(self) -> Vec<ColumnSpec<R>> {
        self.specs
    }
}

impl<R> Deref for Columns<R> {
    type Target = [ColumnSpec<R>];

    fn deref(&self) -> &Self::Target {
        &self.specs
    }
}

impl<R> Clone for Columns<R> {
    fn clone(&self) -> Self {
        Self {
            specs: self.specs.clone(),
        }
    }
}

impl<R> fmt::Debug for Columns<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.specs.iter()).finish()
    }
}
