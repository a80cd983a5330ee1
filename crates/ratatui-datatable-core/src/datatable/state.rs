//! Per-table interaction state: sort order, pagination, column visibility, and row selection.
//!
//! The state only changes through the methods below, each of which applies one complete
//! transition. It is never persisted; a new table starts from [`InteractionState::new`].

use std::collections::BTreeSet;
use std::collections::HashMap;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortEntry {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortEntry {
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Desc,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionState {
    sort: Vec<SortEntry>,
    page: usize,
    page_size: usize,
    column_visibility: HashMap<String, bool>,
    selection: BTreeSet<usize>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl InteractionState {
    pub fn new(page_size: usize) -> Self {
        Self {
            sort: Vec::new(),
            page: 0,
            page_size: sanitize_page_size(page_size),
            column_visibility: HashMap::new(),
            selection: BTreeSet::new(),
        }
    }

    // Sorting

    /// Sort entries in priority order (first entry is the primary key).
    pub fn sort(&self) -> &[SortEntry] {
        &self.sort
    }

    pub fn set_sort(&mut self, sort: Vec<SortEntry>) {
        tracing::debug!(?sort, "sort replaced");
        self.sort = sort;
        self.page = 0;
    }

    pub fn clear_sort(&mut self) {
        self.set_sort(Vec::new());
    }

    pub fn sort_direction(&self, column_id: &str) -> Option<SortDirection> {
        self.sort
            .iter()
            .find(|s| s.column_id == column_id)
            .map(|s| s.direction)
    }

    pub fn sort_priority(&self, column_id: &str) -> Option<usize> {
        self.sort.iter().position(|s| s.column_id == column_id)
    }

    /// Advances `column_id` through unsorted → ascending → descending → unsorted.
    ///
    /// With `multi == false` every other sort entry is dropped; otherwise the column keeps (or
    /// takes, when newly added, the last) priority slot. Returns the new direction.
    pub fn toggle_sort(&mut self, column_id: &str, multi: bool) -> Option<SortDirection> {
        let next = match self.sort_direction(column_id) {
            None => Some(SortDirection::Asc),
            Some(SortDirection::Asc) => Some(SortDirection::Desc),
            Some(SortDirection::Desc) => None,
        };

        if !multi {
            self.sort.retain(|s| s.column_id == column_id);
        }
        match (next, self.sort_priority(column_id)) {
            (Some(direction), Some(i)) => self.sort[i].direction = direction,
            (Some(direction), None) => self.sort.push(SortEntry {
                column_id: column_id.to_string(),
                direction,
            }),
            (None, Some(i)) => {
                self.sort.remove(i);
            }
            (None, None) => {}
        }
        self.page = 0;
        tracing::debug!(column_id, ?next, multi, "sort toggled");
        next
    }

    // Pagination

    /// The requested page. May be out of range; views clamp it.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Changes the page size, keeping the first row of the current page on screen.
    pub fn set_page_size(&mut self, page_size: usize) {
        let page_size = sanitize_page_size(page_size);
        let top_row = self.page.saturating_mul(self.page_size);
        self.page = top_row / page_size;
        self.page_size = page_size;
    }

    pub fn can_prev_page(&self, page_count: usize) -> bool {
        clamp_page(self.page, page_count) > 0
    }

    pub fn can_next_page(&self, page_count: usize) -> bool {
        clamp_page(self.page, page_count) + 1 < page_count.max(1)
    }

    /// Moves to the next page. At the last page this is a no-op returning `false`.
    pub fn next_page(&mut self, page_count: usize) -> bool {
        if !self.can_next_page(page_count) {
            self.page = clamp_page(self.page, page_count);
            return false;
        }
        self.page = clamp_page(self.page, page_count) + 1;
        true
    }

    /// Moves to the previous page. At the first page this is a no-op returning `false`.
    pub fn prev_page(&mut self, page_count: usize) -> bool {
        if !self.can_prev_page(page_count) {
            self.page = 0;
            return false;
        }
        self.page = clamp_page(self.page, page_count) - 1;
        true
    }

    pub fn first_page(&mut self) -> bool {
        let changed = self.page != 0;
        self.page = 0;
        changed
    }

    pub fn last_page(&mut self, page_count: usize) -> bool {
        let last = page_count.max(1) - 1;
        let changed = self.page != last;
        self.page = last;
        changed
    }

    // Column visibility

    /// Columns without an entry are visible.
    pub fn is_column_visible(&self, column_id: &str) -> bool {
        self.column_visibility
            .get(column_id)
            .copied()
            .unwrap_or(true)
    }

    pub fn column_visibility(&self) -> &HashMap<String, bool> {
        &self.column_visibility
    }

    pub fn set_column_visibility(&mut self, column_id: impl Into<String>, visible: bool) {
        self.column_visibility.insert(column_id.into(), visible);
    }

    pub fn toggle_column_visibility(&mut self, column_id: &str) -> bool {
        let visible = !self.is_column_visible(column_id);
        self.column_visibility
            .insert(column_id.to_string(), visible);
        visible
    }

    pub fn replace_column_visibility(&mut self, visibility: HashMap<String, bool>) {
        self.column_visibility = visibility;
    }

    // Selection

    /// Selected rows, as indices into the table's row vector.
    pub fn selection(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    pub fn is_selected(&self, row_index: usize) -> bool {
        self.selection.contains(&row_index)
    }

    pub fn select_row(&mut self, row_index: usize) -> bool {
        self.selection.insert(row_index)
    }

    pub fn deselect_row(&mut self, row_index: usize) -> bool {
        self.selection.remove(&row_index)
    }

    /// Returns whether the row is selected afterwards.
    pub fn toggle_row_selection(&mut self, row_index: usize) -> bool {
        if self.selection.remove(&row_index) {
            false
        } else {
            self.selection.insert(row_index);
            true
        }
    }

    pub fn select_rows(&mut self, rows: impl IntoIterator<Item = usize>) {
        self.selection.extend(rows);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Drops selected indices that no longer point at a row.
    pub(crate) fn retain_selection_below(&mut self, total_rows: usize) {
        self.selection.retain(|&i| i < total_rows);
    }
}

/// Clamps a requested page into `[0, page_count - 1]`.
pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.min(page_count.max(1) - 1)
}

fn sanitize_page_size(page_size: usize) -> usize {
    if page_size == 0 {
        tracing::warn!("page size 0 is invalid, using 1");
        return 1;
    }
    page_size
}
