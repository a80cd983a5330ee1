//! View derivation: the sorted, paginated projection of a row collection.

use super::column::Columns;
use super::state::InteractionState;
use super::state::SortDirection;
use super::state::clamp_page;
use std::cmp::Ordering;

/// The rows to show for the current state, as indices into the caller's row slice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DerivedView {
    /// Row indices in display order, already sliced to the current page.
    pub visible_rows: Vec<usize>,
    /// The page actually shown (the requested page clamped into range).
    pub page: usize,
    /// Always at least 1, even with no rows.
    pub page_count: usize,
    pub total_rows: usize,
}

impl DerivedView {
    /// Pairs each visible index with its row.
    pub fn rows<'a, R>(&'a self, rows: &'a [R]) -> impl Iterator<Item = (usize, &'a R)> + 'a {
        self.visible_rows
            .iter()
            .filter_map(move |&i| rows.get(i).map(|r| (i, r)))
    }

    pub fn is_empty(&self) -> bool {
        self.visible_rows.is_empty()
    }

    pub fn is_first_page(&self) -> bool {
        self.page == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.page + 1 >= self.page_count
    }
}

/// `ceil(total_rows / page_size)`, never less than 1.
pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size.max(1)).max(1)
}

/// Derives the visible page of `rows`.
///
/// Sort entries referring to unknown or unsortable columns are skipped. The sort is stable, so
/// rows with equal keys keep their original relative order, and the result depends only on the
/// inputs.
pub fn derive_view<R>(rows: &[R], columns: &Columns<R>, state: &InteractionState) -> DerivedView {
    let total_rows = rows.len();
    let page_size = state.page_size().max(1);
    let page_count = page_count(total_rows, page_size);
    let page = clamp_page(state.page(), page_count);

    let order = sorted_order(rows, columns, state);
    let start = page.saturating_mul(page_size).min(total_rows);
    let end = start.saturating_add(page_size).min(total_rows);

    DerivedView {
        visible_rows: order[start..end].to_vec(),
        page,
        page_count,
        total_rows,
    }
}

/// The sort keys that actually apply, as `(column index, direction)` in priority order.
///
/// Entries naming an unknown or unsortable column are dropped here, so headers and the row
/// order always agree on which keys are in effect.
pub fn resolved_sort<R>(
    columns: &Columns<R>,
    state: &InteractionState,
) -> Vec<(usize, SortDirection)> {
    state
        .sort()
        .iter()
        .filter_map(|entry| {
            let resolved = columns
                .position(&entry.column_id)
                .filter(|&i| columns[i].is_sortable());
            if resolved.is_none() {
                tracing::trace!(column_id = %entry.column_id, "ignoring stale sort entry");
            }
            resolved.map(|i| (i, entry.direction))
        })
        .collect()
}

/// All row indices in display order, ignoring pagination.
pub fn sorted_order<R>(rows: &[R], columns: &Columns<R>, state: &InteractionState) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();

    let keys = resolved_sort(columns, state);
    if keys.is_empty() || rows.len() < 2 {
        return order;
    }

    // One value per (row, key), extracted up front so accessors run once per row.
    let values: Vec<Vec<_>> = rows
        .iter()
        .map(|row| keys.iter().map(|&(c, _)| columns[c].value(row)).collect())
        .collect();

    order.sort_by(|&a, &b| {
        for (k, &(_, direction)) in keys.iter().enumerate() {
            let ord = values[a][k].sort_cmp(&values[b][k]);
            let ord = match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatable::column::ColumnSpec;
    use crate::datatable::state::SortEntry;

    #[derive(Debug, PartialEq)]
    struct Row {
        id: u32,
        name: &'static str,
        score: Option<i32>,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, name: "B", score: Some(3) },
            Row { id: 2, name: "A", score: None },
            Row { id: 3, name: "A", score: Some(1) },
        ]
    }

    fn columns() -> Columns<Row> {
        Columns::new(vec![
            ColumnSpec::new("id", |r: &Row| r.id),
            ColumnSpec::new("name", |r: &Row| r.name),
            ColumnSpec::new("score", |r: &Row| r.score),
            ColumnSpec::new("locked", |r: &Row| r.id).sortable(false),
        ])
        .unwrap()
    }

    fn ids(view: &DerivedView, rows: &[Row]) -> Vec<u32> {
        view.rows(rows).map(|(_, r)| r.id).collect()
    }

    #[test]
    fn sorts_stably_and_paginates() {
        let rows = rows();
        let mut state = InteractionState::new(2);
        state.set_sort(vec![SortEntry::asc("name")]);

        let view = derive_view(&rows, &columns(), &state);
        assert_eq!(view.page_count, 2);
        assert_eq!(ids(&view, &rows), vec![2, 3]);

        state.set_page(1);
        let view = derive_view(&rows, &columns(), &state);
        assert_eq!(ids(&view, &rows), vec![1]);
    }

    #[test]
    fn secondary_key_breaks_ties() {
        let rows = rows();
        let mut state = InteractionState::default();
        state.set_sort(vec![SortEntry::asc("name"), SortEntry::desc("id")]);
        let view = derive_view(&rows, &columns(), &state);
        assert_eq!(ids(&view, &rows), vec![3, 2, 1]);
    }

    #[test]
    fn nulls_sort_last_ascending() {
        let rows = rows();
        let mut state = InteractionState::default();
        state.set_sort(vec![SortEntry::asc("score")]);
        let view = derive_view(&rows, &columns(), &state);
        assert_eq!(ids(&view, &rows), vec![3, 1, 2]);
    }

    #[test]
    fn stale_and_unsortable_entries_are_ignored() {
        let rows = rows();
        let mut state = InteractionState::default();
        state.set_sort(vec![SortEntry::desc("gone"), SortEntry::desc("locked")]);
        let view = derive_view(&rows, &columns(), &state);
        assert_eq!(ids(&view, &rows), vec![1, 2, 3]);
    }

    #[test]
    fn resolved_sort_renumbers_after_dropping_stale_entries() {
        let mut state = InteractionState::default();
        state.set_sort(vec![
            SortEntry::asc("gone"),
            SortEntry::desc("locked"),
            SortEntry::asc("name"),
            SortEntry::desc("id"),
        ]);
        assert_eq!(
            resolved_sort(&columns(), &state),
            vec![(1, SortDirection::Asc), (0, SortDirection::Desc)]
        );
    }

    #[test]
    fn empty_rows_have_one_page() {
        let rows: Vec<Row> = Vec::new();
        let mut state = InteractionState::default();
        state.set_page(5);
        let view = derive_view(&rows, &columns(), &state);
        assert_eq!(view.page_count, 1);
        assert_eq!(view.page, 0);
        assert!(view.is_empty());
        assert!(view.is_first_page() && view.is_last_page());
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(3, 1), 3);
    }
}
