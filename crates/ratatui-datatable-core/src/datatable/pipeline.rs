//! Render pipeline: turns a `(row, column)` pair into drawable content.

use super::column::CellContent;
use super::column::CellContext;
use super::column::CellSpec;
use super::column::ColumnSpec;
use super::column::Header;
use super::column::HeaderContext;
use super::router::TableActions;
use super::view::DerivedView;
use ratatui::text::Line;
use ratatui::text::Span;

/// Produces the content of one cell.
///
/// Function cells get a fresh [`CellContext`] carrying `actions`; static cells are cloned;
/// otherwise the accessor value is shown, with `null_placeholder` standing in for
/// [`super::value::CellValue::Null`].
pub fn cell_content<R>(
    column: &ColumnSpec<R>,
    row: &R,
    row_index: usize,
    is_selected: bool,
    actions: TableActions,
    null_placeholder: &str,
) -> CellContent {
    match column.cell_spec() {
        Some(CellSpec::Render(render)) => {
            let value = column.value(row);
            render(&CellContext {
                value: &value,
                row,
                row_index,
                is_selected,
                actions,
            })
        }
        Some(CellSpec::Static(line)) => CellContent::new(line.clone()),
        None => {
            let value = column.value(row);
            if value.is_null() {
                CellContent::new(null_placeholder.to_string())
            } else {
                CellContent::new(value.to_string())
            }
        }
    }
}

/// Header label for `column`, with a sort indicator for text headers.
///
/// The 1-based sort priority is appended only while several columns are sorted.
pub fn header_line<R>(column: &ColumnSpec<R>, ctx: &HeaderContext<'_>) -> Line<'static> {
    match column.header_spec() {
        Header::Render(render) => render(ctx),
        Header::Text(title) => {
            let mut spans = vec![Span::raw(title.clone())];
            if let Some(direction) = ctx.sort {
                spans.push(Span::raw(format!(" {}", direction.indicator())));
                match ctx.sort_priority {
                    Some(p) if ctx.sort_count > 1 => spans.push(Span::raw((p + 1).to_string())),
                    _ => {}
                }
            }
            Line::from(spans)
        }
    }
}

/// Count badge text: at least two digits, so `7` reads `07` and `0` reads `00`.
pub fn format_count(n: usize) -> String {
    format!("{n:02}")
}

/// Footer status text. Selection counts win over the page indicator.
///
/// The selection count is measured against every row in the table, not just the current page,
/// since selection survives paging.
pub fn footer_status(view: &DerivedView, selected: usize) -> String {
    if selected > 0 {
        format!("{selected} row(s) out of {}", view.total_rows)
    } else {
        format!("Page {} of {}", view.page + 1, view.page_count)
    }
}

/// Whether the footer is shown at all.
pub fn footer_visible(view: &DerivedView, selected: usize) -> bool {
    view.page_count > 1 || selected > 0
}
