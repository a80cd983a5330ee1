//! Table geometry.
//!
//! Rendering and mouse hit-testing both go through [`TableLayout::compute`], so a click always
//! lands on the cell that was drawn at that position.

use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;

use crate::render;

pub const PREV_LABEL: &str = " Previous ";
pub const NEXT_LABEL: &str = " Next ";

/// One visible column's horizontal extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSlot {
    /// Index into the table's column list.
    pub column: usize,
    pub x: u16,
    pub width: u16,
}

#[derive(Clone, Debug)]
pub struct LayoutRequest<'a> {
    pub show_title: bool,
    pub show_header: bool,
    pub show_footer: bool,
    /// `(column index, width)` for every visible column, in display order.
    pub columns: &'a [(usize, Constraint)],
    pub col_gap: u16,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableLayout {
    pub title: Option<Rect>,
    pub header: Option<Rect>,
    pub body: Rect,
    pub footer: Option<Rect>,
    pub columns: Vec<ColumnSlot>,
    pub prev_button: Option<Rect>,
    pub next_button: Option<Rect>,
}

impl TableLayout {
    pub fn compute(area: Rect, req: &LayoutRequest<'_>) -> Self {
        let mut out = TableLayout::default();
        if area.width == 0 || area.height == 0 {
            return out;
        }

        let mut top = area.y;
        let mut bottom = area.y + area.height;

        if req.show_title && bottom > top {
            out.title = Some(Rect::new(area.x, top, area.width, 1));
            top += 1;
        }
        if req.show_header && bottom > top {
            out.header = Some(Rect::new(area.x, top, area.width, 1));
            top += 1;
        }
        if req.show_footer && bottom > top {
            bottom -= 1;
            let footer = Rect::new(area.x, bottom, area.width, 1);
            out.footer = Some(footer);
            let (prev, next) = footer_buttons(footer);
            out.prev_button = prev;
            out.next_button = next;
        }
        out.body = Rect::new(area.x, top, area.width, bottom - top);
        out.columns = column_slots(area, req.columns, req.col_gap);
        out
    }

    /// The `i`-th body line, if it is on screen.
    pub fn body_row(&self, i: usize) -> Option<Rect> {
        let i = u16::try_from(i).ok()?;
        (i < self.body.height).then(|| Rect::new(self.body.x, self.body.y + i, self.body.width, 1))
    }

    /// Body line index under terminal row `y`.
    pub fn body_row_at(&self, x: u16, y: u16) -> Option<usize> {
        render::hit(self.body, x, y).then(|| (y - self.body.y) as usize)
    }

    pub fn slot_at(&self, x: u16) -> Option<&ColumnSlot> {
        self.columns
            .iter()
            .find(|s| x >= s.x && (x as u32) < s.x as u32 + s.width as u32)
    }

    pub fn slot_rect(slot: &ColumnSlot, line: Rect) -> Rect {
        Rect::new(slot.x, line.y, slot.width, line.height)
    }
}

fn column_slots(area: Rect, columns: &[(usize, Constraint)], gap: u16) -> Vec<ColumnSlot> {
    if columns.is_empty() {
        return Vec::new();
    }
    let rects = Layout::horizontal(columns.iter().map(|(_, c)| *c))
        .spacing(gap)
        .split(Rect::new(area.x, area.y, area.width, 1));
    columns
        .iter()
        .zip(rects.iter())
        .map(|(&(column, _), r)| ColumnSlot {
            column,
            x: r.x,
            width: r.width,
        })
        .collect()
}

/// Right-aligned `Previous` / `Next` controls. Omitted when the footer is too narrow.
fn footer_buttons(footer: Rect) -> (Option<Rect>, Option<Rect>) {
    let next_w = render::str_width(NEXT_LABEL) as u16;
    let prev_w = render::str_width(PREV_LABEL) as u16;
    if footer.width < next_w + 1 + prev_w {
        return (None, None);
    }
    let next_x = footer.x + footer.width - next_w;
    let prev_x = next_x - 1 - prev_w;
    (
        Some(Rect::new(prev_x, footer.y, prev_w, 1)),
        Some(Rect::new(next_x, footer.y, next_w, 1)),
    )
}
