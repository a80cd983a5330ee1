//! Low-level buffer helpers shared by the widgets: width-aware clipping, alignment, and fills.

use ratatui::buffer::Buffer;
use ratatui::layout::Alignment;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: &str = "…";

/// Display width of `line`, counting tabs as four columns.
pub fn line_width(line: &Line<'_>) -> usize {
    line.spans.iter().map(|s| str_width(&s.content)).sum()
}

pub fn str_width(s: &str) -> usize {
    if s.contains('\t') {
        s.split('\t').map(UnicodeWidthStr::width).sum::<usize>() + 4 * s.matches('\t').count()
    } else {
        UnicodeWidthStr::width(s)
    }
}

/// Writes `line` at `(x, y)`, using at most `max_cols` columns.
///
/// Spans without their own style use `fallback_style` (patched with the line style). When the
/// line does not fit, the last visible column becomes `…`. Wide characters are never split.
/// Returns the number of columns written.
pub fn render_line_clipped(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    line: &Line<'_>,
    fallback_style: Style,
) -> u16 {
    if max_cols == 0 {
        return 0;
    }
    let total = line_width(line);
    let max_cols = max_cols as usize;
    let (budget, truncated) = if total > max_cols {
        (max_cols - 1, true)
    } else {
        (max_cols, false)
    };

    let base = fallback_style.patch(line.style);
    let mut out_cols = 0usize;
    let mut last_style = base;
    let mut tmp = [0u8; 4];

    'spans: for span in &line.spans {
        let style = base.patch(span.style);
        last_style = style;
        for ch in span.content.chars() {
            if ch == '\t' {
                for _ in 0..4 {
                    if out_cols + 1 > budget {
                        break 'spans;
                    }
                    put(buf, x, y, out_cols, " ", style);
                    out_cols += 1;
                }
                continue;
            }

            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if w == 0 {
                continue;
            }
            if out_cols + w > budget {
                break 'spans;
            }
            put(buf, x, y, out_cols, ch.encode_utf8(&mut tmp), style);
            if w == 2 {
                put(buf, x, y, out_cols + 1, "", style);
            }
            out_cols += w;
        }
    }

    if truncated {
        put(buf, x, y, out_cols, ELLIPSIS, last_style);
        out_cols += 1;
    }
    out_cols as u16
}

/// Renders `line` on the first row of `area`, honoring `alignment` when the line is narrower
/// than the area.
pub fn render_line_aligned(
    area: Rect,
    buf: &mut Buffer,
    line: &Line<'_>,
    alignment: Alignment,
    fallback_style: Style,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let w = line_width(line).min(area.width as usize) as u16;
    let dx = match alignment {
        Alignment::Left => 0,
        Alignment::Center => (area.width - w) / 2,
        Alignment::Right => area.width - w,
    };
    render_line_clipped(
        area.x + dx,
        area.y,
        area.width - dx,
        buf,
        line,
        fallback_style,
    );
}

/// Fills every cell of `area` with `symbol`.
pub fn fill(area: Rect, buf: &mut Buffer, symbol: &str, style: Style) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(symbol);
                cell.set_style(style);
            }
        }
    }
}

/// Returns `true` if the terminal position `(x, y)` falls inside `area`.
pub fn hit(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x
        && y >= area.y
        && (x as u32) < area.x as u32 + area.width as u32
        && (y as u32) < area.y as u32 + area.height as u32
}

fn put(buf: &mut Buffer, x: u16, y: u16, dx: usize, symbol: &str, style: Style) {
    let Ok(dx) = u16::try_from(dx) else {
        return;
    };
    if let Some(cell) = buf.cell_mut((x.saturating_add(dx), y)) {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::text::Span;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn truncates_with_ellipsis() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 1));
        let written = render_line_clipped(0, 0, 5, &mut buf, &Line::raw("abcdefgh"), Style::default());
        assert_eq!(written, 5);
        assert_eq!(row(&buf, 0), "abcd…");
    }

    #[test]
    fn exact_fit_is_not_truncated() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 1));
        render_line_clipped(0, 0, 3, &mut buf, &Line::raw("abc"), Style::default());
        assert_eq!(row(&buf, 0), "abc");
    }

    #[test]
    fn wide_chars_are_not_split() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        render_line_clipped(0, 0, 4, &mut buf, &Line::raw("你好吗"), Style::default());
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "你");
        assert_eq!(buf.cell((2, 0)).unwrap().symbol(), "…");
    }

    #[test]
    fn right_alignment_pads_left() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 1));
        let line = Line::from(vec![Span::raw("4"), Span::raw("2")]);
        render_line_aligned(buf.area, &mut buf, &line, Alignment::Right, Style::default());
        assert_eq!(row(&buf, 0), "    42");
    }

    #[test]
    fn tabs_count_as_four_columns() {
        assert_eq!(str_width("\tx"), 5);
        assert_eq!(line_width(&Line::raw("a\tb")), 6);
    }

    #[test]
    fn hit_excludes_far_edges() {
        let r = Rect::new(2, 3, 4, 1);
        assert!(hit(r, 2, 3));
        assert!(hit(r, 5, 3));
        assert!(!hit(r, 6, 3));
        assert!(!hit(r, 2, 4));
    }
}
