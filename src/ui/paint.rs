//! Drawing motion into a terminal buffer.
//!
//! Terminals have no alpha channel, so opacity is faked by blending every
//! cell already drawn in an area toward a backdrop color. Offsets move the
//! resting rect by whole cells.

use ratatui::buffer::Buffer;
use ratatui::layout::{Offset, Rect};
use ratatui::style::Color;

use crate::overlay::MotionVariant;
use crate::theme::blend;

/// Rect where content resting at `rest` is drawn for `motion`, clipped to
/// `bounds`.
#[must_use]
pub fn displaced(rest: Rect, motion: MotionVariant, bounds: Rect) -> Rect {
    let (x, y) = motion.cell_offset();
    rest.offset(Offset { x, y }).intersection(bounds)
}

/// Blend the cells of `area` toward `backdrop` so they look `opacity`
/// opaque.
pub fn fade(buf: &mut Buffer, area: Rect, opacity: f32, backdrop: Color) {
    if opacity >= 1.0 {
        return;
    }
    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.fg = blend(cell.fg, backdrop, opacity);
                cell.bg = blend(cell.bg, backdrop, opacity);
            }
        }
    }
}

/// Darken everything in `area` toward `scrim` by `strength`.
pub fn dim(buf: &mut Buffer, area: Rect, strength: f32, scrim: Color) {
    fade(buf, area, 1.0 - strength.clamp(0.0, 1.0), scrim);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    #[test]
    fn test_displaced_saturates_at_frame_edge() {
        let bounds = Rect::new(0, 0, 20, 10);
        let rest = Rect::new(2, 2, 6, 4);
        let moved = displaced(rest, MotionVariant::new(0.0, -5.0, 0.0), bounds);
        assert_eq!(moved, Rect::new(0, 2, 6, 4));
        assert_eq!(
            displaced(rest, MotionVariant::new(1.0, 0.0, 0.0), bounds),
            rest
        );
    }

    #[test]
    fn test_fade_blends_toward_backdrop() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 2, 1));
        let area = buf.area;
        buf.set_style(
            area,
            Style::default()
                .fg(Color::Rgb(200, 200, 200))
                .bg(Color::Rgb(100, 100, 100)),
        );
        fade(&mut buf, Rect::new(0, 0, 1, 1), 0.0, Color::Rgb(0, 0, 0));

        assert_eq!(buf[(0, 0)].fg, Color::Rgb(0, 0, 0));
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(0, 0, 0));
        assert_eq!(buf[(1, 0)].fg, Color::Rgb(200, 200, 200));
    }

    #[test]
    fn test_full_opacity_leaves_cells_alone() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 1, 1));
        let area = buf.area;
        buf.set_style(area, Style::default().fg(Color::Rgb(1, 2, 3)));
        fade(&mut buf, area, 1.0, Color::Rgb(0, 0, 0));
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(1, 2, 3));
    }
}
