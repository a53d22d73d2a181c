#![forbid(unsafe_code)]

//! Paints the retained canvas into a cell buffer.
//!
//! The canvas speaks in its own units; a viewport (an [`Extents`] in canvas
//! space) is stretched over the target area. Horizontally a bar covers at
//! least one column. Vertically heights are quantized to eighths of a row
//! using the lower block elements.

use sortviz_core::geometry::Rect;
use sortviz_engine::{Extents, RetainedCanvas, SlotLayout, Value};
use sortviz_render::buffer::Buffer;
use sortviz_render::cell::{Cell, Style};

/// Partial blocks indexed by eighths (index 0 is unused).
const PARTIAL: [char; 8] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇'];
const FULL: char = '█';

/// Canvas region covering `slots` bars of up to `max_value` in `layout`.
pub fn viewport(layout: SlotLayout, slots: usize, max_value: Value) -> Extents {
    Extents::new(
        layout.left_start,
        layout.baseline - max_value as i32,
        layout.slot_left(slots),
        layout.baseline,
    )
}

/// Map a canvas x coordinate onto a column of `area`.
fn column(x: i32, viewport: Extents, area: Rect) -> u16 {
    let offset = i64::from(x - viewport.left).max(0);
    let col = offset * i64::from(area.width) / i64::from(viewport.width().max(1));
    area.x + col.min(i64::from(area.width)) as u16
}

/// Split a bar height into whole rows and a remainder in eighths.
fn rows_and_eighths(height: i32, viewport: Extents, rows: u16) -> (u16, u8) {
    if height <= 0 || rows == 0 {
        return (0, 0);
    }
    let span = i64::from(viewport.height().max(1));
    let eighths = (i64::from(height) * i64::from(rows) * 8 + span / 2) / span;
    let eighths = eighths.clamp(1, i64::from(rows) * 8);
    ((eighths / 8) as u16, (eighths % 8) as u8)
}

/// Paint every canvas item inside `viewport` onto `area`, bottoms aligned.
pub fn paint_bars(
    buffer: &mut Buffer,
    area: Rect,
    canvas: &RetainedCanvas,
    viewport: Extents,
    style: Style,
) {
    if area.is_empty() || viewport.width() <= 0 {
        return;
    }

    for (_, extents) in canvas.items() {
        let x0 = column(extents.left, viewport, area);
        let x1 = column(extents.right, viewport, area)
            .max(x0 + 1)
            .min(area.right());
        let (full, rem) = rows_and_eighths(extents.height(), viewport, area.height);

        for x in x0..x1 {
            for r in 0..full {
                buffer.set(x, area.bottom() - 1 - r, Cell::styled(FULL, style));
            }
            if rem > 0 && full < area.height {
                buffer.set(
                    x,
                    area.bottom() - 1 - full,
                    Cell::styled(PARTIAL[rem as usize], style),
                );
            }
        }
    }
}
