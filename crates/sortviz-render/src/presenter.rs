#![forbid(unsafe_code)]

//! Presenter: state-tracked ANSI emission.
//!
//! The presenter remembers the last buffer it wrote and emits only the cells
//! that changed since then, tracking cursor position and the active style so
//! redundant escape sequences are skipped.
//!
//! # Design Principles
//!
//! - **State tracking**: skip `MoveTo` when the cursor is already in place and
//!   skip style changes when the style is unchanged
//! - **Single write**: everything is queued into a `BufWriter` and flushed
//!   once per frame
//! - **Full redraw on resize**: a size change clears the screen and repaints

use std::io::{self, BufWriter, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType};

use crate::buffer::Buffer;
use crate::cell::{PackedRgba, Style, StyleFlags};

/// Size of the internal write buffer (64KB).
const BUFFER_CAPACITY: usize = 64 * 1024;

/// Statistics for one presented frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresentStats {
    /// Number of cells written.
    pub cells_changed: usize,
    /// Whether the whole screen was repainted.
    pub full_redraw: bool,
}

/// State-tracked, diffing ANSI presenter.
pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
    /// Last presented buffer (None = screen contents unknown).
    previous: Option<Buffer>,
    /// Current style state (None = unknown/reset).
    current_style: Option<Style>,
    /// Current cursor position. None = unknown.
    cursor: Option<(u16, u16)>,
}

impl<W: Write> Presenter<W> {
    /// Create a presenter writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            previous: None,
            current_style: None,
            cursor: None,
        }
    }

    /// Forget the screen contents so the next frame is fully repainted.
    pub fn invalidate(&mut self) {
        self.previous = None;
        self.current_style = None;
        self.cursor = None;
    }

    /// Present a buffer, writing only the cells that differ from the last one.
    pub fn present(&mut self, buffer: &Buffer) -> io::Result<PresentStats> {
        let full_redraw = self
            .previous
            .as_ref()
            .is_none_or(|prev| prev.width() != buffer.width() || prev.height() != buffer.height());

        if full_redraw {
            queue!(self.writer, SetAttribute(Attribute::Reset), Clear(ClearType::All))?;
            self.current_style = None;
            self.cursor = None;
        }

        let mut cells_changed = 0;
        for (x, y, cell) in buffer.iter() {
            if !full_redraw
                && let Some(prev) = self.previous.as_ref()
                && prev.get(x, y) == Some(cell)
            {
                continue;
            }
            if full_redraw && *cell == crate::cell::Cell::EMPTY {
                // Cleared screen already shows blanks.
                continue;
            }

            if self.cursor != Some((x, y)) {
                queue!(self.writer, MoveTo(x, y))?;
            }
            let style = cell.style();
            if self.current_style != Some(style) {
                self.apply_style(style)?;
            }
            queue!(self.writer, Print(cell.ch))?;
            self.cursor = (x + 1 < buffer.width()).then_some((x + 1, y));
            cells_changed += 1;
        }

        queue!(self.writer, SetAttribute(Attribute::Reset))?;
        self.current_style = None;
        self.writer.flush()?;
        self.previous = Some(buffer.clone());

        tracing::trace!(cells_changed, full_redraw, "frame presented");
        Ok(PresentStats {
            cells_changed,
            full_redraw,
        })
    }

    fn apply_style(&mut self, style: Style) -> io::Result<()> {
        queue!(
            self.writer,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(to_color(style.fg)),
            SetBackgroundColor(to_color(style.bg))
        )?;
        if style.flags.contains(StyleFlags::BOLD) {
            queue!(self.writer, SetAttribute(Attribute::Bold))?;
        }
        if style.flags.contains(StyleFlags::DIM) {
            queue!(self.writer, SetAttribute(Attribute::Dim))?;
        }
        if style.flags.contains(StyleFlags::REVERSE) {
            queue!(self.writer, SetAttribute(Attribute::Reverse))?;
        }
        self.current_style = Some(style);
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

fn to_color(color: PackedRgba) -> Color {
    if color.is_transparent() {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r(),
            g: color.g(),
            b: color.b(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    fn text_buffer(rows: &[&str]) -> Buffer {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u16;
        let mut buf = Buffer::new(width, rows.len() as u16);
        for (y, row) in rows.iter().enumerate() {
            buf.put_str(0, y as u16, row, Style::new(), width);
        }
        buf
    }

    #[test]
    fn first_present_is_full_redraw() {
        let mut presenter = Presenter::new(Vec::new());
        let stats = presenter.present(&text_buffer(&["ab", "c "])).unwrap();
        assert!(stats.full_redraw);
        assert_eq!(stats.cells_changed, 3);
        let out = String::from_utf8(presenter.into_inner().unwrap()).unwrap();
        assert!(out.contains('a'));
        assert!(out.contains('c'));
    }

    #[test]
    fn unchanged_frame_writes_nothing() {
        let mut presenter = Presenter::new(Vec::new());
        let buf = text_buffer(&["hello"]);
        presenter.present(&buf).unwrap();
        let stats = presenter.present(&buf).unwrap();
        assert!(!stats.full_redraw);
        assert_eq!(stats.cells_changed, 0);
    }

    #[test]
    fn single_cell_change_is_one_write() {
        let mut presenter = Presenter::new(Vec::new());
        let mut buf = text_buffer(&["hello"]);
        presenter.present(&buf).unwrap();
        buf.set(4, 0, Cell::styled('!', Style::new()));
        let stats = presenter.present(&buf).unwrap();
        assert_eq!(stats.cells_changed, 1);
    }

    #[test]
    fn resize_forces_full_redraw() {
        let mut presenter = Presenter::new(Vec::new());
        presenter.present(&text_buffer(&["ab"])).unwrap();
        let stats = presenter.present(&text_buffer(&["abc"])).unwrap();
        assert!(stats.full_redraw);
    }

    #[test]
    fn invalidate_forces_full_redraw() {
        let mut presenter = Presenter::new(Vec::new());
        let buf = text_buffer(&["ab"]);
        presenter.present(&buf).unwrap();
        presenter.invalidate();
        assert!(presenter.present(&buf).unwrap().full_redraw);
    }

    #[test]
    fn transparent_maps_to_reset() {
        assert_eq!(to_color(PackedRgba::TRANSPARENT), Color::Reset);
        assert_eq!(
            to_color(PackedRgba::rgb(1, 2, 3)),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
