#![forbid(unsafe_code)]

//! A fixed-size 2D grid of cells.

use sortviz_core::geometry::Rect;

use crate::cell::{Cell, Style};

/// Row-major cell grid.
///
/// Writes outside the grid are clipped silently, so painting code never has
/// to bounds-check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a buffer filled with empty cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width as usize * height as usize],
        }
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer area.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Get the cell at a position.
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Set the cell at a position (clipped).
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Fill a rectangle with a character and style.
    pub fn fill(&mut self, area: Rect, ch: char, style: Style) {
        let cell = Cell::styled(ch, style);
        for y in area.y..area.bottom().min(self.height) {
            for x in area.x..area.right().min(self.width) {
                self.set(x, y, cell);
            }
        }
    }

    /// Write a string starting at `(x, y)`, stopping at `max_x` (exclusive).
    ///
    /// Returns the column after the last written character. Every `char` takes
    /// one column; callers only pass single-width text.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        let limit = max_x.min(self.width);
        let mut col = x;
        for ch in text.chars() {
            if col >= limit {
                break;
            }
            self.set(col, y, Cell::styled(ch, style));
            col += 1;
        }
        col
    }

    /// Read back a row as a string (test and debugging aid).
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y).map(|c| c.ch))
            .collect()
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        let width = self.width.max(1) as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i % width) as u16, (i / width) as u16, cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::PackedRgba;

    #[test]
    fn set_and_get_clip_out_of_bounds() {
        let mut buf = Buffer::new(4, 2);
        buf.set(3, 1, Cell::styled('z', Style::new()));
        buf.set(4, 1, Cell::styled('!', Style::new()));
        assert_eq!(buf.get(3, 1).map(|c| c.ch), Some('z'));
        assert!(buf.get(4, 1).is_none());
    }

    #[test]
    fn put_str_stops_at_limit() {
        let mut buf = Buffer::new(10, 1);
        let end = buf.put_str(2, 0, "sorting", Style::new(), 6);
        assert_eq!(end, 6);
        assert_eq!(buf.row_text(0), "  sort    ");
    }

    #[test]
    fn fill_respects_area() {
        let mut buf = Buffer::new(5, 3);
        let style = Style::new().fg(PackedRgba::WHITE);
        buf.fill(Rect::new(1, 1, 3, 5), '#', style);
        assert_eq!(buf.row_text(0), "     ");
        assert_eq!(buf.row_text(1), " ### ");
        assert_eq!(buf.row_text(2), " ### ");
        assert_eq!(buf.get(2, 2).map(|c| c.fg), Some(PackedRgba::WHITE));
    }

    #[test]
    fn iter_reports_coordinates() {
        let mut buf = Buffer::new(3, 2);
        buf.set(2, 1, Cell::styled('q', Style::new()));
        let found: Vec<_> = buf.iter().filter(|(_, _, c)| c.ch == 'q').collect();
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].0, found[0].1), (2, 1));
    }

    #[test]
    fn clear_resets_cells() {
        let mut buf = Buffer::new(2, 2);
        buf.fill(buf.bounds(), 'x', Style::new());
        buf.clear();
        assert!(buf.iter().all(|(_, _, c)| *c == Cell::EMPTY));
    }
}
