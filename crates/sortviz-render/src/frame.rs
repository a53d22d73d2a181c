#![forbid(unsafe_code)]

//! Frame = Buffer + metadata for a render pass.

use sortviz_core::geometry::Rect;

use crate::buffer::Buffer;

/// The surface passed to `Model::view()`.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The cell grid for this render pass.
    pub buffer: Buffer,

    /// Whether the cursor should be visible after presenting.
    pub cursor_visible: bool,
}

impl Frame {
    /// Create a new frame with the given dimensions and a hidden cursor.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            cursor_visible: false,
        }
    }

    /// Frame width in cells.
    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    /// Frame height in cells.
    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// Get the bounding rectangle of the frame.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }
}

impl Default for Frame {
    /// Create a 1x1 frame (minimum size).
    fn default() -> Self {
        Self::new(1, 1)
    }
}
