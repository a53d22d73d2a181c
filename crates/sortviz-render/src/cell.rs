#![forbid(unsafe_code)]

//! Cells and colors.

use bitflags::bitflags;

/// A 32-bit RGBA color, packed as `0xRRGGBBAA`.
///
/// Alpha 0 means "terminal default" when presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (terminal default color).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Whether this color defers to the terminal default.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a() == 0
    }
}

bitflags! {
    /// Text attributes applied to a cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD = 0b0001;
        const DIM  = 0b0010;
        const REVERSE = 0b0100;
    }
}

/// Foreground, background, and attributes, applied together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: PackedRgba,
    pub bg: PackedRgba,
    pub flags: StyleFlags,
}

impl Style {
    /// An unstyled style (terminal defaults).
    pub const fn new() -> Self {
        Self {
            fg: PackedRgba::TRANSPARENT,
            bg: PackedRgba::TRANSPARENT,
            flags: StyleFlags::empty(),
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: PackedRgba) -> Self {
        self.fg = color;
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: PackedRgba) -> Self {
        self.bg = color;
        self
    }

    /// Add attribute flags.
    #[must_use]
    pub const fn flags(mut self, flags: StyleFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }
}

/// One terminal cell: a single-width character plus its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Character content.
    pub ch: char,
    /// Foreground color.
    pub fg: PackedRgba,
    /// Background color.
    pub bg: PackedRgba,
    /// Style flags.
    pub flags: StyleFlags,
}

impl Cell {
    /// A blank cell with default colors.
    pub const EMPTY: Self = Self {
        ch: ' ',
        fg: PackedRgba::TRANSPARENT,
        bg: PackedRgba::TRANSPARENT,
        flags: StyleFlags::empty(),
    };

    /// Create a cell from a character and a style.
    #[inline]
    pub const fn styled(ch: char, style: Style) -> Self {
        Self {
            ch,
            fg: style.fg,
            bg: style.bg,
            flags: style.flags,
        }
    }

    /// The style portion of this cell.
    #[inline]
    pub const fn style(&self) -> Style {
        Style {
            fg: self.fg,
            bg: self.bg,
            flags: self.flags,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_channels_round_trip() {
        let c = PackedRgba::rgb(128, 0, 200);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (128, 0, 200, 255));
        assert!(!c.is_transparent());
        assert!(PackedRgba::TRANSPARENT.is_transparent());
    }

    #[test]
    fn style_builder_accumulates_flags() {
        let style = Style::new()
            .fg(PackedRgba::WHITE)
            .flags(StyleFlags::BOLD)
            .flags(StyleFlags::DIM);
        assert_eq!(style.fg, PackedRgba::WHITE);
        assert!(style.flags.contains(StyleFlags::BOLD | StyleFlags::DIM));
    }

    #[test]
    fn styled_cell_exposes_style() {
        let style = Style::new().bg(PackedRgba::BLACK);
        let cell = Cell::styled('x', style);
        assert_eq!(cell.ch, 'x');
        assert_eq!(cell.style(), style);
        assert_eq!(Cell::default(), Cell::EMPTY);
    }
}
