#![forbid(unsafe_code)]

//! Color palette and named styles for the visualizer.

use sortviz_render::cell::{PackedRgba, Style, StyleFlags};

/// Background colors.
pub mod bg {
    use super::*;

    pub const BASE: PackedRgba = PackedRgba::rgb(25, 25, 45);
    pub const SURFACE: PackedRgba = PackedRgba::rgb(35, 35, 60);
    pub const OVERLAY: PackedRgba = PackedRgba::rgb(45, 45, 75);
}

/// Foreground / text colors.
pub mod fg {
    use super::*;

    pub const PRIMARY: PackedRgba = PackedRgba::rgb(220, 220, 240);
    pub const SECONDARY: PackedRgba = PackedRgba::rgb(180, 180, 210);
    pub const MUTED: PackedRgba = PackedRgba::rgb(120, 120, 150);
    pub const DISABLED: PackedRgba = PackedRgba::rgb(80, 80, 100);
}

/// Accent / semantic colors.
pub mod accent {
    use super::*;

    pub const BAR: PackedRgba = PackedRgba::rgb(160, 32, 240);
    pub const KEY: PackedRgba = PackedRgba::rgb(130, 170, 255);
    pub const RUNNING: PackedRgba = PackedRgba::rgb(255, 200, 80);
    pub const DONE: PackedRgba = PackedRgba::rgb(80, 220, 140);
}

pub fn title() -> Style {
    Style::new()
        .fg(fg::PRIMARY)
        .bg(bg::SURFACE)
        .flags(StyleFlags::BOLD)
}

pub fn body() -> Style {
    Style::new().fg(fg::PRIMARY).bg(bg::BASE)
}

/// Filled bar cells.
pub fn bar() -> Style {
    Style::new().fg(accent::BAR).bg(bg::BASE)
}

/// Key label of an enabled control.
pub fn control_key() -> Style {
    Style::new()
        .fg(accent::KEY)
        .bg(bg::BASE)
        .flags(StyleFlags::BOLD)
}

/// Label of an enabled control.
pub fn control_label() -> Style {
    Style::new().fg(fg::SECONDARY).bg(bg::BASE)
}

/// A control that is ignored while a sort runs.
pub fn control_disabled() -> Style {
    Style::new()
        .fg(fg::DISABLED)
        .bg(bg::BASE)
        .flags(StyleFlags::DIM)
}

pub fn status_bar() -> Style {
    Style::new().fg(fg::MUTED).bg(bg::SURFACE)
}

pub fn status_running() -> Style {
    Style::new()
        .fg(accent::RUNNING)
        .bg(bg::SURFACE)
        .flags(StyleFlags::BOLD)
}

pub fn status_idle() -> Style {
    Style::new()
        .fg(accent::DONE)
        .bg(bg::SURFACE)
        .flags(StyleFlags::BOLD)
}

pub fn help_overlay() -> Style {
    Style::new().fg(fg::PRIMARY).bg(bg::OVERLAY)
}
