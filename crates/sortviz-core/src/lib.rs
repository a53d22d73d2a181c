#![forbid(unsafe_code)]

//! Core: terminal lifecycle, geometry, and canonical input events.
//!
//! # Role in sortviz
//! `sortviz-core` is the input layer. It owns terminal session setup and
//! teardown, and the normalized event types that the runtime feeds into the
//! application model.
//!
//! # Primary responsibilities
//! - **TerminalSession**: RAII lifecycle for raw mode, alt-screen, and cleanup.
//! - **Event**: canonical input events (keys, resize, timer ticks).
//! - **Rect**: cell-space rectangles used for layout and painting.

pub mod event;
pub mod geometry;
pub mod terminal_session;
