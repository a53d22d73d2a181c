#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, frames, and ANSI presentation.
//!
//! # Role in sortviz
//! `sortviz-runtime` calls the model's `view()` to paint into a [`Frame`].
//! The frame's [`Buffer`] is compared against the previously presented one
//! and only the changed cells are written by the [`Presenter`].
//!
//! [`Frame`]: frame::Frame
//! [`Buffer`]: buffer::Buffer
//! [`Presenter`]: presenter::Presenter

pub mod buffer;
pub mod cell;
pub mod frame;
pub mod presenter;
