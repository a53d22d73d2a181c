#![forbid(unsafe_code)]

//! sortviz Runtime
//!
//! The runtime ties the input layer (`sortviz-core`) and the render kernel
//! (`sortviz-render`) into an application loop.
//!
//! # Key Components
//!
//! - [`Program`] - Bubbletea/Elm-style runtime for terminal applications
//! - [`Model`] - Trait for application state and behavior
//! - [`Cmd`] - Commands for side effects, including one-shot ticks
//! - [`ProgramSimulator`] - Deterministic, terminal-free driver for tests

pub mod program;
pub mod simulator;

pub use program::{Cmd, Model, Program, ProgramConfig};
pub use simulator::{CmdRecord, ProgramSimulator};
