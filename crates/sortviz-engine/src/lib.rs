#![forbid(unsafe_code)]

//! Stepwise sorting engine.
//!
//! # Role in sortviz
//! `sortviz-engine` owns everything that is not terminal plumbing: the bar
//! model, the canvas the bars live on, the four sorting algorithms expressed
//! as resumable state machines, and the scheduler that advances at most one
//! of them per tick.
//!
//! # Primary responsibilities
//! - **BarModel**: values and their canvas handles, kept as one `Vec<Bar>`.
//! - **Canvas**: the retained-mode drawing contract, plus [`RetainedCanvas`].
//! - **SortProcess**: one observable mutation per [`SortProcess::step`].
//! - **Scheduler**: mutual exclusion, step counting, tick delays.
//! - **Session**: one self-contained visualizer context (no globals).
//!
//! # How it fits in the system
//! The demo's `Model` owns a [`Session`]; key presses call
//! [`Session::start`] / [`Session::shuffle`], and each runtime tick calls
//! [`Session::tick`], whose returned delay arms the next tick.

pub mod bars;
pub mod canvas;
pub mod scheduler;
pub mod session;
pub mod sort;

pub use bars::{Bar, BarModel, SlotLayout, Value};
pub use canvas::{Canvas, Extents, Handle, RetainedCanvas};
pub use scheduler::{Scheduler, SchedulerState, Speed, StartOutcome, TickOutcome};
pub use session::{Session, SessionConfig, ShuffleOutcome};
pub use sort::{Algorithm, SortProcess, Step};
