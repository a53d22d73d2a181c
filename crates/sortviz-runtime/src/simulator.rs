#![forbid(unsafe_code)]

//! Deterministic program simulator for testing.
//!
//! `ProgramSimulator` runs a [`Model`] without a real terminal, enabling
//! deterministic snapshot testing, event injection, and frame capture.
//!
//! Time does not pass on its own: a pending [`Cmd::Tick`] is recorded and only
//! fires when the test calls [`ProgramSimulator::fire_tick`], so every tick
//! is an explicit, reproducible step.
//!
//! # Example
//!
//! ```ignore
//! let mut sim = ProgramSimulator::new(MyModel::default());
//! sim.init();
//! sim.inject_event(Event::Key(KeyEvent::new(KeyCode::Char('m'))));
//! while sim.fire_tick() {}
//! let buf = sim.capture_frame(80, 24);
//! ```

use std::time::Duration;

use sortviz_core::event::Event;
use sortviz_render::buffer::Buffer;
use sortviz_render::frame::Frame;

use crate::program::{Cmd, Model};

/// Record of a command that was executed during simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdRecord {
    /// No-op command.
    None,
    /// Quit command.
    Quit,
    /// Message sent to model (not stored, just noted).
    Msg,
    /// Batch of commands.
    Batch(usize),
    /// Sequence of commands.
    Sequence(usize),
    /// Tick scheduled with this delay.
    Tick(Duration),
    /// Log message emitted.
    Log(String),
}

/// Deterministic simulator for [`Model`] testing.
pub struct ProgramSimulator<M: Model> {
    /// The application model.
    model: M,
    /// Captured frame buffers.
    frames: Vec<Buffer>,
    /// Record of all executed commands.
    command_log: Vec<CmdRecord>,
    /// Whether the simulated program is still running.
    running: bool,
    /// Delay of the pending tick, if any.
    pending_tick: Option<Duration>,
    /// Ticks delivered so far.
    ticks_fired: u64,
    /// Log messages emitted via `Cmd::Log`.
    logs: Vec<String>,
}

impl<M: Model> ProgramSimulator<M> {
    /// Create a new simulator with the given model.
    ///
    /// The model is not initialized until [`init`](Self::init) is called.
    pub fn new(model: M) -> Self {
        Self {
            model,
            frames: Vec::new(),
            command_log: Vec::new(),
            running: true,
            pending_tick: None,
            ticks_fired: 0,
            logs: Vec::new(),
        }
    }

    /// Initialize the model by calling `Model::init()` and executing returned commands.
    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
    }

    /// Inject terminal events into the model.
    ///
    /// Each event is converted to the model's message type and passed to `update`.
    /// Stops early once the model quits.
    pub fn inject_events(&mut self, events: &[Event]) {
        for event in events {
            if !self.running {
                break;
            }
            let msg = M::Message::from(event.clone());
            let cmd = self.model.update(msg);
            self.execute_cmd(cmd);
        }
    }

    /// Inject a single terminal event into the model.
    pub fn inject_event(&mut self, event: Event) {
        self.inject_events(&[event]);
    }

    /// Send a specific message to the model.
    pub fn send(&mut self, msg: M::Message) {
        if !self.running {
            return;
        }
        let cmd = self.model.update(msg);
        self.execute_cmd(cmd);
    }

    /// Deliver the pending tick, if any.
    ///
    /// Returns `false` when no tick was pending or the program has quit.
    pub fn fire_tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        match self.pending_tick.take() {
            Some(_) => {
                self.ticks_fired += 1;
                let cmd = self.model.update(M::Message::from(Event::Tick));
                self.execute_cmd(cmd);
                true
            }
            None => false,
        }
    }

    /// Fire ticks until none is pending or `max` ticks were delivered.
    ///
    /// Returns the number of ticks delivered.
    pub fn run_ticks(&mut self, max: usize) -> usize {
        let mut fired = 0;
        while fired < max && self.fire_tick() {
            fired += 1;
        }
        fired
    }

    /// Delay of the pending tick, if one is scheduled.
    pub fn pending_tick(&self) -> Option<Duration> {
        self.pending_tick
    }

    /// Total ticks delivered so far.
    pub fn ticks_fired(&self) -> u64 {
        self.ticks_fired
    }

    /// Capture the current frame at the given dimensions.
    ///
    /// Calls `Model::view()` and stores the resulting buffer.
    pub fn capture_frame(&mut self, width: u16, height: u16) -> &Buffer {
        let mut frame = Frame::new(width, height);
        self.model.view(&mut frame);
        self.frames.push(frame.buffer);
        &self.frames[self.frames.len() - 1]
    }

    /// Get all captured frame buffers.
    pub fn frames(&self) -> &[Buffer] {
        &self.frames
    }

    /// Get the most recently captured frame buffer, if any.
    pub fn last_frame(&self) -> Option<&Buffer> {
        self.frames.last()
    }

    /// Get a reference to the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Check if the program is still running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get all log messages emitted via `Cmd::Log`.
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Get the command execution log.
    pub fn command_log(&self) -> &[CmdRecord] {
        &self.command_log
    }

    /// Execute a command without IO.
    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {
                self.command_log.push(CmdRecord::None);
            }
            Cmd::Quit => {
                self.running = false;
                self.command_log.push(CmdRecord::Quit);
            }
            Cmd::Msg(m) => {
                self.command_log.push(CmdRecord::Msg);
                let cmd = self.model.update(m);
                self.execute_cmd(cmd);
            }
            Cmd::Batch(cmds) => {
                self.command_log.push(CmdRecord::Batch(cmds.len()));
                for c in cmds {
                    self.execute_cmd(c);
                    if !self.running {
                        break;
                    }
                }
            }
            Cmd::Sequence(cmds) => {
                self.command_log.push(CmdRecord::Sequence(cmds.len()));
                for c in cmds {
                    self.execute_cmd(c);
                    if !self.running {
                        break;
                    }
                }
            }
            Cmd::Tick(duration) => {
                self.pending_tick = Some(duration);
                self.command_log.push(CmdRecord::Tick(duration));
            }
            Cmd::Log(text) => {
                self.command_log.push(CmdRecord::Log(text.clone()));
                self.logs.push(text);
            }
        }
    }
}
