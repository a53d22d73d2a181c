#![forbid(unsafe_code)]

//! Bubbletea/Elm-style runtime for terminal applications.
//!
//! The program runtime manages the update/view loop, handling events and
//! rendering frames. It separates state (Model) from rendering (View) and
//! provides a command pattern for side effects.
//!
//! Timers are one-shot: a model that wants to be woken up returns
//! [`Cmd::Tick`] and receives [`Event::Tick`] once the delay has elapsed. To
//! keep ticking it returns another `Cmd::Tick` from that update, so the model
//! decides every delay on its own.
//!
//! # Example
//!
//! ```ignore
//! use sortviz_runtime::program::{Cmd, Model};
//! use sortviz_core::event::Event;
//! use sortviz_render::frame::Frame;
//!
//! struct Blink { on: bool }
//!
//! enum Msg { Toggle, Other }
//!
//! impl From<Event> for Msg {
//!     fn from(event: Event) -> Self {
//!         match event {
//!             Event::Tick => Msg::Toggle,
//!             _ => Msg::Other,
//!         }
//!     }
//! }
//!
//! impl Model for Blink {
//!     type Message = Msg;
//!
//!     fn init(&mut self) -> Cmd<Msg> {
//!         Cmd::tick(Duration::from_millis(500))
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Cmd<Msg> {
//!         match msg {
//!             Msg::Toggle => { self.on = !self.on; Cmd::tick(Duration::from_millis(500)) }
//!             Msg::Other => Cmd::none(),
//!         }
//!     }
//!
//!     fn view(&self, frame: &mut Frame) {}
//! }
//! ```

use std::io::{self, Stdout};
use std::time::Duration;

use sortviz_core::event::Event;
use sortviz_core::terminal_session::{SessionOptions, TerminalSession};
use sortviz_render::frame::Frame;
use sortviz_render::presenter::Presenter;
use web_time::Instant;

/// The Model trait defines application state and behavior.
pub trait Model: Sized {
    /// The message type for this model.
    ///
    /// Must be convertible from terminal events (including [`Event::Tick`]).
    type Message: From<Event> + Send + 'static;

    /// Initialize the model with startup commands.
    ///
    /// Called once when the program starts.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Update the model in response to a message.
    ///
    /// This is the core state transition function. Returns commands
    /// for any side effects that should be executed.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state to a frame.
    fn view(&self, frame: &mut Frame);
}

/// Commands represent side effects to be executed by the runtime.
#[derive(Debug)]
pub enum Cmd<M> {
    /// No operation.
    None,
    /// Quit the application.
    Quit,
    /// Execute multiple commands in parallel.
    Batch(Vec<Cmd<M>>),
    /// Execute commands sequentially.
    Sequence(Vec<Cmd<M>>),
    /// Send a message to the model.
    Msg(M),
    /// Deliver one [`Event::Tick`] after the given delay.
    ///
    /// A newer tick replaces a pending one.
    Tick(Duration),
    /// Emit a log line through `tracing` (the screen belongs to the UI).
    Log(String),
}

impl<M> Cmd<M> {
    /// Create a no-op command.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a quit command.
    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    /// Create a message command.
    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Create a log command.
    #[inline]
    pub fn log(msg: impl Into<String>) -> Self {
        Self::Log(msg.into())
    }

    /// Create a batch of parallel commands.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.remove(0),
            _ => Self::Batch(cmds),
        }
    }

    /// Create a sequence of commands.
    pub fn sequence(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.remove(0),
            _ => Self::Sequence(cmds),
        }
    }

    /// Create a tick command.
    #[inline]
    pub fn tick(duration: Duration) -> Self {
        Self::Tick(duration)
    }

    /// Whether this is the no-op command.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl<M> Default for Cmd<M> {
    fn default() -> Self {
        Self::None
    }
}

/// Configuration for the program runtime.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Use the alternate screen buffer.
    pub alternate_screen: bool,
    /// Input poll timeout when no tick is pending.
    pub poll_timeout: Duration,
    /// Quit automatically after this long (smoke tests, recordings).
    pub exit_after: Option<Duration>,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            poll_timeout: Duration::from_millis(100),
            exit_after: None,
        }
    }
}

impl ProgramConfig {
    /// Create config for fullscreen applications.
    pub fn fullscreen() -> Self {
        Self::default()
    }

    /// Quit automatically after `after` has elapsed.
    #[must_use]
    pub fn with_exit_after(mut self, after: Duration) -> Self {
        self.exit_after = Some(after);
        self
    }
}

/// Deadline of the pending one-shot tick.
///
/// Arming while a tick is pending replaces it.
#[derive(Debug, Default, Clone, Copy)]
struct TickTimer {
    deadline: Option<Instant>,
}

impl TickTimer {
    fn arm(&mut self, now: Instant, delay: Duration) {
        tracing::debug!(
            delay_ms = delay.as_millis() as u64,
            replaced = self.deadline.is_some(),
            "tick armed"
        );
        self.deadline = Some(now + delay);
    }

    /// Time left before the tick is due, if one is pending.
    fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Consume the pending tick if it is due at `now`.
    fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// The program runtime that manages the update/view loop.
pub struct Program<M: Model> {
    /// The application model.
    model: M,
    /// Terminal lifecycle guard (restores the terminal on drop).
    session: TerminalSession,
    /// Diffing ANSI writer.
    presenter: Presenter<Stdout>,
    /// Whether the program is running.
    running: bool,
    /// The pending one-shot tick.
    tick: TickTimer,
    /// Whether the UI needs to be redrawn.
    dirty: bool,
    /// Current terminal size.
    size: (u16, u16),
    config: ProgramConfig,
    started: Instant,
}

impl<M: Model> Program<M> {
    /// Create a new program with default configuration.
    pub fn new(model: M) -> io::Result<Self> {
        Self::with_config(model, ProgramConfig::default())
    }

    /// Create a new program with the specified configuration.
    ///
    /// Enters raw mode immediately; the terminal is restored when the
    /// program is dropped.
    pub fn with_config(model: M, config: ProgramConfig) -> io::Result<Self> {
        let session = TerminalSession::new(SessionOptions {
            alternate_screen: config.alternate_screen,
        })?;
        let size = session.size()?;

        Ok(Self {
            model,
            session,
            presenter: Presenter::new(io::stdout()),
            running: true,
            tick: TickTimer::default(),
            dirty: true,
            size,
            config,
            started: Instant::now(),
        })
    }

    /// Run the main event loop.
    ///
    /// 1. Initialization
    /// 2. Event polling (bounded by the pending tick) and message dispatch
    /// 3. Frame rendering when something changed
    pub fn run(&mut self) -> io::Result<()> {
        let cmd = self.model.init();
        self.execute_cmd(cmd);

        self.session.hide_cursor()?;
        self.render_frame()?;

        while self.running {
            if self.exit_deadline_passed() {
                tracing::info!("exit-after deadline reached");
                break;
            }

            let timeout = self.effective_timeout();
            if self.session.poll_event(timeout)?
                && let Some(event) = self.session.read_event()?
            {
                self.handle_event(event);
            }

            if self.tick.take_due(Instant::now()) {
                self.dispatch(Event::Tick);
            }

            if self.dirty {
                self.render_frame()?;
            }
        }

        self.session.show_cursor()?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Resize { width, height } = event {
            self.size = (width.max(1), height.max(1));
            self.presenter.invalidate();
        }
        self.dispatch(event);
    }

    fn dispatch(&mut self, event: Event) {
        let cmd = self.model.update(M::Message::from(event));
        self.dirty = true;
        self.execute_cmd(cmd);
    }

    /// Execute a command.
    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.running = false,
            Cmd::Msg(m) => {
                let cmd = self.model.update(m);
                self.dirty = true;
                self.execute_cmd(cmd);
            }
            Cmd::Batch(cmds) | Cmd::Sequence(cmds) => {
                for c in cmds {
                    self.execute_cmd(c);
                }
            }
            Cmd::Tick(duration) => self.tick.arm(Instant::now(), duration),
            Cmd::Log(text) => {
                tracing::info!(target: "sortviz::log", "{text}");
            }
        }
    }

    fn render_frame(&mut self) -> io::Result<()> {
        let (width, height) = self.size;
        let mut frame = Frame::new(width, height);
        self.model.view(&mut frame);
        self.presenter.present(&frame.buffer)?;
        self.dirty = false;
        Ok(())
    }

    /// Poll timeout: never sleep past the pending tick or the exit deadline.
    fn effective_timeout(&self) -> Duration {
        let now = Instant::now();
        let mut timeout = self.config.poll_timeout;
        if let Some(remaining) = self.tick.remaining(now) {
            timeout = timeout.min(remaining);
        }
        if let Some(limit) = self.config.exit_after {
            timeout = timeout.min(limit.saturating_sub(self.started.elapsed()));
        }
        timeout
    }

    fn exit_deadline_passed(&self) -> bool {
        self.config
            .exit_after
            .is_some_and(|limit| self.started.elapsed() >= limit)
    }

    /// Get a reference to the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Check if the program is running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Request a quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Mark the UI as needing redraw.
    pub fn request_redraw(&mut self) {
        self.dirty = true;
    }
}
