#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! RAII management of raw mode and the alternate screen that restores the
//! terminal even on panic.
//!
//! # Lifecycle Guarantees
//!
//! 1. **Every mode change is tracked** - raw mode and the alternate screen
//!    each have a flag set only after the mode was enabled.
//! 2. **Drop restores previous state** - enabled modes are disabled in
//!    reverse order when the [`TerminalSession`] is dropped.
//! 3. **Panic safety** - a panic hook runs a best-effort cleanup before the
//!    previous hook prints the panic message.
//!
//! # Cleanup Order
//!
//! 1. Show cursor (always)
//! 2. Leave alternate screen (if enabled)
//! 3. Exit raw mode (always)
//! 4. Flush stdout
//!
//! # Usage
//!
//! ```no_run
//! use sortviz_core::terminal_session::{SessionOptions, TerminalSession};
//!
//! let session = TerminalSession::new(SessionOptions {
//!     alternate_screen: true,
//! })?;
//! // ... poll and render ...
//! drop(session); // terminal restored
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Write};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::event::Event;

static TERMINAL_SESSION_ACTIVE: AtomicBool = AtomicBool::new(false);

#[derive(Debug)]
struct SessionLock;

impl SessionLock {
    fn acquire() -> io::Result<Self> {
        if TERMINAL_SESSION_ACTIVE
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(io::Error::other("TerminalSession already active"));
        }
        Ok(Self)
    }
}

impl Drop for SessionLock {
    fn drop(&mut self) {
        TERMINAL_SESSION_ACTIVE.store(false, Ordering::SeqCst);
    }
}

/// Terminal session configuration options.
///
/// All options default to `false`; raw mode is always entered.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Enable the alternate screen buffer (`CSI ? 1049 h`).
    ///
    /// Leave it `false` to draw on the main screen, keeping the output in
    /// scrollback after exit.
    pub alternate_screen: bool,
}

/// A terminal session that manages raw mode and cleanup.
///
/// # Contract
///
/// - **Exclusive ownership**: only one session may exist per process; a
///   second [`TerminalSession::new`] fails until the first is dropped.
/// - **Cleanup guarantee**: when dropped (normally or via panic), enabled
///   modes are disabled and the terminal is restored.
#[derive(Debug)]
pub struct TerminalSession {
    session_lock: Option<SessionLock>,
    options: SessionOptions,
    alternate_screen_enabled: bool,
    raw_mode_enabled: bool,
}

impl TerminalSession {
    /// Enter raw mode and optionally enable additional features.
    ///
    /// # Errors
    ///
    /// Returns an error if another session is active or raw mode cannot be
    /// enabled.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();

        let session_lock = SessionLock::acquire()?;

        crossterm::terminal::enable_raw_mode()?;
        tracing::info!("terminal raw mode enabled");

        let mut session = Self {
            session_lock: Some(session_lock),
            options: options.clone(),
            alternate_screen_enabled: false,
            raw_mode_enabled: true,
        };

        let mut stdout = io::stdout();

        if options.alternate_screen {
            // Clear explicitly: some terminals show stale alt-screen content.
            crossterm::execute!(
                stdout,
                crossterm::terminal::EnterAlternateScreen,
                crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
                crossterm::cursor::MoveTo(0, 0)
            )?;
            session.alternate_screen_enabled = true;
            tracing::info!("alternate screen enabled (with clear)");
        }

        Ok(session)
    }

    /// Get the current terminal size (columns, rows).
    ///
    /// Never reports less than 2x2 so downstream buffer allocation stays sane.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        let (w, h) = crossterm::terminal::size()?;
        Ok((w.max(2), h.max(2)))
    }

    /// Poll for an event with a timeout.
    ///
    /// Returns `Ok(true)` if an event is available, `Ok(false)` on timeout.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    /// Read the next event (blocking until available).
    ///
    /// Returns `Ok(None)` if the event has no canonical representation.
    pub fn read_event(&self) -> io::Result<Option<Event>> {
        let event = crossterm::event::read()?;
        Ok(Event::from_crossterm(event))
    }

    /// Hide the cursor.
    pub fn hide_cursor(&self) -> io::Result<()> {
        crossterm::execute!(io::stdout(), crossterm::cursor::Hide)
    }

    /// Show the cursor.
    pub fn show_cursor(&self) -> io::Result<()> {
        crossterm::execute!(io::stdout(), crossterm::cursor::Show)
    }

    /// Get the session options.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();

        let _ = crossterm::execute!(stdout, crossterm::cursor::Show);

        if self.alternate_screen_enabled {
            let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
            self.alternate_screen_enabled = false;
            tracing::info!("alternate screen disabled");
        }

        if self.raw_mode_enabled {
            let _ = crossterm::terminal::disable_raw_mode();
            self.raw_mode_enabled = false;
            tracing::info!("terminal raw mode disabled");
        }

        let _ = stdout.flush();

        // Release exclusivity only after terminal state is restored.
        let _ = self.session_lock.take();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

/// Best-effort cleanup for termination paths that skip `Drop`.
///
/// Call this before `std::process::exit` while a session may be active.
pub fn best_effort_cleanup_for_exit() {
    best_effort_cleanup();
}

fn best_effort_cleanup() {
    if !TERMINAL_SESSION_ACTIVE.load(Ordering::SeqCst) {
        return;
    }
    let mut stdout = io::stdout();
    let _ = crossterm::execute!(
        stdout,
        crossterm::cursor::Show,
        crossterm::terminal::LeaveAlternateScreen
    );
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_to_off() {
        let opts = SessionOptions::default();
        assert!(!opts.alternate_screen);
    }

    #[test]
    fn session_lock_is_exclusive() {
        let first = SessionLock::acquire().expect("first lock");
        assert!(SessionLock::acquire().is_err());
        drop(first);
        let again = SessionLock::acquire().expect("lock released on drop");
        drop(again);
    }
}
