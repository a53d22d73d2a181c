#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Every event the runtime hands to a model goes through these types, so
//! models never see crossterm directly and tests can build events by hand.
//!
//! # Design Notes
//!
//! - `KeyEventKind` defaults to `Press` when the terminal cannot tell
//! - `Modifiers` use bitflags for easy combination
//! - `Tick` is synthesized by the runtime, never read from the terminal

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// Terminal was resized.
    Resize {
        /// New terminal width in columns.
        width: u16,
        /// New terminal height in rows.
        height: u16,
    },

    /// A scheduled tick came due.
    ///
    /// Delivered once per `Cmd::Tick` the model returned.
    Tick,
}

impl Event {
    /// Convert a crossterm event into a canonical event.
    ///
    /// Returns `None` for events sortviz has no use for (mouse, paste, focus) and
    /// for key codes outside [`KeyCode`].
    #[must_use]
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        use crossterm::event as ct;

        match event {
            ct::Event::Key(key) => KeyEvent::from_crossterm(key).map(Self::Key),
            ct::Event::Resize(width, height) => Some(Self::Resize { width, height }),
            _ => None,
        }
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Whether this event is a press or an auto-repeat (not a release).
    #[must_use]
    pub const fn is_press(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }

    fn from_crossterm(key: crossterm::event::KeyEvent) -> Option<Self> {
        use crossterm::event as ct;

        let code = match key.code {
            ct::KeyCode::Char(c) => KeyCode::Char(c),
            ct::KeyCode::Enter => KeyCode::Enter,
            ct::KeyCode::Esc => KeyCode::Escape,
            ct::KeyCode::Backspace => KeyCode::Backspace,
            ct::KeyCode::Tab => KeyCode::Tab,
            ct::KeyCode::BackTab => KeyCode::BackTab,
            ct::KeyCode::Home => KeyCode::Home,
            ct::KeyCode::End => KeyCode::End,
            ct::KeyCode::PageUp => KeyCode::PageUp,
            ct::KeyCode::PageDown => KeyCode::PageDown,
            ct::KeyCode::Up => KeyCode::Up,
            ct::KeyCode::Down => KeyCode::Down,
            ct::KeyCode::Left => KeyCode::Left,
            ct::KeyCode::Right => KeyCode::Right,
            ct::KeyCode::F(n) => KeyCode::F(n),
            _ => return None,
        };

        let mut modifiers = Modifiers::NONE;
        if key.modifiers.contains(ct::KeyModifiers::SHIFT) {
            modifiers |= Modifiers::SHIFT;
        }
        if key.modifiers.contains(ct::KeyModifiers::ALT) {
            modifiers |= Modifiers::ALT;
        }
        if key.modifiers.contains(ct::KeyModifiers::CONTROL) {
            modifiers |= Modifiers::CTRL;
        }
        if key.modifiers.contains(ct::KeyModifiers::SUPER) {
            modifiers |= Modifiers::SUPER;
        }

        let kind = match key.kind {
            ct::KeyEventKind::Press => KeyEventKind::Press,
            ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
            ct::KeyEventKind::Release => KeyEventKind::Release,
        };

        Some(Self {
            code,
            modifiers,
            kind,
        })
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Backspace key.
    Backspace,
    /// Tab key.
    Tab,
    /// Shift+Tab (back-tab).
    BackTab,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Function key (F1-F24).
    F(u8),
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}
