#![forbid(unsafe_code)]

//! The visualizer model: key handling, the tick chain, and the screen.
//!
//! Starting a sort performs its first step immediately and schedules the
//! next one with [`Cmd::Tick`]; each tick steps once and re-arms with the
//! delay for the current speed, until the sort reports it has finished.
//!
//! # Layout
//!
//! ```text
//! +--------------------------------------------+
//! | title                                      |  1 row
//! |                                            |
//! |   bars (painted from the retained canvas)  |  rest
//! |                                            |
//! | [s] Shuffle [i] Insertion ... [q] Quit     |  1 row
//! | status: state, algorithm, steps, speed ... |  1 row
//! +--------------------------------------------+
//! ```

use sortviz_core::event::{Event, KeyCode, KeyEvent};
use sortviz_core::geometry::{Rect, Sides};
use sortviz_engine::{
    Algorithm, RetainedCanvas, SchedulerState, Session, SessionConfig, ShuffleOutcome,
    StartOutcome, TickOutcome, Value,
};
use sortviz_render::buffer::Buffer;
use sortviz_render::cell::Style;
use sortviz_render::frame::Frame;
use sortviz_runtime::{Cmd, Model};

use crate::bars_view;
use crate::theme;

/// Application message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    Shuffle,
    Start(Algorithm),
    Faster(u32),
    Slower(u32),
    ToggleHelp,
    /// Escape: closes the help overlay, otherwise quits.
    Back,
    Quit,
    Tick,
    Ignore,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Tick => Msg::Tick,
            Event::Key(key) if key.is_press() => Msg::from_key(key),
            _ => Msg::Ignore,
        }
    }
}

impl Msg {
    fn from_key(key: KeyEvent) -> Self {
        if key.ctrl() {
            return if key.is_char('c') {
                Msg::Quit
            } else {
                Msg::Ignore
            };
        }
        match key.code {
            KeyCode::Char('q') => Msg::Quit,
            KeyCode::Escape => Msg::Back,
            KeyCode::Char('s') => Msg::Shuffle,
            KeyCode::Char('i') => Msg::Start(Algorithm::Insertion),
            KeyCode::Char('e') => Msg::Start(Algorithm::Selection),
            KeyCode::Char('b') => Msg::Start(Algorithm::Bubble),
            KeyCode::Char('m') => Msg::Start(Algorithm::Merge),
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => Msg::Faster(1),
            KeyCode::Left | KeyCode::Char('-') => Msg::Slower(1),
            KeyCode::Up => Msg::Faster(10),
            KeyCode::Down => Msg::Slower(10),
            KeyCode::Char('?') => Msg::ToggleHelp,
            _ => Msg::Ignore,
        }
    }
}

/// Keys shown in the control row: `(key, label, only while idle)`.
const CONTROLS: [(&str, &str, bool); 8] = [
    ("s", "Shuffle", true),
    ("i", "Insertion", true),
    ("e", "Selection", true),
    ("b", "Bubble", true),
    ("m", "Merge", true),
    ("←/→", "Speed", false),
    ("?", "Help", false),
    ("q", "Quit", false),
];

const HELP_LINES: [&str; 9] = [
    "s          Shuffle the bars",
    "i          Insertion sort",
    "e          Selection sort",
    "b          Bubble sort",
    "m          Merge sort",
    "Left/Right Speed -1 / +1",
    "Down/Up    Speed -10 / +10",
    "?          Close this help",
    "q / Esc    Quit",
];

/// Top-level application state.
pub struct SortvizApp {
    session: Session<RetainedCanvas>,
    max_value: Value,
    show_help: bool,
    last_finished: Option<(Algorithm, u64)>,
    notice: Option<&'static str>,
}

impl SortvizApp {
    /// Build the app and its session (which performs the first shuffle).
    pub fn new(config: SessionConfig) -> Self {
        let max_value = *config.value_range.start().max(config.value_range.end());
        Self {
            session: Session::new(config, RetainedCanvas::new()),
            max_value,
            show_help: false,
            last_finished: None,
            notice: None,
        }
    }

    /// The underlying session.
    pub fn session(&self) -> &Session<RetainedCanvas> {
        &self.session
    }

    /// Whether the help overlay is open.
    pub fn help_visible(&self) -> bool {
        self.show_help
    }

    /// Most recently finished sort and its step count.
    pub fn last_finished(&self) -> Option<(Algorithm, u64)> {
        self.last_finished
    }

    /// Advance the running sort and decide when to come back.
    fn step(&mut self) -> Cmd<Msg> {
        match self.session.tick() {
            TickOutcome::Stepped { next_tick, .. } => Cmd::tick(next_tick),
            TickOutcome::Finished { algorithm, steps } => {
                self.last_finished = Some((algorithm, steps));
                Cmd::log(format!("{algorithm} finished after {steps} steps"))
            }
            TickOutcome::Idle => Cmd::none(),
        }
    }

    fn start(&mut self, algorithm: Algorithm) -> Cmd<Msg> {
        match self.session.start(algorithm) {
            StartOutcome::Started => {
                self.notice = None;
                self.step()
            }
            StartOutcome::Busy => Cmd::none(),
            StartOutcome::Empty => {
                self.notice = Some("nothing to sort");
                Cmd::none()
            }
        }
    }

    fn shuffle(&mut self) -> Cmd<Msg> {
        if let ShuffleOutcome::Shuffled { .. } = self.session.shuffle() {
            self.last_finished = None;
            self.notice = None;
        }
        Cmd::none()
    }

    fn set_speed(&mut self, faster: bool, by: u32) {
        let speed = self.session.speed();
        let speed = if faster {
            speed.faster(by)
        } else {
            speed.slower(by)
        };
        self.session.set_speed(speed);
    }
}

impl Model for SortvizApp {
    type Message = Msg;

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Tick => self.step(),
            Msg::Start(algorithm) => self.start(algorithm),
            Msg::Shuffle => self.shuffle(),
            Msg::Faster(by) => {
                self.set_speed(true, by);
                Cmd::none()
            }
            Msg::Slower(by) => {
                self.set_speed(false, by);
                Cmd::none()
            }
            Msg::ToggleHelp => {
                self.show_help = !self.show_help;
                Cmd::none()
            }
            Msg::Back if self.show_help => {
                self.show_help = false;
                Cmd::none()
            }
            Msg::Back | Msg::Quit => Cmd::quit(),
            Msg::Ignore => Cmd::none(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.bounds();
        let buffer = &mut frame.buffer;
        buffer.fill(area, ' ', theme::body());

        let (title, rest) = area.split_top(1);
        let (bars_area, rest) = rest.split_bottom(2);
        let (controls, status) = rest.split_top(1);

        self.render_title(buffer, title);
        let bars_area = bars_area.inner(Sides::horizontal(1));
        let bars = self.session.bars();
        bars_view::paint_bars(
            buffer,
            bars_area,
            self.session.canvas(),
            bars_view::viewport(bars.layout(), bars.len(), self.max_value),
            theme::bar(),
        );
        self.render_controls(buffer, controls);
        self.render_status(buffer, status);

        if self.show_help {
            render_help(buffer, area);
        }
    }
}

impl SortvizApp {
    fn render_title(&self, buffer: &mut Buffer, area: Rect) {
        if area.is_empty() {
            return;
        }
        buffer.fill(area, ' ', theme::title());
        buffer.put_str(area.x + 1, area.y, "Sorting Visualizer", theme::title(), area.right());
    }

    fn render_controls(&self, buffer: &mut Buffer, area: Rect) {
        if area.is_empty() {
            return;
        }
        let enabled = self.session.controls_enabled();
        let mut x = area.x + 1;
        for (key, label, gated) in CONTROLS {
            let (key_style, label_style) = if gated && !enabled {
                (theme::control_disabled(), theme::control_disabled())
            } else {
                (theme::control_key(), theme::control_label())
            };
            x = buffer.put_str(x, area.y, "[", label_style, area.right());
            x = buffer.put_str(x, area.y, key, key_style, area.right());
            x = buffer.put_str(x, area.y, "] ", label_style, area.right());
            x = buffer.put_str(x, area.y, label, label_style, area.right());
            x = buffer.put_str(x, area.y, "  ", label_style, area.right());
        }
    }

    fn render_status(&self, buffer: &mut Buffer, area: Rect) {
        if area.is_empty() {
            return;
        }
        buffer.fill(area, ' ', theme::status_bar());

        let (state, state_style, detail) = match self.session.state() {
            SchedulerState::Idle => ("IDLE", theme::status_idle(), String::new()),
            SchedulerState::Running { algorithm, steps } => (
                "RUNNING",
                theme::status_running(),
                format!(" {algorithm} | steps {steps}"),
            ),
        };
        let speed = self.session.speed();
        let mut text = format!(
            "{detail} | speed {} ({}ms) | bars {} | shuffle #{}",
            speed.get(),
            speed.delay().as_millis(),
            self.session.bars().len(),
            self.session.epoch()
        );
        if let Some((algorithm, steps)) = self.last_finished {
            text.push_str(&format!(" | last: {algorithm} in {steps} steps"));
        }
        if let Some(notice) = self.notice {
            text.push_str(&format!(" | {notice}"));
        }

        let x = buffer.put_str(area.x + 1, area.y, state, state_style, area.right());
        buffer.put_str(x, area.y, &text, theme::status_bar(), area.right());
    }
}

fn render_help(buffer: &mut Buffer, area: Rect) {
    let widest = HELP_LINES
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let width = widest as u16 + 4;
    let height = HELP_LINES.len() as u16 + 4;
    let overlay = area.centered(width, height);
    if overlay.is_empty() {
        return;
    }
    let style: Style = theme::help_overlay();
    buffer.fill(overlay, ' ', style);
    buffer.put_str(overlay.x + 2, overlay.y + 1, "Help", theme::title(), overlay.right());

    let inner = overlay.inner(Sides::all(2));
    for (row, line) in HELP_LINES.iter().enumerate() {
        let y = inner.y + 1 + row as u16;
        if y >= overlay.bottom() {
            break;
        }
        buffer.put_str(inner.x, y, line, style, inner.right());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortviz_core::event::Modifiers;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    fn app() -> SortvizApp {
        SortvizApp::new(SessionConfig {
            bar_count: 10,
            seed: Some(3),
            ..SessionConfig::default()
        })
    }

    #[test]
    fn keys_map_to_messages() {
        assert_eq!(Msg::from(key(KeyCode::Char('m'))), Msg::Start(Algorithm::Merge));
        assert_eq!(Msg::from(key(KeyCode::Char('e'))), Msg::Start(Algorithm::Selection));
        assert_eq!(Msg::from(key(KeyCode::Up)), Msg::Faster(10));
        assert_eq!(Msg::from(key(KeyCode::Left)), Msg::Slower(1));
        assert_eq!(Msg::from(key(KeyCode::Escape)), Msg::Back);
        assert_eq!(Msg::from(Event::Tick), Msg::Tick);
        assert_eq!(
            Msg::from(Event::Resize {
                width: 80,
                height: 24
            }),
            Msg::Ignore
        );
    }

    #[test]
    fn ctrl_c_quits_and_other_ctrl_keys_are_ignored() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL);
        assert_eq!(Msg::from(Event::Key(ctrl_c)), Msg::Quit);
        let ctrl_s = KeyEvent::new(KeyCode::Char('s')).with_modifiers(Modifiers::CTRL);
        assert_eq!(Msg::from(Event::Key(ctrl_s)), Msg::Ignore);
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent::new(KeyCode::Char('s'))
            .with_kind(sortviz_core::event::KeyEventKind::Release);
        assert_eq!(Msg::from(Event::Key(release)), Msg::Ignore);
    }

    #[test]
    fn start_steps_immediately_and_arms_tick() {
        let mut app = app();
        let cmd = app.update(Msg::Start(Algorithm::Insertion));
        assert!(matches!(cmd, Cmd::Tick(d) if d == app.session().speed().delay()));
        assert!(matches!(
            app.session().state(),
            SchedulerState::Running { steps: 1, .. }
        ));
    }

    #[test]
    fn escape_closes_help_before_quitting() {
        let mut app = app();
        app.update(Msg::ToggleHelp);
        assert!(app.help_visible());
        assert!(matches!(app.update(Msg::Back), Cmd::None));
        assert!(!app.help_visible());
        assert!(matches!(app.update(Msg::Back), Cmd::Quit));
    }

    #[test]
    fn empty_merge_sets_notice() {
        let mut app = SortvizApp::new(SessionConfig {
            bar_count: 0,
            seed: Some(1),
            ..SessionConfig::default()
        });
        assert!(matches!(app.update(Msg::Start(Algorithm::Merge)), Cmd::None));
        assert_eq!(app.notice, Some("nothing to sort"));
    }

    #[test]
    fn view_fits_tiny_frames() {
        let app = app();
        for (w, h) in [(1, 1), (2, 2), (10, 3), (80, 24)] {
            let mut frame = Frame::new(w, h);
            app.view(&mut frame);
        }
    }
}
