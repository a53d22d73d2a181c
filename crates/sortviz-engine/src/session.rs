#![forbid(unsafe_code)]

//! One visualizer context: bars, canvas, scheduler, speed, and RNG.
//!
//! Everything a running visualizer needs lives in a [`Session`], so several
//! can coexist (the tests rely on this) and nothing is global.

use std::ops::RangeInclusive;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::bars::{BarModel, SlotLayout, Value};
use crate::canvas::Canvas;
use crate::scheduler::{Scheduler, SchedulerState, Speed, StartOutcome, TickOutcome};
use crate::sort::Algorithm;

/// How a session is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Bars per shuffle.
    pub bar_count: usize,
    /// Inclusive range bar values are drawn from.
    pub value_range: RangeInclusive<Value>,
    /// Slot geometry on the canvas.
    pub layout: SlotLayout,
    /// RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Initial speed.
    pub speed: Speed,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bar_count: 60,
            value_range: 2..=64,
            layout: SlotLayout::default(),
            seed: None,
            speed: Speed::DEFAULT,
        }
    }
}

/// Answer to a shuffle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShuffleOutcome {
    /// New bars were generated.
    Shuffled { epoch: u64 },
    /// A sort is running; nothing changed.
    Busy,
}

/// A self-contained visualizer.
pub struct Session<C: Canvas> {
    bars: BarModel,
    canvas: C,
    scheduler: Scheduler,
    speed: Speed,
    rng: SmallRng,
    bar_count: usize,
    value_range: RangeInclusive<Value>,
}

impl<C: Canvas> Session<C> {
    /// Create a session and perform the initial shuffle.
    pub fn new(config: SessionConfig, canvas: C) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let mut session = Self {
            bars: BarModel::new(config.layout),
            canvas,
            scheduler: Scheduler::new(),
            speed: config.speed,
            rng,
            bar_count: config.bar_count,
            value_range: config.value_range,
        };
        session.reshuffle();
        session
    }

    /// Replace the bars with fresh random ones, unless a sort is running.
    pub fn shuffle(&mut self) -> ShuffleOutcome {
        if !self.scheduler.is_idle() {
            tracing::debug!("shuffle rejected: sort in progress");
            return ShuffleOutcome::Busy;
        }
        self.reshuffle();
        ShuffleOutcome::Shuffled {
            epoch: self.bars.epoch(),
        }
    }

    fn reshuffle(&mut self) {
        self.bars.initialize(
            self.bar_count,
            self.value_range.clone(),
            &mut self.rng,
            &mut self.canvas,
        );
        tracing::info!(
            epoch = self.bars.epoch(),
            bars = self.bar_count,
            "bars shuffled"
        );
    }

    /// Request a sort; see [`Scheduler::start`].
    pub fn start(&mut self, algorithm: Algorithm) -> StartOutcome {
        self.scheduler.start(algorithm, &self.bars)
    }

    /// Advance the active sort by one step; see [`Scheduler::tick`].
    pub fn tick(&mut self) -> TickOutcome {
        self.scheduler.tick(&mut self.bars, &mut self.canvas, self.speed)
    }

    /// Current speed.
    #[inline]
    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Change the speed; allowed while a sort runs.
    pub fn set_speed(&mut self, speed: Speed) {
        if speed != self.speed {
            tracing::debug!(speed = speed.get(), "speed changed");
        }
        self.speed = speed;
    }

    /// Scheduler state.
    pub fn state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Whether no sort is running.
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle()
    }

    /// Whether start and shuffle requests would be accepted.
    pub fn controls_enabled(&self) -> bool {
        self.is_idle()
    }

    /// The bar model.
    pub fn bars(&self) -> &BarModel {
        &self.bars
    }

    /// The canvas the bars are drawn on.
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Current values in order.
    pub fn values(&self) -> Vec<Value> {
        self.bars.values()
    }

    /// Shuffle counter.
    pub fn epoch(&self) -> u64 {
        self.bars.epoch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RetainedCanvas;

    fn seeded(seed: u64) -> Session<RetainedCanvas> {
        Session::new(
            SessionConfig {
                bar_count: 12,
                value_range: 1..=30,
                seed: Some(seed),
                ..SessionConfig::default()
            },
            RetainedCanvas::new(),
        )
    }

    #[test]
    fn new_session_is_shuffled_and_idle() {
        let session = seeded(9);
        assert_eq!(session.epoch(), 1);
        assert_eq!(session.values().len(), 12);
        assert_eq!(session.canvas().len(), 12);
        assert!(session.is_idle());
        assert!(session.controls_enabled());
    }

    #[test]
    fn default_config_fills_sixty_bars() {
        let config = SessionConfig {
            seed: Some(8),
            ..SessionConfig::default()
        };
        assert_eq!(config.bar_count, 60);
        let session = Session::new(config, RetainedCanvas::new());
        assert_eq!(session.values().len(), 60);
        assert!(session.values().iter().all(|v| (2..=64).contains(v)));
    }

    #[test]
    fn same_seed_same_values() {
        assert_eq!(seeded(5).values(), seeded(5).values());
    }

    #[test]
    fn shuffle_bumps_epoch_when_idle() {
        let mut session = seeded(2);
        assert_eq!(session.shuffle(), ShuffleOutcome::Shuffled { epoch: 2 });
        assert!(session.bars().is_aligned(session.canvas()));
    }

    #[test]
    fn shuffle_while_running_is_rejected() {
        let mut session = seeded(4);
        assert_eq!(session.start(Algorithm::Bubble), StartOutcome::Started);
        let before = session.values();

        assert_eq!(session.shuffle(), ShuffleOutcome::Busy);
        assert_eq!(session.epoch(), 1);
        assert_eq!(session.values(), before);
        assert!(!session.controls_enabled());
    }

    #[test]
    fn speed_adjusts_while_running() {
        let mut session = seeded(4);
        session.start(Algorithm::Insertion);
        session.set_speed(session.speed().faster(30));
        assert_eq!(session.speed().get(), 80);
        match session.tick() {
            TickOutcome::Stepped { next_tick, .. } => {
                assert_eq!(next_tick, Speed::new(80).delay());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn tick_drives_sort_to_completion() {
        let mut session = seeded(11);
        session.start(Algorithm::Merge);
        let mut guard = 0;
        while !matches!(session.tick(), TickOutcome::Finished { .. }) {
            guard += 1;
            assert!(guard < 10_000);
        }
        assert!(session.bars().is_sorted());
        assert!(session.bars().is_aligned(session.canvas()));
        assert!(session.is_idle());
    }

    #[test]
    fn sessions_are_independent() {
        let mut a = seeded(1);
        let b = seeded(1);
        a.start(Algorithm::Insertion);
        a.tick();
        assert!(!a.is_idle());
        assert!(b.is_idle());
    }
}
