#![forbid(unsafe_code)]

//! Drives at most one sort, one step per tick.
//!
//! The scheduler does not own a timer. Each [`Scheduler::tick`] advances the
//! active sort by one step and reports the delay the caller should wait
//! before ticking again; the runtime turns that delay into a one-shot tick.
//!
//! # State machine
//!
//! ```text
//! Idle --start--> Running --tick (Yielded)--> Running
//!                 Running --tick (Done)-----> Idle
//! ```
//!
//! `start` while running is rejected and leaves the active sort untouched.

use std::time::Duration;

use crate::bars::BarModel;
use crate::canvas::Canvas;
use crate::sort::{Algorithm, SortProcess, Step};

/// Animation speed, 1 (slowest) to 100 (fastest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Speed(u8);

impl Speed {
    pub const MIN: Speed = Speed(1);
    pub const MAX: Speed = Speed(100);
    pub const DEFAULT: Speed = Speed(50);

    /// Create a speed, clamped to `1..=100`.
    pub fn new(value: u32) -> Self {
        Self(value.clamp(Self::MIN.0 as u32, Self::MAX.0 as u32) as u8)
    }

    /// The numeric speed.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Delay between steps: `101 - speed` milliseconds, never below 1ms.
    pub fn delay(self) -> Duration {
        Duration::from_millis(101u64.saturating_sub(self.0 as u64).max(1))
    }

    /// Speed increased by `by`, clamped.
    #[must_use]
    pub fn faster(self, by: u32) -> Self {
        Self::new((self.0 as u32).saturating_add(by))
    }

    /// Speed decreased by `by`, clamped.
    #[must_use]
    pub fn slower(self, by: u32) -> Self {
        Self::new((self.0 as u32).saturating_sub(by))
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Observable scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running { algorithm: Algorithm, steps: u64 },
}

/// Answer to a start request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The sort is now active; the caller should tick right away.
    Started,
    /// Another sort is running; nothing changed.
    Busy,
    /// Merge sort was asked to sort nothing; nothing changed.
    Empty,
}

/// Answer to a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing is running.
    Idle,
    /// The active sort yielded; tick again after `next_tick`.
    Stepped { steps: u64, next_tick: Duration },
    /// The active sort finished and was dropped.
    Finished { algorithm: Algorithm, steps: u64 },
}

struct Active {
    process: Box<dyn SortProcess>,
    steps: u64,
}

/// Owner of the single active sort.
#[derive(Default)]
pub struct Scheduler {
    active: Option<Active>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin `algorithm` over `bars` if nothing else is running.
    pub fn start(&mut self, algorithm: Algorithm, bars: &BarModel) -> StartOutcome {
        if let Some(active) = &self.active {
            tracing::debug!(
                requested = %algorithm,
                running = %active.process.algorithm(),
                "start rejected: sort in progress"
            );
            return StartOutcome::Busy;
        }
        if algorithm == Algorithm::Merge && bars.is_empty() {
            tracing::debug!("start rejected: nothing to merge");
            return StartOutcome::Empty;
        }

        self.active = Some(Active {
            process: algorithm.process(bars.len()),
            steps: 0,
        });
        tracing::info!(algorithm = %algorithm, bars = bars.len(), "sort started");
        StartOutcome::Started
    }

    /// Advance the active sort by one step.
    pub fn tick(
        &mut self,
        bars: &mut BarModel,
        canvas: &mut dyn Canvas,
        speed: Speed,
    ) -> TickOutcome {
        let Some(active) = self.active.as_mut() else {
            return TickOutcome::Idle;
        };

        match active.process.step(bars, canvas) {
            Step::Yielded => {
                active.steps += 1;
                tracing::trace!(steps = active.steps, "sort step");
                TickOutcome::Stepped {
                    steps: active.steps,
                    next_tick: speed.delay(),
                }
            }
            Step::Done => {
                let algorithm = active.process.algorithm();
                let steps = active.steps;
                self.active = None;
                tracing::info!(algorithm = %algorithm, steps, "sort finished");
                TickOutcome::Finished { algorithm, steps }
            }
        }
    }

    /// Current state.
    pub fn state(&self) -> SchedulerState {
        match &self.active {
            None => SchedulerState::Idle,
            Some(active) => SchedulerState::Running {
                algorithm: active.process.algorithm(),
                steps: active.steps,
            },
        }
    }

    /// Whether no sort is active.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bars::SlotLayout;
    use crate::canvas::RetainedCanvas;

    fn setup(values: &[u32]) -> (BarModel, RetainedCanvas) {
        let mut canvas = RetainedCanvas::new();
        let mut bars = BarModel::new(SlotLayout::default());
        bars.load(values, &mut canvas);
        (bars, canvas)
    }

    #[test]
    fn speed_clamps() {
        assert_eq!(Speed::new(0), Speed::MIN);
        assert_eq!(Speed::new(500), Speed::MAX);
        assert_eq!(Speed::new(42).get(), 42);
        assert_eq!(Speed::default().get(), 50);
    }

    #[test]
    fn delay_never_zero() {
        assert_eq!(Speed::MAX.delay(), Duration::from_millis(1));
        assert_eq!(Speed::MIN.delay(), Duration::from_millis(100));
        assert_eq!(Speed::DEFAULT.delay(), Duration::from_millis(51));
    }

    #[test]
    fn faster_and_slower_saturate() {
        assert_eq!(Speed::new(98).faster(10), Speed::MAX);
        assert_eq!(Speed::new(3).slower(10), Speed::MIN);
        assert_eq!(Speed::new(50).faster(1).get(), 51);
        assert_eq!(Speed::new(50).slower(10).get(), 40);
    }

    #[test]
    fn idle_tick_does_nothing() {
        let (mut bars, mut canvas) = setup(&[2, 1]);
        let mut scheduler = Scheduler::new();
        assert_eq!(
            scheduler.tick(&mut bars, &mut canvas, Speed::default()),
            TickOutcome::Idle
        );
        assert_eq!(bars.values(), vec![2, 1]);
    }

    #[test]
    fn start_while_running_is_rejected() {
        let (mut bars, mut canvas) = setup(&[3, 2, 1]);
        let mut scheduler = Scheduler::new();
        assert_eq!(scheduler.start(Algorithm::Bubble, &bars), StartOutcome::Started);
        scheduler.tick(&mut bars, &mut canvas, Speed::default());

        assert_eq!(scheduler.start(Algorithm::Merge, &bars), StartOutcome::Busy);
        assert_eq!(
            scheduler.state(),
            SchedulerState::Running {
                algorithm: Algorithm::Bubble,
                steps: 1
            }
        );
    }

    #[test]
    fn merge_on_empty_is_rejected() {
        let (bars, _canvas) = setup(&[]);
        let mut scheduler = Scheduler::new();
        assert_eq!(scheduler.start(Algorithm::Merge, &bars), StartOutcome::Empty);
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.start(Algorithm::Bubble, &bars), StartOutcome::Started);
    }

    #[test]
    fn runs_to_completion_then_idles() {
        let (mut bars, mut canvas) = setup(&[5, 3, 8, 1]);
        let mut scheduler = Scheduler::new();
        scheduler.start(Algorithm::Selection, &bars);

        let speed = Speed::new(90);
        let mut stepped = 0;
        let finished = loop {
            match scheduler.tick(&mut bars, &mut canvas, speed) {
                TickOutcome::Stepped { steps, next_tick } => {
                    stepped += 1;
                    assert_eq!(steps, stepped);
                    assert_eq!(next_tick, Duration::from_millis(11));
                }
                TickOutcome::Finished { algorithm, steps } => break (algorithm, steps),
                TickOutcome::Idle => panic!("went idle before finishing"),
            }
        };

        assert_eq!(finished, (Algorithm::Selection, 2));
        assert!(scheduler.is_idle());
        assert_eq!(bars.values(), vec![1, 3, 5, 8]);
        assert_eq!(scheduler.tick(&mut bars, &mut canvas, speed), TickOutcome::Idle);
    }
}
