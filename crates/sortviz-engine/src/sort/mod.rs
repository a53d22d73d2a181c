#![forbid(unsafe_code)]

//! Sorting algorithms as resumable state machines.
//!
//! Each algorithm is a struct holding its loop counters. [`SortProcess::step`]
//! runs until the next observable mutation (a logical move plus the matching
//! canvas move), then returns [`Step::Yielded`]. Once the input is exhausted it
//! returns [`Step::Done`] and the instance is spent; sorting again needs a
//! fresh one from [`Algorithm::process`].
//!
//! | Algorithm | Yields on | Canvas primitive |
//! |-----------|-----------|------------------|
//! | Insertion | every shift, plus once when the cursor settles | `move_to_index` |
//! | Selection | every exchange | `move_to_index` (both bars) |
//! | Bubble | every exchange | `swap_adjacent_visual` |
//! | Merge | every placement into the output range | `move_to_index` |

mod bubble;
mod insertion;
mod merge;
mod selection;

use std::fmt;

pub use bubble::BubbleSort;
pub use insertion::InsertionSort;
pub use merge::MergeSort;
pub use selection::SelectionSort;

use crate::bars::BarModel;
use crate::canvas::Canvas;

/// Result of advancing a sort by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One mutation was made; call `step` again later.
    Yielded,
    /// The sort has finished; the values are non-decreasing.
    Done,
}

/// A sort that can be advanced one observable mutation at a time.
pub trait SortProcess {
    /// Perform work up to and including the next mutation.
    fn step(&mut self, bars: &mut BarModel, canvas: &mut dyn Canvas) -> Step;

    /// Which algorithm this is.
    fn algorithm(&self) -> Algorithm;
}

/// The available algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Insertion,
    Selection,
    Bubble,
    Merge,
}

impl Algorithm {
    /// Every algorithm, in control-bar order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Insertion,
        Algorithm::Selection,
        Algorithm::Bubble,
        Algorithm::Merge,
    ];

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Merge => "Merge Sort",
        }
    }

    /// A fresh instance ready to sort `len` bars.
    pub fn process(self, len: usize) -> Box<dyn SortProcess> {
        match self {
            Algorithm::Insertion => Box::new(InsertionSort::new()),
            Algorithm::Selection => Box::new(SelectionSort::new()),
            Algorithm::Bubble => Box::new(BubbleSort::new()),
            Algorithm::Merge => Box::new(MergeSort::new(len)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::bars::{SlotLayout, Value};
    use crate::canvas::RetainedCanvas;

    pub(crate) fn load(values: &[Value]) -> (BarModel, RetainedCanvas) {
        let mut canvas = RetainedCanvas::new();
        let mut bars = BarModel::new(SlotLayout::new(0, 3, 2, 0));
        bars.load(values, &mut canvas);
        (bars, canvas)
    }

    /// Run to completion, returning the value snapshot after every yield.
    pub(crate) fn snapshots(algorithm: Algorithm, values: &[Value]) -> Vec<Vec<Value>> {
        let (mut bars, mut canvas) = load(values);
        let mut process = algorithm.process(bars.len());
        let mut out = Vec::new();
        while process.step(&mut bars, &mut canvas) == Step::Yielded {
            out.push(bars.values());
            assert!(out.len() < 100_000, "sort did not terminate");
        }
        assert!(bars.is_sorted());
        assert!(bars.is_aligned(&canvas));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::testing::snapshots;
    use super::*;

    #[test]
    fn every_algorithm_sorts_the_scenario() {
        for algorithm in Algorithm::ALL {
            let steps = snapshots(algorithm, &[5, 3, 8, 1]);
            assert_eq!(
                steps.last().map(Vec::as_slice),
                Some(&[1, 3, 5, 8][..]),
                "{algorithm}"
            );
        }
    }

    #[test]
    fn empty_and_singleton_finish_without_yielding() {
        for algorithm in Algorithm::ALL {
            assert!(snapshots(algorithm, &[]).is_empty(), "{algorithm}");
            assert!(snapshots(algorithm, &[4]).is_empty(), "{algorithm}");
        }
    }

    #[test]
    fn process_reports_its_algorithm() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.process(3).algorithm(), algorithm);
        }
    }

    #[test]
    fn names_are_distinct() {
        let names: Vec<_> = Algorithm::ALL.iter().map(|a| a.name()).collect();
        assert_eq!(names.len(), 4);
        assert_eq!(Algorithm::Merge.to_string(), "Merge Sort");
        for (i, a) in names.iter().enumerate() {
            assert!(!names[i + 1..].contains(a));
        }
    }
}
