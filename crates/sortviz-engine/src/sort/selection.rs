#![forbid(unsafe_code)]

//! Selection sort, one exchange per step.

use crate::bars::BarModel;
use crate::canvas::Canvas;

use super::{Algorithm, SortProcess, Step};

/// Finds the minimum of the unsorted tail and exchanges it into place.
///
/// Positions that already hold their minimum are skipped inside the same
/// step, so every yield corresponds to a visible exchange.
#[derive(Debug, Clone, Default)]
pub struct SelectionSort {
    /// First unsorted index.
    i: usize,
}

impl SelectionSort {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SortProcess for SelectionSort {
    fn step(&mut self, bars: &mut BarModel, canvas: &mut dyn Canvas) -> Step {
        let n = bars.len();
        while self.i < n {
            let i = self.i;
            self.i += 1;

            let mut min = i;
            for j in i + 1..n {
                // Strict: the first of several equal minima wins.
                if bars.bars()[j].value < bars.bars()[min].value {
                    min = j;
                }
            }
            if min == i {
                continue;
            }

            bars.swap(i, min);
            let (placed, displaced) = (bars.bars()[i].handle, bars.bars()[min].handle);
            bars.move_to_index(canvas, placed, i);
            bars.move_to_index(canvas, displaced, min);
            return Step::Yielded;
        }
        Step::Done
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Selection
    }
}
