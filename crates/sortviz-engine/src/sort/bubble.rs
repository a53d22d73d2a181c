#![forbid(unsafe_code)]

//! Bubble sort, one adjacent exchange per step.

use crate::bars::BarModel;
use crate::canvas::Canvas;

use super::{Algorithm, SortProcess, Step};

/// Classic bubble sort without the early exit.
///
/// Pass `i` compares `j` and `j + 1` for `j` in `0..n - i - 1`; only
/// comparisons that exchange yield.
#[derive(Debug, Clone, Default)]
pub struct BubbleSort {
    pass: usize,
    j: usize,
}

impl BubbleSort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Passes fully completed so far.
    pub fn passes(&self) -> usize {
        self.pass
    }
}

impl SortProcess for BubbleSort {
    fn step(&mut self, bars: &mut BarModel, canvas: &mut dyn Canvas) -> Step {
        let n = bars.len();
        loop {
            if self.pass + 1 >= n {
                return Step::Done;
            }
            if self.j + 1 >= n - self.pass {
                self.pass += 1;
                self.j = 0;
                continue;
            }

            let j = self.j;
            self.j += 1;
            let (left, right) = (bars.bars()[j], bars.bars()[j + 1]);
            if left.value > right.value {
                bars.swap(j, j + 1);
                bars.swap_adjacent_visual(canvas, left.handle, right.handle);
                return Step::Yielded;
            }
        }
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Bubble
    }
}
