#![forbid(unsafe_code)]

//! Insertion sort, one shift per step.

use crate::bars::BarModel;
use crate::canvas::Canvas;

use super::{Algorithm, SortProcess, Step};

/// Walks each cursor left by exchanging it with larger predecessors.
///
/// Every exchange repositions both bars and yields, and each cursor yields
/// once more when it comes to rest, even if it never moved. Exchanging rather
/// than overwriting keeps every handle on its own slot between steps.
#[derive(Debug, Clone)]
pub struct InsertionSort {
    /// Index of the next cursor to pick up.
    next: usize,
    /// Current position of the cursor being inserted, if one is active.
    cursor: Option<usize>,
}

impl InsertionSort {
    pub fn new() -> Self {
        Self {
            next: 1,
            cursor: None,
        }
    }
}

impl Default for InsertionSort {
    fn default() -> Self {
        Self::new()
    }
}

impl SortProcess for InsertionSort {
    fn step(&mut self, bars: &mut BarModel, canvas: &mut dyn Canvas) -> Step {
        let pos = match self.cursor {
            Some(pos) => pos,
            None if self.next < bars.len() => self.next,
            None => return Step::Done,
        };

        let shifts = pos > 0 && bars.bars()[pos - 1].value > bars.bars()[pos].value;
        if shifts {
            bars.swap(pos - 1, pos);
            let cursor = bars.bars()[pos - 1].handle;
            let displaced = bars.bars()[pos].handle;
            bars.move_to_index(canvas, displaced, pos);
            bars.move_to_index(canvas, cursor, pos - 1);
            self.cursor = Some(pos - 1);
        } else {
            let cursor = bars.bars()[pos].handle;
            bars.move_to_index(canvas, cursor, pos);
            self.cursor = None;
            self.next += 1;
        }
        Step::Yielded
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Insertion
    }
}
