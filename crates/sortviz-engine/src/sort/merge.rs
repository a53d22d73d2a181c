#![forbid(unsafe_code)]

//! Top-down merge sort with the recursion flattened into a work stack.

use crate::bars::{Bar, BarModel};
use crate::canvas::Canvas;

use super::{Algorithm, SortProcess, Step};

/// Pending work over the inclusive range `lo..=hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Sort { lo: usize, hi: usize },
    Merge { lo: usize, mid: usize, hi: usize },
}

/// A merge in progress: buffered copies of both halves and the output cursor.
#[derive(Debug, Clone)]
struct Merging {
    left: Vec<Bar>,
    right: Vec<Bar>,
    i: usize,
    j: usize,
    k: usize,
}

impl Merging {
    /// Take the next bar in merged order; ties go to the left half.
    fn next_bar(&mut self) -> Option<Bar> {
        let take_left = match (self.left.get(self.i), self.right.get(self.j)) {
            (Some(l), Some(r)) => l.value <= r.value,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => return None,
        };
        if take_left {
            self.i += 1;
            Some(self.left[self.i - 1])
        } else {
            self.j += 1;
            Some(self.right[self.j - 1])
        }
    }
}

/// Merge sort yielding once per bar written into a merge's output range.
///
/// While a merge runs, the slots from its output cursor to `hi` still hold
/// stale entries whose bars live in the merge buffers; the range is a
/// consistent permutation again once the merge completes.
#[derive(Debug, Clone)]
pub struct MergeSort {
    stack: Vec<Frame>,
    merging: Option<Merging>,
}

impl MergeSort {
    /// Prepare to sort `len` bars.
    pub fn new(len: usize) -> Self {
        let stack = if len > 1 {
            vec![Frame::Sort { lo: 0, hi: len - 1 }]
        } else {
            Vec::new()
        };
        Self {
            stack,
            merging: None,
        }
    }

    /// Whether a merge still has bars left to place.
    pub fn is_merging(&self) -> bool {
        self.merging
            .as_ref()
            .is_some_and(|m| m.i < m.left.len() || m.j < m.right.len())
    }
}

impl SortProcess for MergeSort {
    fn step(&mut self, bars: &mut BarModel, canvas: &mut dyn Canvas) -> Step {
        loop {
            if let Some(merge) = self.merging.as_mut() {
                if let Some(bar) = merge.next_bar() {
                    let k = merge.k;
                    merge.k += 1;
                    bars.set(k, bar);
                    bars.move_to_index(canvas, bar.handle, k);
                    return Step::Yielded;
                }
                self.merging = None;
            }

            match self.stack.pop() {
                None => return Step::Done,
                Some(Frame::Sort { lo, hi }) => {
                    if lo < hi {
                        let mid = lo + (hi - lo) / 2;
                        // Popped in reverse: left half, right half, then merge.
                        self.stack.push(Frame::Merge { lo, mid, hi });
                        self.stack.push(Frame::Sort { lo: mid + 1, hi });
                        self.stack.push(Frame::Sort { lo, hi: mid });
                    }
                }
                Some(Frame::Merge { lo, mid, hi }) => {
                    let all = bars.bars();
                    self.merging = Some(Merging {
                        left: all[lo..=mid].to_vec(),
                        right: all[mid + 1..=hi].to_vec(),
                        i: 0,
                        j: 0,
                        k: lo,
                    });
                }
            }
        }
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Merge
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{load, snapshots};
    use super::*;

    #[test]
    fn scenario_snapshots() {
        let steps = snapshots(Algorithm::Merge, &[5, 3, 8, 1]);
        assert_eq!(
            steps,
            vec![
                // merge [5] [3]
                vec![3, 3, 8, 1],
                vec![3, 5, 8, 1],
                // merge [8] [1]
                vec![3, 5, 1, 1],
                vec![3, 5, 1, 8],
                // merge [3, 5] [1, 8]
                vec![1, 5, 1, 8],
                vec![1, 3, 1, 8],
                vec![1, 3, 5, 8],
                vec![1, 3, 5, 8],
            ]
        );
    }

    #[test]
    fn aligned_between_merges() {
        let (mut bars, mut canvas) = load(&[7, 2, 9, 4, 4, 1, 8]);
        let mut sort = MergeSort::new(bars.len());
        while sort.step(&mut bars, &mut canvas) == Step::Yielded {
            if !sort.is_merging() {
                assert!(bars.is_aligned(&canvas));
            }
        }
        assert!(bars.is_sorted());
        assert!(bars.is_aligned(&canvas));
    }

    #[test]
    fn equal_values_keep_creation_order() {
        let (mut bars, mut canvas) = load(&[3, 1, 3, 1, 3]);
        let mut sort = MergeSort::new(bars.len());
        while sort.step(&mut bars, &mut canvas) == Step::Yielded {}
        assert_eq!(bars.values(), vec![1, 1, 3, 3, 3]);
        for pair in bars.bars().windows(2) {
            if pair[0].value == pair[1].value {
                assert!(pair[0].handle < pair[1].handle);
            }
        }
    }

    #[test]
    fn one_yield_per_placement() {
        // ceil(log2 n) levels of n placements each for a power of two.
        assert_eq!(snapshots(Algorithm::Merge, &[4, 3, 2, 1, 8, 7, 6, 5]).len(), 24);
    }
}
