#![forbid(unsafe_code)]

//! The bar model: values, their canvas handles, and the slot layout.
//!
//! A [`Bar`] carries both the logical value and the handle of the rectangle
//! that shows it, so every permutation of the logical sequence moves the
//! handles with it. Keeping the canvas in step is the job of
//! [`BarModel::move_to_index`] and [`BarModel::swap_adjacent_visual`].

use std::ops::RangeInclusive;

use rand::Rng;

use crate::canvas::{Canvas, Extents, Handle};

/// Bar height in canvas units.
pub type Value = u32;

/// Where bar slots sit on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLayout {
    /// Left edge of slot 0.
    pub left_start: i32,
    /// Distance between the left edges of neighboring slots.
    pub step: i32,
    /// Width of each bar.
    pub bar_width: i32,
    /// The line bars stand on; a bar of value `v` spans `baseline - v..baseline`.
    pub baseline: i32,
}

impl SlotLayout {
    /// Create a layout.
    pub const fn new(left_start: i32, step: i32, bar_width: i32, baseline: i32) -> Self {
        Self {
            left_start,
            step,
            bar_width,
            baseline,
        }
    }

    /// Left edge of slot `index`.
    #[inline]
    pub fn slot_left(&self, index: usize) -> i32 {
        self.left_start + index as i32 * self.step
    }

    /// Extents of a bar of `value` standing in slot `index`.
    pub fn extents_for(&self, index: usize, value: Value) -> Extents {
        let left = self.slot_left(index);
        Extents::new(
            left,
            self.baseline - value as i32,
            left + self.bar_width,
            self.baseline,
        )
    }
}

impl Default for SlotLayout {
    /// One-column bars with a one-column gap, standing on `y = 0`.
    fn default() -> Self {
        Self::new(0, 2, 1, 0)
    }
}

/// One logical entry: its value and the canvas item drawing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub value: Value,
    pub handle: Handle,
}

/// Ordered bars plus the layout they are drawn with.
#[derive(Debug, Clone)]
pub struct BarModel {
    bars: Vec<Bar>,
    layout: SlotLayout,
    epoch: u64,
}

impl BarModel {
    /// Create an empty model (epoch 0).
    pub fn new(layout: SlotLayout) -> Self {
        Self {
            bars: Vec::new(),
            layout,
            epoch: 0,
        }
    }

    /// Replace all bars with `count` fresh random bars.
    ///
    /// Clears the canvas, draws each value uniformly from `range` (bounds are
    /// reordered if reversed), creates handles left to right, and bumps the
    /// epoch.
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        range: RangeInclusive<Value>,
        rng: &mut R,
        canvas: &mut dyn Canvas,
    ) {
        let (lo, hi) = if range.start() <= range.end() {
            (*range.start(), *range.end())
        } else {
            (*range.end(), *range.start())
        };

        canvas.clear_all();
        self.bars.clear();
        self.bars.reserve(count);
        for index in 0..count {
            let value = rng.random_range(lo..=hi);
            let handle = canvas.create_bar(self.layout.extents_for(index, value));
            self.bars.push(Bar { value, handle });
        }
        self.epoch += 1;
    }

    /// Replace all bars with the given values, in order.
    ///
    /// Deterministic counterpart of [`initialize`](Self::initialize).
    pub fn load(&mut self, values: &[Value], canvas: &mut dyn Canvas) {
        canvas.clear_all();
        self.bars = values
            .iter()
            .enumerate()
            .map(|(index, &value)| Bar {
                value,
                handle: canvas.create_bar(self.layout.extents_for(index, value)),
            })
            .collect();
        self.epoch += 1;
    }

    /// Move `handle` horizontally so its left edge sits on slot `index`.
    ///
    /// Issues no translation when it is already there.
    pub fn move_to_index(&self, canvas: &mut dyn Canvas, handle: Handle, index: usize) {
        let Some(extents) = canvas.extents(handle) else {
            return;
        };
        let dx = self.layout.slot_left(index) - extents.left;
        if dx != 0 {
            canvas.translate(handle, dx, 0);
        }
    }

    /// Exchange the on-screen positions of two neighboring bars.
    ///
    /// `a` moves onto `b`'s left edge and `b` onto `a`'s right edge minus its
    /// width. Only correct for adjacent equal-width bars with `a` on the left;
    /// anything else is drawn wrong but does not panic.
    pub fn swap_adjacent_visual(&self, canvas: &mut dyn Canvas, a: Handle, b: Handle) {
        let (Some(ea), Some(eb)) = (canvas.extents(a), canvas.extents(b)) else {
            return;
        };
        canvas.translate(a, eb.left - ea.left, 0);
        canvas.translate(b, ea.right - eb.right, 0);
    }

    /// Number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether there are no bars.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// All bars in logical order.
    #[inline]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Bar at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// Logical values in order.
    pub fn values(&self) -> Vec<Value> {
        self.bars.iter().map(|b| b.value).collect()
    }

    /// Handles in logical order.
    pub fn handles(&self) -> Vec<Handle> {
        self.bars.iter().map(|b| b.handle).collect()
    }

    /// Exchange two logical entries (the canvas is not touched).
    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.bars.swap(a, b);
    }

    /// Overwrite the logical entry at `index` (the canvas is not touched).
    #[inline]
    pub fn set(&mut self, index: usize, bar: Bar) {
        self.bars[index] = bar;
    }

    /// Slot layout.
    #[inline]
    pub fn layout(&self) -> SlotLayout {
        self.layout
    }

    /// How many times the model has been (re)initialized.
    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether every bar's handle sits on its own slot.
    pub fn is_aligned(&self, canvas: &dyn Canvas) -> bool {
        self.bars.iter().enumerate().all(|(index, bar)| {
            canvas
                .extents(bar.handle)
                .is_some_and(|e| e.left == self.layout.slot_left(index))
        })
    }

    /// Whether values are non-decreasing.
    pub fn is_sorted(&self) -> bool {
        self.bars.windows(2).all(|w| w[0].value <= w[1].value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RetainedCanvas;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn model(values: &[Value]) -> (BarModel, RetainedCanvas) {
        let mut canvas = RetainedCanvas::new();
        let mut bars = BarModel::new(SlotLayout::new(10, 4, 3, 100));
        bars.load(values, &mut canvas);
        (bars, canvas)
    }

    #[test]
    fn initialize_fills_range_and_bumps_epoch() {
        let mut canvas = RetainedCanvas::new();
        let mut bars = BarModel::new(SlotLayout::default());
        let mut rng = SmallRng::seed_from_u64(7);
        bars.initialize(25, 3..=9, &mut rng, &mut canvas);

        assert_eq!(bars.len(), 25);
        assert_eq!(bars.epoch(), 1);
        assert_eq!(canvas.len(), 25);
        assert!(bars.values().iter().all(|v| (3..=9).contains(v)));
        assert!(bars.is_aligned(&canvas));
    }

    #[test]
    fn initialize_replaces_previous_handles() {
        let mut canvas = RetainedCanvas::new();
        let mut bars = BarModel::new(SlotLayout::default());
        let mut rng = SmallRng::seed_from_u64(1);
        bars.initialize(5, 1..=5, &mut rng, &mut canvas);
        let old = bars.handles();
        bars.initialize(5, 1..=5, &mut rng, &mut canvas);

        assert_eq!(bars.epoch(), 2);
        assert_eq!(canvas.len(), 5);
        assert!(old.iter().all(|h| canvas.extents(*h).is_none()));
    }

    #[test]
    fn initialize_accepts_reversed_range() {
        let mut canvas = RetainedCanvas::new();
        let mut bars = BarModel::new(SlotLayout::default());
        let mut rng = SmallRng::seed_from_u64(3);
        bars.initialize(10, 8..=2, &mut rng, &mut canvas);
        assert!(bars.values().iter().all(|v| (2..=8).contains(v)));
    }

    #[test]
    fn extents_stand_on_baseline() {
        let (bars, canvas) = model(&[7, 2]);
        let first = canvas.extents(bars.bars()[0].handle).unwrap();
        assert_eq!(first, Extents::new(10, 93, 13, 100));
        let second = canvas.extents(bars.bars()[1].handle).unwrap();
        assert_eq!(second.left, 14);
        assert_eq!(second.height(), 2);
    }

    #[test]
    fn move_to_index_aligned_issues_no_translation() {
        let (bars, mut canvas) = model(&[4, 1, 3]);
        let handle = bars.bars()[1].handle;
        bars.move_to_index(&mut canvas, handle, 1);
        assert_eq!(canvas.translations(), 0);
    }

    #[test]
    fn move_to_index_repositions() {
        let (bars, mut canvas) = model(&[4, 1, 3]);
        let handle = bars.bars()[0].handle;
        bars.move_to_index(&mut canvas, handle, 2);
        assert_eq!(canvas.extents(handle).map(|e| e.left), Some(18));
        assert_eq!(canvas.translations(), 1);
    }

    #[test]
    fn swap_adjacent_exchanges_positions() {
        let (mut bars, mut canvas) = model(&[9, 2]);
        let (a, b) = (bars.bars()[0].handle, bars.bars()[1].handle);
        bars.swap(0, 1);
        bars.swap_adjacent_visual(&mut canvas, a, b);
        assert_eq!(canvas.extents(a).map(|e| e.left), Some(14));
        assert_eq!(canvas.extents(b).map(|e| e.left), Some(10));
        assert!(bars.is_aligned(&canvas));
    }

    #[test]
    fn logical_swap_breaks_alignment_until_moved() {
        let (mut bars, mut canvas) = model(&[1, 2, 3]);
        bars.swap(0, 2);
        assert!(!bars.is_aligned(&canvas));
        let (h0, h2) = (bars.bars()[0].handle, bars.bars()[2].handle);
        bars.move_to_index(&mut canvas, h0, 0);
        bars.move_to_index(&mut canvas, h2, 2);
        assert!(bars.is_aligned(&canvas));
        assert_eq!(bars.values(), vec![3, 2, 1]);
        assert!(!bars.is_sorted());
    }

    #[test]
    fn empty_model_is_sorted_and_aligned() {
        let (bars, canvas) = model(&[]);
        assert!(bars.is_empty());
        assert!(bars.is_sorted());
        assert!(bars.is_aligned(&canvas));
    }
}
