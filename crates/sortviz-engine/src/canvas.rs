#![forbid(unsafe_code)]

//! Retained-mode canvas: bars are items addressed by handle.
//!
//! The engine never paints. It creates one rectangle per bar and afterwards
//! only moves rectangles around; whoever owns the canvas decides how items
//! become pixels or cells.

use ahash::AHashMap;

/// Opaque reference to one canvas item.
///
/// Handles are ordered by creation, which makes "which of two equal bars was
/// created first" observable (merge sort stability relies on this in tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(u64);

impl Handle {
    /// The raw creation counter.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Bounding box of a canvas item; `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extents {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Extents {
    /// Create extents from explicit edges.
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Horizontal size.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Vertical size.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// The same box moved by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }
}

/// Drawing surface the engine talks to.
///
/// Translating or querying a handle the canvas does not know (for instance
/// one issued before `clear_all`) is a no-op / `None`, never a panic.
pub trait Canvas {
    /// Create a filled rectangle and return its handle.
    fn create_bar(&mut self, extents: Extents) -> Handle;

    /// Current bounding box of an item.
    fn extents(&self, handle: Handle) -> Option<Extents>;

    /// Move an item by a relative offset.
    fn translate(&mut self, handle: Handle, dx: i32, dy: i32);

    /// Remove every item.
    fn clear_all(&mut self);
}

/// In-memory canvas keeping items in creation (draw) order.
#[derive(Debug, Default)]
pub struct RetainedCanvas {
    items: AHashMap<Handle, Extents>,
    order: Vec<Handle>,
    next_id: u64,
    translations: u64,
}

impl RetainedCanvas {
    /// Create an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Items in draw order.
    pub fn items(&self) -> impl Iterator<Item = (Handle, Extents)> + '_ {
        self.order
            .iter()
            .filter_map(|h| self.items.get(h).map(|e| (*h, *e)))
    }

    /// Number of live items.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the canvas holds no items.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Translations applied since creation.
    pub fn translations(&self) -> u64 {
        self.translations
    }

    /// Bounding box of all items, if any.
    pub fn bounds(&self) -> Option<Extents> {
        self.items().map(|(_, e)| e).reduce(Extents::union)
    }
}

impl Canvas for RetainedCanvas {
    fn create_bar(&mut self, extents: Extents) -> Handle {
        let handle = Handle(self.next_id);
        self.next_id += 1;
        self.items.insert(handle, extents);
        self.order.push(handle);
        handle
    }

    fn extents(&self, handle: Handle) -> Option<Extents> {
        self.items.get(&handle).copied()
    }

    fn translate(&mut self, handle: Handle, dx: i32, dy: i32) {
        match self.items.get_mut(&handle) {
            Some(extents) => {
                *extents = extents.translated(dx, dy);
                self.translations += 1;
            }
            None => tracing::trace!(handle = handle.raw(), "translate on unknown handle"),
        }
    }

    fn clear_all(&mut self) {
        // Handle ids keep counting so stale handles never alias new items.
        self.items.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_creation_ordered() {
        let mut canvas = RetainedCanvas::new();
        let a = canvas.create_bar(Extents::new(0, 0, 1, 1));
        let b = canvas.create_bar(Extents::new(0, 0, 1, 1));
        assert!(a < b);
        assert_eq!(canvas.len(), 2);
    }

    #[test]
    fn translate_moves_item_and_counts() {
        let mut canvas = RetainedCanvas::new();
        let h = canvas.create_bar(Extents::new(2, -5, 4, 0));
        canvas.translate(h, 3, 0);
        assert_eq!(canvas.extents(h), Some(Extents::new(5, -5, 7, 0)));
        assert_eq!(canvas.translations(), 1);
    }

    #[test]
    fn clear_all_invalidates_handles() {
        let mut canvas = RetainedCanvas::new();
        let old = canvas.create_bar(Extents::new(0, 0, 1, 1));
        canvas.clear_all();
        assert!(canvas.is_empty());
        assert_eq!(canvas.extents(old), None);

        canvas.translate(old, 1, 1);
        assert_eq!(canvas.translations(), 0);

        let fresh = canvas.create_bar(Extents::new(0, 0, 1, 1));
        assert_ne!(old, fresh);
        assert!(old < fresh);
    }

    #[test]
    fn items_follow_draw_order() {
        let mut canvas = RetainedCanvas::new();
        let handles: Vec<_> = (0..4)
            .map(|i| canvas.create_bar(Extents::new(i * 2, -i, i * 2 + 1, 0)))
            .collect();
        let seen: Vec<_> = canvas.items().map(|(h, _)| h).collect();
        assert_eq!(seen, handles);
        assert_eq!(canvas.bounds(), Some(Extents::new(0, -3, 7, 0)));
    }

    #[test]
    fn extents_geometry() {
        let e = Extents::new(1, -4, 3, 0);
        assert_eq!(e.width(), 2);
        assert_eq!(e.height(), 4);
        assert_eq!(e.translated(-1, 2), Extents::new(0, -2, 2, 2));
    }
}
