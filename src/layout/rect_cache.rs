//! Index → rectangle cache.

use crate::model::{ItemGeometry, Rect};
use std::collections::BTreeMap;

/// Rectangles computed so far, keyed by adapter position.
///
/// # Invariants
/// - An entry is never overwritten; it lives until [`RectCache::clear`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RectCache {
    rects: BTreeMap<usize, Rect>,
}

impl RectCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached rectangle of `index`.
    pub fn get(&self, index: usize) -> Option<Rect> {
        self.rects.get(&index).copied()
    }

    /// Cached rectangle of `index`, computing and storing it on a miss.
    pub fn get_or_insert_with<F>(&mut self, index: usize, compute: F) -> Rect
    where
        F: FnOnce() -> Rect,
    {
        *self.rects.entry(index).or_insert_with(compute)
    }

    /// Number of cached rectangles.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.rects.clear();
    }

    /// Cached geometry in ascending index order.
    pub fn geometries(&self) -> impl Iterator<Item = ItemGeometry> + '_ {
        self.rects
            .iter()
            .map(|(&index, &rect)| ItemGeometry { index, rect })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_computation_wins() {
        let mut cache = RectCache::new();
        let first = cache.get_or_insert_with(2, || Rect::new(0, 0, 10, 10));
        let second = cache.get_or_insert_with(2, || Rect::new(5, 5, 20, 20));
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut cache = RectCache::new();
        cache.get_or_insert_with(0, || Rect::new(0, 0, 1, 1));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(0), None);
    }
}
