//! Item providers.
//!
//! This module provides the data-side collaborators of the layout engines:
//! - [`ItemProvider`] - item count plus optional per-item span metadata
//! - [`UniformItems`] - a plain list of equally sized items
//! - [`GridItems`] - items with explicit cell spans (irregular grids)
//! - [`ModuleDescriptor`] / [`TableModule`] - span callbacks for module layouts
//! - [`RowDefinition`] - JSON layout documents that build [`GridItems`]
//!
//! Items are opaque: the core only learns how many there are and which
//! cells they cover.

use crate::model::SpanDescriptor;

pub mod grid_items;
pub mod module;
pub mod row_definition;

pub use grid_items::GridItems;
pub use module::{ModuleDescriptor, TableModule};
pub use row_definition::{CellPlacement, LayoutFileError, RowDefinition, MAX_CELL_EXTENT};

/// Data source consumed by the layout engines.
///
/// Only [`ItemProvider::item_count`] is required. A provider with a
/// non-positive [`ItemProvider::column_count`] selects fixed-row placement;
/// a positive column count selects span placement, where cell sizes derive
/// from the container width.
pub trait ItemProvider {
    /// Number of items.
    fn item_count(&self) -> usize;

    /// Cell span of the item at `index`, if this provider describes spans.
    fn span_of(&self, _index: usize) -> Option<SpanDescriptor> {
        None
    }

    /// Lane-first start cell of the item at `index`.
    fn start_cell_index_of(&self, index: usize) -> Option<usize> {
        self.span_of(index).map(|span| span.start_cell_index)
    }

    /// Number of cell columns across the container width; `<= 0` means
    /// fixed-row mode.
    fn column_count(&self) -> i32 {
        0
    }

    /// Vertical gap between rows in pixels.
    fn row_spacing(&self) -> i32 {
        0
    }

    /// Horizontal gap between columns in pixels.
    fn column_spacing(&self) -> i32 {
        0
    }

    /// Cell width divided by cell height.
    fn aspect_ratio(&self) -> f32 {
        1.0
    }

    /// Stable identifier reported with selection events.
    fn item_id(&self, index: usize) -> Option<u64> {
        (index < self.item_count()).then_some(index as u64)
    }
}

/// Provider used when no data source is attached: every operation sees
/// zero items.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyProvider;

impl ItemProvider for EmptyProvider {
    fn item_count(&self) -> usize {
        0
    }
}

impl<T: ItemProvider + ?Sized> ItemProvider for Box<T> {
    fn item_count(&self) -> usize {
        (**self).item_count()
    }

    fn span_of(&self, index: usize) -> Option<SpanDescriptor> {
        (**self).span_of(index)
    }

    fn start_cell_index_of(&self, index: usize) -> Option<usize> {
        (**self).start_cell_index_of(index)
    }

    fn column_count(&self) -> i32 {
        (**self).column_count()
    }

    fn row_spacing(&self) -> i32 {
        (**self).row_spacing()
    }

    fn column_spacing(&self) -> i32 {
        (**self).column_spacing()
    }

    fn aspect_ratio(&self) -> f32 {
        (**self).aspect_ratio()
    }

    fn item_id(&self, index: usize) -> Option<u64> {
        (**self).item_id(index)
    }
}

/// A flat list of `count` equally sized items with optional spacing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniformItems {
    count: usize,
    row_spacing: i32,
    column_spacing: i32,
}

impl UniformItems {
    /// `count` items without spacing.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            row_spacing: 0,
            column_spacing: 0,
        }
    }

    /// Set the gaps between rows and columns.
    pub fn with_spacing(mut self, row_spacing: i32, column_spacing: i32) -> Self {
        self.row_spacing = row_spacing;
        self.column_spacing = column_spacing;
        self
    }

    /// Replace the item count, e.g. after the backing data changed.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
    }
}

impl ItemProvider for UniformItems {
    fn item_count(&self) -> usize {
        self.count
    }

    fn row_spacing(&self) -> i32 {
        self.row_spacing
    }

    fn column_spacing(&self) -> i32 {
        self.column_spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_provider_has_no_items_or_ids() {
        assert_eq!(EmptyProvider.item_count(), 0);
        assert_eq!(EmptyProvider.item_id(0), None);
        assert_eq!(EmptyProvider.column_count(), 0);
    }

    #[test]
    fn uniform_items_default_to_fixed_row_mode() {
        let items = UniformItems::new(10).with_spacing(4, 6);
        assert_eq!(items.item_count(), 10);
        assert_eq!(items.span_of(3), None);
        assert!(items.column_count() <= 0);
        assert_eq!(items.column_spacing(), 6);
        assert_eq!(items.item_id(9), Some(9));
        assert_eq!(items.item_id(10), None);
    }
}
