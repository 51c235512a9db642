//! Items with explicit cell spans.

use super::ItemProvider;
use crate::model::{GridError, SpanDescriptor};

/// Default gap between rows and columns of a span grid.
pub const DEFAULT_SPACING: i32 = 15;

/// Item list for irregular grids.
///
/// Each described item carries its own [`SpanDescriptor`]. The list may
/// hold more items than descriptors; trailing items without span data are
/// 1x1 and continue at the cells following the last described item.
#[derive(Debug, Clone, PartialEq)]
pub struct GridItems {
    spans: Vec<SpanDescriptor>,
    count: usize,
    row_spacing: i32,
    column_spacing: i32,
    columns: i32,
    aspect_ratio: f32,
}

impl GridItems {
    /// Create a span grid with `columns` cells across the container width.
    ///
    /// # Errors
    /// `InvalidConfiguration` when a spacing is negative or the aspect ratio
    /// is not a positive finite number.
    pub fn new(
        row_spacing: i32,
        column_spacing: i32,
        columns: i32,
        aspect_ratio: f32,
    ) -> Result<Self, GridError> {
        if row_spacing < 0 || column_spacing < 0 {
            return Err(GridError::invalid("spacing", "spacing cannot be negative"));
        }
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return Err(GridError::invalid(
                "aspect_ratio",
                format!("{aspect_ratio} is not a positive number"),
            ));
        }
        Ok(Self {
            spans: Vec::new(),
            count: 0,
            row_spacing,
            column_spacing,
            columns,
            aspect_ratio,
        })
    }

    /// Append an item with span data.
    pub fn push(&mut self, span: SpanDescriptor) {
        // Keep described items ahead of undescribed ones.
        let undescribed = self.count - self.spans.len();
        self.spans.push(span);
        self.count = self.spans.len() + undescribed;
    }

    /// Append `n` items without span data.
    pub fn push_undescribed(&mut self, n: usize) {
        self.count += n;
    }

    /// Builder form of [`GridItems::push`] for a batch of spans.
    pub fn with_spans(mut self, spans: impl IntoIterator<Item = SpanDescriptor>) -> Self {
        for span in spans {
            self.push(span);
        }
        self
    }

    /// Drop every item beyond the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.spans.truncate(len);
        self.count = self.count.min(len);
    }

    /// Remove all items.
    pub fn clear(&mut self) {
        self.spans.clear();
        self.count = 0;
    }

    /// Number of items that carry span data.
    pub fn described_len(&self) -> usize {
        self.spans.len()
    }

    fn fallback_span(&self, index: usize) -> SpanDescriptor {
        match self.spans.last() {
            Some(last) => {
                let past_last = index + 1 - self.spans.len();
                SpanDescriptor::single(last.start_cell_index + past_last)
            }
            None => SpanDescriptor::single(index),
        }
    }
}

impl ItemProvider for GridItems {
    fn item_count(&self) -> usize {
        self.count
    }

    fn span_of(&self, index: usize) -> Option<SpanDescriptor> {
        if index >= self.count {
            return None;
        }
        Some(
            self.spans
                .get(index)
                .copied()
                .unwrap_or_else(|| self.fallback_span(index)),
        )
    }

    fn column_count(&self) -> i32 {
        self.columns
    }

    fn row_spacing(&self) -> i32 {
        self.row_spacing
    }

    fn column_spacing(&self) -> i32 {
        self.column_spacing
    }

    fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
}
