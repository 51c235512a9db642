//! Cell lattice placement shared by both layout engines.
//!
//! Both engines turn `(cell origin, span)` into a rectangle through
//! [`CellMetrics::span_rect`], so identical inputs always give identical
//! rectangles regardless of which engine asked.

use crate::model::{CellCoord, Orientation, Rect, Size, SpanDescriptor};

/// Base cell size for a span grid `available_width` pixels wide.
///
/// `column_count` cells and `column_count - 1` gaps share the width; the
/// height follows from `aspect_ratio` (width / height). Returns
/// [`Size::ZERO`] when `column_count <= 0`, which selects fixed-row mode.
///
/// # Examples
/// ```
/// use tvgrid::layout::cell::compute_base_cell_size;
/// use tvgrid::model::Size;
///
/// assert_eq!(compute_base_cell_size(1000, 4, 20, 2.0), Size::new(235, 117));
/// assert_eq!(compute_base_cell_size(1000, 0, 20, 2.0), Size::ZERO);
/// ```
pub fn compute_base_cell_size(
    available_width: i32,
    column_count: i32,
    column_spacing: i32,
    aspect_ratio: f32,
) -> Size {
    if column_count <= 0 {
        return Size::ZERO;
    }
    let gaps = (column_count - 1).saturating_mul(column_spacing);
    let width = available_width.saturating_sub(gaps) / column_count;
    if width <= 0 {
        return Size::ZERO;
    }
    let height = if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
        (width as f32 / aspect_ratio) as i32
    } else {
        width
    };
    Size::new(width, height)
}

/// Converts a lattice index to pixels, saturating instead of overflowing.
fn px(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// Pixel metrics of a cell lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellMetrics {
    /// Content-space position of cell (0, 0).
    pub origin_x: i32,
    /// Content-space position of cell (0, 0).
    pub origin_y: i32,
    /// Size of a 1x1 cell.
    pub cell: Size,
    /// Gap between rows.
    pub row_spacing: i32,
    /// Gap between columns.
    pub column_spacing: i32,
}

impl CellMetrics {
    /// Rectangle of an item whose top-left cell is `origin`.
    pub fn span_rect(&self, origin: CellCoord, row_span: u32, column_span: u32) -> Rect {
        let column_span = px(column_span.max(1) as usize);
        let row_span = px(row_span.max(1) as usize);
        let pitch_x = self.cell.width.saturating_add(self.column_spacing);
        let pitch_y = self.cell.height.saturating_add(self.row_spacing);
        let left = self.origin_x.saturating_add(px(origin.column).saturating_mul(pitch_x));
        let top = self.origin_y.saturating_add(px(origin.row).saturating_mul(pitch_y));
        let width = column_span
            .saturating_mul(self.cell.width)
            .saturating_add((column_span - 1).saturating_mul(self.column_spacing));
        let height = row_span
            .saturating_mul(self.cell.height)
            .saturating_add((row_span - 1).saturating_mul(self.row_spacing));
        Rect::new(left, top, left.saturating_add(width), top.saturating_add(height))
    }

    /// Rectangle of `span` on a lattice of `lanes` across `orientation`.
    pub fn place(&self, span: SpanDescriptor, orientation: Orientation, lanes: usize) -> Rect {
        self.span_rect(span.origin(orientation, lanes), span.row_span, span.column_span)
    }

    /// Rectangle of the `index`-th 1x1 item in lane-first order.
    pub fn place_sequential(&self, index: usize, orientation: Orientation, lanes: usize) -> Rect {
        self.span_rect(CellCoord::from_cell_index(index, orientation, lanes), 1, 1)
    }

    /// Spacing between neighbouring cells along the scroll axis.
    pub fn primary_spacing(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.column_spacing,
            Orientation::Vertical => self.row_spacing,
        }
    }

    /// Spacing between neighbouring lanes.
    pub fn secondary_spacing(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.row_spacing,
            Orientation::Vertical => self.column_spacing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_cell_divides_width_after_spacing() {
        assert_eq!(compute_base_cell_size(1000, 4, 20, 1.0), Size::new(235, 235));
    }

    #[test]
    fn non_positive_columns_select_fixed_row_mode() {
        assert_eq!(compute_base_cell_size(1000, -3, 20, 1.0), Size::ZERO);
    }

    #[test]
    fn spacing_larger_than_width_gives_zero_cells() {
        assert_eq!(compute_base_cell_size(50, 4, 40, 1.0), Size::ZERO);
    }

    #[test]
    fn bad_aspect_ratio_falls_back_to_square() {
        assert_eq!(compute_base_cell_size(100, 1, 0, 0.0), Size::new(100, 100));
    }

    #[test]
    fn span_covers_interior_gaps() {
        let metrics = CellMetrics {
            origin_x: 10,
            origin_y: 5,
            cell: Size::new(100, 50),
            row_spacing: 4,
            column_spacing: 8,
        };
        let rect = metrics.span_rect(CellCoord::new(1, 2), 2, 3);
        assert_eq!(rect, Rect::new(118, 113, 434, 217));
    }

    #[test]
    fn oversized_inputs_saturate() {
        let metrics = CellMetrics {
            cell: Size::new(100, 50),
            column_spacing: 8,
            ..CellMetrics::default()
        };
        let rect = metrics.span_rect(CellCoord::new(0, 0), 1, u32::MAX);
        assert_eq!(rect, Rect::new(0, 0, i32::MAX, 50));
        assert_eq!(compute_base_cell_size(1000, i32::MAX, 20, 1.0), Size::ZERO);
    }

    #[test]
    fn sequential_placement_packs_lanes_first() {
        let metrics = CellMetrics {
            cell: Size::new(100, 50),
            ..CellMetrics::default()
        };
        assert_eq!(
            metrics.place_sequential(3, Orientation::Horizontal, 2),
            Rect::new(100, 50, 200, 100)
        );
        assert_eq!(
            metrics.place_sequential(3, Orientation::Vertical, 2),
            Rect::new(100, 50, 200, 100)
        );
        assert_eq!(
            metrics.place_sequential(2, Orientation::Vertical, 2),
            Rect::new(0, 50, 100, 100)
        );
    }
}
