//! Per-item cell spans for irregular layouts.

use super::orientation::Orientation;
use serde::{Deserialize, Serialize};

/// Placement of one item on the cell lattice.
///
/// Cells are numbered lane-first: for a horizontal grid with `lanes` rows,
/// cell `n` sits at column `n / lanes`, row `n % lanes`; for a vertical grid
/// with `lanes` columns, at column `n % lanes`, row `n / lanes`.
///
/// # Invariants
/// - `row_span >= 1` and `column_span >= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpanDescriptor {
    /// Index of the top-left cell the item occupies.
    pub start_cell_index: usize,
    /// Number of rows covered.
    pub row_span: u32,
    /// Number of columns covered.
    pub column_span: u32,
}

impl SpanDescriptor {
    /// Create a descriptor, raising zero spans to 1.
    pub fn new(start_cell_index: usize, row_span: u32, column_span: u32) -> Self {
        Self {
            start_cell_index,
            row_span: row_span.max(1),
            column_span: column_span.max(1),
        }
    }

    /// A 1x1 item at `start_cell_index`.
    pub fn single(start_cell_index: usize) -> Self {
        Self::new(start_cell_index, 1, 1)
    }

    /// Column/row of the top-left cell for a lattice of `lanes` across `orientation`.
    pub fn origin(&self, orientation: Orientation, lanes: usize) -> CellCoord {
        CellCoord::from_cell_index(self.start_cell_index, orientation, lanes)
    }
}

/// Column and row of a lattice cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellCoord {
    /// Zero-based column (x) index.
    pub column: usize,
    /// Zero-based row (y) index.
    pub row: usize,
}

impl CellCoord {
    /// Create a coordinate.
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Decode a lane-first cell index. `lanes` of 0 is treated as 1.
    pub fn from_cell_index(index: usize, orientation: Orientation, lanes: usize) -> Self {
        let lanes = lanes.max(1);
        match orientation {
            Orientation::Horizontal => Self::new(index / lanes, index % lanes),
            Orientation::Vertical => Self::new(index % lanes, index / lanes),
        }
    }

    /// Encode back to a lane-first cell index.
    pub fn to_cell_index(&self, orientation: Orientation, lanes: usize) -> usize {
        let lanes = lanes.max(1);
        match orientation {
            Orientation::Horizontal => self.column * lanes + self.row,
            Orientation::Vertical => self.row * lanes + self.column,
        }
    }
}
