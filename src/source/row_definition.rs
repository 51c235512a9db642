//! JSON layout documents for span grids.
//!
//! A row definition lists each item's top-left cell and its size in cells:
//!
//! ```json
//! { "rowSpacing": 15, "columnSpacing": 15, "columns": 4, "aspectRatio": 1.5,
//!   "items": [ { "x": 0, "y": 0, "w": 1, "h": 2 } ] }
//! ```

use super::grid_items::{GridItems, DEFAULT_SPACING};
use crate::model::{CellCoord, GridError, Orientation, SpanDescriptor};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to load a layout document from disk.
#[derive(Debug, Error)]
pub enum LayoutFileError {
    /// The file could not be read.
    #[error("failed to read layout file {path:?}: {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid row definition.
    #[error("failed to parse layout file {path:?}: {source}")]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed but describes an impossible grid.
    #[error(transparent)]
    Invalid(#[from] GridError),
}

/// Placement of one item in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPlacement {
    /// Column of the top-left cell.
    pub x: usize,
    /// Row of the top-left cell.
    pub y: usize,
    /// Width in cells.
    #[serde(rename = "w", default = "one")]
    pub width: u32,
    /// Height in cells.
    #[serde(rename = "h", default = "one")]
    pub height: u32,
}

impl CellPlacement {
    fn is_bounded(&self) -> bool {
        self.x <= MAX_CELL_EXTENT
            && self.y <= MAX_CELL_EXTENT
            && self.width as usize <= MAX_CELL_EXTENT
            && self.height as usize <= MAX_CELL_EXTENT
    }
}

/// A span grid description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowDefinition {
    /// Gap between rows in pixels.
    #[serde(default = "default_spacing")]
    pub row_spacing: i32,
    /// Gap between columns in pixels.
    #[serde(default = "default_spacing")]
    pub column_spacing: i32,
    /// Cells across the container width.
    #[serde(default = "default_columns")]
    pub columns: i32,
    /// Cell width divided by cell height.
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: f32,
    /// Item placements in adapter order.
    #[serde(default)]
    pub items: Vec<CellPlacement>,
}

/// Largest cell position or span a document may use on either axis.
pub const MAX_CELL_EXTENT: usize = 1 << 16;

fn one() -> u32 {
    1
}

fn default_spacing() -> i32 {
    DEFAULT_SPACING
}

fn default_columns() -> i32 {
    1
}

fn default_aspect_ratio() -> f32 {
    1.0
}

impl RowDefinition {
    /// Parse a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and parse a JSON document from `path`.
    pub fn load(path: &Path) -> Result<Self, LayoutFileError> {
        let text = std::fs::read_to_string(path).map_err(|source| LayoutFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| LayoutFileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Number of lanes a grid needs to hold every item.
    ///
    /// Vertical grids use the declared column count. Horizontal grids use
    /// the lowest row any item reaches.
    pub fn lanes(&self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::Vertical => usize::try_from(self.columns).unwrap_or(0).max(1),
            Orientation::Horizontal => self
                .items
                .iter()
                .map(|item| item.y.saturating_add(item.height.max(1) as usize))
                .max()
                .unwrap_or(1),
        }
    }

    /// Convert to [`GridItems`] laid out on `orientation`.
    ///
    /// # Errors
    /// - `InvalidLayoutDefinition` when an item crosses the lane boundary or
    ///   a position or span exceeds [`MAX_CELL_EXTENT`]
    /// - `InvalidConfiguration` for negative spacing or a bad aspect ratio
    pub fn to_grid_items(&self, orientation: Orientation) -> Result<GridItems, GridError> {
        if let Some(index) = self.items.iter().position(|cell| !cell.is_bounded()) {
            return Err(GridError::InvalidLayoutDefinition(format!(
                "item {index} exceeds {MAX_CELL_EXTENT} cells"
            )));
        }
        let lanes = self.lanes(orientation);
        let mut items = GridItems::new(
            self.row_spacing,
            self.column_spacing,
            self.columns,
            self.aspect_ratio,
        )?;
        for (index, cell) in self.items.iter().enumerate() {
            let (lane, lane_span) = match orientation {
                Orientation::Horizontal => (cell.y, cell.height),
                Orientation::Vertical => (cell.x, cell.width),
            };
            if lane + lane_span.max(1) as usize > lanes {
                return Err(GridError::InvalidLayoutDefinition(format!(
                    "item {index} at ({}, {}) does not fit in {lanes} lanes",
                    cell.x, cell.y
                )));
            }
            let start = CellCoord::new(cell.x, cell.y).to_cell_index(orientation, lanes);
            items.push(SpanDescriptor::new(start, cell.height, cell.width));
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ItemProvider;

    const VERTICAL: &str = r#"{
        "rowSpacing": 10,
        "columnSpacing": 12,
        "columns": 4,
        "aspectRatio": 1.5,
        "items": [
            {"x": 0, "y": 0, "w": 1, "h": 2},
            {"x": 1, "y": 0, "w": 2, "h": 1},
            {"x": 3, "y": 0}
        ]
    }"#;

    #[test]
    fn missing_fields_take_defaults() {
        let row = RowDefinition::from_json_str("{}").unwrap();
        assert_eq!(row.row_spacing, 15);
        assert_eq!(row.column_spacing, 15);
        assert_eq!(row.columns, 1);
        assert_eq!(row.aspect_ratio, 1.0);
        assert!(row.items.is_empty());
    }

    #[test]
    fn vertical_document_maps_to_row_major_cells() {
        let row = RowDefinition::from_json_str(VERTICAL).unwrap();
        let items = row.to_grid_items(Orientation::Vertical).unwrap();
        assert_eq!(items.item_count(), 3);
        assert_eq!(items.span_of(0), Some(SpanDescriptor::new(0, 2, 1)));
        assert_eq!(items.span_of(1), Some(SpanDescriptor::new(1, 1, 2)));
        assert_eq!(items.span_of(2), Some(SpanDescriptor::new(3, 1, 1)));
        assert_eq!(items.column_spacing(), 12);
    }

    #[test]
    fn horizontal_lanes_come_from_lowest_row() {
        let row = RowDefinition::from_json_str(
            r#"{"columns": 3, "items": [{"x": 0, "y": 0, "h": 2}, {"x": 1, "y": 1}]}"#,
        )
        .unwrap();
        assert_eq!(row.lanes(Orientation::Horizontal), 2);
        let items = row.to_grid_items(Orientation::Horizontal).unwrap();
        // column 1, row 1 with two lanes
        assert_eq!(items.start_cell_index_of(1), Some(3));
    }

    #[test]
    fn item_outside_lanes_is_rejected() {
        let row = RowDefinition::from_json_str(
            r#"{"columns": 2, "items": [{"x": 1, "y": 0, "w": 2}]}"#,
        )
        .unwrap();
        assert!(matches!(
            row.to_grid_items(Orientation::Vertical),
            Err(GridError::InvalidLayoutDefinition(_))
        ));
    }

    #[test]
    fn oversized_span_is_rejected() {
        let row = RowDefinition::from_json_str(
            r#"{"columns": 4, "items": [{"x": 0, "y": 0, "w": 4000000000, "h": 1}]}"#,
        )
        .unwrap();
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            assert!(matches!(
                row.to_grid_items(orientation),
                Err(GridError::InvalidLayoutDefinition(_))
            ));
        }
    }

    #[test]
    fn far_away_position_is_rejected() {
        let row = RowDefinition::from_json_str(
            r#"{"columns": 4, "items": [{"x": 18446744073709551615, "y": 0}]}"#,
        )
        .unwrap();
        assert!(matches!(
            row.to_grid_items(Orientation::Horizontal),
            Err(GridError::InvalidLayoutDefinition(_))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let path = std::env::temp_dir().join("tvgrid_missing_layout_definition.json");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            RowDefinition::load(&path),
            Err(LayoutFileError::Read { .. })
        ));
    }
}
