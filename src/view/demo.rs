//! Demo grids shown by the terminal host.

use super::TuiError;
use crate::config::GridOptions;
use crate::container::GridView;
use crate::layout::{GridLayout, LayoutEngine, ModuleLayout};
use crate::model::Orientation;
use crate::source::{ItemProvider, LayoutFileError, RowDefinition, TableModule, UniformItems};
use std::path::{Path, PathBuf};
use tracing::info;

/// Row definition used by the irregular demo when no `--layout` is given.
const IRREGULAR_LAYOUT: &str = include_str!("../../demos/irregular.json");

/// Module demo tiles: start cell, row span and column span per item.
const MODULE_STARTS: [usize; 17] = [0, 1, 3, 7, 8, 9, 11, 12, 13, 14, 20, 21, 22, 23, 25, 26, 27];
const MODULE_ROW_SPANS: [u32; 17] = [2, 2, 1, 1, 1, 1, 1, 2, 2, 2, 2, 1, 1, 1, 1, 1, 1];
const MODULE_COLUMN_SPANS: [u32; 17] = [1, 2, 1, 1, 1, 2, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1];

/// Columns of the module demo.
pub const MODULE_COLUMNS: usize = 4;

/// Focused-item scale of the carousel demo.
pub const CAROUSEL_SCALE: f32 = 1.08;

/// Which demo grid to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Demo {
    /// Uniform tiles in two rows.
    #[default]
    Regular,
    /// Span tiles from a JSON row definition.
    Irregular,
    /// Fixed-size module tiles, four columns, scrolling vertically.
    Module,
    /// A single row with a larger focus scale.
    Carousel,
}

impl Demo {
    /// Title shown in the status bar.
    pub fn title(self) -> &'static str {
        match self {
            Demo::Regular => "regular",
            Demo::Irregular => "irregular",
            Demo::Module => "module",
            Demo::Carousel => "carousel",
        }
    }
}

/// Build the grid for `demo`.
///
/// Returns the grid together with the options it should run with: each demo
/// pins the values that define it (the module demo is always vertical with
/// four columns, the carousel always has one row) and keeps the rest of
/// `options`.
///
/// # Errors
/// `Layout` when the row definition cannot be loaded, `Grid` when it
/// describes an impossible grid.
pub fn build_demo(
    demo: Demo,
    options: &GridOptions,
    items: usize,
    layout_file: Option<&Path>,
) -> Result<(GridView, GridOptions), TuiError> {
    let mut options = *options;
    let (engine, provider): (Box<dyn LayoutEngine>, Box<dyn ItemProvider>) = match demo {
        Demo::Regular => (
            Box::new(GridLayout::new(options.orientation, options.lanes)?),
            Box::new(UniformItems::new(items)),
        ),
        Demo::Carousel => {
            options.lanes = 1;
            options.selected_scale = options.selected_scale.max(CAROUSEL_SCALE);
            (
                Box::new(GridLayout::new(options.orientation, 1)?),
                Box::new(UniformItems::new(items)),
            )
        }
        Demo::Irregular => {
            let row = match layout_file {
                Some(path) => RowDefinition::load(path)?,
                None => RowDefinition::from_json_str(IRREGULAR_LAYOUT).map_err(|source| {
                    LayoutFileError::Parse {
                        path: PathBuf::from("demos/irregular.json"),
                        source,
                    }
                })?,
            };
            options.lanes = row.lanes(options.orientation);
            let grid_items = row.to_grid_items(options.orientation)?;
            (
                Box::new(GridLayout::new(options.orientation, options.lanes)?),
                Box::new(grid_items),
            )
        }
        Demo::Module => {
            options.orientation = Orientation::Vertical;
            options.lanes = MODULE_COLUMNS;
            let tiles =
                TableModule::from_tables(&MODULE_STARTS, &MODULE_ROW_SPANS, &MODULE_COLUMN_SPANS)
                    .with_spacing(15, 15);
            let count = tiles.len();
            (
                Box::new(ModuleLayout::new(
                    tiles,
                    Orientation::Vertical,
                    MODULE_COLUMNS,
                    options.module_cell_size,
                )?),
                Box::new(UniformItems::new(count)),
            )
        }
    };

    info!(
        demo = demo.title(),
        lanes = options.lanes,
        orientation = %options.orientation,
        "demo grid built"
    );
    Ok((GridView::new(engine).with_provider(provider), options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_irregular_layout_parses() {
        let row = RowDefinition::from_json_str(IRREGULAR_LAYOUT).unwrap();
        assert_eq!(row.lanes(Orientation::Horizontal), 2);
        assert!(row.to_grid_items(Orientation::Horizontal).is_ok());
    }

    #[test]
    fn module_demo_is_vertical_with_four_columns() {
        let (grid, options) = build_demo(Demo::Module, &GridOptions::default(), 50, None).unwrap();
        assert_eq!(options.orientation, Orientation::Vertical);
        assert_eq!(grid.orientation(), Orientation::Vertical);
        assert_eq!(grid.lanes(), 4);
        assert_eq!(grid.item_count(), 17);
    }

    #[test]
    fn carousel_has_one_row_and_larger_scale() {
        let (grid, options) = build_demo(Demo::Carousel, &GridOptions::default(), 30, None).unwrap();
        assert_eq!(grid.lanes(), 1);
        assert_eq!(options.lanes, 1);
        assert!((options.selected_scale - CAROUSEL_SCALE).abs() < 1e-6);
        assert_eq!(grid.item_count(), 30);
    }

    #[test]
    fn missing_layout_file_is_an_error() {
        let result = build_demo(
            Demo::Irregular,
            &GridOptions::default(),
            0,
            Some(Path::new("/nonexistent/layout.json")),
        );
        assert!(matches!(result, Err(TuiError::Layout(_))));
    }
}
