//! Terminal geometry constants.
//!
//! The grid core works in pixels; the terminal host maps each cell to a
//! fixed pixel block.

use crate::model::Size;
use std::time::Duration;

/// Pixels covered by one terminal column.
pub const PIXELS_PER_COLUMN: i32 = 10;

/// Pixels covered by one terminal row (terminal cells are about 2.5x taller
/// than wide).
pub const PIXELS_PER_ROW: i32 = 25;

/// Natural size of a demo tile in pixels (20x4 cells).
pub const TILE_SIZE: Size = Size::new(200, 100);

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Animation tick interval (~60fps).
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);
