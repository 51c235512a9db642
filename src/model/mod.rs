//! Domain model types (pure).
//!
//! Geometry, spans, orientation, input events and the error taxonomy. All
//! types in this module are plain data.

pub mod error;
pub mod geometry;
pub mod identifiers;
pub mod key_action;
pub mod orientation;
pub mod span;

// Re-export for convenience
pub use error::GridError;
pub use geometry::{Insets, ItemGeometry, Rect, Size};
pub use identifiers::{SubscriptionId, ViewHandle};
pub use key_action::{Direction, KeyAction, KeyInput, KeyOutcome, PointerInput};
pub use orientation::{Gravity, HorizontalGravity, Orientation, VerticalGravity};
pub use span::{CellCoord, SpanDescriptor};
