//! Selection and focus state machine (pure).
//!
//! All transitions are plain functions over owned state, testable without a
//! host toolkit.

pub mod alignment;
pub mod listeners;
pub mod navigation;
pub mod selection;

// Re-export for convenience
pub use alignment::{
    AlignmentResolver, ClientSpan, ScrollAlignmentPolicy, DEFAULT_FOCUS_FRAME_COMPENSATION,
};
pub use listeners::{GridEvent, Listeners, ScrollState};
pub use navigation::{movement_for, FocusFinder, FocusOutPolicy, SpatialFocusFinder};
pub use selection::{PendingDirection, SelectionPhase, SelectionState};
