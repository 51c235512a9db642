//! Time-driven animation (pure).
//!
//! Ticks carry the current time as a [`std::time::Duration`] measured from
//! an arbitrary epoch; nothing here reads a clock.

pub mod coordinator;
pub mod easing;
pub mod focus;
pub mod scroll;

pub use coordinator::{Frame, ScrollCoordinator, Transition, ZoomFactor};
pub use easing::{accelerate_decelerate, decelerate, linear, EasingFn};
pub use focus::{
    scale_for, FocusAnimationState, FocusAnimations, DEFAULT_SELECT_SCALE, HIGHLIGHT_DURATION,
};
pub use scroll::{SmoothScroll, FOCUS_MOVE_DURATION};
