//! Grid container facade.
//!
//! Composes a layout engine, the selection state machine and the animation
//! coordinator behind one widget API. The container holds no geometry of
//! its own; everything spatial is delegated to the engine.

pub mod grid_view;
pub mod saved_state;

pub use grid_view::{GridView, KeyInterceptor, PointerInterceptor, DEFAULT_PREFETCH_EXTENT};
pub use saved_state::SavedState;
