//! Persistable selection state.

use serde::{Deserialize, Serialize};

/// Selected position saved across container re-creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    /// Focused index, `None` for an empty grid.
    pub selected_position: Option<usize>,
    /// Sub-position within the focused item.
    #[serde(default)]
    pub sub_position: usize,
}
