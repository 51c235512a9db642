//! Selection/focus state machine.
//!
//! Holds the focused index and the phase of any in-flight transition. The
//! phase replaces ad hoc "in layout / in selection / in scroll" flags: a
//! transition that conflicts with the current phase is rejected instead of
//! re-entering.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Movement requested by the last directional key, relative to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PendingDirection {
    /// No directional key pending.
    #[default]
    None,
    /// Towards lower indices along the scroll axis.
    Prev,
    /// Towards higher indices along the scroll axis.
    Next,
    /// One lane back across the scroll axis.
    PrevRow,
    /// One lane forward across the scroll axis.
    NextRow,
}

/// What the selection machine is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPhase {
    /// Nothing in flight.
    #[default]
    Idle,
    /// A scroll that brings `target` into place is running.
    ScrollingToSelection {
        /// Index that becomes focused when the scroll ends.
        target: usize,
    },
    /// The highlight is moving between two items.
    AnimatingFocusMove {
        /// Previously focused item.
        from: Option<usize>,
        /// Item that becomes focused when the animation ends.
        to: usize,
    },
}

impl SelectionPhase {
    /// Index that will become focused when the current phase completes.
    pub fn target(&self) -> Option<usize> {
        match *self {
            SelectionPhase::Idle => None,
            SelectionPhase::ScrollingToSelection { target } => Some(target),
            SelectionPhase::AnimatingFocusMove { to, .. } => Some(to),
        }
    }
}

/// Focus/selection state owned by the grid container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    focused: Option<usize>,
    sub_index: usize,
    pending: PendingDirection,
    phase: SelectionPhase,
    primary_scroll_extra: i32,
    item_count: usize,
}

impl SelectionState {
    /// Nothing focused, no items.
    pub fn new() -> Self {
        Self::default()
    }

    /// Focused index, `None` when the grid is empty.
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Sub-position within the focused item.
    pub fn sub_index(&self) -> usize {
        self.sub_index
    }

    /// Last directional movement.
    pub fn pending(&self) -> PendingDirection {
        self.pending
    }

    /// Record the movement of the directional key being processed.
    pub fn set_pending(&mut self, pending: PendingDirection) {
        self.pending = pending;
    }

    /// Current phase.
    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    /// True when no transition is in flight.
    pub fn is_idle(&self) -> bool {
        self.phase == SelectionPhase::Idle
    }

    /// True while a scroll to the selection is running.
    pub fn is_scrolling(&self) -> bool {
        matches!(self.phase, SelectionPhase::ScrollingToSelection { .. })
    }

    /// Extra primary-axis scroll applied on top of the alignment delta.
    pub fn primary_scroll_extra(&self) -> i32 {
        self.primary_scroll_extra
    }

    /// Set the extra primary-axis scroll.
    pub fn set_primary_scroll_extra(&mut self, extra: i32) {
        self.primary_scroll_extra = extra;
    }

    /// Item count the state was last reconciled with.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Reconcile with a new item count.
    ///
    /// The focus is clamped to the last valid index, becomes `None` for an
    /// empty grid, and starts at 0 on the first non-empty count. Any in-flight
    /// phase is dropped when its target no longer exists. Returns true when
    /// the focused index changed.
    pub fn on_item_count_changed(&mut self, count: usize) -> bool {
        self.item_count = count;
        let before = self.focused;
        self.focused = match (count, self.focused) {
            (0, _) => None,
            (_, None) => Some(0),
            (_, Some(index)) => Some(index.min(count - 1)),
        };
        if count == 0 {
            self.sub_index = 0;
            self.pending = PendingDirection::None;
        }
        if self.phase.target().is_some_and(|target| target >= count) {
            self.phase = SelectionPhase::Idle;
        }
        if before != self.focused {
            debug!(?before, after = ?self.focused, count, "focus reconciled with item count");
        }
        before != self.focused
    }

    /// Forget the focus entirely, e.g. after the provider was replaced.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Clamp `position` to the current items. `None` when there are none.
    pub fn clamp(&self, position: usize) -> Option<usize> {
        if self.item_count == 0 {
            return None;
        }
        let clamped = position.min(self.item_count - 1);
        if clamped != position {
            warn!(position, count = self.item_count, clamped, "selection clamped");
        }
        Some(clamped)
    }

    /// Immediately focus `position` (clamped), dropping any in-flight phase.
    ///
    /// Returns the index that is now focused, `None` for an empty grid.
    pub fn select(&mut self, position: usize, sub_index: usize) -> Option<usize> {
        let index = self.clamp(position)?;
        self.focused = Some(index);
        self.sub_index = sub_index;
        self.phase = SelectionPhase::Idle;
        Some(index)
    }

    /// Enter `ScrollingToSelection`. Rejected unless idle.
    pub fn begin_scroll(&mut self, target: usize, sub_index: usize) -> bool {
        if !self.is_idle() || target >= self.item_count {
            return false;
        }
        self.sub_index = sub_index;
        self.phase = SelectionPhase::ScrollingToSelection { target };
        true
    }

    /// Enter `AnimatingFocusMove` towards `to`. Rejected unless idle.
    pub fn begin_focus_move(&mut self, to: usize) -> bool {
        if !self.is_idle() || to >= self.item_count {
            return false;
        }
        self.phase = SelectionPhase::AnimatingFocusMove {
            from: self.focused,
            to,
        };
        true
    }

    /// Complete the current phase and commit its target.
    ///
    /// Returns the newly focused index, or `None` when idle.
    pub fn finish(&mut self) -> Option<usize> {
        let target = self.phase.target()?;
        self.phase = SelectionPhase::Idle;
        self.focused = Some(target);
        Some(target)
    }
}
