//! Input events the grid understands, independent of any key binding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// D-pad direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards smaller x.
    Left,
    /// Towards larger x.
    Right,
    /// Towards smaller y.
    Up,
    /// Towards larger y.
    Down,
}

impl Direction {
    /// True for `Left` and `Right`.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True for `Right` and `Down`, the directions of increasing coordinates.
    pub const fn is_forward(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        f.write_str(name)
    }
}

/// A key event as delivered to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyInput {
    /// D-pad movement.
    Direction(Direction),
    /// Confirm/OK on the focused item.
    Activate,
    /// Any other key, identified by a host-defined code.
    Other(u32),
}

/// Pointer/motion events forwarded to the interception hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerInput {
    /// Touch or click at a point in view coordinates.
    Touch {
        /// x in view pixels.
        x: i32,
        /// y in view pixels.
        y: i32,
    },
    /// Generic motion, e.g. a scroll wheel, in pixels along each axis.
    Motion {
        /// Horizontal delta.
        dx: i32,
        /// Vertical delta.
        dy: i32,
    },
}

/// Whether an input event was consumed by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The grid consumed the event.
    Handled,
    /// The event should propagate to the grid's parent.
    Unhandled,
}

impl KeyOutcome {
    /// Build from a consumed flag.
    pub const fn from_consumed(consumed: bool) -> Self {
        if consumed {
            KeyOutcome::Handled
        } else {
            KeyOutcome::Unhandled
        }
    }

    /// True for [`KeyOutcome::Handled`].
    pub const fn is_handled(self) -> bool {
        matches!(self, KeyOutcome::Handled)
    }
}

/// Domain-level actions of the terminal demo that can be bound to keys.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Move focus. Default: arrow keys / h j k l
    Move(Direction),
    /// Activate the focused item. Default: Enter/Space
    Activate,
    /// Jump to the first item. Default: g/Home
    SelectFirst,
    /// Jump to the last item. Default: G/End
    SelectLast,
    /// Switch between horizontal and vertical scrolling. Default: o
    ToggleOrientation,
    /// Cycle Aligned → ItemVisible → Page. Default: s
    CycleStrategy,
    /// Quit the demo. Default: q/Ctrl+c
    Quit,
}
