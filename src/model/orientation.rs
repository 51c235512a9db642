//! Scroll orientation and secondary-axis gravity.

use super::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scroll axis of the container.
///
/// Horizontal grids scroll left/right and stack `lanes` rows; vertical grids
/// scroll up/down and stack `lanes` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Scrolls along the x axis.
    #[default]
    Horizontal,
    /// Scrolls along the y axis.
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub const fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// True for [`Orientation::Horizontal`].
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Orientation::Horizontal)
    }
}

/// Integer encoding used by hosts that store options as numbers (0 = horizontal, 1 = vertical).
impl TryFrom<i32> for Orientation {
    type Error = GridError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Orientation::Horizontal),
            1 => Ok(Orientation::Vertical),
            other => Err(GridError::InvalidConfiguration {
                field: "orientation",
                reason: format!("unknown orientation value {other}"),
            }),
        }
    }
}

impl FromStr for Orientation {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Orientation::Horizontal),
            "vertical" | "v" => Ok(Orientation::Vertical),
            other => Err(GridError::InvalidConfiguration {
                field: "orientation",
                reason: format!("unknown orientation '{other}'"),
            }),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "horizontal"),
            Orientation::Vertical => write!(f, "vertical"),
        }
    }
}

/// Horizontal component of [`Gravity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HorizontalGravity {
    /// Align to the left edge.
    #[default]
    Start,
    /// Center horizontally.
    CenterHorizontal,
    /// Align to the right edge.
    End,
}

/// Vertical component of [`Gravity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalGravity {
    /// Align to the top edge.
    #[default]
    Top,
    /// Center vertically.
    CenterVertical,
    /// Align to the bottom edge.
    Bottom,
}

/// Alignment of the lane block on the secondary axis.
///
/// Only the component across the scroll axis is consulted: vertical gravity
/// for horizontal grids, horizontal gravity for vertical grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Gravity {
    /// Placement along x.
    pub horizontal: HorizontalGravity,
    /// Placement along y.
    pub vertical: VerticalGravity,
}

impl Gravity {
    /// Build gravity from both components.
    pub const fn new(horizontal: HorizontalGravity, vertical: VerticalGravity) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Offset of a block of `content` pixels inside `available` pixels on the
    /// axis across `orientation`.
    ///
    /// Returns 0 for start alignment. Overflowing content is never shifted
    /// before the start edge.
    pub fn secondary_offset(&self, orientation: Orientation, available: i32, content: i32) -> i32 {
        let free = (available - content).max(0);
        let fraction = match orientation {
            Orientation::Horizontal => match self.vertical {
                VerticalGravity::Top => 0,
                VerticalGravity::CenterVertical => 1,
                VerticalGravity::Bottom => 2,
            },
            Orientation::Vertical => match self.horizontal {
                HorizontalGravity::Start => 0,
                HorizontalGravity::CenterHorizontal => 1,
                HorizontalGravity::End => 2,
            },
        };
        free * fraction / 2
    }
}

impl FromStr for Gravity {
    type Err = GridError;

    /// Parse a `|`-separated combination such as `"bottom|center-horizontal"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut gravity = Gravity::default();
        for token in s.split('|').map(str::trim).filter(|t| !t.is_empty()) {
            match token.to_ascii_lowercase().as_str() {
                "start" => gravity.horizontal = HorizontalGravity::Start,
                "end" => gravity.horizontal = HorizontalGravity::End,
                "center-horizontal" | "center_horizontal" => {
                    gravity.horizontal = HorizontalGravity::CenterHorizontal
                }
                "top" => gravity.vertical = VerticalGravity::Top,
                "bottom" => gravity.vertical = VerticalGravity::Bottom,
                "center-vertical" | "center_vertical" => {
                    gravity.vertical = VerticalGravity::CenterVertical
                }
                "center" => {
                    gravity.horizontal = HorizontalGravity::CenterHorizontal;
                    gravity.vertical = VerticalGravity::CenterVertical;
                }
                other => {
                    return Err(GridError::InvalidConfiguration {
                        field: "gravity",
                        reason: format!("unknown gravity flag '{other}'"),
                    })
                }
            }
        }
        Ok(gravity)
    }
}
