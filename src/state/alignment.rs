//! Scroll alignment policies.
//!
//! Given the view-space rectangle of the item about to be selected, an
//! [`AlignmentResolver`] computes how far the viewport must scroll on the
//! primary axis. Positive deltas move content towards larger offsets.

use crate::model::{Direction, GridError, Orientation, Rect};
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Focus margin used by hosts that draw a frame around the selected item.
pub const DEFAULT_FOCUS_FRAME_COMPENSATION: i32 = 22;

/// How the viewport follows the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollAlignmentPolicy {
    /// Keep the selected item centered on the primary axis.
    #[default]
    Aligned,
    /// Scroll the minimum distance that brings the item fully on screen.
    ItemVisible,
    /// Page scrolling; currently resolves exactly like `ItemVisible`.
    Page,
}

impl ScrollAlignmentPolicy {
    /// Next policy in the Aligned → ItemVisible → Page cycle.
    pub fn next(self) -> Self {
        match self {
            ScrollAlignmentPolicy::Aligned => ScrollAlignmentPolicy::ItemVisible,
            ScrollAlignmentPolicy::ItemVisible => ScrollAlignmentPolicy::Page,
            ScrollAlignmentPolicy::Page => ScrollAlignmentPolicy::Aligned,
        }
    }

    /// True for the policies that prefetch one extra item past the trailing edge.
    pub fn prefetches(self) -> bool {
        !matches!(self, ScrollAlignmentPolicy::Aligned)
    }
}

/// Integer encoding used by hosts that store options as numbers
/// (0 = aligned, 1 = item visible, 2 = page).
impl TryFrom<i32> for ScrollAlignmentPolicy {
    type Error = GridError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ScrollAlignmentPolicy::Aligned),
            1 => Ok(ScrollAlignmentPolicy::ItemVisible),
            2 => Ok(ScrollAlignmentPolicy::Page),
            other => Err(GridError::invalid(
                "focus_scroll_strategy",
                format!("unknown strategy value {other}"),
            )),
        }
    }
}

impl FromStr for ScrollAlignmentPolicy {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "aligned" => Ok(ScrollAlignmentPolicy::Aligned),
            "item-visible" | "item" | "itemvisible" => Ok(ScrollAlignmentPolicy::ItemVisible),
            "page" => Ok(ScrollAlignmentPolicy::Page),
            other => Err(GridError::invalid(
                "focus_scroll_strategy",
                format!("unknown strategy '{other}'"),
            )),
        }
    }
}

impl fmt::Display for ScrollAlignmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollAlignmentPolicy::Aligned => write!(f, "aligned"),
            ScrollAlignmentPolicy::ItemVisible => write!(f, "item-visible"),
            ScrollAlignmentPolicy::Page => write!(f, "page"),
        }
    }
}

/// The client area on the primary axis, in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSpan {
    /// Scroll axis.
    pub orientation: Orientation,
    /// Leading padding edge.
    pub start: i32,
    /// Trailing padding edge.
    pub end: i32,
}

impl ClientSpan {
    /// Client span of `viewport`.
    pub fn of(viewport: &Viewport) -> Self {
        let (start, end) = viewport.client_bounds();
        Self {
            orientation: viewport.orientation(),
            start,
            end,
        }
    }

    /// `end - start`.
    pub fn size(&self) -> i32 {
        self.end - self.start
    }
}

/// Resolves scroll deltas for a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlignmentResolver {
    /// Active policy.
    pub policy: ScrollAlignmentPolicy,
    /// Margin kept between the item and the padding edges under the
    /// `ItemVisible`/`Page` policies. 0 disables compensation.
    pub compensation: i32,
}

impl AlignmentResolver {
    /// Resolver for `policy` without compensation.
    pub fn new(policy: ScrollAlignmentPolicy) -> Self {
        Self {
            policy,
            compensation: 0,
        }
    }

    /// Set the focus-frame compensation margin.
    pub fn with_compensation(mut self, compensation: i32) -> Self {
        self.compensation = compensation.max(0);
        self
    }

    /// Primary-axis scroll needed to satisfy the policy for `target`
    /// (view coordinates), given the direction of the move that selected it.
    pub fn scroll_delta(&self, target: Rect, client: ClientSpan, incoming: Option<Direction>) -> i32 {
        match self.policy {
            ScrollAlignmentPolicy::Aligned => aligned_delta(target, client, incoming),
            ScrollAlignmentPolicy::ItemVisible | ScrollAlignmentPolicy::Page => {
                item_visible_delta(target, client, self.compensation)
            }
        }
    }
}

/// Distance from the target's primary-axis center to the client center.
///
/// Returns 0 when the move that selected the target ran across the scroll
/// axis, so moving between lanes never re-centers.
pub fn aligned_delta(target: Rect, client: ClientSpan, incoming: Option<Direction>) -> i32 {
    if let Some(direction) = incoming {
        if direction.is_horizontal() != client.orientation.is_horizontal() {
            return 0;
        }
    }
    let start = target.primary_start(client.orientation);
    let extent = target.primary_extent(client.orientation);
    start + extent / 2 - client.size() / 2 - client.start
}

/// Minimal scroll that brings the nearer out-of-bounds edge of `target` to
/// the padding edge, inset by `compensation`. Returns 0 when the target is
/// already fully inside.
pub fn item_visible_delta(target: Rect, client: ClientSpan, compensation: i32) -> i32 {
    let low = client.start + compensation;
    let high = client.end - compensation;
    let start = target.primary_start(client.orientation);
    let end = target.primary_end(client.orientation);
    if start < low {
        start - low
    } else if end > high {
        end - high
    } else {
        0
    }
}
