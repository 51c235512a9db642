//! Pixel geometry primitives.
//!
//! All coordinates are integer pixels in content space: the origin is the
//! top-left corner of the container before any scroll offset is applied.

use super::orientation::Orientation;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle with exclusive right/bottom edges.
///
/// # Invariants
/// - `left <= right` and `top <= bottom` for rectangles produced by layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub left: i32,
    /// Top edge (inclusive).
    pub top: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl Rect {
    /// Create a rectangle from its four edges.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size.
    pub const fn from_origin_size(left: i32, top: i32, size: Size) -> Self {
        Self::new(left, top, left + size.width, top + size.height)
    }

    /// Width in pixels.
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Height in pixels.
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Size of the rectangle.
    pub const fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Horizontal center, rounded toward the left edge.
    pub const fn center_x(&self) -> i32 {
        self.left + self.width() / 2
    }

    /// Vertical center, rounded toward the top edge.
    pub const fn center_y(&self) -> i32 {
        self.top + self.height() / 2
    }

    /// Strict open-interval intersection test.
    ///
    /// Rectangles that only share an edge do not intersect, and an empty
    /// rectangle intersects nothing.
    pub const fn intersects(&self, other: &Rect) -> bool {
        self.left < self.right
            && self.top < self.bottom
            && other.left < other.right
            && other.top < other.bottom
            && self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// True when `other` lies entirely inside this rectangle.
    pub const fn contains(&self, other: &Rect) -> bool {
        self.left <= other.left
            && self.top <= other.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    /// True when the point lies inside (right/bottom exclusive).
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        self.left <= x && x < self.right && self.top <= y && y < self.bottom
    }

    /// Translate by `(dx, dy)`.
    pub const fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    /// Leading edge along `orientation`'s scroll axis.
    pub const fn primary_start(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.left,
            Orientation::Vertical => self.top,
        }
    }

    /// Trailing edge along `orientation`'s scroll axis.
    pub const fn primary_end(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.right,
            Orientation::Vertical => self.bottom,
        }
    }

    /// Extent along `orientation`'s scroll axis.
    pub const fn primary_extent(&self, orientation: Orientation) -> i32 {
        self.primary_end(orientation) - self.primary_start(orientation)
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Size {
    /// The zero size.
    pub const ZERO: Size = Size::new(0, 0);

    /// Create a size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero or negative.
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Extent along the scroll axis of `orientation`.
    pub const fn primary(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// Extent across the scroll axis of `orientation`.
    pub const fn secondary(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.height,
            Orientation::Vertical => self.width,
        }
    }
}

/// Padding on each side of the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Insets {
    /// Left padding.
    pub left: i32,
    /// Top padding.
    pub top: i32,
    /// Right padding.
    pub right: i32,
    /// Bottom padding.
    pub bottom: i32,
}

impl Insets {
    /// Create insets.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Same padding on all four sides.
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Padding before content on the scroll axis.
    pub const fn primary_start(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.left,
            Orientation::Vertical => self.top,
        }
    }

    /// Padding after content on the scroll axis.
    pub const fn primary_end(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.right,
            Orientation::Vertical => self.bottom,
        }
    }

    /// Total horizontal padding.
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Total vertical padding.
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// Item placement rectangle for one adapter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemGeometry {
    /// Adapter position.
    pub index: usize,
    /// Rectangle in content coordinates.
    pub rect: Rect,
}
