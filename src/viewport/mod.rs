//! Viewport state and view recycling (pure core plus host seam).
//!
//! This module owns the scroll position of the container and the set of
//! materialized item views:
//! - [`Viewport`] - primary offset, container size and the offset clamp
//! - [`compute_display_rect`] - the content-space window items must intersect
//! - [`ViewHost`] - the view materialization interface a host implements
//! - [`AttachedViews`] - index → view map with direction-ordered recycling
//! - [`HeadlessHost`] - recording host for tests, benches and headless use

pub mod headless;
pub mod recycler;

pub use headless::{HeadlessHost, HostEvent};
pub use recycler::{AttachedViews, MeasureSpec, ScrollDirection, ViewHost};

use crate::model::{Insets, Orientation, Rect, Size};

/// Extra content-space margin added around the display window on the
/// scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Expansion {
    /// Pixels added before the leading edge.
    pub before: i32,
    /// Pixels added after the trailing edge.
    pub after: i32,
}

impl Expansion {
    /// No expansion.
    pub const NONE: Expansion = Expansion::new(0, 0);

    /// Create an expansion.
    pub const fn new(before: i32, after: i32) -> Self {
        Self { before, after }
    }

    /// Combine two expansions by adding their margins.
    pub const fn plus(self, other: Expansion) -> Self {
        Self::new(self.before + other.before, self.after + other.after)
    }
}

/// Content-space window covered by the container at `offset`.
///
/// The window spans the whole container (padding included) on both axes,
/// shifted by `offset` on the scroll axis and widened by `expansion` there.
/// Items are attached exactly when their rectangle strictly intersects it.
pub fn compute_display_rect(
    offset: i32,
    container: Size,
    orientation: Orientation,
    expansion: Expansion,
) -> Rect {
    let start = offset - expansion.before;
    let end = offset + container.primary(orientation) + expansion.after;
    match orientation {
        Orientation::Horizontal => Rect::new(start, 0, end, container.height),
        Orientation::Vertical => Rect::new(0, start, container.width, end),
    }
}

/// Scroll state of the container.
///
/// # Invariants
/// - `0 <= offset <= max_scroll()` after every mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    orientation: Orientation,
    size: Size,
    padding: Insets,
    offset: i32,
    content_extent: i32,
}

impl Viewport {
    /// An unmeasured viewport at offset 0.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            size: Size::ZERO,
            padding: Insets::default(),
            offset: 0,
            content_extent: 0,
        }
    }

    /// Scroll axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Change the scroll axis and reset the offset.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.offset = 0;
    }

    /// Container size including padding.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Container padding.
    pub fn padding(&self) -> Insets {
        self.padding
    }

    /// Record a new container size and padding, re-clamping the offset.
    pub fn resize(&mut self, size: Size, padding: Insets) {
        self.size = size;
        self.padding = padding;
        self.clamp_offset();
    }

    /// True once a non-empty size has been recorded.
    pub fn is_measured(&self) -> bool {
        !self.size.is_empty()
    }

    /// Current primary offset.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Space between the padding edges on the scroll axis.
    pub fn client_size(&self) -> i32 {
        let padding = self.padding.primary_start(self.orientation)
            + self.padding.primary_end(self.orientation);
        (self.size.primary(self.orientation) - padding).max(0)
    }

    /// Content length on the scroll axis, measured from the leading padding edge.
    pub fn content_extent(&self) -> i32 {
        self.content_extent
    }

    /// Record the content length and re-clamp the offset.
    pub fn set_content_extent(&mut self, extent: i32) {
        self.content_extent = extent.max(0);
        self.clamp_offset();
    }

    /// Largest reachable offset: `max(0, content_extent - client_size)`.
    pub fn max_scroll(&self) -> i32 {
        (self.content_extent - self.client_size()).max(0)
    }

    /// Portion of `delta` that keeps the offset within bounds.
    pub fn clamp_delta(&self, delta: i32) -> i32 {
        let target = self.offset.saturating_add(delta).clamp(0, self.max_scroll());
        target - self.offset
    }

    /// Scroll by `delta`, returning the distance actually moved.
    pub fn scroll_by(&mut self, delta: i32) -> i32 {
        let applied = self.clamp_delta(delta);
        self.offset += applied;
        applied
    }

    /// Jump to `offset`, clamped.
    pub fn set_offset(&mut self, offset: i32) {
        self.offset = offset.clamp(0, self.max_scroll());
    }

    /// Content-space display window with `expansion`.
    pub fn display_rect(&self, expansion: Expansion) -> Rect {
        compute_display_rect(self.offset, self.size, self.orientation, expansion)
    }

    /// Map a content-space rectangle to view coordinates.
    pub fn to_view(&self, rect: Rect) -> Rect {
        match self.orientation {
            Orientation::Horizontal => rect.offset(-self.offset, 0),
            Orientation::Vertical => rect.offset(0, -self.offset),
        }
    }

    /// Leading and trailing padding edges on the scroll axis, in view coordinates.
    pub fn client_bounds(&self) -> (i32, i32) {
        let low = self.padding.primary_start(self.orientation);
        (low, low + self.client_size())
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.clamp(0, self.max_scroll());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measured(extent: i32) -> Viewport {
        let mut viewport = Viewport::new(Orientation::Horizontal);
        viewport.resize(Size::new(1000, 400), Insets::new(50, 0, 50, 0));
        viewport.set_content_extent(extent);
        viewport
    }

    mod clamping {
        use super::*;

        #[test]
        fn forward_scroll_stops_at_max() {
            let mut viewport = measured(2000);
            assert_eq!(viewport.max_scroll(), 1100);
            viewport.set_offset(1000);
            assert_eq!(viewport.scroll_by(500), 100);
            assert_eq!(viewport.offset(), 1100);
        }

        #[test]
        fn backward_scroll_stops_at_zero() {
            let mut viewport = measured(2000);
            viewport.set_offset(30);
            assert_eq!(viewport.scroll_by(-100), -30);
            assert_eq!(viewport.offset(), 0);
        }

        #[test]
        fn short_content_cannot_scroll() {
            let mut viewport = measured(600);
            assert_eq!(viewport.max_scroll(), 0);
            assert_eq!(viewport.scroll_by(10), 0);
        }

        #[test]
        fn shrinking_content_pulls_offset_back() {
            let mut viewport = measured(2000);
            viewport.set_offset(1100);
            viewport.set_content_extent(1200);
            assert_eq!(viewport.offset(), 300);
        }
    }

    mod display {
        use super::*;

        #[test]
        fn horizontal_window_follows_offset() {
            let rect = compute_display_rect(
                200,
                Size::new(1000, 400),
                Orientation::Horizontal,
                Expansion::new(0, 110),
            );
            assert_eq!(rect, Rect::new(200, 0, 1310, 400));
        }

        #[test]
        fn vertical_window_expands_both_edges() {
            let rect = compute_display_rect(
                100,
                Size::new(800, 600),
                Orientation::Vertical,
                Expansion::new(15, 15),
            );
            assert_eq!(rect, Rect::new(0, 85, 800, 715));
        }

        #[test]
        fn to_view_subtracts_offset_on_scroll_axis() {
            let mut viewport = measured(2000);
            viewport.set_offset(120);
            assert_eq!(
                viewport.to_view(Rect::new(200, 10, 300, 90)),
                Rect::new(80, 10, 180, 90)
            );
        }

        #[test]
        fn client_bounds_sit_inside_padding() {
            assert_eq!(measured(0).client_bounds(), (50, 950));
        }
    }
}
