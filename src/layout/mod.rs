//! Layout engines (pure core).
//!
//! A layout engine maps item index → content-space rectangle, decides which
//! items intersect the display window and keeps the host's attached views in
//! step with that set as the viewport scrolls.
//!
//! Two variants implement [`LayoutEngine`]:
//! - [`GridLayout`] - uniform grid with fixed lane count, optional per-item
//!   spans, seeded from the focused item and filled in both directions
//! - [`ModuleLayout`] - fixed-size cells driven by a
//!   [`ModuleDescriptor`](crate::source::ModuleDescriptor), laid out in index
//!   order and re-evaluated in full on every scroll step
//!
//! Both variants place items through [`cell::CellMetrics`], so equal inputs
//! give equal rectangles.

pub mod cell;
pub mod grid;
pub mod module;
pub mod rect_cache;

pub use cell::{compute_base_cell_size, CellMetrics};
pub use grid::GridLayout;
pub use module::{ModuleLayout, DEFAULT_MODULE_CELL_SIZE};
pub use rect_cache::RectCache;

use crate::model::{GridError, Gravity, Insets, ItemGeometry, Orientation, Rect, Size};
use crate::source::ItemProvider;
use crate::viewport::{AttachedViews, Expansion, MeasureSpec, ViewHost, Viewport};
use std::collections::BTreeSet;

/// Outcome of a full layout pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutReport {
    /// Focus index the pass was seeded from (`None` when there are no items).
    pub focus: Option<usize>,
    /// Indices that received a new view.
    pub attached: Vec<usize>,
    /// Indices whose view was released.
    pub recycled: Vec<usize>,
}

/// Outcome of a scroll step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollReport {
    /// Delta the caller asked for.
    pub requested: i32,
    /// Delta actually applied after clamping.
    pub applied: i32,
    /// Indices that received a new view.
    pub attached: Vec<usize>,
    /// Indices whose view was released, in release order.
    pub recycled: Vec<usize>,
}

/// Capability interface shared by both layout variants.
///
/// The engine never owns the item provider or the host; both are passed to
/// the operations that need them.
pub trait LayoutEngine {
    /// Scroll axis.
    fn orientation(&self) -> Orientation;

    /// Change the scroll axis. Clears cached geometry and resets the offset.
    fn set_orientation(&mut self, orientation: Orientation);

    /// Rows (horizontal) or columns (vertical) of the lattice.
    fn lanes(&self) -> usize;

    /// Change the lane count.
    ///
    /// # Errors
    /// `InvalidConfiguration` for 0; the previous count is kept.
    fn set_lanes(&mut self, lanes: usize) -> Result<(), GridError>;

    /// Secondary-axis alignment of the lane block. Ignored by engines
    /// without a free secondary axis.
    fn set_gravity(&mut self, _gravity: Gravity) {}

    /// Extra window length after the trailing edge, used to prefetch items.
    fn set_prefetch_extent(&mut self, extent: i32);

    /// Record the container size and padding.
    fn measure(&mut self, size: Size, padding: Insets);

    /// Full layout seeded from `focus` (0 when `None`).
    ///
    /// With zero items every view is released and the reported focus is
    /// `None`.
    ///
    /// # Errors
    /// `IndexOutOfRange` when `focus >= item_count`.
    fn layout_children(
        &mut self,
        provider: &dyn ItemProvider,
        host: &mut dyn ViewHost,
        focus: Option<usize>,
    ) -> Result<LayoutReport, GridError>;

    /// Scroll by `delta` pixels, clamped to the content, then recycle views
    /// that left the window and attach views that entered it.
    fn scroll_by(
        &mut self,
        provider: &dyn ItemProvider,
        host: &mut dyn ViewHost,
        delta: i32,
    ) -> ScrollReport;

    /// Content-space rectangle of `index`, computing it if needed.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when `index >= item_count`
    /// - `GeometryUnavailable` before the container is measured
    fn item_rect(&mut self, provider: &dyn ItemProvider, index: usize) -> Result<Rect, GridError>;

    /// Smallest attached index whose rectangle intersects the window.
    fn find_first_visible_index(&self) -> Option<usize>;

    /// Largest attached index whose rectangle intersects the window.
    fn find_last_visible_index(&self) -> Option<usize>;

    /// Scroll state.
    fn viewport(&self) -> &Viewport;

    /// Materialized views.
    fn attached(&self) -> &AttachedViews;

    /// Keep these indices attached even when they leave the window.
    fn set_pinned(&mut self, pinned: &[usize]);

    /// Release unpinned views that no longer intersect the window.
    fn recycle_offscreen(&mut self, host: &mut dyn ViewHost) -> Vec<usize>;

    /// Forget cached geometry after the data set changed.
    fn invalidate(&mut self);

    /// Release every attached view.
    fn recycle_all(&mut self, host: &mut dyn ViewHost) -> Vec<usize>;

    /// View-space rectangle of an attached item.
    fn view_rect(&self, index: usize) -> Option<Rect>;

    /// Content-space geometry of every attached item, ascending by index.
    fn attached_geometry(&self) -> Vec<ItemGeometry>;
}

/// State shared by both engines: scroll position, rectangle cache and the
/// attached-view set.
#[derive(Debug, Clone)]
pub(crate) struct LayoutCore {
    pub(crate) viewport: Viewport,
    pub(crate) cache: RectCache,
    pub(crate) attached: AttachedViews,
    pub(crate) base_expansion: Expansion,
    pub(crate) prefetch: i32,
    pub(crate) extent_valid: bool,
}

impl LayoutCore {
    pub(crate) fn new(orientation: Orientation) -> Self {
        Self {
            viewport: Viewport::new(orientation),
            cache: RectCache::new(),
            attached: AttachedViews::new(),
            base_expansion: Expansion::NONE,
            prefetch: 0,
            extent_valid: false,
        }
    }

    /// Window used for attach/recycle decisions.
    pub(crate) fn display(&self) -> Rect {
        self.viewport
            .display_rect(self.base_expansion.plus(Expansion::new(0, self.prefetch)))
    }

    pub(crate) fn intersects(&self, index: usize, display: &Rect) -> bool {
        self.cache
            .get(index)
            .is_some_and(|rect| rect.intersects(display))
    }

    pub(crate) fn reset_geometry(&mut self) {
        self.cache.clear();
        self.extent_valid = false;
    }

    /// Record the content extent from the furthest primary edge.
    pub(crate) fn set_extent_from_end(&mut self, max_end: i32) {
        let orientation = self.viewport.orientation();
        let start = self.viewport.padding().primary_start(orientation);
        self.viewport.set_content_extent(max_end - start);
        self.extent_valid = true;
    }

    /// Move the offset so `rect` starts at the leading padding edge when it is
    /// outside the window.
    pub(crate) fn reveal(&mut self, rect: Rect) {
        if rect.intersects(&self.display()) {
            return;
        }
        let orientation = self.viewport.orientation();
        let start = self.viewport.padding().primary_start(orientation);
        self.viewport.set_offset(rect.primary_start(orientation) - start);
    }

    /// Attach `index` if needed; new views are measured to their rectangle.
    pub(crate) fn attach_measured(&mut self, host: &mut dyn ViewHost, index: usize, rect: Rect) -> bool {
        let (view, fresh) = self.attached.attach(host, index);
        if fresh {
            host.measure(
                view,
                MeasureSpec::Exactly(rect.width()),
                MeasureSpec::Exactly(rect.height()),
            );
        }
        fresh
    }

    /// Make the attached set equal `wanted` (plus pinned views).
    pub(crate) fn sync(
        &mut self,
        host: &mut dyn ViewHost,
        wanted: &BTreeSet<usize>,
    ) -> (Vec<usize>, Vec<usize>) {
        let recycled = self.attached.recycle_outside(
            host,
            crate::viewport::ScrollDirection::Forward,
            |index| wanted.contains(&index),
        );
        let mut fresh = Vec::new();
        for &index in wanted {
            if let Some(rect) = self.cache.get(index) {
                if self.attach_measured(host, index, rect) {
                    fresh.push(index);
                }
            }
        }
        (fresh, recycled)
    }

    /// Push the current view-space rectangle of every attached view to the host.
    pub(crate) fn place_all(&self, host: &mut dyn ViewHost) {
        for (index, view) in self.attached.iter() {
            if let Some(rect) = self.cache.get(index) {
                host.place(view, self.viewport.to_view(rect));
            }
        }
    }

    /// Attached indices whose rectangle intersects `display`.
    pub(crate) fn visible_attached(
        &self,
        display: Rect,
    ) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.attached
            .indices()
            .filter(move |&index| self.intersects(index, &display))
    }

    pub(crate) fn first_visible(&self) -> Option<usize> {
        let display = self.viewport.display_rect(Expansion::NONE);
        self.visible_attached(display).next()
    }

    pub(crate) fn last_visible(&self) -> Option<usize> {
        let display = self.viewport.display_rect(Expansion::NONE);
        self.visible_attached(display).next_back()
    }

    pub(crate) fn view_rect(&self, index: usize) -> Option<Rect> {
        if !self.attached.contains(index) {
            return None;
        }
        self.cache.get(index).map(|rect| self.viewport.to_view(rect))
    }

    pub(crate) fn attached_geometry(&self) -> Vec<ItemGeometry> {
        self.attached
            .indices()
            .filter_map(|index| self.cache.get(index).map(|rect| ItemGeometry { index, rect }))
            .collect()
    }

    pub(crate) fn recycle_all(&mut self, host: &mut dyn ViewHost) -> Vec<usize> {
        self.attached.recycle_all(host)
    }

    pub(crate) fn recycle_offscreen(&mut self, host: &mut dyn ViewHost) -> Vec<usize> {
        let display = self.display();
        let cache = &self.cache;
        self.attached.recycle_outside(
            host,
            crate::viewport::ScrollDirection::Forward,
            |index| cache.get(index).is_some_and(|rect| rect.intersects(&display)),
        )
    }
}

pub(crate) fn check_lanes(lanes: usize) -> Result<(), GridError> {
    if lanes == 0 {
        return Err(GridError::invalid("lanes", "row or column count must be at least 1"));
    }
    Ok(())
}

pub(crate) fn check_focus(focus: usize, count: usize) -> Result<(), GridError> {
    if focus >= count {
        return Err(GridError::IndexOutOfRange {
            index: focus,
            count,
        });
    }
    Ok(())
}
