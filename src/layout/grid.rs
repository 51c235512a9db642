//! Uniform grid layout.
//!
//! Items sit on a lattice with a fixed number of lanes across the scroll
//! axis. The placement mode is picked per pass from the provider:
//!
//! - **Span mode** (`column_count > 0`): the cell size derives from the
//!   container width and each item covers the cells of its
//!   [`SpanDescriptor`]
//! - **Fixed-row mode** (`column_count <= 0` or a zero-sized cell): items are
//!   1x1 in lane-first order, sized by measuring the first materialized view
//!   once, and the lane block is aligned on the secondary axis by gravity
//!
//! A full pass is seeded from the focused item and walks outwards in both
//! directions, so a jump to a position in the middle of the list never
//! materializes the items before it.

use super::cell::{compute_base_cell_size, CellMetrics};
use super::{check_focus, check_lanes, LayoutCore, LayoutEngine, LayoutReport, ScrollReport};
use crate::model::{
    GridError, Gravity, Insets, ItemGeometry, Orientation, Rect, Size, SpanDescriptor,
};
use crate::source::ItemProvider;
use crate::viewport::{AttachedViews, MeasureSpec, ScrollDirection, ViewHost, Viewport};
use std::collections::BTreeSet;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Span { lanes: usize },
    Sequential { lanes: usize },
}

/// Uniform grid layout engine.
#[derive(Debug, Clone)]
pub struct GridLayout {
    core: LayoutCore,
    lanes: usize,
    gravity: Gravity,
    item_size: Option<Size>,
}

impl GridLayout {
    /// A grid scrolling along `orientation` with `lanes` rows or columns.
    ///
    /// # Errors
    /// `InvalidConfiguration` when `lanes` is 0.
    pub fn new(orientation: Orientation, lanes: usize) -> Result<Self, GridError> {
        check_lanes(lanes)?;
        Ok(Self {
            core: LayoutCore::new(orientation),
            lanes,
            gravity: Gravity::default(),
            item_size: None,
        })
    }

    /// Secondary-axis gravity in effect.
    pub fn gravity(&self) -> Gravity {
        self.gravity
    }

    /// Natural item size measured for fixed-row mode, once known.
    pub fn measured_item_size(&self) -> Option<Size> {
        self.item_size
    }

    /// Cell size span mode would use for `provider` at the current width.
    pub fn base_cell_size(&self, provider: &dyn ItemProvider) -> Size {
        let size = self.core.viewport.size();
        let padding = self.core.viewport.padding();
        compute_base_cell_size(
            size.width - padding.horizontal(),
            provider.column_count(),
            provider.column_spacing(),
            provider.aspect_ratio(),
        )
    }

    /// Cached rectangle of `index`, if computed.
    pub fn cached_rect(&self, index: usize) -> Option<Rect> {
        self.core.cache.get(index)
    }

    fn placement(&self, provider: &dyn ItemProvider) -> Option<(CellMetrics, Placement)> {
        if !self.core.viewport.is_measured() {
            return None;
        }
        let padding = self.core.viewport.padding();
        let orientation = self.core.viewport.orientation();
        let cell = self.base_cell_size(provider);
        if !cell.is_empty() {
            let lanes = match orientation {
                Orientation::Vertical => usize::try_from(provider.column_count()).unwrap_or(1),
                Orientation::Horizontal => self.lanes,
            };
            let metrics = CellMetrics {
                origin_x: padding.left,
                origin_y: padding.top,
                cell,
                row_spacing: provider.row_spacing(),
                column_spacing: provider.column_spacing(),
            };
            return Some((metrics, Placement::Span { lanes }));
        }

        let item = self.item_size?;
        let mut metrics = CellMetrics {
            origin_x: padding.left,
            origin_y: padding.top,
            cell: item,
            row_spacing: provider.row_spacing(),
            column_spacing: provider.column_spacing(),
        };
        let lanes = self.lanes as i32;
        let block = lanes * item.secondary(orientation)
            + (lanes - 1) * metrics.secondary_spacing(orientation);
        let size = self.core.viewport.size();
        let shift = match orientation {
            Orientation::Horizontal => {
                let available = size.height - padding.vertical();
                self.gravity.secondary_offset(orientation, available, block)
            }
            Orientation::Vertical => {
                let available = size.width - padding.horizontal();
                self.gravity.secondary_offset(orientation, available, block)
            }
        };
        match orientation {
            Orientation::Horizontal => metrics.origin_y += shift,
            Orientation::Vertical => metrics.origin_x += shift,
        }
        Some((metrics, Placement::Sequential { lanes: self.lanes }))
    }

    fn place(
        &self,
        provider: &dyn ItemProvider,
        metrics: &CellMetrics,
        placement: Placement,
        index: usize,
    ) -> Rect {
        let orientation = self.core.viewport.orientation();
        match placement {
            Placement::Span { lanes } => {
                let span = provider
                    .span_of(index)
                    .unwrap_or_else(|| SpanDescriptor::single(index));
                metrics.place(span, orientation, lanes)
            }
            Placement::Sequential { lanes } => metrics.place_sequential(index, orientation, lanes),
        }
    }

    fn rect_of(
        &mut self,
        provider: &dyn ItemProvider,
        metrics: &CellMetrics,
        placement: Placement,
        index: usize,
    ) -> Rect {
        if let Some(rect) = self.core.cache.get(index) {
            return rect;
        }
        let rect = self.place(provider, metrics, placement, index);
        trace!(index, ?rect, "placed item");
        self.core.cache.get_or_insert_with(index, || rect)
    }

    fn ensure_extent(
        &mut self,
        provider: &dyn ItemProvider,
        metrics: &CellMetrics,
        placement: Placement,
    ) {
        if self.core.extent_valid {
            return;
        }
        let count = provider.item_count();
        let orientation = self.core.viewport.orientation();
        let max_end = match placement {
            // The last item always sits in the last lane-column.
            Placement::Sequential { .. } => count
                .checked_sub(1)
                .map(|last| self.place(provider, metrics, placement, last).primary_end(orientation))
                .unwrap_or(0),
            Placement::Span { .. } => (0..count)
                .map(|index| self.place(provider, metrics, placement, index).primary_end(orientation))
                .max()
                .unwrap_or(0),
        };
        self.core.set_extent_from_end(max_end);
    }

    /// Measure the natural size of `index`, attaching it. Returns true when
    /// the view was newly obtained.
    fn measure_item_size(&mut self, host: &mut dyn ViewHost, index: usize) -> bool {
        let (view, fresh) = self.core.attached.attach(host, index);
        let size = host.measure(view, MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        debug!(?size, "measured fixed-row item size");
        self.item_size = Some(size);
        fresh
    }

    fn fill_scrolled(
        &mut self,
        provider: &dyn ItemProvider,
        host: &mut dyn ViewHost,
        metrics: &CellMetrics,
        placement: Placement,
    ) -> Vec<usize> {
        let count = provider.item_count();
        let display = self.core.display();
        let mut fresh = Vec::new();
        let visible: Vec<usize> = self.core.visible_attached(display).collect();

        let (first, last) = match (visible.first(), visible.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => {
                // Jumped past the whole window: evaluate every item.
                for index in 0..count {
                    let rect = self.rect_of(provider, metrics, placement, index);
                    if rect.intersects(&display) && self.core.attach_measured(host, index, rect) {
                        fresh.push(index);
                    }
                }
                return fresh;
            }
        };

        for index in (last + 1)..count {
            let rect = self.rect_of(provider, metrics, placement, index);
            if !rect.intersects(&display) {
                break;
            }
            if self.core.attach_measured(host, index, rect) {
                fresh.push(index);
            }
        }

        for index in (0..first).rev() {
            let rect = self.rect_of(provider, metrics, placement, index);
            if rect.intersects(&display) {
                if self.core.attach_measured(host, index, rect) {
                    fresh.push(index);
                }
            } else if matches!(placement, Placement::Sequential { .. }) {
                break;
            }
        }

        for index in first..=last {
            if self.core.attached.contains(index) {
                continue;
            }
            let rect = self.rect_of(provider, metrics, placement, index);
            if rect.intersects(&display) && self.core.attach_measured(host, index, rect) {
                fresh.push(index);
            }
        }
        fresh
    }
}

impl LayoutEngine for GridLayout {
    fn orientation(&self) -> Orientation {
        self.core.viewport.orientation()
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        if orientation == self.orientation() {
            return;
        }
        self.core.viewport.set_orientation(orientation);
        self.core.reset_geometry();
    }

    fn lanes(&self) -> usize {
        self.lanes
    }

    fn set_lanes(&mut self, lanes: usize) -> Result<(), GridError> {
        check_lanes(lanes)?;
        if lanes != self.lanes {
            self.lanes = lanes;
            self.core.reset_geometry();
        }
        Ok(())
    }

    fn set_gravity(&mut self, gravity: Gravity) {
        if gravity != self.gravity {
            self.gravity = gravity;
            self.core.reset_geometry();
        }
    }

    fn set_prefetch_extent(&mut self, extent: i32) {
        self.core.prefetch = extent.max(0);
    }

    fn measure(&mut self, size: Size, padding: Insets) {
        if size != self.core.viewport.size() || padding != self.core.viewport.padding() {
            self.core.viewport.resize(size, padding);
            self.core.reset_geometry();
        }
    }

    fn layout_children(
        &mut self,
        provider: &dyn ItemProvider,
        host: &mut dyn ViewHost,
        focus: Option<usize>,
    ) -> Result<LayoutReport, GridError> {
        let count = provider.item_count();
        if count == 0 {
            let recycled = self.core.recycle_all(host);
            self.core.reset_geometry();
            self.core.viewport.set_content_extent(0);
            return Ok(LayoutReport {
                focus: None,
                attached: Vec::new(),
                recycled,
            });
        }
        let focus = focus.unwrap_or(0);
        check_focus(focus, count)?;

        if !self.core.viewport.is_measured() {
            return Ok(LayoutReport {
                focus: Some(focus),
                ..LayoutReport::default()
            });
        }

        let fixed_rows = provider.column_count() <= 0 || self.base_cell_size(provider).is_empty();
        let measured_fresh = fixed_rows && self.item_size.is_none() && self.measure_item_size(host, focus);
        let Some((metrics, placement)) = self.placement(provider) else {
            return Ok(LayoutReport {
                focus: Some(focus),
                ..LayoutReport::default()
            });
        };

        self.ensure_extent(provider, &metrics, placement);
        let focus_rect = self.rect_of(provider, &metrics, placement, focus);
        self.core.reveal(focus_rect);
        let display = self.core.display();

        let mut wanted = BTreeSet::from([focus]);
        for index in (0..focus).rev() {
            if !self.rect_of(provider, &metrics, placement, index).intersects(&display) {
                break;
            }
            wanted.insert(index);
        }
        for index in (focus + 1)..count {
            if !self.rect_of(provider, &metrics, placement, index).intersects(&display) {
                break;
            }
            wanted.insert(index);
        }

        let (mut attached, recycled) = self.core.sync(host, &wanted);
        if measured_fresh && self.core.attached.contains(focus) {
            attached.push(focus);
            attached.sort_unstable();
        }
        self.core.place_all(host);
        debug!(
            focus,
            offset = self.core.viewport.offset(),
            attached = attached.len(),
            recycled = recycled.len(),
            visible = wanted.len(),
            "grid layout pass"
        );
        Ok(LayoutReport {
            focus: Some(focus),
            attached,
            recycled,
        })
    }

    fn scroll_by(
        &mut self,
        provider: &dyn ItemProvider,
        host: &mut dyn ViewHost,
        delta: i32,
    ) -> ScrollReport {
        let mut report = ScrollReport {
            requested: delta,
            ..ScrollReport::default()
        };
        if self.core.attached.is_empty() {
            return report;
        }
        let Some((metrics, placement)) = self.placement(provider) else {
            return report;
        };
        self.ensure_extent(provider, &metrics, placement);
        report.applied = self.core.viewport.scroll_by(delta);

        let display = self.core.display();
        let cache = &self.core.cache;
        report.recycled = self.core.attached.recycle_outside(
            host,
            ScrollDirection::of(if report.applied == 0 { delta } else { report.applied }),
            |index| cache.get(index).is_some_and(|rect| rect.intersects(&display)),
        );
        report.attached = self.fill_scrolled(provider, host, &metrics, placement);
        self.core.place_all(host);
        trace!(
            requested = delta,
            applied = report.applied,
            attached = report.attached.len(),
            recycled = report.recycled.len(),
            "grid scroll"
        );
        report
    }

    fn item_rect(&mut self, provider: &dyn ItemProvider, index: usize) -> Result<Rect, GridError> {
        check_focus(index, provider.item_count())?;
        let (metrics, placement) = self
            .placement(provider)
            .ok_or(GridError::GeometryUnavailable { index })?;
        Ok(self.rect_of(provider, &metrics, placement, index))
    }

    fn find_first_visible_index(&self) -> Option<usize> {
        self.core.first_visible()
    }

    fn find_last_visible_index(&self) -> Option<usize> {
        self.core.last_visible()
    }

    fn viewport(&self) -> &Viewport {
        &self.core.viewport
    }

    fn attached(&self) -> &AttachedViews {
        &self.core.attached
    }

    fn set_pinned(&mut self, pinned: &[usize]) {
        self.core.attached.set_pinned(pinned.iter().copied());
    }

    fn invalidate(&mut self) {
        self.core.reset_geometry();
    }

    fn recycle_all(&mut self, host: &mut dyn ViewHost) -> Vec<usize> {
        self.core.recycle_all(host)
    }

    fn recycle_offscreen(&mut self, host: &mut dyn ViewHost) -> Vec<usize> {
        self.core.recycle_offscreen(host)
    }

    fn view_rect(&self, index: usize) -> Option<Rect> {
        self.core.view_rect(index)
    }

    fn attached_geometry(&self) -> Vec<ItemGeometry> {
        self.core.attached_geometry()
    }
}

#[cfg(test)]
#[path = "grid_tests.rs"]
mod tests;
