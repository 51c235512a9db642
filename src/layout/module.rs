//! Module (irregular tile) layout.
//!
//! Every item's cell origin and span come from a
//! [`ModuleDescriptor`]; the cell size is fixed by configuration rather than
//! derived from the container width. The initial pass computes rectangles
//! for indices `0..N` in order, and each scroll step re-tests every item
//! against the display window.

use super::cell::CellMetrics;
use super::{check_focus, check_lanes, LayoutCore, LayoutEngine, LayoutReport, ScrollReport};
use crate::model::{GridError, Insets, ItemGeometry, Orientation, Rect, Size};
use crate::source::{ItemProvider, ModuleDescriptor};
use crate::viewport::{AttachedViews, Expansion, ScrollDirection, ViewHost, Viewport};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Cell size used when none is configured.
pub const DEFAULT_MODULE_CELL_SIZE: Size = Size::new(380, 380);

/// Module layout engine over descriptor `D`.
#[derive(Debug, Clone)]
pub struct ModuleLayout<D> {
    core: LayoutCore,
    descriptor: D,
    lanes: usize,
    cell: Size,
}

impl<D: ModuleDescriptor> ModuleLayout<D> {
    /// A module layout with `lanes` rows (horizontal) or columns (vertical)
    /// of `cell`-sized cells.
    ///
    /// # Errors
    /// `InvalidConfiguration` when `lanes` is 0 or `cell` is empty.
    pub fn new(
        descriptor: D,
        orientation: Orientation,
        lanes: usize,
        cell: Size,
    ) -> Result<Self, GridError> {
        check_lanes(lanes)?;
        check_cell(cell)?;
        let mut layout = Self {
            core: LayoutCore::new(orientation),
            descriptor,
            lanes,
            cell,
        };
        layout.update_expansion();
        Ok(layout)
    }

    /// Base cell size.
    pub fn cell_size(&self) -> Size {
        self.cell
    }

    /// Change the base cell size; cached geometry is dropped.
    ///
    /// # Errors
    /// `InvalidConfiguration` when `cell` is empty.
    pub fn set_cell_size(&mut self, cell: Size) -> Result<(), GridError> {
        check_cell(cell)?;
        if cell != self.cell {
            self.cell = cell;
            self.core.reset_geometry();
        }
        Ok(())
    }

    /// The span descriptor.
    pub fn descriptor(&self) -> &D {
        &self.descriptor
    }

    /// Cached rectangle of `index`, if computed.
    pub fn cached_rect(&self, index: usize) -> Option<Rect> {
        self.core.cache.get(index)
    }

    fn update_expansion(&mut self) {
        let spacing = self.metrics().primary_spacing(self.core.viewport.orientation());
        self.core.base_expansion = Expansion::new(spacing, spacing);
    }

    fn metrics(&self) -> CellMetrics {
        let padding = self.core.viewport.padding();
        CellMetrics {
            origin_x: padding.left,
            origin_y: padding.top,
            cell: self.cell,
            row_spacing: self.descriptor.row_spacing(),
            column_spacing: self.descriptor.column_spacing(),
        }
    }

    fn rect_of(&mut self, metrics: &CellMetrics, index: usize) -> Rect {
        if let Some(rect) = self.core.cache.get(index) {
            return rect;
        }
        let span = self.descriptor.span_of(index);
        let rect = metrics.place(span, self.core.viewport.orientation(), self.lanes);
        trace!(index, ?rect, "placed module");
        self.core.cache.get_or_insert_with(index, || rect)
    }

    /// Compute rectangles for `0..count` and the content extent.
    fn compute_all(&mut self, count: usize) {
        let metrics = self.metrics();
        let orientation = self.core.viewport.orientation();
        let mut max_end = 0;
        for index in 0..count {
            max_end = max_end.max(self.rect_of(&metrics, index).primary_end(orientation));
        }
        if !self.core.extent_valid {
            self.core.set_extent_from_end(max_end);
        }
    }
}

fn check_cell(cell: Size) -> Result<(), GridError> {
    if cell.is_empty() {
        return Err(GridError::invalid(
            "module_cell_size",
            format!("{}x{} is not a positive size", cell.width, cell.height),
        ));
    }
    Ok(())
}

impl<D: ModuleDescriptor> LayoutEngine for ModuleLayout<D> {
    fn orientation(&self) -> Orientation {
        self.core.viewport.orientation()
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        if orientation == self.orientation() {
            return;
        }
        self.core.viewport.set_orientation(orientation);
        self.core.reset_geometry();
        self.update_expansion();
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

        self.compute_all(count);
        if let Some(rect) = self.core.cache.get(focus) {
            self.core.reveal(rect);
        }
        let display = self.core.display();
        let wanted: BTreeSet<usize> = (0..count)
            .filter(|&index| self.core.intersects(index, &display))
            .collect();
        let (attached, recycled) = self.core.sync(host, &wanted);
        self.core.place_all(host);
        debug!(
            focus,
            offset = self.core.viewport.offset(),
            attached = attached.len(),
            recycled = recycled.len(),
            "module layout pass"
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
        if self.core.attached.is_empty() || !self.core.viewport.is_measured() {
            return report;
        }
        let count = provider.item_count();
        self.compute_all(count);
        report.applied = self.core.viewport.scroll_by(delta);

        let display = self.core.display();
        let cache = &self.core.cache;
        report.recycled = self.core.attached.recycle_outside(
            host,
            ScrollDirection::of(if report.applied == 0 { delta } else { report.applied }),
            |index| cache.get(index).is_some_and(|rect| rect.intersects(&display)),
        );
        for index in 0..count {
            if self.core.attached.contains(index) {
                continue;
            }
            if let Some(rect) = self.core.cache.get(index) {
                if rect.intersects(&display) && self.core.attach_measured(host, index, rect) {
                    report.attached.push(index);
                }
            }
        }
        self.core.place_all(host);
        trace!(
            requested = delta,
            applied = report.applied,
            attached = report.attached.len(),
            recycled = report.recycled.len(),
            "module scroll"
        );
        report
    }

    fn item_rect(&mut self, provider: &dyn ItemProvider, index: usize) -> Result<Rect, GridError> {
        check_focus(index, provider.item_count())?;
        if !self.core.viewport.is_measured() {
            return Err(GridError::GeometryUnavailable { index });
        }
        let metrics = self.metrics();
        Ok(self.rect_of(&metrics, index))
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
#[path = "module_tests.rs"]
mod tests;
