//! A [`ViewHost`] that only records what the core asked of it.

use super::recycler::{MeasureSpec, ViewHost};
use crate::model::{Rect, Size, ViewHandle};
use std::collections::HashMap;

/// One call made by the core on a [`HeadlessHost`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// A view was created for `index`.
    Obtained {
        /// Adapter position.
        index: usize,
        /// Issued handle.
        view: ViewHandle,
    },
    /// The view of `index` went back to the pool.
    Recycled {
        /// Adapter position.
        index: usize,
        /// Released handle.
        view: ViewHandle,
    },
    /// The view of `index` was positioned.
    Placed {
        /// Adapter position.
        index: usize,
        /// View-space rectangle.
        rect: Rect,
    },
    /// The view of `index` got a new highlight scale.
    Scaled {
        /// Adapter position.
        index: usize,
        /// Scale factor.
        scale: f32,
    },
    /// A redraw was requested.
    Invalidated,
}

#[derive(Debug, Clone, Copy)]
struct LiveView {
    index: usize,
    rect: Option<Rect>,
    scale: f32,
}

/// Headless host: issues sequential handles, measures every view at a fixed
/// natural size and keeps the latest placement and scale of each live view.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    next_handle: u64,
    natural_size: Size,
    live: HashMap<ViewHandle, LiveView>,
    events: Vec<HostEvent>,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessHost {
    /// Natural size reported for unconstrained measurement.
    pub const DEFAULT_NATURAL_SIZE: Size = Size::new(200, 100);

    /// A host with [`HeadlessHost::DEFAULT_NATURAL_SIZE`] views.
    pub fn new() -> Self {
        Self::with_natural_size(Self::DEFAULT_NATURAL_SIZE)
    }

    /// A host whose views report `size` when measured without constraints.
    pub fn with_natural_size(size: Size) -> Self {
        Self {
            next_handle: 1,
            natural_size: size,
            live: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Every recorded call, oldest first.
    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }

    /// Forget recorded calls; live views are kept.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Number of views obtained and not yet recycled.
    pub fn live_views(&self) -> usize {
        self.live.len()
    }

    /// Sorted indices of live views.
    pub fn live_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.live.values().map(|view| view.index).collect();
        indices.sort_unstable();
        indices
    }

    /// Latest view-space placement of the live view bound to `index`.
    pub fn placement_of(&self, index: usize) -> Option<Rect> {
        self.live
            .values()
            .find(|view| view.index == index)
            .and_then(|view| view.rect)
    }

    /// Latest scale of the live view bound to `index` (1.0 if never scaled).
    pub fn scale_of(&self, index: usize) -> Option<f32> {
        self.live
            .values()
            .find(|view| view.index == index)
            .map(|view| view.scale)
    }

    /// Number of redraw requests recorded.
    pub fn invalidations(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, HostEvent::Invalidated))
            .count()
    }
}

impl ViewHost for HeadlessHost {
    fn obtain_view(&mut self, index: usize) -> ViewHandle {
        let view = ViewHandle::new(self.next_handle);
        self.next_handle += 1;
        self.live.insert(
            view,
            LiveView {
                index,
                rect: None,
                scale: 1.0,
            },
        );
        self.events.push(HostEvent::Obtained { index, view });
        view
    }

    fn recycle_view(&mut self, view: ViewHandle) {
        if let Some(live) = self.live.remove(&view) {
            self.events.push(HostEvent::Recycled {
                index: live.index,
                view,
            });
        }
    }

    fn measure(&mut self, _view: ViewHandle, width: MeasureSpec, height: MeasureSpec) -> Size {
        let pick = |spec: MeasureSpec, natural: i32| match spec {
            MeasureSpec::Exactly(px) => px,
            MeasureSpec::Unspecified => natural,
        };
        Size::new(
            pick(width, self.natural_size.width),
            pick(height, self.natural_size.height),
        )
    }

    fn place(&mut self, view: ViewHandle, rect: Rect) {
        if let Some(live) = self.live.get_mut(&view) {
            live.rect = Some(rect);
            self.events.push(HostEvent::Placed {
                index: live.index,
                rect,
            });
        }
    }

    fn set_scale(&mut self, view: ViewHandle, scale: f32) {
        if let Some(live) = self.live.get_mut(&view) {
            live.scale = scale;
            self.events.push(HostEvent::Scaled {
                index: live.index,
                scale,
            });
        }
    }

    fn invalidate(&mut self) {
        self.events.push(HostEvent::Invalidated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconstrained_measure_reports_natural_size() {
        let mut host = HeadlessHost::with_natural_size(Size::new(120, 80));
        let view = host.obtain_view(0);
        assert_eq!(
            host.measure(view, MeasureSpec::Unspecified, MeasureSpec::Exactly(40)),
            Size::new(120, 40)
        );
    }

    #[test]
    fn placements_of_recycled_views_are_dropped() {
        let mut host = HeadlessHost::new();
        let view = host.obtain_view(4);
        host.place(view, Rect::new(0, 0, 10, 10));
        assert_eq!(host.placement_of(4), Some(Rect::new(0, 0, 10, 10)));
        host.recycle_view(view);
        assert_eq!(host.placement_of(4), None);
        assert_eq!(host.live_views(), 0);
    }
}
