//! View materialization seam and the attached-view set.

use crate::model::{Rect, Size, ViewHandle};
use std::collections::{BTreeMap, BTreeSet};

/// Size constraint passed to [`ViewHost::measure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureSpec {
    /// The view must take exactly this many pixels.
    Exactly(i32),
    /// The view picks its natural size.
    Unspecified,
}

/// View materialization interface implemented by the host toolkit.
///
/// The core decides which item indices are visible and where they go; the
/// host turns that into real views. Rectangles passed to
/// [`ViewHost::place`] are in view coordinates (scroll offset applied).
pub trait ViewHost {
    /// Create or reuse a view bound to the item at `index`.
    fn obtain_view(&mut self, index: usize) -> ViewHandle;

    /// Return a view to the host's pool.
    fn recycle_view(&mut self, view: ViewHandle);

    /// Measure `view` under the given constraints, returning its size.
    fn measure(&mut self, view: ViewHandle, width: MeasureSpec, height: MeasureSpec) -> Size;

    /// Position `view` at `rect`.
    fn place(&mut self, view: ViewHandle, rect: Rect);

    /// Apply the focus-highlight scale to `view`.
    fn set_scale(&mut self, _view: ViewHandle, _scale: f32) {}

    /// Schedule a redraw.
    fn invalidate(&mut self) {}
}

/// Order in which out-of-window views are released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Content moved towards larger offsets; release from the front.
    Forward,
    /// Content moved towards smaller offsets; release from the back.
    Backward,
}

impl ScrollDirection {
    /// Direction of a scroll delta; zero counts as forward.
    pub fn of(delta: i32) -> Self {
        if delta < 0 {
            ScrollDirection::Backward
        } else {
            ScrollDirection::Forward
        }
    }
}

/// Item views currently materialized, keyed by adapter position.
///
/// Pinned indices are never released by [`AttachedViews::recycle_outside`];
/// the focused item and an in-flight focus-move target are pinned so their
/// views survive until the animation commits.
#[derive(Debug, Clone, Default)]
pub struct AttachedViews {
    views: BTreeMap<usize, ViewHandle>,
    pinned: BTreeSet<usize>,
}

impl AttachedViews {
    /// No attached views.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attached views.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// True when nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// View attached for `index`.
    pub fn get(&self, index: usize) -> Option<ViewHandle> {
        self.views.get(&index).copied()
    }

    /// True when `index` has a view.
    pub fn contains(&self, index: usize) -> bool {
        self.views.contains_key(&index)
    }

    /// Attached indices in ascending order.
    pub fn indices(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.views.keys().copied()
    }

    /// Attached `(index, view)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, ViewHandle)> + '_ {
        self.views.iter().map(|(&index, &view)| (index, view))
    }

    /// Smallest attached index.
    pub fn first(&self) -> Option<usize> {
        self.views.keys().next().copied()
    }

    /// Largest attached index.
    pub fn last(&self) -> Option<usize> {
        self.views.keys().next_back().copied()
    }

    /// Attached index of `view`.
    pub fn index_of(&self, view: ViewHandle) -> Option<usize> {
        self.views
            .iter()
            .find_map(|(&index, &candidate)| (candidate == view).then_some(index))
    }

    /// Ensure `index` has a view, obtaining one from `host` if needed.
    ///
    /// Returns the view and whether it was newly obtained.
    pub fn attach(&mut self, host: &mut dyn ViewHost, index: usize) -> (ViewHandle, bool) {
        if let Some(view) = self.get(index) {
            return (view, false);
        }
        let view = host.obtain_view(index);
        self.views.insert(index, view);
        (view, true)
    }

    /// Release the view of `index`, pinned or not. Returns true if one was attached.
    pub fn detach(&mut self, host: &mut dyn ViewHost, index: usize) -> bool {
        match self.views.remove(&index) {
            Some(view) => {
                host.recycle_view(view);
                true
            }
            None => false,
        }
    }

    /// Replace the pinned set.
    pub fn set_pinned(&mut self, pinned: impl IntoIterator<Item = usize>) {
        self.pinned = pinned.into_iter().collect();
    }

    /// True when `index` is pinned.
    pub fn is_pinned(&self, index: usize) -> bool {
        self.pinned.contains(&index)
    }

    /// Release every unpinned view for which `keep` returns false.
    ///
    /// Views are visited front-to-back for [`ScrollDirection::Forward`] and
    /// back-to-front for [`ScrollDirection::Backward`]. Returns the released
    /// indices in release order.
    pub fn recycle_outside<F>(
        &mut self,
        host: &mut dyn ViewHost,
        direction: ScrollDirection,
        mut keep: F,
    ) -> Vec<usize>
    where
        F: FnMut(usize) -> bool,
    {
        let ordered: Vec<usize> = match direction {
            ScrollDirection::Forward => self.indices().collect(),
            ScrollDirection::Backward => self.indices().rev().collect(),
        };
        let mut released = Vec::new();
        for index in ordered {
            if self.is_pinned(index) || keep(index) {
                continue;
            }
            if self.detach(host, index) {
                released.push(index);
            }
        }
        released
    }

    /// Release every view, pinned ones included. Returns the released indices.
    pub fn recycle_all(&mut self, host: &mut dyn ViewHost) -> Vec<usize> {
        let released: Vec<usize> = self.indices().collect();
        for (_, view) in std::mem::take(&mut self.views) {
            host.recycle_view(view);
        }
        released
    }
}
