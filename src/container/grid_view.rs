//! The grid widget facade.
//!
//! [`GridView`] owns a layout engine, the selection state, the animation
//! coordinator and the listener set, and exposes them as one widget-level
//! API. Within one call geometry is updated first, listeners are notified
//! second and the host redraw is requested last.

use super::saved_state::SavedState;
use crate::animation::{Frame, ScrollCoordinator, Transition};
use crate::layout::{check_lanes, LayoutEngine, LayoutReport};
use crate::model::{
    Direction, GridError, Gravity, Insets, ItemGeometry, KeyInput, KeyOutcome, Orientation,
    PointerInput, Size, SubscriptionId,
};
use crate::source::{EmptyProvider, ItemProvider};
use crate::state::listeners::focus_search_failed;
use crate::state::{
    movement_for, AlignmentResolver, ClientSpan, FocusFinder, FocusOutPolicy, GridEvent,
    Listeners, ScrollAlignmentPolicy, ScrollState, SelectionPhase, SelectionState,
    SpatialFocusFinder,
};
use crate::viewport::ViewHost;
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Window length added past the trailing edge under the prefetching policies.
pub const DEFAULT_PREFETCH_EXTENT: i32 = 110;

/// Interception hook for key events; returning true consumes the event.
pub type KeyInterceptor = Box<dyn FnMut(&KeyInput) -> bool>;

/// Interception hook for touch/motion events; returning true consumes the event.
pub type PointerInterceptor = Box<dyn FnMut(&PointerInput) -> bool>;

fn provider_of<P: ItemProvider>(provider: &Option<P>) -> &dyn ItemProvider {
    match provider {
        Some(provider) => provider,
        None => &EmptyProvider,
    }
}

/// D-pad grid widget core.
pub struct GridView<P = Box<dyn ItemProvider>> {
    provider: Option<P>,
    engine: Box<dyn LayoutEngine>,
    selection: SelectionState,
    resolver: AlignmentResolver,
    coordinator: ScrollCoordinator,
    finder: Box<dyn FocusFinder>,
    focus_out: FocusOutPolicy,
    gravity: Gravity,
    prefetch: i32,
    scroll_enabled: bool,
    focus_search_disabled: bool,
    scroll_announced: bool,
    listeners: Listeners<GridEvent>,
    key_interceptor: Option<KeyInterceptor>,
    pointer_interceptor: Option<PointerInterceptor>,
    clock: Duration,
}

impl<P> fmt::Debug for GridView<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridView")
            .field("has_provider", &self.provider.is_some())
            .field("orientation", &self.engine.orientation())
            .field("lanes", &self.engine.lanes())
            .field("selection", &self.selection)
            .field("resolver", &self.resolver)
            .field("scroll_enabled", &self.scroll_enabled)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

impl<P: ItemProvider> GridView<P> {
    /// A grid without a data source, driven by `engine`.
    pub fn new(engine: Box<dyn LayoutEngine>) -> Self {
        Self {
            provider: None,
            engine,
            selection: SelectionState::new(),
            resolver: AlignmentResolver::default(),
            coordinator: ScrollCoordinator::new(),
            finder: Box::new(SpatialFocusFinder),
            focus_out: FocusOutPolicy::default(),
            gravity: Gravity::default(),
            prefetch: DEFAULT_PREFETCH_EXTENT,
            scroll_enabled: true,
            focus_search_disabled: false,
            scroll_announced: false,
            listeners: Listeners::new(),
            key_interceptor: None,
            pointer_interceptor: None,
            clock: Duration::ZERO,
        }
    }

    /// Attach `provider` before the first layout.
    pub fn with_provider(mut self, provider: P) -> Self {
        self.provider = Some(provider);
        self
    }

    // ===== Data source =====

    /// The attached data source.
    pub fn provider(&self) -> Option<&P> {
        self.provider.as_ref()
    }

    /// Mutable access to the data source. Call
    /// [`GridView::notify_data_set_changed`] after changing it.
    pub fn provider_mut(&mut self) -> Option<&mut P> {
        self.provider.as_mut()
    }

    /// Replace the data source: every view is released, cached geometry is
    /// dropped and the selection restarts from the first item.
    pub fn set_provider(
        &mut self,
        host: &mut dyn ViewHost,
        provider: Option<P>,
    ) -> Result<LayoutReport, GridError> {
        let previous = self.selection.focused();
        self.coordinator.reset();
        self.scroll_announced = false;
        self.engine.set_pinned(&[]);
        self.engine.recycle_all(host);
        self.engine.invalidate();
        self.selection.reset();
        self.provider = provider;
        self.relayout(host, previous)
    }

    /// Re-read the item count after the data changed in place. The focus is
    /// clamped to the new range.
    pub fn notify_data_set_changed(
        &mut self,
        host: &mut dyn ViewHost,
    ) -> Result<LayoutReport, GridError> {
        let stale = self.selection.focused();
        self.selection.on_item_count_changed(self.item_count());
        let clamped = self.selection.focused();
        self.settle(host);
        // A committed transition already announced its own selection.
        let previous = if self.selection.focused() == clamped {
            stale
        } else {
            self.selection.focused()
        };
        self.engine.invalidate();
        self.relayout(host, previous)
    }

    /// Number of items, 0 without a data source.
    pub fn item_count(&self) -> usize {
        provider_of(&self.provider).item_count()
    }

    // ===== Layout =====

    /// Record the container size and lay out.
    pub fn measure(
        &mut self,
        host: &mut dyn ViewHost,
        size: Size,
        padding: Insets,
    ) -> Result<LayoutReport, GridError> {
        self.engine.measure(size, padding);
        self.layout(host)
    }

    /// Full layout seeded from the focused item.
    pub fn layout(&mut self, host: &mut dyn ViewHost) -> Result<LayoutReport, GridError> {
        let previous = self.selection.focused();
        self.relayout(host, previous)
    }

    fn relayout(
        &mut self,
        host: &mut dyn ViewHost,
        previous: Option<usize>,
    ) -> Result<LayoutReport, GridError> {
        let provider = provider_of(&self.provider);
        self.selection.on_item_count_changed(provider.item_count());
        if self.selection.focused().is_none() {
            self.coordinator.reset();
        }
        let report = self
            .engine
            .layout_children(provider, host, self.selection.focused())?;
        self.views_changed(host, &report.attached, &report.recycled);
        debug!(
            focus = ?report.focus,
            attached = self.engine.attached().len(),
            "grid layout"
        );
        if previous != self.selection.focused() {
            self.notify_selected();
        }
        host.invalidate();
        Ok(report)
    }

    /// Scroll by `delta` pixels. Returns the distance actually scrolled.
    pub fn scroll_by(&mut self, host: &mut dyn ViewHost, delta: i32) -> i32 {
        if !self.scroll_enabled {
            return 0;
        }
        let applied = self.scroll_engine(host, delta);
        if applied != 0 {
            host.invalidate();
        }
        applied
    }

    fn scroll_engine(&mut self, host: &mut dyn ViewHost, delta: i32) -> i32 {
        if delta == 0 {
            return 0;
        }
        let report = self
            .engine
            .scroll_by(provider_of(&self.provider), host, delta);
        self.views_changed(host, &report.attached, &report.recycled);
        report.applied
    }

    fn views_changed(&mut self, host: &mut dyn ViewHost, attached: &[usize], recycled: &[usize]) {
        for &index in recycled {
            self.coordinator.forget(index);
        }
        let focused = self.selection.focused();
        for &index in attached {
            if focused == Some(index) && !self.coordinator.has_highlight(index) {
                self.coordinator.highlight_immediately(index, true);
            }
            self.push_scale(host, index, self.coordinator.scale_of(index));
        }
    }

    fn push_scale(&self, host: &mut dyn ViewHost, index: usize, scale: f32) {
        if let Some(view) = self.engine.attached().get(index) {
            host.set_scale(view, scale);
        }
    }

    /// Smallest index visible in the unexpanded window.
    pub fn find_first_visible_index(&self) -> Option<usize> {
        self.engine.find_first_visible_index()
    }

    /// Largest index visible in the unexpanded window.
    pub fn find_last_visible_index(&self) -> Option<usize> {
        self.engine.find_last_visible_index()
    }

    /// Attached indices in drawing order: ascending, with the focused item last
    /// so its highlight paints over its neighbours.
    pub fn child_drawing_order(&self) -> Vec<usize> {
        let focused = self.selection.focused();
        let mut order: Vec<usize> = self
            .engine
            .attached()
            .indices()
            .filter(|&index| Some(index) != focused)
            .collect();
        if let Some(index) = focused.filter(|&index| self.engine.attached().contains(index)) {
            order.push(index);
        }
        order
    }

    /// The layout engine.
    pub fn engine(&self) -> &dyn LayoutEngine {
        self.engine.as_ref()
    }

    // ===== Configuration =====

    /// Scroll axis.
    pub fn orientation(&self) -> Orientation {
        self.engine.orientation()
    }

    /// Change the scroll axis and lay out again.
    pub fn set_orientation(
        &mut self,
        host: &mut dyn ViewHost,
        orientation: Orientation,
    ) -> Result<(), GridError> {
        if orientation == self.orientation() {
            return Ok(());
        }
        self.settle(host);
        self.engine.recycle_all(host);
        self.coordinator.reset();
        self.engine.set_orientation(orientation);
        self.layout(host).map(|_| ())
    }

    /// Change the scroll axis from its integer encoding (0 horizontal,
    /// 1 vertical).
    ///
    /// # Errors
    /// `InvalidConfiguration` for other values; the axis is unchanged.
    pub fn set_orientation_value(
        &mut self,
        host: &mut dyn ViewHost,
        value: i32,
    ) -> Result<(), GridError> {
        let orientation = Orientation::try_from(value).inspect_err(|err| {
            warn!(value, %err, "rejected orientation");
        })?;
        self.set_orientation(host, orientation)
    }

    /// Rows (horizontal) or columns (vertical).
    pub fn lanes(&self) -> usize {
        self.engine.lanes()
    }

    /// Change the lane count and lay out again.
    ///
    /// # Errors
    /// `InvalidConfiguration` for 0; the previous count is kept.
    pub fn set_lanes(&mut self, host: &mut dyn ViewHost, lanes: usize) -> Result<(), GridError> {
        check_lanes(lanes).inspect_err(|err| {
            warn!(lanes, %err, "rejected lane count");
        })?;
        self.settle(host);
        self.engine.set_lanes(lanes)?;
        self.layout(host).map(|_| ())
    }

    /// Alignment policy.
    pub fn focus_scroll_strategy(&self) -> ScrollAlignmentPolicy {
        self.resolver.policy
    }

    /// Change the alignment policy. Prefetching policies widen the window.
    pub fn set_focus_scroll_strategy(&mut self, policy: ScrollAlignmentPolicy) {
        self.resolver.policy = policy;
        self.engine
            .set_prefetch_extent(if policy.prefetches() { self.prefetch } else { 0 });
    }

    /// Change the alignment policy from its integer encoding.
    ///
    /// # Errors
    /// `InvalidConfiguration` for unknown values; the policy is unchanged.
    pub fn set_focus_scroll_strategy_value(&mut self, value: i32) -> Result<(), GridError> {
        let policy = ScrollAlignmentPolicy::try_from(value).inspect_err(|err| {
            warn!(value, %err, "rejected focus scroll strategy");
        })?;
        self.set_focus_scroll_strategy(policy);
        Ok(())
    }

    /// Window length prefetched past the trailing edge.
    pub fn set_prefetch_extent(&mut self, extent: i32) {
        self.prefetch = extent.max(0);
        self.set_focus_scroll_strategy(self.resolver.policy);
    }

    /// Margin kept from the padding edges by the item-visible policies.
    pub fn set_focus_frame_compensation(&mut self, compensation: i32) {
        self.resolver = self.resolver.with_compensation(compensation);
    }

    /// Secondary-axis gravity.
    pub fn gravity(&self) -> Gravity {
        self.gravity
    }

    /// Change the gravity and lay out again.
    pub fn set_gravity(&mut self, host: &mut dyn ViewHost, gravity: Gravity) -> Result<(), GridError> {
        if gravity == self.gravity {
            return Ok(());
        }
        self.settle(host);
        self.gravity = gravity;
        self.engine.set_gravity(gravity);
        self.layout(host).map(|_| ())
    }

    /// Scale of the focused item.
    pub fn selected_scale(&self) -> f32 {
        self.coordinator.selected_scale()
    }

    /// Change the focused item's scale.
    ///
    /// # Errors
    /// `InvalidConfiguration` below 1.0; the previous scale is kept.
    pub fn set_selected_scale(&mut self, host: &mut dyn ViewHost, scale: f32) -> Result<(), GridError> {
        self.coordinator.set_selected_scale(scale).inspect_err(|err| {
            warn!(scale, %err, "rejected selected scale");
        })?;
        if let Some(index) = self.selection.focused() {
            self.push_scale(host, index, self.coordinator.scale_of(index));
            host.invalidate();
        }
        Ok(())
    }

    /// Whether selection changes and input may scroll the grid.
    pub fn is_scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    /// Enable or disable scrolling. Re-enabling scrolls to the selection.
    pub fn set_scroll_enabled(&mut self, host: &mut dyn ViewHost, enabled: bool) {
        if enabled == self.scroll_enabled {
            return;
        }
        self.scroll_enabled = enabled;
        if !enabled {
            return;
        }
        if let Some(index) = self.selection.focused() {
            let delta = self.alignment_delta(index, None).unwrap_or(0);
            if self.scroll_engine(host, delta) != 0 {
                host.invalidate();
            }
        }
    }

    /// Whether directional keys are swallowed without a focus search.
    pub fn is_focus_search_disabled(&self) -> bool {
        self.focus_search_disabled
    }

    /// Disable or enable the focus search.
    pub fn set_focus_search_disabled(&mut self, disabled: bool) {
        self.focus_search_disabled = disabled;
    }

    /// Whether focus may leave the grid at each end.
    pub fn focus_out(&self) -> FocusOutPolicy {
        self.focus_out
    }

    /// Allow or forbid focus leaving the grid before the first item
    /// (`front`) and after the last one (`end`).
    pub fn set_focus_out_allowed(&mut self, front: bool, end: bool) {
        self.focus_out = FocusOutPolicy { front, end };
    }

    /// Replace the focus-search collaborator.
    pub fn set_focus_finder(&mut self, finder: Box<dyn FocusFinder>) {
        self.finder = finder;
    }

    /// Install or remove the key interception hook.
    pub fn set_key_interceptor(&mut self, interceptor: Option<KeyInterceptor>) {
        self.key_interceptor = interceptor;
    }

    /// Install or remove the touch/motion interception hook.
    pub fn set_pointer_interceptor(&mut self, interceptor: Option<PointerInterceptor>) {
        self.pointer_interceptor = interceptor;
    }

    // ===== Listeners =====

    /// Subscribe to every grid event.
    pub fn subscribe(&mut self, callback: impl FnMut(&GridEvent) + 'static) -> SubscriptionId {
        self.listeners.subscribe(callback)
    }

    /// Subscribe to selection changes: `(index, item_id)`.
    pub fn on_child_selected(
        &mut self,
        mut callback: impl FnMut(Option<usize>, Option<u64>) + 'static,
    ) -> SubscriptionId {
        self.listeners.subscribe(move |event| {
            if let GridEvent::ChildSelected { index, item_id } = *event {
                callback(index, item_id);
            }
        })
    }

    /// Subscribe to failed focus searches: `(direction, current, count)`.
    pub fn on_focus_search_failed(
        &mut self,
        mut callback: impl FnMut(Direction, Option<usize>, usize) + 'static,
    ) -> SubscriptionId {
        self.listeners.subscribe(move |event| {
            if let GridEvent::FocusSearchFailed {
                direction,
                current,
                count,
            } = *event
            {
                callback(direction, current, count);
            }
        })
    }

    /// Remove a subscription.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn notify_selected(&mut self) {
        let index = self.selection.focused();
        let item_id = index.and_then(|index| provider_of(&self.provider).item_id(index));
        debug!(?index, ?item_id, "child selected");
        self.listeners
            .notify(&GridEvent::ChildSelected { index, item_id });
    }

    fn announce_scroll(&mut self, state: ScrollState) {
        self.scroll_announced = state == ScrollState::Started;
        self.listeners.notify(&GridEvent::ScrollStateChanged(state));
    }

    // ===== Selection =====

    /// Focused index, `None` for an empty grid.
    pub fn selected_position(&self) -> Option<usize> {
        self.selection.focused()
    }

    /// Sub-position within the focused item.
    pub fn selected_sub_position(&self) -> usize {
        self.selection.sub_index()
    }

    /// Current selection phase.
    pub fn selection_phase(&self) -> SelectionPhase {
        self.selection.phase()
    }

    /// True while a scroll, focus move or highlight transition runs.
    pub fn is_animating(&self) -> bool {
        self.coordinator.is_active() || self.coordinator.is_highlighting()
    }

    /// Current highlight scale of `index`.
    pub fn scale_of(&self, index: usize) -> f32 {
        self.coordinator.scale_of(index)
    }

    /// Select `position` immediately, scrolling it into place per the policy.
    /// Positions past the end are clamped. Returns the selected index.
    pub fn set_selected_position(&mut self, host: &mut dyn ViewHost, position: usize) -> Option<usize> {
        self.set_selected_position_with_sub(host, position, 0, 0)
    }

    /// Select `position` immediately with a sub-position and an extra
    /// primary-axis scroll added to the alignment delta.
    pub fn set_selected_position_with_sub(
        &mut self,
        host: &mut dyn ViewHost,
        position: usize,
        sub_index: usize,
        primary_scroll_extra: i32,
    ) -> Option<usize> {
        let index = self.selection.clamp(position)?;
        self.settle(host);
        self.selection.set_primary_scroll_extra(primary_scroll_extra);
        if self.scroll_enabled {
            let delta = self.alignment_delta(index, None).unwrap_or(0);
            self.scroll_engine(host, delta);
        }
        self.commit(host, index, sub_index);
        host.invalidate();
        Some(index)
    }

    /// Scroll smoothly to `position`; the selection commits when the scroll
    /// settles. Returns the target index.
    pub fn set_selected_position_smooth(
        &mut self,
        host: &mut dyn ViewHost,
        position: usize,
        now: Duration,
    ) -> Option<usize> {
        self.set_selected_position_smooth_with_sub(host, position, 0, 0, now)
    }

    /// Smooth variant of [`GridView::set_selected_position_with_sub`].
    pub fn set_selected_position_smooth_with_sub(
        &mut self,
        host: &mut dyn ViewHost,
        position: usize,
        sub_index: usize,
        primary_scroll_extra: i32,
        now: Duration,
    ) -> Option<usize> {
        self.clock = now;
        let index = self.selection.clamp(position)?;
        self.settle(host);
        self.selection.set_primary_scroll_extra(primary_scroll_extra);
        let delta = if self.scroll_enabled {
            self.alignment_delta(index, None).unwrap_or(0)
        } else {
            0
        };
        if delta == 0 || !self.selection.begin_scroll(index, sub_index) {
            self.commit(host, index, sub_index);
            host.invalidate();
            return Some(index);
        }
        self.coordinator.start_scroll(delta, now);
        self.pin_in_flight();
        self.announce_scroll(ScrollState::Started);
        host.invalidate();
        Some(index)
    }

    /// Focus `index` now and move the highlight onto it.
    fn commit(&mut self, host: &mut dyn ViewHost, index: usize, sub_index: usize) {
        let previous = self.selection.focused();
        self.selection.select(index, sub_index);
        if previous != Some(index) {
            self.move_highlight(host, previous, index);
            self.notify_selected();
        }
    }

    fn move_highlight(&mut self, host: &mut dyn ViewHost, from: Option<usize>, to: usize) {
        if let Some(from) = from {
            self.coordinator.animate_highlight(from, false, self.clock);
            self.push_scale(host, from, self.coordinator.scale_of(from));
        }
        self.coordinator.animate_highlight(to, true, self.clock);
        self.push_scale(host, to, self.coordinator.scale_of(to));
    }

    /// Primary-axis scroll bringing `index` into place under the policy,
    /// clamped to the content.
    fn alignment_delta(&mut self, index: usize, incoming: Option<Direction>) -> Option<i32> {
        let rect = self
            .engine
            .item_rect(provider_of(&self.provider), index)
            .ok()?;
        let viewport = self.engine.viewport();
        let target = viewport.to_view(rect);
        let delta = self
            .resolver
            .scroll_delta(target, ClientSpan::of(viewport), incoming)
            + self.selection.primary_scroll_extra();
        Some(viewport.clamp_delta(delta))
    }

    fn pin_in_flight(&mut self) {
        let pinned: Vec<usize> = self
            .selection
            .focused()
            .into_iter()
            .chain(self.selection.phase().target())
            .collect();
        self.engine.set_pinned(&pinned);
    }

    /// End any animation in flight and apply its final state.
    fn settle(&mut self, host: &mut dyn ViewHost) {
        let frame = self.coordinator.snap();
        self.apply_frame(host, frame);
    }

    /// Save the selected position.
    pub fn save_state(&self) -> SavedState {
        SavedState {
            selected_position: self.selection.focused(),
            sub_position: self.selection.sub_index(),
        }
    }

    /// Restore a position saved by [`GridView::save_state`]; clamped to the
    /// current items.
    pub fn restore_state(&mut self, host: &mut dyn ViewHost, state: &SavedState) -> Option<usize> {
        let position = state.selected_position?;
        self.set_selected_position_with_sub(host, position, state.sub_position, 0)
    }

    // ===== Input =====

    /// Handle a key event at time `now`.
    pub fn dispatch_key(&mut self, host: &mut dyn ViewHost, key: KeyInput, now: Duration) -> KeyOutcome {
        self.clock = now;
        if let Some(interceptor) = self.key_interceptor.as_mut() {
            if interceptor(&key) {
                return KeyOutcome::Handled;
            }
        }
        let outcome = match key {
            KeyInput::Direction(direction) => self.move_focus(host, direction, now),
            KeyInput::Activate => match self.selection.focused() {
                Some(index) => {
                    self.listeners.notify(&GridEvent::ItemActivated { index });
                    KeyOutcome::Handled
                }
                None => KeyOutcome::Unhandled,
            },
            KeyInput::Other(_) => KeyOutcome::Unhandled,
        };
        if !outcome.is_handled() {
            self.listeners.notify(&GridEvent::UnhandledKey(key));
        }
        outcome
    }

    fn move_focus(&mut self, host: &mut dyn ViewHost, direction: Direction, now: Duration) -> KeyOutcome {
        let movement = movement_for(direction, self.orientation());
        self.selection.set_pending(movement);
        if self.focus_search_disabled {
            return KeyOutcome::Handled;
        }
        let scrolling = self.coordinator.is_scrolling();
        self.settle(host);
        let Some(current) = self.selection.focused() else {
            return KeyOutcome::Unhandled;
        };

        let candidates = self.focus_candidates(current);
        let Some(next) = self.finder.find_next(current, direction, &candidates) else {
            let (event, consumed) = focus_search_failed(
                &self.focus_out,
                movement,
                scrolling,
                direction,
                Some(current),
                self.item_count(),
            );
            trace!(%direction, current, consumed, "focus search failed");
            self.listeners.notify(&event);
            return KeyOutcome::from_consumed(consumed);
        };

        self.selection.set_primary_scroll_extra(0);
        let delta = if self.scroll_enabled {
            self.alignment_delta(next, Some(direction)).unwrap_or(0)
        } else {
            0
        };
        if !self.selection.begin_focus_move(next) {
            return KeyOutcome::Handled;
        }
        let snapped = self.coordinator.start_focus_move(Some(current), next, delta, now);
        self.apply_frame(host, snapped);
        self.pin_in_flight();
        if delta != 0 {
            self.announce_scroll(ScrollState::Started);
        }
        debug!(%direction, current, next, delta, "focus move");
        host.invalidate();
        KeyOutcome::Handled
    }

    /// Geometry of the attached items plus the items within two lanes of
    /// `current`, in content coordinates.
    fn focus_candidates(&mut self, current: usize) -> Vec<ItemGeometry> {
        let provider = provider_of(&self.provider);
        let count = provider.item_count();
        let reach = 2 * self.engine.lanes() + 2;
        let mut indices: BTreeSet<usize> = self.engine.attached().indices().collect();
        indices.extend(current.saturating_sub(reach)..count.min(current + reach + 1));
        indices
            .into_iter()
            .filter_map(|index| {
                self.engine
                    .item_rect(provider, index)
                    .ok()
                    .map(|rect| ItemGeometry { index, rect })
            })
            .collect()
    }

    /// Handle a touch or motion event. A touch selects the item under the
    /// point; motion scrolls along the primary axis.
    pub fn dispatch_pointer(&mut self, host: &mut dyn ViewHost, input: PointerInput) -> KeyOutcome {
        if let Some(interceptor) = self.pointer_interceptor.as_mut() {
            if interceptor(&input) {
                return KeyOutcome::Handled;
            }
        }
        match input {
            PointerInput::Touch { x, y } => {
                let hit = self
                    .child_drawing_order()
                    .into_iter()
                    .rev()
                    .find(|&index| {
                        self.engine
                            .view_rect(index)
                            .is_some_and(|rect| rect.contains_point(x, y))
                    });
                match hit {
                    Some(index) => {
                        self.set_selected_position(host, index);
                        KeyOutcome::Handled
                    }
                    None => KeyOutcome::Unhandled,
                }
            }
            PointerInput::Motion { dx, dy } => {
                let delta = if self.orientation().is_horizontal() { dx } else { dy };
                KeyOutcome::from_consumed(self.scroll_by(host, delta) != 0)
            }
        }
    }

    /// The host moved input focus onto `index` directly (e.g. by touch mode
    /// or accessibility). Ignored while a transition is in flight; otherwise
    /// scrolls smoothly to the item. Returns true when acted upon.
    pub fn on_child_focus_requested(&mut self, host: &mut dyn ViewHost, index: usize, now: Duration) -> bool {
        if !self.selection.is_idle() || self.coordinator.is_active() {
            trace!(index, "child focus request ignored during transition");
            return false;
        }
        if self.selection.focused() == Some(index) || index >= self.item_count() {
            return false;
        }
        self.set_selected_position_smooth(host, index, now).is_some()
    }

    // ===== Animation =====

    /// Advance animations to `now`. Returns true when anything changed.
    pub fn tick(&mut self, host: &mut dyn ViewHost, now: Duration) -> bool {
        self.clock = now;
        let frame = self.coordinator.tick(now);
        self.apply_frame(host, frame)
    }

    fn apply_frame(&mut self, host: &mut dyn ViewHost, frame: Frame) -> bool {
        if frame.is_empty() {
            return false;
        }
        self.scroll_engine(host, frame.scroll);
        for &(index, scale) in &frame.scales {
            self.push_scale(host, index, scale);
        }
        if let Some(transition) = frame.completed {
            self.complete(host, transition);
        }
        host.invalidate();
        true
    }

    fn complete(&mut self, host: &mut dyn ViewHost, transition: Transition) {
        let previous = self.selection.focused();
        let committed = self.selection.finish();
        self.engine.set_pinned(&[]);
        if let (Transition::Scroll, Some(target)) = (transition, committed) {
            if previous != Some(target) {
                self.move_highlight(host, previous, target);
            }
        }
        if committed.is_some() && previous != self.selection.focused() {
            self.notify_selected();
        }
        self.engine.recycle_offscreen(host);
        if self.scroll_announced {
            self.announce_scroll(ScrollState::Ended);
        }
    }
}

#[cfg(test)]
#[path = "grid_view_tests.rs"]
mod tests;
