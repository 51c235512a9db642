//! Keeps the smooth scroll and the focus-highlight transition on one clock.
//!
//! The container feeds every animation tick through
//! [`ScrollCoordinator::tick`]; the returned [`Frame`] carries both the
//! scroll step and the highlight scales for that tick, so one redraw shows
//! both. A transition completes exactly once.

use super::easing::accelerate_decelerate;
use super::focus::{scale_for, FocusAnimations, DEFAULT_SELECT_SCALE};
use super::scroll::{SmoothScroll, FOCUS_MOVE_DURATION};
use crate::model::GridError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::trace;

/// Preset highlight scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoomFactor {
    /// No zoom.
    None,
    /// 6%.
    XSmall,
    /// 10%, for large tiles.
    Small,
    /// 12%.
    #[default]
    Medium,
    /// 14%, for small tiles.
    Large,
}

impl ZoomFactor {
    /// Scale factor of the preset.
    pub fn scale(self) -> f32 {
        match self {
            ZoomFactor::None => 1.0,
            ZoomFactor::XSmall => 1.06,
            ZoomFactor::Small => 1.10,
            ZoomFactor::Medium => 1.12,
            ZoomFactor::Large => 1.14,
        }
    }
}

/// A transition that ended during a tick or snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The highlight moved and the selection can be committed.
    FocusMove {
        /// Item that lost focus.
        from: Option<usize>,
        /// Item that gained focus.
        to: usize,
    },
    /// A plain smooth scroll settled.
    Scroll,
}

/// Everything that changed on one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Primary-axis pixels to scroll now.
    pub scroll: i32,
    /// `(index, scale)` for every item whose highlight changed.
    pub scales: Vec<(usize, f32)>,
    /// Transition that finished on this tick.
    pub completed: Option<Transition>,
}

impl Frame {
    /// True when the frame changes nothing on screen.
    pub fn is_empty(&self) -> bool {
        self.scroll == 0 && self.scales.is_empty() && self.completed.is_none()
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveMove {
    from: Option<usize>,
    to: usize,
    ends_at: Duration,
}

/// Drives focus-move and smooth-scroll animations.
#[derive(Debug, Clone)]
pub struct ScrollCoordinator {
    scroll: Option<SmoothScroll>,
    active_move: Option<ActiveMove>,
    highlights: FocusAnimations,
    selected_scale: f32,
    move_duration: Duration,
}

impl Default for ScrollCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollCoordinator {
    /// Idle coordinator with the default scale and durations.
    pub fn new() -> Self {
        Self {
            scroll: None,
            active_move: None,
            highlights: FocusAnimations::new(),
            selected_scale: DEFAULT_SELECT_SCALE,
            move_duration: FOCUS_MOVE_DURATION,
        }
    }

    /// Scale of the fully highlighted item.
    pub fn selected_scale(&self) -> f32 {
        self.selected_scale
    }

    /// Change the highlighted scale.
    ///
    /// # Errors
    /// `InvalidConfiguration` for scales below 1.0 or non-finite values.
    pub fn set_selected_scale(&mut self, scale: f32) -> Result<(), GridError> {
        if !scale.is_finite() || scale < 1.0 {
            return Err(GridError::invalid(
                "selected_scale",
                format!("{scale} is below 1.0"),
            ));
        }
        self.selected_scale = scale;
        Ok(())
    }

    /// True while a scroll or focus move is in flight.
    pub fn is_active(&self) -> bool {
        self.scroll.is_some() || self.active_move.is_some()
    }

    /// True while a smooth scroll is in flight.
    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_some()
    }

    /// True while any highlight transition runs.
    pub fn is_highlighting(&self) -> bool {
        self.highlights.is_animating()
    }

    /// Target of the focus move in flight.
    pub fn moving_to(&self) -> Option<usize> {
        self.active_move.map(|active| active.to)
    }

    /// Current scale of `index`.
    pub fn scale_of(&self, index: usize) -> f32 {
        scale_for(self.highlights.level(index), self.selected_scale)
    }

    /// True when `index` has highlight state, animating or resting.
    pub fn has_highlight(&self, index: usize) -> bool {
        self.highlights.get(index).is_some()
    }

    /// Highlight `index` without animating, e.g. a freshly attached focused view.
    pub fn highlight_immediately(&mut self, index: usize, focused: bool) -> f32 {
        self.highlights.set_immediate(index, focused);
        self.scale_of(index)
    }

    /// Animate the highlight of `index` up or down without a focus move.
    pub fn animate_highlight(&mut self, index: usize, focused: bool, now: Duration) {
        self.highlights.animate(index, focused, now);
    }

    /// Start moving focus `from` → `to` while scrolling `delta` pixels.
    ///
    /// A move or scroll already in flight is snapped to its end first; the
    /// returned frame carries that snap and must be applied before the new
    /// move's first tick.
    pub fn start_focus_move(
        &mut self,
        from: Option<usize>,
        to: usize,
        delta: i32,
        now: Duration,
    ) -> Frame {
        let snapped = self.snap();
        if let Some(from) = from {
            self.highlights.animate(from, false, now);
        }
        self.highlights.animate(to, true, now);
        self.scroll = (delta != 0).then(|| {
            SmoothScroll::new(delta, now, self.move_duration, accelerate_decelerate)
        });
        self.active_move = Some(ActiveMove {
            from,
            to,
            ends_at: now + self.move_duration,
        });
        trace!(?from, to, delta, "focus move started");
        snapped
    }

    /// Start a smooth scroll of `delta` pixels. The prior animation is snapped
    /// and returned the same way as for [`ScrollCoordinator::start_focus_move`].
    pub fn start_scroll(&mut self, delta: i32, now: Duration) -> Frame {
        let snapped = self.snap();
        if delta != 0 {
            self.scroll = Some(SmoothScroll::new(
                delta,
                now,
                self.move_duration,
                accelerate_decelerate,
            ));
        }
        snapped
    }

    /// Advance everything to `now`.
    pub fn tick(&mut self, now: Duration) -> Frame {
        let mut frame = Frame::default();
        if let Some(scroll) = self.scroll.as_mut() {
            frame.scroll = scroll.step(now);
        }
        let selected_scale = self.selected_scale;
        frame.scales = self
            .highlights
            .tick(now)
            .into_iter()
            .map(|(index, level)| (index, scale_for(level, selected_scale)))
            .collect();

        let scroll_done = self.scroll.is_none_or(|scroll| scroll.is_finished());
        if let Some(active) = self.active_move {
            if scroll_done && now >= active.ends_at {
                self.scroll = None;
                self.active_move = None;
                frame.completed = Some(Transition::FocusMove {
                    from: active.from,
                    to: active.to,
                });
            }
        } else if scroll_done && self.scroll.is_some() {
            self.scroll = None;
            frame.completed = Some(Transition::Scroll);
        }
        frame
    }

    /// End whatever is in flight immediately, returning the final frame.
    pub fn snap(&mut self) -> Frame {
        let mut frame = Frame::default();
        if let Some(mut scroll) = self.scroll.take() {
            frame.scroll = scroll.finish();
            frame.completed = Some(Transition::Scroll);
        }
        let selected_scale = self.selected_scale;
        frame.scales = self
            .highlights
            .snap_all()
            .into_iter()
            .map(|index| (index, scale_for(self.highlights.level(index), selected_scale)))
            .collect();
        if let Some(active) = self.active_move.take() {
            frame.completed = Some(Transition::FocusMove {
                from: active.from,
                to: active.to,
            });
        }
        frame
    }

    /// Drop the highlight state of a recycled item.
    pub fn forget(&mut self, index: usize) {
        self.highlights.remove(index);
    }

    /// Drop all animation state without completing anything.
    pub fn reset(&mut self) {
        self.scroll = None;
        self.active_move = None;
        self.highlights.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn run_to_end(coordinator: &mut ScrollCoordinator, from: u64) -> (i32, Vec<Transition>) {
        let mut scrolled = 0;
        let mut completed = Vec::new();
        for frame in 1..=20 {
            let tick = coordinator.tick(ms(from + frame * 16));
            scrolled += tick.scroll;
            completed.extend(tick.completed);
        }
        (scrolled, completed)
    }

    mod scale {
        use super::*;

        #[test]
        fn presets_map_to_zoom_scales() {
            assert_eq!(ZoomFactor::None.scale(), 1.0);
            assert_eq!(ZoomFactor::Large.scale(), 1.14);
        }

        #[test]
        fn scale_below_one_is_rejected_and_kept() {
            let mut coordinator = ScrollCoordinator::new();
            assert!(coordinator.set_selected_scale(0.9).is_err());
            assert!(coordinator.set_selected_scale(f32::NAN).is_err());
            assert_eq!(coordinator.selected_scale(), DEFAULT_SELECT_SCALE);
            assert!(coordinator.set_selected_scale(1.1).is_ok());
            assert_eq!(coordinator.selected_scale(), 1.1);
        }
    }

    mod focus_move {
        use super::*;

        #[test]
        fn completes_exactly_once_after_scroll_and_duration() {
            let mut coordinator = ScrollCoordinator::new();
            let snapped = coordinator.start_focus_move(Some(0), 2, 250, ms(0));
            assert!(snapped.is_empty());
            let (scrolled, completed) = run_to_end(&mut coordinator, 0);
            assert_eq!(scrolled, 250);
            assert_eq!(
                completed,
                vec![Transition::FocusMove {
                    from: Some(0),
                    to: 2
                }]
            );
            assert!(!coordinator.is_active());
            assert!((coordinator.scale_of(2) - DEFAULT_SELECT_SCALE).abs() < 1e-6);
            assert_eq!(coordinator.scale_of(0), 1.0);
        }

        #[test]
        fn scale_and_scroll_change_on_the_same_tick() {
            let mut coordinator = ScrollCoordinator::new();
            coordinator.start_focus_move(None, 1, 100, ms(0));
            let frame = coordinator.tick(ms(50));
            assert!(frame.scroll > 0);
            assert_eq!(frame.scales.len(), 1);
            assert_eq!(frame.scales[0].0, 1);
        }

        #[test]
        fn move_without_scroll_still_lasts_full_duration() {
            let mut coordinator = ScrollCoordinator::new();
            coordinator.start_focus_move(Some(3), 4, 0, ms(0));
            assert_eq!(coordinator.tick(ms(160)).completed, None);
            assert_eq!(
                coordinator.tick(ms(200)).completed,
                Some(Transition::FocusMove {
                    from: Some(3),
                    to: 4
                })
            );
        }

        #[test]
        fn new_move_snaps_the_previous_one() {
            let mut coordinator = ScrollCoordinator::new();
            coordinator.start_focus_move(Some(0), 1, 200, ms(0));
            let first = coordinator.tick(ms(50));
            let snapped = coordinator.start_focus_move(Some(1), 2, 200, ms(50));
            assert_eq!(first.scroll + snapped.scroll, 200);
            assert_eq!(
                snapped.completed,
                Some(Transition::FocusMove {
                    from: Some(0),
                    to: 1
                })
            );
            assert_eq!(coordinator.moving_to(), Some(2));
        }
    }

    mod plain_scroll {
        use super::*;

        #[test]
        fn scroll_reports_settling_once() {
            let mut coordinator = ScrollCoordinator::new();
            coordinator.start_scroll(-120, ms(0));
            assert!(coordinator.is_scrolling());
            let (scrolled, completed) = run_to_end(&mut coordinator, 0);
            assert_eq!(scrolled, -120);
            assert_eq!(completed, vec![Transition::Scroll]);
        }

        #[test]
        fn zero_delta_starts_nothing() {
            let mut coordinator = ScrollCoordinator::new();
            coordinator.start_scroll(0, ms(0));
            assert!(!coordinator.is_active());
            assert!(coordinator.tick(ms(16)).is_empty());
        }

        #[test]
        fn forgotten_item_loses_highlight() {
            let mut coordinator = ScrollCoordinator::new();
            coordinator.highlight_immediately(5, true);
            coordinator.forget(5);
            assert_eq!(coordinator.scale_of(5), 1.0);
        }
    }
}
