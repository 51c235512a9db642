//! Focus-highlight level animation, one state per attached item.

use super::easing::{accelerate_decelerate, EasingFn};
use std::collections::BTreeMap;
use std::time::Duration;

/// Duration of a highlight transition.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(150);

/// Scale applied to the focused item when none is configured.
pub const DEFAULT_SELECT_SCALE: f32 = 1.04;

/// Highlight animation of a single item.
///
/// `level` 0 is unfocused, 1 fully highlighted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusAnimationState {
    /// Current level.
    pub level: f32,
    /// Level when the running transition started.
    pub start_level: f32,
    /// Level the running transition ends at.
    pub target_level: f32,
    /// Tick at which the transition started.
    pub start_time: Duration,
    /// Length of the transition.
    pub duration: Duration,
}

impl FocusAnimationState {
    /// Resting state at `level`.
    pub fn resting(level: f32) -> Self {
        Self {
            level,
            start_level: level,
            target_level: level,
            start_time: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }

    /// True while the level has not reached its target.
    pub fn is_running(&self) -> bool {
        self.level != self.target_level
    }

    /// Advance to `now`. Returns true when the level changed.
    pub fn advance(&mut self, now: Duration, easing: EasingFn) -> bool {
        if !self.is_running() {
            return false;
        }
        let elapsed = now.saturating_sub(self.start_time);
        let fraction = if self.duration.is_zero() || elapsed >= self.duration {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()) as f32
        };
        let eased = easing(fraction);
        self.level = if fraction >= 1.0 {
            self.target_level
        } else {
            self.start_level + eased * (self.target_level - self.start_level)
        };
        true
    }
}

/// Scale for a highlight level: `1 + (selected_scale - 1) * level`.
pub fn scale_for(level: f32, selected_scale: f32) -> f32 {
    1.0 + (selected_scale - 1.0) * level
}

/// Per-item highlight states keyed by item index.
///
/// Entries are created lazily on the first focus change of an item and
/// erased when its view is recycled.
#[derive(Debug, Clone, Default)]
pub struct FocusAnimations {
    states: BTreeMap<usize, FocusAnimationState>,
    duration: Duration,
}

impl FocusAnimations {
    /// Empty map with the default transition length.
    pub fn new() -> Self {
        Self::with_duration(HIGHLIGHT_DURATION)
    }

    /// Empty map with a custom transition length.
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            states: BTreeMap::new(),
            duration,
        }
    }

    /// Start moving `index` towards fully highlighted (`focused`) or resting.
    pub fn animate(&mut self, index: usize, focused: bool, now: Duration) {
        let target = if focused { 1.0 } else { 0.0 };
        let duration = self.duration;
        let state = self
            .states
            .entry(index)
            .or_insert_with(|| FocusAnimationState::resting(0.0));
        if state.level == target {
            state.target_level = target;
            return;
        }
        *state = FocusAnimationState {
            level: state.level,
            start_level: state.level,
            target_level: target,
            start_time: now,
            duration,
        };
    }

    /// Jump `index` straight to its resting or highlighted level.
    pub fn set_immediate(&mut self, index: usize, focused: bool) {
        let level = if focused { 1.0 } else { 0.0 };
        self.states.insert(index, FocusAnimationState::resting(level));
    }

    /// End every running transition at its target level.
    ///
    /// Returns the indices that moved.
    pub fn snap_all(&mut self) -> Vec<usize> {
        let mut moved = Vec::new();
        for (&index, state) in &mut self.states {
            if state.is_running() {
                *state = FocusAnimationState::resting(state.target_level);
                moved.push(index);
            }
        }
        moved
    }

    /// Advance every running transition. Returns `(index, level)` for each
    /// item whose level changed.
    pub fn tick(&mut self, now: Duration) -> Vec<(usize, f32)> {
        let mut changed = Vec::new();
        for (&index, state) in &mut self.states {
            if state.advance(now, accelerate_decelerate) {
                changed.push((index, state.level));
            }
        }
        changed
    }

    /// Current level of `index` (0 for unknown items).
    pub fn level(&self, index: usize) -> f32 {
        self.states.get(&index).map_or(0.0, |state| state.level)
    }

    /// State of `index`, if one was created.
    pub fn get(&self, index: usize) -> Option<&FocusAnimationState> {
        self.states.get(&index)
    }

    /// True while any transition runs.
    pub fn is_animating(&self) -> bool {
        self.states.values().any(FocusAnimationState::is_running)
    }

    /// Erase the state of a recycled item.
    pub fn remove(&mut self, index: usize) -> bool {
        self.states.remove(&index).is_some()
    }

    /// Erase every state.
    pub fn clear(&mut self) {
        self.states.clear();
    }

    /// Number of tracked items.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True when nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn scale_interpolates_towards_selected_scale() {
        assert_eq!(scale_for(0.0, 1.2), 1.0);
        assert!((scale_for(0.5, 1.2) - 1.1).abs() < 1e-6);
        assert!((scale_for(1.0, DEFAULT_SELECT_SCALE) - 1.04).abs() < 1e-6);
    }

    #[test]
    fn focus_gain_reaches_full_level_after_duration() {
        let mut animations = FocusAnimations::new();
        animations.animate(3, true, ms(1000));
        assert!(animations.is_animating());
        let halfway = animations.tick(ms(1075));
        assert_eq!(halfway.len(), 1);
        assert!((halfway[0].1 - 0.5).abs() < 1e-3);
        animations.tick(ms(1150));
        assert_eq!(animations.level(3), 1.0);
        assert!(!animations.is_animating());
        assert!(animations.tick(ms(2000)).is_empty());
    }

    #[test]
    fn reversal_starts_from_current_level() {
        let mut animations = FocusAnimations::new();
        animations.animate(0, true, ms(0));
        animations.tick(ms(75));
        let mid = animations.level(0);
        animations.animate(0, false, ms(75));
        let state = animations.get(0).copied();
        assert_eq!(state.map(|s| s.start_level), Some(mid));
        assert_eq!(state.map(|s| s.target_level), Some(0.0));
    }

    #[test]
    fn snap_ends_running_transitions_at_target() {
        let mut animations = FocusAnimations::new();
        animations.animate(1, true, ms(0));
        animations.set_immediate(2, true);
        animations.animate(2, false, ms(0));
        assert_eq!(animations.snap_all(), vec![1, 2]);
        assert_eq!(animations.level(1), 1.0);
        assert_eq!(animations.level(2), 0.0);
    }

    #[test]
    fn recycled_item_state_is_erased() {
        let mut animations = FocusAnimations::new();
        animations.animate(4, true, ms(0));
        assert!(animations.remove(4));
        assert!(animations.is_empty());
        assert_eq!(animations.level(4), 0.0);
    }
}
