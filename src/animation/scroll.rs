//! Time-driven smooth scroll over a fixed pixel delta.

use super::easing::EasingFn;
use std::time::Duration;

/// Duration of a focus move and its accompanying scroll.
pub const FOCUS_MOVE_DURATION: Duration = Duration::from_millis(200);

/// A scroll of `total` pixels spread over `duration`.
///
/// Each [`SmoothScroll::step`] returns the pixels to apply since the previous
/// step, so the sum of all steps equals `total` exactly.
#[derive(Debug, Clone, Copy)]
pub struct SmoothScroll {
    total: i32,
    emitted: i32,
    start: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl SmoothScroll {
    /// Scroll `total` pixels starting at `start`.
    pub fn new(total: i32, start: Duration, duration: Duration, easing: EasingFn) -> Self {
        Self {
            total,
            emitted: 0,
            start,
            duration,
            easing,
        }
    }

    /// Total delta.
    pub fn total(&self) -> i32 {
        self.total
    }

    /// Pixels not yet emitted.
    pub fn remaining(&self) -> i32 {
        self.total - self.emitted
    }

    /// True once every pixel was emitted.
    pub fn is_finished(&self) -> bool {
        self.emitted == self.total
    }

    /// Pixels to scroll for the tick at `now`.
    pub fn step(&mut self, now: Duration) -> i32 {
        let elapsed = now.saturating_sub(self.start);
        let target = if self.duration.is_zero() || elapsed >= self.duration {
            self.total
        } else {
            let fraction = (elapsed.as_secs_f64() / self.duration.as_secs_f64()) as f32;
            (self.total as f32 * (self.easing)(fraction)).round() as i32
        };
        let step = target - self.emitted;
        self.emitted = target;
        step
    }

    /// Emit everything that is left in one step.
    pub fn finish(&mut self) -> i32 {
        let rest = self.remaining();
        self.emitted = self.total;
        rest
    }
}
