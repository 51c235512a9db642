//! Easing curves mapping linear progress in [0, 1] to eased progress.

use std::f32::consts::PI;

/// Easing function signature.
pub type EasingFn = fn(f32) -> f32;

/// Constant velocity.
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Slow start and end, fast middle: `cos((t + 1)π) / 2 + 0.5`.
#[inline]
pub fn accelerate_decelerate(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    ((t + 1.0) * PI).cos() / 2.0 + 0.5
}

/// Fast start, slow end (quadratic).
#[inline]
pub fn decelerate(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}
