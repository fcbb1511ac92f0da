//! Time-driven feedback primitives
//!
//! `Tween` interpolates scalar keyframes with easing; `Shake` produces a
//! fading, noise-perturbed oscillation. Both are advanced with per-frame
//! deltas in milliseconds and report `completed()` once spent.

pub mod shake;
pub mod tween;

pub use shake::Shake;
pub use tween::Tween;

/// Quadratic ease-in-out over `[0, 1]`
#[inline]
pub fn ease(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Linear blend; exact at both endpoints
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}
