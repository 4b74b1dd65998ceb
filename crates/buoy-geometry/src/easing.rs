//! Easing curves for snap-back and mode-transition animation.
//!
//! All curves map `t` in `[0, 1]` to a progress value starting at 0 and
//! ending at 1. [`ease_out_elastic`] deliberately overshoots 1.0 on the way;
//! it is reserved for discrete snap-back animations and never used for
//! continuous pointer tracking, where the wobble would fight the hand.

use core::f64::consts::TAU;

/// An easing curve: monotone time in, shaped progress out.
pub type EasingFn = fn(f64) -> f64;

/// Identity curve.
#[inline]
#[must_use]
pub fn linear(t: f64) -> f64 {
    t
}

/// Decelerating cubic, fast start and soft landing.
#[inline]
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let u = t - 1.0;
    (u * u).mul_add(u, 1.0)
}

/// Symmetric cubic, slow at both ends.
#[inline]
#[must_use]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = 2.0f64.mul_add(-t, 2.0);
        1.0 - u * u * u / 2.0
    }
}

/// Elastic settle: springs past the target and oscillates into place.
///
/// Exact at both endpoints; inputs outside `[0, 1]` clamp to them so a
/// finished animation can never report a value off target.
#[must_use]
pub fn ease_out_elastic(t: f64) -> f64 {
    const C4: f64 = TAU / 3.0;
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        2.0f64.powf(-10.0 * t) * ((10.0 * t - 0.75) * C4).sin() + 1.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
