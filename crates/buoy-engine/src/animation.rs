//! Frame-driven progress tween.
//!
//! The engine never owns a timer thread. Controllers advance a [`Tween`]
//! from the host frame loop with real elapsed time, then sample the eased
//! progress to interpolate whatever they animate. Time comes from
//! [`buoy_host::HostClock`], so scripted clocks drive these
//! deterministically in tests.

use core::time::Duration;

use buoy_geometry::EasingFn;

/// Minimum tween duration. Zero-length tweens complete on the first tick
/// instead of dividing by zero.
const MIN_DURATION: Duration = Duration::from_nanos(1);

/// A one-shot eased progress value running from `0.0` to `1.0`.
#[derive(Debug, Clone)]
pub struct Tween {
    duration: Duration,
    elapsed: Duration,
    easing: EasingFn,
}

impl Tween {
    /// Create a tween that runs for `duration` under `easing`.
    pub fn new(duration: Duration, easing: EasingFn) -> Self {
        Self {
            duration: duration.max(MIN_DURATION),
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// Advance by `dt` of real time. Saturates at the full duration.
    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    /// Eased progress in `[0, 1]` (easings may overshoot either bound
    /// mid-flight, e.g. an elastic curve).
    pub fn value(&self) -> f64 {
        (self.easing)(self.linear_progress())
    }

    /// Whether the tween has consumed its full duration.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Rewind to the start, keeping duration and easing.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn linear_progress(&self) -> f64 {
        self.elapsed.as_secs_f64() / self.duration.as_secs_f64()
    }
}
