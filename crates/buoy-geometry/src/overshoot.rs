//! Boundary overshoot: how far a visual rect must move to get back onto the
//! monitor set.
//!
//! The correction is asymmetric on purpose. While the rect still overlaps at
//! least one monitor ("straddling"), clamping is lenient: each axis may use
//! the full extent of every monitor whose cross-axis interval overlaps the
//! rect, so dragging across a seam between side-by-side monitors produces no
//! fake correction. Once the rect is fully detached (possible with L-shaped
//! layouts and their dead corners), clamping is strict: the rect is pushed
//! entirely inside the nearest monitor.
//!
//! # Invariants
//!
//! 1. A rect fully inside any single monitor has zero overshoot.
//! 2. The correction is zero iff the rect is already admissible: within the
//!    per-axis spans while straddling. A detached rect always gets a nonzero
//!    correction (were it inside the nearest monitor it would be straddling).
//! 3. For a rect that fits inside the span it is clamped into, adding the
//!    full correction yields a rect whose overshoot is zero. A rect larger
//!    than its span is pinned by its start (left or top) edge instead.
//! 4. An empty monitor list yields zero correction. There is nothing to
//!    clamp against; callers treat monitor enumeration failure upstream.
//! 5. Nearest-monitor ties resolve to the earliest monitor in the slice, so
//!    a given snapshot always produces the same correction.

use crate::rect::Rect;

// ---------------------------------------------------------------------------
// Overshoot
// ---------------------------------------------------------------------------

/// Signed per-axis correction that moves a rect back onto the monitor set.
///
/// Positive `dx` pushes right, positive `dy` pushes down. Adding the full
/// correction restores admissibility; scaling it by a damping factor in
/// `(0, 1)` yields the partial correction that gives drags their rubber-band
/// resistance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Overshoot {
    pub dx: f64,
    pub dy: f64,
}

impl Overshoot {
    /// No correction on either axis.
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    /// True if both components are exactly zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    /// True if both components are within `tolerance` of zero.
    ///
    /// Release logic uses this with a small tolerance so sub-pixel residue
    /// does not trigger a snap-back animation.
    #[inline]
    #[must_use]
    pub fn is_within(&self, tolerance: f64) -> bool {
        self.dx.abs() <= tolerance && self.dy.abs() <= tolerance
    }

    /// The correction scaled by `factor` on both axes.
    #[inline]
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            dx: self.dx * factor,
            dy: self.dy * factor,
        }
    }

    /// Euclidean length of the correction, used to scale snap-back duration
    /// with distance.
    #[inline]
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }
}

// ---------------------------------------------------------------------------
// Correction
// ---------------------------------------------------------------------------

/// Compute the correction that brings `visual` back onto `monitors`.
///
/// See the module docs for the straddling/detached asymmetry. `monitors` is
/// the work-area snapshot taken at gesture start; the slice order is the
/// enumeration order and breaks nearest-monitor ties.
#[must_use]
pub fn overshoot(visual: Rect, monitors: &[Rect]) -> Overshoot {
    if monitors.is_empty() {
        return Overshoot::ZERO;
    }
    if monitors.iter().any(|m| visual.intersects(m)) {
        straddle_correction(visual, monitors)
    } else {
        let target = nearest_monitor(visual, monitors);
        Overshoot {
            dx: clamp_span(visual.x, visual.width, target.left(), target.right()),
            dy: clamp_span(visual.y, visual.height, target.top(), target.bottom()),
        }
    }
}

/// Lenient clamp for a rect that still overlaps the monitor set.
///
/// Per axis, the admissible span is the min/max extent over every monitor
/// whose cross-axis interval overlaps the rect. An edge hanging past one
/// monitor but covered by a neighbor is therefore not pushed back.
fn straddle_correction(visual: Rect, monitors: &[Rect]) -> Overshoot {
    let mut x_span: Option<(f64, f64)> = None;
    let mut y_span: Option<(f64, f64)> = None;

    for m in monitors {
        if visual.overlaps_y(m) {
            x_span = Some(match x_span {
                Some((lo, hi)) => (lo.min(m.left()), hi.max(m.right())),
                None => (m.left(), m.right()),
            });
        }
        if visual.overlaps_x(m) {
            y_span = Some(match y_span {
                Some((lo, hi)) => (lo.min(m.top()), hi.max(m.bottom())),
                None => (m.top(), m.bottom()),
            });
        }
    }

    // A straddling rect overlaps some monitor in both axes, so both spans
    // are populated; the fallbacks are unreachable with a non-empty set.
    let dx = x_span.map_or(0.0, |(lo, hi)| clamp_span(visual.x, visual.width, lo, hi));
    let dy = y_span.map_or(0.0, |(lo, hi)| clamp_span(visual.y, visual.height, lo, hi));
    Overshoot { dx, dy }
}

/// The monitor with the smallest gap to `visual`; first wins on ties.
fn nearest_monitor(visual: Rect, monitors: &[Rect]) -> Rect {
    let mut best = monitors[0];
    let mut best_d = visual.distance_squared(&monitors[0]);
    for m in &monitors[1..] {
        let d = visual.distance_squared(m);
        if d < best_d {
            best = *m;
            best_d = d;
        }
    }
    best
}

/// Correction that moves the interval `[start, start + len)` into
/// `[span_start, span_end)`, pinning the start edge when it cannot fit.
fn clamp_span(start: f64, len: f64, span_start: f64, span_end: f64) -> f64 {
    if len > span_end - span_start {
        // Oversized: keep the start edge on the span's start.
        span_start - start
    } else if start < span_start {
        span_start - start
    } else if start + len > span_end {
        span_end - (start + len)
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MAIN: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

    fn apply(visual: Rect, o: Overshoot) -> Rect {
        visual.translated(o.dx, o.dy)
    }

    // ---- single monitor ---------------------------------------------------

    #[test]
    fn inside_is_zero() {
        let v = Rect::new(100.0, 100.0, 380.0, 480.0);
        assert_eq!(overshoot(v, &[MAIN]), Overshoot::ZERO);
    }

    #[test]
    fn past_left_edge_pushes_right() {
        let v = Rect::new(-100.0, 100.0, 380.0, 480.0);
        let o = overshoot(v, &[MAIN]);
        assert_eq!(o, Overshoot { dx: 100.0, dy: 0.0 });
        assert_eq!(overshoot(apply(v, o), &[MAIN]), Overshoot::ZERO);
    }

    #[test]
    fn past_bottom_right_pushes_up_left() {
        let v = Rect::new(1700.0, 900.0, 380.0, 480.0);
        let o = overshoot(v, &[MAIN]);
        assert_eq!(
            o,
            Overshoot {
                dx: -160.0,
                dy: -300.0
            }
        );
        assert_eq!(overshoot(apply(v, o), &[MAIN]), Overshoot::ZERO);
    }

    #[test]
    fn flush_with_edge_is_zero() {
        let v = Rect::new(0.0, 0.0, 380.0, 480.0);
        assert_eq!(overshoot(v, &[MAIN]), Overshoot::ZERO);
        let v = Rect::new(1540.0, 600.0, 380.0, 480.0);
        assert_eq!(overshoot(v, &[MAIN]), Overshoot::ZERO);
    }

    // ---- seams ------------------------------------------------------------

    #[test]
    fn straddling_side_by_side_seam_is_zero() {
        let right = Rect::new(1920.0, 0.0, 1920.0, 1080.0);
        let v = Rect::new(1700.0, 200.0, 380.0, 480.0);
        assert_eq!(overshoot(v, &[MAIN, right]), Overshoot::ZERO);
    }

    #[test]
    fn seam_with_mismatched_heights_is_lenient() {
        // The right monitor is shorter. While the rect still overlaps the
        // taller left monitor, its bottom edge past the short monitor's
        // bottom must not be pushed.
        let right = Rect::new(1920.0, 0.0, 1920.0, 800.0);
        let v = Rect::new(1700.0, 500.0, 380.0, 480.0);
        assert_eq!(overshoot(v, &[MAIN, right]), Overshoot::ZERO);
    }

    #[test]
    fn straddling_clamps_against_union_extent() {
        let right = Rect::new(1920.0, 0.0, 1920.0, 1080.0);
        // Hanging past the far right edge of the rightmost monitor.
        let v = Rect::new(3700.0, 200.0, 380.0, 480.0);
        let o = overshoot(v, &[MAIN, right]);
        assert_eq!(
            o,
            Overshoot {
                dx: -240.0,
                dy: 0.0
            }
        );
    }

    // ---- detached ---------------------------------------------------------

    #[test]
    fn detached_clamps_fully_into_nearest() {
        let right = Rect::new(2000.0, 500.0, 1920.0, 1080.0);
        // Below the dead corner of the L, overlapping neither monitor and
        // closer to the right one.
        let v = Rect::new(1930.0, 1600.0, 380.0, 480.0);
        let o = overshoot(v, &[MAIN, right]);
        assert_eq!(o, Overshoot { dx: 70.0, dy: -500.0 });
        let landed = apply(v, o);
        assert!(right.contains_rect(&landed), "landed outside: {landed:?}");
    }

    #[test]
    fn detached_ties_resolve_to_first_monitor() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(300.0, 0.0, 100.0, 100.0);
        // Equidistant from both.
        let v = Rect::new(180.0, 0.0, 40.0, 40.0);
        let o = overshoot(v, &[a, b]);
        assert!(a.contains_rect(&apply(v, o)));
        let o = overshoot(v, &[b, a]);
        assert!(b.contains_rect(&apply(v, o)));
    }

    #[test]
    fn detached_below_is_pushed_back_up() {
        let v = Rect::new(500.0, 1200.0, 380.0, 480.0);
        let o = overshoot(v, &[MAIN]);
        assert_eq!(
            o,
            Overshoot {
                dx: 0.0,
                dy: -600.0
            }
        );
        assert!(MAIN.contains_rect(&apply(v, o)));
    }

    // ---- degenerate inputs ------------------------------------------------

    #[test]
    fn no_monitors_is_zero() {
        let v = Rect::new(100.0, 100.0, 380.0, 480.0);
        assert_eq!(overshoot(v, &[]), Overshoot::ZERO);
    }

    #[test]
    fn oversized_rect_pins_start_edge() {
        let v = Rect::new(-500.0, -200.0, 4000.0, 3000.0);
        let o = overshoot(v, &[MAIN]);
        let landed = apply(v, o);
        assert_eq!(landed.left(), 0.0);
        assert_eq!(landed.top(), 0.0);
        // Pin is stable: a second application changes nothing.
        assert_eq!(overshoot(landed, &[MAIN]), Overshoot::ZERO);
    }

    // ---- Overshoot accessors ----------------------------------------------

    #[test]
    fn tolerance_check_uses_max_norm() {
        let o = Overshoot { dx: 0.8, dy: -0.9 };
        assert!(o.is_within(1.0));
        assert!(!o.is_within(0.5));
        assert!(!Overshoot { dx: 1.2, dy: 0.0 }.is_within(1.0));
    }

    #[test]
    fn scaled_halves_both_axes() {
        let o = Overshoot { dx: 100.0, dy: -60.0 };
        assert_eq!(
            o.scaled(0.5),
            Overshoot {
                dx: 50.0,
                dy: -30.0
            }
        );
    }

    #[test]
    fn magnitude_is_euclidean() {
        let o = Overshoot { dx: 3.0, dy: 4.0 };
        assert_eq!(o.magnitude(), 5.0);
    }
}
