//! Property-based invariant tests for boundary overshoot.
//!
//! These tests verify the correction policy over generated monitor layouts
//! (side-by-side rows and stacked columns with misaligned edges, the shapes
//! real desktops take):
//!
//! 1. A rect contained in any single monitor needs no correction
//! 2. Zero correction implies the rect overlaps the monitor set
//! 3. A detached rect lands fully inside a monitor after one application
//! 4. A straddling rect never detaches: every monitor it overlapped before
//!    the correction is still overlapped after
//! 5. Single-monitor corrections are exact, and damped corrections leave
//!    exactly the undamped complement behind
//! 6. No generated input panics or produces non-finite output

use buoy_geometry::{Overshoot, Rect, overshoot};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────
//
// All coordinates are whole pixels, matching what monitor enumeration
// reports. Integral f64 values make every sum and clamp exact, so the
// properties below can assert equality instead of tolerances.

/// Monitor width, height, and cross-axis offset in whole pixels.
fn monitor_dims() -> impl Strategy<Value = (u32, u32, i32)> {
    (800u32..3000, 600u32..2000, -290i32..290)
}

/// Side-by-side work areas sharing vertical seams, tops misaligned by up to
/// 290 px. Every monitor is at least 800x600, so every pair overlaps in y.
fn row_layout() -> impl Strategy<Value = Vec<Rect>> {
    prop::collection::vec(monitor_dims(), 1..=3).prop_map(|dims| {
        let mut x = 0.0;
        dims.into_iter()
            .map(|(w, h, y_off)| {
                let m = Rect::new(x, f64::from(y_off), f64::from(w), f64::from(h));
                x += f64::from(w);
                m
            })
            .collect()
    })
}

/// Stacked work areas sharing horizontal seams, lefts misaligned by up to
/// 290 px.
fn column_layout() -> impl Strategy<Value = Vec<Rect>> {
    prop::collection::vec(monitor_dims(), 1..=3).prop_map(|dims| {
        let mut y = 0.0;
        dims.into_iter()
            .map(|(w, h, x_off)| {
                let m = Rect::new(f64::from(x_off), y, f64::from(w), f64::from(h));
                y += f64::from(h);
                m
            })
            .collect()
    })
}

fn layout() -> impl Strategy<Value = Vec<Rect>> {
    prop_oneof![row_layout(), column_layout()]
}

/// A widget-sized rect anywhere near the layouts, strictly smaller than the
/// smallest monitor the strategies can produce.
fn widget_rect() -> impl Strategy<Value = Rect> {
    (-1500i32..7000, -1500i32..5000, 100u32..790, 60u32..590).prop_map(|(x, y, w, h)| {
        Rect::new(f64::from(x), f64::from(y), f64::from(w), f64::from(h))
    })
}

/// A layout plus a rect guaranteed to lie inside one of its monitors.
fn layout_with_contained_rect() -> impl Strategy<Value = (Vec<Rect>, Rect)> {
    layout().prop_flat_map(|monitors| {
        let n = monitors.len();
        (
            Just(monitors),
            0..n,
            0.0f64..=1.0,
            0.0f64..=1.0,
            0.05f64..=1.0,
            0.05f64..=1.0,
        )
            .prop_map(|(monitors, i, fx, fy, fw, fh)| {
                let m = monitors[i];
                // Whole-pixel size and offset keep containment exact.
                let w = (m.width * fw).floor();
                let h = (m.height * fh).floor();
                let x = m.x + ((m.width - w) * fx).floor();
                let y = m.y + ((m.height - h) * fy).floor();
                (monitors, Rect::new(x, y, w, h))
            })
    })
}

fn single_monitor() -> impl Strategy<Value = Rect> {
    (-500i32..500, -500i32..500, 800u32..3000, 600u32..2000).prop_map(|(x, y, w, h)| {
        Rect::new(f64::from(x), f64::from(y), f64::from(w), f64::from(h))
    })
}

fn apply(rect: Rect, o: Overshoot) -> Rect {
    rect.translated(o.dx, o.dy)
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Containment means no correction
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn contained_rect_needs_no_correction((monitors, rect) in layout_with_contained_rect()) {
        prop_assert_eq!(
            overshoot(rect, &monitors),
            Overshoot::ZERO,
            "rect {:?} inside a monitor of {:?} must not be corrected",
            rect,
            monitors
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Zero correction only happens on the monitor set
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn zero_correction_implies_overlap(monitors in layout(), rect in widget_rect()) {
        let o = overshoot(rect, &monitors);
        if o.is_zero() {
            prop_assert!(
                monitors.iter().any(|m| rect.intersects(m)),
                "detached rect {rect:?} reported zero overshoot"
            );
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Detached rects are pushed fully inside a monitor
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn detached_rect_lands_inside_a_monitor(monitors in layout(), rect in widget_rect()) {
        let detached = !monitors.iter().any(|m| rect.intersects(m));
        if detached {
            let o = overshoot(rect, &monitors);
            let landed = apply(rect, o);
            prop_assert!(
                monitors.iter().any(|m| m.contains_rect(&landed)),
                "detached rect {rect:?} landed at {landed:?}, outside all of {monitors:?}"
            );
            prop_assert_eq!(overshoot(landed, &monitors), Overshoot::ZERO);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Straddling rects never detach
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn straddling_rect_never_detaches(monitors in layout(), rect in widget_rect()) {
        let hit: Vec<usize> = (0..monitors.len())
            .filter(|&i| rect.intersects(&monitors[i]))
            .collect();
        if !hit.is_empty() {
            let o = overshoot(rect, &monitors);
            let landed = apply(rect, o);
            for i in hit {
                prop_assert!(
                    landed.intersects(&monitors[i]),
                    "correction moved {rect:?} off monitor {i} to {landed:?}"
                );
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Single-monitor corrections are exact
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn single_monitor_application_is_exact(monitor in single_monitor(), rect in widget_rect()) {
        let o = overshoot(rect, &[monitor]);
        let landed = apply(rect, o);
        prop_assert!(
            monitor.contains_rect(&landed),
            "landed {landed:?} outside {monitor:?}"
        );
        prop_assert_eq!(overshoot(landed, &[monitor]), Overshoot::ZERO);
    }

    #[test]
    fn single_monitor_damping_leaves_complement(
        monitor in single_monitor(),
        rect in widget_rect(),
        damping in 0.1f64..0.9,
    ) {
        let raw = overshoot(rect, &[monitor]);
        let partial = apply(rect, raw.scaled(damping));
        let residue = overshoot(partial, &[monitor]);
        prop_assert!(
            (residue.dx - (1.0 - damping) * raw.dx).abs() < 1e-6,
            "x residue {} vs expected {}",
            residue.dx,
            (1.0 - damping) * raw.dx
        );
        prop_assert!(
            (residue.dy - (1.0 - damping) * raw.dy).abs() < 1e-6,
            "y residue {} vs expected {}",
            residue.dy,
            (1.0 - damping) * raw.dy
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 6. Output is always finite
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn correction_is_finite(monitors in layout(), rect in widget_rect()) {
        let o = overshoot(rect, &monitors);
        prop_assert!(o.dx.is_finite() && o.dy.is_finite(), "non-finite correction {o:?}");
    }

    #[test]
    fn empty_layout_is_never_corrected(rect in widget_rect()) {
        prop_assert_eq!(overshoot(rect, &[]), Overshoot::ZERO);
    }
}
