//! Gesture session snapshots.
//!
//! Every gesture reads its world exactly once, at pointer-down: surface
//! scale, window origin, frame size, and (for drags) the monitor layout.
//! The snapshot stays fixed for the life of the gesture so per-frame math
//! never blocks on host queries and a monitor change mid-drag cannot make
//! the window jump.

use buoy_geometry::{PhysicalPoint, PhysicalSize, Rect};
use buoy_host::{MonitorSource, WidgetHost, WindowHost};

/// Window geometry captured at gesture start.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WindowProbe {
    pub scale: f64,
    pub origin: PhysicalPoint,
    pub frame: PhysicalSize,
}

/// A [`WindowProbe`] plus the monitor layout, for boundary-aware gestures.
#[derive(Debug, Clone)]
pub(crate) struct SessionProbe {
    pub window: WindowProbe,
    pub monitors: Vec<Rect>,
}

/// Read scale, origin, and frame size. Any failed query aborts the gesture
/// before it starts.
pub(crate) fn probe_window<H: WidgetHost>(host: &H) -> Result<WindowProbe, H::Error> {
    let window = host.window_ref();
    Ok(WindowProbe {
        scale: window.scale_factor()?,
        origin: window.outer_position()?,
        frame: window.inner_size()?,
    })
}

/// Read the full drag-session snapshot, monitors included.
pub(crate) fn probe_session<H: WidgetHost>(host: &H) -> Result<SessionProbe, H::Error> {
    let window = probe_window(host)?;
    let monitors = host.monitors().all_work_areas()?;
    Ok(SessionProbe { window, monitors })
}
