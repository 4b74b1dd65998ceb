#![forbid(unsafe_code)]

//! Host traits for buoy: platform abstraction for windowing, monitors,
//! hit regions, and time.
//!
//! This crate defines the boundary between the geometry engine and the
//! platform shell that actually owns the window (a Tauri/webview host, a
//! winit app, or the scripted host in `buoy-harness`). The engine only
//! ever talks to these traits, which is what keeps every controller
//! testable without a display server.
//!
//! Window writes are asynchronous on every real platform, so `submit_move`
//! and `submit_frame` return a [`Ticket`] instead of blocking. The engine
//! keeps at most one ticket in flight per controller and polls
//! [`WindowHost::is_applied`] before issuing the next write; that single
//! rule is what prevents stale positions from landing out of order.

use core::time::Duration;

use buoy_geometry::{Alignment, LogicalSize, PhysicalPoint, PhysicalSize, Rect};

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

/// Identifier for one asynchronous window write.
///
/// Hosts mint tickets in submission order; the values themselves carry no
/// meaning beyond identity. A ticket becomes *applied* once the windowing
/// system has committed the write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Create a ticket with the given sequence value. Host-side only;
    /// engine code never constructs tickets.
    #[inline]
    #[must_use]
    pub const fn new(seq: u64) -> Self {
        Self(seq)
    }

    /// The raw sequence value, mainly for logging.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

// ---------------------------------------------------------------------------
// View modes
// ---------------------------------------------------------------------------

/// The widget's presentation modes.
///
/// Part of the host vocabulary because the presenter swaps rendered content
/// by mode; the per-mode geometry (nominal size, corner radius) lives in the
/// engine's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// The slim always-on-top pill the widget idles as.
    #[default]
    Toolbar,
    /// The compact panel with the result list.
    Collapsed,
    /// The full browser panel.
    Expanded,
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Monotonic clock abstraction.
///
/// The engine never calls `Instant::now()` directly; all time flows through
/// this trait so tests can drive animations deterministically.
pub trait HostClock {
    /// Returns elapsed time since an unspecified epoch, monotonically
    /// increasing.
    fn now_mono(&self) -> Duration;
}

/// Real clock backed by `web_time::Instant`, monotonic on native and wasm.
#[derive(Debug)]
pub struct SystemClock {
    origin: web_time::Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: web_time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl HostClock for SystemClock {
    fn now_mono(&self) -> Duration {
        self.origin.elapsed()
    }
}

// ---------------------------------------------------------------------------
// Window
// ---------------------------------------------------------------------------

/// The window itself: geometry queries and asynchronous geometry writes.
///
/// Queries are synchronous and cheap. Writes are queued; the host commits
/// them on its own schedule and flips the corresponding ticket to applied.
/// Writes are idempotent, so a failed or dropped write is safely re-issued
/// with fresh coordinates on the next frame.
pub trait WindowHost {
    /// Platform-specific error type.
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Physical-per-logical pixel ratio of the monitor hosting the window.
    fn scale_factor(&self) -> Result<f64, Self::Error>;

    /// Current frame origin (top-left) in physical pixels.
    fn outer_position(&self) -> Result<PhysicalPoint, Self::Error>;

    /// Current frame size in physical pixels.
    fn inner_size(&self) -> Result<PhysicalSize, Self::Error>;

    /// Queue a window move to `origin`.
    fn submit_move(&mut self, origin: PhysicalPoint) -> Result<Ticket, Self::Error>;

    /// Queue a combined move and resize, committed as one frame write so
    /// opposite edges stay fixed during corner resizes.
    fn submit_frame(
        &mut self,
        origin: PhysicalPoint,
        size: PhysicalSize,
    ) -> Result<Ticket, Self::Error>;

    /// True once the write identified by `ticket` has been committed.
    ///
    /// Unknown tickets (from a session that was torn down) report `true`;
    /// there is nothing left to wait for.
    fn is_applied(&self, ticket: Ticket) -> bool;
}

// ---------------------------------------------------------------------------
// Monitors
// ---------------------------------------------------------------------------

/// Monitor topology queries, in physical pixels.
///
/// Work areas exclude taskbars and docks. Gestures snapshot
/// [`MonitorSource::all_work_areas`] once at session start; boundary math
/// never re-queries mid-gesture.
pub trait MonitorSource {
    /// Platform-specific error type.
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Work area of the monitor currently containing the window.
    fn work_area(&self) -> Result<Rect, Self::Error>;

    /// Work areas of every connected monitor, in enumeration order.
    fn all_work_areas(&self) -> Result<Vec<Rect>, Self::Error>;
}

// ---------------------------------------------------------------------------
// Hit region
// ---------------------------------------------------------------------------

/// The OS-level clickable region of the window.
///
/// The window frame stays at maximum size while content shrinks, so without
/// region updates the invisible margin would swallow clicks meant for
/// whatever is behind the widget. Sizes are logical; the host converts at
/// its current scale factor.
pub trait HitRegionHost {
    /// Platform-specific error type.
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Reshape the clickable region to `size`, pinned at `alignment` within
    /// the frame.
    fn update_click_region(
        &mut self,
        size: LogicalSize,
        alignment: Alignment,
    ) -> Result<(), Self::Error>;
}

// ---------------------------------------------------------------------------
// Presenter
// ---------------------------------------------------------------------------

/// Presentation directives the transition sequencer drives.
///
/// These are fire-and-forget: the rendered content lives on the other side
/// of a process or thread boundary and reports nothing back. Timing is
/// owned by the engine's stage machine, not by the presenter.
pub trait ContentPresenter {
    /// Animate content opacity toward `opacity` over `duration`.
    fn fade_content(&mut self, opacity: f64, duration: Duration);

    /// Swap the rendered content to `mode`'s view.
    fn show_mode(&mut self, mode: ViewMode);

    /// Animate the visible shell to `size` and `corner_radius` over
    /// `duration`.
    fn animate_shell(&mut self, size: LogicalSize, corner_radius: f64, duration: Duration);
}

// ---------------------------------------------------------------------------
// Frames
// ---------------------------------------------------------------------------

/// Animation-frame scheduling.
///
/// `request_frame` arms at most one pending callback no matter how often it
/// is called before the frame fires; controllers re-arm from within the
/// frame while they have work left.
pub trait FrameScheduler {
    /// Request one callback on the next animation frame.
    fn request_frame(&mut self);
}

// ---------------------------------------------------------------------------
// Umbrella
// ---------------------------------------------------------------------------

/// Unified host combining window, monitors, hit region, presenter, frames,
/// and clock.
///
/// The engine is generic over this trait. Concrete implementations:
/// - the production shell that wraps the real window handle;
/// - `buoy-harness`'s scripted host for deterministic tests.
pub trait WidgetHost {
    /// Platform-specific error type shared across sub-traits.
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Clock implementation.
    type Clock: HostClock;

    /// Window implementation.
    type Window: WindowHost<Error = Self::Error>;

    /// Monitor topology implementation.
    type Monitors: MonitorSource<Error = Self::Error>;

    /// Hit-region implementation.
    type HitRegion: HitRegionHost<Error = Self::Error>;

    /// Presenter implementation.
    type Presenter: ContentPresenter;

    /// Frame scheduler implementation.
    type Frames: FrameScheduler;

    /// Access the monotonic clock.
    fn clock(&self) -> &Self::Clock;

    /// Access the window (mutable for submissions).
    fn window(&mut self) -> &mut Self::Window;

    /// Access the window read-only (queries only).
    fn window_ref(&self) -> &Self::Window;

    /// Access monitor topology.
    fn monitors(&self) -> &Self::Monitors;

    /// Access the hit-region service.
    fn hit_region(&mut self) -> &mut Self::HitRegion;

    /// Access the presenter.
    fn presenter(&mut self) -> &mut Self::Presenter;

    /// Access the frame scheduler.
    fn frames(&mut self) -> &mut Self::Frames;
}
