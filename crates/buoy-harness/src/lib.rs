#![forbid(unsafe_code)]

//! Deterministic test host for buoy.
//!
//! [`ScriptedHost`] implements every `buoy-host` trait on a single struct so
//! engine tests can run whole gestures without a display server:
//!
//! - **Manual time**: `advance` moves the clock; nothing else does.
//! - **Scripted asynchrony**: window writes stay pending until the test calls
//!   `commit_next`/`commit_all`, which is how backpressure paths (skipped
//!   frames, stale-write suppression) are exercised on purpose.
//! - **Failure injection**: the next N submissions or session queries can be
//!   made to fail, driving the swallow-and-retry and abort-before-capture
//!   paths.
//! - **Effect log**: every externally visible host effect is recorded in
//!   order as a [`HostCall`], so tests assert sequencing ("hit region grew
//!   before the content swap") rather than just end states.
//!
//! The scripted pieces are all synchronous and single-threaded; determinism
//! comes from the test owning every commit and every clock step.

use core::time::Duration;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use buoy_geometry::{Alignment, LogicalSize, PhysicalPoint, PhysicalSize, Rect};
use buoy_host::{
    ContentPresenter, FrameScheduler, HitRegionHost, HostClock, MonitorSource, Ticket, ViewMode,
    WidgetHost, WindowHost,
};

// ---------------------------------------------------------------------------
// Effect log
// ---------------------------------------------------------------------------

/// One externally visible host effect, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    /// `submit_move(origin)` accepted.
    SubmitMove(PhysicalPoint),
    /// `submit_frame(origin, size)` accepted.
    SubmitFrame(PhysicalPoint, PhysicalSize),
    /// `update_click_region(size, alignment)` accepted.
    HitRegion(LogicalSize, Alignment),
    /// `fade_content(opacity, _)`.
    FadeContent(f64),
    /// `show_mode(mode)`.
    ShowMode(ViewMode),
    /// `animate_shell(size, corner_radius, _)`.
    AnimateShell(LogicalSize, f64),
    /// `request_frame()` observed (logged even when coalesced).
    RequestFrame,
}

/// Error produced by scripted failures.
#[derive(Debug)]
pub struct ScriptError(pub &'static str);

impl core::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "scripted host failure: {}", self.0)
    }
}

impl std::error::Error for ScriptError {}

#[derive(Debug, Clone, Copy)]
struct PendingWrite {
    seq: u64,
    origin: PhysicalPoint,
    size: Option<PhysicalSize>,
}

// ---------------------------------------------------------------------------
// ScriptedHost
// ---------------------------------------------------------------------------

/// A fully scripted [`WidgetHost`] implementation.
///
/// All six host roles are implemented by this one struct (every associated
/// type on [`WidgetHost`] is `Self`), which keeps test plumbing to a single
/// value.
#[derive(Debug)]
pub struct ScriptedHost {
    now: Duration,
    scale: f64,
    origin: PhysicalPoint,
    frame_size: PhysicalSize,
    monitors: Vec<Rect>,
    auto_commit: bool,

    next_seq: u64,
    committed_seq: u64,
    pending: VecDeque<PendingWrite>,

    pending_frame: bool,
    total_frame_requests: usize,

    calls: RefCell<Vec<HostCall>>,

    fail_submits: u32,
    fail_scale_queries: Cell<u32>,
    fail_position_queries: Cell<u32>,
    fail_monitor_queries: Cell<u32>,
    fail_hit_region_updates: u32,
}

impl ScriptedHost {
    /// A host with one 1920x1080 monitor at scale 1.0 and the window frame
    /// parked at (100, 100) sized 1200x800.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            scale: 1.0,
            origin: PhysicalPoint::new(100.0, 100.0),
            frame_size: PhysicalSize::new(1200.0, 800.0),
            monitors: vec![Rect::new(0.0, 0.0, 1920.0, 1080.0)],
            auto_commit: true,
            next_seq: 0,
            committed_seq: 0,
            pending: VecDeque::new(),
            pending_frame: false,
            total_frame_requests: 0,
            calls: RefCell::new(Vec::new()),
            fail_submits: 0,
            fail_scale_queries: Cell::new(0),
            fail_position_queries: Cell::new(0),
            fail_monitor_queries: Cell::new(0),
            fail_hit_region_updates: 0,
        }
    }

    /// Replace the monitor set.
    #[must_use]
    pub fn with_monitors(mut self, monitors: Vec<Rect>) -> Self {
        self.monitors = monitors;
        self
    }

    /// Set the reported scale factor.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Park the window frame at `origin` with `size`.
    #[must_use]
    pub fn with_frame(mut self, origin: PhysicalPoint, size: PhysicalSize) -> Self {
        self.origin = origin;
        self.frame_size = size;
        self
    }

    /// When `false`, writes stay pending until [`Self::commit_next`] or
    /// [`Self::commit_all`]; when `true` (the default), every write commits
    /// as it is submitted.
    #[must_use]
    pub fn with_auto_commit(mut self, auto_commit: bool) -> Self {
        self.auto_commit = auto_commit;
        self
    }

    // ---- time -------------------------------------------------------------

    /// Advance the manual clock.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    // ---- asynchronous write scripting --------------------------------------

    /// Commit the oldest pending write. Returns `false` when none is pending.
    pub fn commit_next(&mut self) -> bool {
        match self.pending.pop_front() {
            Some(write) => {
                self.apply(write);
                true
            }
            None => false,
        }
    }

    /// Commit every pending write in order.
    pub fn commit_all(&mut self) {
        while self.commit_next() {}
    }

    /// Number of submitted but uncommitted writes.
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    fn apply(&mut self, write: PendingWrite) {
        self.origin = write.origin;
        if let Some(size) = write.size {
            self.frame_size = size;
        }
        self.committed_seq = write.seq;
    }

    // ---- failure injection -------------------------------------------------

    /// Fail the next `n` `submit_move`/`submit_frame` calls.
    pub fn fail_next_submits(&mut self, n: u32) {
        self.fail_submits = n;
    }

    /// Fail the next `n` `scale_factor` queries.
    pub fn fail_next_scale_queries(&mut self, n: u32) {
        self.fail_scale_queries.set(n);
    }

    /// Fail the next `n` `outer_position`/`inner_size` queries.
    pub fn fail_next_position_queries(&mut self, n: u32) {
        self.fail_position_queries.set(n);
    }

    /// Fail the next `n` monitor queries.
    pub fn fail_next_monitor_queries(&mut self, n: u32) {
        self.fail_monitor_queries.set(n);
    }

    /// Fail the next `n` hit-region updates.
    pub fn fail_next_hit_region_updates(&mut self, n: u32) {
        self.fail_hit_region_updates = n;
    }

    fn consume(counter: &Cell<u32>) -> bool {
        let n = counter.get();
        if n > 0 {
            counter.set(n - 1);
            true
        } else {
            false
        }
    }

    // ---- observation -------------------------------------------------------

    /// The committed window origin.
    #[must_use]
    pub fn committed_origin(&self) -> PhysicalPoint {
        self.origin
    }

    /// The committed window frame size.
    #[must_use]
    pub fn committed_frame_size(&self) -> PhysicalSize {
        self.frame_size
    }

    /// Snapshot of the effect log.
    #[must_use]
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    /// Drain the effect log.
    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    /// Consume the pending animation-frame request, if armed. Test loops
    /// drive the engine with `while host.take_frame_request() { ... }`.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.pending_frame)
    }

    /// Total `request_frame` calls, including coalesced ones.
    #[must_use]
    pub fn frame_requests(&self) -> usize {
        self.total_frame_requests
    }

    fn log(&self, call: HostCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Default for ScriptedHost {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Host trait implementations
// ---------------------------------------------------------------------------

impl HostClock for ScriptedHost {
    fn now_mono(&self) -> Duration {
        self.now
    }
}

impl WindowHost for ScriptedHost {
    type Error = ScriptError;

    fn scale_factor(&self) -> Result<f64, Self::Error> {
        if Self::consume(&self.fail_scale_queries) {
            tracing::debug!(target: "buoy.harness", "injected scale_factor failure");
            return Err(ScriptError("scale_factor"));
        }
        Ok(self.scale)
    }

    fn outer_position(&self) -> Result<PhysicalPoint, Self::Error> {
        if Self::consume(&self.fail_position_queries) {
            tracing::debug!(target: "buoy.harness", "injected outer_position failure");
            return Err(ScriptError("outer_position"));
        }
        Ok(self.origin)
    }

    fn inner_size(&self) -> Result<PhysicalSize, Self::Error> {
        if Self::consume(&self.fail_position_queries) {
            tracing::debug!(target: "buoy.harness", "injected inner_size failure");
            return Err(ScriptError("inner_size"));
        }
        Ok(self.frame_size)
    }

    fn submit_move(&mut self, origin: PhysicalPoint) -> Result<Ticket, Self::Error> {
        if self.fail_submits > 0 {
            self.fail_submits -= 1;
            tracing::debug!(target: "buoy.harness", "injected submit_move failure");
            return Err(ScriptError("submit_move"));
        }
        self.log(HostCall::SubmitMove(origin));
        self.next_seq += 1;
        let write = PendingWrite {
            seq: self.next_seq,
            origin,
            size: None,
        };
        if self.auto_commit {
            self.apply(write);
        } else {
            self.pending.push_back(write);
        }
        Ok(Ticket::new(self.next_seq))
    }

    fn submit_frame(
        &mut self,
        origin: PhysicalPoint,
        size: PhysicalSize,
    ) -> Result<Ticket, Self::Error> {
        if self.fail_submits > 0 {
            self.fail_submits -= 1;
            tracing::debug!(target: "buoy.harness", "injected submit_frame failure");
            return Err(ScriptError("submit_frame"));
        }
        self.log(HostCall::SubmitFrame(origin, size));
        self.next_seq += 1;
        let write = PendingWrite {
            seq: self.next_seq,
            origin,
            size: Some(size),
        };
        if self.auto_commit {
            self.apply(write);
        } else {
            self.pending.push_back(write);
        }
        Ok(Ticket::new(self.next_seq))
    }

    fn is_applied(&self, ticket: Ticket) -> bool {
        ticket.value() <= self.committed_seq
    }
}

impl MonitorSource for ScriptedHost {
    type Error = ScriptError;

    fn work_area(&self) -> Result<Rect, Self::Error> {
        if Self::consume(&self.fail_monitor_queries) {
            tracing::debug!(target: "buoy.harness", "injected work_area failure");
            return Err(ScriptError("work_area"));
        }
        // The monitor containing the window origin, falling back to the
        // primary.
        let origin = self.origin;
        self.monitors
            .iter()
            .find(|m| m.contains(origin))
            .or_else(|| self.monitors.first())
            .copied()
            .ok_or(ScriptError("no monitors"))
    }

    fn all_work_areas(&self) -> Result<Vec<Rect>, Self::Error> {
        if Self::consume(&self.fail_monitor_queries) {
            tracing::debug!(target: "buoy.harness", "injected all_work_areas failure");
            return Err(ScriptError("all_work_areas"));
        }
        Ok(self.monitors.clone())
    }
}

impl HitRegionHost for ScriptedHost {
    type Error = ScriptError;

    fn update_click_region(
        &mut self,
        size: LogicalSize,
        alignment: Alignment,
    ) -> Result<(), Self::Error> {
        if self.fail_hit_region_updates > 0 {
            self.fail_hit_region_updates -= 1;
            tracing::debug!(target: "buoy.harness", "injected hit-region failure");
            return Err(ScriptError("update_click_region"));
        }
        self.log(HostCall::HitRegion(size, alignment));
        Ok(())
    }
}

impl ContentPresenter for ScriptedHost {
    fn fade_content(&mut self, opacity: f64, _duration: Duration) {
        self.log(HostCall::FadeContent(opacity));
    }

    fn show_mode(&mut self, mode: ViewMode) {
        self.log(HostCall::ShowMode(mode));
    }

    fn animate_shell(&mut self, size: LogicalSize, corner_radius: f64, _duration: Duration) {
        self.log(HostCall::AnimateShell(size, corner_radius));
    }
}

impl FrameScheduler for ScriptedHost {
    fn request_frame(&mut self) {
        self.log(HostCall::RequestFrame);
        self.total_frame_requests += 1;
        self.pending_frame = true;
    }
}

impl WidgetHost for ScriptedHost {
    type Error = ScriptError;
    type Clock = Self;
    type Window = Self;
    type Monitors = Self;
    type HitRegion = Self;
    type Presenter = Self;
    type Frames = Self;

    fn clock(&self) -> &Self::Clock {
        self
    }

    fn window(&mut self) -> &mut Self::Window {
        self
    }

    fn window_ref(&self) -> &Self::Window {
        self
    }

    fn monitors(&self) -> &Self::Monitors {
        self
    }

    fn hit_region(&mut self) -> &mut Self::HitRegion {
        self
    }

    fn presenter(&mut self) -> &mut Self::Presenter {
        self
    }

    fn frames(&mut self) -> &mut Self::Frames {
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
