//! Drag gesture controller.
//!
//! Raw pointer events never touch the window. A press captures a session
//! snapshot and arms the frame loop; moves only update the cached pointer;
//! each animation frame recomputes the candidate origin from scratch,
//! applies damped boundary resistance, and submits at most one window move.
//! Release reads the authoritative position back and, when the window was
//! left hanging past a boundary, animates it home with an elastic snap-back.
//!
//! Submission is ticket-gated: while the previous write is unapplied the
//! frame is skipped entirely, and the next submission uses freshly computed
//! coordinates. Stale positions can therefore never land out of order.

use core::time::Duration;

use buoy_geometry::{
    Alignment, LogicalPoint, LogicalSize, PhysicalPoint, PhysicalSize, Rect, ease_out_elastic,
    overshoot,
};
use buoy_host::{FrameScheduler, HostClock, Ticket, WidgetHost, WindowHost};

use crate::animation::Tween;
use crate::config::DragConfig;
use crate::pointer::{PointerButton, PointerTarget};
use crate::session::probe_session;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// World snapshot captured at the press. Fixed for the life of the gesture;
/// per-frame math never re-queries the host.
#[derive(Debug, Clone)]
struct DragSession {
    /// Pointer position at the press, in logical screen coordinates.
    start_pointer: LogicalPoint,
    /// Window origin at the press.
    start_origin: PhysicalPoint,
    /// Frame size at the press.
    frame: PhysicalSize,
    /// Visible content size at the press, converted to physical.
    content: PhysicalSize,
    /// Content alignment within the frame.
    alignment: Alignment,
    /// Scale factor at the press.
    scale: f64,
    /// Monitor work areas at the press.
    monitors: Vec<Rect>,
}

#[derive(Debug)]
enum DragState {
    Idle,
    Dragging {
        session: DragSession,
        latest_pointer: LogicalPoint,
        /// Set once the pointer leaves the click threshold; never unset.
        has_dragged: bool,
        in_flight: Option<Ticket>,
        last_submitted: Option<PhysicalPoint>,
    },
    Settling {
        from: PhysicalPoint,
        to: PhysicalPoint,
        tween: Tween,
        last_tick: Duration,
        in_flight: Option<Ticket>,
    },
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of a pointer press offered to the drag controller.
#[derive(Debug)]
pub enum DragStartOutcome<E> {
    /// Session captured; the window follows the pointer from the next frame.
    Started,
    /// Press ignored by policy; nothing changed.
    Rejected(DragRejection),
    /// A session query failed; nothing changed.
    Failed(E),
}

/// Why a press did not start a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragRejection {
    /// Only the primary button starts drags.
    NotPrimaryButton,
    /// The press landed on an interactive element without a drag override.
    InteractiveTarget,
    /// A drag or snap-back is already in progress.
    GestureActive,
    /// A view-mode transition currently owns the window geometry.
    TransitionActive,
}

/// What one animation frame did for the drag controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragFrameOutcome {
    /// No gesture in progress.
    Inactive,
    /// A fresh position was submitted.
    Submitted,
    /// Submission failed and was swallowed; the next frame retries.
    SubmitFailed,
    /// The previous write is still unapplied; the frame was skipped.
    AwaitingApply,
    /// The pointer has not crossed the drag threshold.
    BelowThreshold,
    /// Computed position identical to the last submission; skipped.
    Unchanged,
    /// Snap-back advanced one frame.
    Settling,
    /// Snap-back landed on its target; the controller is idle again.
    Settled,
}

/// Result of releasing the pointer.
#[derive(Debug)]
pub enum DragEndOutcome<E> {
    /// No drag was in progress.
    Inactive,
    /// The press never crossed the threshold; the window never moved.
    Click,
    /// Released at an admissible position (within tolerance); done.
    Released,
    /// Released past a boundary; snap-back animation started.
    SnappingBack,
    /// The authoritative position read failed; the gesture was abandoned
    /// and the window left where the host last put it.
    ReadFailed(E),
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// The drag state machine: `Idle -> Dragging -> (Settling ->) Idle`.
#[derive(Debug)]
pub struct DragController {
    config: DragConfig,
    state: DragState,
}

impl DragController {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            state: DragState::Idle,
        }
    }

    /// True while a drag or snap-back is in progress. The window's geometry
    /// belongs to this controller for the duration.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// True while the pointer is down and dragging.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// True while the release snap-back is animating.
    pub fn is_settling(&self) -> bool {
        matches!(self.state, DragState::Settling { .. })
    }

    /// Offer a pointer press. On success the session is captured and the
    /// frame loop armed; the window itself is not touched yet.
    ///
    /// `content` and `alignment` describe the currently visible content
    /// within the frame, which is what boundary math clamps (the invisible
    /// frame margin may hang off-screen freely).
    pub fn pointer_down<H: WidgetHost>(
        &mut self,
        host: &mut H,
        pointer: LogicalPoint,
        button: PointerButton,
        target: PointerTarget,
        content: LogicalSize,
        alignment: Alignment,
    ) -> DragStartOutcome<H::Error> {
        if self.is_active() {
            return DragStartOutcome::Rejected(DragRejection::GestureActive);
        }
        if button != PointerButton::Primary {
            return DragStartOutcome::Rejected(DragRejection::NotPrimaryButton);
        }
        if !target.allows_drag() {
            return DragStartOutcome::Rejected(DragRejection::InteractiveTarget);
        }

        let probe = match probe_session(host) {
            Ok(probe) => probe,
            Err(err) => {
                tracing::warn!(
                    target: "buoy.drag",
                    error = %err,
                    "session query failed; drag not started"
                );
                return DragStartOutcome::Failed(err);
            }
        };

        let session = DragSession {
            start_pointer: pointer,
            start_origin: probe.window.origin,
            frame: probe.window.frame,
            content: content.to_physical(probe.window.scale),
            alignment,
            scale: probe.window.scale,
            monitors: probe.monitors,
        };
        tracing::debug!(
            target: "buoy.drag",
            origin = ?session.start_origin,
            scale = session.scale,
            monitors = session.monitors.len(),
            "drag session started"
        );
        self.state = DragState::Dragging {
            session,
            latest_pointer: pointer,
            has_dragged: false,
            in_flight: None,
            last_submitted: None,
        };
        host.frames().request_frame();
        DragStartOutcome::Started
    }

    /// Record pointer movement. Only the cached position changes here; all
    /// geometry runs on the next animation frame.
    pub fn pointer_moved(&mut self, pointer: LogicalPoint) {
        if let DragState::Dragging {
            session,
            latest_pointer,
            has_dragged,
            ..
        } = &mut self.state
        {
            *latest_pointer = pointer;
            if !*has_dragged {
                let threshold_sq = self.config.threshold * self.config.threshold;
                if pointer.distance_squared(session.start_pointer) > threshold_sq {
                    *has_dragged = true;
                }
            }
        }
    }

    /// Run one animation frame.
    pub fn on_frame<H: WidgetHost>(&mut self, host: &mut H) -> DragFrameOutcome {
        match &self.state {
            DragState::Idle => DragFrameOutcome::Inactive,
            DragState::Dragging { .. } => self.drag_frame(host),
            DragState::Settling { .. } => self.settle_frame(host),
        }
    }

    /// Release the pointer and decide what the window still owes.
    pub fn pointer_up<H: WidgetHost>(&mut self, host: &mut H) -> DragEndOutcome<H::Error> {
        if !self.is_dragging() {
            return DragEndOutcome::Inactive;
        }
        let DragState::Dragging {
            session,
            has_dragged,
            in_flight,
            ..
        } = std::mem::replace(&mut self.state, DragState::Idle)
        else {
            return DragEndOutcome::Inactive;
        };

        if !has_dragged {
            tracing::debug!(target: "buoy.drag", "released below threshold; click");
            return DragEndOutcome::Click;
        }

        // The last submission may not have applied yet; what the window
        // actually has is the only position worth correcting.
        let released = match host.window_ref().outer_position() {
            Ok(origin) => origin,
            Err(err) => {
                tracing::warn!(
                    target: "buoy.drag",
                    error = %err,
                    "position read failed on release; leaving window as-is"
                );
                return DragEndOutcome::ReadFailed(err);
            }
        };

        let visual = session
            .alignment
            .visual_rect(released, session.frame, session.content);
        let correction = overshoot(visual, &session.monitors);
        if correction.is_within(self.config.settle_tolerance) {
            tracing::debug!(target: "buoy.drag", origin = ?released, "released within bounds");
            return DragEndOutcome::Released;
        }

        let target = released.translated(correction.dx, correction.dy);
        let duration = self.snap_back_duration(correction.magnitude());
        tracing::debug!(
            target: "buoy.drag",
            from = ?released,
            to = ?target,
            duration_ms = duration.as_millis() as u64,
            "snap-back started"
        );
        self.state = DragState::Settling {
            from: released,
            to: target,
            tween: Tween::new(duration, ease_out_elastic),
            last_tick: host.clock().now_mono(),
            in_flight,
        };
        host.frames().request_frame();
        DragEndOutcome::SnappingBack
    }

    /// Abandon any gesture immediately. Pending window writes are left to
    /// land or fail on their own; nothing further is submitted.
    pub fn cancel(&mut self) {
        if self.is_active() {
            tracing::debug!(target: "buoy.drag", "drag cancelled");
            self.state = DragState::Idle;
        }
    }

    // ---- frame handlers ----------------------------------------------------

    fn drag_frame<H: WidgetHost>(&mut self, host: &mut H) -> DragFrameOutcome {
        let damping = self.config.damping;
        let DragState::Dragging {
            session,
            latest_pointer,
            has_dragged,
            in_flight,
            last_submitted,
        } = &mut self.state
        else {
            return DragFrameOutcome::Inactive;
        };

        // The loop stays armed for as long as the pointer is down.
        host.frames().request_frame();

        if let Some(ticket) = *in_flight {
            if !host.window_ref().is_applied(ticket) {
                return DragFrameOutcome::AwaitingApply;
            }
            *in_flight = None;
        }

        if !*has_dragged {
            return DragFrameOutcome::BelowThreshold;
        }

        let dx = (latest_pointer.x - session.start_pointer.x) * session.scale;
        let dy = (latest_pointer.y - session.start_pointer.y) * session.scale;
        let candidate = session.start_origin.translated(dx, dy);

        let visual = session
            .alignment
            .visual_rect(candidate, session.frame, session.content);
        let resist = overshoot(visual, &session.monitors).scaled(damping);
        let damped = candidate.translated(resist.dx, resist.dy);

        if *last_submitted == Some(damped) {
            return DragFrameOutcome::Unchanged;
        }

        match host.window().submit_move(damped) {
            Ok(ticket) => {
                *in_flight = Some(ticket);
                *last_submitted = Some(damped);
                DragFrameOutcome::Submitted
            }
            Err(err) => {
                // Transient: the next frame recomputes and retries.
                tracing::debug!(
                    target: "buoy.drag",
                    error = %err,
                    "submit_move failed; retrying next frame"
                );
                DragFrameOutcome::SubmitFailed
            }
        }
    }

    fn settle_frame<H: WidgetHost>(&mut self, host: &mut H) -> DragFrameOutcome {
        let now = host.clock().now_mono();
        let DragState::Settling {
            from,
            to,
            tween,
            last_tick,
            in_flight,
        } = &mut self.state
        else {
            return DragFrameOutcome::Inactive;
        };

        // Animation time is wall time, not frame count; skipped frames do
        // not slow the snap-back down.
        let dt = now.saturating_sub(*last_tick);
        *last_tick = now;
        tween.tick(dt);

        let origin = *from;
        let target = *to;

        if let Some(ticket) = *in_flight {
            if !host.window_ref().is_applied(ticket) {
                host.frames().request_frame();
                return DragFrameOutcome::AwaitingApply;
            }
            *in_flight = None;
        }

        if tween.is_complete() {
            // Land exactly on the corrected position.
            match host.window().submit_move(target) {
                Ok(_) => {
                    tracing::debug!(target: "buoy.drag", to = ?target, "snap-back settled");
                    self.state = DragState::Idle;
                    DragFrameOutcome::Settled
                }
                Err(err) => {
                    tracing::debug!(
                        target: "buoy.drag",
                        error = %err,
                        "final snap-back submit failed; retrying next frame"
                    );
                    host.frames().request_frame();
                    DragFrameOutcome::Settling
                }
            }
        } else {
            let t = tween.value();
            let pos = PhysicalPoint::new(
                origin.x + (target.x - origin.x) * t,
                origin.y + (target.y - origin.y) * t,
            );
            match host.window().submit_move(pos) {
                Ok(ticket) => *in_flight = Some(ticket),
                Err(err) => {
                    tracing::debug!(
                        target: "buoy.drag",
                        error = %err,
                        "snap-back submit failed; retrying next frame"
                    );
                }
            }
            host.frames().request_frame();
            DragFrameOutcome::Settling
        }
    }

    /// Snap-back duration scales linearly with correction distance, clamped
    /// to the configured bounds at the reference distance.
    fn snap_back_duration(&self, distance: f64) -> Duration {
        let min = self.config.snap_back_min_ms as f64;
        let max = self.config.snap_back_max_ms as f64;
        let t = (distance / self.config.snap_back_reference_px).clamp(0.0, 1.0);
        Duration::from_millis((min + (max - min) * t).round() as u64)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
