//! Corner resize controller.
//!
//! Same frame discipline as dragging: events cache, frames compute and
//! submit. A corner resize changes origin and size in one `submit_frame`
//! write so the opposite edges stay pinned, and every issued frame is
//! followed by a hit-region update so the clickable area tracks the panel
//! instead of lagging a gesture behind it.

use buoy_geometry::{Alignment, LogicalPoint, LogicalSize, PhysicalPoint, PhysicalSize};
use buoy_host::{FrameScheduler, HitRegionHost, Ticket, WidgetHost, WindowHost};

use crate::config::ResizeConfig;
use crate::pointer::PointerButton;
use crate::session::probe_window;

// ---------------------------------------------------------------------------
// Corners
// ---------------------------------------------------------------------------

/// Which corner handle the resize grabbed.
///
/// The grabbed corner follows the pointer; the opposite corner stays fixed.
/// West corners therefore move the left edge (the right edge is the anchor),
/// north corners move the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Corner {
    /// Maps pointer `dx` to width growth: east corners grow rightward.
    fn width_sign(self) -> f64 {
        match self {
            Self::NorthEast | Self::SouthEast => 1.0,
            Self::NorthWest | Self::SouthWest => -1.0,
        }
    }

    /// Maps pointer `dy` to height growth: south corners grow downward.
    fn height_sign(self) -> f64 {
        match self {
            Self::SouthWest | Self::SouthEast => 1.0,
            Self::NorthWest | Self::NorthEast => -1.0,
        }
    }

    /// West corners keep the right edge fixed, so the origin shifts with
    /// the width.
    fn anchors_right_edge(self) -> bool {
        matches!(self, Self::NorthWest | Self::SouthWest)
    }

    /// North corners keep the bottom edge fixed, so the origin shifts with
    /// the height.
    fn anchors_bottom_edge(self) -> bool {
        matches!(self, Self::NorthWest | Self::NorthEast)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct ResizeSession {
    start_pointer: LogicalPoint,
    start_origin: PhysicalPoint,
    start_size: PhysicalSize,
    scale: f64,
    corner: Corner,
    alignment: Alignment,
    /// Size floor in physical pixels, precomputed at session start.
    min: PhysicalSize,
}

#[derive(Debug)]
enum ResizeState {
    Idle,
    Resizing {
        session: ResizeSession,
        latest_pointer: LogicalPoint,
        in_flight: Option<Ticket>,
        last_submitted: (PhysicalPoint, PhysicalSize),
        /// False after a failed hit-region update; retried next frame even
        /// when the frame itself is unchanged.
        hit_synced: bool,
    },
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of a pointer press on a corner handle.
#[derive(Debug)]
pub enum ResizeStartOutcome<E> {
    Started,
    Rejected(ResizeRejection),
    Failed(E),
}

/// Why a press did not start a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeRejection {
    /// Only the primary button resizes.
    NotPrimaryButton,
    /// A gesture is already in progress.
    GestureActive,
    /// A view-mode transition currently owns the window geometry.
    TransitionActive,
    /// Corner handles only exist on the expanded panel.
    NotExpanded,
}

/// What one animation frame did for the resize controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeFrameOutcome {
    Inactive,
    /// A fresh frame (origin and size) was submitted.
    Submitted,
    /// Submission failed and was swallowed; the next frame retries.
    SubmitFailed,
    /// The previous write is still unapplied; the frame was skipped.
    AwaitingApply,
    /// Frame identical to the last submission; skipped.
    Unchanged,
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeEndOutcome {
    /// No resize was in progress.
    Inactive,
    /// The gesture ended; the panel's final logical size, reported exactly
    /// once per gesture.
    Finished { size: LogicalSize },
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// The resize state machine: `Idle -> Resizing -> Idle`.
#[derive(Debug)]
pub struct ResizeController {
    config: ResizeConfig,
    state: ResizeState,
}

impl ResizeController {
    pub fn new(config: ResizeConfig) -> Self {
        Self {
            config,
            state: ResizeState::Idle,
        }
    }

    /// True while a resize is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, ResizeState::Idle)
    }

    /// Offer a pointer press on the `corner` handle.
    pub fn pointer_down<H: WidgetHost>(
        &mut self,
        host: &mut H,
        pointer: LogicalPoint,
        button: PointerButton,
        corner: Corner,
        alignment: Alignment,
    ) -> ResizeStartOutcome<H::Error> {
        if self.is_active() {
            return ResizeStartOutcome::Rejected(ResizeRejection::GestureActive);
        }
        if button != PointerButton::Primary {
            return ResizeStartOutcome::Rejected(ResizeRejection::NotPrimaryButton);
        }

        let probe = match probe_window(host) {
            Ok(probe) => probe,
            Err(err) => {
                tracing::warn!(
                    target: "buoy.resize",
                    error = %err,
                    "session query failed; resize not started"
                );
                return ResizeStartOutcome::Failed(err);
            }
        };

        let session = ResizeSession {
            start_pointer: pointer,
            start_origin: probe.origin,
            start_size: probe.frame,
            scale: probe.scale,
            corner,
            alignment,
            min: self.config.min_size().to_physical(probe.scale),
        };
        tracing::debug!(
            target: "buoy.resize",
            corner = ?corner,
            origin = ?session.start_origin,
            size = ?session.start_size,
            "resize session started"
        );
        self.state = ResizeState::Resizing {
            last_submitted: (session.start_origin, session.start_size),
            session,
            latest_pointer: pointer,
            in_flight: None,
            hit_synced: true,
        };
        host.frames().request_frame();
        ResizeStartOutcome::Started
    }

    /// Record pointer movement; geometry runs on the next frame.
    pub fn pointer_moved(&mut self, pointer: LogicalPoint) {
        if let ResizeState::Resizing { latest_pointer, .. } = &mut self.state {
            *latest_pointer = pointer;
        }
    }

    /// Run one animation frame.
    pub fn on_frame<H: WidgetHost>(&mut self, host: &mut H) -> ResizeFrameOutcome {
        let ResizeState::Resizing {
            session,
            latest_pointer,
            in_flight,
            last_submitted,
            hit_synced,
        } = &mut self.state
        else {
            return ResizeFrameOutcome::Inactive;
        };

        host.frames().request_frame();

        if let Some(ticket) = *in_flight {
            if !host.window_ref().is_applied(ticket) {
                return ResizeFrameOutcome::AwaitingApply;
            }
            *in_flight = None;
        }

        let (origin, size) = frame_for(session, *latest_pointer);

        if *last_submitted == (origin, size) {
            // A failed hit-region update still owes a retry.
            if !*hit_synced {
                *hit_synced = sync_hit_region(host, size, session.scale, session.alignment);
            }
            return ResizeFrameOutcome::Unchanged;
        }

        match host.window().submit_frame(origin, size) {
            Ok(ticket) => {
                *in_flight = Some(ticket);
                *last_submitted = (origin, size);
                // The clickable area must track every issued frame.
                *hit_synced = sync_hit_region(host, size, session.scale, session.alignment);
                ResizeFrameOutcome::Submitted
            }
            Err(err) => {
                tracing::debug!(
                    target: "buoy.resize",
                    error = %err,
                    "submit_frame failed; retrying next frame"
                );
                ResizeFrameOutcome::SubmitFailed
            }
        }
    }

    /// Release the pointer. Reports the final logical size exactly once.
    pub fn pointer_up<H: WidgetHost>(&mut self, host: &mut H) -> ResizeEndOutcome {
        let ResizeState::Resizing {
            session,
            last_submitted,
            hit_synced,
            ..
        } = std::mem::replace(&mut self.state, ResizeState::Idle)
        else {
            return ResizeEndOutcome::Inactive;
        };

        let (_, size) = last_submitted;
        if !hit_synced && !sync_hit_region(host, size, session.scale, session.alignment) {
            tracing::warn!(
                target: "buoy.resize",
                "hit region still stale at resize end"
            );
        }

        let logical = size.to_logical(session.scale);
        tracing::debug!(target: "buoy.resize", size = ?logical, "resize finished");
        ResizeEndOutcome::Finished { size: logical }
    }

    /// Abandon any resize immediately.
    pub fn cancel(&mut self) {
        if self.is_active() {
            tracing::debug!(target: "buoy.resize", "resize cancelled");
            self.state = ResizeState::Idle;
        }
    }
}

/// Frame geometry for the current pointer: grabbed corner follows, opposite
/// corner pinned, size floored at the session minimum.
fn frame_for(session: &ResizeSession, pointer: LogicalPoint) -> (PhysicalPoint, PhysicalSize) {
    let dx = (pointer.x - session.start_pointer.x) * session.scale;
    let dy = (pointer.y - session.start_pointer.y) * session.scale;
    let corner = session.corner;

    let width = (session.start_size.width + corner.width_sign() * dx).max(session.min.width);
    let height = (session.start_size.height + corner.height_sign() * dy).max(session.min.height);

    // Anchored edges stay fixed even when the floor kicks in, so the frame
    // never slides while pinned at its minimum.
    let x = if corner.anchors_right_edge() {
        session.start_origin.x + session.start_size.width - width
    } else {
        session.start_origin.x
    };
    let y = if corner.anchors_bottom_edge() {
        session.start_origin.y + session.start_size.height - height
    } else {
        session.start_origin.y
    };

    (PhysicalPoint::new(x, y), PhysicalSize::new(width, height))
}

fn sync_hit_region<H: WidgetHost>(
    host: &mut H,
    size: PhysicalSize,
    scale: f64,
    alignment: Alignment,
) -> bool {
    match host
        .hit_region()
        .update_click_region(size.to_logical(scale), alignment)
    {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(
                target: "buoy.resize",
                error = %err,
                "hit-region update failed; retrying next frame"
            );
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
