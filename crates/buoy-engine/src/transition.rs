//! View-mode transition sequencer.
//!
//! A transition never resizes the window. The frame stays at its maximum
//! size; what changes is the rendered content, the shell silhouette, the
//! clickable region, and (for expansions) the window origin so the grown
//! content stays on screen. The stages run on the frame loop:
//!
//! ```text
//! begin:    [expansion only: move window, re-anchor content]  fade out
//! FadeOut:  expansion: grow hit region, swap content, morph shell
//!           shrink:    swap content, morph shell (hit region waits)
//! Morph:    shrink:    shrink hit region
//!           fade in
//! FadeIn:   done
//! ```
//!
//! The asymmetry keeps the clickable region a superset of the visible
//! content at all times: it grows before content does and shrinks after.

use core::time::Duration;

use buoy_geometry::{
    Alignment, Anchor, LogicalSize, PhysicalPoint, PhysicalSize, Rect, overshoot,
};
use buoy_host::{
    ContentPresenter, FrameScheduler, HitRegionHost, HostClock, ViewMode, WidgetHost, WindowHost,
};

use crate::config::TransitionConfig;
use crate::session::probe_session;
use crate::state::WidgetState;

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of requesting a view-mode change.
#[derive(Debug)]
pub enum TransitionStartOutcome<E> {
    /// The transition is running; stages advance on animation frames.
    Started { expanding: bool },
    /// Request refused; nothing changed.
    Rejected(TransitionRejection),
    /// A host query or the planned window move failed; nothing changed.
    Failed(E),
}

/// Why a mode-change request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRejection {
    /// A transition is already running; no queueing.
    AlreadyRunning,
    /// A drag or resize gesture owns the window geometry.
    GestureActive,
    /// The widget is already in the requested mode.
    SameMode,
}

/// What one animation frame did for the transition controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionFrameOutcome {
    /// No transition in progress.
    Inactive,
    /// A stage is still running.
    Running,
    /// The final fade finished; the widget is fully in the new mode.
    Completed(ViewMode),
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    FadeOut,
    Morph,
    FadeIn,
}

#[derive(Debug, Clone, Copy)]
struct Running {
    target: ViewMode,
    expanding: bool,
    stage: Stage,
    /// Start of the current stage. Advanced by exact stage durations so
    /// boundaries never drift against the clock.
    stage_started: Duration,
    /// Target content size (logical) and shell radius.
    content: LogicalSize,
    radius: f64,
    alignment: Alignment,
    /// Hit-region payload that failed to apply; retried every frame.
    owed_hit: Option<(LogicalSize, Alignment)>,
}

#[derive(Debug)]
enum TransitionState {
    Idle,
    Running(Running),
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Stage machine for mode changes: `Idle -> FadeOut -> Morph -> FadeIn`.
#[derive(Debug)]
pub struct TransitionController {
    config: TransitionConfig,
    state: TransitionState,
}

impl TransitionController {
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            config,
            state: TransitionState::Idle,
        }
    }

    /// True while a transition is running. Gestures are refused for the
    /// duration.
    pub fn is_running(&self) -> bool {
        matches!(self.state, TransitionState::Running(_))
    }

    /// Request a transition to `target`.
    ///
    /// Expansions are planned before anything becomes visible: the content
    /// re-anchors toward the screen quadrant it has room to grow into, the
    /// window moves so the currently visible content stays pixel-fixed, and
    /// the final expanded bounds are clamped onto the monitors. The
    /// alignment commits here; the mode commits at the content swap.
    pub fn begin<H: WidgetHost>(
        &mut self,
        host: &mut H,
        state: &mut WidgetState,
        target: ViewMode,
    ) -> TransitionStartOutcome<H::Error> {
        if self.is_running() {
            return TransitionStartOutcome::Rejected(TransitionRejection::AlreadyRunning);
        }
        if target == state.mode() {
            return TransitionStartOutcome::Rejected(TransitionRejection::SameMode);
        }

        let probe = match probe_session(host) {
            Ok(probe) => probe,
            Err(err) => {
                tracing::warn!(
                    target: "buoy.transition",
                    error = %err,
                    "session query failed; transition not started"
                );
                return TransitionStartOutcome::Failed(err);
            }
        };

        let current = state.profile(state.mode());
        let profile = state.profile(target);
        let expanding =
            profile.width > current.width || profile.height > current.height;

        let mut owed_hit = None;
        if expanding {
            let scale = probe.window.scale;
            let visual = state.alignment().visual_rect(
                probe.window.origin,
                probe.window.frame,
                current.size().to_physical(scale),
            );

            let alignment = match Rect::bounding_box(probe.monitors.iter().copied()) {
                Some(bb) => quadrant_alignment(visual, bb),
                // No monitors to aim at; keep the current anchoring.
                None => state.alignment(),
            };

            // New origin keeps the visible content pixel-fixed under the
            // new alignment, then shifts just enough that the expanded
            // bounds land on the monitors.
            let pinned = origin_pinning_visual(visual, alignment, probe.window.frame);
            let grown = alignment.visual_rect(
                pinned,
                probe.window.frame,
                profile.size().to_physical(scale),
            );
            let correction = overshoot(grown, &probe.monitors);
            let origin = pinned.translated(correction.dx, correction.dy);

            if origin != probe.window.origin {
                if let Err(err) = host.window().submit_move(origin) {
                    tracing::warn!(
                        target: "buoy.transition",
                        error = %err,
                        "expansion move failed; transition not started"
                    );
                    return TransitionStartOutcome::Failed(err);
                }
            }
            state.set_alignment(alignment);
            tracing::debug!(
                target: "buoy.transition",
                origin = ?origin,
                moved = origin != probe.window.origin,
                "expansion planned"
            );

            // Re-anchor the hit region with the window move so clicks keep
            // landing on the unmoved visible content.
            owed_hit = apply_hit(host, (current.size(), alignment));
        }

        let fade = Duration::from_millis(self.config.fade_ms);
        host.presenter().fade_content(0.0, fade);

        let run = Running {
            target,
            expanding,
            stage: Stage::FadeOut,
            stage_started: host.clock().now_mono(),
            content: profile.size(),
            radius: profile.corner_radius,
            alignment: state.alignment(),
            owed_hit,
        };
        tracing::debug!(
            target: "buoy.transition",
            from = ?state.mode(),
            to = ?target,
            expanding,
            "transition started"
        );
        self.state = TransitionState::Running(run);
        host.frames().request_frame();
        TransitionStartOutcome::Started { expanding }
    }

    /// Run one animation frame, advancing any stage boundaries the clock
    /// has crossed.
    pub fn on_frame<H: WidgetHost>(
        &mut self,
        host: &mut H,
        state: &mut WidgetState,
    ) -> TransitionFrameOutcome {
        let TransitionState::Running(mut run) =
            std::mem::replace(&mut self.state, TransitionState::Idle)
        else {
            return TransitionFrameOutcome::Inactive;
        };

        if let Some(payload) = run.owed_hit {
            run.owed_hit = apply_hit(host, payload);
        }

        let now = host.clock().now_mono();
        let fade = Duration::from_millis(self.config.fade_ms);
        let morph = Duration::from_millis(self.config.morph_ms);

        // A slow frame can cross more than one boundary; process them all.
        loop {
            let elapsed = now.saturating_sub(run.stage_started);
            match run.stage {
                Stage::FadeOut if elapsed >= fade => {
                    if run.expanding {
                        // Hit region grows before the content does.
                        run.owed_hit = apply_hit(host, (run.content, run.alignment));
                    }
                    host.presenter().show_mode(run.target);
                    state.set_mode(run.target);
                    host.presenter().animate_shell(run.content, run.radius, morph);
                    tracing::debug!(
                        target: "buoy.transition",
                        mode = ?run.target,
                        "content swapped; morph running"
                    );
                    run.stage = Stage::Morph;
                    run.stage_started += fade;
                }
                Stage::Morph if elapsed >= morph => {
                    if !run.expanding {
                        // Hit region shrinks only after the shell has.
                        run.owed_hit = apply_hit(host, (run.content, run.alignment));
                    }
                    host.presenter().fade_content(1.0, fade);
                    run.stage = Stage::FadeIn;
                    run.stage_started += morph;
                }
                Stage::FadeIn if elapsed >= fade => {
                    // The clickable region settles before the machine lets
                    // go; an owed update keeps the loop alive to retry.
                    if run.owed_hit.is_some() {
                        break;
                    }
                    tracing::debug!(
                        target: "buoy.transition",
                        mode = ?run.target,
                        "transition completed"
                    );
                    return TransitionFrameOutcome::Completed(run.target);
                }
                _ => break,
            }
        }

        self.state = TransitionState::Running(run);
        host.frames().request_frame();
        TransitionFrameOutcome::Running
    }

    /// Abandon a running transition. Presentation is left wherever the
    /// stages got to; only teardown calls this.
    pub fn cancel(&mut self) {
        if self.is_running() {
            tracing::debug!(target: "buoy.transition", "transition cancelled");
            self.state = TransitionState::Idle;
        }
    }
}

// ---------------------------------------------------------------------------
// Planning helpers
// ---------------------------------------------------------------------------

/// Per-axis anchor choice: content in the left/top half of the combined
/// desktop grows rightward/downward (start-anchored), content in the
/// right/bottom half grows the other way.
fn quadrant_alignment(visual: Rect, desktop: Rect) -> Alignment {
    let center = visual.center();
    let mid = desktop.center();
    Alignment::new(
        if center.x < mid.x { Anchor::Start } else { Anchor::End },
        if center.y < mid.y { Anchor::Start } else { Anchor::End },
    )
}

/// The frame origin that renders `visual` at the same pixels under
/// `alignment`.
fn origin_pinning_visual(visual: Rect, alignment: Alignment, frame: PhysicalSize) -> PhysicalPoint {
    let x = match alignment.x {
        Anchor::Start => visual.x,
        Anchor::End => visual.right() - frame.width,
    };
    let y = match alignment.y {
        Anchor::Start => visual.y,
        Anchor::End => visual.bottom() - frame.height,
    };
    PhysicalPoint::new(x, y)
}

/// Try a hit-region update; returns the payload back when it must be
/// retried.
fn apply_hit<H: WidgetHost>(
    host: &mut H,
    payload: (LogicalSize, Alignment),
) -> Option<(LogicalSize, Alignment)> {
    match host.hit_region().update_click_region(payload.0, payload.1) {
        Ok(()) => None,
        Err(err) => {
            tracing::debug!(
                target: "buoy.transition",
                error = %err,
                "hit-region update failed; retrying next frame"
            );
            Some(payload)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
