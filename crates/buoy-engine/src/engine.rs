//! The engine façade.
//!
//! [`WidgetEngine`] owns the host, the committed widget state, and the three
//! controllers, and routes input between them. Routing is where mutual
//! exclusion lives: one gesture at a time, no gestures during transitions,
//! no transitions during gestures (a settling snap-back counts as a live
//! gesture). The controllers themselves only know their own state machines.

use buoy_geometry::{LogicalPoint, PhysicalPoint};
use buoy_host::{HitRegionHost, MonitorSource, ViewMode, WidgetHost, WindowHost};

use crate::config::EngineConfig;
use crate::drag::{
    DragController, DragEndOutcome, DragFrameOutcome, DragRejection, DragStartOutcome,
};
use crate::pointer::{PointerButton, PointerTarget};
use crate::resize::{
    Corner, ResizeController, ResizeEndOutcome, ResizeFrameOutcome, ResizeRejection,
    ResizeStartOutcome,
};
use crate::state::WidgetState;
use crate::transition::{
    TransitionController, TransitionFrameOutcome, TransitionRejection, TransitionStartOutcome,
};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of a pointer release, from whichever controller owned it.
#[derive(Debug)]
pub enum ReleaseOutcome<E> {
    /// Nothing was in progress.
    Idle,
    Drag(DragEndOutcome<E>),
    Resize(ResizeEndOutcome),
}

/// What one animation frame did across all three controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameActivity {
    pub drag: DragFrameOutcome,
    pub resize: ResizeFrameOutcome,
    pub transition: TransitionFrameOutcome,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Geometry engine for one floating widget window.
pub struct WidgetEngine<H: WidgetHost> {
    host: H,
    config: EngineConfig,
    state: WidgetState,
    drag: DragController,
    resize: ResizeController,
    transition: TransitionController,
}

impl<H: WidgetHost> WidgetEngine<H> {
    /// Build an engine over `host`.
    ///
    /// `config` is taken as given; call [`EngineConfig::validate`] first
    /// when it comes from a file.
    pub fn new(host: H, config: EngineConfig) -> Self {
        let state = WidgetState::new(config.modes.clone());
        let drag = DragController::new(config.drag.clone());
        let resize = ResizeController::new(config.resize.clone());
        let transition = TransitionController::new(config.transition.clone());
        Self {
            host,
            config,
            state,
            drag,
            resize,
            transition,
        }
    }

    /// Dock the widget at the bottom-right of the current work area and
    /// publish the initial hit region.
    ///
    /// The frame is created at the expanded panel's full size and never
    /// grows afterwards; smaller modes render end-aligned inside it.
    /// Unlike per-frame paths, setup failures surface to the caller.
    pub fn place_initial(&mut self) -> Result<(), H::Error> {
        let scale = self.host.window_ref().scale_factor()?;
        let work_area = self.host.monitors().work_area()?;

        let frame = self
            .state
            .profile(ViewMode::Expanded)
            .size()
            .to_physical(scale);
        let pad = self.config.placement.dock_padding * scale;
        let origin = PhysicalPoint::new(
            work_area.right() - frame.width - pad,
            work_area.bottom() - frame.height - pad,
        );

        self.host.window().submit_frame(origin, frame)?;
        self.host
            .hit_region()
            .update_click_region(self.state.content_size(), self.state.alignment())?;
        tracing::info!(
            target: "buoy.engine",
            origin = ?origin,
            frame = ?frame,
            mode = ?self.state.mode(),
            "widget docked"
        );
        Ok(())
    }

    // ---- input routing -----------------------------------------------------

    /// Offer a pointer press on the widget surface (drag affordance).
    pub fn pointer_down(
        &mut self,
        pointer: LogicalPoint,
        button: PointerButton,
        target: PointerTarget,
    ) -> DragStartOutcome<H::Error> {
        if self.transition.is_running() {
            return DragStartOutcome::Rejected(DragRejection::TransitionActive);
        }
        if self.resize.is_active() {
            return DragStartOutcome::Rejected(DragRejection::GestureActive);
        }
        self.drag.pointer_down(
            &mut self.host,
            pointer,
            button,
            target,
            self.state.content_size(),
            self.state.alignment(),
        )
    }

    /// Offer a pointer press on a corner resize handle.
    pub fn begin_resize(
        &mut self,
        pointer: LogicalPoint,
        button: PointerButton,
        corner: Corner,
    ) -> ResizeStartOutcome<H::Error> {
        if self.transition.is_running() {
            return ResizeStartOutcome::Rejected(ResizeRejection::TransitionActive);
        }
        if self.drag.is_active() {
            return ResizeStartOutcome::Rejected(ResizeRejection::GestureActive);
        }
        if self.state.mode() != ViewMode::Expanded {
            return ResizeStartOutcome::Rejected(ResizeRejection::NotExpanded);
        }
        self.resize
            .pointer_down(&mut self.host, pointer, button, corner, self.state.alignment())
    }

    /// Record pointer movement for whichever gesture is live.
    pub fn pointer_moved(&mut self, pointer: LogicalPoint) {
        self.resize.pointer_moved(pointer);
        self.drag.pointer_moved(pointer);
    }

    /// Release the pointer.
    pub fn pointer_up(&mut self) -> ReleaseOutcome<H::Error> {
        if self.resize.is_active() {
            let outcome = self.resize.pointer_up(&mut self.host);
            if let ResizeEndOutcome::Finished { size } = outcome {
                // The panel keeps this size across mode round-trips.
                self.state.set_expanded_size(size);
            }
            return ReleaseOutcome::Resize(outcome);
        }
        if self.drag.is_dragging() {
            return ReleaseOutcome::Drag(self.drag.pointer_up(&mut self.host));
        }
        ReleaseOutcome::Idle
    }

    /// Request a view-mode change.
    pub fn set_mode(&mut self, target: ViewMode) -> TransitionStartOutcome<H::Error> {
        if self.drag.is_active() || self.resize.is_active() {
            return TransitionStartOutcome::Rejected(TransitionRejection::GestureActive);
        }
        self.transition.begin(&mut self.host, &mut self.state, target)
    }

    /// Run one animation frame across every controller.
    pub fn on_frame(&mut self) -> FrameActivity {
        FrameActivity {
            drag: self.drag.on_frame(&mut self.host),
            resize: self.resize.on_frame(&mut self.host),
            transition: self.transition.on_frame(&mut self.host, &mut self.state),
        }
    }

    /// Cancel everything in flight. Windows writes already queued land or
    /// fail on their own; their completions are ignored.
    pub fn teardown(&mut self) {
        tracing::info!(target: "buoy.engine", "engine teardown");
        self.drag.cancel();
        self.resize.cancel();
        self.transition.cancel();
    }

    // ---- observation -------------------------------------------------------

    /// The committed widget state.
    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// True while any gesture (drag, snap-back, resize) is live.
    pub fn is_gesture_active(&self) -> bool {
        self.drag.is_active() || self.resize.is_active()
    }

    /// True while a view-mode transition is running.
    pub fn is_transition_running(&self) -> bool {
        self.transition.is_running()
    }

    /// The underlying host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the underlying host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use buoy_geometry::{Alignment, LogicalSize, PhysicalSize, Rect};
    use buoy_harness::{HostCall, ScriptedHost};

    fn engine() -> WidgetEngine<ScriptedHost> {
        WidgetEngine::new(ScriptedHost::new(), EngineConfig::default())
    }

    fn press_surface(engine: &mut WidgetEngine<ScriptedHost>) {
        let outcome = engine.pointer_down(
            LogicalPoint::new(0.0, 0.0),
            PointerButton::Primary,
            PointerTarget::SURFACE,
        );
        assert!(matches!(outcome, DragStartOutcome::Started));
    }

    // ---- initial placement --------------------------------------------------

    #[test]
    fn docks_bottom_right_with_padding() {
        let mut engine = engine();
        engine.place_initial().unwrap();

        let host = engine.host();
        assert_eq!(host.committed_origin(), PhysicalPoint::new(700.0, 260.0));
        assert_eq!(host.committed_frame_size(), PhysicalSize::new(1200.0, 800.0));
        assert_eq!(
            engine.host_mut().take_calls(),
            vec![
                HostCall::SubmitFrame(
                    PhysicalPoint::new(700.0, 260.0),
                    PhysicalSize::new(1200.0, 800.0)
                ),
                HostCall::HitRegion(LogicalSize::new(200.0, 56.0), Alignment::END),
            ]
        );
    }

    #[test]
    fn docking_scales_with_dpi() {
        let host = ScriptedHost::new()
            .with_scale(2.0)
            .with_monitors(vec![Rect::new(0.0, 0.0, 3840.0, 2160.0)]);
        let mut engine = WidgetEngine::new(host, EngineConfig::default());
        engine.place_initial().unwrap();

        // 1200x800 logical is 2400x1600 physical; 20 logical px of padding
        // is 40.
        assert_eq!(
            engine.host().committed_origin(),
            PhysicalPoint::new(1400.0, 520.0)
        );
        assert_eq!(
            engine.host().committed_frame_size(),
            PhysicalSize::new(2400.0, 1600.0)
        );
    }

    #[test]
    fn placement_failure_surfaces() {
        let mut engine = engine();
        engine.host_mut().fail_next_monitor_queries(1);
        assert!(engine.place_initial().is_err());
    }

    // ---- mutual exclusion ---------------------------------------------------

    #[test]
    fn drag_is_refused_during_transition() {
        let mut engine = engine();
        assert!(matches!(
            engine.set_mode(ViewMode::Expanded),
            TransitionStartOutcome::Started { .. }
        ));
        assert!(matches!(
            engine.pointer_down(
                LogicalPoint::new(0.0, 0.0),
                PointerButton::Primary,
                PointerTarget::SURFACE,
            ),
            DragStartOutcome::Rejected(DragRejection::TransitionActive)
        ));
    }

    #[test]
    fn resize_is_refused_during_drag() {
        let mut engine = engine();
        engine.state.set_mode(ViewMode::Expanded);
        press_surface(&mut engine);
        assert!(matches!(
            engine.begin_resize(
                LogicalPoint::new(0.0, 0.0),
                PointerButton::Primary,
                Corner::SouthEast,
            ),
            ResizeStartOutcome::Rejected(ResizeRejection::GestureActive)
        ));
    }

    #[test]
    fn resize_is_refused_outside_expanded_mode() {
        let mut engine = engine();
        assert!(matches!(
            engine.begin_resize(
                LogicalPoint::new(0.0, 0.0),
                PointerButton::Primary,
                Corner::SouthEast,
            ),
            ResizeStartOutcome::Rejected(ResizeRejection::NotExpanded)
        ));
    }

    #[test]
    fn transition_is_refused_while_settling() {
        let mut engine = engine();
        // Park the widget hanging past the left edge and release: the
        // snap-back keeps the gesture alive.
        press_surface(&mut engine);
        engine.pointer_moved(LogicalPoint::new(-2000.0, 0.0));
        engine.on_frame();
        assert!(matches!(
            engine.pointer_up(),
            ReleaseOutcome::Drag(DragEndOutcome::SnappingBack)
        ));

        assert!(engine.is_gesture_active());
        assert!(matches!(
            engine.set_mode(ViewMode::Expanded),
            TransitionStartOutcome::Rejected(TransitionRejection::GestureActive)
        ));
    }

    #[test]
    fn drag_is_refused_while_resizing() {
        let mut engine = engine();
        engine.state.set_mode(ViewMode::Expanded);
        assert!(matches!(
            engine.begin_resize(
                LogicalPoint::new(0.0, 0.0),
                PointerButton::Primary,
                Corner::SouthEast,
            ),
            ResizeStartOutcome::Started
        ));
        assert!(matches!(
            engine.pointer_down(
                LogicalPoint::new(0.0, 0.0),
                PointerButton::Primary,
                PointerTarget::SURFACE,
            ),
            DragStartOutcome::Rejected(DragRejection::GestureActive)
        ));
    }

    // ---- resize feeds state -------------------------------------------------

    #[test]
    fn resize_end_rewrites_expanded_profile() {
        let mut engine = engine();
        engine.state.set_mode(ViewMode::Expanded);
        engine.begin_resize(
            LogicalPoint::new(0.0, 0.0),
            PointerButton::Primary,
            Corner::SouthEast,
        );
        engine.pointer_moved(LogicalPoint::new(100.0, 100.0));
        engine.on_frame();

        assert!(matches!(
            engine.pointer_up(),
            ReleaseOutcome::Resize(ResizeEndOutcome::Finished { .. })
        ));
        assert_eq!(
            engine.state().profile(ViewMode::Expanded).size(),
            LogicalSize::new(1300.0, 900.0)
        );
    }

    // ---- lifecycle ----------------------------------------------------------

    #[test]
    fn idle_frames_do_nothing() {
        let mut engine = engine();
        let activity = engine.on_frame();
        assert_eq!(activity.drag, DragFrameOutcome::Inactive);
        assert_eq!(activity.resize, ResizeFrameOutcome::Inactive);
        assert_eq!(activity.transition, TransitionFrameOutcome::Inactive);
        assert!(engine.host_mut().take_calls().is_empty());
    }

    #[test]
    fn release_with_nothing_live_is_idle() {
        let mut engine = engine();
        assert!(matches!(engine.pointer_up(), ReleaseOutcome::Idle));
    }

    #[test]
    fn teardown_cancels_everything() {
        let mut engine = engine();
        engine.set_mode(ViewMode::Expanded);
        assert!(engine.is_transition_running());

        engine.teardown();
        assert!(!engine.is_transition_running());
        assert!(!engine.is_gesture_active());
        let activity = engine.on_frame();
        assert_eq!(activity.transition, TransitionFrameOutcome::Inactive);
    }
}
