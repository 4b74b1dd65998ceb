//! End-to-end engine journeys over the scripted host: dock, drag past a
//! boundary and snap back, expand in place, resize, and round-trip modes
//! with the panel size retained. Frames are pumped the way a real shell
//! does it, by consuming coalesced frame requests and stepping the clock.

use core::time::Duration;

use buoy_engine::{
    Corner, DragEndOutcome, DragFrameOutcome, DragStartOutcome, EngineConfig, PointerButton,
    PointerTarget, ReleaseOutcome, ResizeEndOutcome, TransitionStartOutcome, ViewMode,
    WidgetEngine,
};
use buoy_geometry::{Alignment, LogicalPoint, LogicalSize, PhysicalPoint, PhysicalSize};
use buoy_harness::{HostCall, ScriptedHost};

fn docked_engine() -> WidgetEngine<ScriptedHost> {
    let mut engine = WidgetEngine::new(ScriptedHost::new(), EngineConfig::default());
    engine.place_initial().unwrap();
    engine.host_mut().take_calls();
    engine.host_mut().take_frame_request();
    engine
}

/// Drive the frame loop: consume the pending request, step the clock one
/// tick, run the frame. Stops when nothing re-arms or after `max` frames.
fn pump(engine: &mut WidgetEngine<ScriptedHost>, max: usize) {
    for _ in 0..max {
        if !engine.host_mut().take_frame_request() {
            return;
        }
        engine.host_mut().advance(Duration::from_millis(16));
        engine.on_frame();
    }
}

// ---------------------------------------------------------------------------
// Docking and dragging
// ---------------------------------------------------------------------------

#[test]
fn widget_docks_bottom_right_of_work_area() {
    let engine = docked_engine();
    // 1920x1080 work area, 1200x800 frame, 20 px padding.
    assert_eq!(
        engine.host().committed_origin(),
        PhysicalPoint::new(700.0, 260.0)
    );
    assert_eq!(
        engine.host().committed_frame_size(),
        PhysicalSize::new(1200.0, 800.0)
    );
    assert_eq!(engine.state().mode(), ViewMode::Toolbar);
    assert_eq!(engine.state().alignment(), Alignment::END);
}

#[test]
fn drag_past_boundary_resists_then_snaps_flush() {
    let mut engine = docked_engine();
    // The toolbar renders at (1700, 1004); grab it and haul it 1750 px
    // left, which would put its visual 50 px past the screen edge.
    assert!(matches!(
        engine.pointer_down(
            LogicalPoint::new(1750.0, 1030.0),
            PointerButton::Primary,
            PointerTarget::SURFACE,
        ),
        DragStartOutcome::Started
    ));
    engine.pointer_moved(LogicalPoint::new(0.0, 1030.0));

    assert!(engine.host_mut().take_frame_request());
    engine.host_mut().advance(Duration::from_millis(16));
    let activity = engine.on_frame();
    assert_eq!(activity.drag, DragFrameOutcome::Submitted);
    // Half of the 50 px overshoot is damped away while the button is down.
    assert_eq!(
        engine.host().committed_origin(),
        PhysicalPoint::new(-1025.0, 260.0)
    );

    assert!(matches!(
        engine.pointer_up(),
        ReleaseOutcome::Drag(DragEndOutcome::SnappingBack)
    ));
    pump(&mut engine, 200);

    // Settled with the toolbar's left edge flush on x = 0.
    assert!(!engine.is_gesture_active());
    assert_eq!(
        engine.host().committed_origin(),
        PhysicalPoint::new(-1000.0, 260.0)
    );
}

#[test]
fn slow_window_never_sees_positions_out_of_order() {
    let mut engine = WidgetEngine::new(
        ScriptedHost::new().with_auto_commit(false),
        EngineConfig::default(),
    );
    engine.place_initial().unwrap();
    engine.host_mut().commit_all();
    engine.host_mut().take_calls();
    engine.host_mut().take_frame_request();

    engine.pointer_down(
        LogicalPoint::new(1750.0, 1030.0),
        PointerButton::Primary,
        PointerTarget::SURFACE,
    );

    // Three pointer updates, but the window only applies writes lazily:
    // every skipped frame must fold into the freshest position.
    let mut submitted = Vec::new();
    for x in [1700.0, 1650.0, 1600.0] {
        engine.pointer_moved(LogicalPoint::new(x, 1030.0));
        engine.host_mut().take_frame_request();
        engine.host_mut().advance(Duration::from_millis(16));
        engine.on_frame();
        for call in engine.host_mut().take_calls() {
            if let HostCall::SubmitMove(p) = call {
                submitted.push(p.x);
            }
        }
    }
    // Only the first frame submitted; the window was busy for the rest.
    assert_eq!(submitted, vec![650.0]);

    engine.host_mut().commit_all();
    engine.host_mut().take_frame_request();
    engine.host_mut().advance(Duration::from_millis(16));
    engine.on_frame();
    for call in engine.host_mut().take_calls() {
        if let HostCall::SubmitMove(p) = call {
            submitted.push(p.x);
        }
    }
    // The intermediate x = 600 position was never submitted; the queue
    // jumped straight to the freshest.
    assert_eq!(submitted, vec![650.0, 550.0]);
}

// ---------------------------------------------------------------------------
// Mode transitions
// ---------------------------------------------------------------------------

#[test]
fn docked_expansion_keeps_the_corner_pixel_fixed() {
    let mut engine = docked_engine();
    assert!(matches!(
        engine.set_mode(ViewMode::Expanded),
        TransitionStartOutcome::Started { expanding: true }
    ));
    pump(&mut engine, 100);

    assert_eq!(engine.state().mode(), ViewMode::Expanded);
    assert_eq!(engine.state().alignment(), Alignment::END);
    // The toolbar's bottom-right corner was already the frame's: the
    // panel grew up and left without the window moving a pixel.
    assert_eq!(
        engine.host().committed_origin(),
        PhysicalPoint::new(700.0, 260.0)
    );
    assert!(
        !engine
            .host()
            .calls()
            .iter()
            .any(|c| matches!(c, HostCall::SubmitMove(_)))
    );
}

#[test]
fn mode_round_trip_restores_the_toolbar_hit_region() {
    let mut engine = docked_engine();
    engine.set_mode(ViewMode::Expanded);
    pump(&mut engine, 100);
    engine.set_mode(ViewMode::Collapsed);
    pump(&mut engine, 100);
    engine.set_mode(ViewMode::Toolbar);
    pump(&mut engine, 100);

    assert_eq!(engine.state().mode(), ViewMode::Toolbar);
    let last_region = engine
        .host()
        .calls()
        .iter()
        .rev()
        .find_map(|c| match c {
            HostCall::HitRegion(size, alignment) => Some((*size, *alignment)),
            _ => None,
        })
        .unwrap();
    assert_eq!(last_region, (LogicalSize::new(200.0, 56.0), Alignment::END));
}

#[test]
fn gesture_blocks_transition_until_the_window_settles() {
    let mut engine = docked_engine();
    engine.pointer_down(
        LogicalPoint::new(1750.0, 1030.0),
        PointerButton::Primary,
        PointerTarget::SURFACE,
    );
    engine.pointer_moved(LogicalPoint::new(0.0, 1030.0));
    pump(&mut engine, 1);
    engine.pointer_up();

    // Snap-back still owns the window.
    assert!(matches!(
        engine.set_mode(ViewMode::Expanded),
        TransitionStartOutcome::Rejected(_)
    ));

    pump(&mut engine, 200);
    assert!(!engine.is_gesture_active());
    assert!(matches!(
        engine.set_mode(ViewMode::Expanded),
        TransitionStartOutcome::Started { .. }
    ));
}

// ---------------------------------------------------------------------------
// Resize feeding back into transitions
// ---------------------------------------------------------------------------

#[test]
fn resized_panel_size_survives_a_mode_round_trip() {
    let mut engine = docked_engine();
    engine.set_mode(ViewMode::Expanded);
    pump(&mut engine, 100);

    // Grow the panel 200x150 from the north-west corner; the anchored
    // bottom-right corner keeps it on-screen.
    engine.begin_resize(
        LogicalPoint::new(700.0, 260.0),
        PointerButton::Primary,
        Corner::NorthWest,
    );
    engine.pointer_moved(LogicalPoint::new(500.0, 110.0));
    pump(&mut engine, 1);
    assert!(matches!(
        engine.pointer_up(),
        ReleaseOutcome::Resize(ResizeEndOutcome::Finished {
            size: LogicalSize {
                width: 1400.0,
                height: 950.0
            }
        })
    ));
    assert_eq!(
        engine.host().committed_frame_size(),
        PhysicalSize::new(1400.0, 950.0)
    );

    engine.set_mode(ViewMode::Toolbar);
    pump(&mut engine, 100);
    engine.host_mut().take_calls();

    // Expanding again morphs to the resized silhouette, not the default.
    engine.set_mode(ViewMode::Expanded);
    pump(&mut engine, 100);
    assert!(
        engine
            .host()
            .calls()
            .iter()
            .any(|c| *c == HostCall::AnimateShell(LogicalSize::new(1400.0, 950.0), 16.0))
    );
    assert_eq!(
        engine.state().profile(ViewMode::Expanded).size(),
        LogicalSize::new(1400.0, 950.0)
    );
}
