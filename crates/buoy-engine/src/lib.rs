#![forbid(unsafe_code)]

//! Window-geometry engine for the buoy desktop widget.
//!
//! # Role in buoy
//!
//! This crate is the brain between raw input and the platform window: it
//! decides where the frame goes, never how pixels get there. It consumes
//! pointer events and mode requests, runs the gesture and transition state
//! machines, and drives a [`buoy_host::WidgetHost`] with asynchronous,
//! ticket-gated geometry writes.
//!
//! # Primary responsibilities
//!
//! - **Dragging** with damped boundary resistance and an elastic snap-back
//!   on release ([`DragController`]).
//! - **Corner resizing** of the expanded panel with pinned opposite edges
//!   and per-frame hit-region sync ([`ResizeController`]).
//! - **View-mode transitions** staged as fade, swap, morph, fade, with the
//!   window re-anchored so expansions grow toward available screen space
//!   ([`TransitionController`]).
//! - **Routing and exclusion** across the three, plus initial dock
//!   placement ([`WidgetEngine`]).
//!
//! Everything is synchronous and frame-driven: raw events only cache, and
//! geometry is recomputed from session snapshots on animation frames. See
//! `buoy-harness` for the scripted host the tests run against.

pub mod animation;
pub mod config;
pub mod drag;
pub mod engine;
pub mod pointer;
pub mod resize;
pub mod state;
pub mod transition;

mod session;

pub use animation::Tween;
pub use config::{
    ConfigError, DragConfig, EngineConfig, ModeProfile, ModeProfiles, PlacementConfig,
    ResizeConfig, TransitionConfig,
};
pub use drag::{DragController, DragEndOutcome, DragFrameOutcome, DragRejection, DragStartOutcome};
pub use engine::{FrameActivity, ReleaseOutcome, WidgetEngine};
pub use pointer::{PointerButton, PointerTarget};
pub use resize::{
    Corner, ResizeController, ResizeEndOutcome, ResizeFrameOutcome, ResizeRejection,
    ResizeStartOutcome,
};
pub use state::WidgetState;
pub use transition::{
    TransitionController, TransitionFrameOutcome, TransitionRejection, TransitionStartOutcome,
};

pub use buoy_host::ViewMode;
