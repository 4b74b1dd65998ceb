#![forbid(unsafe_code)]

//! Geometry: pixel units, rectangles, anchors, and boundary math for buoy.
//!
//! # Role in buoy
//! `buoy-geometry` is the pure-math layer. Everything in it is deterministic,
//! allocation-free (except [`Rect::bounding_box`] on iterators), and knows
//! nothing about windows, hosts, or time. The controllers in `buoy-engine`
//! call into this crate every frame; keeping it side-effect free is what makes
//! the engine testable without a display server.
//!
//! # Primary responsibilities
//! - **Units**: logical (DPI-independent) vs physical pixel points and sizes,
//!   with explicit scale-factor conversions.
//! - **Rect**: f64 rectangles for monitor work areas and visual bounds.
//! - **Alignment**: start/end anchoring per axis and the visual-rect
//!   derivation (where content actually sits inside an oversized frame).
//! - **Overshoot**: how far a visual rect pokes outside the monitor set, with
//!   the straddle-lenient / detached-strict asymmetry the drag feel depends on.
//! - **Easing**: the curve tables used by snap-back and transitions.

pub mod anchor;
pub mod easing;
pub mod overshoot;
pub mod rect;
pub mod units;

pub use anchor::{Alignment, Anchor};
pub use easing::{EasingFn, ease_in_out_cubic, ease_out_cubic, ease_out_elastic, linear};
pub use overshoot::{Overshoot, overshoot};
pub use rect::Rect;
pub use units::{LogicalPoint, LogicalSize, PhysicalPoint, PhysicalSize};
