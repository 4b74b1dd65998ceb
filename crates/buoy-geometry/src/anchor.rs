//! Per-axis anchoring and the visual-rect derivation.
//!
//! The widget's window frame is kept at its maximum size while the visible
//! content is often smaller, pinned to one corner of the frame. Which corner
//! is the [`Alignment`]: `Start`/`Start` is top-left, `End`/`End` is
//! bottom-right. All geometry decisions (boundary overshoot, quadrant
//! snapping, hit regions) operate on the visual rect, never the frame.

use crate::rect::Rect;
use crate::units::{PhysicalPoint, PhysicalSize};

/// Which end of an axis content is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Left edge on x, top edge on y.
    #[default]
    Start,
    /// Right edge on x, bottom edge on y.
    End,
}

/// Per-axis anchoring of content within the window frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Alignment {
    pub x: Anchor,
    pub y: Anchor,
}

impl Alignment {
    /// Top-left anchoring on both axes.
    pub const START: Self = Self {
        x: Anchor::Start,
        y: Anchor::Start,
    };

    /// Bottom-right anchoring on both axes.
    pub const END: Self = Self {
        x: Anchor::End,
        y: Anchor::End,
    };

    #[inline]
    #[must_use]
    pub const fn new(x: Anchor, y: Anchor) -> Self {
        Self { x, y }
    }

    /// The rectangle the user actually sees: `content` pinned to this
    /// alignment's corner of the frame at `origin`.
    ///
    /// Content larger than the frame is cropped to the frame; the visual
    /// rect never extends outside the frame rect.
    #[must_use]
    pub fn visual_rect(
        self,
        origin: PhysicalPoint,
        frame: PhysicalSize,
        content: PhysicalSize,
    ) -> Rect {
        let width = content.width.min(frame.width);
        let height = content.height.min(frame.height);
        let x = match self.x {
            Anchor::Start => origin.x,
            Anchor::End => origin.x + frame.width - width,
        };
        let y = match self.y {
            Anchor::Start => origin.y,
            Anchor::End => origin.y + frame.height - height,
        };
        Rect::new(x, y, width, height)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
