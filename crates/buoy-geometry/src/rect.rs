//! Rectangles in physical pixels.

use crate::units::{PhysicalPoint, PhysicalSize};

/// An axis-aligned rectangle in physical pixels.
///
/// Used for monitor work areas and the widget's visual bounds. Origin is the
/// top-left corner; `y` grows downward, matching window-system coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from an origin point and a size.
    #[inline]
    #[must_use]
    pub const fn from_origin_size(origin: PhysicalPoint, size: PhysicalSize) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Left edge.
    #[inline]
    #[must_use]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge.
    #[inline]
    #[must_use]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Top-left corner.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> PhysicalPoint {
        PhysicalPoint::new(self.x, self.y)
    }

    /// Width and height.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> PhysicalSize {
        PhysicalSize::new(self.width, self.height)
    }

    /// Center point.
    #[inline]
    #[must_use]
    pub fn center(&self) -> PhysicalPoint {
        PhysicalPoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True if width or height is zero (or negative, which no valid monitor
    /// or window reports).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// True if `point` lies inside (edges inclusive on left/top, exclusive
    /// on right/bottom).
    #[inline]
    #[must_use]
    pub fn contains(&self, point: PhysicalPoint) -> bool {
        point.x >= self.x
            && point.x < self.right()
            && point.y >= self.y
            && point.y < self.bottom()
    }

    /// True if `other` lies entirely inside this rectangle (edges inclusive).
    #[inline]
    #[must_use]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.bottom() <= self.bottom()
    }

    /// True if the x-intervals of the two rectangles overlap with nonzero
    /// length. Edge contact does not count.
    #[inline]
    #[must_use]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right()
    }

    /// True if the y-intervals of the two rectangles overlap with nonzero
    /// length. Edge contact does not count.
    #[inline]
    #[must_use]
    pub fn overlaps_y(&self, other: &Rect) -> bool {
        self.y < other.bottom() && other.y < self.bottom()
    }

    /// True if the two rectangles overlap with nonzero area.
    ///
    /// A rect that merely touches a monitor's edge shares no area with it, so
    /// boundary contact counts as detached.
    #[inline]
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }

    /// The smallest rectangle containing both inputs.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// The smallest rectangle containing every rect in `rects`, or `None`
    /// for an empty iterator.
    #[must_use]
    pub fn bounding_box<I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = Rect>,
    {
        let mut iter = rects.into_iter();
        let first = iter.next()?;
        Some(iter.fold(first, |acc, r| acc.union(&r)))
    }

    /// Squared gap distance between two rectangles.
    ///
    /// Zero when they overlap or touch; otherwise the squared straight-line
    /// distance between their closest points. Squared form keeps
    /// nearest-monitor selection free of sqrt.
    #[must_use]
    pub fn distance_squared(&self, other: &Rect) -> f64 {
        let gap_x = (other.x - self.right()).max(self.x - other.right()).max(0.0);
        let gap_y = (other.y - self.bottom())
            .max(self.y - other.bottom())
            .max(0.0);
        gap_x * gap_x + gap_y * gap_y
    }

    /// This rectangle moved by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
