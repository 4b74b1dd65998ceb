//! Logical and physical pixel units.
//!
//! Pointer events arrive in logical (DPI-independent) pixels; window origins
//! and monitor work areas are physical pixels. The two never mix without an
//! explicit conversion through a scale factor, which gestures capture once at
//! session start so a mid-gesture DPI change cannot shear the delta math.
//!
//! # Invariants
//!
//! 1. Conversions are pure multiplies/divides; no rounding happens here.
//!    Rounding to integer pixels is the host's concern at submission time.
//! 2. Scale factors are strictly positive. Callers validate host-reported
//!    scale factors before constructing sessions; these types assume it.

// ---------------------------------------------------------------------------
// Logical units
// ---------------------------------------------------------------------------

/// A point in logical (DPI-independent) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LogicalPoint {
    pub x: f64,
    pub y: f64,
}

impl LogicalPoint {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert to physical pixels at `scale`.
    #[inline]
    #[must_use]
    pub fn to_physical(self, scale: f64) -> PhysicalPoint {
        PhysicalPoint::new(self.x * scale, self.y * scale)
    }

    /// Squared straight-line distance to `other`, in logical pixels.
    ///
    /// Used for drag-threshold checks; squared form avoids the sqrt on the
    /// pointer-move hot path.
    #[inline]
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// A size in logical (DPI-independent) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LogicalSize {
    pub width: f64,
    pub height: f64,
}

impl LogicalSize {
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Convert to physical pixels at `scale`.
    #[inline]
    #[must_use]
    pub fn to_physical(self, scale: f64) -> PhysicalSize {
        PhysicalSize::new(self.width * scale, self.height * scale)
    }
}

// ---------------------------------------------------------------------------
// Physical units
// ---------------------------------------------------------------------------

/// A point in physical pixels (window origin, monitor coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhysicalPoint {
    pub x: f64,
    pub y: f64,
}

impl PhysicalPoint {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert to logical pixels at `scale`.
    #[inline]
    #[must_use]
    pub fn to_logical(self, scale: f64) -> LogicalPoint {
        LogicalPoint::new(self.x / scale, self.y / scale)
    }

    /// This point moved by `(dx, dy)` physical pixels.
    #[inline]
    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhysicalSize {
    pub width: f64,
    pub height: f64,
}

impl PhysicalSize {
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Convert to logical pixels at `scale`.
    #[inline]
    #[must_use]
    pub fn to_logical(self, scale: f64) -> LogicalSize {
        LogicalSize::new(self.width / scale, self.height / scale)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
