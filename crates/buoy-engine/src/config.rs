//! Engine configuration.
//!
//! Every tunable of the geometry engine lives here: drag damping and
//! thresholds, snap-back timing, resize floors, transition stage timing,
//! dock placement padding, and the per-mode content profiles.
//!
//! Defaults reproduce the shipped widget behavior and are always available
//! via [`EngineConfig::default`]. With the `config-file` feature enabled the
//! whole tree can also be loaded from TOML, with missing fields falling back
//! to those defaults field by field.

use buoy_geometry::LogicalSize;
use buoy_host::ViewMode;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Default constants
// ---------------------------------------------------------------------------

/// Fraction of the boundary overshoot that is damped away while dragging.
pub const DEFAULT_DRAG_DAMPING: f64 = 0.5;

/// Pointer travel (logical px) below which a press-release is a click.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 5.0;

/// Residual overshoot (physical px) considered "already settled" on release.
pub const DEFAULT_SETTLE_TOLERANCE: f64 = 1.0;

/// Snap-back duration bounds and the travel distance that maps to the upper
/// bound. Short corrections finish fast, long ones take visibly longer.
pub const DEFAULT_SNAP_BACK_MIN_MS: u64 = 200;
pub const DEFAULT_SNAP_BACK_MAX_MS: u64 = 800;
pub const DEFAULT_SNAP_BACK_REFERENCE_PX: f64 = 600.0;

/// Smallest frame a corner resize may produce, in logical px.
pub const DEFAULT_MIN_RESIZE_WIDTH: f64 = 480.0;
pub const DEFAULT_MIN_RESIZE_HEIGHT: f64 = 320.0;

/// View-mode transition stage timing.
pub const DEFAULT_FADE_MS: u64 = 120;
pub const DEFAULT_MORPH_MS: u64 = 260;

/// Gap between the docked frame and the work-area edges, in logical px.
pub const DEFAULT_DOCK_PADDING: f64 = 20.0;

// ---------------------------------------------------------------------------
// Drag
// ---------------------------------------------------------------------------

/// Tunables for the drag controller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct DragConfig {
    /// Fraction of the overshoot correction applied while the pointer is
    /// down. `0.0` ignores boundaries entirely, `1.0` clamps hard with no
    /// rubber-band feel. Default: `0.5`.
    pub damping: f64,

    /// Pointer travel in logical px that promotes a press into a drag.
    /// Below this the window never moves and the release is a click.
    /// Default: `5.0`.
    pub threshold: f64,

    /// Overshoot magnitude (physical px, max-norm) under which a released
    /// window is left where it is instead of animating. Default: `1.0`.
    pub settle_tolerance: f64,

    /// Snap-back animation duration for a near-zero correction, in ms.
    /// Default: `200`.
    pub snap_back_min_ms: u64,

    /// Snap-back animation duration at or beyond the reference distance,
    /// in ms. Default: `800`.
    pub snap_back_max_ms: u64,

    /// Correction distance (physical px) that maps to the maximum snap-back
    /// duration. Default: `600.0`.
    pub snap_back_reference_px: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DRAG_DAMPING,
            threshold: DEFAULT_DRAG_THRESHOLD,
            settle_tolerance: DEFAULT_SETTLE_TOLERANCE,
            snap_back_min_ms: DEFAULT_SNAP_BACK_MIN_MS,
            snap_back_max_ms: DEFAULT_SNAP_BACK_MAX_MS,
            snap_back_reference_px: DEFAULT_SNAP_BACK_REFERENCE_PX,
        }
    }
}

// ---------------------------------------------------------------------------
// Resize
// ---------------------------------------------------------------------------

/// Tunables for the corner-resize controller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct ResizeConfig {
    /// Minimum frame width in logical px. Default: `480.0`.
    pub min_width: f64,

    /// Minimum frame height in logical px. Default: `320.0`.
    pub min_height: f64,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_RESIZE_WIDTH,
            min_height: DEFAULT_MIN_RESIZE_HEIGHT,
        }
    }
}

impl ResizeConfig {
    /// The minimum frame as a logical size.
    pub fn min_size(&self) -> LogicalSize {
        LogicalSize::new(self.min_width, self.min_height)
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Stage timing for view-mode transitions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct TransitionConfig {
    /// Duration of each content fade (out and back in), in ms.
    /// Default: `120`.
    pub fade_ms: u64,

    /// Duration of the shell morph between mode silhouettes, in ms.
    /// Default: `260`.
    pub morph_ms: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            fade_ms: DEFAULT_FADE_MS,
            morph_ms: DEFAULT_MORPH_MS,
        }
    }
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// Initial-placement tunables.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct PlacementConfig {
    /// Gap kept between the frame and the work-area edges when docking,
    /// in logical px. Default: `20.0`.
    pub dock_padding: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            dock_padding: DEFAULT_DOCK_PADDING,
        }
    }
}

// ---------------------------------------------------------------------------
// Mode profiles
// ---------------------------------------------------------------------------

/// Visual profile of one view mode: nominal content size and the shell
/// corner radius the presenter morphs toward.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct ModeProfile {
    /// Content width in logical px.
    pub width: f64,

    /// Content height in logical px.
    pub height: f64,

    /// Shell corner radius in logical px.
    pub corner_radius: f64,
}

impl ModeProfile {
    pub const fn new(width: f64, height: f64, corner_radius: f64) -> Self {
        Self {
            width,
            height,
            corner_radius,
        }
    }

    /// The profile's content size as a logical size.
    pub fn size(&self) -> LogicalSize {
        LogicalSize::new(self.width, self.height)
    }
}

impl Default for ModeProfile {
    fn default() -> Self {
        Self::new(380.0, 480.0, 16.0)
    }
}

/// The full per-mode profile table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct ModeProfiles {
    /// Pill-shaped strip. Default: `200x56`, radius `28`.
    pub toolbar: ModeProfile,

    /// Compact card. Default: `380x480`, radius `16`.
    pub collapsed: ModeProfile,

    /// Full panel; also the fixed window frame size. Default: `1200x800`,
    /// radius `16`.
    pub expanded: ModeProfile,
}

impl Default for ModeProfiles {
    fn default() -> Self {
        Self {
            toolbar: ModeProfile::new(200.0, 56.0, 28.0),
            collapsed: ModeProfile::new(380.0, 480.0, 16.0),
            expanded: ModeProfile::new(1200.0, 800.0, 16.0),
        }
    }
}

impl ModeProfiles {
    /// The profile for `mode`.
    pub fn get(&self, mode: ViewMode) -> ModeProfile {
        match mode {
            ViewMode::Toolbar => self.toolbar,
            ViewMode::Collapsed => self.collapsed,
            ViewMode::Expanded => self.expanded,
        }
    }

    /// Mutable access to the profile for `mode`.
    pub fn get_mut(&mut self, mode: ViewMode) -> &mut ModeProfile {
        match mode {
            ViewMode::Toolbar => &mut self.toolbar,
            ViewMode::Collapsed => &mut self.collapsed,
            ViewMode::Expanded => &mut self.expanded,
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct EngineConfig {
    pub drag: DragConfig,
    pub resize: ResizeConfig,
    pub transition: TransitionConfig,
    pub placement: PlacementConfig,
    pub modes: ModeProfiles,
}

impl EngineConfig {
    /// Parse a TOML document into an `EngineConfig`.
    ///
    /// Missing fields take their defaults, so a partial file tweaking a
    /// single value is valid.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|e| ConfigError::Toml(e.to_string()))
    }

    /// Read and parse a TOML config file.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        Self::from_toml_str(&text)
    }

    /// Validate the configuration, returning a list of human-readable
    /// problems. An empty list means the config is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if !(0.0..=1.0).contains(&self.drag.damping) {
            problems.push(format!(
                "drag.damping must be within [0, 1], got {}",
                self.drag.damping
            ));
        }
        if self.drag.threshold < 0.0 || !self.drag.threshold.is_finite() {
            problems.push(format!(
                "drag.threshold must be finite and non-negative, got {}",
                self.drag.threshold
            ));
        }
        if self.drag.settle_tolerance < 0.0 || !self.drag.settle_tolerance.is_finite() {
            problems.push(format!(
                "drag.settle_tolerance must be finite and non-negative, got {}",
                self.drag.settle_tolerance
            ));
        }
        if self.drag.snap_back_min_ms > self.drag.snap_back_max_ms {
            problems.push(format!(
                "drag.snap_back_min_ms ({}) must not exceed drag.snap_back_max_ms ({})",
                self.drag.snap_back_min_ms, self.drag.snap_back_max_ms
            ));
        }
        if self.drag.snap_back_reference_px <= 0.0 || !self.drag.snap_back_reference_px.is_finite()
        {
            problems.push(format!(
                "drag.snap_back_reference_px must be finite and positive, got {}",
                self.drag.snap_back_reference_px
            ));
        }

        if self.resize.min_width <= 0.0 || self.resize.min_height <= 0.0 {
            problems.push(format!(
                "resize minimums must be positive, got {}x{}",
                self.resize.min_width, self.resize.min_height
            ));
        }

        if self.placement.dock_padding < 0.0 || !self.placement.dock_padding.is_finite() {
            problems.push(format!(
                "placement.dock_padding must be finite and non-negative, got {}",
                self.placement.dock_padding
            ));
        }

        for (name, profile) in [
            ("toolbar", &self.modes.toolbar),
            ("collapsed", &self.modes.collapsed),
            ("expanded", &self.modes.expanded),
        ] {
            if profile.width <= 0.0 || profile.height <= 0.0 {
                problems.push(format!(
                    "modes.{name} size must be positive, got {}x{}",
                    profile.width, profile.height
                ));
            }
            if profile.corner_radius < 0.0 {
                problems.push(format!(
                    "modes.{name}.corner_radius must be non-negative, got {}",
                    profile.corner_radius
                ));
            }
        }

        problems
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading or validating an [`EngineConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// Reading the config file failed. Carries the path.
    Io(String, std::io::Error),
    /// TOML parsing failed.
    Toml(String),
    /// The config parsed but failed validation.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(path, err) => write!(f, "failed to read config {path}: {err}"),
            Self::Toml(msg) => write!(f, "failed to parse config: {msg}"),
            Self::Validation(problems) => {
                write!(f, "invalid config: {}", problems.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(_, err) => Some(err),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
