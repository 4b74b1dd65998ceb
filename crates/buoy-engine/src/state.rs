//! Committed widget state.
//!
//! The single source of truth for what the widget currently is: its view
//! mode, its content alignment within the fixed frame, and the per-mode
//! profiles (which a resize gesture can rewrite for the expanded panel).
//! Controllers read it when capturing sessions and commit to it at
//! well-defined moments: alignment when an expansion plan is applied, mode
//! when the content swap happens, the expanded size when a resize ends.

use buoy_geometry::{Alignment, LogicalSize};
use buoy_host::ViewMode;

use crate::config::{ModeProfile, ModeProfiles};

/// Mode, alignment, and profiles, as currently committed.
#[derive(Debug, Clone)]
pub struct WidgetState {
    mode: ViewMode,
    alignment: Alignment,
    profiles: ModeProfiles,
}

impl WidgetState {
    /// Fresh state: toolbar mode, docked bottom-right (end/end alignment).
    pub fn new(profiles: ModeProfiles) -> Self {
        Self {
            mode: ViewMode::Toolbar,
            alignment: Alignment::END,
            profiles,
        }
    }

    /// The committed view mode.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Content alignment within the frame.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// The per-mode profile table.
    pub fn profiles(&self) -> &ModeProfiles {
        &self.profiles
    }

    /// Profile of the given mode.
    pub fn profile(&self, mode: ViewMode) -> ModeProfile {
        self.profiles.get(mode)
    }

    /// Nominal content size of the current mode.
    pub fn content_size(&self) -> LogicalSize {
        self.profiles.get(self.mode).size()
    }

    pub(crate) fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub(crate) fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    /// Record the panel size a resize gesture produced. Sticks until the
    /// next resize; transitions back into expanded mode reuse it.
    pub(crate) fn set_expanded_size(&mut self, size: LogicalSize) {
        let expanded = self.profiles.get_mut(ViewMode::Expanded);
        expanded.width = size.width;
        expanded.height = size.height;
    }
}
