//! Pointer input vocabulary shared by the gesture controllers.

/// Mouse button reported with a pointer press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// The main button, usually left. The only one that starts gestures.
    Primary,
    Secondary,
    Middle,
}

/// What the pointer landed on, as classified by the embedding UI.
///
/// The engine does not hit-test content itself; the UI layer tells it
/// whether the press hit an interactive element (button, link, input) and
/// whether that element explicitly opted into dragging anyway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerTarget {
    /// The press landed on an interactive element.
    pub interactive: bool,

    /// The element opted into dragging despite being interactive, e.g. a
    /// grab handle rendered as a button.
    pub draggable_override: bool,
}

impl PointerTarget {
    /// Plain widget surface, the common drag case.
    pub const SURFACE: Self = Self {
        interactive: false,
        draggable_override: false,
    };

    /// An interactive element without a drag override.
    pub const CONTROL: Self = Self {
        interactive: true,
        draggable_override: false,
    };

    /// An interactive element that still wants to start drags.
    pub const DRAG_HANDLE: Self = Self {
        interactive: true,
        draggable_override: true,
    };

    /// Whether a primary press here may begin a drag.
    pub fn allows_drag(&self) -> bool {
        !self.interactive || self.draggable_override
    }
}
