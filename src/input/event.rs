use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Platform-agnostic input events.
///
/// These are fed into a [`DeviceTracker`](super::DeviceTracker) which folds
/// everything that happened between two frames into a
/// [`DeviceSnapshot`](super::DeviceSnapshot).
///
/// Positions are window pixels with the origin at the top-left corner, the
/// convention windowing systems report. The tracker flips them.
///
/// # Example
///
/// ```ignore
/// tracker.handle_event(InputEvent::CursorMoved { x: 100.0, y: 200.0 });
/// tracker.handle_event(InputEvent::Scroll { delta: 1.0 });
/// let snapshot = tracker.next_frame();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Cursor moved to absolute window position.
    CursorMoved {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels (down is positive).
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Vertical scroll wheel movement (positive = away from the user).
    Scroll {
        /// Scroll amount in lines.
        delta: f32,
    },
    /// A finger touched, moved on, or left the surface.
    Touch {
        /// Stable finger identifier for the lifetime of the contact.
        id: u64,
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels (down is positive).
        y: f32,
        /// Contact phase.
        phase: TouchPhase,
    },
    /// The window (and viewport) changed size.
    Resized {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

impl MouseButton {
    /// Slot index in per-button arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Middle => 2,
        }
    }
}

/// Phase of a touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    /// Finger made contact this frame.
    Began,
    /// Finger moved this frame.
    Moved,
    /// Finger is down but did not move this frame.
    Stationary,
    /// Finger lifted this frame.
    Ended,
    /// The platform cancelled the contact (e.g. palm rejection).
    Cancelled,
}

impl TouchPhase {
    /// Whether the contact is gone after this frame.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }
}
