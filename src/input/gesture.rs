//! Device-independent gesture capability.

use glam::Vec2;
use serde::Serialize;

use super::device::DeviceSnapshot;
use super::mode::InputMode;

/// A hold shorter than this counts as a click/tap rather than a drag.
pub const CLICK_THRESHOLD_SECS: f32 = 0.125;

/// One frame's worth of user intent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GestureSignals {
    /// Pointer/finger movement this frame, already scaled by sensitivity.
    pub primary_delta: Vec2,
    /// Zoom wheel movement this frame, already scaled by sensitivity.
    pub zoom_delta: f32,
    /// Rotate the rig by `primary_delta`.
    pub should_rotate: bool,
    /// Pan the rig by `primary_delta`.
    pub should_drag: bool,
    /// Re-center the rig on whatever is under the pointer.
    pub should_center: bool,
}

/// A per-frame polled input device.
///
/// `poll` is called exactly once per frame; every other method is a pure
/// read of the state it left behind.
pub trait GestureSource {
    /// The concrete mode this source implements (never
    /// [`InputMode::Automatic`]).
    fn mode(&self) -> InputMode;

    /// Advance device state by one frame.
    fn poll(&mut self, snapshot: &DeviceSnapshot, dt: f32);

    /// Primary 2D movement for rotate/drag.
    fn primary_delta(&self) -> Vec2;

    /// Zoom delta.
    fn zoom_delta(&self) -> f32;

    /// Whether the user is rotating.
    fn should_rotate(&self) -> bool;

    /// Whether the user is panning.
    fn should_drag(&self) -> bool;

    /// Whether the user asked to center on the object under the pointer.
    fn should_center_on_target(&self) -> bool;

    /// Screen point (bottom-left origin) a center request refers to.
    fn pointer_position(&self) -> Option<Vec2> {
        None
    }

    /// Overall sensitivity multiplier.
    fn sensitivity(&self) -> f32;

    /// Replace the overall sensitivity multiplier.
    fn set_sensitivity(&mut self, sensitivity: f32);

    /// All five reads bundled together.
    fn signals(&self) -> GestureSignals {
        GestureSignals {
            primary_delta: self.primary_delta(),
            zoom_delta: self.zoom_delta(),
            should_rotate: self.should_rotate(),
            should_drag: self.should_drag(),
            should_center: self.should_center_on_target(),
        }
    }
}

/// Input suspended: every signal is off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisabledGestures {
    sensitivity: f32,
}

impl DisabledGestures {
    /// Create a disabled source. The sensitivity is kept only so it survives
    /// a round trip through the resolver.
    #[must_use]
    pub fn new(sensitivity: f32) -> Self {
        Self { sensitivity }
    }
}

impl Default for DisabledGestures {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl GestureSource for DisabledGestures {
    fn mode(&self) -> InputMode {
        InputMode::Disabled
    }

    fn poll(&mut self, _snapshot: &DeviceSnapshot, _dt: f32) {}

    fn primary_delta(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn zoom_delta(&self) -> f32 {
        0.0
    }

    fn should_rotate(&self) -> bool {
        false
    }

    fn should_drag(&self) -> bool {
        false
    }

    fn should_center_on_target(&self) -> bool {
        false
    }

    fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::device::ButtonState;

    #[test]
    fn disabled_ignores_everything() {
        let mut source = DisabledGestures::default();
        let held = ButtonState {
            pressed: true,
            held: true,
            released: false,
        };
        let snapshot = DeviceSnapshot {
            pointer: Some(Vec2::new(50.0, 50.0)),
            buttons: [held; 3],
            scroll: Vec2::new(0.0, 3.0),
            ..DeviceSnapshot::default()
        };
        source.poll(&snapshot, 0.016);
        assert_eq!(source.signals(), GestureSignals::default());
        assert_eq!(source.pointer_position(), None);
        assert_eq!(source.mode(), InputMode::Disabled);
    }
}
