use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::device::{ButtonState, DeviceSnapshot};
use super::event::MouseButton;
use super::gesture::{GestureSource, CLICK_THRESHOLD_SECS};
use super::mode::InputMode;

/// Which mouse buttons drive rotate and pan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MouseBindings {
    /// Held to rotate.
    pub rotate: MouseButton,
    /// Held to pan; a short click centers on the object under the cursor.
    pub pan: MouseButton,
}

impl Default for MouseBindings {
    fn default() -> Self {
        Self {
            rotate: MouseButton::Right,
            pan: MouseButton::Middle,
        }
    }
}

/// Tracks whether a button press started while this source was alive.
///
/// A button that is already down when the source is created stays
/// uncaught until it is released and pressed again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CaughtLatch {
    caught: bool,
}

impl CaughtLatch {
    fn update(&mut self, state: ButtonState) {
        if state.pressed {
            self.caught = true;
        } else if !state.held && !state.released {
            self.caught = false;
        }
    }
}

/// Mouse-driven gestures: rotate-button drag rotates, pan-button drag pans,
/// a short pan-button click centers.
#[derive(Debug, Clone)]
pub struct MouseGestures {
    bindings: MouseBindings,
    sensitivity: f32,
    last_pointer: Option<Vec2>,
    delta: Vec2,
    scroll: f32,
    rotate: ButtonState,
    pan: ButtonState,
    rotate_latch: CaughtLatch,
    pan_latch: CaughtLatch,
    /// Seconds the pan button has been held in the current press.
    pan_held_secs: f32,
}

impl MouseGestures {
    /// Create a mouse source with the given bindings and sensitivity.
    #[must_use]
    pub fn new(bindings: MouseBindings, sensitivity: f32) -> Self {
        Self {
            bindings,
            sensitivity,
            last_pointer: None,
            delta: Vec2::ZERO,
            scroll: 0.0,
            rotate: ButtonState::default(),
            pan: ButtonState::default(),
            rotate_latch: CaughtLatch::default(),
            pan_latch: CaughtLatch::default(),
            pan_held_secs: 0.0,
        }
    }

    /// Button bindings in use.
    #[must_use]
    pub fn bindings(&self) -> MouseBindings {
        self.bindings
    }
}

impl GestureSource for MouseGestures {
    fn mode(&self) -> InputMode {
        InputMode::Mouse
    }

    fn poll(&mut self, snapshot: &DeviceSnapshot, dt: f32) {
        self.rotate = snapshot.button(self.bindings.rotate);
        self.pan = snapshot.button(self.bindings.pan);
        self.rotate_latch.update(self.rotate);
        self.pan_latch.update(self.pan);

        // No movement until two known positions exist: neither the first
        // poll nor a cursor the host has not reported yet may cause a jump.
        self.delta = match (self.last_pointer, snapshot.pointer) {
            (Some(last), Some(current)) => last - current,
            _ => Vec2::ZERO,
        };
        if snapshot.pointer.is_some() {
            self.last_pointer = snapshot.pointer;
        }
        self.scroll = snapshot.scroll.y;

        if self.pan.held {
            self.pan_held_secs += dt;
        }
        if self.pan.pressed {
            self.pan_held_secs = 0.0;
        }
    }

    fn primary_delta(&self) -> Vec2 {
        self.delta * self.sensitivity
    }

    fn zoom_delta(&self) -> f32 {
        self.scroll * self.sensitivity
    }

    fn should_rotate(&self) -> bool {
        self.rotate_latch.caught && !self.rotate.pressed && self.rotate.held
    }

    fn should_drag(&self) -> bool {
        self.pan_latch.caught && !self.pan.pressed && self.pan.held
    }

    fn should_center_on_target(&self) -> bool {
        self.pan_latch.caught
            && self.pan.released
            && self.pan_held_secs < CLICK_THRESHOLD_SECS
    }

    fn pointer_position(&self) -> Option<Vec2> {
        self.last_pointer
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
    use crate::input::device::DeviceTracker;
    use crate::input::event::InputEvent;

    const DT: f32 = 1.0 / 60.0;

    fn button(tracker: &mut DeviceTracker, button: MouseButton, pressed: bool) {
        let _ = tracker.handle_event(InputEvent::MouseButton { button, pressed });
    }

    fn step(source: &mut MouseGestures, tracker: &mut DeviceTracker, dt: f32) {
        source.poll(&tracker.next_frame(), dt);
    }

    #[test]
    fn first_poll_has_no_delta() {
        let mut tracker = DeviceTracker::new(100);
        let _ = tracker.handle_event(InputEvent::CursorMoved { x: 80.0, y: 20.0 });
        let mut source = MouseGestures::new(MouseBindings::default(), 1.0);
        step(&mut source, &mut tracker, DT);
        assert_eq!(source.primary_delta(), Vec2::ZERO);
        assert_eq!(source.pointer_position(), Some(Vec2::new(80.0, 80.0)));
    }

    #[test]
    fn delta_is_previous_minus_current_times_sensitivity() {
        let mut tracker = DeviceTracker::new(100);
        let mut source = MouseGestures::new(MouseBindings::default(), 2.0);
        let _ = tracker.handle_event(InputEvent::CursorMoved { x: 0.0, y: 100.0 });
        step(&mut source, &mut tracker, DT);
        // Move right by 10 and up by 5 (window y decreases).
        let _ = tracker.handle_event(InputEvent::CursorMoved { x: 10.0, y: 95.0 });
        step(&mut source, &mut tracker, DT);
        assert_eq!(source.primary_delta(), Vec2::new(-20.0, -10.0));
    }

    #[test]
    fn unknown_cursor_does_not_jump_from_the_corner() {
        let mut tracker = DeviceTracker::new(100);
        let mut source = MouseGestures::new(MouseBindings::default(), 1.0);
        step(&mut source, &mut tracker, DT);
        step(&mut source, &mut tracker, DT);
        assert_eq!(source.pointer_position(), None);

        let _ = tracker.handle_event(InputEvent::CursorMoved { x: 70.0, y: 40.0 });
        step(&mut source, &mut tracker, DT);
        assert_eq!(source.primary_delta(), Vec2::ZERO);
        assert_eq!(source.pointer_position(), Some(Vec2::new(70.0, 60.0)));

        let _ = tracker.handle_event(InputEvent::CursorMoved { x: 60.0, y: 40.0 });
        step(&mut source, &mut tracker, DT);
        assert_eq!(source.primary_delta(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn rotate_skips_the_press_frame() {
        let mut tracker = DeviceTracker::new(100);
        let mut source = MouseGestures::new(MouseBindings::default(), 1.0);
        button(&mut tracker, MouseButton::Right, true);
        step(&mut source, &mut tracker, DT);
        assert!(!source.should_rotate());
        step(&mut source, &mut tracker, DT);
        assert!(source.should_rotate());
        button(&mut tracker, MouseButton::Right, false);
        step(&mut source, &mut tracker, DT);
        assert!(!source.should_rotate());
    }

    #[test]
    fn button_held_before_construction_is_ignored_until_repressed() {
        let mut tracker = DeviceTracker::new(100);
        button(&mut tracker, MouseButton::Right, true);
        let _ = tracker.next_frame();

        let mut source = MouseGestures::new(MouseBindings::default(), 1.0);
        for _ in 0..5 {
            step(&mut source, &mut tracker, DT);
            assert!(!source.should_rotate());
        }

        button(&mut tracker, MouseButton::Right, false);
        step(&mut source, &mut tracker, DT);
        step(&mut source, &mut tracker, DT);
        assert!(!source.should_rotate());

        button(&mut tracker, MouseButton::Right, true);
        step(&mut source, &mut tracker, DT);
        assert!(!source.should_rotate());
        step(&mut source, &mut tracker, DT);
        assert!(source.should_rotate());
    }

    #[test]
    fn short_pan_click_centers() {
        let mut tracker = DeviceTracker::new(100);
        let mut source = MouseGestures::new(MouseBindings::default(), 1.0);
        button(&mut tracker, MouseButton::Middle, true);
        step(&mut source, &mut tracker, DT);
        step(&mut source, &mut tracker, DT);
        button(&mut tracker, MouseButton::Middle, false);
        step(&mut source, &mut tracker, DT);
        assert!(source.should_center_on_target());
        step(&mut source, &mut tracker, DT);
        assert!(!source.should_center_on_target());
    }

    #[test]
    fn long_pan_hold_is_a_drag_not_a_click() {
        let mut tracker = DeviceTracker::new(100);
        let mut source = MouseGestures::new(MouseBindings::default(), 1.0);
        button(&mut tracker, MouseButton::Middle, true);
        step(&mut source, &mut tracker, DT);
        for _ in 0..12 {
            step(&mut source, &mut tracker, DT);
            assert!(source.should_drag());
        }
        button(&mut tracker, MouseButton::Middle, false);
        step(&mut source, &mut tracker, DT);
        assert!(!source.should_center_on_target());
        assert!(!source.should_drag());
    }

    #[test]
    fn scroll_is_scaled() {
        let mut tracker = DeviceTracker::new(100);
        let mut source = MouseGestures::new(MouseBindings::default(), 0.5);
        let _ = tracker.handle_event(InputEvent::Scroll { delta: 2.0 });
        step(&mut source, &mut tracker, DT);
        assert_eq!(source.zoom_delta(), 1.0);
        source.set_sensitivity(3.0);
        assert_eq!(source.zoom_delta(), 6.0);
    }

    #[test]
    fn custom_bindings() {
        let bindings = MouseBindings {
            rotate: MouseButton::Left,
            pan: MouseButton::Right,
        };
        let mut tracker = DeviceTracker::new(100);
        let mut source = MouseGestures::new(bindings, 1.0);
        button(&mut tracker, MouseButton::Left, true);
        step(&mut source, &mut tracker, DT);
        step(&mut source, &mut tracker, DT);
        assert!(source.should_rotate());
        assert!(!source.should_drag());
        assert_eq!(source.bindings(), bindings);
    }
}
