//! Touch-driven gestures.
//!
//! One finger rotates, two fingers pan. A quick tap that follows shortly
//! after the previous touch ended centers on the tapped object. There is no
//! pinch zoom.

use glam::Vec2;

use super::device::{DeviceSnapshot, TouchPoint};
use super::event::TouchPhase;
use super::gesture::{GestureSource, CLICK_THRESHOLD_SECS};
use super::mode::InputMode;

/// Maximum gap after the previous release for a tap to count as a center
/// request.
pub const TAP_GAP_SECS: f32 = 0.25;

/// Bookkeeping for one tracked finger.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchTrack {
    /// Finger id, `None` while the slot is free.
    pub id: Option<u64>,
    /// Where the finger first touched.
    pub start: Vec2,
    /// Latest position.
    pub current: Vec2,
    /// Position one frame earlier.
    pub prev: Vec2,
    /// Movement this frame.
    pub delta: Vec2,
    /// Seconds since contact.
    pub down_secs: f32,
    /// Contact started this frame.
    pub pressed_this_frame: bool,
    /// Contact ended this frame.
    pub released_this_frame: bool,
}

impl TouchTrack {
    /// Whether a finger occupies this slot.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    fn begin(&mut self, touch: &TouchPoint) {
        self.id = Some(touch.id);
        self.start = touch.position;
        self.current = touch.position;
        self.prev = touch.position;
        self.delta = Vec2::ZERO;
        self.down_secs = 0.0;
        self.pressed_this_frame = true;
    }

    fn advance(&mut self, touch: &TouchPoint, dt: f32) {
        self.prev = self.current;
        self.current = touch.position;
        self.delta = self.current - self.prev;
        self.down_secs += dt;
    }

    fn release(&mut self) {
        self.id = None;
        self.released_this_frame = true;
    }

    fn cancel(&mut self) {
        self.id = None;
        self.delta = Vec2::ZERO;
    }

    fn clear_edges(&mut self) {
        self.pressed_this_frame = false;
        self.released_this_frame = false;
    }
}

const PRIMARY: usize = 0;
const SECONDARY: usize = 1;

/// Two-finger touch gesture source.
#[derive(Debug, Clone)]
pub struct TouchGestures {
    sensitivity: f32,
    /// Primary and secondary finger slots.
    fingers: [TouchTrack; 2],
    /// Seconds since the primary finger was last released (or since this
    /// source was created).
    since_last_release: f32,
}

impl TouchGestures {
    /// Create a touch source with the given sensitivity.
    #[must_use]
    pub fn new(sensitivity: f32) -> Self {
        Self {
            sensitivity,
            fingers: [TouchTrack::default(); 2],
            since_last_release: 0.0,
        }
    }

    /// The primary finger slot.
    #[must_use]
    pub fn primary(&self) -> &TouchTrack {
        &self.fingers[PRIMARY]
    }

    /// The secondary finger slot.
    #[must_use]
    pub fn secondary(&self) -> &TouchTrack {
        &self.fingers[SECONDARY]
    }

    fn slot_of(&self, id: u64) -> Option<usize> {
        self.fingers.iter().position(|f| f.id == Some(id))
    }

    fn free_slot(&self) -> Option<usize> {
        self.fingers.iter().position(|f| !f.is_active())
    }
}

impl GestureSource for TouchGestures {
    fn mode(&self) -> InputMode {
        InputMode::Touch
    }

    fn poll(&mut self, snapshot: &DeviceSnapshot, dt: f32) {
        // The reset happens one poll after the release so the release frame
        // itself still sees the gap measured from the touch before it.
        if self.fingers[PRIMARY].released_this_frame {
            self.since_last_release = 0.0;
        }
        for finger in &mut self.fingers {
            finger.clear_edges();
        }
        self.since_last_release += dt;

        for touch in &snapshot.touches {
            if let Some(slot) = self.slot_of(touch.id) {
                let finger = &mut self.fingers[slot];
                finger.advance(touch, dt);
                match touch.phase {
                    TouchPhase::Ended => finger.release(),
                    TouchPhase::Cancelled => finger.cancel(),
                    _ => {}
                }
            } else if touch.phase == TouchPhase::Began {
                if let Some(slot) = self.free_slot() {
                    self.fingers[slot].begin(touch);
                }
            }
        }
    }

    fn primary_delta(&self) -> Vec2 {
        let primary = &self.fingers[PRIMARY];
        if primary.is_active() {
            // Content follows the finger, so the camera moves against it.
            -primary.delta * self.sensitivity
        } else {
            Vec2::ZERO
        }
    }

    fn zoom_delta(&self) -> f32 {
        0.0
    }

    fn should_rotate(&self) -> bool {
        self.fingers[PRIMARY].is_active() && !self.fingers[SECONDARY].is_active()
    }

    fn should_drag(&self) -> bool {
        self.fingers[PRIMARY].is_active() && self.fingers[SECONDARY].is_active()
    }

    fn should_center_on_target(&self) -> bool {
        let primary = &self.fingers[PRIMARY];
        self.since_last_release < TAP_GAP_SECS
            && primary.down_secs < CLICK_THRESHOLD_SECS
            && primary.released_this_frame
    }

    fn pointer_position(&self) -> Option<Vec2> {
        let primary = &self.fingers[PRIMARY];
        (primary.is_active() || primary.released_this_frame).then_some(primary.current)
    }

    fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
    }
}
