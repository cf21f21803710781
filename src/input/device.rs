//! Per-frame device state.
//!
//! Gesture sources are polled once per frame and need edge information
//! ("pressed this frame", "released this frame") that raw event streams do
//! not carry. [`DeviceTracker`] accumulates events between frames and hands
//! out a [`DeviceSnapshot`] per frame.

use glam::Vec2;

use super::event::{InputEvent, MouseButton, TouchPhase};

/// Number of tracked mouse buttons (left, right, middle).
const BUTTON_COUNT: usize = 3;

/// Frame-level state of one mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    /// Went down during this frame.
    pub pressed: bool,
    /// Is down at the end of this frame.
    pub held: bool,
    /// Went up during this frame.
    pub released: bool,
}

/// One active touch contact as seen by a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Finger identifier.
    pub id: u64,
    /// Position in pixels, origin bottom-left, y up.
    pub position: Vec2,
    /// Phase for this frame.
    pub phase: TouchPhase,
}

/// Everything a gesture source reads in one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceSnapshot {
    /// Pointer position in pixels, origin bottom-left, y up. `None` until
    /// the first cursor event.
    pub pointer: Option<Vec2>,
    /// Left, right and middle button state.
    pub buttons: [ButtonState; BUTTON_COUNT],
    /// Scroll accumulated this frame (y = vertical wheel).
    pub scroll: Vec2,
    /// Touch contacts present this frame, including ones ending now.
    pub touches: Vec<TouchPoint>,
}

impl DeviceSnapshot {
    /// State of a single button.
    #[must_use]
    pub fn button(&self, button: MouseButton) -> ButtonState {
        self.buttons[button.index()]
    }
}

#[derive(Debug, Clone, Copy)]
struct TrackedTouch {
    point: TouchPoint,
    /// End phase deferred to the next frame for contacts that began and
    /// ended between the same two frames.
    deferred_end: Option<TouchPhase>,
}

/// Folds [`InputEvent`]s into per-frame [`DeviceSnapshot`]s.
#[derive(Debug, Clone)]
pub struct DeviceTracker {
    pointer: Option<Vec2>,
    viewport_height: f32,
    buttons: [ButtonState; BUTTON_COUNT],
    scroll: Vec2,
    touches: Vec<TrackedTouch>,
}

impl DeviceTracker {
    /// Create a tracker for a viewport of the given pixel height.
    #[must_use]
    pub fn new(viewport_height: u32) -> Self {
        Self {
            pointer: None,
            viewport_height: viewport_height as f32,
            buttons: [ButtonState::default(); BUTTON_COUNT],
            scroll: Vec2::ZERO,
            touches: Vec::new(),
        }
    }

    /// Current pointer position (bottom-left origin), if the cursor has
    /// been seen.
    #[must_use]
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Convert a top-left-origin window position to the snapshot convention.
    fn flip(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x, self.viewport_height - y)
    }

    /// Record one event. Returns `false` if the event was ignored (a touch
    /// update for a contact that never began).
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.pointer = Some(self.flip(x, y));
            }
            InputEvent::MouseButton { button, pressed } => {
                let state = &mut self.buttons[button.index()];
                if pressed {
                    state.pressed |= !state.held;
                    state.held = true;
                } else if state.held {
                    state.released = true;
                    state.held = false;
                }
            }
            InputEvent::Scroll { delta } => {
                self.scroll.y += delta;
            }
            InputEvent::Touch { id, x, y, phase } => {
                let position = self.flip(x, y);
                return self.handle_touch(id, position, phase);
            }
            InputEvent::Resized { height, .. } => {
                self.viewport_height = height as f32;
            }
        }
        true
    }

    fn handle_touch(
        &mut self,
        id: u64,
        position: Vec2,
        phase: TouchPhase,
    ) -> bool {
        let index = self
            .touches
            .iter()
            .position(|t| t.point.id == id && t.deferred_end.is_none());

        let Some(index) = index else {
            if phase == TouchPhase::Began {
                self.touches.push(TrackedTouch {
                    point: TouchPoint {
                        id,
                        position,
                        phase: TouchPhase::Began,
                    },
                    deferred_end: None,
                });
            } else {
                log::debug!("ignoring touch {id} event without a begin");
                return false;
            }
            return true;
        };

        let touch = &mut self.touches[index];
        touch.point.position = position;
        match phase {
            TouchPhase::Moved | TouchPhase::Stationary => {
                if touch.point.phase == TouchPhase::Stationary {
                    touch.point.phase = TouchPhase::Moved;
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if touch.point.phase == TouchPhase::Began {
                    touch.deferred_end = Some(phase);
                } else {
                    touch.point.phase = phase;
                }
            }
            // Duplicate begin for a live id: treat as a fresh contact.
            TouchPhase::Began => touch.point.phase = TouchPhase::Began,
        }
        true
    }

    /// State of the current frame without advancing.
    #[must_use]
    pub fn snapshot(&self) -> DeviceSnapshot {
        DeviceSnapshot {
            pointer: self.pointer,
            buttons: self.buttons,
            scroll: self.scroll,
            touches: self.touches.iter().map(|t| t.point).collect(),
        }
    }

    /// Clear per-frame edges and retire finished touches.
    pub fn end_frame(&mut self) {
        for state in &mut self.buttons {
            state.pressed = false;
            state.released = false;
        }
        self.scroll = Vec2::ZERO;
        self.touches.retain(|t| !t.point.phase.is_finished());
        for touch in &mut self.touches {
            touch.point.phase = match touch.deferred_end.take() {
                Some(end) => end,
                None => TouchPhase::Stationary,
            };
        }
    }

    /// Snapshot the current frame, then advance to the next one.
    pub fn next_frame(&mut self) -> DeviceSnapshot {
        let snapshot = self.snapshot();
        self.end_frame();
        snapshot
    }
}

impl Default for DeviceTracker {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: MouseButton, pressed: bool) -> InputEvent {
        InputEvent::MouseButton { button, pressed }
    }

    #[test]
    fn button_edges_last_one_frame() {
        let mut tracker = DeviceTracker::new(100);
        let _ = tracker.handle_event(press(MouseButton::Right, true));
        let frame = tracker.next_frame();
        assert_eq!(
            frame.button(MouseButton::Right),
            ButtonState {
                pressed: true,
                held: true,
                released: false,
            }
        );

        let frame = tracker.next_frame();
        assert_eq!(
            frame.button(MouseButton::Right),
            ButtonState {
                pressed: false,
                held: true,
                released: false,
            }
        );

        let _ = tracker.handle_event(press(MouseButton::Right, false));
        let frame = tracker.next_frame();
        assert_eq!(
            frame.button(MouseButton::Right),
            ButtonState {
                pressed: false,
                held: false,
                released: true,
            }
        );
        assert_eq!(
            tracker.next_frame().button(MouseButton::Right),
            ButtonState::default()
        );
    }

    #[test]
    fn click_within_one_frame_reports_both_edges() {
        let mut tracker = DeviceTracker::new(100);
        let _ = tracker.handle_event(press(MouseButton::Middle, true));
        let _ = tracker.handle_event(press(MouseButton::Middle, false));
        let state = tracker.next_frame().button(MouseButton::Middle);
        assert!(state.pressed && state.released && !state.held);
    }

    #[test]
    fn cursor_is_flipped_to_bottom_left_origin() {
        let mut tracker = DeviceTracker::new(600);
        assert_eq!(tracker.pointer(), None);
        assert_eq!(tracker.snapshot().pointer, None);

        let _ = tracker.handle_event(InputEvent::CursorMoved { x: 10.0, y: 100.0 });
        assert_eq!(tracker.pointer(), Some(Vec2::new(10.0, 500.0)));

        let _ = tracker.handle_event(InputEvent::Resized {
            width: 800,
            height: 800,
        });
        let _ = tracker.handle_event(InputEvent::CursorMoved { x: 10.0, y: 100.0 });
        assert_eq!(tracker.pointer(), Some(Vec2::new(10.0, 700.0)));
    }

    #[test]
    fn scroll_accumulates_then_resets() {
        let mut tracker = DeviceTracker::new(100);
        let _ = tracker.handle_event(InputEvent::Scroll { delta: 1.0 });
        let _ = tracker.handle_event(InputEvent::Scroll { delta: 0.5 });
        assert_eq!(tracker.next_frame().scroll, Vec2::new(0.0, 1.5));
        assert_eq!(tracker.next_frame().scroll, Vec2::ZERO);
    }

    #[test]
    fn touch_phases_progress_across_frames() {
        let mut tracker = DeviceTracker::new(100);
        let touch = |phase, y| InputEvent::Touch {
            id: 7,
            x: 5.0,
            y,
            phase,
        };

        let _ = tracker.handle_event(touch(TouchPhase::Began, 90.0));
        let frame = tracker.next_frame();
        assert_eq!(frame.touches[0].phase, TouchPhase::Began);
        assert_eq!(frame.touches[0].position, Vec2::new(5.0, 10.0));

        assert_eq!(tracker.next_frame().touches[0].phase, TouchPhase::Stationary);

        let _ = tracker.handle_event(touch(TouchPhase::Moved, 80.0));
        assert_eq!(tracker.next_frame().touches[0].phase, TouchPhase::Moved);

        let _ = tracker.handle_event(touch(TouchPhase::Ended, 80.0));
        assert_eq!(tracker.next_frame().touches[0].phase, TouchPhase::Ended);
        assert!(tracker.next_frame().touches.is_empty());
    }

    #[test]
    fn tap_inside_one_frame_ends_on_the_next() {
        let mut tracker = DeviceTracker::new(100);
        let touch = |phase| InputEvent::Touch {
            id: 1,
            x: 0.0,
            y: 0.0,
            phase,
        };
        let _ = tracker.handle_event(touch(TouchPhase::Began));
        let _ = tracker.handle_event(touch(TouchPhase::Ended));
        assert_eq!(tracker.next_frame().touches[0].phase, TouchPhase::Began);
        assert_eq!(tracker.next_frame().touches[0].phase, TouchPhase::Ended);
        assert!(tracker.next_frame().touches.is_empty());
    }

    #[test]
    fn touch_without_begin_is_ignored() {
        let mut tracker = DeviceTracker::new(100);
        let touch = |phase| InputEvent::Touch {
            id: 3,
            x: 1.0,
            y: 1.0,
            phase,
        };
        assert!(!tracker.handle_event(touch(TouchPhase::Moved)));
        assert!(!tracker.handle_event(touch(TouchPhase::Ended)));
        assert!(tracker.snapshot().touches.is_empty());

        assert!(tracker.handle_event(touch(TouchPhase::Began)));
        assert!(tracker.handle_event(touch(TouchPhase::Moved)));
        assert!(tracker.handle_event(InputEvent::Scroll { delta: 1.0 }));
    }
}
