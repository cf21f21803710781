//! Translation from winit window events.

use winit::event::{ElementState, MouseScrollDelta, WindowEvent};

use super::device::DeviceTracker;
use super::event::{InputEvent, MouseButton, TouchPhase};

/// Scroll lines per pixel for trackpads that report pixel deltas.
const LINES_PER_PIXEL: f32 = 0.01;

impl MouseButton {
    /// Map a winit button. Back/forward/other buttons have no role.
    #[must_use]
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(Self::Left),
            winit::event::MouseButton::Right => Some(Self::Right),
            winit::event::MouseButton::Middle => Some(Self::Middle),
            _ => None,
        }
    }
}

impl From<winit::event::TouchPhase> for TouchPhase {
    fn from(phase: winit::event::TouchPhase) -> Self {
        match phase {
            winit::event::TouchPhase::Started => Self::Began,
            winit::event::TouchPhase::Moved => Self::Moved,
            winit::event::TouchPhase::Ended => Self::Ended,
            winit::event::TouchPhase::Cancelled => Self::Cancelled,
        }
    }
}

impl InputEvent {
    /// Convert a winit window event, if it carries pointer or touch input.
    #[must_use]
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::CursorMoved { position, .. } => Some(Self::CursorMoved {
                x: position.x as f32,
                y: position.y as f32,
            }),
            WindowEvent::MouseInput { state, button, .. } => {
                MouseButton::from_winit(*button).map(|button| Self::MouseButton {
                    button,
                    pressed: *state == ElementState::Pressed,
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * LINES_PER_PIXEL,
                };
                Some(Self::Scroll { delta: scroll })
            }
            WindowEvent::Touch(touch) => Some(Self::Touch {
                id: touch.id,
                x: touch.location.x as f32,
                y: touch.location.y as f32,
                phase: touch.phase.into(),
            }),
            WindowEvent::Resized(size) => Some(Self::Resized {
                width: size.width,
                height: size.height,
            }),
            _ => None,
        }
    }
}

impl DeviceTracker {
    /// Feed a winit window event. Returns `true` if it was consumed.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        InputEvent::from_window_event(event).is_some_and(|e| self.handle_event(e))
    }
}
