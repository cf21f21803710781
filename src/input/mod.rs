//! Input handling: platform-agnostic events, per-frame device snapshots,
//! the gesture sources that turn them into rig signals, and the resolver
//! that picks which source runs.

/// Per-frame device snapshots and the tracker that builds them.
pub mod device;
/// Platform-agnostic input events.
pub mod event;
/// Gesture capability trait, signals, and the disabled source.
pub mod gesture;
/// Input mode resolution and source ownership.
pub mod mode;
/// Mouse gesture source.
pub mod mouse;
/// Touch gesture source.
pub mod touch;
/// winit window event translation.
#[cfg(feature = "winit")]
pub mod window;

pub use device::{ButtonState, DeviceSnapshot, DeviceTracker, TouchPoint};
pub use event::{InputEvent, MouseButton, TouchPhase};
pub use gesture::{DisabledGestures, GestureSignals, GestureSource};
pub use mode::{InputMode, InputModeResolver, Platform};
pub use mouse::{MouseBindings, MouseGestures};
pub use touch::{TouchGestures, TouchTrack};
