//! Shared utilities: easing presets for follow curves and a frame clock
//! for hosts that do not supply their own elapsed time.

pub mod easing;
pub mod frame_clock;
