//! Frame timing: capped per-frame dt and a smoothed fps readout.

use web_time::{Duration, Instant};

/// Longest frame step handed to the rig. Larger gaps (debugger pauses,
/// backgrounded tabs) would otherwise produce a single huge jump.
const DEFAULT_MAX_STEP: Duration = Duration::from_millis(250);

/// Per-frame elapsed-time source for hosts without their own clock.
pub struct FrameClock {
    /// Last tick timestamp
    last_tick: Instant,
    /// Upper bound for a single step
    max_step: Duration,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameClock {
    /// Create a clock whose first tick measures from now.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_step(DEFAULT_MAX_STEP)
    }

    /// Create a clock with a custom per-step cap.
    #[must_use]
    pub fn with_max_step(max_step: Duration) -> Self {
        Self {
            last_tick: Instant::now(),
            max_step,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Advance the clock and return the elapsed seconds since the previous
    /// tick, capped at the configured maximum step.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick).min(self.max_step);
        self.last_tick = now;

        let dt = elapsed.as_secs_f32();
        if dt > 0.0 {
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + (1.0 / dt) * self.smoothing;
        }
        dt
    }

    /// Current FPS (smoothed).
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
