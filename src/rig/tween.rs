//! Curve-scaled move-towards stepping shared by every rig axis.

use glam::{Vec2, Vec3};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::curve::FollowCurve;

/// How quickly one axis (position, rotation or zoom) follows its target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FollowSettings {
    /// Base follow speed in axis units per second.
    pub speed: f32,
    /// Distance at which the curve reaches its full-speed end.
    pub curve_start: f32,
    /// Speed multiplier sampled at `distance / curve_start`.
    pub curve: FollowCurve,
}

impl Default for FollowSettings {
    fn default() -> Self {
        Self {
            speed: 10.0,
            curve_start: 1.0,
            curve: FollowCurve::default(),
        }
    }
}

impl FollowSettings {
    /// Largest step allowed this frame for the given remaining distance.
    ///
    /// `scale` is an extra multiplier (the zoom-based pan scale for
    /// position, 1 otherwise). Never negative.
    #[must_use]
    pub fn max_step(&self, distance: f32, dt: f32, scale: f32) -> f32 {
        let step = self.speed
            * self.curve.sample_ratio(distance, self.curve_start)
            * dt
            * scale;
        if step.is_finite() {
            step.max(0.0)
        } else {
            0.0
        }
    }
}

/// Move `current` toward `target` by at most `max_delta`.
#[must_use]
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}

/// Move `current` toward `target` by at most `max_delta`.
#[must_use]
pub fn move_towards_vec2(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let to = target - current;
    let distance = to.length();
    if distance <= max_delta || distance == 0.0 {
        target
    } else {
        current + to / distance * max_delta
    }
}

/// Move `current` toward `target` by at most `max_delta`.
#[must_use]
pub fn move_towards_vec3(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let to = target - current;
    let distance = to.length();
    if distance <= max_delta || distance == 0.0 {
        target
    } else {
        current + to / distance * max_delta
    }
}
