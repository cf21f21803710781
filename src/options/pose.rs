use glam::{Vec2, Vec3};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Initial Pose", inline)]
#[serde(default)]
/// Pose the rig snaps to when a controller is created.
pub struct InitialPose {
    /// Pivot position.
    #[schemars(with = "[f32; 3]")]
    pub position: Vec3,
    /// Pitch (x) and yaw (y) in degrees.
    #[schemars(with = "[f32; 2]")]
    pub rotation_euler: Vec2,
    /// Distance of the camera behind the pivot.
    pub zoom: f32,
}

impl Default for InitialPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation_euler: Vec2::new(30.0, 0.0),
            zoom: 10.0,
        }
    }
}
