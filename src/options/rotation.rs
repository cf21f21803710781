use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::rig::curve::FollowCurve;
use crate::rig::tween::FollowSettings;
use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Rotation", inline)]
#[serde(default)]
/// Look-rotation parameters. Angles are in degrees.
pub struct RotationOptions {
    /// Yaw (x) and pitch (y) degrees per unit of pointer delta per second.
    #[schemars(with = "[f32; 2]")]
    pub sensitivity: Vec2,
    /// How the actual look angles chase the target angles.
    #[schemars(skip)]
    pub follow: FollowSettings,
}

impl Default for RotationOptions {
    fn default() -> Self {
        Self {
            sensitivity: Vec2::new(10.0, 10.0),
            follow: FollowSettings {
                speed: 360.0,
                curve_start: 45.0,
                curve: FollowCurve::Easing {
                    function: EasingFunction::SqrtOut,
                },
            },
        }
    }
}
