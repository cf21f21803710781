use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::rig::curve::{CurveKey, FollowCurve};
use crate::rig::tween::FollowSettings;
use crate::scene::LayerMask;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Position", inline)]
#[serde(default)]
/// Panning and position-follow parameters.
pub struct PositionOptions {
    /// Pan speed along the rig's right (x) and up (y) axes.
    #[schemars(with = "[f32; 2]")]
    pub sensitivity: Vec2,
    /// How the actual position chases the target position.
    #[schemars(skip)]
    pub follow: FollowSettings,
    /// Zoom distance beyond which pan and follow speed scale up
    /// proportionally (at twice this distance they double).
    #[schemars(title = "Zoom Scale", range(min = 0.0, max = 100.0), extend("step" = 0.5))]
    pub zoom_scale: f32,
    /// Layers a center-on-target ray may hit.
    #[schemars(skip)]
    pub center_mask: LayerMask,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            sensitivity: Vec2::new(2.0, 2.0),
            follow: FollowSettings {
                speed: 20.0,
                curve_start: 5.0,
                curve: FollowCurve::keyframes(vec![
                    CurveKey::new(0.0, 0.2),
                    CurveKey::new(1.0, 1.0),
                    CurveKey::new(4.0, 3.0),
                ]),
            },
            zoom_scale: 10.0,
            center_mask: LayerMask::ALL,
        }
    }
}
