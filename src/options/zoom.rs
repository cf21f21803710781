use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::rig::tween::FollowSettings;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Zoom", inline)]
#[serde(default)]
/// Zoom (camera distance behind the pivot) parameters.
pub struct ZoomOptions {
    /// Scroll delta multiplier.
    #[schemars(
        title = "Zoom Speed",
        range(min = 1.0, max = 1000.0),
        extend("step" = 1.0)
    )]
    pub sensitivity: f32,
    /// How the actual zoom chases the target zoom. The same curve also
    /// scales scroll input by `|target zoom| / curve_start`.
    #[schemars(skip)]
    pub follow: FollowSettings,
    /// Closest allowed distance.
    #[schemars(title = "Min Zoom", range(min = 0.0, max = 100.0))]
    pub min: f32,
    /// Farthest allowed distance.
    #[schemars(title = "Max Zoom", range(min = 0.0, max = 1000.0))]
    pub max: f32,
}

impl Default for ZoomOptions {
    fn default() -> Self {
        Self {
            sensitivity: 200.0,
            follow: FollowSettings {
                speed: 40.0,
                curve_start: 10.0,
                ..FollowSettings::default()
            },
            min: 2.0,
            max: 50.0,
        }
    }
}
