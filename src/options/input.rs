use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::input::{InputMode, MouseBindings};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Input", inline)]
#[serde(default)]
/// Input device selection and overall sensitivity.
pub struct InputOptions {
    /// Which gesture source to run.
    #[schemars(title = "Input Mode")]
    pub mode: InputMode,
    /// Multiplier applied to every pointer, touch and scroll delta.
    #[schemars(title = "Sensitivity", range(min = 0.1, max = 5.0), extend("step" = 0.05))]
    pub sensitivity: f32,
    /// Mouse buttons for rotate and pan.
    #[schemars(skip)]
    pub mouse: MouseBindings,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            mode: InputMode::Automatic,
            sensitivity: 1.0,
            mouse: MouseBindings::default(),
        }
    }
}
