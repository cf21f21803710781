//! Scripted input replay: drive a controller from a JSON description of
//! frames and collect the per-frame rig output.
//!
//! ```json
//! {
//!   "viewport": { "width": 800, "height": 600 },
//!   "platform": "desktop",
//!   "scene": [{ "position": [0, 0, -20], "radius": 1 }],
//!   "frames": [
//!     { "dt": 0.016, "events": [{ "type": "scroll", "delta": 1 }] },
//!     { "dt": 0.016, "mode": "touch" }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::controller::FreeCamController;
use crate::error::FreeCamError;
use crate::input::{GestureSignals, InputEvent, InputMode, Platform};
use crate::options::Options;
use crate::rig::{RigState, RigTransform};
use crate::scene::StaticScene;

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// One scripted frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayFrame {
    /// Frame time in seconds.
    pub dt: f32,
    /// Events delivered before the frame runs.
    #[serde(default)]
    pub events: Vec<InputEvent>,
    /// Switch the input mode before the frame runs.
    #[serde(default)]
    pub mode: Option<InputMode>,
}

/// A complete replay description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Initial viewport.
    #[serde(default)]
    pub viewport: Viewport,
    /// Platform used for automatic input mode resolution.
    #[serde(default = "default_platform")]
    pub platform: Platform,
    /// Rig options. Missing fields use defaults.
    #[serde(default)]
    pub options: Options,
    /// Colliders for center-on-target requests.
    #[serde(default)]
    pub scene: StaticScene,
    /// Frames to run, in order.
    pub frames: Vec<ReplayFrame>,
}

const fn default_platform() -> Platform {
    Platform::Desktop
}

/// Output of one replayed frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    /// Zero-based frame index.
    pub frame: usize,
    /// Input mode that ran this frame.
    pub mode: InputMode,
    /// Signals produced by the gesture source.
    pub signals: GestureSignals,
    /// Target pose after input processing.
    pub target: RigState,
    /// Rig transform after the follow step.
    pub transform: RigTransform,
}

impl ReplayScript {
    /// Parse a script from JSON text.
    pub fn from_json(content: &str) -> Result<Self, FreeCamError> {
        let mut script: Self = serde_json::from_str(content)
            .map_err(|e| FreeCamError::ScriptParse(e.to_string()))?;
        script.options.validate();
        Ok(script)
    }

    /// Load a script from a JSON file.
    pub fn load(path: &Path) -> Result<Self, FreeCamError> {
        let content = std::fs::read_to_string(path)?;
        let script = Self::from_json(&content)?;
        log::info!(
            "loaded replay script {} ({} frames)",
            path.display(),
            script.frames.len()
        );
        Ok(script)
    }

    /// Build a controller for this script.
    #[must_use]
    pub fn controller(&self) -> FreeCamController {
        FreeCamController::new(
            self.options.clone(),
            self.platform,
            self.viewport.width,
            self.viewport.height,
        )
    }

    /// Run every frame through a fresh controller.
    #[must_use]
    pub fn run(&self) -> Vec<FrameRecord> {
        let mut controller = self.controller();
        self.frames
            .iter()
            .enumerate()
            .map(|(index, frame)| run_frame(&mut controller, &self.scene, index, frame))
            .collect()
    }
}

fn run_frame(
    controller: &mut FreeCamController,
    scene: &StaticScene,
    index: usize,
    frame: &ReplayFrame,
) -> FrameRecord {
    if let Some(mode) = frame.mode {
        let _ = controller.set_input_mode(mode);
    }
    for event in &frame.events {
        let _ = controller.handle_event(*event);
    }
    let signals = controller.update(frame.dt, scene);
    let target = *controller.rig().target();
    let transform = controller.late_update(frame.dt);
    FrameRecord {
        frame: index,
        mode: controller.active_input_mode(),
        signals,
        target,
        transform,
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    const CLICK_SCRIPT: &str = r#"{
        "platform": "desktop",
        "scene": [{ "position": [0.0, 0.0, -30.0], "radius": 2.0 }],
        "frames": [
            {
                "dt": 0.016,
                "events": [{ "type": "cursor_moved", "x": 400.0, "y": 300.0 }]
            },
            {
                "dt": 0.016,
                "events": [
                    { "type": "mouse_button", "button": "middle", "pressed": true }
                ]
            },
            {
                "dt": 0.016,
                "events": [
                    { "type": "mouse_button", "button": "middle", "pressed": false }
                ]
            }
        ]
    }"#;

    #[test]
    fn parses_minimal_script() {
        let script = ReplayScript::from_json(r#"{ "frames": [{ "dt": 0.5 }] }"#).unwrap();
        assert_eq!(script.viewport, Viewport::default());
        assert_eq!(script.platform, Platform::Desktop);
        assert!(script.frames[0].events.is_empty());
        assert_eq!(script.frames[0].mode, None);
    }

    #[test]
    fn bad_json_is_a_script_error() {
        let err = ReplayScript::from_json("{ frames: ").unwrap_err();
        assert!(matches!(err, FreeCamError::ScriptParse(_)));
    }

    #[test]
    fn middle_click_centers_on_object() {
        let mut script = ReplayScript::from_json(CLICK_SCRIPT).unwrap();
        script.options.initial_pose.rotation_euler = glam::Vec2::ZERO;
        let records = script.run();
        assert_eq!(records.len(), 3);
        assert!(records[2].signals.should_center);
        assert_eq!(records[2].target.position, Vec3::new(0.0, 0.0, -30.0));
    }

    #[test]
    fn mode_switch_is_recorded() {
        let script = ReplayScript::from_json(
            r#"{ "frames": [{ "dt": 0.1 }, { "dt": 0.1, "mode": "disabled" }] }"#,
        )
        .unwrap();
        let records = script.run();
        assert_eq!(records[0].mode, InputMode::Mouse);
        assert_eq!(records[1].mode, InputMode::Disabled);
    }
}
