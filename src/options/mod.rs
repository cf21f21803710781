//! Rig configuration with TOML preset support.
//!
//! Every tunable (follow speeds and curves, sensitivities, zoom limits,
//! input mode, camera projection, initial pose) lives here. Options
//! serialize to/from TOML so hosts can ship presets.

mod camera;
mod input;
mod pose;
mod position;
mod rotation;
mod zoom;

use std::path::Path;

pub use camera::CameraOptions;
pub use input::InputOptions;
pub use pose::InitialPose;
pub use position::PositionOptions;
pub use rotation::RotationOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use zoom::ZoomOptions;

use crate::error::FreeCamError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[zoom]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Panning and position follow.
    pub position: PositionOptions,
    /// Look rotation.
    pub rotation: RotationOptions,
    /// Zoom distance.
    pub zoom: ZoomOptions,
    /// Input device selection.
    pub input: InputOptions,
    /// Child camera projection.
    pub camera: CameraOptions,
    /// Pose applied at construction.
    #[schemars(skip)]
    pub initial_pose: InitialPose,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, FreeCamError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| FreeCamError::OptionsParse(e.to_string()))?;
        options.validate();
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, FreeCamError> {
        let content = std::fs::read_to_string(path)?;
        let options = Self::from_toml(&content)?;
        log::info!("loaded rig options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), FreeCamError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FreeCamError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        log::info!("saved rig options to {}", path.display());
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Repair inconsistent values in place: sort curve keys and order the
    /// zoom limits. Problems are logged, never rejected.
    pub fn validate(&mut self) {
        self.position.follow.curve.normalize();
        self.rotation.follow.curve.normalize();
        self.zoom.follow.curve.normalize();

        if self.zoom.min > self.zoom.max {
            log::warn!(
                "zoom.min ({}) > zoom.max ({}), swapping",
                self.zoom.min,
                self.zoom.max
            );
            std::mem::swap(&mut self.zoom.min, &mut self.zoom.max);
        }
        for (name, follow) in [
            ("position", &self.position.follow),
            ("rotation", &self.rotation.follow),
            ("zoom", &self.zoom.follow),
        ] {
            if follow.curve_start <= 0.0 {
                log::warn!(
                    "{name}.follow.curve_start is {}, \
                     curve will always run at full scale",
                    follow.curve_start
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputMode;
    use crate::rig::curve::FollowCurve;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[zoom]
min = 1.0
max = 80.0

[input]
mode = "touch"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.zoom.min, 1.0);
        assert_eq!(opts.zoom.max, 80.0);
        assert_eq!(opts.input.mode, InputMode::Touch);
        // Everything else should be default
        assert_eq!(opts.zoom.sensitivity, ZoomOptions::default().sensitivity);
        assert_eq!(opts.position, PositionOptions::default());
    }

    #[test]
    fn curves_parse_from_toml() {
        let toml_str = r#"
[rotation.follow]
speed = 90.0
curve_start = 30.0

[rotation.follow.curve]
kind = "keyframes"
points = [
    { t = 2.0, value = 1.5 },
    { t = 0.0, value = 0.1 },
]
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.rotation.follow.speed, 90.0);
        let FollowCurve::Keyframes { points } = &opts.rotation.follow.curve else {
            panic!("expected keyframes");
        };
        assert_eq!(points[0].t, 0.0);
        assert_eq!(points[1].t, 2.0);
    }

    #[test]
    fn validate_orders_zoom_limits() {
        let mut opts = Options::default();
        opts.zoom.min = 30.0;
        opts.zoom.max = 3.0;
        opts.validate();
        assert_eq!((opts.zoom.min, opts.zoom.max), (3.0, 30.0));
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[zoom\nmin = ").unwrap_err();
        assert!(matches!(err, FreeCamError::OptionsParse(_)));
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("freecam-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.input.sensitivity = 1.75;
        opts.save(&dir.join("close_up.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        assert_eq!(Options::list_presets(&dir), vec!["close_up".to_owned()]);
        let loaded = Options::load(&dir.join("close_up.toml")).unwrap();
        assert_eq!(loaded, opts);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("position"));
        assert!(props.contains_key("rotation"));
        assert!(props.contains_key("zoom"));
        assert!(props.contains_key("input"));
        assert!(props.contains_key("camera"));
        assert!(!props.contains_key("initial_pose"));

        let zoom = &props["zoom"]["properties"];
        assert!(zoom.get("min").is_some());
        assert!(zoom.get("follow").is_none());
    }
}
