//! Host-facing controller: owns the device tracker, the input resolver, the
//! rig, the child camera and the options, and runs the frame phases.
//!
//! ```ignore
//! controller.handle_event(event);            // as events arrive
//! controller.update(dt, &scene);             // input phase
//! let transform = controller.late_update(dt); // follow phase
//! ```

use std::path::Path;

use glam::Mat4;

use crate::camera::RigCamera;
use crate::input::{
    DeviceSnapshot, DeviceTracker, GestureSignals, InputEvent, InputMode,
    InputModeResolver, Platform,
};
use crate::options::Options;
use crate::rig::{CameraRig, RigTransform};
use crate::scene::SceneQuery;

/// Free-roaming camera controller.
pub struct FreeCamController {
    options: Options,
    tracker: DeviceTracker,
    input: InputModeResolver,
    rig: CameraRig,
    camera: RigCamera,
    active_preset: Option<String>,
}

impl FreeCamController {
    /// Build a controller for a `width`×`height` viewport and snap the rig
    /// to the configured initial pose. Options are repaired with
    /// [`Options::validate`] first.
    #[must_use]
    pub fn new(
        mut options: Options,
        platform: Platform,
        width: u32,
        height: u32,
    ) -> Self {
        options.validate();
        let input = InputModeResolver::new(
            options.input.mode,
            platform,
            options.input.sensitivity,
            options.input.mouse,
        );
        let rig = CameraRig::new(
            options.position.clone(),
            options.rotation.clone(),
            options.zoom.clone(),
        );
        let camera = RigCamera::new(&options.camera, width, height);
        let mut controller = Self {
            options,
            tracker: DeviceTracker::new(height),
            input,
            rig,
            camera,
            active_preset: None,
        };
        controller.apply_initial_pose();
        controller
    }

    fn apply_initial_pose(&mut self) {
        let pose = &self.options.initial_pose;
        self.rig.set_position(pose.position);
        self.rig.set_rotation_euler(pose.rotation_euler);
        self.rig.set_zoom(pose.zoom);
    }

    // ── Frame phases ──

    /// Feed one input event. Returns `true` if it was consumed.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        if let InputEvent::Resized { width, height } = event {
            self.camera.resize(width, height);
        }
        self.tracker.handle_event(event)
    }

    /// Input phase: snapshot the devices, poll the active gesture source
    /// and fold its signals into the rig targets.
    pub fn update(&mut self, dt: f32, scene: &dyn SceneQuery) -> GestureSignals {
        let snapshot = self.tracker.next_frame();
        self.update_with_snapshot(&snapshot, dt, scene)
    }

    /// Input phase from an externally built snapshot.
    pub fn update_with_snapshot(
        &mut self,
        snapshot: &DeviceSnapshot,
        dt: f32,
        scene: &dyn SceneQuery,
    ) -> GestureSignals {
        self.input.poll(snapshot, dt);
        let source = self.input.source();
        let signals = source.signals();
        let pointer = source.pointer_position();
        self.rig
            .update_targets(&signals, pointer, dt, scene, &self.camera);
        signals
    }

    /// Follow phase: move the actual pose toward the targets.
    pub fn late_update(&mut self, dt: f32) -> RigTransform {
        self.rig.tween(dt)
    }

    /// Both phases back to back.
    pub fn frame(&mut self, dt: f32, scene: &dyn SceneQuery) -> RigTransform {
        let _ = self.update(dt, scene);
        self.late_update(dt)
    }

    // ── Input ──

    /// Change the overall input sensitivity.
    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.options.input.sensitivity = sensitivity;
        self.input.set_sensitivity(sensitivity);
    }

    /// Change the configured input mode. Returns `true` if the gesture
    /// source was rebuilt.
    pub fn set_input_mode(&mut self, mode: InputMode) -> bool {
        self.options.input.mode = mode;
        self.input.reconfigure(mode)
    }

    /// Input mode currently running.
    #[must_use]
    pub fn active_input_mode(&self) -> InputMode {
        self.input.active_mode()
    }

    /// The input resolver.
    #[must_use]
    pub fn input(&self) -> &InputModeResolver {
        &self.input
    }

    // ── Options ──

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace options and push them to every subsystem.
    pub fn set_options(&mut self, new: Options) {
        self.options = new;
        self.apply_options();
    }

    /// Push current option values to the rig, the camera and the input
    /// resolver. The rig pose is kept.
    pub fn apply_options(&mut self) {
        self.options.validate();
        self.apply_rig();
        self.apply_camera();
        self.apply_input();
    }

    fn apply_rig(&mut self) {
        self.rig.configure(
            self.options.position.clone(),
            self.options.rotation.clone(),
            self.options.zoom.clone(),
        );
    }

    fn apply_camera(&mut self) {
        let co = &self.options.camera;
        self.camera.fovy = co.fovy;
        self.camera.znear = co.znear;
        self.camera.zfar = co.zfar;
    }

    fn apply_input(&mut self) {
        let io = &self.options.input;
        self.input.set_mouse_bindings(io.mouse);
        self.input.set_sensitivity(io.sensitivity);
        let _ = self.input.reconfigure(io.mode);
    }

    /// Load a named preset from `presets_dir` and apply it.
    /// Returns true on success.
    pub fn load_preset(&mut self, name: &str, presets_dir: &Path) -> bool {
        let path = presets_dir.join(format!("{name}.toml"));
        match Options::load(&path) {
            Ok(opts) => {
                log::info!("Loaded rig preset '{name}'");
                self.set_options(opts);
                self.active_preset = Some(name.to_owned());
                true
            }
            Err(e) => {
                log::error!("Failed to load rig preset '{name}': {e}");
                false
            }
        }
    }

    /// Save the current options as a named preset.
    /// Returns true on success.
    pub fn save_preset(&mut self, name: &str, presets_dir: &Path) -> bool {
        let path = presets_dir.join(format!("{name}.toml"));
        match self.options.save(&path) {
            Ok(()) => {
                log::info!("Saved rig preset '{name}'");
                self.active_preset = Some(name.to_owned());
                true
            }
            Err(e) => {
                log::error!("Failed to save rig preset '{name}': {e}");
                false
            }
        }
    }

    /// Name of the last loaded or saved preset.
    #[must_use]
    pub fn active_preset(&self) -> Option<&str> {
        self.active_preset.as_deref()
    }

    // ── Rig and camera access ──

    /// The rig.
    #[must_use]
    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// The rig, for the snap and smooth setters.
    pub fn rig_mut(&mut self) -> &mut CameraRig {
        &mut self.rig
    }

    /// The child camera.
    #[must_use]
    pub fn camera(&self) -> &RigCamera {
        &self.camera
    }

    /// Combined view-projection matrix for the current actual pose.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.camera.build_matrix(&self.rig.transform())
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use super::*;
    use crate::input::MouseButton;
    use crate::rig::curve::{CurveKey, FollowCurve};
    use crate::scene::EmptyScene;

    fn controller(mode: InputMode) -> FreeCamController {
        let mut options = Options::default();
        options.input.mode = mode;
        FreeCamController::new(options, Platform::Desktop, 800, 600)
    }

    #[test]
    fn initial_pose_is_applied_without_motion() {
        let c = controller(InputMode::Automatic);
        let pose = Options::default().initial_pose;
        assert_eq!(c.rig().actual().position, pose.position);
        assert_eq!(c.rig().actual().look_euler, pose.rotation_euler);
        assert_eq!(c.rig().actual().zoom, pose.zoom);
        assert_eq!(c.rig().target(), c.rig().actual());
        assert_eq!(c.active_input_mode(), InputMode::Mouse);
    }

    #[test]
    fn unsorted_curve_keys_follow_the_same_at_construction_and_later() {
        let mut options = Options::default();
        options.input.mode = InputMode::Mouse;
        options.position.follow.curve = FollowCurve::Keyframes {
            points: vec![CurveKey::new(1.0, 1.0), CurveKey::new(0.0, 0.25)],
        };

        let mut built = FreeCamController::new(
            options.clone(),
            Platform::Desktop,
            800,
            600,
        );
        let mut reapplied = controller(InputMode::Mouse);
        reapplied.set_options(options);

        for c in [&mut built, &mut reapplied] {
            c.rig_mut().set_position(Vec3::ZERO);
            c.rig_mut().set_smooth_position(Vec3::X);
        }
        let from_new = built.late_update(0.01).position.x;
        let from_set = reapplied.late_update(0.01).position.x;
        assert_eq!(from_new, from_set);

        let FollowCurve::Keyframes { points } =
            &built.options().position.follow.curve
        else {
            panic!("expected keyframes");
        };
        assert_eq!(points[0].t, 0.0);
    }

    #[test]
    fn scroll_zooms_in() {
        let mut c = controller(InputMode::Mouse);
        let before = c.rig().target().zoom;
        let _ = c.handle_event(InputEvent::Scroll { delta: 1.0 });
        let signals = c.update(1.0 / 60.0, &EmptyScene);
        assert_eq!(signals.zoom_delta, 1.0);
        assert!(c.rig().target().zoom < before);
    }

    #[test]
    fn right_drag_rotates() {
        let mut c = controller(InputMode::Mouse);
        let _ = c.handle_event(InputEvent::CursorMoved { x: 400.0, y: 300.0 });
        let _ = c.update(0.016, &EmptyScene);
        let _ = c.handle_event(InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: true,
        });
        let _ = c.update(0.016, &EmptyScene);
        let _ = c.handle_event(InputEvent::CursorMoved { x: 350.0, y: 300.0 });
        let signals = c.update(0.016, &EmptyScene);
        assert!(signals.should_rotate);
        assert_eq!(signals.primary_delta, Vec2::new(50.0, 0.0));
        assert!(c.rig().target().look_euler.y < 0.0);
    }

    #[test]
    fn disabled_mode_ignores_input() {
        let mut c = controller(InputMode::Disabled);
        let _ = c.handle_event(InputEvent::Scroll { delta: 3.0 });
        let before = *c.rig().target();
        let signals = c.update(0.1, &EmptyScene);
        assert_eq!(signals, GestureSignals::default());
        assert_eq!(c.rig().target(), &before);
    }

    #[test]
    fn set_input_mode_rebuilds_source() {
        let mut c = controller(InputMode::Mouse);
        assert!(c.set_input_mode(InputMode::Touch));
        assert_eq!(c.active_input_mode(), InputMode::Touch);
        assert!(!c.set_input_mode(InputMode::Touch));
        assert_eq!(c.options().input.mode, InputMode::Touch);
    }

    #[test]
    fn set_sensitivity_reaches_the_source() {
        let mut c = controller(InputMode::Mouse);
        c.set_sensitivity(2.5);
        assert_eq!(c.input().source().sensitivity(), 2.5);
        assert_eq!(c.options().input.sensitivity, 2.5);
    }

    #[test]
    fn apply_options_keeps_pose_and_reclamps_zoom() {
        let mut c = controller(InputMode::Mouse);
        c.rig_mut().set_position(Vec3::new(1.0, 2.0, 3.0));
        let mut opts = c.options().clone();
        opts.zoom.max = 5.0;
        opts.camera.fovy = 75.0;
        c.set_options(opts);
        assert_eq!(c.rig().actual().position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(c.rig().actual().zoom, 5.0);
        assert_eq!(c.camera().fovy, 75.0);
    }

    #[test]
    fn resize_updates_camera_and_tracker() {
        let mut c = controller(InputMode::Mouse);
        assert!(c.handle_event(InputEvent::Resized {
            width: 1024,
            height: 512,
        }));
        assert_eq!(c.camera().viewport, Vec2::new(1024.0, 512.0));
    }

    #[test]
    fn frame_tweens_toward_smooth_target() {
        let mut c = controller(InputMode::Mouse);
        c.rig_mut().set_smooth_position(Vec3::new(10.0, 0.0, 0.0));
        let transform = c.frame(0.1, &EmptyScene);
        assert!(transform.position.x > 0.0);
        assert!(transform.position.x <= 10.0);
        assert!(c.view_projection().is_finite());
    }

    #[test]
    fn missing_preset_reports_failure() {
        let mut c = controller(InputMode::Mouse);
        let dir = std::env::temp_dir().join("freecam-no-such-preset-dir");
        assert!(!c.load_preset("nope", &dir));
        assert_eq!(c.active_preset(), None);
    }
}
