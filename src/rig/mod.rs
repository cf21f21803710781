//! Camera rig state: target and actual pose plus the per-frame follow.
//!
//! Gesture processing and the smooth setters only touch the *target*
//! values; [`CameraRig::tween`] moves the *actual* values toward them with
//! curve-scaled, non-overshooting steps. Snap setters write both.
//!
//! Look angles are `(pitch, yaw)` in degrees. Positive pitch tilts the
//! view down, yaw turns clockwise seen from above, and the rig looks down
//! its local -Z axis with the camera `zoom` units behind the pivot.

pub mod curve;
pub mod tween;

use glam::{EulerRot, Quat, Vec2, Vec3};
use serde::Serialize;

use self::tween::{move_towards, move_towards_vec2, move_towards_vec3};
use crate::camera::RigCamera;
use crate::input::GestureSignals;
use crate::options::{PositionOptions, RotationOptions, ZoomOptions};
use crate::scene::{SceneQuery, CENTER_MAX_DISTANCE};

/// Pitch is held within `[-PITCH_LIMIT, PITCH_LIMIT]` degrees.
pub const PITCH_LIMIT: f32 = 90.0;

/// One complete pose: pivot position, look angles and zoom distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RigState {
    /// Pivot position in world space.
    pub position: Vec3,
    /// Pitch (x) and yaw (y) in degrees.
    pub look_euler: Vec2,
    /// Distance of the camera behind the pivot.
    pub zoom: f32,
}

impl RigState {
    /// Rig orientation for these look angles.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        euler_to_rotation(self.look_euler)
    }
}

/// Per-frame rig output handed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RigTransform {
    /// Pivot position in world space.
    pub position: Vec3,
    /// Rig orientation.
    pub rotation: Quat,
    /// Camera offset along the rig's forward axis (`-zoom`).
    pub camera_offset: f32,
}

impl RigTransform {
    /// World-space forward axis (-Z rotated).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// World-space up axis.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// World-space right axis.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Camera position relative to the pivot, in rig space.
    #[must_use]
    pub fn camera_local_offset(&self) -> Vec3 {
        Vec3::NEG_Z * self.camera_offset
    }

    /// Camera eye in world space.
    #[must_use]
    pub fn camera_position(&self) -> Vec3 {
        self.position + self.forward() * self.camera_offset
    }
}

fn euler_to_rotation(look_euler: Vec2) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        (-look_euler.y).to_radians(),
        (-look_euler.x).to_radians(),
        0.0,
    )
}

fn rotation_to_euler(rotation: Quat) -> Vec2 {
    let (yaw, pitch, _roll) = rotation.normalize().to_euler(EulerRot::YXZ);
    Vec2::new(-pitch.to_degrees(), -yaw.to_degrees())
}

fn clamp_pitch(mut look_euler: Vec2) -> Vec2 {
    look_euler.x = look_euler.x.max(-PITCH_LIMIT).min(PITCH_LIMIT);
    look_euler
}

/// Target/actual camera rig.
#[derive(Debug, Clone)]
pub struct CameraRig {
    position_options: PositionOptions,
    rotation_options: RotationOptions,
    zoom_options: ZoomOptions,
    target: RigState,
    actual: RigState,
}

impl CameraRig {
    /// Create a rig at the origin, level, at the closest allowed zoom.
    #[must_use]
    pub fn new(
        position: PositionOptions,
        rotation: RotationOptions,
        zoom: ZoomOptions,
    ) -> Self {
        let mut rig = Self {
            position_options: position,
            rotation_options: rotation,
            zoom_options: zoom,
            target: RigState {
                position: Vec3::ZERO,
                look_euler: Vec2::ZERO,
                zoom: 0.0,
            },
            actual: RigState {
                position: Vec3::ZERO,
                look_euler: Vec2::ZERO,
                zoom: 0.0,
            },
        };
        rig.order_zoom_limits();
        rig.clamp_zoom_targets();
        rig
    }

    /// Replace the tuning of all three axes. Zoom values are re-clamped to
    /// the new limits.
    pub fn configure(
        &mut self,
        position: PositionOptions,
        rotation: RotationOptions,
        zoom: ZoomOptions,
    ) {
        self.position_options = position;
        self.rotation_options = rotation;
        self.zoom_options = zoom;
        self.order_zoom_limits();
        self.clamp_zoom_targets();
    }

    /// Current target pose.
    #[must_use]
    pub fn target(&self) -> &RigState {
        &self.target
    }

    /// Current actual pose.
    #[must_use]
    pub fn actual(&self) -> &RigState {
        &self.actual
    }

    /// Position options in use.
    #[must_use]
    pub fn position_options(&self) -> &PositionOptions {
        &self.position_options
    }

    /// Rotation options in use.
    #[must_use]
    pub fn rotation_options(&self) -> &RotationOptions {
        &self.rotation_options
    }

    /// Zoom options in use.
    #[must_use]
    pub fn zoom_options(&self) -> &ZoomOptions {
        &self.zoom_options
    }

    /// Transform of the actual pose.
    #[must_use]
    pub fn transform(&self) -> RigTransform {
        RigTransform {
            position: self.actual.position,
            rotation: self.actual.rotation(),
            camera_offset: -self.actual.zoom,
        }
    }

    /// Pan multiplier: grows with zoom beyond `zoom_scale`, never below 1.
    #[must_use]
    pub fn zoom_scale_factor(&self) -> f32 {
        let zoom_scale = self.position_options.zoom_scale;
        if zoom_scale > 0.0 {
            (self.actual.zoom.abs() / zoom_scale).max(1.0)
        } else {
            1.0
        }
    }

    // -- Gesture processing --

    /// Apply one frame of gesture signals to the target pose.
    ///
    /// `pointer` is the screen point (bottom-left origin) used for a
    /// center request; `None` aims through the viewport center.
    pub fn update_targets(
        &mut self,
        signals: &GestureSignals,
        pointer: Option<Vec2>,
        dt: f32,
        scene: &dyn SceneQuery,
        camera: &RigCamera,
    ) {
        let delta = signals.primary_delta;

        if signals.should_rotate {
            let sens = self.rotation_options.sensitivity;
            self.target.look_euler.y -= delta.x * dt * sens.x;
            self.target.look_euler.x += delta.y * dt * sens.y;
            self.target.look_euler = clamp_pitch(self.target.look_euler);
        }

        if signals.should_drag {
            let transform = self.transform();
            let sens = self.position_options.sensitivity;
            let scale = self.zoom_scale_factor();
            self.target.position += transform.up() * (delta.y * dt * sens.y * scale)
                + transform.right() * (delta.x * dt * sens.x * scale);
        }

        if signals.zoom_delta != 0.0 {
            let follow = &self.zoom_options.follow;
            let curve = follow
                .curve
                .sample_ratio(self.target.zoom.abs(), follow.curve_start);
            self.target.zoom -=
                signals.zoom_delta * dt * self.zoom_options.sensitivity * curve;
            self.target.zoom = self.clamp_zoom(self.target.zoom);
        }

        if signals.should_center {
            self.center_on_pointer(pointer, scene, camera);
        }
    }

    fn center_on_pointer(
        &mut self,
        pointer: Option<Vec2>,
        scene: &dyn SceneQuery,
        camera: &RigCamera,
    ) {
        let transform = self.transform();
        let point = pointer.unwrap_or(camera.viewport * 0.5);
        let ray = camera.screen_point_to_ray(
            point,
            transform.camera_position(),
            transform.rotation,
        );
        match scene.cast(ray, CENTER_MAX_DISTANCE, self.position_options.center_mask) {
            Some(hit) => {
                log::debug!("center on target: {hit}");
                self.target.position = hit;
            }
            None => log::trace!("center on target: ray missed"),
        }
    }

    // -- Follow --

    /// Move every actual value toward its target for one frame.
    pub fn tween(&mut self, dt: f32) -> RigTransform {
        let rotation = &self.rotation_options.follow;
        let look_distance = self.actual.look_euler.distance(self.target.look_euler);
        self.actual.look_euler = clamp_pitch(move_towards_vec2(
            self.actual.look_euler,
            self.target.look_euler,
            rotation.max_step(look_distance, dt, 1.0),
        ));

        let position = &self.position_options.follow;
        let scale = self.zoom_scale_factor();
        let distance = self.actual.position.distance(self.target.position);
        self.actual.position = move_towards_vec3(
            self.actual.position,
            self.target.position,
            position.max_step(distance, dt, scale),
        );

        let zoom = &self.zoom_options.follow;
        let zoom_distance = (self.target.zoom - self.actual.zoom).abs();
        self.actual.zoom = self.clamp_zoom(move_towards(
            self.actual.zoom,
            self.target.zoom,
            zoom.max_step(zoom_distance, dt, 1.0),
        ));

        self.transform()
    }

    // -- Setters --

    /// Snap the pivot to `position`.
    pub fn set_position(&mut self, position: Vec3) {
        self.target.position = position;
        self.actual.position = position;
    }

    /// Move the pivot target; the actual position follows.
    pub fn set_smooth_position(&mut self, position: Vec3) {
        self.target.position = position;
    }

    /// Snap the orientation. Roll is discarded.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.set_rotation_euler(rotation_to_euler(rotation));
    }

    /// Turn the orientation target; the actual orientation follows.
    pub fn set_smooth_rotation(&mut self, rotation: Quat) {
        self.set_smooth_rotation_euler(rotation_to_euler(rotation));
    }

    /// Snap the look angles (pitch, yaw) in degrees.
    pub fn set_rotation_euler(&mut self, look_euler: Vec2) {
        let look_euler = clamp_pitch(look_euler);
        self.target.look_euler = look_euler;
        self.actual.look_euler = look_euler;
    }

    /// Set the look-angle target (pitch, yaw) in degrees.
    pub fn set_smooth_rotation_euler(&mut self, look_euler: Vec2) {
        self.target.look_euler = clamp_pitch(look_euler);
    }

    /// Snap the zoom distance (clamped to the limits).
    pub fn set_zoom(&mut self, zoom: f32) {
        let zoom = self.clamp_zoom(zoom);
        self.target.zoom = zoom;
        self.actual.zoom = zoom;
    }

    /// Set the zoom target (clamped to the limits).
    pub fn set_smooth_zoom(&mut self, zoom: f32) {
        self.target.zoom = self.clamp_zoom(zoom);
    }

    /// Change the zoom limits. Reversed limits are swapped.
    pub fn set_zoom_limits(&mut self, min: f32, max: f32) {
        self.zoom_options.min = min;
        self.zoom_options.max = max;
        self.order_zoom_limits();
        self.clamp_zoom_targets();
    }

    fn order_zoom_limits(&mut self) {
        if self.zoom_options.min > self.zoom_options.max {
            std::mem::swap(&mut self.zoom_options.min, &mut self.zoom_options.max);
        }
    }

    fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.max(self.zoom_options.min).min(self.zoom_options.max)
    }

    fn clamp_zoom_targets(&mut self) {
        self.target.zoom = self.clamp_zoom(self.target.zoom);
        self.actual.zoom = self.clamp_zoom(self.actual.zoom);
    }
}
