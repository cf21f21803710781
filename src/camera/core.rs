use glam::{Mat4, Quat, Vec2, Vec3};

use crate::options::CameraOptions;
use crate::rig::RigTransform;
use crate::scene::Ray;

/// Perspective child camera attached to the rig pivot.
///
/// The camera sits on the rig's local Z axis (behind the pivot by the zoom
/// distance) and looks along the rig's forward axis (-Z).
#[derive(Debug, Clone, PartialEq)]
pub struct RigCamera {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Viewport size in pixels (width, height).
    pub viewport: Vec2,
}

impl RigCamera {
    /// Create a camera from projection options and a viewport size.
    #[must_use]
    pub fn new(options: &CameraOptions, width: u32, height: u32) -> Self {
        Self {
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
            viewport: Vec2::new(width as f32, height as f32),
        }
    }

    /// Viewport aspect ratio (width / height), 1 for a degenerate viewport.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.viewport.y > 0.0 {
            self.viewport.x / self.viewport.y
        } else {
            1.0
        }
    }

    /// Update the viewport after a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width as f32, height as f32);
    }

    /// Get just the projection matrix.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        // perspective_rh uses the [0,1] depth range
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect(),
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix for a rig pose.
    #[must_use]
    pub fn build_matrix(&self, transform: &RigTransform) -> Mat4 {
        let view = Mat4::from_rotation_translation(
            transform.rotation,
            transform.camera_position(),
        )
        .inverse();
        self.build_projection() * view
    }

    /// Ray from the camera eye through a screen point.
    ///
    /// `point` is in pixels with the origin at the bottom-left corner and y
    /// pointing up. A degenerate viewport yields a ray straight down the
    /// view axis.
    #[must_use]
    pub fn screen_point_to_ray(&self, point: Vec2, eye: Vec3, rotation: Quat) -> Ray {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return Ray::new(eye, rotation * Vec3::NEG_Z);
        }
        let ndc = point / self.viewport * 2.0 - Vec2::ONE;
        let half_height = (self.fovy.to_radians() * 0.5).tan();
        let local = Vec3::new(
            ndc.x * half_height * self.aspect(),
            ndc.y * half_height,
            -1.0,
        );
        Ray::new(eye, rotation * local)
    }
}
