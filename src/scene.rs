//! Ray-cast collaborator used to resolve "center on target" requests.
//!
//! The rig never owns scene geometry. Hosts implement [`SceneQuery`] over
//! whatever physics or picking structure they have; [`StaticScene`] is a
//! small sphere-based implementation for tooling and tests.

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Maximum ray length for center-on-target queries.
pub const CENTER_MAX_DISTANCE: f32 = 1000.0;

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or(Vec3::NEG_Z),
        }
    }

    /// Point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Bit set of layers a query is allowed to hit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Matches every layer.
    pub const ALL: Self = Self(u32::MAX);
    /// Matches nothing.
    pub const NONE: Self = Self(0);

    /// Mask containing only `layer` (0..32). Out-of-range layers yield
    /// [`LayerMask::NONE`].
    #[must_use]
    pub fn layer(layer: u32) -> Self {
        1u32.checked_shl(layer).map_or(Self::NONE, Self)
    }

    /// Whether `layer` is part of this mask.
    #[must_use]
    pub fn contains(self, layer: u32) -> bool {
        self.0 & Self::layer(layer).0 != 0
    }

    /// Union of two masks.
    #[must_use]
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Scene ray-cast capability.
pub trait SceneQuery {
    /// Cast `ray` up to `max_distance`, considering only objects on
    /// `layers`. Returns the world position of the hit object (its pivot,
    /// not the surface point).
    fn cast(&self, ray: Ray, max_distance: f32, layers: LayerMask)
        -> Option<Vec3>;
}

/// A scene with nothing in it. Every cast misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyScene;

impl SceneQuery for EmptyScene {
    fn cast(&self, _ray: Ray, _max_distance: f32, _layers: LayerMask) -> Option<Vec3> {
        None
    }
}

impl<F> SceneQuery for F
where
    F: Fn(Ray, f32, LayerMask) -> Option<Vec3>,
{
    fn cast(&self, ray: Ray, max_distance: f32, layers: LayerMask) -> Option<Vec3> {
        self(ray, max_distance, layers)
    }
}

/// A sphere collider standing in for a scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Object pivot; returned on a hit.
    pub position: Vec3,
    /// Collider radius.
    pub radius: f32,
    /// Layer index (0..32).
    #[serde(default)]
    pub layer: u32,
}

/// A list of sphere colliders, hit-tested by brute force.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticScene {
    /// Objects in the scene.
    pub objects: Vec<SceneObject>,
}

impl StaticScene {
    /// Create a scene from a list of objects.
    #[must_use]
    pub fn new(objects: Vec<SceneObject>) -> Self {
        Self { objects }
    }
}

impl SceneQuery for StaticScene {
    fn cast(&self, ray: Ray, max_distance: f32, layers: LayerMask) -> Option<Vec3> {
        self.objects
            .iter()
            .filter(|object| layers.contains(object.layer))
            .filter_map(|object| {
                ray_sphere(ray, object.position, object.radius)
                    .filter(|t| *t <= max_distance)
                    .map(|t| (t, object.position))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, position)| position)
    }
}

/// Distance along `ray` to the first intersection with a sphere, if any.
fn ray_sphere(ray: Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let near = -b - sqrt_d;
    let far = -b + sqrt_d;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        // Origin inside the sphere.
        Some(0.0)
    } else {
        None
    }
}
