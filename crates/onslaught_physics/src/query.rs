//! Spatial queries (raycasting, role lookup, angle helpers)

use crate::layers::LayerMask;
use glam::Vec3;
use onslaught_core::{ObjectId, Role};

/// Result of a raycast query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// The object that was hit
    pub object: ObjectId,
    /// Hit point in world space
    pub point: Vec3,
    /// Distance from ray origin
    pub distance: f32,
}

/// A first-hit ray query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayQuery {
    /// Ray origin in world space
    pub origin: Vec3,
    /// Ray direction (normalized on use)
    pub direction: Vec3,
    /// Maximum distance for the ray
    pub max_distance: f32,
    /// Layers the ray may hit
    pub mask: LayerMask,
    /// Object to ignore (usually the caster)
    pub exclude: Option<ObjectId>,
}

impl RayQuery {
    /// Ray with unlimited distance against every layer
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            max_distance: f32::MAX,
            mask: LayerMask::ALL,
            exclude: None,
        }
    }

    /// Set maximum distance
    pub fn with_max_distance(mut self, distance: f32) -> Self {
        self.max_distance = distance;
        self
    }

    /// Set layer mask
    pub fn with_mask(mut self, mask: LayerMask) -> Self {
        self.mask = mask;
        self
    }

    /// Ignore the given object
    pub fn excluding(mut self, object: ObjectId) -> Self {
        self.exclude = Some(object);
        self
    }
}

/// Raycasts against world geometry
pub trait SpatialQuery {
    /// Cast a ray and return the first hit, if any
    fn raycast(&self, query: &RayQuery) -> Option<RaycastHit>;
}

/// Object role lookup used for hit filtering
pub trait RoleQuery {
    /// Role of an object, if it has one
    fn role_of(&self, object: ObjectId) -> Option<Role>;

    /// Check an object against a role
    fn has_role(&self, object: ObjectId, role: Role) -> bool {
        self.role_of(object) == Some(role)
    }
}

/// Angle between two vectors in degrees. Zero-length input yields 0.
pub fn angle_between(a: Vec3, b: Vec3) -> f32 {
    let mag = a.length() * b.length();
    if mag <= f32::EPSILON {
        return 0.0;
    }
    let cos_angle = (a.dot(b) / mag).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_between() {
        assert_relative_eq!(angle_between(Vec3::X, Vec3::X), 0.0);
        assert_relative_eq!(angle_between(Vec3::X, Vec3::Z), 90.0, epsilon = 1e-4);
        assert_relative_eq!(angle_between(Vec3::X, Vec3::NEG_X), 180.0, epsilon = 1e-4);
    }

    #[test]
    fn test_angle_ignores_magnitude() {
        assert_relative_eq!(
            angle_between(Vec3::new(5.0, 0.0, 5.0), Vec3::X),
            45.0,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_angle_zero_vector() {
        assert_eq!(angle_between(Vec3::ZERO, Vec3::X), 0.0);
    }

    #[test]
    fn test_ray_query_builder() {
        let id = ObjectId::from_raw(4);
        let q = RayQuery::new(Vec3::ZERO, Vec3::Z)
            .with_max_distance(12.0)
            .with_mask(LayerMask::NONE)
            .excluding(id);
        assert_eq!(q.max_distance, 12.0);
        assert_eq!(q.mask, LayerMask::NONE);
        assert_eq!(q.exclude, Some(id));
    }
}
