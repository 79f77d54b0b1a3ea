//! Rapier-backed collision world

use crate::error::{PhysicsError, Result};
use crate::layers::CollisionLayer;
use crate::query::{RayQuery, RaycastHit, RoleQuery, SpatialQuery};
use glam::Vec3;
use onslaught_core::{ObjectId, Role};
use rapier3d::prelude as rapier;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Collision shape types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Sphere with radius
    Sphere { radius: f32 },
    /// Box with half-extents
    Box { half_extents: [f32; 3] },
    /// Capsule along the Y axis
    Capsule { half_height: f32, radius: f32 },
}

impl ColliderShape {
    /// Standing humanoid capsule (about 2 units tall)
    pub fn humanoid() -> Self {
        Self::Capsule {
            half_height: 0.5,
            radius: 0.5,
        }
    }

    fn validate(&self) -> Result<()> {
        let ok = match self {
            Self::Sphere { radius } => *radius > 0.0,
            Self::Box { half_extents } => half_extents.iter().all(|e| *e > 0.0),
            Self::Capsule {
                half_height,
                radius,
            } => *half_height >= 0.0 && *radius > 0.0,
        };
        if ok {
            Ok(())
        } else {
            Err(PhysicsError::InvalidShape(format!("{:?}", self)))
        }
    }

    fn to_rapier_builder(&self) -> rapier::ColliderBuilder {
        match *self {
            Self::Sphere { radius } => rapier::ColliderBuilder::ball(radius),
            Self::Box { half_extents } => {
                rapier::ColliderBuilder::cuboid(half_extents[0], half_extents[1], half_extents[2])
            }
            Self::Capsule {
                half_height,
                radius,
            } => rapier::ColliderBuilder::capsule_y(half_height, radius),
        }
    }
}

/// Static and kinematic collision geometry answering spatial queries
///
/// Actors (player, hostiles) carry a role; obstacles do not. Positions are
/// synced from locomotion by the owner; the world never integrates motion.
pub struct CollisionWorld {
    bodies: rapier::RigidBodySet,
    colliders: rapier::ColliderSet,
    islands: rapier::IslandManager,
    query_pipeline: rapier::QueryPipeline,
    objects: HashMap<ObjectId, rapier::ColliderHandle>,
    roles: HashMap<ObjectId, Role>,
}

impl CollisionWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self {
            bodies: rapier::RigidBodySet::new(),
            colliders: rapier::ColliderSet::new(),
            islands: rapier::IslandManager::new(),
            query_pipeline: rapier::QueryPipeline::new(),
            objects: HashMap::new(),
            roles: HashMap::new(),
        }
    }

    /// Add static geometry on the environment layer
    pub fn add_obstacle(&mut self, id: ObjectId, shape: ColliderShape, position: Vec3) -> Result<()> {
        self.insert(id, shape, position, CollisionLayer::ENVIRONMENT)
    }

    /// Add an actor with a role
    pub fn add_actor(&mut self, id: ObjectId, role: Role, shape: ColliderShape, position: Vec3) -> Result<()> {
        self.insert(id, shape, position, CollisionLayer::for_role(role))?;
        self.roles.insert(id, role);
        Ok(())
    }

    fn insert(&mut self, id: ObjectId, shape: ColliderShape, position: Vec3, layer: CollisionLayer) -> Result<()> {
        if self.objects.contains_key(&id) {
            return Err(PhysicsError::DuplicateObject(id));
        }
        shape.validate()?;

        let collider = shape
            .to_rapier_builder()
            .translation(rapier::Vector::new(position.x, position.y, position.z))
            .collision_groups(rapier::InteractionGroups::new(
                rapier::Group::from_bits_truncate(layer.as_mask()),
                rapier::Group::from_bits_truncate(u32::MAX),
            ))
            .user_data(id.to_user_data())
            .build();

        let handle = self.colliders.insert(collider);
        self.objects.insert(id, handle);
        self.sync();
        log::debug!("Collider added for {} on layer {}", id, layer.0);
        Ok(())
    }

    /// Move an object's collider
    pub fn set_position(&mut self, id: ObjectId, position: Vec3) -> Result<()> {
        let handle = *self.objects.get(&id).ok_or(PhysicsError::ObjectNotFound(id))?;
        let collider = self
            .colliders
            .get_mut(handle)
            .ok_or(PhysicsError::ObjectNotFound(id))?;
        collider.set_translation(rapier::Vector::new(position.x, position.y, position.z));
        self.sync();
        Ok(())
    }

    /// Current collider position
    pub fn position(&self, id: ObjectId) -> Result<Vec3> {
        let handle = self.objects.get(&id).ok_or(PhysicsError::ObjectNotFound(id))?;
        let collider = self
            .colliders
            .get(*handle)
            .ok_or(PhysicsError::ObjectNotFound(id))?;
        let t = collider.translation();
        Ok(Vec3::new(t.x, t.y, t.z))
    }

    /// Remove an object and its role
    pub fn remove(&mut self, id: ObjectId) -> Result<()> {
        let handle = self.objects.remove(&id).ok_or(PhysicsError::ObjectNotFound(id))?;
        self.roles.remove(&id);
        self.colliders
            .remove(handle, &mut self.islands, &mut self.bodies, true);
        self.sync();
        Ok(())
    }

    /// Check if an object is registered
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Rebuild the query acceleration structure
    pub fn sync(&mut self) {
        self.query_pipeline.update(&self.colliders);
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialQuery for CollisionWorld {
    fn raycast(&self, query: &RayQuery) -> Option<RaycastHit> {
        let direction = query.direction.normalize_or_zero();
        if direction == Vec3::ZERO || query.max_distance <= 0.0 {
            return None;
        }

        let ray = rapier::Ray::new(
            rapier::Point::new(query.origin.x, query.origin.y, query.origin.z),
            rapier::Vector::new(direction.x, direction.y, direction.z),
        );

        let mut filter = rapier::QueryFilter::new()
            .groups(rapier::InteractionGroups::new(
                rapier::Group::from_bits_truncate(u32::MAX),
                rapier::Group::from_bits_truncate(query.mask.bits()),
            ))
            .exclude_sensors();

        if let Some(handle) = query.exclude.and_then(|id| self.objects.get(&id)) {
            filter = filter.exclude_collider(*handle);
        }

        let (handle, toi) = self.query_pipeline.cast_ray(
            &self.bodies,
            &self.colliders,
            &ray,
            query.max_distance,
            true,
            filter,
        )?;

        let collider = self.colliders.get(handle)?;
        let point = ray.point_at(toi);

        Some(RaycastHit {
            object: ObjectId::from_user_data(collider.user_data),
            point: Vec3::new(point.x, point.y, point.z),
            distance: toi,
        })
    }
}

impl RoleQuery for CollisionWorld {
    fn role_of(&self, object: ObjectId) -> Option<Role> {
        self.roles.get(&object).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::LayerMask;
    use approx::assert_relative_eq;

    fn id(raw: u64) -> ObjectId {
        ObjectId::from_raw(raw)
    }

    fn player_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world
            .add_actor(id(1), Role::Player, ColliderShape::humanoid(), Vec3::new(0.0, 1.0, -10.0))
            .unwrap();
        world
    }

    #[test]
    fn test_raycast_hits_first_object() {
        let world = player_world();
        let hit = world
            .raycast(&RayQuery::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z).with_max_distance(20.0))
            .unwrap();

        assert_eq!(hit.object, id(1));
        assert_relative_eq!(hit.distance, 9.5, epsilon = 1e-3);
        assert!(world.has_role(hit.object, Role::Player));
    }

    #[test]
    fn test_raycast_respects_max_distance() {
        let world = player_world();
        let hit = world.raycast(&RayQuery::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z).with_max_distance(5.0));
        assert!(hit.is_none());
    }

    #[test]
    fn test_obstacle_blocks_ray() {
        let mut world = player_world();
        world
            .add_obstacle(
                id(2),
                ColliderShape::Box {
                    half_extents: [2.0, 2.0, 0.25],
                },
                Vec3::new(0.0, 1.0, -5.0),
            )
            .unwrap();

        let hit = world
            .raycast(&RayQuery::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z).with_max_distance(20.0))
            .unwrap();
        assert_eq!(hit.object, id(2));
        assert_eq!(world.role_of(hit.object), None);
    }

    #[test]
    fn test_mask_skips_layers() {
        let mut world = player_world();
        world
            .add_obstacle(
                id(2),
                ColliderShape::Box {
                    half_extents: [2.0, 2.0, 0.25],
                },
                Vec3::new(0.0, 1.0, -5.0),
            )
            .unwrap();

        let mask = LayerMask::ALL.without(CollisionLayer::ENVIRONMENT);
        let hit = world
            .raycast(
                &RayQuery::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z)
                    .with_max_distance(20.0)
                    .with_mask(mask),
            )
            .unwrap();
        assert_eq!(hit.object, id(1));
    }

    #[test]
    fn test_exclude_caster() {
        let mut world = player_world();
        world
            .add_actor(id(3), Role::Hostile, ColliderShape::humanoid(), Vec3::new(0.0, 1.0, 0.0))
            .unwrap();

        let origin = Vec3::new(0.0, 1.0, 0.0);
        let blocked = world.raycast(&RayQuery::new(origin, Vec3::NEG_Z).with_max_distance(20.0));
        assert_eq!(blocked.map(|h| h.object), Some(id(3)));

        let hit = world
            .raycast(
                &RayQuery::new(origin, Vec3::NEG_Z)
                    .with_max_distance(20.0)
                    .excluding(id(3)),
            )
            .unwrap();
        assert_eq!(hit.object, id(1));
    }

    #[test]
    fn test_move_and_remove() {
        let mut world = player_world();
        world.set_position(id(1), Vec3::new(0.0, 1.0, 10.0)).unwrap();
        assert_relative_eq!(world.position(id(1)).unwrap().z, 10.0);

        let hit = world.raycast(&RayQuery::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z).with_max_distance(20.0));
        assert!(hit.is_none());

        world.remove(id(1)).unwrap();
        assert!(!world.contains(id(1)));
        assert_eq!(world.role_of(id(1)), None);
        assert!(matches!(world.remove(id(1)), Err(PhysicsError::ObjectNotFound(_))));
    }

    #[test]
    fn test_duplicate_and_invalid_shapes() {
        let mut world = player_world();
        assert!(matches!(
            world.add_actor(id(1), Role::Player, ColliderShape::humanoid(), Vec3::ZERO),
            Err(PhysicsError::DuplicateObject(_))
        ));
        assert!(matches!(
            world.add_obstacle(id(9), ColliderShape::Sphere { radius: 0.0 }, Vec3::ZERO),
            Err(PhysicsError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_zero_direction_misses() {
        let world = player_world();
        assert!(world.raycast(&RayQuery::new(Vec3::ZERO, Vec3::ZERO)).is_none());
    }
}
