//! Projectiles
//!
//! A projectile moves in a straight line and sweeps its movement each tick
//! with a ray, so fast shots cannot tunnel through thin targets. It retires
//! on its first contact or when its lifetime runs out, whichever comes first.

use crate::damage::{DamageInfo, DamageOutcome, DamageSink};
use crate::weapon::FireIntent;
use glam::Vec3;
use onslaught_core::{Delay, ObjectId, Role};
use onslaught_physics::{RayQuery, RoleQuery, SpatialQuery};

/// A single in-flight projectile
#[derive(Debug, Clone)]
pub struct Projectile {
    id: u64,
    owner: ObjectId,
    owner_role: Role,
    position: Vec3,
    velocity: Vec3,
    damage: f32,
    lifetime: Delay,
    spent: bool,
}

impl Projectile {
    fn new(id: u64, intent: &FireIntent, speed: f32, lifetime: f32) -> Self {
        Self {
            id,
            owner: intent.shooter,
            owner_role: intent.shooter_role,
            position: intent.origin,
            velocity: intent.direction * speed.max(0.0),
            damage: intent.damage,
            lifetime: Delay::new(lifetime),
            spent: false,
        }
    }

    /// Handle contact with `object`
    ///
    /// Only the first contact counts; it yields damage when `object` has the
    /// role opposing the owner.
    pub fn contact(&mut self, object: ObjectId, roles: &dyn RoleQuery) -> Option<DamageInfo> {
        if self.spent {
            return None;
        }
        self.spent = true;

        if !roles.has_role(object, self.owner_role.opposing()) {
            return None;
        }
        Some(DamageInfo::new(self.damage).with_source(self.owner))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn owner(&self) -> ObjectId {
        self.owner
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// No longer in flight
    pub fn is_spent(&self) -> bool {
        self.spent
    }
}

/// A projectile touching something
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileImpact {
    pub projectile: u64,
    pub object: ObjectId,
    pub point: Vec3,
    /// Present when damage was applied
    pub outcome: Option<DamageOutcome>,
}

/// All projectiles in flight
#[derive(Debug, Default)]
pub struct ProjectileSystem {
    projectiles: Vec<Projectile>,
    next_id: u64,
}

impl ProjectileSystem {
    /// Create an empty system
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a projectile for a resolved shot
    pub fn launch(&mut self, intent: &FireIntent, speed: f32, lifetime: f32) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.projectiles.push(Projectile::new(id, intent, speed, lifetime));
        log::trace!("{} launched projectile {}", intent.shooter, id);
        id
    }

    /// Advance every projectile by `delta_time`
    pub fn tick(
        &mut self,
        delta_time: f32,
        query: &dyn SpatialQuery,
        roles: &dyn RoleQuery,
        targets: &mut dyn DamageSink,
    ) -> Vec<ProjectileImpact> {
        let mut impacts = Vec::new();

        for projectile in &mut self.projectiles {
            let step = projectile.velocity * delta_time.max(0.0);
            let distance = step.length();

            if distance > 0.0 {
                let ray = RayQuery::new(projectile.position, step)
                    .with_max_distance(distance)
                    .excluding(projectile.owner);

                if let Some(hit) = query.raycast(&ray) {
                    let outcome = projectile
                        .contact(hit.object, roles)
                        .map(|damage| targets.apply_damage(hit.object, &damage.with_hit_point(hit.point)));
                    projectile.position = hit.point;
                    impacts.push(ProjectileImpact {
                        projectile: projectile.id,
                        object: hit.object,
                        point: hit.point,
                        outcome,
                    });
                    continue;
                }
                projectile.position += step;
            }

            if projectile.lifetime.tick(delta_time) {
                projectile.spent = true;
            }
        }

        self.projectiles.retain(|p| !p.spent);
        impacts
    }

    /// Drop every projectile
    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }
}
