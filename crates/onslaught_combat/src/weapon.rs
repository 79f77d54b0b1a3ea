//! Weapon system and fire resolution

use crate::damage::{DamageInfo, DamageOutcome, DamageSink};
use crate::player::AmmoSupply;
use crate::projectile::ProjectileSystem;
use glam::Vec3;
use onslaught_core::{CombatError, Cooldown, ObjectId, Result, Role};
use onslaught_physics::{RayQuery, RoleQuery, SpatialQuery};
use serde::{Deserialize, Serialize};

/// How a shot reaches its target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HitMode {
    /// Instant hit along a ray
    Ray { range: f32 },
    /// Spawns a moving projectile
    Projectile { speed: f32, lifetime: f32 },
}

impl Default for HitMode {
    fn default() -> Self {
        Self::Ray { range: 10.0 }
    }
}

/// Weapon statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Damage per hit
    pub damage: f32,
    /// Shots per second
    pub fire_rate: f32,
    /// Ray or projectile
    pub mode: HitMode,
    /// Shots draw from an ammo supply
    pub ammo_gated: bool,
    /// Visual effect spawned on fire. A weapon without one cannot fire.
    pub effect: Option<String>,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            damage: 10.0,
            fire_rate: 1.0,
            mode: HitMode::default(),
            ammo_gated: false,
            effect: Some("bullet".to_string()),
        }
    }
}

impl WeaponConfig {
    /// Instant-hit weapon
    pub fn hitscan(damage: f32, range: f32) -> Self {
        Self {
            damage,
            mode: HitMode::Ray { range },
            ..Default::default()
        }
    }

    /// Projectile weapon
    pub fn projectile(damage: f32, speed: f32, lifetime: f32) -> Self {
        Self {
            damage,
            mode: HitMode::Projectile { speed, lifetime },
            ..Default::default()
        }
    }

    /// Set shots per second
    pub fn with_fire_rate(mut self, fire_rate: f32) -> Self {
        self.fire_rate = fire_rate;
        self
    }

    /// Set ammo gating
    pub fn with_ammo_gated(mut self, gated: bool) -> Self {
        self.ammo_gated = gated;
        self
    }

    /// Set the fire effect
    pub fn with_effect(mut self, effect: Option<String>) -> Self {
        self.effect = effect;
        self
    }
}

/// A shot that passed every gate and awaits resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireIntent {
    pub shooter: ObjectId,
    pub shooter_role: Role,
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
    pub damage: f32,
    pub mode: HitMode,
}

/// Result of resolving a shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireOutcome {
    /// Ray reached an opposing target
    Hit { target: ObjectId, outcome: DamageOutcome },
    /// Ray stopped on something that is not an opposing target
    Blocked { object: ObjectId },
    /// Ray hit nothing within range
    Missed,
    /// Projectile spawned
    Launched { projectile: u64 },
}

/// A fire-rate gated weapon owned by one shooter
#[derive(Debug, Clone)]
pub struct Weapon {
    owner: ObjectId,
    role: Role,
    config: WeaponConfig,
    cooldown: Cooldown,
}

impl Weapon {
    /// Create a weapon for `owner`
    pub fn new(owner: ObjectId, role: Role, config: WeaponConfig) -> Self {
        let cooldown = Cooldown::from_rate(config.fire_rate);
        Self {
            owner,
            role,
            config,
            cooldown,
        }
    }

    /// Replace the weapon stats
    ///
    /// The cooldown takes the new fire rate but remembers the last shot.
    pub fn set_config(&mut self, config: WeaponConfig) {
        self.cooldown.set_rate(config.fire_rate);
        self.config = config;
    }

    /// Set damage per hit
    pub fn set_damage(&mut self, damage: f32) {
        self.config.damage = damage.max(0.0);
    }

    /// Attempt to fire at `now`
    ///
    /// Returns `Ok(None)` while cooling down or when the supply is empty.
    /// Ammo is only drawn when `ammo_gated` is set and a supply is given.
    pub fn try_fire(
        &mut self,
        now: f64,
        origin: Vec3,
        direction: Vec3,
        ammo: Option<&mut dyn AmmoSupply>,
    ) -> Result<Option<FireIntent>> {
        if self.config.effect.is_none() {
            let err = CombatError::ConfigurationMissing("weapon effect");
            err.log();
            return Err(err);
        }

        if !self.cooldown.is_ready(now) {
            return Ok(None);
        }

        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return Ok(None);
        }

        if self.config.ammo_gated {
            if let Some(supply) = ammo {
                if !supply.consume() {
                    log::debug!("{} is out of ammo", self.owner);
                    return Ok(None);
                }
            }
        }

        self.cooldown.trigger(now);

        Ok(Some(FireIntent {
            shooter: self.owner,
            shooter_role: self.role,
            origin,
            direction,
            damage: self.config.damage,
            mode: self.config.mode,
        }))
    }

    pub fn owner(&self) -> ObjectId {
        self.owner
    }

    pub fn config(&self) -> &WeaponConfig {
        &self.config
    }

    pub fn damage(&self) -> f32 {
        self.config.damage
    }
}

/// Resolve a shot against the world
///
/// Ray shots damage the first object on the ray only when it has the
/// role opposing the shooter. Projectile shots are handed to `projectiles`.
pub fn resolve_fire(
    intent: &FireIntent,
    query: &dyn SpatialQuery,
    roles: &dyn RoleQuery,
    targets: &mut dyn DamageSink,
    projectiles: &mut ProjectileSystem,
) -> FireOutcome {
    match intent.mode {
        HitMode::Ray { range } => {
            let ray = RayQuery::new(intent.origin, intent.direction)
                .with_max_distance(range)
                .excluding(intent.shooter);

            let Some(hit) = query.raycast(&ray) else {
                return FireOutcome::Missed;
            };

            if !roles.has_role(hit.object, intent.shooter_role.opposing()) {
                log::trace!("{} shot blocked by {}", intent.shooter, hit.object);
                return FireOutcome::Blocked { object: hit.object };
            }

            let damage = DamageInfo::new(intent.damage)
                .with_source(intent.shooter)
                .with_hit_point(hit.point);
            let outcome = targets.apply_damage(hit.object, &damage);
            log::debug!(
                "{} hit {} for {:.1} ({:?})",
                intent.shooter,
                hit.object,
                intent.damage,
                outcome
            );
            FireOutcome::Hit {
                target: hit.object,
                outcome,
            }
        }
        HitMode::Projectile { speed, lifetime } => {
            let projectile = projectiles.launch(intent, speed, lifetime);
            FireOutcome::Launched { projectile }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::HostileStats;
    use onslaught_physics::{ColliderShape, CollisionWorld};
    use std::collections::HashMap;

    struct Ledgers(HashMap<ObjectId, HostileStats>);

    impl DamageSink for Ledgers {
        fn apply_damage(&mut self, target: ObjectId, damage: &DamageInfo) -> DamageOutcome {
            match self.0.get_mut(&target) {
                Some(stats) => stats.apply_damage(damage.amount),
                None => DamageOutcome::Ignored,
            }
        }
    }

    struct Magazine(u32);

    impl AmmoSupply for Magazine {
        fn ammo(&self) -> u32 {
            self.0
        }

        fn consume(&mut self) -> bool {
            if self.0 == 0 {
                return false;
            }
            self.0 -= 1;
            true
        }
    }

    const PLAYER: ObjectId = ObjectId::from_raw(1);
    const HOSTILE: ObjectId = ObjectId::from_raw(2);
    const OTHER_HOSTILE: ObjectId = ObjectId::from_raw(3);
    const WALL: ObjectId = ObjectId::from_raw(4);

    fn world() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world
            .add_actor(PLAYER, Role::Player, ColliderShape::humanoid(), Vec3::ZERO)
            .unwrap();
        world
            .add_actor(HOSTILE, Role::Hostile, ColliderShape::humanoid(), Vec3::new(0.0, 0.0, -10.0))
            .unwrap();
        world
    }

    fn ledgers() -> Ledgers {
        let mut map = HashMap::new();
        map.insert(HOSTILE, HostileStats::new(50.0, 10.0));
        map.insert(OTHER_HOSTILE, HostileStats::new(50.0, 10.0));
        Ledgers(map)
    }

    #[test]
    fn test_cooldown_gates_shots() {
        let mut weapon = Weapon::new(PLAYER, Role::Player, WeaponConfig::hitscan(10.0, 50.0));

        assert!(weapon.try_fire(0.0, Vec3::ZERO, Vec3::NEG_Z, None).unwrap().is_some());
        assert!(weapon.try_fire(0.5, Vec3::ZERO, Vec3::NEG_Z, None).unwrap().is_none());
        assert!(weapon.try_fire(1.0, Vec3::ZERO, Vec3::NEG_Z, None).unwrap().is_some());
    }

    #[test]
    fn test_set_config_applies_new_fire_rate() {
        let mut weapon = Weapon::new(PLAYER, Role::Player, WeaponConfig::hitscan(10.0, 50.0));
        assert!(weapon.try_fire(0.0, Vec3::ZERO, Vec3::NEG_Z, None).unwrap().is_some());

        weapon.set_config(WeaponConfig::hitscan(10.0, 50.0).with_fire_rate(4.0));

        assert!(weapon.try_fire(0.1, Vec3::ZERO, Vec3::NEG_Z, None).unwrap().is_none());
        assert!(weapon.try_fire(0.3, Vec3::ZERO, Vec3::NEG_Z, None).unwrap().is_some());
    }

    #[test]
    fn test_shots_per_window_bounded_by_rate() {
        let mut weapon = Weapon::new(
            PLAYER,
            Role::Player,
            WeaponConfig::hitscan(10.0, 50.0).with_fire_rate(4.0),
        );

        let mut shots = 0;
        let mut now = 0.0;
        while now < 2.0 {
            if weapon.try_fire(now, Vec3::ZERO, Vec3::NEG_Z, None).unwrap().is_some() {
                shots += 1;
            }
            now += 1.0 / 60.0;
        }
        // floor(2.0 * 4) + 1
        assert!(shots <= 9);
        assert!(shots >= 8);
    }

    #[test]
    fn test_missing_effect_is_an_error() {
        let config = WeaponConfig::hitscan(10.0, 50.0).with_effect(None);
        let mut weapon = Weapon::new(PLAYER, Role::Player, config);

        let result = weapon.try_fire(0.0, Vec3::ZERO, Vec3::NEG_Z, None);
        assert_eq!(result, Err(CombatError::ConfigurationMissing("weapon effect")));
    }

    #[test]
    fn test_ammo_gating() {
        let config = WeaponConfig::hitscan(10.0, 50.0).with_ammo_gated(true);
        let mut weapon = Weapon::new(PLAYER, Role::Player, config);
        let mut magazine = Magazine(1);

        assert!(weapon
            .try_fire(0.0, Vec3::ZERO, Vec3::NEG_Z, Some(&mut magazine))
            .unwrap()
            .is_some());
        assert_eq!(magazine.ammo(), 0);
        assert!(weapon
            .try_fire(5.0, Vec3::ZERO, Vec3::NEG_Z, Some(&mut magazine))
            .unwrap()
            .is_none());
        assert_eq!(magazine.ammo(), 0);
    }

    #[test]
    fn test_ungated_weapon_ignores_supply() {
        let mut weapon = Weapon::new(PLAYER, Role::Player, WeaponConfig::hitscan(10.0, 50.0));
        let mut magazine = Magazine(0);
        assert!(weapon
            .try_fire(0.0, Vec3::ZERO, Vec3::NEG_Z, Some(&mut magazine))
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_ray_hits_opposing_role() {
        let world = world();
        let mut targets = ledgers();
        let mut projectiles = ProjectileSystem::new();
        let mut weapon = Weapon::new(PLAYER, Role::Player, WeaponConfig::hitscan(10.0, 50.0));

        let intent = weapon.try_fire(0.0, Vec3::ZERO, Vec3::NEG_Z, None).unwrap().unwrap();
        let outcome = resolve_fire(&intent, &world, &world, &mut targets, &mut projectiles);

        assert_eq!(
            outcome,
            FireOutcome::Hit {
                target: HOSTILE,
                outcome: DamageOutcome::Absorbed { remaining: 40.0 },
            }
        );
    }

    #[test]
    fn test_ray_out_of_range_misses() {
        let world = world();
        let mut targets = ledgers();
        let mut projectiles = ProjectileSystem::new();
        let mut weapon = Weapon::new(PLAYER, Role::Player, WeaponConfig::hitscan(10.0, 5.0));

        let intent = weapon.try_fire(0.0, Vec3::ZERO, Vec3::NEG_Z, None).unwrap().unwrap();
        let outcome = resolve_fire(&intent, &world, &world, &mut targets, &mut projectiles);

        assert_eq!(outcome, FireOutcome::Missed);
        assert_eq!(targets.0[&HOSTILE].current(), 50.0);
    }

    #[test]
    fn test_same_role_blocks_without_damage() {
        let mut world = world();
        world
            .add_actor(OTHER_HOSTILE, Role::Hostile, ColliderShape::humanoid(), Vec3::new(0.0, 0.0, -5.0))
            .unwrap();
        let mut targets = ledgers();
        let mut projectiles = ProjectileSystem::new();
        let mut weapon = Weapon::new(HOSTILE, Role::Hostile, WeaponConfig::hitscan(10.0, 50.0));

        let intent = weapon
            .try_fire(0.0, Vec3::new(0.0, 0.0, -10.0), Vec3::Z, None)
            .unwrap()
            .unwrap();
        let outcome = resolve_fire(&intent, &world, &world, &mut targets, &mut projectiles);

        assert_eq!(outcome, FireOutcome::Blocked { object: OTHER_HOSTILE });
        assert_eq!(targets.0[&OTHER_HOSTILE].current(), 50.0);
    }

    #[test]
    fn test_wall_blocks_shot() {
        let mut world = world();
        world
            .add_obstacle(WALL, ColliderShape::Box { half_extents: [2.0, 2.0, 0.5] }, Vec3::new(0.0, 0.0, -5.0))
            .unwrap();
        let mut targets = ledgers();
        let mut projectiles = ProjectileSystem::new();
        let mut weapon = Weapon::new(PLAYER, Role::Player, WeaponConfig::hitscan(10.0, 50.0));

        let intent = weapon.try_fire(0.0, Vec3::ZERO, Vec3::NEG_Z, None).unwrap().unwrap();
        let outcome = resolve_fire(&intent, &world, &world, &mut targets, &mut projectiles);

        assert_eq!(outcome, FireOutcome::Blocked { object: WALL });
    }

    #[test]
    fn test_projectile_mode_launches() {
        let world = world();
        let mut targets = ledgers();
        let mut projectiles = ProjectileSystem::new();
        let mut weapon = Weapon::new(PLAYER, Role::Player, WeaponConfig::projectile(10.0, 20.0, 0.5));

        let intent = weapon.try_fire(0.0, Vec3::ZERO, Vec3::NEG_Z, None).unwrap().unwrap();
        let outcome = resolve_fire(&intent, &world, &world, &mut targets, &mut projectiles);

        assert!(matches!(outcome, FireOutcome::Launched { .. }));
        assert_eq!(projectiles.len(), 1);
        assert_eq!(targets.0[&HOSTILE].current(), 50.0);
    }
}
