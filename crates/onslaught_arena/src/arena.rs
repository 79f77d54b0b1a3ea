//! The encounter scene

use crate::config::ArenaConfig;
use crate::error::Result;
use crate::takeover::{CapabilityRegistry, Takeoverable};
use glam::{Quat, Vec3};
use onslaught_ai::{DeathNotice, HostileAgent, HostileConfig, HostileKind, KinematicLocomotion, TickContext};
use onslaught_combat::{
    resolve_fire, DamageInfo, DamageOutcome, DamageSink, FireIntent, FireOutcome, PlayerArsenal,
    PlayerStats, ProjectileSystem,
};
use onslaught_core::{CombatError, IdGenerator, ObjectId, Presentation, Role, SimClock};
use onslaught_director::{Director, HostileFactory, SpawnRequest};
use onslaught_event::{EventChannel, EventSender};
use onslaught_physics::{ColliderShape, CollisionWorld, RayQuery, RoleQuery, SpatialQuery};
use std::sync::Arc;

/// Player, hostiles, projectiles and director stepped on one tick
pub struct Arena {
    config: ArenaConfig,
    clock: SimClock,
    ids: IdGenerator,
    world: CollisionWorld,
    player_id: ObjectId,
    player: PlayerStats,
    player_position: Vec3,
    player_rotation: Quat,
    arsenal: PlayerArsenal,
    hostiles: Vec<HostileAgent>,
    projectiles: ProjectileSystem,
    director: Director,
    deaths: EventChannel<DeathNotice>,
    capabilities: CapabilityRegistry,
    presentation: Arc<dyn Presentation>,
    torn_down: bool,
}

impl Arena {
    /// Build the scene from config
    pub fn new(config: ArenaConfig, presentation: Arc<dyn Presentation>) -> Result<Self> {
        config.validate()?;

        let ids = IdGenerator::new();
        let mut world = CollisionWorld::new();

        for obstacle in &config.obstacles {
            world.add_obstacle(ids.next(), obstacle.shape, obstacle.position)?;
        }

        let player_id = ids.next();
        world.add_actor(player_id, Role::Player, ColliderShape::humanoid(), config.player_start)?;

        let director = Director::new(config.director.clone(), config.spawn_points.clone(), presentation.clone());
        log::info!(
            "Arena ready: {} spawn points, {} obstacles",
            config.spawn_points.len(),
            config.obstacles.len()
        );

        Ok(Self {
            clock: SimClock::new(),
            world,
            player_id,
            player: PlayerStats::new(&config.player, presentation.clone()),
            player_position: config.player_start,
            player_rotation: Quat::IDENTITY,
            arsenal: PlayerArsenal::new(player_id, config.player.clone()),
            hostiles: Vec::new(),
            projectiles: ProjectileSystem::new(),
            director,
            deaths: EventChannel::new(),
            capabilities: CapabilityRegistry::new(),
            presentation,
            torn_down: false,
            ids,
            config,
        })
    }

    /// Advance the whole scene by `delta_time` seconds
    pub fn tick(&mut self, delta_time: f32) {
        if self.torn_down {
            return;
        }
        self.clock.advance(delta_time);
        let now = self.clock.now();

        let mut spawner = Spawner {
            ids: &self.ids,
            world: &mut self.world,
            hostiles: &mut self.hostiles,
            capabilities: &mut self.capabilities,
            hostile: &self.config.hostile,
            elite_kind: self.config.elite_kind,
            deaths: self.deaths.sender(),
            presentation: &self.presentation,
        };
        self.director.tick(delta_time, self.player_position, &mut spawner);

        let mut intents = Vec::new();
        if self.player.is_alive() {
            let ctx = TickContext {
                now,
                delta_time,
                player_position: self.player_position,
                query: &self.world,
                roles: &self.world,
            };
            intents.extend(self.hostiles.iter_mut().filter_map(|hostile| hostile.tick(&ctx)));
        }
        for intent in &intents {
            self.resolve(intent);
        }

        let mut targets = Targets {
            player_id: self.player_id,
            player: &mut self.player,
            hostiles: &mut self.hostiles,
        };
        self.projectiles
            .tick(delta_time, &self.world, &self.world, &mut targets);

        self.process_deaths();
        self.remove_expired(delta_time);
        self.sync_colliders();
    }

    fn resolve(&mut self, intent: &FireIntent) -> FireOutcome {
        let mut targets = Targets {
            player_id: self.player_id,
            player: &mut self.player,
            hostiles: &mut self.hostiles,
        };
        resolve_fire(intent, &self.world, &self.world, &mut targets, &mut self.projectiles)
    }

    /// Deliver death notices to the director in the tick they were raised
    fn process_deaths(&mut self) {
        for notice in self.deaths.drain() {
            self.capabilities.remove(notice.agent);
            // Duplicates are logged by the director and otherwise ignored
            let _ = self.director.handle_death(notice.agent);
        }
    }

    fn remove_expired(&mut self, delta_time: f32) {
        let world = &mut self.world;
        self.hostiles.retain_mut(|hostile| {
            if !hostile.tick_removal(delta_time) {
                return true;
            }
            if let Err(err) = world.remove(hostile.id()) {
                log::warn!("Removing {}: {}", hostile.id(), err);
            }
            log::debug!("{} removed", hostile.id());
            false
        });
    }

    fn sync_colliders(&mut self) {
        for hostile in self.hostiles.iter().filter(|h| h.is_alive()) {
            if let Err(err) = self.world.set_position(hostile.id(), hostile.position()) {
                log::warn!("Syncing {}: {}", hostile.id(), err);
            }
        }
    }

    fn player_eye(&self) -> Vec3 {
        self.player_position + Vec3::Y * self.config.player_eye_height
    }

    /// Where the player is looking
    pub fn player_forward(&self) -> Vec3 {
        self.player_rotation * Vec3::NEG_Z
    }

    /// Move and turn the player
    pub fn set_player_transform(&mut self, position: Vec3, rotation: Quat) {
        self.player_position = position;
        self.player_rotation = rotation;
        if let Err(err) = self.world.set_position(self.player_id, position) {
            log::warn!("Moving player: {}", err);
        }
    }

    /// Fire the player's weapon along the look direction
    pub fn player_fire(&mut self) -> Option<FireOutcome> {
        if self.torn_down || !self.player.is_alive() {
            return None;
        }

        let now = self.clock.now();
        let eye = self.player_eye();
        let forward = self.player_forward();
        let intent = self
            .arsenal
            .try_fire(now, eye, forward, &mut self.player)
            .ok()
            .flatten()?;

        self.presentation.on_fire(self.player_id);
        let outcome = self.resolve(&intent);
        self.process_deaths();
        Some(outcome)
    }

    /// Select a weapon loadout by id
    pub fn change_weapon(&mut self, id: u32) -> bool {
        self.arsenal.change_weapon(id)
    }

    /// Take over the hostile the player is looking at
    ///
    /// The player moves to the hostile and inherits its facing; the hostile
    /// dies through the normal death path. `Ok(None)` when the look ray hits
    /// nothing within the interact range, the player is dead or the arena
    /// has been torn down.
    pub fn attempt_takeover(&mut self) -> std::result::Result<Option<ObjectId>, CombatError> {
        if self.torn_down || !self.player.is_alive() {
            return Ok(None);
        }

        let ray = RayQuery::new(self.player_eye(), self.player_forward())
            .with_max_distance(self.player.interact_range())
            .excluding(self.player_id);

        let Some(hit) = self.world.raycast(&ray) else {
            log::debug!("Takeover ray hit nothing");
            return Ok(None);
        };

        let target = hit.object;
        let capability = self
            .capability_for(target)
            .inspect_err(|err| err.log())?;

        let Some(hostile) = self.hostiles.iter_mut().find(|h| h.id() == target && h.is_alive()) else {
            let err = CombatError::InvalidTarget(target);
            err.log();
            return Err(err);
        };

        let position = hostile.position();
        let rotation = hostile.rotation();
        hostile.kill();

        self.set_player_transform(position, rotation);
        self.player.set_health(capability.takeover_health());
        log::info!("Player took over {} ({:?})", target, capability.kind);

        self.process_deaths();
        Ok(Some(target))
    }

    fn capability_for(&self, target: ObjectId) -> std::result::Result<Takeoverable, CombatError> {
        if !self.world.has_role(target, Role::Hostile) {
            return Err(CombatError::InvalidTarget(target));
        }
        self.capabilities.require_takeoverable(target)
    }

    /// Stop everything: director timers, pending removals and projectiles
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.director.shutdown();
        for hostile in &mut self.hostiles {
            hostile.cancel_removal();
        }
        self.projectiles.clear();
        self.deaths.drain();
        self.torn_down = true;
        log::info!("Arena torn down after {:.1}s", self.clock.now());
    }

    pub fn player_id(&self) -> ObjectId {
        self.player_id
    }

    pub fn player(&self) -> &PlayerStats {
        &self.player
    }

    /// Player ledger, for pickups and scripted damage
    pub fn player_mut(&mut self) -> &mut PlayerStats {
        &mut self.player
    }

    pub fn player_position(&self) -> Vec3 {
        self.player_position
    }

    pub fn arsenal(&self) -> &PlayerArsenal {
        &self.arsenal
    }

    pub fn hostiles(&self) -> &[HostileAgent] {
        &self.hostiles
    }

    pub fn hostile(&self, id: ObjectId) -> Option<&HostileAgent> {
        self.hostiles.iter().find(|h| h.id() == id)
    }

    /// Hostiles that have not died yet
    pub fn alive_hostiles(&self) -> impl Iterator<Item = &HostileAgent> {
        self.hostiles.iter().filter(|h| h.is_alive())
    }

    pub fn projectiles(&self) -> &ProjectileSystem {
        &self.projectiles
    }

    pub fn director(&self) -> &Director {
        &self.director
    }

    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

/// Routes damage to the player or a hostile by id
struct Targets<'a> {
    player_id: ObjectId,
    player: &'a mut PlayerStats,
    hostiles: &'a mut [HostileAgent],
}

impl DamageSink for Targets<'_> {
    fn apply_damage(&mut self, target: ObjectId, damage: &DamageInfo) -> DamageOutcome {
        if target == self.player_id {
            return self.player.take_damage(damage.amount);
        }
        match self.hostiles.iter_mut().find(|h| h.id() == target) {
            Some(hostile) => hostile.apply_damage(damage.amount),
            None => {
                CombatError::InvalidTarget(target).log();
                DamageOutcome::Ignored
            }
        }
    }
}

/// Creates hostiles for the director inside the arena
struct Spawner<'a> {
    ids: &'a IdGenerator,
    world: &'a mut CollisionWorld,
    hostiles: &'a mut Vec<HostileAgent>,
    capabilities: &'a mut CapabilityRegistry,
    hostile: &'a HostileConfig,
    elite_kind: HostileKind,
    deaths: EventSender<DeathNotice>,
    presentation: &'a Arc<dyn Presentation>,
}

impl HostileFactory for Spawner<'_> {
    fn spawn_hostile(&mut self, request: &SpawnRequest) -> Option<ObjectId> {
        let id = self.ids.next();
        let position = request.point.position;

        if let Err(err) = self
            .world
            .add_actor(id, Role::Hostile, ColliderShape::humanoid(), position)
        {
            log::warn!("Could not place hostile: {}", err);
            return None;
        }

        let config = HostileConfig {
            kind: if request.elite { self.elite_kind } else { self.hostile.kind },
            ..self.hostile.clone()
        };
        let kind = config.kind;
        let locomotion = KinematicLocomotion::new(position, config.chase_speed).with_rotation(request.point.rotation);

        let mut agent = HostileAgent::new(
            id,
            config,
            Box::new(locomotion),
            self.deaths.clone(),
            self.presentation.clone(),
        );
        agent.scale_health(request.health_multiplier);
        agent.scale_damage(request.damage_multiplier);

        self.capabilities.register(id, Takeoverable { kind });
        self.hostiles.push(agent);
        Some(id)
    }
}
