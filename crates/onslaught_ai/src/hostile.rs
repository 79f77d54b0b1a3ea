//! Hostile agents

use crate::locomotion::Locomotion;
use crate::perception::{perceive, SightConfig};
use crate::state_machine::{AgentState, StateChange, StateMachine};
use glam::{Quat, Vec3};
use onslaught_combat::{DamageOutcome, FireIntent, HostileStats, Weapon, WeaponConfig};
use onslaught_core::{Delay, ObjectId, Presentation, Role};
use onslaught_event::EventSender;
use onslaught_physics::{RoleQuery, SpatialQuery};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Kind of hostile, selecting how it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HostileKind {
    /// Instant-hit rifle
    #[default]
    Gunner,
    /// Fires slow projectiles at the player
    Launcher,
}

impl HostileKind {
    /// Health granted to the player when taking over this kind
    pub fn takeover_health(&self) -> f32 {
        match self {
            Self::Gunner => 40.0,
            Self::Launcher => 40.0,
        }
    }

    /// Weapon for this kind, from the hostile tunables
    pub fn weapon_config(&self, config: &HostileConfig) -> WeaponConfig {
        let weapon = match self {
            Self::Gunner => WeaponConfig::hitscan(config.damage, config.detection_radius),
            Self::Launcher => {
                WeaponConfig::projectile(config.damage, config.projectile_speed, config.projectile_lifetime)
            }
        };
        weapon
            .with_fire_rate(config.fire_rate)
            .with_ammo_gated(false)
            .with_effect(config.weapon_effect.clone())
    }
}

/// Per-hostile perception and combat tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostileConfig {
    pub kind: HostileKind,
    pub shooting_range: f32,
    /// Shots per second
    pub fire_rate: f32,
    pub max_health: f32,
    pub damage: f32,
    pub chase_speed: f32,
    /// Seconds between destination refreshes while chasing
    pub destination_update_interval: f32,
    pub detection_radius: f32,
    /// Full view cone in degrees
    pub field_of_view: f32,
    pub eye_height: f32,
    /// Orientation slerp rate while shooting
    pub turn_rate: f32,
    /// Grace period between death and removal
    pub removal_delay: f32,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    pub weapon_effect: Option<String>,
}

impl Default for HostileConfig {
    fn default() -> Self {
        Self {
            kind: HostileKind::Gunner,
            shooting_range: 10.0,
            fire_rate: 1.0,
            max_health: 50.0,
            damage: 10.0,
            chase_speed: 5.0,
            destination_update_interval: 0.5,
            detection_radius: 30.0,
            field_of_view: 120.0,
            eye_height: 1.0,
            turn_rate: 8.0,
            removal_delay: 0.5,
            projectile_speed: 20.0,
            projectile_lifetime: 0.5,
            weapon_effect: Some("bullet".to_string()),
        }
    }
}

impl HostileConfig {
    /// Sight parameters
    pub fn sight(&self) -> SightConfig {
        SightConfig {
            detection_radius: self.detection_radius,
            field_of_view: self.field_of_view,
            eye_height: self.eye_height,
            shooting_range: self.shooting_range,
        }
    }
}

/// Emitted once when a hostile dies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathNotice {
    pub agent: ObjectId,
    pub kind: HostileKind,
    pub position: Vec3,
}

/// World state a hostile reads during its tick
pub struct TickContext<'a> {
    /// Simulation time in seconds
    pub now: f64,
    pub delta_time: f32,
    pub player_position: Vec3,
    pub query: &'a dyn SpatialQuery,
    pub roles: &'a dyn RoleQuery,
}

/// An AI-controlled adversary
pub struct HostileAgent {
    id: ObjectId,
    kind: HostileKind,
    config: HostileConfig,
    stats: HostileStats,
    weapon: Weapon,
    locomotion: Box<dyn Locomotion>,
    fsm: StateMachine<AgentState>,
    destination_timer: f32,
    attacking: bool,
    removal: Option<Delay>,
    deaths: EventSender<DeathNotice>,
    presentation: Arc<dyn Presentation>,
}

impl HostileAgent {
    /// Create a hostile. It starts `Idle` at the locomotion's position.
    pub fn new(
        id: ObjectId,
        config: HostileConfig,
        locomotion: Box<dyn Locomotion>,
        deaths: EventSender<DeathNotice>,
        presentation: Arc<dyn Presentation>,
    ) -> Self {
        let kind = config.kind;
        let weapon = Weapon::new(id, Role::Hostile, kind.weapon_config(&config));

        Self {
            id,
            kind,
            stats: HostileStats::new(config.max_health, config.damage),
            weapon,
            locomotion,
            fsm: StateMachine::new(AgentState::Idle),
            destination_timer: 0.0,
            attacking: false,
            removal: None,
            deaths,
            presentation,
            config,
        }
    }

    /// Run one simulation tick. Returns a shot to resolve, if one fired.
    pub fn tick(&mut self, ctx: &TickContext<'_>) -> Option<FireIntent> {
        if !self.stats.is_alive() {
            return None;
        }

        let perception = perceive(
            self.id,
            self.locomotion.position(),
            self.locomotion.forward(),
            ctx.player_position,
            &self.config.sight(),
            ctx.query,
            ctx.roles,
        );

        if let Some(change) = self.fsm.transition_to(perception.state) {
            self.on_state_change(change);
        }

        let intent = match self.fsm.current() {
            AgentState::Idle => None,
            AgentState::Chasing => {
                self.chase(ctx);
                None
            }
            AgentState::Shooting => self.shoot(ctx),
        };

        self.locomotion.update(ctx.delta_time);
        intent
    }

    fn on_state_change(&mut self, change: StateChange<AgentState>) {
        log::debug!("{} {:?} -> {:?}", self.id, change.from, change.to);

        if change.from == AgentState::Shooting {
            self.set_attacking(false);
        }

        match change.to {
            AgentState::Idle => self.halt(),
            AgentState::Chasing => {
                self.locomotion.resume();
                self.destination_timer = 0.0;
            }
            AgentState::Shooting => {
                self.halt();
                self.set_attacking(true);
            }
        }
    }

    fn halt(&mut self) {
        self.locomotion.stop();
        self.locomotion.set_velocity(Vec3::ZERO);
    }

    fn set_attacking(&mut self, attacking: bool) {
        if self.attacking != attacking {
            self.attacking = attacking;
            self.presentation.set_attacking(self.id, attacking);
        }
    }

    fn chase(&mut self, ctx: &TickContext<'_>) {
        self.destination_timer -= ctx.delta_time;
        if self.destination_timer <= 0.0 {
            self.locomotion.set_destination(ctx.player_position);
            self.destination_timer = self.config.destination_update_interval;
        }
    }

    fn shoot(&mut self, ctx: &TickContext<'_>) -> Option<FireIntent> {
        let position = self.locomotion.position();
        let mut flat = ctx.player_position - position;
        flat.y = 0.0;

        if flat.length_squared() > f32::EPSILON {
            let target = Quat::from_rotation_y((-flat.x).atan2(-flat.z));
            let t = (ctx.delta_time * self.config.turn_rate).clamp(0.0, 1.0);
            let rotation = self.locomotion.rotation().slerp(target, t);
            self.locomotion.set_rotation(rotation);
        }

        let muzzle = position + Vec3::Y * self.config.eye_height;
        let intent = self
            .weapon
            .try_fire(ctx.now, muzzle, ctx.player_position - muzzle, None)
            .ok()
            .flatten()?;

        self.presentation.on_fire(self.id);
        Some(intent)
    }

    /// Apply incoming damage
    ///
    /// The killing hit triggers the death transition exactly once; hits
    /// on a dead hostile are ignored.
    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        let outcome = self.stats.apply_damage(amount);
        if outcome.is_kill() {
            self.die();
        }
        outcome
    }

    /// Kill without damage (takeover). Returns false if already dead.
    pub fn kill(&mut self) -> bool {
        if !self.stats.kill() {
            return false;
        }
        self.die();
        true
    }

    fn die(&mut self) {
        log::info!("{} ({:?}) died", self.id, self.kind);

        self.set_attacking(false);
        self.locomotion.set_velocity(Vec3::ZERO);
        self.locomotion.stop();
        self.locomotion.set_enabled(false);

        self.presentation.on_death(self.id);
        let notice = DeathNotice {
            agent: self.id,
            kind: self.kind,
            position: self.locomotion.position(),
        };
        if !self.deaths.send(notice) {
            log::warn!("{} death notice had no receiver", self.id);
        }

        self.removal = Some(Delay::new(self.config.removal_delay));
    }

    /// Advance the post-death removal delay. True once it is time to remove.
    pub fn tick_removal(&mut self, delta_time: f32) -> bool {
        self.removal
            .as_mut()
            .map(|delay| delay.tick(delta_time))
            .unwrap_or(false)
    }

    /// Skip the pending removal (scene teardown)
    pub fn cancel_removal(&mut self) {
        if let Some(delay) = self.removal.as_mut() {
            delay.cancel();
        }
    }

    /// Set max health to base times `multiplier`
    pub fn scale_health(&mut self, multiplier: f32) {
        self.stats.scale_health(multiplier);
    }

    /// Set damage to base times `multiplier`
    pub fn scale_damage(&mut self, multiplier: f32) {
        self.stats.scale_damage(multiplier);
        self.weapon.set_damage(self.stats.damage());
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> HostileKind {
        self.kind
    }

    pub fn state(&self) -> AgentState {
        self.fsm.current()
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    /// Dead and waiting for the removal delay
    pub fn is_pending_removal(&self) -> bool {
        self.removal.map(|d| d.is_pending()).unwrap_or(false)
    }

    pub fn stats(&self) -> &HostileStats {
        &self.stats
    }

    pub fn position(&self) -> Vec3 {
        self.locomotion.position()
    }

    pub fn rotation(&self) -> Quat {
        self.locomotion.rotation()
    }

    pub fn forward(&self) -> Vec3 {
        self.locomotion.forward()
    }

    pub fn locomotion(&self) -> &dyn Locomotion {
        self.locomotion.as_ref()
    }
}

impl std::fmt::Debug for HostileAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostileAgent")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("state", &self.fsm.current())
            .field("stats", &self.stats)
            .finish()
    }
}
