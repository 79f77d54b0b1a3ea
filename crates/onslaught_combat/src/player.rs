//! Player stat ledger

use crate::damage::DamageOutcome;
use onslaught_core::Presentation;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Lower bound for camera sensitivity
pub const MIN_CAMERA_SENSITIVITY: f32 = 0.1;
/// Upper bound for camera sensitivity
pub const MAX_CAMERA_SENSITIVITY: f32 = 1.0;

/// Starting values for the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: f32,
    pub health: f32,
    pub ammo: u32,
    pub interact_range: f32,
    pub camera_sensitivity: f32,
    /// Seconds between player shots
    pub weapon_cooldown: f32,
    /// Shots consume ammo and are refused at zero
    pub ammo_gated: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            health: 100.0,
            ammo: 10,
            interact_range: 50.0,
            camera_sensitivity: 0.5,
            weapon_cooldown: 0.3,
            ammo_gated: true,
        }
    }
}

/// Source of ammunition a weapon may draw from
pub trait AmmoSupply {
    /// Rounds available
    fn ammo(&self) -> u32;

    /// Take one round. Returns false if none were left.
    fn consume(&mut self) -> bool;
}

/// Health, ammo and key state of the player
///
/// Setters clamp their input and report the new value to presentation.
pub struct PlayerStats {
    max_health: f32,
    health: f32,
    ammo: u32,
    has_key: bool,
    interact_range: f32,
    camera_sensitivity: f32,
    dead: bool,
    presentation: Arc<dyn Presentation>,
}

impl PlayerStats {
    /// Create from config
    pub fn new(config: &PlayerConfig, presentation: Arc<dyn Presentation>) -> Self {
        let max_health = config.max_health.max(1.0);
        Self {
            max_health,
            health: config.health.clamp(0.0, max_health),
            ammo: config.ammo,
            has_key: false,
            interact_range: config.interact_range.max(0.0),
            camera_sensitivity: config
                .camera_sensitivity
                .clamp(MIN_CAMERA_SENSITIVITY, MAX_CAMERA_SENSITIVITY),
            dead: false,
            presentation,
        }
    }

    /// Set health, clamped to `0..=max`
    pub fn set_health(&mut self, value: f32) {
        if self.dead {
            return;
        }
        self.health = value.clamp(0.0, self.max_health);
        self.presentation.on_health_changed(self.health_percent());

        if self.health <= 0.0 {
            self.dead = true;
            log::info!("Player died");
            self.presentation.on_player_death();
        }
    }

    /// Take damage. `Killed` is returned once; later hits are ignored.
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.dead {
            return DamageOutcome::Ignored;
        }
        self.set_health(self.health - amount.max(0.0));
        if self.dead {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Absorbed {
                remaining: self.health,
            }
        }
    }

    /// Restore health up to the maximum
    pub fn heal(&mut self, amount: f32) {
        self.set_health(self.health + amount.max(0.0));
    }

    /// Set ammo, clamped to the representable range
    pub fn set_ammo(&mut self, value: i64) {
        self.ammo = value.clamp(0, i64::from(u32::MAX)) as u32;
        self.presentation.on_ammo_changed(self.ammo);
    }

    /// Add (or with a negative delta, remove) ammo
    pub fn add_ammo(&mut self, delta: i64) {
        self.set_ammo(i64::from(self.ammo).saturating_add(delta));
    }

    /// Set whether the player carries the door key
    pub fn pickup_key(&mut self, has_key: bool) {
        if has_key && !self.has_key {
            log::info!("Player picked up the key");
        }
        self.has_key = has_key;
    }

    /// Set camera sensitivity, clamped to its slider range
    pub fn set_camera_sensitivity(&mut self, value: f32) {
        self.camera_sensitivity = value.clamp(MIN_CAMERA_SENSITIVITY, MAX_CAMERA_SENSITIVITY);
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Health as a fraction (0.0 - 1.0)
    pub fn health_percent(&self) -> f32 {
        self.health / self.max_health
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    pub fn has_key(&self) -> bool {
        self.has_key
    }

    pub fn interact_range(&self) -> f32 {
        self.interact_range
    }

    pub fn camera_sensitivity(&self) -> f32 {
        self.camera_sensitivity
    }
}

impl AmmoSupply for PlayerStats {
    fn ammo(&self) -> u32 {
        self.ammo
    }

    fn consume(&mut self) -> bool {
        if self.ammo == 0 {
            return false;
        }
        self.set_ammo(i64::from(self.ammo) - 1);
        true
    }
}

impl std::fmt::Debug for PlayerStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerStats")
            .field("health", &self.health)
            .field("max_health", &self.max_health)
            .field("ammo", &self.ammo)
            .field("has_key", &self.has_key)
            .field("dead", &self.dead)
            .finish()
    }
}
