//! Hostile stat ledger

use crate::damage::DamageOutcome;
use serde::{Deserialize, Serialize};

/// Lowest max health a living hostile can be scaled to
pub const MIN_SCALED_HEALTH: f32 = 1.0;

/// Health and damage values of one hostile
///
/// `0 <= current <= max` always holds. Scaling derives from fixed base
/// values, so rescaling replaces rather than compounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileStats {
    base_health: f32,
    base_damage: f32,
    max_health: f32,
    current: f32,
    damage: f32,
    alive: bool,
}

impl HostileStats {
    /// Create a ledger at full health
    pub fn new(base_health: f32, base_damage: f32) -> Self {
        let base_health = base_health.max(0.0);
        let base_damage = base_damage.max(0.0);
        Self {
            base_health,
            base_damage,
            max_health: base_health,
            current: base_health,
            damage: base_damage,
            alive: base_health > 0.0,
        }
    }

    /// Set max health to `base * multiplier` and refill
    ///
    /// A living hostile keeps at least `MIN_SCALED_HEALTH` (or its base
    /// health, if lower), so scaling never leaves it alive at zero.
    pub fn scale_health(&mut self, multiplier: f32) {
        if !self.alive {
            return;
        }
        let floor = MIN_SCALED_HEALTH.min(self.base_health);
        self.max_health = (self.base_health * multiplier.max(0.0)).max(floor);
        self.current = self.max_health;
        log::debug!("Hostile health scaled to {:.1} (x{:.2})", self.max_health, multiplier);
    }

    /// Set damage to `base * multiplier`
    pub fn scale_damage(&mut self, multiplier: f32) {
        self.damage = (self.base_damage * multiplier.max(0.0)).max(0.0);
        log::debug!("Hostile damage scaled to {:.1} (x{:.2})", self.damage, multiplier);
    }

    /// Apply damage. `Killed` is returned exactly once.
    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if !self.alive {
            return DamageOutcome::Ignored;
        }

        self.current = (self.current - amount.max(0.0)).clamp(0.0, self.max_health);
        if self.current <= 0.0 {
            self.alive = false;
            return DamageOutcome::Killed;
        }
        DamageOutcome::Absorbed {
            remaining: self.current,
        }
    }

    /// Kill outright (takeover, scripted removal). Returns false if already dead.
    pub fn kill(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.current = 0.0;
        self.alive = false;
        true
    }

    /// Current health
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Maximum health
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Damage per hit
    pub fn damage(&self) -> f32 {
        self.damage
    }

    /// Check if alive
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Get health as a fraction (0.0 - 1.0)
    pub fn health_percent(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        self.current / self.max_health
    }
}
