//! Damage information and delivery

use glam::Vec3;
use onslaught_core::ObjectId;

/// Information about a damage instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageInfo {
    /// Damage amount
    pub amount: f32,
    /// Object that caused the damage (if any)
    pub source: Option<ObjectId>,
    /// World position where damage was applied
    pub hit_point: Option<Vec3>,
}

impl DamageInfo {
    /// Create new damage info
    pub fn new(amount: f32) -> Self {
        Self {
            amount,
            source: None,
            hit_point: None,
        }
    }

    /// Set the source object
    pub fn with_source(mut self, source: ObjectId) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the hit point
    pub fn with_hit_point(mut self, point: Vec3) -> Self {
        self.hit_point = Some(point);
        self
    }
}

/// What applying damage did to the target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Target was already dead or not damageable
    Ignored,
    /// Target survived with this much health left
    Absorbed { remaining: f32 },
    /// This hit killed the target
    Killed,
}

impl DamageOutcome {
    /// True only for the killing blow
    pub fn is_kill(&self) -> bool {
        matches!(self, Self::Killed)
    }
}

/// Anything that can route damage to the ledger of a target object
pub trait DamageSink {
    /// Apply damage to `target`
    fn apply_damage(&mut self, target: ObjectId, damage: &DamageInfo) -> DamageOutcome;
}
