//! Takeover capability
//!
//! Objects that can be taken over are registered here by id. Lookups go
//! through the registry rather than the object's type.

use onslaught_ai::HostileKind;
use onslaught_core::{CombatError, ObjectId};
use std::collections::HashMap;

/// Marks an object the player can take over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Takeoverable {
    pub kind: HostileKind,
}

impl Takeoverable {
    /// Player health after taking this object over
    pub fn takeover_health(&self) -> f32 {
        self.kind.takeover_health()
    }
}

/// Capability lookup by object id
#[derive(Debug, Default)]
pub struct CapabilityRegistry {
    takeoverable: HashMap<ObjectId, Takeoverable>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant the takeover capability
    pub fn register(&mut self, object: ObjectId, capability: Takeoverable) {
        self.takeoverable.insert(object, capability);
    }

    /// Revoke every capability of `object`
    pub fn remove(&mut self, object: ObjectId) {
        self.takeoverable.remove(&object);
    }

    /// Look up the takeover capability
    pub fn takeoverable(&self, object: ObjectId) -> Option<Takeoverable> {
        self.takeoverable.get(&object).copied()
    }

    /// Look up the takeover capability, or `InvalidTarget`
    pub fn require_takeoverable(&self, object: ObjectId) -> Result<Takeoverable, CombatError> {
        self.takeoverable(object).ok_or(CombatError::InvalidTarget(object))
    }

    pub fn len(&self) -> usize {
        self.takeoverable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.takeoverable.is_empty()
    }
}
