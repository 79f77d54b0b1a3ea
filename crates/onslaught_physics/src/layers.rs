//! Collision layers and query masks

use onslaught_core::Role;
use serde::{Deserialize, Serialize};

/// A collision layer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionLayer(pub u32);

impl CollisionLayer {
    /// Default layer
    pub const DEFAULT: Self = Self(0);
    /// Player layer
    pub const PLAYER: Self = Self(1);
    /// Hostile layer
    pub const HOSTILES: Self = Self(2);
    /// Static environment layer (walls, cover)
    pub const ENVIRONMENT: Self = Self(5);

    /// Get the layer as a bitmask
    pub const fn as_mask(&self) -> u32 {
        1 << self.0
    }

    /// Layer an object with this role lives on
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Player => Self::PLAYER,
            Role::Hostile => Self::HOSTILES,
        }
    }
}

impl Default for CollisionLayer {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Set of layers a query is allowed to hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Hit everything
    pub const ALL: Self = Self(u32::MAX);
    /// Hit nothing
    pub const NONE: Self = Self(0);

    /// Mask containing exactly the given layers
    pub fn from_layers(layers: &[CollisionLayer]) -> Self {
        Self(layers.iter().fold(0u32, |acc, l| acc | l.as_mask()))
    }

    /// Add a layer
    pub fn with(self, layer: CollisionLayer) -> Self {
        Self(self.0 | layer.as_mask())
    }

    /// Remove a layer
    pub fn without(self, layer: CollisionLayer) -> Self {
        Self(self.0 & !layer.as_mask())
    }

    /// Check if a layer is in the mask
    pub fn contains(&self, layer: CollisionLayer) -> bool {
        self.0 & layer.as_mask() != 0
    }

    /// Raw bits
    pub fn bits(&self) -> u32 {
        self.0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_composition() {
        let mask = LayerMask::NONE
            .with(CollisionLayer::PLAYER)
            .with(CollisionLayer::ENVIRONMENT);

        assert!(mask.contains(CollisionLayer::PLAYER));
        assert!(mask.contains(CollisionLayer::ENVIRONMENT));
        assert!(!mask.contains(CollisionLayer::HOSTILES));

        let mask = mask.without(CollisionLayer::PLAYER);
        assert!(!mask.contains(CollisionLayer::PLAYER));
    }

    #[test]
    fn test_from_layers_matches_with() {
        let a = LayerMask::from_layers(&[CollisionLayer::PLAYER, CollisionLayer::HOSTILES]);
        let b = LayerMask::NONE
            .with(CollisionLayer::PLAYER)
            .with(CollisionLayer::HOSTILES);
        assert_eq!(a, b);
    }

    #[test]
    fn test_role_layers() {
        assert_eq!(CollisionLayer::for_role(Role::Player), CollisionLayer::PLAYER);
        assert_eq!(CollisionLayer::for_role(Role::Hostile), CollisionLayer::HOSTILES);
    }
}
