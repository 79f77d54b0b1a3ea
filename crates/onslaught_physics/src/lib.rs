//! Onslaught Physics - Spatial Query Adapter
//!
//! Everything the combat layer asks of world geometry goes through the
//! [`SpatialQuery`] and [`RoleQuery`] traits:
//!
//! - First-hit raycasts with layer masks and self-exclusion
//! - Role lookup (player / hostile) for hit filtering
//! - Distance and angle helpers shared by perception and weapons
//!
//! [`CollisionWorld`] implements both traits on top of Rapier 3D.
//!
//! # Example
//!
//! ```ignore
//! use onslaught_physics::prelude::*;
//!
//! let mut world = CollisionWorld::new();
//! world.add_actor(player_id, Role::Player, ColliderShape::humanoid(), Vec3::ZERO)?;
//!
//! let hit = world.raycast(&RayQuery::new(origin, direction).with_max_distance(30.0));
//! ```

pub mod error;
pub mod layers;
pub mod query;
pub mod world;

pub mod prelude {
    //! Common imports for spatial queries
    pub use crate::error::{PhysicsError, Result};
    pub use crate::layers::{CollisionLayer, LayerMask};
    pub use crate::query::{angle_between, RayQuery, RaycastHit, RoleQuery, SpatialQuery};
    pub use crate::world::{ColliderShape, CollisionWorld};
}

pub use prelude::*;
