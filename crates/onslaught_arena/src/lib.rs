//! Onslaught Arena - Encounter Scene
//!
//! Owns the player, the live hostiles, projectiles, the collision world and
//! the director, and steps them in a fixed order each tick:
//!
//! 1. director pacing and spawns
//! 2. hostile perception and behaviour
//! 3. fire resolution
//! 4. projectile flight
//! 5. death notices to the director
//! 6. post-death removal
//! 7. collider sync
//!
//! # Example
//!
//! ```ignore
//! use onslaught_arena::prelude::*;
//!
//! let mut arena = Arena::new(ArenaConfig::from_env(), Arc::new(NullPresentation))?;
//! loop {
//!     arena.tick(1.0 / 60.0);
//! }
//! ```

pub mod arena;
pub mod config;
pub mod error;
pub mod takeover;

pub mod prelude {
    pub use crate::arena::Arena;
    pub use crate::config::{ArenaConfig, ObstacleConfig, CONFIG_ENV};
    pub use crate::error::{ArenaError, Result};
    pub use crate::takeover::{CapabilityRegistry, Takeoverable};
}

pub use prelude::*;
