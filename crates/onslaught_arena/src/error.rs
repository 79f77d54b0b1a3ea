//! Arena error types

use onslaught_core::CombatError;
use onslaught_director::ConfigError;
use onslaught_physics::PhysicsError;
use thiserror::Error;

/// Errors surfaced while building or driving an arena
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("combat error: {0}")]
    Combat(#[from] CombatError),

    #[error("physics error: {0}")]
    Physics(#[from] PhysicsError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for arena operations
pub type Result<T> = std::result::Result<T, ArenaError>;
