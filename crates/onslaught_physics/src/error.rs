//! Error types for the physics adapter

use onslaught_core::ObjectId;
use thiserror::Error;

/// Physics adapter errors
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// Object has no collider in the world
    #[error("object not found in collision world: {0}")]
    ObjectNotFound(ObjectId),

    /// Object was registered twice
    #[error("object already registered: {0}")]
    DuplicateObject(ObjectId),

    /// Shape parameters were not usable
    #[error("invalid collision shape: {0}")]
    InvalidShape(String),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
