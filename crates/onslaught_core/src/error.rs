//! Error taxonomy for the combat layer
//!
//! None of these are fatal. Callers log the error, skip the action and
//! keep ticking.

use crate::id::ObjectId;
use thiserror::Error;

/// Combat-layer errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CombatError {
    /// A required collaborator or asset was never configured
    #[error("configuration missing: {0}")]
    ConfigurationMissing(&'static str),

    /// Hit detection resolved to an object without the expected role
    #[error("invalid target {0}")]
    InvalidTarget(ObjectId),

    /// A one-shot transition was requested a second time
    #[error("redundant transition for {object}: {transition}")]
    RedundantTransition {
        object: ObjectId,
        transition: &'static str,
    },
}

impl CombatError {
    /// Log at the level that matches the error kind
    pub fn log(&self) {
        match self {
            Self::ConfigurationMissing(_) => log::error!("{}", self),
            Self::InvalidTarget(_) | Self::RedundantTransition { .. } => log::debug!("{}", self),
        }
    }
}

/// Result type for combat operations
pub type Result<T> = std::result::Result<T, CombatError>;
