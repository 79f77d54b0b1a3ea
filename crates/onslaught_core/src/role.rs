//! Object roles used for hit filtering

use serde::{Deserialize, Serialize};

/// Which side of the fight an object is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Player,
    Hostile,
}

impl Role {
    /// The side this role shoots at
    pub fn opposing(self) -> Self {
        match self {
            Self::Player => Self::Hostile,
            Self::Hostile => Self::Player,
        }
    }
}
