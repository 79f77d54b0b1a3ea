//! # onslaught_core - Core Primitives
//!
//! Shared building blocks for every Onslaught crate:
//! - Object identifiers and a generator for them
//! - The combat error taxonomy (nothing here is fatal)
//! - Simulation clock, resumable delays and cooldowns
//! - Object roles used for hit filtering
//! - The fire-and-forget presentation collaborator

pub mod error;
pub mod id;
pub mod presentation;
pub mod role;
pub mod time;

pub mod prelude {
    pub use crate::error::{CombatError, Result};
    pub use crate::id::{IdGenerator, ObjectId};
    pub use crate::presentation::{NullPresentation, Presentation};
    pub use crate::role::Role;
    pub use crate::time::{Cooldown, Delay, SimClock};
}

pub use prelude::*;
