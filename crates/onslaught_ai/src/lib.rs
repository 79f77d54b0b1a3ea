//! Onslaught AI - Hostile Perception and Combat
//!
//! This crate provides the per-hostile behaviour of an encounter.
//!
//! # Features
//!
//! - Behavioural state over `Idle`, `Chasing` and `Shooting`, changed once per transition
//! - Distance, field-of-view and line-of-sight perception
//! - Narrow locomotion interface with a kinematic implementation
//! - Hostile agents with one-shot death notification
//!
//! # Example
//!
//! ```ignore
//! use onslaught_ai::prelude::*;
//!
//! let mut hostile = HostileAgent::new(id, HostileConfig::default(), locomotion, deaths, presentation);
//! let intent = hostile.tick(&TickContext { now, delta_time, player_position, query: &world, roles: &world });
//! ```

pub mod hostile;
pub mod locomotion;
pub mod perception;
pub mod state_machine;

pub mod prelude {
    pub use crate::hostile::{DeathNotice, HostileAgent, HostileConfig, HostileKind, TickContext};
    pub use crate::locomotion::{KinematicLocomotion, Locomotion};
    pub use crate::perception::{classify, perceive, Perception, SightConfig};
    pub use crate::state_machine::{AgentState, StateChange, StateMachine};
}

pub use prelude::*;
