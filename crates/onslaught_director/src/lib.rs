//! Onslaught Director - Adaptive Encounter Pacing
//!
//! Schedules waves of hostiles, picks spawn locations near the player and
//! scales hostile strength as waves progress, with a fixed elite wave at a
//! regular interval.
//!
//! # Example
//!
//! ```ignore
//! use onslaught_director::prelude::*;
//!
//! let mut director = Director::new(DirectorConfig::default(), spawn_points, presentation);
//! director.tick(delta_time, player_position, &mut factory);
//! // later, for each drained death notice
//! director.handle_death(agent);
//! ```

pub mod config;
pub mod difficulty;
pub mod director;
pub mod spawn;

pub mod prelude {
    pub use crate::config::{
        ConfigError, DifficultyCurve, DirectorConfig, Result, StatScaling, WaveSource, WaveSpec,
    };
    pub use crate::difficulty::{compute_difficulty, is_elite, non_elite_waves_before, stat_multipliers};
    pub use crate::director::{Director, DirectorPhase, EncounterState, HostileFactory, SpawnRequest};
    pub use crate::spawn::{select_nearest, SpawnPoint};
}

pub use prelude::*;
