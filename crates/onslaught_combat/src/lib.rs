//! Onslaught Combat - Stat Ledgers, Weapons and Projectiles
//!
//! # Features
//!
//! - Hostile stat ledger with spawn-time scaling and one-shot death
//! - Player stat ledger with clamped setters that notify presentation
//! - Weapons with fire-rate cooldowns and optional ammo gating
//! - Hit resolution by instantaneous ray or by projectile
//!
//! # Example
//!
//! ```ignore
//! use onslaught_combat::prelude::*;
//!
//! let mut weapon = Weapon::new(shooter, Role::Hostile, WeaponConfig::hitscan(10.0, 50.0));
//! if let Some(intent) = weapon.try_fire(now, muzzle, forward, None)? {
//!     let outcome = resolve_fire(&intent, &world, &world, &mut targets, &mut projectiles);
//! }
//! ```

pub mod arsenal;
pub mod damage;
pub mod health;
pub mod player;
pub mod projectile;
pub mod weapon;

pub mod prelude {
    pub use crate::arsenal::{Loadout, PlayerArsenal};
    pub use crate::damage::{DamageInfo, DamageOutcome, DamageSink};
    pub use crate::health::{HostileStats, MIN_SCALED_HEALTH};
    pub use crate::player::{AmmoSupply, PlayerConfig, PlayerStats};
    pub use crate::projectile::{Projectile, ProjectileImpact, ProjectileSystem};
    pub use crate::weapon::{resolve_fire, FireIntent, FireOutcome, HitMode, Weapon, WeaponConfig};
}

pub use prelude::*;
