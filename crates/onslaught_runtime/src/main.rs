//! Onslaught headless runner
//!
//! Loads the arena config named by `ONSLAUGHT_CONFIG` (defaults otherwise),
//! then steps the encounter at a fixed rate with a simple autopilot that
//! turns toward the nearest hostile and fires.
//!
//! Run with: cargo run -p onslaught_runtime -- [seconds]

mod hud;

use glam::Quat;
use hud::LogHud;
use onslaught_arena::{Arena, ArenaConfig};
use onslaught_combat::{AmmoSupply, Loadout};
use onslaught_director::DirectorPhase;
use std::sync::Arc;

const TICK_RATE: f32 = 60.0;
const DEFAULT_SECONDS: f32 = 120.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seconds = std::env::args()
        .skip(1)
        .find(|arg| !arg.starts_with("--"))
        .and_then(|arg| arg.parse::<f32>().ok())
        .unwrap_or(DEFAULT_SECONDS);

    let config = ArenaConfig::from_env();
    let mut arena = match Arena::new(config, Arc::new(LogHud)) {
        Ok(arena) => arena,
        Err(err) => {
            log::error!("Failed to build arena: {}", err);
            std::process::exit(1);
        }
    };

    run(&mut arena, seconds);
    arena.teardown();
}

fn run(arena: &mut Arena, seconds: f32) {
    let dt = 1.0 / TICK_RATE;
    let total_ticks = (seconds * TICK_RATE).max(0.0) as u64;
    log::info!("Running encounter for {:.0}s ({} ticks)", seconds, total_ticks);

    for tick in 0..total_ticks {
        arena.tick(dt);
        autopilot(arena);

        if tick % TICK_RATE as u64 == 0 {
            let state = arena.director().state();
            log::info!(
                "t={:.0}s wave {} alive {} health {:.0} ammo {}",
                arena.now(),
                state.wave_number,
                state.enemies_alive,
                arena.player().health(),
                arena.player().ammo()
            );
        }

        if !arena.player().is_alive() {
            log::info!("Player fell on wave {}", arena.director().wave_number());
            return;
        }
        if arena.director().phase() == DirectorPhase::Completed {
            log::info!("Encounter completed");
            return;
        }
    }
}

/// Face the nearest live hostile and pull the trigger
fn autopilot(arena: &mut Arena) {
    let position = arena.player_position();
    let nearest = arena
        .alive_hostiles()
        .map(|h| h.position())
        .min_by(|a, b| a.distance_squared(position).total_cmp(&b.distance_squared(position)));

    let Some(target) = nearest else {
        return;
    };

    let mut flat = target - position;
    flat.y = 0.0;
    if flat.length_squared() <= f32::EPSILON {
        return;
    }

    let facing = Quat::from_rotation_y((-flat.x).atan2(-flat.z));
    arena.set_player_transform(position, facing);

    // Scripted ammo pickup
    if arena.player().ammo() == 0 {
        arena.player_mut().set_ammo(10);
    }
    if arena.arsenal().loadout() != Loadout::Plasma {
        arena.change_weapon(1);
    }
    let _ = arena.player_fire();
}
