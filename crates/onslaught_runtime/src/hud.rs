//! Log-only presentation

use onslaught_core::{ObjectId, Presentation};

/// Writes HUD and audio cues to the log
#[derive(Debug, Default)]
pub struct LogHud;

impl Presentation for LogHud {
    fn set_attacking(&self, agent: ObjectId, attacking: bool) {
        log::trace!("{} attacking: {}", agent, attacking);
    }

    fn on_death(&self, agent: ObjectId) {
        log::debug!("[sfx] death {}", agent);
    }

    fn on_health_changed(&self, normalized: f32) {
        log::debug!("[hud] health {:.0}%", normalized * 100.0);
    }

    fn on_ammo_changed(&self, count: u32) {
        log::debug!("[hud] ammo {}", count);
    }

    fn on_player_death(&self) {
        log::info!("[hud] game over");
    }

    fn on_wave_changed(&self, wave: u32) {
        log::info!("[hud] wave {}", wave);
    }

    fn on_enemy_count_changed(&self, count: u32) {
        log::debug!("[hud] enemies {}", count);
    }
}
