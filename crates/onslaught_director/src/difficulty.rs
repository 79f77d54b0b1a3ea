//! Wave difficulty and hostile stat scaling

use crate::config::{DirectorConfig, StatScaling, WaveSpec};

/// Every `elite_interval`-th wave is elite
pub fn is_elite(wave: u32, elite_interval: u32) -> bool {
    elite_interval > 0 && wave > 0 && wave % elite_interval == 0
}

/// Regular (non-elite) waves among `1..wave`
pub fn non_elite_waves_before(wave: u32, elite_interval: u32) -> u32 {
    let completed = wave.saturating_sub(1);
    if elite_interval == 0 {
        return completed;
    }
    completed - completed / elite_interval
}

/// Size and pacing for `wave`
///
/// Elite waves and wave 1 use fixed values. Later regular waves follow the
/// curve with an exponent counting only regular waves, so elite waves do
/// not skew the progression. Interval and delay never drop below their floors.
pub fn compute_difficulty(wave: u32, elite: bool, config: &DirectorConfig) -> WaveSpec {
    if elite {
        return config.elite_wave;
    }
    if wave <= 1 {
        return config.initial_wave;
    }

    let curve = &config.curve;
    let n = non_elite_waves_before(wave, config.elite_interval) as i32;
    let count = curve.base_count * curve.growth_factor.powi(n) + curve.additive_step * n as f32;

    WaveSpec {
        enemy_count: count.round().max(0.0) as u32,
        spawn_interval: (curve.base_interval * curve.rate_factor.powi(n)).max(curve.min_interval),
        post_wave_delay: (curve.base_delay * curve.decay_factor.powi(n)).max(curve.min_delay),
    }
}

/// Health and damage multipliers for hostiles spawned in `wave`
pub fn stat_multipliers(wave: u32, elite: bool, scaling: &StatScaling) -> (f32, f32) {
    let exponent = wave.saturating_sub(1) as i32;
    let mut health = scaling.health_growth.powi(exponent);
    let mut damage = scaling.damage_growth.powi(exponent);
    if elite {
        health *= scaling.elite_health_multiplier;
        damage *= scaling.elite_damage_multiplier;
    }
    (health, damage)
}
