//! Director configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Size and pacing of one wave
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveSpec {
    pub enemy_count: u32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Seconds between wave clear and the next wave
    pub post_wave_delay: f32,
}

impl WaveSpec {
    pub fn new(enemy_count: u32, spawn_interval: f32, post_wave_delay: f32) -> Self {
        Self {
            enemy_count,
            spawn_interval,
            post_wave_delay,
        }
    }
}

/// Progression curve for regular waves after the first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyCurve {
    pub base_count: f32,
    pub growth_factor: f32,
    pub additive_step: f32,
    pub base_interval: f32,
    pub rate_factor: f32,
    pub min_interval: f32,
    pub base_delay: f32,
    pub decay_factor: f32,
    pub min_delay: f32,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            base_count: 5.0,
            growth_factor: 1.2,
            additive_step: 1.0,
            base_interval: 1.0,
            rate_factor: 0.9,
            min_interval: 0.25,
            base_delay: 5.0,
            decay_factor: 0.9,
            min_delay: 2.0,
        }
    }
}

/// Per-wave hostile stat growth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatScaling {
    pub health_growth: f32,
    pub damage_growth: f32,
    pub elite_health_multiplier: f32,
    pub elite_damage_multiplier: f32,
}

impl Default for StatScaling {
    fn default() -> Self {
        Self {
            health_growth: 1.1,
            damage_growth: 1.05,
            elite_health_multiplier: 3.0,
            elite_damage_multiplier: 1.5,
        }
    }
}

/// Where wave definitions come from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WaveSource {
    /// Endless waves from the difficulty curve
    #[default]
    Adaptive,
    /// A fixed list; the encounter completes after the last one
    Scripted { waves: Vec<WaveSpec> },
}

/// Director tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorConfig {
    /// Number of spawn points nearest the player used each wave
    pub spawn_subset_size: usize,
    /// Every n-th wave is elite
    pub elite_interval: u32,
    pub initial_wave: WaveSpec,
    pub elite_wave: WaveSpec,
    pub curve: DifficultyCurve,
    pub scaling: StatScaling,
    pub source: WaveSource,
    /// Fixed seed for spawn point choice
    pub rng_seed: Option<u64>,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            spawn_subset_size: 3,
            elite_interval: 3,
            initial_wave: WaveSpec::new(5, 1.0, 5.0),
            elite_wave: WaveSpec::new(3, 1.5, 8.0),
            curve: DifficultyCurve::default(),
            scaling: StatScaling::default(),
            source: WaveSource::Adaptive,
            rng_seed: None,
        }
    }
}

impl DirectorConfig {
    /// Reject settings that would stall or collapse pacing
    pub fn validate(&self) -> Result<()> {
        if self.spawn_subset_size == 0 {
            return Err(ConfigError::Invalid("spawn_subset_size must be at least 1".into()));
        }
        if self.elite_interval == 0 {
            return Err(ConfigError::Invalid("elite_interval must be at least 1".into()));
        }
        if self.curve.min_interval <= 0.0 {
            return Err(ConfigError::Invalid("curve.min_interval must be positive".into()));
        }
        if self.curve.min_delay <= 0.0 {
            return Err(ConfigError::Invalid("curve.min_delay must be positive".into()));
        }

        let factors = [
            ("curve.growth_factor", self.curve.growth_factor),
            ("curve.rate_factor", self.curve.rate_factor),
            ("curve.decay_factor", self.curve.decay_factor),
            ("scaling.health_growth", self.scaling.health_growth),
            ("scaling.damage_growth", self.scaling.damage_growth),
            ("scaling.elite_health_multiplier", self.scaling.elite_health_multiplier),
            ("scaling.elite_damage_multiplier", self.scaling.elite_damage_multiplier),
        ];
        for (name, value) in factors {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::Invalid(format!("{} must be positive", name)));
            }
        }

        let fixed = [("initial_wave", &self.initial_wave), ("elite_wave", &self.elite_wave)];
        for (name, wave) in fixed {
            check_wave(name, wave)?;
        }

        if let WaveSource::Scripted { waves } = &self.source {
            if waves.is_empty() {
                return Err(ConfigError::Invalid("scripted wave list is empty".into()));
            }
            for wave in waves {
                check_wave("scripted wave", wave)?;
            }
        }
        Ok(())
    }
}

fn check_wave(name: &str, wave: &WaveSpec) -> Result<()> {
    if wave.spawn_interval < 0.0 || wave.post_wave_delay < 0.0 {
        return Err(ConfigError::Invalid(format!("{} has a negative interval or delay", name)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(DirectorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_elite_interval() {
        let config = DirectorConfig {
            elite_interval: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_subset() {
        let config = DirectorConfig {
            spawn_subset_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_non_positive_floors() {
        let mut config = DirectorConfig::default();
        config.curve.min_interval = 0.0;
        assert!(config.validate().is_err());

        let mut config = DirectorConfig::default();
        config.curve.min_delay = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_factors() {
        let mut config = DirectorConfig::default();
        config.scaling.health_growth = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = DirectorConfig::default();
        config.scaling.elite_damage_multiplier = -1.5;
        assert!(config.validate().is_err());

        let mut config = DirectorConfig::default();
        config.curve.decay_factor = 0.0;
        assert!(config.validate().is_err());

        let mut config = DirectorConfig::default();
        config.curve.growth_factor = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_script() {
        let config = DirectorConfig {
            source: WaveSource::Scripted { waves: Vec::new() },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: DirectorConfig = toml::from_str(
            r#"
            elite_interval = 4

            [curve]
            growth_factor = 1.5
            "#,
        )
        .unwrap();

        assert_eq!(config.elite_interval, 4);
        assert_eq!(config.curve.growth_factor, 1.5);
        assert_eq!(config.curve.min_interval, 0.25);
        assert_eq!(config.spawn_subset_size, 3);
        assert_eq!(config.source, WaveSource::Adaptive);
    }

    #[test]
    fn test_scripted_source_from_toml() {
        let config: DirectorConfig = toml::from_str(
            r#"
            [source]
            mode = "scripted"
            waves = [
                { enemy_count = 2, spawn_interval = 0.5, post_wave_delay = 1.0 },
                { enemy_count = 4, spawn_interval = 0.5, post_wave_delay = 1.0 },
            ]
            "#,
        )
        .unwrap();

        match config.source {
            WaveSource::Scripted { waves } => assert_eq!(waves.len(), 2),
            other => panic!("unexpected source {:?}", other),
        }
    }
}
