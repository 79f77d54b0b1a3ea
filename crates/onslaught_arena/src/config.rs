//! Arena configuration
//!
//! ```toml
//! player_start = [0.0, 0.0, 0.0]
//! elite_kind = "Launcher"
//!
//! [player]
//! ammo = 30
//! ammo_gated = false
//!
//! [hostile]
//! detection_radius = 40.0
//!
//! [director]
//! elite_interval = 4
//!
//! [[spawn_points]]
//! position = [20.0, 0.0, 0.0]
//! ```

use glam::Vec3;
use onslaught_ai::{HostileConfig, HostileKind};
use onslaught_combat::PlayerConfig;
use onslaught_director::{ConfigError, DirectorConfig, SpawnPoint};
use onslaught_physics::ColliderShape;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "ONSLAUGHT_CONFIG";

/// Static level geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleConfig {
    pub position: Vec3,
    pub shape: ColliderShape,
}

/// Everything needed to build an arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub player: PlayerConfig,
    pub player_start: Vec3,
    /// Eye height above the player position for aiming and takeover
    pub player_eye_height: f32,
    /// Regular hostiles use `hostile.kind`
    pub hostile: HostileConfig,
    /// Kind spawned in elite waves
    pub elite_kind: HostileKind,
    pub director: DirectorConfig,
    pub spawn_points: Vec<SpawnPoint>,
    pub obstacles: Vec<ObstacleConfig>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            player_start: Vec3::ZERO,
            player_eye_height: 0.6,
            hostile: HostileConfig::default(),
            elite_kind: HostileKind::Launcher,
            director: DirectorConfig::default(),
            spawn_points: default_spawn_ring(),
            obstacles: Vec::new(),
        }
    }
}

/// Eight points on a 20 unit ring around the origin
fn default_spawn_ring() -> Vec<SpawnPoint> {
    (0..8)
        .map(|i| {
            let angle = i as f32 * std::f32::consts::FRAC_PI_4;
            SpawnPoint::new(Vec3::new(angle.cos() * 20.0, 0.0, angle.sin() * 20.0))
        })
        .collect()
}

impl ArenaConfig {
    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `ONSLAUGHT_CONFIG`, or use defaults
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV) else {
            log::info!("{} not set, using default arena config", CONFIG_ENV);
            return Self::default();
        };

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded arena config from {}", path);
                config
            }
            Err(err) => {
                log::warn!("Could not load {}: {}. Using defaults", path, err);
                Self::default()
            }
        }
    }

    /// Check the director and player settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.director.validate()?;
        if self.player.max_health <= 0.0 {
            return Err(ConfigError::Invalid("player.max_health must be positive".into()));
        }
        if self.hostile.fire_rate < 0.0 {
            return Err(ConfigError::Invalid("hostile.fire_rate must not be negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("onslaught-{}-{}.toml", name, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_is_valid() {
        let config = ArenaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn_points.len(), 8);
    }

    #[test]
    fn test_load_partial_file() {
        let path = temp_file(
            "partial",
            r#"
            elite_kind = "Gunner"

            [player]
            ammo = 30

            [hostile]
            kind = "Launcher"

            [[spawn_points]]
            position = [5.0, 0.0, 0.0]
            "#,
        );

        let config = ArenaConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.player.ammo, 30);
        assert_eq!(config.player.max_health, 100.0);
        assert_eq!(config.hostile.kind, HostileKind::Launcher);
        assert_eq!(config.elite_kind, HostileKind::Gunner);
        assert_eq!(config.spawn_points, vec![SpawnPoint::new(Vec3::new(5.0, 0.0, 0.0))]);
    }

    #[test]
    fn test_load_rejects_invalid_director() {
        let path = temp_file("invalid", "[director]\nelite_interval = 0\n");
        let result = ArenaConfig::load(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let path = temp_file("garbled", "player = 12 = 4");
        let result = ArenaConfig::load(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ArenaConfig::load("/nonexistent/onslaught.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
