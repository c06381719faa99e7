//! Sandbox configuration

use flat_engine::prelude::{Config, ConfigError, PhysicsConfig, Vec2};
use serde::{Deserialize, Serialize};

/// Sandbox demo configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SandboxConfig {
    /// Physics settings forwarded to the engine
    pub physics: PhysicsConfig,

    /// Scene content settings
    pub scene: SceneConfig,
}

/// Scene content configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Number of falling boxes
    pub box_count: u32,

    /// Number of short lived drifting debris entities
    pub debris_count: u32,

    /// Half width of the region boxes and debris spawn in
    pub spawn_spread: f32,

    /// Gravity applied to every falling box
    pub gravity: Vec2,

    /// Restitution of the falling boxes
    pub bounciness: f32,

    /// Upper bound on debris lifetime (seconds)
    pub debris_lifetime: f32,

    /// Simulated seconds before the demo stops
    pub run_seconds: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            box_count: 60,
            debris_count: 40,
            spawn_spread: 20.0,
            gravity: Vec2::new(0.0, -10.0),
            bounciness: 0.3,
            debris_lifetime: 6.0,
            run_seconds: 10.0,
        }
    }
}

impl Config for SandboxConfig {}

impl SandboxConfig {
    /// Load configuration from `path`
    ///
    /// A missing file falls back to defaults; a file that exists but fails to
    /// parse is reported so a typo does not silently drop settings.
    pub fn load_or_default(path: &str) -> Result<Self, ConfigError> {
        match Self::load_from_file(path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path);
                Ok(config)
            }
            Err(ConfigError::Io(_)) => {
                log::info!("No configuration at {}, using defaults", path);
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_describe_a_reasonable_scene() {
        let config = SandboxConfig::default();
        assert!(config.scene.box_count > 0);
        assert!(config.scene.spawn_spread > 0.0);
        assert!(config.scene.gravity.y < 0.0);
        assert_eq!(config.physics.sub_steps, 4);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config =
            SandboxConfig::load_or_default("/nonexistent/sandbox/sandbox.toml").unwrap();
        assert_eq!(config.scene.box_count, SandboxConfig::default().scene.box_count);
    }

    #[test]
    fn test_toml_round_trip_keeps_scene_settings() {
        let path = std::env::temp_dir().join("sandbox_config_roundtrip.toml");
        let path = path.to_str().unwrap();

        let config = SandboxConfig {
            scene: SceneConfig {
                box_count: 5,
                gravity: Vec2::new(0.0, -4.0),
                ..SceneConfig::default()
            },
            ..SandboxConfig::default()
        };
        config.save_to_file(path).unwrap();

        let loaded = SandboxConfig::load_or_default(path).unwrap();
        assert_eq!(loaded.scene.box_count, 5);
        assert_eq!(loaded.scene.gravity, Vec2::new(0.0, -4.0));

        let _ = std::fs::remove_file(path);
    }
}
