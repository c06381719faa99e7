//! Data-driven configuration
//!
//! Config types implement [`Config`] to load from and save to TOML or RON
//! files, picked by file extension.

pub use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;

/// File-backed configuration
///
/// Types opt in by implementing the marker; loading and saving dispatch on
/// the path extension.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a `.toml` or `.ron` file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to a `.toml` or `.ron` file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Physics simulation settings
///
/// Defaults describe a 50x50 grid of 2x2 cells stepped four times per frame,
/// the layout the simulation was tuned against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// World size of one broad phase grid cell
    pub cell_size: Vec2,
    /// Grid cell count along x
    pub cell_count_x: i32,
    /// Grid cell count along y
    pub cell_count_y: i32,
    /// Fixed sub steps per update call
    pub sub_steps: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            cell_size: Vec2::new(2.0, 2.0),
            cell_count_x: 50,
            cell_count_y: 50,
            sub_steps: 4,
        }
    }
}

impl Config for PhysicsConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_tuned_grid() {
        let config = PhysicsConfig::default();
        assert_eq!(config.cell_size, Vec2::new(2.0, 2.0));
        assert_eq!(config.cell_count_x, 50);
        assert_eq!(config.cell_count_y, 50);
        assert_eq!(config.sub_steps, 4);
    }

    #[test]
    fn test_toml_file_round_trip() {
        let path = std::env::temp_dir().join("flat_engine_physics_roundtrip.toml");
        let path = path.to_str().unwrap();

        let config = PhysicsConfig {
            cell_size: Vec2::new(4.0, 4.0),
            sub_steps: 8,
            ..PhysicsConfig::default()
        };
        config.save_to_file(path).unwrap();

        let loaded = PhysicsConfig::load_from_file(path).unwrap();
        assert_eq!(loaded.cell_size, Vec2::new(4.0, 4.0));
        assert_eq!(loaded.cell_count_x, 50);
        assert_eq!(loaded.sub_steps, 8);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_ron_file_round_trip() {
        let path = std::env::temp_dir().join("flat_engine_physics_roundtrip.ron");
        let path = path.to_str().unwrap();

        let config = PhysicsConfig {
            cell_count_x: 10,
            cell_count_y: 20,
            ..PhysicsConfig::default()
        };
        config.save_to_file(path).unwrap();

        let loaded = PhysicsConfig::load_from_file(path).unwrap();
        assert_eq!(loaded.cell_count_x, 10);
        assert_eq!(loaded.cell_count_y, 20);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let config = PhysicsConfig::default();
        assert!(matches!(
            config.save_to_file("physics.yaml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));

        // Loading checks the extension only after the file is read
        let path = std::env::temp_dir().join("flat_engine_physics_format.yaml");
        let path = path.to_str().unwrap();
        std::fs::write(path, "cell_count_x: 50").unwrap();
        assert!(matches!(
            PhysicsConfig::load_from_file(path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_reports_io_error() {
        let result = PhysicsConfig::load_from_file("/nonexistent/flat_engine/physics.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
