//! Game configuration, loaded from RON.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```ron
//! (
//!     seed: 1234,
//!     map: (width: 60, height: 40),
//! )
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_SEED, MAP_HEIGHT, MAP_WIDTH, MAX_ROOMS, ROOM_MAX_SIZE, ROOM_MIN_SIZE, ROOM_SIZE_FLOOR,
};
use crate::logging::TracingConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Room generator knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorParams {
    pub max_rooms: u32,
    pub room_min_size: i32,
    pub room_max_size: i32,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            max_rooms: MAX_ROOMS,
            room_min_size: ROOM_MIN_SIZE,
            room_max_size: ROOM_MAX_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: i32,
    pub height: i32,
    pub generator: GeneratorParams,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
            generator: GeneratorParams::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub seed: u64,
    pub map: MapConfig,
    pub logging: TracingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            map: MapConfig::default(),
            logging: TracingConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_ron_str(&source)?;
        tracing::info!(path = %path.as_ref().display(), seed = config.seed, "loaded config");
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Reject maps that cannot hold a single minimum-size room.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let generator = &self.map.generator;
        if generator.room_min_size < ROOM_SIZE_FLOOR {
            return Err(ConfigError::Invalid(format!(
                "room_min_size must be at least {ROOM_SIZE_FLOOR}, got {}",
                generator.room_min_size
            )));
        }
        if generator.room_min_size > generator.room_max_size {
            return Err(ConfigError::Invalid(format!(
                "room_min_size {} exceeds room_max_size {}",
                generator.room_min_size, generator.room_max_size
            )));
        }
        if self.map.width <= generator.room_min_size || self.map.height <= generator.room_min_size
        {
            return Err(ConfigError::Invalid(format!(
                "map {}x{} cannot fit a {}x{} room",
                self.map.width, self.map.height, generator.room_min_size, generator.room_min_size
            )));
        }
        Ok(())
    }
}
