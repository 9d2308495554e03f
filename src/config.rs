//! Game Configuration
//!
//! Tunables for a session. Defaults reproduce the stock level; every
//! field can be overridden from `TILESWEEP_*` environment variables or a
//! JSON document.

use serde::{Serialize, Deserialize};

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON could not be parsed.
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    /// A field holds an unusable value.
    #[error("invalid value for {field}: {value}")]
    InvalidValue {
        /// Field or environment variable name
        field: &'static str,
        /// Offending value as given
        value: String,
    },
}

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Velocity added per held direction per tick
    pub speed: f64,
    /// Edge length of the square avatar
    pub player_size: f64,
    /// Spawn position (top-left corner)
    pub spawn_x: f64,
    /// Spawn position (top-left corner)
    pub spawn_y: f64,
    /// Tile edge length for the built-in level
    pub tile_size: f64,
    /// World width for horizontal clamping. `None` uses the grid width.
    pub world_width: Option<f64>,
    /// World height for vertical clamping. `None` uses the grid height.
    pub world_height: Option<f64>,
    /// Also clamp horizontally. Off by default: the stock level is walled
    /// on both sides, so the tiles bound horizontal motion.
    pub clamp_horizontal: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            speed: 1.875,
            player_size: 23.0,
            spawn_x: 75.0 - 23.0,
            spawn_y: 75.0 - 23.0,
            tile_size: 34.17,
            world_width: None,
            world_height: None,
            clamp_horizontal: false,
        }
    }
}

impl GameConfig {
    /// Defaults overridden by environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(v) = env_f64("TILESWEEP_SPEED")? {
            config.speed = v;
        }
        if let Some(v) = env_f64("TILESWEEP_PLAYER_SIZE")? {
            config.player_size = v;
        }
        if let Some(v) = env_f64("TILESWEEP_SPAWN_X")? {
            config.spawn_x = v;
        }
        if let Some(v) = env_f64("TILESWEEP_SPAWN_Y")? {
            config.spawn_y = v;
        }
        if let Some(v) = env_f64("TILESWEEP_TILE_SIZE")? {
            config.tile_size = v;
        }
        if let Some(v) = env_f64("TILESWEEP_WORLD_WIDTH")? {
            config.world_width = Some(v);
        }
        if let Some(v) = env_f64("TILESWEEP_WORLD_HEIGHT")? {
            config.world_height = Some(v);
        }
        if let Ok(v) = std::env::var("TILESWEEP_CLAMP_HORIZONTAL") {
            config.clamp_horizontal = v == "true" || v == "1";
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check("speed", self.speed, |v| v >= 0.0)?;
        check("player_size", self.player_size, |v| v > 0.0)?;
        check("spawn_x", self.spawn_x, |_| true)?;
        check("spawn_y", self.spawn_y, |_| true)?;
        check("tile_size", self.tile_size, |v| v > 0.0)?;
        if let Some(w) = self.world_width {
            check("world_width", w, |v| v > self.player_size)?;
        }
        if let Some(h) = self.world_height {
            check("world_height", h, |v| v > self.player_size)?;
        }
        Ok(())
    }
}

fn check(field: &'static str, value: f64, ok: impl Fn(f64) -> bool) -> Result<(), ConfigError> {
    if value.is_finite() && ok(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            value: value.to_string(),
        })
    }
}

fn env_f64(name: &'static str) -> Result<Option<f64>, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { field: name, value: raw }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn_x, 52.0);
        assert!(!config.clamp_horizontal);
    }

    #[test]
    fn test_from_json_partial() {
        let config = GameConfig::from_json(r#"{ "speed": 3.0, "clamp_horizontal": true }"#).unwrap();
        assert_eq!(config.speed, 3.0);
        assert!(config.clamp_horizontal);
        assert_eq!(config.player_size, 23.0);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let err = GameConfig::from_json(r#"{ "tile_size": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "tile_size", .. }));

        let err = GameConfig::from_json(r#"{ "world_height": 10.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "world_height", .. }));

        assert!(matches!(GameConfig::from_json("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig {
            world_height: Some(450.0),
            ..GameConfig::default()
        };
        let back = GameConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }
}
