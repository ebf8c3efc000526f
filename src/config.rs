//! Game configuration
//!
//! Fixed for the lifetime of a game state. Defaults are the constants in
//! [`crate::consts`]; a host may hand in JSON to override them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::grid::MAX_GRID_SIDE;
use crate::sim::maze::MazeParams;

/// Invalid configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid {width}x{height} must be between 2x2 and {max}x{max}")]
    GridSize { width: i32, height: i32, max: i32 },
    #[error("{field} must be between 0 and 1 (got {value:.3})")]
    Fraction { field: &'static str, value: f64 },
    #[error("ghost move interval [{min:.1}, {max:.1}) ms is empty")]
    GhostInterval { min: f32, max: f32 },
    #[error("{count} ghosts do not fit a {cells}-cell grid")]
    TooManyGhosts { count: usize, cells: usize },
    #[error("{field} must be positive (got {value:.1})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// All tunables of a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub maze_seed: u32,
    pub braid_chance: f64,
    pub door_fraction: f64,
    pub ghost_count: usize,
    pub ghost_move_min_ms: f32,
    pub ghost_move_max_ms: f32,
    pub ghost_min_spawn_distance: i32,
    pub ghost_spawn_max_attempts: u32,
    pub round_duration_ms: f32,
    pub timeout_grace_ms: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            maze_seed: MAZE_SEED,
            braid_chance: BRAID_CHANCE,
            door_fraction: DOOR_FRACTION,
            ghost_count: GHOST_COUNT,
            ghost_move_min_ms: GHOST_MOVE_MIN_MS,
            ghost_move_max_ms: GHOST_MOVE_MAX_MS,
            ghost_min_spawn_distance: GHOST_MIN_SPAWN_DISTANCE,
            ghost_spawn_max_attempts: GHOST_SPAWN_MAX_ATTEMPTS,
            round_duration_ms: ROUND_DURATION_MS,
            timeout_grace_ms: TIMEOUT_GRACE_MS,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let side = 2..=MAX_GRID_SIDE;
        if !side.contains(&self.width) || !side.contains(&self.height) {
            return Err(ConfigError::GridSize {
                width: self.width,
                height: self.height,
                max: MAX_GRID_SIDE,
            });
        }

        let cells = (self.width * self.height) as usize;
        if self.ghost_count > cells {
            return Err(ConfigError::TooManyGhosts {
                count: self.ghost_count,
                cells,
            });
        }

        for (field, value) in [
            ("braid_chance", self.braid_chance),
            ("door_fraction", self.door_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Fraction { field, value });
            }
        }

        if !(self.ghost_move_min_ms > 0.0 && self.ghost_move_min_ms < self.ghost_move_max_ms) {
            return Err(ConfigError::GhostInterval {
                min: self.ghost_move_min_ms,
                max: self.ghost_move_max_ms,
            });
        }

        for (field, value) in [
            ("round_duration_ms", self.round_duration_ms),
            ("timeout_grace_ms", self.timeout_grace_ms),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        Ok(())
    }

    pub fn maze_params(&self) -> MazeParams {
        MazeParams {
            braid_chance: self.braid_chance,
            door_fraction: self.door_fraction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = GameConfig::default();
        assert_eq!((config.width, config.height), (13, 11));
        assert_eq!(config.ghost_count, 3);
        assert_eq!(config.round_duration_ms, 60_000.0);
        assert_eq!(config.timeout_grace_ms, 1_200.0);
        assert_eq!(config.ghost_min_spawn_distance, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{ "width": 5, "height": 5, "ghost_count": 0 }"#)
            .expect("valid config");
        assert_eq!((config.width, config.height), (5, 5));
        assert_eq!(config.ghost_count, 0);
        assert_eq!(config.maze_seed, MAZE_SEED);
    }

    #[test]
    fn test_rejects_bad_grid() {
        let err = GameConfig::from_json(r#"{ "width": 1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::GridSize { width: 1, .. }));
        let err = GameConfig::from_json(r#"{ "height": 300 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::GridSize { height: 300, .. }));
    }

    #[test]
    fn test_rejects_bad_fraction() {
        let config = GameConfig {
            door_fraction: 1.5,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Fraction { field: "door_fraction", .. }));
        assert_eq!(err.to_string(), "door_fraction must be between 0 and 1 (got 1.500)");
    }

    #[test]
    fn test_rejects_inverted_interval_and_zero_duration() {
        let config = GameConfig {
            ghost_move_min_ms: 400.0,
            ghost_move_max_ms: 220.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::GhostInterval { .. })));

        let config = GameConfig {
            round_duration_ms: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "round_duration_ms", .. })
        ));
    }

    #[test]
    fn test_rejects_more_ghosts_than_cells() {
        let err = GameConfig::from_json(r#"{ "width": 5, "height": 5, "ghost_count": 26 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::TooManyGhosts { count: 26, cells: 25 }));
        assert_eq!(err.to_string(), "26 ghosts do not fit a 25-cell grid");

        let err = GameConfig::from_json(r#"{ "ghost_count": 18446744073709551615 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::TooManyGhosts { .. }));

        let full = GameConfig::from_json(r#"{ "width": 5, "height": 5, "ghost_count": 25 }"#);
        assert!(full.is_ok());
    }

    #[test]
    fn test_parse_error() {
        let err = GameConfig::from_json("{ width: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("invalid config JSON"));
    }
}
