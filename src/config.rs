//! Runtime gameplay configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors the constants in
//! [`crate::constants`]. At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file. Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about.
//!
//! ## Tuning workflow
//!
//! 1. Edit `assets/game.toml`.
//! 2. Restart the game; no recompilation required.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{
    validate_non_negative, validate_nonzero_count, validate_positive, validate_unit_interval,
    GameError, GameResult,
};
use bevy::prelude::*;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;

/// Default location of the configuration file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/game.toml";

/// Runtime-tunable gameplay configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── World ────────────────────────────────────────────────────────────────
    pub gravity: f32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_start_x: f32,
    pub player_start_y: f32,
    pub player_speed: f32,
    pub player_jump_speed: f32,
    pub player_bounce: f32,

    // ── Stars ────────────────────────────────────────────────────────────────
    pub star_count: usize,
    pub star_spacing: f32,
    pub star_start_x: f32,
    pub star_start_y: f32,
    pub star_bounce_min: f32,
    pub star_bounce_max: f32,
    pub points_per_star: u32,

    // ── Bombs ────────────────────────────────────────────────────────────────
    pub bomb_spawn_y: f32,
    pub bomb_drift_speed: f32,
    pub bomb_fall_speed: f32,
    pub max_hazards: usize,

    // ── HUD ──────────────────────────────────────────────────────────────────
    pub score_font_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            player_start_x: PLAYER_START_X,
            player_start_y: PLAYER_START_Y,
            player_speed: PLAYER_SPEED,
            player_jump_speed: PLAYER_JUMP_SPEED,
            player_bounce: PLAYER_BOUNCE,
            star_count: STAR_COUNT,
            star_spacing: STAR_SPACING,
            star_start_x: STAR_START_X,
            star_start_y: STAR_START_Y,
            star_bounce_min: STAR_BOUNCE_MIN,
            star_bounce_max: STAR_BOUNCE_MAX,
            points_per_star: POINTS_PER_STAR,
            bomb_spawn_y: BOMB_SPAWN_Y,
            bomb_drift_speed: BOMB_DRIFT_SPEED,
            bomb_fall_speed: BOMB_FALL_SPEED,
            max_hazards: MAX_HAZARDS,
            score_font_size: SCORE_FONT_SIZE,
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document. Keys absent from `contents` keep
    /// their defaults.
    pub fn from_toml_str(contents: &str) -> GameResult<Self> {
        let config: GameConfig = toml::from_str(contents).map_err(|e| GameError::ConfigParse {
            path: "<inline>".to_owned(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate the file at `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load_from_path(path: impl AsRef<Path>) -> GameResult<Option<Self>> {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(GameError::ConfigRead {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        Self::from_toml_str(&contents)
            .map(Some)
            .map_err(|err| match err {
                GameError::ConfigParse { message, .. } => GameError::ConfigParse {
                    path: path.display().to_string(),
                    message,
                },
                other => other,
            })
    }

    /// Check every value the game relies on.
    pub fn validate(&self) -> GameResult<()> {
        validate_positive("gravity", self.gravity)?;
        validate_positive("player_speed", self.player_speed)?;
        validate_positive("player_jump_speed", self.player_jump_speed)?;
        validate_unit_interval("player_bounce", self.player_bounce)?;

        validate_nonzero_count("star_count", self.star_count)?;
        validate_positive("star_spacing", self.star_spacing)?;
        validate_non_negative("star_start_x", self.star_start_x)?;
        validate_unit_interval("star_bounce_min", self.star_bounce_min)?;
        validate_unit_interval("star_bounce_max", self.star_bounce_max)?;
        if self.star_bounce_min > self.star_bounce_max {
            return Err(GameError::InvalidSetting {
                name: "star_bounce_min",
                value: self.star_bounce_min as f64,
                expected: "<= star_bounce_max",
            });
        }
        let last_star_x =
            self.star_start_x + self.star_spacing * (self.star_count.saturating_sub(1)) as f32;
        if last_star_x > ARENA_WIDTH {
            return Err(GameError::InvalidSetting {
                name: "star_spacing",
                value: self.star_spacing as f64,
                expected: "a star row that fits inside the arena width",
            });
        }

        validate_non_negative("bomb_spawn_y", self.bomb_spawn_y)?;
        validate_non_negative("bomb_drift_speed", self.bomb_drift_speed)?;
        validate_non_negative("bomb_fall_speed", self.bomb_fall_speed)?;
        validate_nonzero_count("max_hazards", self.max_hazards)?;

        validate_positive("score_font_size", self.score_font_size)?;
        Ok(())
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with the values found there.
///
/// Parse or validation errors are logged and the compiled defaults are kept.
/// A missing file is not an error.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    match GameConfig::load_from_path(CONFIG_PATH) {
        Ok(Some(loaded)) => {
            *config = loaded;
            info!("[config] Loaded game config from {CONFIG_PATH}");
        }
        Ok(None) => {
            info!("[config] No {CONFIG_PATH} found; using compiled defaults");
        }
        Err(e) => {
            warn!("[config] {e}; using compiled defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawn::SpawnPolicy;

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config = GameConfig::from_toml_str("star_count = 6\nmax_hazards = 8\n").unwrap();
        assert_eq!(config.star_count, 6);
        assert_eq!(config.max_hazards, 8);
        assert_eq!(config.gravity, GRAVITY);
        assert_eq!(config.points_per_star, POINTS_PER_STAR);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = GameConfig::from_toml_str("star_count = \"many\"").unwrap_err();
        assert!(matches!(err, GameError::ConfigParse { .. }));
    }

    #[test]
    fn inverted_bounce_range_is_rejected() {
        let err =
            GameConfig::from_toml_str("star_bounce_min = 0.9\nstar_bounce_max = 0.5\n").unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidSetting {
                name: "star_bounce_min",
                ..
            }
        ));
    }

    #[test]
    fn star_row_must_fit_the_arena() {
        let err = GameConfig::from_toml_str("star_count = 20\n").unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidSetting {
                name: "star_spacing",
                ..
            }
        ));
    }

    #[test]
    fn arena_size_is_not_configurable() {
        let config =
            GameConfig::from_toml_str("arena_width = 2000.0\narena_height = 900.0\n").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(SpawnPolicy::from_config(&config).arena_width, ARENA_WIDTH);
    }

    #[test]
    fn missing_file_yields_none() {
        let loaded = GameConfig::load_from_path("assets/definitely_not_here.toml").unwrap();
        assert!(loaded.is_none());
    }
}
