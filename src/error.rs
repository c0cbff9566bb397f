//! Game-specific error types.
//!
//! Nominal play has no recoverable failures: contract violations in the
//! encounter core are assertions. The errors here come from the ambient layer,
//! mostly loading and validating `assets/game.toml`, and are logged by the
//! caller so the game can fall back to compiled defaults.
//!
//! ## Usage
//!
//! ```rust
//! use star_catcher::error::{validate_positive, GameResult};
//!
//! fn check(gravity: f32) -> GameResult<()> {
//!     validate_positive("gravity", gravity)?;
//!     Ok(())
//! }
//! # assert!(check(300.0).is_ok());
//! ```

use std::fmt;

/// Top-level error enum for the game.
#[derive(Debug)]
pub enum GameError {
    /// The configuration file exists but could not be read.
    ConfigRead {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::GameConfig`].
    ConfigParse {
        /// Path (or `"<inline>"` for strings) that failed to parse.
        path: String,
        /// Parser message.
        message: String,
    },

    /// A setting parsed correctly but is outside its usable range.
    InvalidSetting {
        /// Name of the setting (matches the TOML key).
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::ConfigRead { path, source } => {
                write!(f, "failed to read config '{}': {}", path, source)
            }
            GameError::ConfigParse { path, message } => {
                write!(f, "failed to parse config '{}': {}", path, message)
            }
            GameError::InvalidSetting {
                name,
                value,
                expected,
            } => write!(
                f,
                "setting '{}' = {} is outside accepted range {}",
                name, value, expected
            ),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::ConfigRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is finite and strictly positive.
pub fn validate_positive(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidSetting {
            name,
            value: value as f64,
            expected: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is finite and not negative.
pub fn validate_non_negative(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidSetting {
            name,
            value: value as f64,
            expected: "[0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is a restitution coefficient in `[0, 1]`.
pub fn validate_unit_interval(name: &'static str, value: f32) -> GameResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GameError::InvalidSetting {
            name,
            value: value as f64,
            expected: "[0.0, 1.0]",
        })
    }
}

/// Returns an error when a count that must be at least one is zero.
pub fn validate_nonzero_count(name: &'static str, value: usize) -> GameResult<()> {
    if value == 0 {
        Err(GameError::InvalidSetting {
            name,
            value: 0.0,
            expected: "[1, ∞)",
        })
    } else {
        Ok(())
    }
}
