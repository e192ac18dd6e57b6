//! Error types for the configuration surface.
//!
//! The simulation itself cannot fail; only loading and saving settings can.

use std::fmt;

/// Top-level error enum
#[derive(Debug)]
pub enum GameError {
    /// Reading or writing a settings file failed.
    Io(std::io::Error),

    /// Settings JSON could not be parsed or produced.
    Parse(serde_json::Error),

    /// A setting is outside its accepted range.
    InvalidSetting {
        /// Field name (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io(e) => write!(f, "settings I/O failed: {}", e),
            GameError::Parse(e) => write!(f, "settings JSON invalid: {}", e),
            GameError::InvalidSetting {
                name,
                value,
                expected,
            } => write!(f, "setting '{}' = {} is outside {}", name, value, expected),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            GameError::Parse(e) => Some(e),
            GameError::InvalidSetting { .. } => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Parse(e)
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;
