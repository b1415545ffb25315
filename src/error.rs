//! Structured error types.

use std::path::PathBuf;

use crate::engine::Move;
use crate::footprint::Cell;

/// Errors raised while rolling the block or generating a level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BloxError {
    #[error("illegal move {direction:?}: block would leave the board")]
    IllegalMove { direction: Move },

    #[error("footprint must cover at least one cell")]
    EmptyFootprint,

    #[error("invalid footprint {cells:?}: expected one cell or two adjacent cells")]
    InvalidFootprint { cells: Vec<Cell> },

    #[error("generation stalled: block not standing after {attempts} extra attempts")]
    GenerationStalled { attempts: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that can occur while saving or loading levels.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt level file: {reason}")]
    Corrupt { reason: String },

    #[error("saved level does not replay: {0}")]
    Replay(#[from] BloxError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_move_display() {
        let err = BloxError::IllegalMove {
            direction: Move::Up,
        };
        assert_eq!(err.to_string(), "illegal move Up: block would leave the board");
    }

    #[test]
    fn test_invalid_footprint_display() {
        let err = BloxError::InvalidFootprint {
            cells: vec![(1, 1), (3, 3)],
        };
        assert_eq!(
            err.to_string(),
            "invalid footprint [(1, 1), (3, 3)]: expected one cell or two adjacent cells"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("board.rows must be >= 3".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: board.rows must be >= 3"
        );
    }
}
