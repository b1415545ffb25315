//! Application configuration loaded from TOML.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::ConfigError;

/// Board dimensions and the bound on the standing retry.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    /// Extra single attempts allowed to end on a standing block.
    pub standing_retry_limit: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: 20,
            cols: 20,
            standing_retry_limit: 1_000,
        }
    }
}

/// Settings for the batch level generator.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of games to generate.
    pub levels: usize,
    /// Roll attempts per game.
    pub moves: usize,
    pub require_standing: bool,
    /// Levels scoring below this are discarded.
    pub min_score: f64,
    /// Fixed RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Directory receiving `levels.txt` and `levels.bin`.
    pub output_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            levels: 100,
            moves: 20,
            require_standing: true,
            min_score: 0.7,
            seed: None,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub generator: GeneratorConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.rows < 3 {
            return Err(ConfigError::Validation("board.rows must be >= 3".into()));
        }
        if self.board.cols < 3 {
            return Err(ConfigError::Validation("board.cols must be >= 3".into()));
        }
        // cells are addressed with i32 coordinates
        if self.board.rows > i32::MAX as usize || self.board.cols > i32::MAX as usize {
            return Err(ConfigError::Validation(
                "board dimensions must fit in i32".into(),
            ));
        }
        if self.board.standing_retry_limit == 0 {
            return Err(ConfigError::Validation(
                "board.standing_retry_limit must be > 0".into(),
            ));
        }
        if self.generator.levels == 0 {
            return Err(ConfigError::Validation(
                "generator.levels must be > 0".into(),
            ));
        }
        if self.generator.moves == 0 {
            return Err(ConfigError::Validation(
                "generator.moves must be > 0".into(),
            ));
        }
        if !self.generator.min_score.is_finite() || self.generator.min_score < 0.0 {
            return Err(ConfigError::Validation(
                "generator.min_score must be a finite value >= 0".into(),
            ));
        }
        Ok(())
    }
}
