use std::path::Path;

use log::warn;

use crate::ai::{MinimaxConfig, PlayerKind};
use crate::error::{BoardError, ConfigError};
use crate::game::{Board, COLS, CONNECT, ROWS};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub minimax: MinimaxConfig,
    pub players: PlayersConfig,
}

/// Board geometry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    /// Discs in a row needed to win
    pub connect: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: ROWS,
            cols: COLS,
            connect: CONNECT,
        }
    }
}

impl BoardConfig {
    /// Build an empty board with these dimensions.
    pub fn build(&self) -> Result<Board, BoardError> {
        Board::new(self.rows, self.cols, self.connect)
    }
}

/// Who sits at each side of the board.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub x: PlayerKind,
    pub o: PlayerKind,
    /// Seed for random players. Unset means seeded from the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            x: PlayerKind::Human,
            o: PlayerKind::Minimax,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board
            .build()
            .map_err(|e| ConfigError::Validation(format!("board: {e}")))?;

        if self.minimax.max_nodes == Some(0) {
            return Err(ConfigError::Validation(
                "minimax.max_nodes must be > 0 when set".into(),
            ));
        }
        if self.minimax.time_limit_ms == Some(0) {
            return Err(ConfigError::Validation(
                "minimax.time_limit_ms must be > 0 when set".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        // Plain structs of integers, booleans and unit enums always serialize
        toml::to_string_pretty(&AppConfig::default()).unwrap_or_default()
    }
}
