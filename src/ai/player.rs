use serde::{Deserialize, Serialize};

use crate::error::PlayerError;
use crate::game::GameState;

/// Universal interface for everything that can take a seat at the board.
pub trait Player {
    /// Choose a column for the mark to move in `state`.
    /// The returned column must be one of `state.legal_columns()`.
    fn select_move(&mut self, state: &GameState) -> Result<usize, PlayerError>;

    /// Return the player's display name.
    fn name(&self) -> &str;
}

/// Player variants selectable from configuration and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerKind {
    Human,
    Random,
    Minimax,
}

impl PlayerKind {
    pub fn is_computer(self) -> bool {
        !matches!(self, PlayerKind::Human)
    }
}
