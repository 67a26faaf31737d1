use std::collections::VecDeque;

use log::debug;

use super::player::Player;
use crate::error::{MoveError, PlayerError};
use crate::game::{Board, GameState};

/// Source of raw column choices for a human player.
///
/// Parsing text (and any 1-based numbering shown to the user) is the
/// implementor's business; the values returned here are 0-based but not yet
/// validated.
pub trait MoveInput {
    /// Next raw column, or `None` when no more input will arrive.
    fn read_column(&mut self, state: &GameState) -> Result<Option<i64>, PlayerError>;

    /// Called when a value returned by `read_column` cannot be played.
    fn reject(&mut self, _raw: i64, _reason: &MoveError) {}
}

/// A player whose moves come from a [`MoveInput`], re-prompting until a legal
/// column arrives.
pub struct HumanPlayer<I> {
    input: I,
    name: String,
}

impl<I: MoveInput> HumanPlayer<I> {
    pub fn new(input: I) -> Self {
        HumanPlayer {
            input,
            name: "Human".to_string(),
        }
    }

    pub fn with_name(input: I, name: impl Into<String>) -> Self {
        HumanPlayer {
            input,
            name: name.into(),
        }
    }

    pub fn input(&self) -> &I {
        &self.input
    }
}

/// Check a raw input value against the board.
pub fn validate_column(board: &Board, raw: i64) -> Result<usize, MoveError> {
    let column = usize::try_from(raw)
        .ok()
        .filter(|&c| c < board.cols())
        .ok_or(MoveError::InvalidColumn {
            column: raw,
            cols: board.cols(),
        })?;
    if board.is_column_full(column) {
        return Err(MoveError::ColumnFull(column));
    }
    Ok(column)
}

impl<I: MoveInput> Player for HumanPlayer<I> {
    fn select_move(&mut self, state: &GameState) -> Result<usize, PlayerError> {
        loop {
            let raw = self
                .input
                .read_column(state)?
                .ok_or(PlayerError::InputClosed)?;
            match validate_column(state.board(), raw) {
                Ok(column) => return Ok(column),
                Err(reason) => {
                    debug!("{} rejected input {raw}: {reason}", self.name);
                    self.input.reject(raw, &reason);
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Replays a fixed list of columns, recording every rejection.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    columns: VecDeque<i64>,
    rejected: Vec<(i64, MoveError)>,
}

impl ScriptedInput {
    pub fn new(columns: impl IntoIterator<Item = i64>) -> Self {
        ScriptedInput {
            columns: columns.into_iter().collect(),
            rejected: Vec::new(),
        }
    }

    pub fn rejected(&self) -> &[(i64, MoveError)] {
        &self.rejected
    }

    pub fn remaining(&self) -> usize {
        self.columns.len()
    }
}

impl MoveInput for ScriptedInput {
    fn read_column(&mut self, _state: &GameState) -> Result<Option<i64>, PlayerError> {
        Ok(self.columns.pop_front())
    }

    fn reject(&mut self, raw: i64, reason: &MoveError) {
        self.rejected.push((raw, reason.clone()));
    }
}
