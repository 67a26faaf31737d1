use super::{Board, Mark};
use crate::error::GameError;

/// Where a game stands after the last applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Mark),
    Draw,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    pub fn winner(self) -> Option<Mark> {
        match self {
            GameStatus::Won(mark) => Some(mark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_mark: Mark,
    status: GameStatus,
}

impl GameState {
    /// Standard board, X to move
    pub fn initial() -> Self {
        GameState::new(Board::standard(), Mark::X)
    }

    /// Start from an arbitrary position. The status is derived from the board.
    pub fn new(board: Board, to_move: Mark) -> Self {
        let status = match board.winner() {
            Some(mark) => GameStatus::Won(mark),
            None if board.is_full() => GameStatus::Draw,
            None => GameStatus::InProgress,
        };
        GameState {
            board,
            current_mark: to_move,
            status,
        }
    }

    /// Mark whose turn it is
    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Playable columns; empty once the game is over
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_columns()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, GameError> {
        let mut next = self.clone();
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Apply a move in place. The turn flips only while the game continues.
    pub fn apply_move_mut(&mut self, column: usize) -> Result<GameStatus, GameError> {
        if self.is_terminal() {
            return Err(GameError::GameOver);
        }

        let row = self.board.drop(column, self.current_mark)?;

        if self.board.check_win_from(row, column) {
            self.status = GameStatus::Won(self.current_mark);
        } else if self.board.is_full() {
            self.status = GameStatus::Draw;
        } else {
            self.current_mark = self.current_mark.other();
        }

        Ok(self.status)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MoveError;
    use crate::game::Cell;

    /// Fills the standard board without ever completing a line.
    const DRAW_SEQUENCE: [usize; 42] = [
        0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 4, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4,
        5, 5, 5, 5, 5, 5, 6, 6, 6, 6, 6, 6,
    ];

    #[test]
    fn test_initial_state() {
        let state = GameState::initial();
        assert_eq!(state.current_mark(), Mark::X);
        assert!(!state.is_terminal());
        assert_eq!(state.status(), GameStatus::InProgress);
        assert_eq!(state.legal_columns().len(), 7);
    }

    #[test]
    fn test_apply_move() {
        let state = GameState::initial();
        let new_state = state.apply_move(3).unwrap();

        assert_eq!(new_state.current_mark(), Mark::O);
        assert_eq!(new_state.board().get(5, 3), Cell::X);
        // Original untouched
        assert_eq!(state.board().get(5, 3), Cell::Empty);
    }

    #[test]
    fn test_illegal_move_keeps_turn() {
        let mut state = GameState::initial();
        let err = state.apply_move_mut(9).unwrap_err();
        assert!(matches!(
            err,
            GameError::IllegalMove(MoveError::InvalidColumn { column: 9, .. })
        ));
        assert_eq!(state.current_mark(), Mark::X);
    }

    #[test]
    fn test_win_detection() {
        let mut state = GameState::initial();

        // X wins with horizontal line
        for col in 0..4 {
            state = state.apply_move(col).unwrap(); // X
            if col < 3 {
                state = state.apply_move(col).unwrap(); // O (different row)
            }
        }

        assert!(state.is_terminal());
        assert_eq!(state.status(), GameStatus::Won(Mark::X));
        assert_eq!(state.status().winner(), Some(Mark::X));
        assert!(state.legal_columns().is_empty());
    }

    #[test]
    fn test_draw() {
        let mut state = GameState::initial();

        for (i, &col) in DRAW_SEQUENCE.iter().enumerate() {
            assert!(!state.is_terminal(), "game ended early at move {i}");
            state.apply_move_mut(col).unwrap();
        }

        assert_eq!(state.status(), GameStatus::Draw);
        assert!(state.board().is_full());
    }

    #[test]
    fn test_move_after_game_over() {
        let mut state = GameState::initial();
        for _ in 0..3 {
            state.apply_move_mut(0).unwrap();
            state.apply_move_mut(1).unwrap();
        }
        assert_eq!(state.apply_move_mut(0).unwrap(), GameStatus::Won(Mark::X));
        assert!(matches!(state.apply_move_mut(2), Err(GameError::GameOver)));
        assert!(matches!(state.apply_move(2), Err(GameError::GameOver)));
    }

    #[test]
    fn test_new_derives_status() {
        let board = Board::from_diagram(&["X.", "XO"], 2).unwrap();
        let state = GameState::new(board, Mark::X);
        assert_eq!(state.status(), GameStatus::Won(Mark::X));
    }
}
