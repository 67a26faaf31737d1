use log::{debug, info};

use super::{GameState, GameStatus, Mark};
use crate::ai::Player;
use crate::error::GameError;

/// One applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub mark: Mark,
    pub column: usize,
    pub status: GameStatus,
}

/// A match between two players. X's player is asked first on the initial
/// position; afterwards turns strictly alternate.
pub struct Game {
    state: GameState,
    players: [Box<dyn Player>; 2],
    history: Vec<usize>,
}

fn seat(mark: Mark) -> usize {
    match mark {
        Mark::X => 0,
        Mark::O => 1,
    }
}

impl Game {
    /// Standard board, X to move
    pub fn new(x: Box<dyn Player>, o: Box<dyn Player>) -> Self {
        Self::from_state(GameState::initial(), x, o)
    }

    pub fn from_state(state: GameState, x: Box<dyn Player>, o: Box<dyn Player>) -> Self {
        Game {
            state,
            players: [x, o],
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    /// Columns applied so far, in order
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    pub fn player(&self, mark: Mark) -> &dyn Player {
        self.players[seat(mark)].as_ref()
    }

    /// Apply a column for the mark to move, bypassing the players.
    pub fn apply_move(&mut self, column: usize) -> Result<GameStatus, GameError> {
        let status = self.state.apply_move_mut(column)?;
        self.history.push(column);
        Ok(status)
    }

    /// Ask the player to move for its column and apply it.
    pub fn play_turn(&mut self) -> Result<Turn, GameError> {
        if self.state.is_terminal() {
            return Err(GameError::GameOver);
        }

        let mark = self.state.current_mark();
        let player = &mut self.players[seat(mark)];
        let column = player
            .select_move(&self.state)
            .map_err(|source| GameError::Player {
                name: player.name().to_string(),
                source,
            })?;
        debug!("{mark} ({}) plays column {column}", player.name());

        let status = self.apply_move(column)?;
        Ok(Turn {
            mark,
            column,
            status,
        })
    }

    /// Play until the game ends and return the final status.
    pub fn run(&mut self) -> Result<GameStatus, GameError> {
        while !self.state.is_terminal() {
            self.play_turn()?;
        }

        let status = self.status();
        match status {
            GameStatus::Won(mark) => info!(
                "{mark} ({}) wins after {} moves",
                self.player(mark).name(),
                self.history.len()
            ),
            _ => info!("draw after {} moves", self.history.len()),
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{HumanPlayer, MinimaxConfig, MinimaxPlayer, RandomPlayer, ScriptedInput};
    use crate::error::{MoveError, PlayerError};
    use crate::game::Board;

    /// Fills the standard board without ever completing a line.
    const DRAW_SEQUENCE: [i64; 42] = [
        0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 4, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4,
        5, 5, 5, 5, 5, 5, 6, 6, 6, 6, 6, 6,
    ];

    fn scripted(columns: impl IntoIterator<Item = i64>) -> Box<dyn Player> {
        Box::new(HumanPlayer::new(ScriptedInput::new(columns)))
    }

    /// Always answers the same column, legal or not.
    struct Stubborn(usize);

    impl Player for Stubborn {
        fn select_move(&mut self, _state: &GameState) -> Result<usize, PlayerError> {
            Ok(self.0)
        }

        fn name(&self) -> &str {
            "Stubborn"
        }
    }

    #[test]
    fn turns_alternate() {
        let mut game = Game::new(scripted([3, 3]), scripted([4, 4]));
        let first = game.play_turn().unwrap();
        let second = game.play_turn().unwrap();
        assert_eq!((first.mark, first.column), (Mark::X, 3));
        assert_eq!((second.mark, second.column), (Mark::O, 4));
        assert_eq!(game.state().current_mark(), Mark::X);
        assert_eq!(game.history(), &[3, 4]);
    }

    #[test]
    fn scripted_win() {
        let mut game = Game::new(scripted([0, 1, 2, 3]), scripted([0, 1, 2]));
        assert_eq!(game.run().unwrap(), GameStatus::Won(Mark::X));
        assert_eq!(game.history().len(), 7);
        assert_eq!(game.player(Mark::X).name(), "Human");
    }

    #[test]
    fn scripted_draw() {
        let x: Vec<i64> = DRAW_SEQUENCE.iter().step_by(2).copied().collect();
        let o: Vec<i64> = DRAW_SEQUENCE.iter().skip(1).step_by(2).copied().collect();
        let mut game = Game::new(scripted(x), scripted(o));
        assert_eq!(game.run().unwrap(), GameStatus::Draw);
        assert!(game.state().board().is_full());
    }

    #[test]
    fn last_move_into_full_board_is_a_draw() {
        let board = Board::from_diagram(
            &[
                "OOOXOO.", "XXXOXXX", "OOOXOOO", "XXXOXXX", "OOOXOOO", "XXXOXXX",
            ],
            4,
        )
        .unwrap();
        let state = GameState::new(board, Mark::O);
        let mut game = Game::from_state(
            state,
            Box::new(RandomPlayer::seeded(0)),
            Box::new(MinimaxPlayer::new(MinimaxConfig::default())),
        );

        let turn = game.play_turn().unwrap();
        assert_eq!(turn.column, 6);
        assert_eq!(turn.status, GameStatus::Draw);

        // Nobody may move after the end
        assert!(matches!(game.play_turn(), Err(GameError::GameOver)));
        assert!(matches!(game.apply_move(0), Err(GameError::GameOver)));
    }

    #[test]
    fn move_after_win_fails() {
        let mut game = Game::new(scripted([0, 1, 2, 3]), scripted([0, 1, 2]));
        game.run().unwrap();
        assert!(matches!(game.apply_move(5), Err(GameError::GameOver)));
        assert!(matches!(game.run(), Ok(GameStatus::Won(Mark::X))));
    }

    #[test]
    fn illegal_player_choice_aborts() {
        let mut game = Game::new(Box::new(Stubborn(9)), scripted([0]));
        let err = game.play_turn().unwrap_err();
        assert!(matches!(
            err,
            GameError::IllegalMove(MoveError::InvalidColumn { column: 9, .. })
        ));
        assert!(game.history().is_empty());
    }

    #[test]
    fn player_failure_names_the_player() {
        let mut game = Game::new(scripted(Vec::new()), scripted(Vec::new()));
        match game.play_turn() {
            Err(GameError::Player { name, source }) => {
                assert_eq!(name, "Human");
                assert!(matches!(source, PlayerError::InputClosed));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn minimax_against_random_finishes() {
        let mut game = Game::new(
            Box::new(MinimaxPlayer::new(MinimaxConfig {
                depth: 3,
                ..MinimaxConfig::default()
            })),
            Box::new(RandomPlayer::seeded(11)),
        );
        let status = game.run().unwrap();
        assert!(status.is_terminal());
        let board = game.state().board();
        assert_eq!(board.disc_count(), game.history().len());
    }
}
