use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::player::Player;
use crate::error::PlayerError;
use crate::game::GameState;

/// A player that selects uniformly at random from legal columns.
///
/// The generator is owned by the player and supplied by the caller, so a
/// seeded player always replays the same game against the same opponent.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(rng: StdRng) -> Self {
        RandomPlayer { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl Player for RandomPlayer {
    fn select_move(&mut self, state: &GameState) -> Result<usize, PlayerError> {
        let columns = state.legal_columns();
        if columns.is_empty() {
            return Err(PlayerError::NoLegalMove);
        }
        let idx = self.rng.random_range(0..columns.len());
        Ok(columns[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Mark};

    #[test]
    fn test_random_player_selects_legal_action() {
        let mut player = RandomPlayer::seeded(7);
        let mut board = Board::standard();
        for _ in 0..3 {
            board.drop(2, Mark::X).unwrap();
            board.drop(2, Mark::O).unwrap();
        }
        let state = GameState::new(board, Mark::X);
        let legal = state.legal_columns();

        for _ in 0..100 {
            let action = player.select_move(&state).unwrap();
            assert!(legal.contains(&action), "Action {} is not legal", action);
        }
    }

    #[test]
    fn test_same_seed_same_choices() {
        let state = GameState::initial();
        let mut a = RandomPlayer::seeded(42);
        let mut b = RandomPlayer::seeded(42);
        let picks_a: Vec<usize> = (0..20).map(|_| a.select_move(&state).unwrap()).collect();
        let picks_b: Vec<usize> = (0..20).map(|_| b.select_move(&state).unwrap()).collect();
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn test_covers_every_column() {
        let state = GameState::initial();
        let mut player = RandomPlayer::seeded(3);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[player.select_move(&state).unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_random_player_plays_full_game() {
        let mut player1 = RandomPlayer::seeded(1);
        let mut player2 = RandomPlayer::seeded(2);
        let mut state = GameState::initial();

        let mut turn = 0;
        while !state.is_terminal() {
            let action = if turn % 2 == 0 {
                player1.select_move(&state).unwrap()
            } else {
                player2.select_move(&state).unwrap()
            };
            state = state.apply_move(action).unwrap();
            turn += 1;
        }

        assert!(state.is_terminal());
    }

    #[test]
    fn test_no_legal_move() {
        let board = Board::from_diagram(&["XO", "OX"], 2).unwrap();
        let state = GameState::new(board, Mark::X);
        let mut player = RandomPlayer::seeded(0);
        assert!(matches!(
            player.select_move(&state),
            Err(PlayerError::NoLegalMove)
        ));
        assert_eq!(player.name(), "Random");
    }
}
