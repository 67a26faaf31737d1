//! Players and the minimax search behind the computer opponent.

mod heuristic;
mod human;
mod minimax;
mod player;
mod random;
mod search_node;

pub use heuristic::{Heuristic, HeuristicKind, RunHeuristic, Score, WindowHeuristic};
pub use human::{validate_column, HumanPlayer, MoveInput, ScriptedInput};
pub use minimax::{
    MinimaxConfig, MinimaxPlayer, MinimaxSearch, SearchReport, HEURISTIC_LIMIT, WIN_SCORE,
};
pub use player::{Player, PlayerKind};
pub use random::RandomPlayer;
pub use search_node::{MoveOrder, SearchNode};

/// Build a computer player. Returns `None` for [`PlayerKind::Human`], which
/// needs an input source.
///
/// Random players are seeded from `seed` when given, otherwise from the OS.
pub fn build_computer_player(
    kind: PlayerKind,
    minimax: &MinimaxConfig,
    seed: Option<u64>,
) -> Option<Box<dyn Player>> {
    match kind {
        PlayerKind::Human => None,
        PlayerKind::Random => Some(Box::new(match seed {
            Some(seed) => RandomPlayer::seeded(seed),
            None => RandomPlayer::from_entropy(),
        })),
        PlayerKind::Minimax => Some(Box::new(MinimaxPlayer::new(minimax.clone()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_computer_players_only() {
        let config = MinimaxConfig::default();
        assert!(build_computer_player(PlayerKind::Human, &config, None).is_none());
        let random = build_computer_player(PlayerKind::Random, &config, Some(1)).unwrap();
        assert_eq!(random.name(), "Random");
        let minimax = build_computer_player(PlayerKind::Minimax, &config, None).unwrap();
        assert_eq!(minimax.name(), "Minimax");
    }

    #[test]
    fn builds_exactly_the_computer_kinds() {
        let config = MinimaxConfig::default();
        for kind in [PlayerKind::Human, PlayerKind::Random, PlayerKind::Minimax] {
            assert_eq!(
                build_computer_player(kind, &config, Some(0)).is_some(),
                kind.is_computer(),
                "{kind:?}"
            );
        }
    }
}
