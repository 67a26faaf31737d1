use serde::{Deserialize, Serialize};

use crate::game::{Board, Cell, Mark};

/// Score type shared by heuristics and the search.
pub type Score = i32;

/// Trait for evaluating a board position from a mark's perspective.
///
/// Implementations must be deterministic and bounded; the search clamps
/// their output well below terminal scores regardless.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, mark: Mark) -> Score;

    fn name(&self) -> &str;
}

/// Selects one of the shipped heuristics by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HeuristicKind {
    #[default]
    Window,
    Runs,
}

impl HeuristicKind {
    pub fn build(self) -> Box<dyn Heuristic> {
        match self {
            HeuristicKind::Window => Box::new(WindowHeuristic),
            HeuristicKind::Runs => Box::new(RunHeuristic),
        }
    }
}

fn center_column(board: &Board) -> usize {
    board.cols() / 2
}

/// Scans every window of `connect` cells and scores threats, plus a
/// center-column bonus.
pub struct WindowHeuristic;

impl WindowHeuristic {
    fn score_window(own: usize, opp: usize, empty: usize, connect: usize) -> Score {
        let near = connect.saturating_sub(1);
        let building = connect.saturating_sub(2);
        if near > 0 && own == near && empty == 1 {
            50
        } else if building > 0 && own == building && empty == 2 {
            10
        } else if near > 0 && opp == near && empty == 1 {
            -80
        } else if building > 0 && opp == building && empty == 2 {
            -10
        } else {
            0
        }
    }
}

impl Heuristic for WindowHeuristic {
    fn evaluate(&self, board: &Board, mark: Mark) -> Score {
        let own_cell = mark.to_cell();
        let opp_cell = mark.other().to_cell();
        let connect = board.connect();
        let mut score = 0;

        // Center column bonus
        let center = center_column(board);
        for row in 0..board.rows() {
            let cell = board.get(row, center);
            if cell == own_cell {
                score += 3;
            } else if cell == opp_cell {
                score -= 3;
            }
        }

        for line in board.lines(connect) {
            for window in line.windows(connect) {
                let mut own = 0;
                let mut opp = 0;
                let mut empty = 0;
                for &cell in window {
                    match cell {
                        c if c == own_cell => own += 1,
                        c if c == opp_cell => opp += 1,
                        _ => empty += 1,
                    }
                }
                score += Self::score_window(own, opp, empty, connect);
            }
        }

        score
    }

    fn name(&self) -> &str {
        "window"
    }
}

/// Bounded stand-in for a completed line when the position is already won.
const COMPLETED_RUN: Score = 10_000;

/// Rewards every run of discs that can still grow into a win by the square of
/// its length, once per open side. Opponent runs count negatively. Own discs
/// in the lower half of the center column add a small bonus.
pub struct RunHeuristic;

impl Heuristic for RunHeuristic {
    fn evaluate(&self, board: &Board, mark: Mark) -> Score {
        let connect = board.connect();
        let mut score: Score = 0;

        for line in board.lines(connect) {
            let runs = group_runs(&line);
            for (i, &(cell, len)) in runs.iter().enumerate() {
                let sign = match cell.mark() {
                    Some(m) if m == mark => 1,
                    Some(_) => -1,
                    None => continue,
                };
                if len >= connect {
                    return sign * COMPLETED_RUN;
                }

                let open = |neighbour: Option<&(Cell, usize)>| match neighbour {
                    Some(&(Cell::Empty, gap)) => len + gap >= connect,
                    _ => false,
                };
                let sides = Score::from(i > 0 && open(runs.get(i - 1)))
                    + Score::from(open(runs.get(i + 1)));
                let len = len as Score;
                score += sign * sides * len * len;
            }
        }

        let center = center_column(board);
        let own_cell = mark.to_cell();
        for offset in 1..board.rows() / 2 {
            if board.get(board.rows() - offset, center) == own_cell {
                score += 1;
            }
        }

        score
    }

    fn name(&self) -> &str {
        "runs"
    }
}

/// Collapse a line into (cell, run length) pairs.
fn group_runs(line: &[Cell]) -> Vec<(Cell, usize)> {
    let mut runs: Vec<(Cell, usize)> = Vec::new();
    for &cell in line {
        match runs.last_mut() {
            Some((last, len)) if *last == cell => *len += 1,
            _ => runs.push((cell, 1)),
        }
    }
    runs
}
