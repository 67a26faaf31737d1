use serde::{Deserialize, Serialize};

use super::heuristic::Score;
use crate::error::MoveError;
use crate::game::{Board, GameStatus, Mark};

/// Order in which a node's children are expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MoveOrder {
    LeftToRight,
    /// Center columns first, which tends to produce earlier cutoffs.
    #[default]
    CenterFirst,
}

impl MoveOrder {
    /// Reorder ascending columns. Ties keep the leftmost column first.
    pub fn arrange(self, mut columns: Vec<usize>, cols: usize) -> Vec<usize> {
        if self == MoveOrder::CenterFirst {
            // Distance to the center, doubled so even widths stay integral
            let doubled_center = cols as isize - 1;
            columns.sort_by_key(|&c| (2 * c as isize - doubled_center).abs());
        }
        columns
    }
}

/// One position reached during lookahead.
///
/// A node owns its own board snapshot, so siblings never share mutable
/// state. Instead of a back-reference to its parent, a node carries the full
/// line of columns played from the search root.
#[derive(Debug, Clone)]
pub struct SearchNode {
    board: Board,
    to_move: Mark,
    line: Vec<usize>,
    status: GameStatus,
    score: Option<Score>,
    children: Vec<SearchNode>,
}

impl SearchNode {
    /// Root of a search. It is only terminal when the board is full.
    pub fn root(board: Board, to_move: Mark) -> Self {
        let status = if board.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        };
        SearchNode {
            board,
            to_move,
            line: Vec::new(),
            status,
            score: None,
            children: Vec::new(),
        }
    }

    /// The node reached by the mark to move playing `column`.
    pub fn child(&self, column: usize) -> Result<SearchNode, MoveError> {
        let mut board = self.board.clone();
        let row = board.drop(column, self.to_move)?;
        let status = if board.check_win_from(row, column) {
            GameStatus::Won(self.to_move)
        } else if board.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        };

        let mut line = Vec::with_capacity(self.line.len() + 1);
        line.extend_from_slice(&self.line);
        line.push(column);

        Ok(SearchNode {
            board,
            to_move: self.to_move.other(),
            line,
            status,
            score: None,
            children: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Plies from the root
    pub fn depth(&self) -> usize {
        self.line.len()
    }

    /// Column that produced this node; `None` at the root
    pub fn last_move(&self) -> Option<usize> {
        self.line.last().copied()
    }

    /// Columns played from the root to reach this node
    pub fn line(&self) -> &[usize] {
        &self.line
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn score(&self) -> Option<Score> {
        self.score
    }

    pub fn set_score(&mut self, score: Score) {
        self.score = Some(score);
    }

    /// Legal continuations in expansion order; none for terminal nodes.
    pub fn candidate_columns(&self, order: MoveOrder) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        order.arrange(self.board.legal_columns(), self.board.cols())
    }

    /// Keep a scored child.
    pub fn attach(&mut self, child: SearchNode) {
        debug_assert_eq!(child.depth(), self.depth() + 1);
        debug_assert_eq!(&child.line[..self.line.len()], &self.line[..]);
        self.children.push(child);
    }

    pub fn children(&self) -> &[SearchNode] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_first_order_matches_classic_board() {
        let columns = MoveOrder::CenterFirst.arrange((0..7).collect(), 7);
        assert_eq!(columns, vec![3, 2, 4, 1, 5, 0, 6]);
    }

    #[test]
    fn center_first_order_even_width() {
        let columns = MoveOrder::CenterFirst.arrange((0..6).collect(), 6);
        assert_eq!(columns, vec![2, 3, 1, 4, 0, 5]);
    }

    #[test]
    fn left_to_right_keeps_order() {
        let columns = MoveOrder::LeftToRight.arrange(vec![0, 2, 5], 7);
        assert_eq!(columns, vec![0, 2, 5]);
    }

    #[test]
    fn root_has_no_move() {
        let root = SearchNode::root(Board::standard(), Mark::X);
        assert_eq!(root.depth(), 0);
        assert_eq!(root.last_move(), None);
        assert_eq!(root.status(), GameStatus::InProgress);
        assert_eq!(root.score(), None);
    }

    #[test]
    fn child_depth_and_line() {
        let root = SearchNode::root(Board::standard(), Mark::X);
        let child = root.child(3).unwrap();
        let grandchild = child.child(4).unwrap();

        assert_eq!(child.depth(), 1);
        assert_eq!(child.to_move(), Mark::O);
        assert_eq!(grandchild.depth(), 2);
        assert_eq!(grandchild.line(), &[3, 4]);
        assert_eq!(grandchild.last_move(), Some(4));
        assert_eq!(grandchild.to_move(), Mark::X);
    }

    #[test]
    fn child_does_not_touch_parent_board() {
        let root = SearchNode::root(Board::standard(), Mark::X);
        let _child = root.child(2).unwrap();
        assert_eq!(root.board().disc_count(), 0);
    }

    #[test]
    fn child_detects_win() {
        let board = Board::from_diagram(
            &[
                ".......", ".......", ".......", ".......", "OOO....", "XXX....",
            ],
            4,
        )
        .unwrap();
        let root = SearchNode::root(board, Mark::X);
        let child = root.child(3).unwrap();
        assert_eq!(child.status(), GameStatus::Won(Mark::X));
        assert!(child.candidate_columns(MoveOrder::LeftToRight).is_empty());
    }

    #[test]
    fn child_of_full_column_fails() {
        let board = Board::from_diagram(&["X.", "O.", "X."], 3).unwrap();
        let root = SearchNode::root(board, Mark::O);
        assert_eq!(root.child(0).unwrap_err(), MoveError::ColumnFull(0));
        assert_eq!(root.candidate_columns(MoveOrder::CenterFirst), vec![1]);
    }

    #[test]
    fn full_root_is_a_draw() {
        let board = Board::from_diagram(&["XO", "OX"], 2).unwrap();
        let root = SearchNode::root(board, Mark::X);
        assert!(root.is_terminal());
        assert!(root.candidate_columns(MoveOrder::LeftToRight).is_empty());
    }

    #[test]
    fn attach_keeps_children() {
        let mut root = SearchNode::root(Board::standard(), Mark::O);
        for column in [0, 6] {
            let mut child = root.child(column).unwrap();
            child.set_score(column as Score);
            root.attach(child);
        }
        let scores: Vec<_> = root.children().iter().map(|c| c.score()).collect();
        assert_eq!(scores, vec![Some(0), Some(6)]);
    }
}
