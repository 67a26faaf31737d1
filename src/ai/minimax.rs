use std::time::{Duration, Instant};

use log::debug;
use serde::{Deserialize, Serialize};

use super::heuristic::{Heuristic, HeuristicKind, Score};
use super::player::Player;
use super::search_node::{MoveOrder, SearchNode};
use crate::error::{PlayerError, SearchError};
use crate::game::{Board, GameState, GameStatus, Mark};

/// Score of a win found at the root. Wins found deeper score slightly less
/// when `prefer_faster_wins` is set.
pub const WIN_SCORE: Score = 1_000_000;

/// Static evaluations are clamped to this magnitude.
pub const HEURISTIC_LIMIT: Score = WIN_SCORE / 2;

/// How often (in visited nodes) the wall clock is consulted.
const CLOCK_CHECK_INTERVAL: u64 = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimaxConfig {
    /// Ply budget
    pub depth: usize,
    /// Alpha-beta pruning
    pub pruning: bool,
    pub heuristic: HeuristicKind,
    /// Expansion order below the root. The root always goes left to right.
    pub move_order: MoveOrder,
    /// Score wins found earlier higher (and losses found later higher).
    pub prefer_faster_wins: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit_ms: Option<u64>,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        MinimaxConfig {
            depth: 5,
            pruning: true,
            heuristic: HeuristicKind::Window,
            move_order: MoveOrder::CenterFirst,
            prefer_faster_wins: true,
            max_nodes: None,
            time_limit_ms: None,
        }
    }
}

/// Outcome of one search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub column: usize,
    pub score: Score,
    /// Backed-up score of each root column whose search completed. With
    /// pruning, columns other than the chosen one may carry an upper bound.
    /// When the budget runs out before any column completes, this holds only
    /// the lowest legal column with its partial score.
    pub column_scores: Vec<(usize, Score)>,
    pub nodes: u64,
    pub cutoffs: u64,
    /// The node or time budget ran out. The chosen column is the best among
    /// the root columns searched before that point.
    pub budget_exhausted: bool,
}

struct SearchContext {
    root_mark: Mark,
    nodes: u64,
    cutoffs: u64,
    max_nodes: Option<u64>,
    deadline: Option<Instant>,
    exhausted: bool,
}

impl SearchContext {
    fn new(root_mark: Mark, config: &MinimaxConfig) -> Self {
        SearchContext {
            root_mark,
            nodes: 0,
            cutoffs: 0,
            max_nodes: config.max_nodes,
            deadline: config
                .time_limit_ms
                .map(|ms| Instant::now() + Duration::from_millis(ms)),
            exhausted: false,
        }
    }

    /// Count a node. Returns false once the budget is spent.
    fn visit(&mut self) -> bool {
        self.nodes += 1;
        if self.exhausted {
            return false;
        }
        if self.max_nodes.is_some_and(|max| self.nodes >= max) {
            self.exhausted = true;
        }
        if let Some(deadline) = self.deadline {
            if self.nodes % CLOCK_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
                self.exhausted = true;
            }
        }
        !self.exhausted
    }
}

/// Depth-limited minimax with optional alpha-beta pruning.
pub struct MinimaxSearch {
    config: MinimaxConfig,
    heuristic: Box<dyn Heuristic>,
}

impl MinimaxSearch {
    pub fn new(config: MinimaxConfig) -> Self {
        let heuristic = config.heuristic.build();
        MinimaxSearch { config, heuristic }
    }

    pub fn with_heuristic(config: MinimaxConfig, heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxSearch { config, heuristic }
    }

    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }

    /// Best column for `mark` to play. The opponent is `mark.other()`.
    pub fn choose_move(&self, board: &Board, mark: Mark) -> Result<usize, SearchError> {
        self.search(board, mark).map(|report| report.column)
    }

    /// Search the position and report the chosen column with its statistics.
    ///
    /// Root columns are scanned left to right and only a strictly better score
    /// replaces the current best, so ties go to the lowest column whether or
    /// not pruning is enabled.
    pub fn search(&self, board: &Board, mark: Mark) -> Result<SearchReport, SearchError> {
        let legal = board.legal_columns();
        let first = *legal.first().ok_or(SearchError::NoLegalMove)?;
        let mut ctx = SearchContext::new(mark, &self.config);
        let mut root = SearchNode::root(board.clone(), mark);

        if self.config.depth == 0 {
            ctx.visit();
            let score = self.evaluate(board, mark);
            return Ok(SearchReport {
                column: first,
                score,
                column_scores: Vec::new(),
                nodes: ctx.nodes,
                cutoffs: 0,
                budget_exhausted: false,
            });
        }

        let mut alpha = Score::MIN;
        let mut best: Option<(usize, Score)> = None;

        for column in legal {
            let Ok(mut child) = root.child(column) else {
                continue;
            };

            if child.status() == GameStatus::Won(mark) {
                ctx.visit();
                let score = self.win_score(child.depth());
                child.set_score(score);
                root.attach(child);
                best = Some((column, score));
                break;
            }

            let score = self.minimax(&child, self.config.depth - 1, alpha, Score::MAX, &mut ctx);

            if ctx.exhausted {
                // A cut subtree never replaces a completed column
                if best.is_none() {
                    child.set_score(score);
                    root.attach(child);
                    best = Some((column, score));
                }
                break;
            }

            child.set_score(score);
            root.attach(child);

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((column, score));
            }
            if self.config.pruning {
                alpha = alpha.max(score);
            }
        }

        let (column, score) = best.ok_or(SearchError::NoLegalMove)?;
        root.set_score(score);

        let column_scores: Vec<(usize, Score)> = root
            .children()
            .iter()
            .filter_map(|child| Some((child.last_move()?, child.score()?)))
            .collect();

        debug!(
            "{mark} to move: column {column} (score {score}), {} nodes, {} cutoffs{}",
            ctx.nodes,
            ctx.cutoffs,
            if ctx.exhausted { ", budget exhausted" } else { "" }
        );

        Ok(SearchReport {
            column,
            score,
            column_scores,
            nodes: ctx.nodes,
            cutoffs: ctx.cutoffs,
            budget_exhausted: ctx.exhausted,
        })
    }

    fn minimax(
        &self,
        node: &SearchNode,
        remaining: usize,
        mut alpha: Score,
        mut beta: Score,
        ctx: &mut SearchContext,
    ) -> Score {
        let within_budget = ctx.visit();

        if let Some(score) = self.terminal_score(node, ctx.root_mark) {
            return score;
        }
        if remaining == 0 || !within_budget {
            return self.evaluate(node.board(), ctx.root_mark);
        }

        let maximizing = node.to_move() == ctx.root_mark;
        let mut best = if maximizing { Score::MIN } else { Score::MAX };

        for column in node.candidate_columns(self.config.move_order) {
            let Ok(child) = node.child(column) else {
                continue;
            };
            let score = self.minimax(&child, remaining - 1, alpha, beta, ctx);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if self.config.pruning && alpha >= beta {
                ctx.cutoffs += 1;
                break;
            }
        }

        best
    }

    fn terminal_score(&self, node: &SearchNode, root_mark: Mark) -> Option<Score> {
        match node.status() {
            GameStatus::Won(winner) => {
                let score = self.win_score(node.depth());
                Some(if winner == root_mark { score } else { -score })
            }
            GameStatus::Draw => Some(0),
            GameStatus::InProgress => None,
        }
    }

    fn win_score(&self, depth: usize) -> Score {
        if self.config.prefer_faster_wins {
            WIN_SCORE - depth as Score
        } else {
            WIN_SCORE
        }
    }

    fn evaluate(&self, board: &Board, mark: Mark) -> Score {
        self.heuristic
            .evaluate(board, mark)
            .clamp(-HEURISTIC_LIMIT, HEURISTIC_LIMIT)
    }
}

/// Computer player backed by [`MinimaxSearch`].
pub struct MinimaxPlayer {
    search: MinimaxSearch,
    last_report: Option<SearchReport>,
}

impl MinimaxPlayer {
    pub fn new(config: MinimaxConfig) -> Self {
        Self::with_search(MinimaxSearch::new(config))
    }

    pub fn with_search(search: MinimaxSearch) -> Self {
        MinimaxPlayer {
            search,
            last_report: None,
        }
    }

    /// Report of the most recent move selection
    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }
}

impl Player for MinimaxPlayer {
    fn select_move(&mut self, state: &GameState) -> Result<usize, PlayerError> {
        let report = self.search.search(state.board(), state.current_mark())?;
        let column = report.column;
        self.last_report = Some(report);
        Ok(column)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
