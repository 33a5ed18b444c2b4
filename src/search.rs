//! Depth-limited minimax with alpha-beta pruning for the computer side

use log::{debug, info};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use rayon::prelude::*;

use std::sync::atomic::{AtomicI32, Ordering};
use std::time::{Duration, Instant};

use crate::{
    board::{Board, Piece},
    config::SearchConfig,
    error::ConfigError,
    evaluator::{score_board, DiagonalMode},
};

/// Score of a position the computer has won, regardless of the ply it was won at
pub const WIN_SCORE: i32 = 100_000;

/// Score of a full board with no winner
pub const DRAW_SCORE: i32 = 0;

/// The outcome of a root search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Chosen column, `None` only when the searched board was already terminal
    pub column: Option<usize>,
    pub score: i32,
    /// Nodes visited during this search (for diagnostics only)
    pub nodes: usize,
    pub elapsed: Duration,
    /// Whether the deadline cut the search short
    pub timed_out: bool,
}

/// Value of a node the search does not expand, from the computer's point of view
///
/// Wins and draws get fixed scores, any other position is scored by the
/// static evaluator.
pub fn leaf_score(board: &Board, mode: DiagonalMode) -> i32 {
    if board.has_four_in_a_row(Piece::Computer) {
        WIN_SCORE
    } else if board.has_four_in_a_row(Piece::Human) {
        -WIN_SCORE
    } else if board.is_full() {
        DRAW_SCORE
    } else {
        score_board(board, Piece::Computer, mode)
    }
}

/// An agent choosing the computer's moves
///
/// # Notes
/// The computer is always the maximizing side and the human the minimizing
/// side. Every branch of the tree works on its own copy of the board.
///
/// Candidate columns are always tried in ascending order. Each expanded node
/// starts from a column drawn at random among the legal ones, which the first
/// evaluated move replaces, so results are reproducible for a given seed.
/// The parallel root picks the same column as the sequential search: the
/// lowest column reaching the best score.
#[derive(Clone)]
pub struct Searcher {
    config: SearchConfig,
    rng: StdRng,

    /// The number of nodes searched by this `Searcher` so far (for diagnostics only)
    pub node_count: usize,
    deadline: Option<Instant>,
    timed_out: bool,
}

impl Searcher {
    /// Creates a new `Searcher`, seeding its RNG from the config or the OS
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Creates a new `Searcher` with an explicit tie-break RNG
    pub fn with_rng(config: SearchConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            node_count: 0,
            deadline: None,
            timed_out: false,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Performs game tree search
    ///
    /// Returns the best column for the side to move (`None` at leaf and
    /// terminal nodes) along with the score of the position.
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (Option<usize>, i32) {
        self.node_count += 1;

        if depth == 0 || board.is_terminal() {
            return (None, leaf_score(board, self.config.diagonal_mode));
        }

        let valid_columns = board.valid_columns();
        let mut best_column = valid_columns.choose(&mut self.rng).copied();

        if maximizing {
            let mut value = i32::MIN;
            for (column, child) in board.children(Piece::Computer) {
                let score = self.search_child(&child, depth, alpha, beta, true);
                if score > value {
                    value = score;
                    best_column = Some(column);
                }
                alpha = alpha.max(value);
                if alpha >= beta {
                    break;
                }
            }
            (best_column, value)
        } else {
            let mut value = i32::MAX;
            for (column, child) in board.children(Piece::Human) {
                let score = self.search_child(&child, depth, alpha, beta, false);
                if score < value {
                    value = score;
                    best_column = Some(column);
                }
                beta = beta.min(value);
                if alpha >= beta {
                    break;
                }
            }
            (best_column, value)
        }
    }

    // scores `child` one ply below a node of `depth`, unless the deadline has passed
    fn search_child(
        &mut self,
        child: &Board,
        depth: usize,
        alpha: i32,
        beta: i32,
        maximizing: bool,
    ) -> i32 {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.timed_out = true;
                self.node_count += 1;
                return leaf_score(child, self.config.diagonal_mode);
            }
        }
        self.minimax(child, depth - 1, alpha, beta, !maximizing).1
    }

    /// Searches the first-move candidates in parallel, sharing alpha between them
    fn parallel_top_level_search(&mut self, board: &Board) -> (Option<usize>, i32) {
        let depth = self.config.depth;
        self.node_count += 1;

        if board.is_terminal() {
            return (None, leaf_score(board, self.config.diagonal_mode));
        }

        let default_column = board.valid_columns().choose(&mut self.rng).copied();

        // seeds are drawn in column order so the branches stay reproducible
        let mut branches = Vec::new();
        for (column, child) in board.children(Piece::Computer) {
            let mut next = self.clone();
            next.node_count = 0;
            next.rng = StdRng::seed_from_u64(self.rng.gen());
            branches.push((column, child, next));
        }

        let alpha = AtomicI32::new(i32::MIN);
        let results: Vec<(usize, Board, Searcher, i32, bool)> = branches
            .into_par_iter()
            .map(|(column, child, mut next)| {
                let floor = alpha.load(Ordering::Acquire);
                let score = next.search_child(&child, depth, floor, i32::MAX, true);
                alpha.fetch_max(score, Ordering::AcqRel);
                debug!("column {}: score {} ({} nodes)", column, score, next.node_count);
                // a score at or below the loaded alpha is only an upper bound
                (column, child, next, score, score > floor)
            })
            .collect();

        // alpha is only ever raised by exact scores, so the best exact score is the root value
        let target = results
            .iter()
            .filter(|&&(_, _, _, _, exact)| exact)
            .map(|&(_, _, _, score, _)| score)
            .max()
            .unwrap_or(i32::MIN);

        let mut best_score = i32::MIN;
        let mut best_column = default_column;
        for (column, child, mut next, score, exact) in results {
            // bounds that tie the root value are searched again to learn whether they reach it
            let score = if !exact && score >= target {
                next.search_child(&child, depth, target.saturating_sub(1), i32::MAX, true)
            } else {
                score
            };
            self.node_count += next.node_count;
            self.timed_out |= next.timed_out;
            if score > best_score {
                best_score = score;
                best_column = Some(column);
            }
        }

        (best_column, best_score)
    }

    /// Calculates the computer's best column on `board`
    pub fn best_move(&mut self, board: &Board) -> SearchResult {
        let start = Instant::now();
        self.node_count = 0;
        self.timed_out = false;
        self.deadline = self.config.time_limit.map(|limit| start + limit);

        let (column, score) = if self.config.parallel {
            self.parallel_top_level_search(board)
        } else {
            let depth = self.config.depth;
            self.minimax(board, depth, i32::MIN, i32::MAX, true)
        };

        let result = SearchResult {
            column,
            score,
            nodes: self.node_count,
            elapsed: start.elapsed(),
            timed_out: self.timed_out,
        };
        info!(
            "depth {} search chose {:?} with score {} ({} nodes in {:.3}ms{})",
            self.config.depth,
            result.column,
            result.score,
            result.nodes,
            result.elapsed.as_secs_f64() * 1000.0,
            if result.timed_out { ", timed out" } else { "" }
        );
        result
    }
}
