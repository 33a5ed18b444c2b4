//! A heuristic computer opponent for the board game 'Connect 4'
//!
//! The agent picks its moves with a depth-limited minimax search with
//! alpha-beta pruning, scoring the positions at the depth limit with a
//! static evaluator that rewards open runs and central control.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_ai::{board::{Board, Piece}, config::SearchConfig, search::Searcher};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board = Board::from_moves("000", Piece::Computer)?;
//! let mut searcher = Searcher::new(SearchConfig { seed: Some(7), ..SearchConfig::default() })?;
//! let result = searcher.best_move(&board);
//!
//! assert!(result.column.is_some());
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod evaluator;

pub mod config;

pub mod search;

pub mod game;


/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of aligned pieces needed to win
pub const WINDOW_LENGTH: usize = 4;

// a window must fit on the board in every direction
const_assert!(WINDOW_LENGTH <= WIDTH && WINDOW_LENGTH <= HEIGHT);
// the center column bonus needs a unique middle column
const_assert!(WIDTH % 2 == 1);
