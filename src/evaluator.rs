//! Static evaluation of a position for one side
//!
//! A position is scored by summing the contribution of every window on the
//! board, plus a bonus for each piece held in the center column.

use crate::{
    board::{Board, Cell, Direction, Piece, Window},
    HEIGHT, WIDTH, WINDOW_LENGTH,
};

/// A complete alignment of the scored piece
pub const FOUR_SCORE: i32 = 100;
/// Three of the scored piece and one empty cell
pub const THREE_SCORE: i32 = 10;
/// Two of the scored piece and two empty cells
pub const TWO_SCORE: i32 = 5;
/// Three opponent pieces and one empty cell, weighted above offense so blocks win out
pub const OPPONENT_THREE_PENALTY: i32 = -80;
/// Bonus per scored piece in the center column
pub const CENTER_WEIGHT: i32 = 6;

pub const CENTER_COLUMN: usize = WIDTH / 2;

/// How the falling diagonal windows are built
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum DiagonalMode {
    /// Real top-left to bottom-right diagonals
    Corrected,
    /// Horizontal runs of row `r + 2` for `r` in `0..3`, standing in for the
    /// falling diagonals. Kept for parity with the first version of the game
    Legacy,
}

impl Default for DiagonalMode {
    fn default() -> Self {
        DiagonalMode::Corrected
    }
}

/// Scores a single window for `piece`. Offensive and defensive patterns are summed
pub fn score_window(window: &Window, piece: Piece) -> i32 {
    let own = Cell::from(piece);
    let opponent = Cell::from(piece.opponent());

    let count = |target: Cell| window.iter().filter(|&&cell| cell == target).count();
    let (own_count, opponent_count, empty_count) = (count(own), count(opponent), count(Cell::Empty));

    let mut score = 0;
    if own_count == WINDOW_LENGTH {
        score += FOUR_SCORE;
    } else if own_count == 3 && empty_count == 1 {
        score += THREE_SCORE;
    } else if own_count == 2 && empty_count == 2 {
        score += TWO_SCORE;
    }

    if opponent_count == 3 && empty_count == 1 {
        score += OPPONENT_THREE_PENALTY;
    }

    score
}

/// Heuristic value of `board` from the point of view of `piece`
pub fn score_board(board: &Board, piece: Piece, mode: DiagonalMode) -> i32 {
    let own = Cell::from(piece);
    let center_count = (0..HEIGHT)
        .filter(|&row| board.cell(row, CENTER_COLUMN) == own)
        .count() as i32;
    let mut score = center_count * CENTER_WEIGHT;

    for &direction in [Direction::Horizontal, Direction::Vertical, Direction::Rising].iter() {
        score += board
            .windows(direction)
            .map(|window| score_window(&window, piece))
            .sum::<i32>();
    }

    score += match mode {
        DiagonalMode::Corrected => board
            .windows(Direction::Falling)
            .map(|window| score_window(&window, piece))
            .sum::<i32>(),
        DiagonalMode::Legacy => legacy_falling_windows(board)
            .map(|window| score_window(&window, piece))
            .sum::<i32>(),
    };

    score
}

// one window per (r, c) start, all sampled from row r + 2
fn legacy_falling_windows(board: &Board) -> impl Iterator<Item = Window> + '_ {
    (0..=HEIGHT - WINDOW_LENGTH)
        .flat_map(|row| (0..=WIDTH - WINDOW_LENGTH).map(move |column| (row, column)))
        .map(move |(row, column)| {
            let mut window = [Cell::Empty; WINDOW_LENGTH];
            for (i, cell) in window.iter_mut().enumerate() {
                *cell = board.cell(row + 2, column + i);
            }
            window
        })
}
