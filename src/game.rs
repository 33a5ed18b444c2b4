//! Turn bookkeeping around a `Board`

use log::debug;

use crate::{
    board::{Board, Move, Piece},
    error::MoveError,
};

/// How a finished game ended
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    PlayerWin,
    ComputerWin,
    Draw,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    Over(Outcome),
}

/// A read-only consumer of committed board states, such as a renderer or a
/// device mirroring the board
pub trait BoardObserver {
    fn on_move(&mut self, board: &Board, last_move: &Move);

    fn on_game_over(&mut self, _board: &Board, _outcome: Outcome) {}
}

/// A game between the human and the computer
pub struct Game {
    board: Board,
    first: Piece,
    to_move: Piece,
    moves: Vec<Move>,
    state: GameState,
    observers: Vec<Box<dyn BoardObserver>>,
}

impl Game {
    pub fn new(first: Piece) -> Self {
        Self {
            board: Board::new(),
            first,
            to_move: first,
            moves: Vec::new(),
            state: GameState::Playing,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn BoardObserver>) {
        self.observers.push(observer);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Piece {
        self.to_move
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The moves so far as a string of column digits, replayable with `Board::from_moves`
    pub fn move_string(&self) -> String {
        self.moves.iter().map(|m| m.column.to_string()).collect()
    }

    /// Plays `column` for the side to move
    ///
    /// Rejected moves leave the board and the turn untouched.
    pub fn play(&mut self, column: usize) -> Result<GameState, MoveError> {
        if self.state != GameState::Playing {
            return Err(MoveError::GameOver);
        }

        let piece = self.to_move;
        let committed = self.board.play(column, piece)?;
        self.moves.push(committed);
        debug!("{:?} played column {} (row {})", piece, committed.column, committed.row);

        self.state = if self.board.has_four_in_a_row(piece) {
            GameState::Over(match piece {
                Piece::Human => Outcome::PlayerWin,
                Piece::Computer => Outcome::ComputerWin,
            })
        } else if self.board.is_full() {
            GameState::Over(Outcome::Draw)
        } else {
            GameState::Playing
        };
        self.to_move = piece.opponent();

        for observer in self.observers.iter_mut() {
            observer.on_move(&self.board, &committed);
        }
        if let GameState::Over(outcome) = self.state {
            for observer in self.observers.iter_mut() {
                observer.on_game_over(&self.board, outcome);
            }
        }

        Ok(self.state)
    }

    /// Clears the board for a new game, keeping the observers
    pub fn reset(&mut self, first: Piece) {
        self.board.reset();
        self.first = first;
        self.to_move = first;
        self.moves.clear();
        self.state = GameState::Playing;
    }

    pub fn first(&self) -> Piece {
        self.first
    }
}
