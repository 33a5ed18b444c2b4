//! The Connect 4 grid and its pure queries

use anyhow::{anyhow, Result};

use std::fmt;

use crate::{error::MoveError, HEIGHT, WIDTH, WINDOW_LENGTH};

/// A marker owned by one side of the game
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Piece {
    Human,
    Computer,
}

impl Piece {
    pub fn opponent(self) -> Self {
        match self {
            Piece::Human => Piece::Computer,
            Piece::Computer => Piece::Human,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    Empty,
    Human,
    Computer,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Piece> for Cell {
    fn from(piece: Piece) -> Self {
        match piece {
            Piece::Human => Cell::Human,
            Piece::Computer => Cell::Computer,
        }
    }
}

/// A committed move: the row is always the one gravity chose
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Move {
    pub column: usize,
    pub row: usize,
    pub piece: Piece,
}

/// The four scan directions of a window
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// bottom-left to top-right
    Rising,
    /// top-left to bottom-right
    Falling,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Rising,
        Direction::Falling,
    ];

    // (row step, column step)
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Rising => (1, 1),
            Direction::Falling => (-1, 1),
        }
    }
}

/// `WINDOW_LENGTH` adjacent cells along one direction
pub type Window = [Cell; WINDOW_LENGTH];

/// A 6x7 Connect 4 grid
///
/// Rows are indexed bottom-to-top, so row 0 is where the first piece of a
/// column lands. Pieces always stack from the bottom of a column.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    cells: [Cell; WIDTH * HEIGHT], // cells are stored left-to-right, bottom-to-top
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; WIDTH * HEIGHT],
        }
    }

    /// Builds a board from a string of 0-based column digits, alternating
    /// pieces starting with `first`
    pub fn from_moves<S: AsRef<str>>(moves: S, first: Piece) -> Result<Self> {
        let mut board = Self::new();
        let mut piece = first;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10) {
                Some(column) => {
                    board.play(column as usize, piece)?;
                    piece = piece.opponent();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; WIDTH * HEIGHT];
    }

    /// The cell at `row`, `column`; both must be on the board
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        debug_assert!(row < HEIGHT && column < WIDTH);
        self.cells[column + WIDTH * row]
    }

    /// The cell at `row`, `column`, or `None` off the board
    pub fn get(&self, row: usize, column: usize) -> Option<Cell> {
        if row < HEIGHT && column < WIDTH {
            Some(self.cells[column + WIDTH * row])
        } else {
            None
        }
    }

    /// Checks that a piece can be dropped into `column`
    pub fn check_move(&self, column: usize) -> Result<(), MoveError> {
        if column >= WIDTH {
            return Err(MoveError::InvalidColumn(column));
        }
        if !self.cell(HEIGHT - 1, column).is_empty() {
            return Err(MoveError::ColumnFull(column));
        }
        Ok(())
    }

    /// True iff the top row of `column` is empty. Out of range columns are
    /// never valid
    pub fn is_valid_move(&self, column: usize) -> bool {
        self.check_move(column).is_ok()
    }

    /// The lowest empty row of `column`
    pub fn next_open_row(&self, column: usize) -> Result<usize, MoveError> {
        if column >= WIDTH {
            return Err(MoveError::InvalidColumn(column));
        }
        (0..HEIGHT)
            .find(|&row| self.cell(row, column).is_empty())
            .ok_or(MoveError::ColumnFull(column))
    }

    /// Sets a cell without any validation, `row` must come from `next_open_row`
    pub fn drop_piece(&mut self, row: usize, column: usize, piece: Piece) {
        debug_assert!(row == 0 || !self.cell(row - 1, column).is_empty());
        self.cells[column + WIDTH * row] = piece.into();
    }

    /// Validates `column`, then drops `piece` into its lowest empty row
    pub fn play(&mut self, column: usize, piece: Piece) -> Result<Move, MoveError> {
        self.check_move(column)?;
        let row = self.next_open_row(column)?;
        self.drop_piece(row, column, piece);
        Ok(Move { column, row, piece })
    }

    /// Returns a copy of the board with `piece` dropped into `column`
    pub fn with_move(&self, column: usize, piece: Piece) -> Result<Self, MoveError> {
        let mut next = *self;
        next.play(column, piece)?;
        Ok(next)
    }

    /// All playable columns in ascending order
    pub fn valid_columns(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&column| self.is_valid_move(column)).collect()
    }

    /// Independent copies of the board after each legal drop of `piece`,
    /// in ascending column order
    pub fn children(&self, piece: Piece) -> impl Iterator<Item = (usize, Board)> + '_ {
        (0..WIDTH).filter_map(move |column| {
            self.with_move(column, piece)
                .ok()
                .map(|child| (column, child))
        })
    }

    /// Every window of the board along `direction`
    pub fn windows(&self, direction: Direction) -> impl Iterator<Item = Window> + '_ {
        let (row_step, column_step) = direction.step();
        let span = WINDOW_LENGTH as isize - 1;

        (0..HEIGHT as isize)
            .flat_map(|row| (0..WIDTH as isize).map(move |column| (row, column)))
            .filter(move |&(row, column)| {
                let (end_row, end_column) = (row + row_step * span, column + column_step * span);
                end_row >= 0 && end_row < HEIGHT as isize && end_column < WIDTH as isize
            })
            .map(move |(row, column)| {
                let mut window = [Cell::Empty; WINDOW_LENGTH];
                for (i, cell) in window.iter_mut().enumerate() {
                    let i = i as isize;
                    *cell = self.cell(
                        (row + row_step * i) as usize,
                        (column + column_step * i) as usize,
                    );
                }
                window
            })
    }

    /// Looks for four consecutive `piece` cells in every direction
    pub fn has_four_in_a_row(&self, piece: Piece) -> bool {
        let target = Cell::from(piece);
        Direction::ALL.iter().any(|&direction| {
            self.windows(direction)
                .any(|window| window.iter().all(|&cell| cell == target))
        })
    }

    pub fn winner(&self) -> Option<Piece> {
        [Piece::Computer, Piece::Human]
            .iter()
            .copied()
            .find(|&piece| self.has_four_in_a_row(piece))
    }

    pub fn is_full(&self) -> bool {
        (0..WIDTH).all(|column| !self.is_valid_move(column))
    }

    /// True once either side has won or the board is full
    pub fn is_terminal(&self) -> bool {
        self.has_four_in_a_row(Piece::Human)
            || self.has_four_in_a_row(Piece::Computer)
            || self.is_full()
    }

    pub fn piece_count(&self, piece: Piece) -> usize {
        let target = Cell::from(piece);
        self.cells.iter().filter(|&&cell| cell == target).count()
    }

    pub fn column_height(&self, column: usize) -> usize {
        (0..HEIGHT)
            .take_while(|&row| !self.cell(row, column).is_empty())
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

// top row first, the way the board stands on a table
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..HEIGHT).rev() {
            for column in 0..WIDTH {
                let symbol = match self.cell(row, column) {
                    Cell::Empty => '.',
                    Cell::Human => 'X',
                    Cell::Computer => 'O',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        let columns: String = (0..WIDTH).map(|x| x.to_string()).collect();
        write!(f, "{}", columns)
    }
}
