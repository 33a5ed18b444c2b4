//! Terminal rendering of the board

use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};
use log::warn;

use std::io::{stdout, Write};

use connect4_ai::{
    board::{Board, Cell, Move, Piece},
    game::{BoardObserver, Outcome},
    HEIGHT, WIDTH,
};

/// Draws the board with the top row first and the column numbers underneath
pub fn display(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    for row in (0..HEIGHT).rev() {
        for column in 0..WIDTH {
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(match board.cell(row, column) {
                        Cell::Human => Color::Red,
                        Cell::Computer => Color::Yellow,
                        Cell::Empty => Color::DarkBlue,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }

    let cols: String = (0..WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;
    stdout.flush()?;
    Ok(())
}

/// Redraws the board after every committed move
pub struct TerminalRenderer;

impl BoardObserver for TerminalRenderer {
    fn on_move(&mut self, board: &Board, last_move: &Move) {
        let who = match last_move.piece {
            Piece::Human => "You",
            Piece::Computer => "Computer",
        };
        println!("\n{} played column {}", who, last_move.column);
        if let Err(err) = display(board) {
            warn!("failed to draw board: {}", err);
        }
    }

    fn on_game_over(&mut self, _board: &Board, outcome: Outcome) {
        match outcome {
            Outcome::PlayerWin => println!("You win!"),
            Outcome::ComputerWin => println!("Computer wins!"),
            Outcome::Draw => println!("Draw!"),
        }
    }
}
