use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use indicatif::ProgressBar;
use rand::{rngs::StdRng, Rng, SeedableRng};

use std::io::{stdin, stdout, Stdin, Write};
use std::time::Duration;

use connect4_ai::{
    board::Piece,
    config::{SearchConfig, DEFAULT_DEPTH},
    evaluator::DiagonalMode,
    game::{Game, GameState},
    search::Searcher,
    WIDTH,
};

mod display;
use display::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum First {
    Human,
    Computer,
    Random,
}

#[derive(Debug, Parser)]
#[command(name = "connect4", about = "Play Connect 4 against a minimax opponent")]
struct Args {
    /// Plies the computer searches ahead
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    depth: usize,

    /// Seed for the computer's tie-breaks and the first-mover draw
    #[arg(short, long)]
    seed: Option<u64>,

    /// Who plays the first piece
    #[arg(long, value_enum, default_value_t = First::Random)]
    first: First,

    /// Search the computer's candidate moves on all cores
    #[arg(long)]
    parallel: bool,

    /// Upper bound on the computer's thinking time, in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Score falling diagonals the way the first version of the game did
    #[arg(long)]
    legacy_diagonal: bool,
}

fn ask_yes_no(stdin: &Stdin, prompt: &str) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("{} y/n: ", prompt);
        stdout().flush()?;
        if stdin.read_line(&mut buffer)? == 0 {
            return Ok(false);
        }
        match buffer.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn choose_first(first: First, rng: &mut StdRng) -> Piece {
    match first {
        First::Human => Piece::Human,
        First::Computer => Piece::Computer,
        First::Random => {
            if rng.gen_bool(0.5) {
                Piece::Human
            } else {
                Piece::Computer
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = SearchConfig {
        depth: args.depth,
        seed: args.seed,
        parallel: args.parallel,
        time_limit: args.time_limit_ms.map(Duration::from_millis),
        diagonal_mode: if args.legacy_diagonal {
            DiagonalMode::Legacy
        } else {
            DiagonalMode::Corrected
        },
    };
    let mut searcher = Searcher::new(config)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    let mut game = Game::new(choose_first(args.first, &mut rng));
    game.add_observer(Box::new(TerminalRenderer));
    display(game.board())?;

    // game loop
    loop {
        match game.state() {
            GameState::Playing => match game.to_move() {
                Piece::Computer => {
                    let spinner = ProgressBar::new_spinner();
                    spinner.set_message("Computer is thinking...");
                    spinner.enable_steady_tick(100);
                    let result = searcher.best_move(game.board());
                    spinner.finish_and_clear();

                    let column = result
                        .column
                        .ok_or_else(|| anyhow!("no legal move on an unfinished board"))?;
                    println!("Computer evaluates column {} at {}", column, result.score);
                    game.play(column)?;
                }
                Piece::Human => {
                    print!("Move input (0-{}) > ", WIDTH - 1);
                    stdout().flush()?;
                    let mut input_str = String::new();
                    if stdin.read_line(&mut input_str)? == 0 {
                        return Ok(());
                    }

                    let column = match input_str.trim().parse::<usize>() {
                        Err(_) => {
                            println!("Invalid number: {}", input_str.trim());
                            continue;
                        }
                        Ok(column) => column,
                    };

                    if let Err(err) = game.play(column) {
                        println!("{}", err);
                        // try the move again
                        continue;
                    }
                }
            },

            // end states
            GameState::Over(_) => {
                println!("Moves played: {}", game.move_string());
                if !ask_yes_no(&stdin, "Play again?")? {
                    break;
                }
                game.reset(choose_first(args.first, &mut rng));
                display(game.board())?;
            }
        }
    }
    Ok(())
}
