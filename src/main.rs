use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use clap::Parser;
use log::info;

use ttt_tree::board::{BOARD_SIZE, CENTER_CELL};
use ttt_tree::opponent::{MoveChoice, Opponent, RandomOpponent};
use ttt_tree::random::{SeededRandomGenerator, StandardRandomGenerator};
use ttt_tree::session::{GameSession, SessionConfig};
use ttt_tree::simulation::simulate_games;
use ttt_tree::{GameOutcome, Position, build_game};

/// Play tic-tac-toe against an engine that has seen every possible game.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Cell (1-9, row-major) the engine opens with
    #[arg(long, default_value_t = CENTER_CELL, value_parser = clap::value_parser!(u8).range(1..=9))]
    opening: u8,

    /// Evaluate the first engine move instead of using the opening cell
    #[arg(long)]
    no_opening: bool,

    /// Play this many games against a random opponent instead of a human
    #[arg(long)]
    simulate: Option<u32>,

    /// Seed for the random opponent
    #[arg(long)]
    seed: Option<u64>,

    /// Print the evaluation of every candidate before each engine move
    #[arg(long)]
    show_evaluations: bool,
}

/// A human typing moves on stdin.
struct ConsoleOpponent<R: BufRead> {
    input: R,
    show_evaluations: bool,
}

impl<R: BufRead> ConsoleOpponent<R> {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed");
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead> Opponent for ConsoleOpponent<R> {
    type Error = anyhow::Error;

    fn choose_move(&mut self, position: &Position) -> Result<u8> {
        print!("{position}");
        loop {
            match self.ask("Move: ")?.parse::<u8>() {
                Ok(cell) => return Ok(cell),
                Err(_) => println!("invalid move."),
            }
        }
    }

    fn on_illegal_move(&mut self, _cell: u8) {
        println!("invalid move.");
    }

    fn on_automated_move(&mut self, choice: &MoveChoice) {
        if self.show_evaluations {
            if let Some(evaluations) = &choice.evaluations {
                for (cell, value) in evaluations {
                    println!("  {cell}: {value:.3}");
                }
            }
        }
        println!("Computer plays: {}", choice.cell);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let opening = (!cli.no_opening).then_some(cli.opening);
    let config = SessionConfig::default().with_opening_move(opening);
    let tree = build_game(BOARD_SIZE)?;

    if let Some(games) = cli.simulate {
        let summary = match cli.seed {
            Some(seed) => {
                let mut opponent = RandomOpponent::new(SeededRandomGenerator::new(seed));
                simulate_games(&tree, config, games, &mut opponent)?
            }
            None => {
                let mut opponent = RandomOpponent::new(StandardRandomGenerator);
                simulate_games(&tree, config, games, &mut opponent)?
            }
        };
        println!("{summary}");
        return Ok(());
    }

    let mut opponent = ConsoleOpponent {
        input: io::stdin().lock(),
        show_evaluations: cli.show_evaluations,
    };
    let mut session = GameSession::new(&tree, config)?;
    loop {
        let outcome = session.play(&mut opponent)?;
        print!("{}", session.position()?);
        match outcome {
            GameOutcome::XWins => println!("You lose!"),
            GameOutcome::OWins => println!("You win!"),
            _ => println!("Draw!"),
        }
        info!("game over after {} moves", session.move_count());

        if !opponent.ask("Play again? (y/n): ")?.eq_ignore_ascii_case("y") {
            println!("Thanks for playing!");
            break;
        }
        session.reset()?;
    }

    Ok(())
}
