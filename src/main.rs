//! Backgammon-Minimax command-line front end.
//!
//! ## Usage
//!
//! - `backgammon-minimax` - Engine self-play with default settings
//! - `backgammon-minimax play` - Play against the engine
//! - `backgammon-minimax selfplay` - Engine vs engine (or vs random) games
//! - `backgammon-minimax moves 6 5` - List legal turns from the start

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use backgammon_minimax::constants::MAX_GAME_TURNS;
use backgammon_minimax::dice::{Dice, RandomDice};
use backgammon_minimax::engine::Engine;
use backgammon_minimax::eval::verdict;
use backgammon_minimax::game::{
    Controller, EngineController, Game, HumanController, RandomController, play_out,
};
use backgammon_minimax::player::Player;
use backgammon_minimax::position::Position;

/// Backgammon-Minimax: a two-ply maximin backgammon engine
#[derive(Parser)]
#[command(name = "backgammon-minimax")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Also write debug-level logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Player::White,
            Side::Black => Player::Black,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine, picking turns by index
    Play {
        /// Side the human plays
        #[arg(long, value_enum, default_value = "white")]
        color: Side,
        /// Seed for the dice
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Let the engine play complete games
    Selfplay {
        /// Number of games
        #[arg(long, default_value_t = 1)]
        games: usize,
        /// Seed for the dice of the first game
        #[arg(long)]
        seed: Option<u64>,
        /// Turn cap per game
        #[arg(long, default_value_t = MAX_GAME_TURNS)]
        max_turns: usize,
        /// Black plays random legal turns instead of the engine
        #[arg(long)]
        random_black: bool,
    },
    /// List the legal turns from the starting position for a roll
    Moves {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=6))]
        first: u8,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=6))]
        second: u8,
        /// Side to move
        #[arg(long, value_enum, default_value = "white")]
        player: Side,
    },
}

fn setup_logging(verbose: u8, log_file: Option<&PathBuf>) -> Result<()> {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let dispatcher = fern::Dispatch::new().format(|out, message, record| {
        out.finish(format_args!(
            "[{}][{}] {}",
            record.target(),
            record.level(),
            message
        ))
    });
    let stderr = fern::Dispatch::new().level(level).chain(io::stderr());
    let dispatcher = match log_file {
        Some(path) => dispatcher.chain(stderr).chain(
            fern::Dispatch::new()
                .level(log::LevelFilter::Debug.max(level))
                .chain(
                    fern::log_file(path)
                        .with_context(|| format!("opening {}", path.display()))?,
                ),
        ),
        None => dispatcher.chain(stderr),
    };
    dispatcher.apply().context("installing logger")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.log_file.as_ref())?;

    match cli.command {
        Some(Commands::Play { color, seed }) => run_play(color.into(), seed),
        Some(Commands::Selfplay {
            games,
            seed,
            max_turns,
            random_black,
        }) => run_selfplay(games, seed, max_turns, random_black),
        Some(Commands::Moves {
            first,
            second,
            player,
        }) => run_moves(Dice::new(first, second)?, player.into()),
        None => run_selfplay(1, None, MAX_GAME_TURNS, false),
    }
}

fn dice_source(seed: Option<u64>) -> RandomDice {
    match seed {
        Some(seed) => RandomDice::with_seed(seed),
        None => RandomDice::new(),
    }
}

fn print_board(pos: &Position) {
    println!("\n{pos}");
    println!("{}", verdict(pos));
}

fn run_play(human: Player, seed: Option<u64>) -> Result<()> {
    println!("Backgammon-Minimax: human = {human}, engine = {}", human.opponent());
    let stdin = io::stdin();
    let mut human_ctl = HumanController::new(stdin.lock(), io::stdout());
    let mut engine_ctl = EngineController;
    let mut game = Game::new(dice_source(seed));
    print_board(game.position());

    while !game.is_over() {
        let controller: &mut dyn Controller = if game.to_move() == human {
            &mut human_ctl
        } else {
            &mut engine_ctl
        };
        let record = game.play_turn(controller)?;
        println!("{} rolls {}: {}", record.player, record.dice, record.turn);
        print_board(&record.after);
    }
    if let Some(winner) = game.winner() {
        println!("\nGame over: {winner} wins");
    }
    Ok(())
}

fn run_selfplay(
    games: usize,
    seed: Option<u64>,
    max_turns: usize,
    random_black: bool,
) -> Result<()> {
    let mut wins = [0usize; 2];
    for g in 0..games {
        let seed = seed.map(|s| s.wrapping_add(g as u64));
        let mut game = Game::new(dice_source(seed));
        let mut white = EngineController;
        let mut black: Box<dyn Controller> = if random_black {
            Box::new(RandomController::with_seed(seed.unwrap_or(0) ^ 0x5eed))
        } else {
            Box::new(EngineController)
        };
        let outcome = play_out(&mut game, &mut white, black.as_mut(), max_turns)?;
        match outcome.winner {
            Some(winner) => {
                wins[winner.index()] += 1;
                println!("game {}: {winner} wins in {} turns", g + 1, outcome.turns);
            }
            None => println!("game {}: stopped after {} turns", g + 1, outcome.turns),
        }
    }
    println!("White {} - {} Black", wins[0], wins[1]);
    Ok(())
}

fn run_moves(dice: Dice, player: Player) -> Result<()> {
    let pos = Position::initial();
    let scored = Engine::new(player).analyze(&pos, dice);
    if scored.is_empty() {
        println!("{player} has no legal turn with {dice}");
        return Ok(());
    }
    for (i, s) in scored.iter().enumerate() {
        println!("[{i}] {:>6}  {}", s.value, s.turn);
    }
    Ok(())
}
