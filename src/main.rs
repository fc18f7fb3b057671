//! Reversi-Engine command line.
//!
//! ## Usage
//!
//! - `reversi-engine` - Play a random demo game
//! - `reversi-engine shell` - Read commands from stdin (see `shell` module)
//! - `reversi-engine demo --seed 7` - Demo game with a fixed seed
//!
//! Set `--log-level debug` (or `RUST_LOG=debug`) to see the state summary
//! logged on every change.

use std::cell::Cell;
use std::io;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use reversi_engine::board::serialize;
use reversi_engine::engine::{Engine, EngineConfig};
use reversi_engine::shell::Shell;

/// Reversi-Engine: rules engine for 8x8 Reversi
#[derive(Parser)]
#[command(name = "reversi-engine")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter (e.g. "info", "debug", "reversi_engine=trace"); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Keep at most this many past states in the history
    #[arg(long, global = true)]
    history_limit: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read text commands from stdin and reply on stdout
    Shell,
    /// Play random legal moves until the game ends
    Demo {
        /// Seed for the move picker
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many moves
        #[arg(long, default_value_t = 120)]
        max_moves: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    let config = EngineConfig {
        history_limit: cli.history_limit,
    };
    let engine = Engine::with_config(config);
    // Equivalent of a console summary on every state change.
    let _summary = engine.subscribe_states(|state| debug!("\n{}", state.summary()));

    match cli.command {
        Some(Commands::Shell) => {
            let mut shell = Shell::new(engine);
            shell.run(io::stdin().lock(), io::stdout().lock())
        }
        Some(Commands::Demo { seed, max_moves }) => run_demo(engine, seed, max_moves),
        None => run_demo(engine, None, 120),
    }
}

fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).context("invalid --log-level")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn run_demo(mut engine: Engine, seed: Option<u64>, max_moves: usize) -> Result<()> {
    println!("Reversi-Engine: random demo game\n");

    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    let published = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&published);
    let _counter = engine.subscribe_states(move |_| counter.set(counter.get() + 1));

    for _ in 0..max_moves {
        if engine.is_game_over() {
            break;
        }
        let moves = engine.where_can_play();
        let Some(&(row, col)) = rng.choice(moves.iter()) else {
            break;
        };
        let mover = engine.state().turn;
        engine.play(row as isize, col as isize);

        println!("{mover} plays ({row},{col})");
        println!("{}\n", serialize(&engine.state().board));
    }

    let (p1, p2) = engine.score();
    println!("Final score: Player1 {p1} - Player2 {p2}");
    println!("Game over: {}", engine.is_game_over());
    // The replayed current state is not a publication.
    println!("States published: {}", published.get() - 1);
    println!("History length: {}", engine.history().len());
    Ok(())
}
