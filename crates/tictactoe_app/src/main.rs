//! Tictactoe - unified CLI
//!
//! Play in the terminal, analyze a position, or pit tiers against each other.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use tictactoe_app::{GameConfig, run_arena, tui};
use tictactoe_core::{Board, Difficulty, Mark, Position, analyze, outcome};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            difficulty,
            human,
            delay_ms,
            seed,
            config,
        } => run_play(difficulty, human, delay_ms, seed, config).await,
        Command::Analyze { board, then } => run_analyze(&board, &then),
        Command::Arena { x, o, games, seed } => run_arena_command(x, o, games, seed),
    }
}

/// Logs to stderr for the non-interactive commands.
fn init_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the terminal game
async fn run_play(
    difficulty: Option<Difficulty>,
    human: Option<Mark>,
    delay_ms: Option<u64>,
    seed: Option<u64>,
    config: Option<PathBuf>,
) -> Result<()> {
    let mut config = GameConfig::load(config.as_deref())?;
    if let Some(difficulty) = difficulty {
        config = config.with_difficulty(difficulty);
    }
    if let Some(human) = human {
        config = config.with_human_mark(human);
    }
    if let Some(ms) = delay_ms {
        config = config.with_thinking_delay_ms(ms);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    tui::run(config).await
}

/// Print analysis of one position
#[instrument]
fn run_analyze(board: &str, then: &[String]) -> Result<()> {
    init_stderr_tracing();

    let mut board = Board::parse_playable(board)
        .with_context(|| format!("Invalid board {:?}", board))?;

    for square in then {
        let pos = Position::from_label_or_number(square)
            .with_context(|| format!("Unknown square {:?}", square))?;
        if board.is_terminal() {
            bail!("Cannot play {} on a finished game", pos);
        }
        if !board.is_empty(pos) {
            bail!("{} is already taken", pos);
        }
        board = board.apply(pos);
    }

    println!("{}", board.display());
    println!();
    println!("Outcome: {}", outcome(&board));
    match board.whose_turn() {
        Some(mark) => println!("To move: {}", mark),
        None => println!("To move: -"),
    }

    match analyze(&board) {
        Some(report) => {
            info!(nodes = report.nodes, "Search complete");
            println!("Best move: {}", report.best_move);
            println!("Value: {}", report.value);
            println!("Nodes searched: {}", report.nodes);
        }
        None => println!("Best move: none (game over)"),
    }

    Ok(())
}

/// Run a computer-vs-computer series
fn run_arena_command(x: Difficulty, o: Difficulty, games: u32, seed: Option<u64>) -> Result<()> {
    init_stderr_tracing();

    info!(%x, %o, games, "Starting arena");
    let tally = run_arena(x, o, games, seed);
    println!("X ({}) vs O ({})", x.name(), o.name());
    println!("{}", tally);
    Ok(())
}
