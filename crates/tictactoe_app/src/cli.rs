//! Command-line interface for tictactoe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_core::{Difficulty, Mark};

/// Tic-tac-toe against a minimax opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe against an alpha-beta opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Difficulty preselected in the menu
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Mark you play against the computer (x or o)
        #[arg(long)]
        human: Option<Mark>,

        /// Pause before the computer's move is shown, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Seed for the computer's random choices
        #[arg(long)]
        seed: Option<u64>,

        /// Path to config file (defaults to tictactoe.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the outcome and best move for a position, e.g. "XO_/_X_/O__"
    Analyze {
        /// Board rows separated by '/', '_' for empty squares
        board: String,

        /// Squares to play before analyzing, by keypad number (1-9) or label
        #[arg(long = "then", value_name = "SQUARE")]
        then: Vec<String>,
    },

    /// Play computer against computer and report the results
    Arena {
        /// Tier playing X
        #[arg(long, default_value = "optimal")]
        x: Difficulty,

        /// Tier playing O
        #[arg(long, default_value = "optimal")]
        o: Difficulty,

        /// Number of games
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Seed for reproducible results
        #[arg(long)]
        seed: Option<u64>,
    },
}
