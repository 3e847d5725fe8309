//! Tic-tac-toe application - sessions, move orchestration and the terminal UI.
//!
//! # Architecture
//!
//! - **Session**: the board, who plays which mark and a generation counter
//! - **Orchestrator**: the single path through which moves reach a session
//! - **TUI**: menu and board rendered with ratatui
//! - **Arena**: computer-vs-computer series for comparing tiers
//!
//! # Example
//!
//! ```
//! use tictactoe_app::{GameConfig, Orchestrator, Proposal, Proposer};
//! use tictactoe_core::{Difficulty, Position};
//! use tokio::sync::mpsc;
//!
//! let (tx, _rx) = mpsc::unbounded_channel();
//! let mut orchestrator = Orchestrator::new(&GameConfig::default(), tx);
//! orchestrator.start_session(Difficulty::HumanVsHuman);
//!
//! let proposal = orchestrator.propose_move(Proposer::Human, Some(Position::Center));
//! assert!(matches!(proposal, Proposal::Applied(_)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod orchestrator;
pub mod session;
pub mod tui;

pub use arena::{Tally, play_match, run_arena};
pub use config::{ConfigError, DEFAULT_CONFIG_PATH, GameConfig};
pub use orchestrator::{GameEvent, IgnoreReason, Orchestrator, PendingMove, Proposal, Proposer};
pub use session::{GameMode, Generation, Session};
