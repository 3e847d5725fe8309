//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating game state
//! according to tic-tac-toe rules. Rules are separated from board
//! storage so the search can call them on hypothetical boards.

pub mod draw;
pub mod outcome;
pub mod turn;
pub mod win;

pub use draw::is_full;
pub use outcome::{Outcome, is_terminal, outcome, utility};
pub use turn::{apply, initial, legal_moves, whose_turn};
pub use win::winner;
