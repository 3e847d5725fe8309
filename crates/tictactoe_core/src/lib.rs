//! Tic-tac-toe engine - pure game logic with a minimax opponent.
//!
//! Everything in this crate is a pure function of a [`Board`] (and a move,
//! difficulty or random source where needed). There is no engine-owned
//! mutable state; sessions, timing and input live in the caller.
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{best_move, initial, outcome, Outcome};
//!
//! let mut board = initial();
//! while let Some(pos) = best_move(&board) {
//!     board = board.apply(pos);
//! }
//! assert_eq!(outcome(&board), Outcome::Tie);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod difficulty;
mod position;
pub mod rules;
mod search;
mod types;

pub use difficulty::{AiPlayer, Difficulty, choose_ai_move};
pub use position::Position;
pub use rules::{
    Outcome, apply, initial, is_full, is_terminal, legal_moves, outcome, utility, whose_turn,
    winner,
};
pub use search::{SearchReport, analyze, best_move};
pub use types::{Board, BoardParseError, Mark, Square};

impl Board {
    /// Returns the mark to play next, `None` once the game is over.
    pub fn whose_turn(&self) -> Option<Mark> {
        whose_turn(self)
    }

    /// Returns every empty position in row-major order.
    pub fn legal_moves(&self) -> Vec<Position> {
        legal_moves(self)
    }

    /// Plays `pos` for the side to move, returning the new board.
    ///
    /// # Panics
    ///
    /// Panics if the game is over or `pos` is occupied.
    pub fn apply(&self, pos: Position) -> Board {
        apply(self, pos)
    }

    /// Returns the mark owning a complete line, if any.
    pub fn winner(&self) -> Option<Mark> {
        winner(self)
    }

    /// Checks if the board is full.
    pub fn is_full(&self) -> bool {
        is_full(self)
    }

    /// Returns true once the game is over.
    pub fn is_terminal(&self) -> bool {
        is_terminal(self)
    }

    /// Classifies the board.
    pub fn outcome(&self) -> Outcome {
        outcome(self)
    }
}
