//! Turn order, legal moves and move application.
//!
//! The side to move is derived by counting marks: X moves whenever the
//! counts are equal, O whenever X is ahead. This silently assumes a board
//! reached by legal play (counts differ by at most one, X never behind);
//! any other board is outside the rules and gives meaningless answers.

use super::outcome::is_terminal;
use crate::{Board, Mark, Position, Square};
use tracing::instrument;

/// Returns the starting board: all nine squares empty.
pub fn initial() -> Board {
    Board::new()
}

/// Returns the mark to play next, or `None` once the game is over.
#[instrument(level = "trace", skip(board))]
pub fn whose_turn(board: &Board) -> Option<Mark> {
    if is_terminal(board) {
        return None;
    }

    if board.count(Mark::X) > board.count(Mark::O) {
        Some(Mark::O)
    } else {
        Some(Mark::X)
    }
}

/// Returns every empty position in row-major order.
///
/// The order is part of the contract: the search breaks ties by it and the
/// random tiers sample from it.
#[instrument(level = "trace", skip(board))]
pub fn legal_moves(board: &Board) -> Vec<Position> {
    Position::ALL
        .iter()
        .copied()
        .filter(|pos| board.is_empty(*pos))
        .collect()
}

/// Plays `pos` for the side to move and returns the resulting board.
///
/// The input board is left untouched.
///
/// # Panics
///
/// Panics if the game is already over or `pos` is occupied. Callers are
/// expected to validate against [`legal_moves`] first; the orchestrator does.
#[instrument(level = "trace", skip(board))]
pub fn apply(board: &Board, pos: Position) -> Board {
    let mark = whose_turn(board).expect("apply called on a finished game");
    assert!(
        board.is_empty(pos),
        "apply called with occupied square {pos}"
    );
    board.with(pos, Square::Occupied(mark))
}
