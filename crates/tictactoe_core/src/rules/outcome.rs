//! Terminal-state classification and utility.

use super::{draw::is_full, win::winner};
use crate::{Board, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Classification of a board. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Game continues.
    Ongoing,
    /// A mark completed a line.
    Won(Mark),
    /// Board is full with no winner.
    Tie,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Won(mark) => Some(*mark),
            Outcome::Ongoing | Outcome::Tie => None,
        }
    }

    /// Returns true once the game has ended.
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "In progress"),
            Outcome::Won(mark) => write!(f, "{} wins", mark),
            Outcome::Tie => write!(f, "Tie"),
        }
    }
}

/// Returns true if someone has won or no empty square remains.
#[instrument(level = "trace", skip(board))]
pub fn is_terminal(board: &Board) -> bool {
    winner(board).is_some() || is_full(board)
}

/// Classifies the board.
#[instrument(level = "trace", skip(board))]
pub fn outcome(board: &Board) -> Outcome {
    if let Some(mark) = winner(board) {
        Outcome::Won(mark)
    } else if is_full(board) {
        Outcome::Tie
    } else {
        Outcome::Ongoing
    }
}

/// Value of a finished game from X's point of view.
///
/// `Some(1)` if X won, `Some(-1)` if O won, `Some(0)` on a tie, and `None`
/// while the game is still going.
#[instrument(level = "trace", skip(board))]
pub fn utility(board: &Board) -> Option<i32> {
    match outcome(board) {
        Outcome::Ongoing => None,
        Outcome::Won(Mark::X) => Some(1),
        Outcome::Won(Mark::O) => Some(-1),
        Outcome::Tie => Some(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ongoing_has_no_utility() {
        let board: Board = "X__/_O_/___".parse().unwrap();
        assert!(!is_terminal(&board));
        assert_eq!(outcome(&board), Outcome::Ongoing);
        assert_eq!(utility(&board), None);
    }

    #[test]
    fn test_win_is_terminal_before_board_fills() {
        let board: Board = "OOO/XX_/X__".parse().unwrap();
        assert!(is_terminal(&board));
        assert_eq!(outcome(&board), Outcome::Won(Mark::O));
        assert_eq!(utility(&board), Some(-1));
    }

    #[test]
    fn test_tie_utility_is_zero() {
        let board: Board = "XOX/XOO/OXX".parse().unwrap();
        assert_eq!(outcome(&board), Outcome::Tie);
        assert_eq!(utility(&board), Some(0));
    }
}
