//! Minimax search with alpha-beta pruning.
//!
//! X is the maximizing side and O the minimizing side; leaves are scored
//! with [`utility`]. The whole 3x3 tree is at most nine plies deep, so the
//! search always runs to the end of the game and needs no depth limit,
//! move ordering or transposition table.
//!
//! Every call owns its search state. Boards are values, so sibling
//! branches never see each other's moves and concurrent calls on
//! different threads share nothing.

use crate::rules::{apply, legal_moves, utility, whose_turn};
use crate::{Board, Mark, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Result of searching a position to the end of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    /// Optimal move for the side to play.
    pub best_move: Position,
    /// Value of the position under optimal play, from X's point of view.
    pub value: i32,
    /// Number of boards visited, including the root.
    pub nodes: u64,
}

/// Returns the optimal move for the side to play, or `None` if the game is over.
///
/// Among equally good moves the first in row-major order wins. A position
/// with a single legal move returns it without searching.
#[instrument(skip(board), fields(board = %board))]
pub fn best_move(board: &Board) -> Option<Position> {
    whose_turn(board)?;

    let moves = legal_moves(board);
    if let [only] = moves.as_slice() {
        debug!(position = ?only, "Single legal move");
        return Some(*only);
    }

    analyze(board).map(|report| report.best_move)
}

/// Searches the position and reports the chosen move, its value and the
/// number of nodes visited. `None` if the game is over.
#[instrument(skip(board), fields(board = %board))]
pub fn analyze(board: &Board) -> Option<SearchReport> {
    let mover = whose_turn(board)?;
    let maximizing = mover == Mark::X;

    let mut search = AlphaBeta::default();
    search.nodes += 1;

    let mut alpha = i32::MIN;
    let mut beta = i32::MAX;
    let mut best: Option<(Position, i32)> = None;

    for pos in legal_moves(board) {
        let child = apply(board, pos);
        let value = if maximizing {
            search.min_value(&child, alpha, beta)
        } else {
            search.max_value(&child, alpha, beta)
        };

        // Strictly better only: earlier moves keep ties.
        let improves = match best {
            None => true,
            Some((_, v)) if maximizing => value > v,
            Some((_, v)) => value < v,
        };

        if improves {
            best = Some((pos, value));
            if maximizing {
                alpha = alpha.max(value);
            } else {
                beta = beta.min(value);
            }
        }
    }

    let (best_move, value) = best?;
    debug!(?mover, position = ?best_move, value, nodes = search.nodes, "Search complete");

    Some(SearchReport {
        best_move,
        value,
        nodes: search.nodes,
    })
}

/// Per-call search state.
#[derive(Debug, Default)]
struct AlphaBeta {
    nodes: u64,
}

impl AlphaBeta {
    /// Value of a board where X is to move.
    fn max_value(&mut self, board: &Board, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        if let Some(value) = utility(board) {
            return value;
        }

        let mut v = i32::MIN;
        for pos in legal_moves(board) {
            v = v.max(self.min_value(&apply(board, pos), alpha, beta));
            if v >= beta {
                return v;
            }
            alpha = alpha.max(v);
        }
        v
    }

    /// Value of a board where O is to move.
    fn min_value(&mut self, board: &Board, alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;
        if let Some(value) = utility(board) {
            return value;
        }

        let mut v = i32::MAX;
        for pos in legal_moves(board) {
            v = v.min(self.max_value(&apply(board, pos), alpha, beta));
            if v <= alpha {
                return v;
            }
            beta = beta.min(v);
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_board_has_no_move() {
        let board: Board = "XXX/OO_/___".parse().unwrap();
        assert_eq!(best_move(&board), None);
        assert_eq!(analyze(&board), None);
    }

    #[test]
    fn test_single_legal_move_returned() {
        let board: Board = "XOX/XOO/OX_".parse().unwrap();
        assert_eq!(best_move(&board), Some(Position::BottomRight));
    }

    #[test]
    fn test_takes_immediate_win() {
        // O to move; BottomRight completes the right column.
        let board: Board = "_XO/_XO/X__".parse().unwrap();
        let report = analyze(&board).unwrap();
        assert_eq!(report.best_move, Position::BottomRight);
        assert_eq!(report.value, -1);
    }

    #[test]
    fn test_blocks_only_threat() {
        // O to move; X threatens the main diagonal.
        let board: Board = "X__/_X_/O__".parse().unwrap();
        assert_eq!(best_move(&board), Some(Position::BottomRight));
    }
}
