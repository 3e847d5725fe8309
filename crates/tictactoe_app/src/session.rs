//! Game session state.
//!
//! The engine is stateless; everything that lives longer than one call
//! (the current board, who plays which mark, whether the computer is
//! thinking) is kept here. Only the orchestrator changes a session.

use serde::{Deserialize, Serialize};
use tictactoe_core::{Board, Difficulty, Mark, Outcome, Position};
use tracing::{debug, instrument};

/// Identifies one incarnation of a session.
///
/// Bumped on every start, reset and exit so that work scheduled for an
/// older board can be recognized and dropped.
pub type Generation = u64;

/// Who is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Human against the computer at a difficulty tier.
    SinglePlayer {
        /// Computer's difficulty tier.
        difficulty: Difficulty,
        /// Mark the human plays.
        human: Mark,
    },
    /// Two humans sharing the board.
    TwoPlayer,
}

impl GameMode {
    /// Picks the mode for a tier: `HumanVsHuman` is two-player, every
    /// other tier puts the human on `human` against the computer.
    pub fn for_difficulty(difficulty: Difficulty, human: Mark) -> Self {
        if difficulty.is_single_player() {
            GameMode::SinglePlayer { difficulty, human }
        } else {
            GameMode::TwoPlayer
        }
    }

    /// Mark played by the computer, if there is one.
    pub fn computer_mark(&self) -> Option<Mark> {
        match self {
            GameMode::SinglePlayer { human, .. } => Some(human.opponent()),
            GameMode::TwoPlayer => None,
        }
    }

    /// Returns display name.
    pub fn name(&self) -> String {
        match self {
            GameMode::SinglePlayer { difficulty, human } => {
                format!("You ({}) vs Computer ({})", human, difficulty.name())
            }
            GameMode::TwoPlayer => "Human vs Human".to_string(),
        }
    }
}

/// A game in progress or just finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    generation: Generation,
    mode: GameMode,
    board: Board,
    outcome: Outcome,
    computer_thinking: bool,
}

impl Session {
    /// Creates a session with an empty board.
    #[instrument]
    pub fn new(generation: Generation, mode: GameMode) -> Self {
        debug!("Creating new session");
        Self {
            generation,
            mode,
            board: Board::new(),
            outcome: Outcome::Ongoing,
            computer_thinking: false,
        }
    }

    /// Returns the generation.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Returns the game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the outcome as of the last move.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns true once someone has won or the board is full.
    pub fn is_game_over(&self) -> bool {
        self.outcome.is_over()
    }

    /// Returns the winning mark, if any.
    pub fn winner(&self) -> Option<Mark> {
        self.outcome.winner()
    }

    /// Returns the mark to play next, `None` once the game is over.
    pub fn to_move(&self) -> Option<Mark> {
        self.board.whose_turn()
    }

    /// Returns true if the computer is the side to move.
    pub fn is_computer_turn(&self) -> bool {
        match (self.to_move(), self.mode.computer_mark()) {
            (Some(to_move), Some(computer)) => to_move == computer,
            _ => false,
        }
    }

    /// Returns true while a computer move has been chosen but not shown.
    pub fn is_computer_thinking(&self) -> bool {
        self.computer_thinking
    }

    pub(crate) fn set_computer_thinking(&mut self, thinking: bool) {
        self.computer_thinking = thinking;
    }

    /// Plays a validated move and records the new outcome.
    pub(crate) fn place(&mut self, pos: Position) -> Outcome {
        self.board = self.board.apply(pos);
        self.outcome = self.board.outcome();
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_vs_human_has_no_computer() {
        let mode = GameMode::for_difficulty(Difficulty::HumanVsHuman, Mark::X);
        assert_eq!(mode, GameMode::TwoPlayer);
        assert_eq!(mode.computer_mark(), None);
    }

    #[test]
    fn test_computer_plays_other_mark() {
        let mode = GameMode::for_difficulty(Difficulty::Hard, Mark::O);
        assert_eq!(mode.computer_mark(), Some(Mark::X));
        let session = Session::new(1, mode);
        assert!(session.is_computer_turn());
    }

    #[test]
    fn test_place_updates_outcome() {
        let mut session = Session::new(1, GameMode::TwoPlayer);
        for pos in [
            Position::TopLeft,
            Position::Center,
            Position::TopCenter,
            Position::BottomLeft,
        ] {
            assert_eq!(session.place(pos), Outcome::Ongoing);
        }
        assert_eq!(session.place(Position::TopRight), Outcome::Won(Mark::X));
        assert!(session.is_game_over());
        assert_eq!(session.winner(), Some(Mark::X));
        assert_eq!(session.to_move(), None);
    }
}
