//! Difficulty tiers for the computer opponent.
//!
//! Lower tiers blunder more often, but a blunder is a uniformly random legal
//! move and every other move is fully optimal. There is no "slightly worse"
//! play in between.

use crate::rules::{legal_moves, whose_turn};
use crate::search::best_move;
use crate::{Board, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Difficulty tier of a session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Difficulty {
    /// Random move 55% of the time.
    Easy,
    /// Random move 30% of the time.
    Medium,
    /// Random move 8% of the time.
    Hard,
    /// Always optimal. Used when no tier is given.
    #[default]
    Optimal,
    /// No computer opponent; two humans share the board.
    HumanVsHuman,
}

impl Difficulty {
    /// Probability that the computer plays a uniformly random legal move
    /// instead of the searched one.
    pub fn blunder_probability(self) -> f64 {
        match self {
            Difficulty::Easy => 0.55,
            Difficulty::Medium => 0.30,
            Difficulty::Hard => 0.08,
            Difficulty::Optimal | Difficulty::HumanVsHuman => 0.0,
        }
    }

    /// Returns true if a computer opponent takes part.
    pub fn is_single_player(self) -> bool {
        self != Difficulty::HumanVsHuman
    }

    /// Returns display name.
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Optimal => "Unbeatable",
            Difficulty::HumanVsHuman => "Human vs Human",
        }
    }
}

/// Picks a move for the side to play at the given difficulty.
///
/// Returns `None` if the game is over. When the random branch is taken the
/// search is skipped entirely.
#[instrument(skip(board, rng), fields(board = %board))]
pub fn choose_ai_move<R: Rng>(
    board: &Board,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Position> {
    whose_turn(board)?;

    let p = difficulty.blunder_probability();
    if p > 0.0 && rng.gen_bool(p) {
        let pick = legal_moves(board).choose(rng).copied();
        debug!(?difficulty, position = ?pick, "Playing random move");
        return pick;
    }

    best_move(board)
}

/// Computer opponent: a difficulty tier plus its own random source.
#[derive(Debug, Clone)]
pub struct AiPlayer {
    difficulty: Difficulty,
    rng: StdRng,
}

impl AiPlayer {
    /// Creates a player seeded from the operating system.
    #[instrument]
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a player whose random choices are reproducible.
    #[instrument]
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is given, from entropy otherwise.
    pub fn with_seed(difficulty: Difficulty, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(difficulty, seed),
            None => Self::new(difficulty),
        }
    }

    /// Returns the difficulty tier.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Changes the difficulty tier, keeping the random stream.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Picks a move for the side to play, `None` if the game is over.
    pub fn choose(&mut self, board: &Board) -> Option<Position> {
        choose_ai_move(board, self.difficulty, &mut self.rng)
    }
}
