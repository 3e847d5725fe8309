//! Computer-vs-computer matches for comparing difficulty tiers.

use serde::Serialize;
use tictactoe_core::{AiPlayer, Board, Difficulty, Mark, Outcome};
use tracing::{debug, info, instrument};

/// Win/tie counts over a series of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Games won by X.
    pub x_wins: u32,
    /// Games won by O.
    pub o_wins: u32,
    /// Tied games.
    pub ties: u32,
}

impl Tally {
    /// Counts one finished game. Unfinished outcomes are not counted.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Won(Mark::X) => self.x_wins += 1,
            Outcome::Won(Mark::O) => self.o_wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Ongoing => {}
        }
    }

    /// Total games counted.
    pub fn games(&self) -> u32 {
        self.x_wins + self.o_wins + self.ties
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "X wins: {}, O wins: {}, ties: {} ({} games)",
            self.x_wins,
            self.o_wins,
            self.ties,
            self.games()
        )
    }
}

/// Plays one game from the empty board and returns how it ended.
#[instrument(skip_all, fields(x = %x.difficulty(), o = %o.difficulty()))]
pub fn play_match(x: &mut AiPlayer, o: &mut AiPlayer) -> Outcome {
    let mut board = Board::new();
    while let Some(mover) = board.whose_turn() {
        let player = match mover {
            Mark::X => &mut *x,
            Mark::O => &mut *o,
        };
        let Some(pos) = player.choose(&board) else {
            break;
        };
        board = board.apply(pos);
    }

    let outcome = board.outcome();
    debug!(%outcome, "Match finished");
    outcome
}

/// Plays `games` matches between two tiers.
///
/// With a seed the whole series is reproducible; X and O draw from
/// separate streams derived from it.
#[instrument]
pub fn run_arena(x: Difficulty, o: Difficulty, games: u32, seed: Option<u64>) -> Tally {
    let mut x_player = AiPlayer::with_seed(x, seed);
    let mut o_player = AiPlayer::with_seed(o, seed.map(|s| s.wrapping_add(1)));

    let mut tally = Tally::default();
    for _ in 0..games {
        tally.record(play_match(&mut x_player, &mut o_player));
    }

    info!(%tally, "Arena finished");
    tally
}
