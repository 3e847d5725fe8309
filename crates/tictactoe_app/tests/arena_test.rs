//! Arena tests: optimal play never loses to any tier.

use strum::IntoEnumIterator;
use tictactoe_app::run_arena;
use tictactoe_core::Difficulty;

#[test]
fn test_optimal_never_loses() {
    for tier in Difficulty::iter() {
        let as_x = run_arena(Difficulty::Optimal, tier, 20, Some(3));
        assert_eq!(as_x.o_wins, 0, "optimal X lost to {}", tier);
        assert_eq!(as_x.games(), 20);

        let as_o = run_arena(tier, Difficulty::Optimal, 20, Some(4));
        assert_eq!(as_o.x_wins, 0, "optimal O lost to {}", tier);
    }
}

#[test]
fn test_seeded_series_repeats() {
    let first = run_arena(Difficulty::Easy, Difficulty::Medium, 30, Some(99));
    let second = run_arena(Difficulty::Easy, Difficulty::Medium, 30, Some(99));
    assert_eq!(first, second);
}

#[test]
fn test_zero_games() {
    let tally = run_arena(Difficulty::Easy, Difficulty::Easy, 0, None);
    assert_eq!(tally.games(), 0);
}
