//! Statistical tests for the difficulty tiers.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tictactoe_core::{AiPlayer, Board, Difficulty, Position, best_move, choose_ai_move};

const TRIALS: usize = 1000;

/// O to move with six legal squares; only BottomRight stops X's diagonal.
fn one_good_move() -> Board {
    "X__/_X_/O__".parse().unwrap()
}

fn off_best_rate(difficulty: Difficulty, seed: u64) -> f64 {
    let board = one_good_move();
    let best = best_move(&board).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    let misses = (0..TRIALS)
        .filter(|_| choose_ai_move(&board, difficulty, &mut rng) != Some(best))
        .count();
    misses as f64 / TRIALS as f64
}

/// Expected rate of non-optimal moves: the random branch, times the chance
/// a uniform pick misses the single good square.
fn expected_rate(difficulty: Difficulty) -> f64 {
    let moves = one_good_move().legal_moves().len() as f64;
    difficulty.blunder_probability() * (moves - 1.0) / moves
}

#[test]
fn test_board_has_single_best_move() {
    assert_eq!(best_move(&one_good_move()), Some(Position::BottomRight));
}

#[test]
fn test_easy_blunders_often() {
    let rate = off_best_rate(Difficulty::Easy, 11);
    let expected = expected_rate(Difficulty::Easy);
    assert!((rate - expected).abs() < 0.07, "rate {rate}, expected {expected}");
}

#[test]
fn test_medium_blunders_sometimes() {
    let rate = off_best_rate(Difficulty::Medium, 12);
    let expected = expected_rate(Difficulty::Medium);
    assert!((rate - expected).abs() < 0.06, "rate {rate}, expected {expected}");
}

#[test]
fn test_hard_rarely_blunders() {
    let rate = off_best_rate(Difficulty::Hard, 13);
    let expected = expected_rate(Difficulty::Hard);
    assert!((rate - expected).abs() < 0.04, "rate {rate}, expected {expected}");
}

#[test]
fn test_optimal_never_blunders() {
    assert_eq!(off_best_rate(Difficulty::Optimal, 14), 0.0);
}

#[test]
fn test_random_moves_are_legal() {
    let board = one_good_move();
    let legal = board.legal_moves();
    let mut ai = AiPlayer::seeded(Difficulty::Easy, 99);
    for _ in 0..200 {
        let pos = ai.choose(&board).unwrap();
        assert!(legal.contains(&pos));
    }
}

#[test]
fn test_random_moves_cover_every_square() {
    let board = one_good_move();
    let mut ai = AiPlayer::seeded(Difficulty::Easy, 5);
    let picked: std::collections::HashSet<_> =
        (0..TRIALS).filter_map(|_| ai.choose(&board)).collect();
    assert_eq!(picked.len(), board.legal_moves().len());
}

#[test]
fn test_seeded_players_are_reproducible() {
    let board: Board = "X________".parse().unwrap();
    let mut a = AiPlayer::seeded(Difficulty::Medium, 42);
    let mut b = AiPlayer::seeded(Difficulty::Medium, 42);
    for _ in 0..50 {
        assert_eq!(a.choose(&board), b.choose(&board));
    }
}
