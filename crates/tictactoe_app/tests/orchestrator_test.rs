//! Orchestrator tests: turn enforcement, stale moves and events.

use std::time::Duration;
use tictactoe_app::{
    GameConfig, GameEvent, GameMode, IgnoreReason, Orchestrator, Proposal, Proposer,
};
use tictactoe_core::{Board, Difficulty, Mark, Outcome, Position};
use tokio::sync::mpsc;

fn orchestrator(config: &GameConfig) -> (Orchestrator, mpsc::UnboundedReceiver<GameEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Orchestrator::new(config, tx), rx)
}

fn drain(rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn board_of(orchestrator: &Orchestrator) -> Board {
    *orchestrator.session().expect("session running").board()
}

#[test]
fn test_move_without_session_is_ignored() {
    let (mut orch, _rx) = orchestrator(&GameConfig::default());
    assert_eq!(
        orch.propose_move(Proposer::Human, Some(Position::Center)),
        Proposal::Ignored(IgnoreReason::NoSession)
    );
    assert!(orch.session().is_none());
}

#[test]
fn test_human_cannot_move_on_computer_turn() {
    let (mut orch, _rx) = orchestrator(&GameConfig::default());
    orch.start_session(Difficulty::Optimal);

    assert_eq!(
        orch.propose_move(Proposer::Human, Some(Position::Center)),
        Proposal::Applied(Outcome::Ongoing)
    );
    let before = board_of(&orch);

    // Double submit while the computer is to move.
    assert_eq!(
        orch.propose_move(Proposer::Human, Some(Position::TopLeft)),
        Proposal::Ignored(IgnoreReason::NotYourTurn)
    );
    assert_eq!(board_of(&orch), before);
}

#[test]
fn test_computer_cannot_move_on_human_turn() {
    let (mut orch, _rx) = orchestrator(&GameConfig::default());
    orch.start_session(Difficulty::Hard);

    assert_eq!(
        orch.propose_move(Proposer::Computer, Some(Position::Center)),
        Proposal::Ignored(IgnoreReason::NotYourTurn)
    );
    assert_eq!(board_of(&orch), Board::new());
}

#[test]
fn test_occupied_square_and_missing_move_are_ignored() {
    let (mut orch, _rx) = orchestrator(&GameConfig::default());
    orch.start_session(Difficulty::HumanVsHuman);
    orch.propose_move(Proposer::Human, Some(Position::Center));
    let before = board_of(&orch);

    assert_eq!(
        orch.propose_move(Proposer::Human, Some(Position::Center)),
        Proposal::Ignored(IgnoreReason::Illegal(Position::Center))
    );
    assert_eq!(
        orch.propose_move(Proposer::Human, None),
        Proposal::Ignored(IgnoreReason::NoMove)
    );
    assert_eq!(board_of(&orch), before);
}

#[test]
fn test_two_player_game_to_a_win() {
    let (mut orch, mut rx) = orchestrator(&GameConfig::default());
    orch.start_session(Difficulty::HumanVsHuman);
    assert_eq!(orch.session().map(|s| s.mode()), Some(GameMode::TwoPlayer));

    let moves = [
        Position::TopLeft,
        Position::MiddleLeft,
        Position::TopCenter,
        Position::Center,
    ];
    for pos in moves {
        assert_eq!(
            orch.propose_move(Proposer::Human, Some(pos)),
            Proposal::Applied(Outcome::Ongoing)
        );
    }
    assert_eq!(
        orch.propose_move(Proposer::Human, Some(Position::TopRight)),
        Proposal::Applied(Outcome::Won(Mark::X))
    );
    assert_eq!(
        orch.propose_move(Proposer::Human, Some(Position::BottomLeft)),
        Proposal::Ignored(IgnoreReason::GameOver)
    );

    // Two-player sessions never schedule the computer.
    assert!(orch.schedule_computer_move().is_none());

    let events = drain(&mut rx);
    assert!(matches!(events.first(), Some(GameEvent::SessionStarted { .. })));
    assert!(events.contains(&GameEvent::GameOver {
        outcome: Outcome::Won(Mark::X)
    }));
    assert!(events.contains(&GameEvent::MoveIgnored {
        reason: IgnoreReason::GameOver
    }));
}

#[test]
fn test_scheduled_move_is_delivered_once() {
    let config = GameConfig::default().with_thinking_delay_ms(0);
    let (mut orch, mut rx) = orchestrator(&config);
    orch.start_session(Difficulty::Optimal);
    orch.propose_move(Proposer::Human, Some(Position::TopLeft));

    let pending = orch.schedule_computer_move().expect("computer to move");
    assert!(orch.session().is_some_and(|s| s.is_computer_thinking()));
    // Already thinking.
    assert!(orch.schedule_computer_move().is_none());

    // Optimal reply to a corner is the center.
    assert_eq!(pending.position(), Position::Center);
    assert_eq!(pending.delay(), Duration::ZERO);
    assert_eq!(orch.deliver(pending), Proposal::Applied(Outcome::Ongoing));
    assert!(orch.session().is_some_and(|s| !s.is_computer_thinking()));

    let events = drain(&mut rx);
    assert!(events.contains(&GameEvent::ComputerThinking));
    assert!(events.contains(&GameEvent::MoveMade {
        mark: Mark::O,
        position: Position::Center,
        by: Proposer::Computer,
    }));
}

#[test]
fn test_move_scheduled_before_reset_is_stale() {
    let (mut orch, _rx) = orchestrator(&GameConfig::default());
    orch.start_session(Difficulty::Optimal);
    orch.propose_move(Proposer::Human, Some(Position::Center));
    let pending = orch.schedule_computer_move().expect("computer to move");

    assert!(orch.reset_board());
    assert_eq!(
        orch.deliver(pending),
        Proposal::Ignored(IgnoreReason::Stale)
    );
    assert_eq!(board_of(&orch), Board::new());
    assert!(orch.session().is_some_and(|s| !s.is_computer_thinking()));
}

#[test]
fn test_move_scheduled_before_exit_is_stale() {
    let (mut orch, mut rx) = orchestrator(&GameConfig::default());
    orch.start_session(Difficulty::Medium);
    orch.propose_move(Proposer::Human, Some(Position::Center));
    let pending = orch.schedule_computer_move().expect("computer to move");

    orch.exit_to_menu();
    assert!(orch.session().is_none());
    assert!(!orch.reset_board());

    // Starting again must not revive the old move.
    orch.start_session(Difficulty::Medium);
    assert_eq!(
        orch.deliver(pending),
        Proposal::Ignored(IgnoreReason::Stale)
    );
    assert_eq!(board_of(&orch), Board::new());
    assert!(drain(&mut rx).contains(&GameEvent::ReturnedToMenu));
}

#[test]
fn test_computer_opens_when_human_plays_o() {
    let config = GameConfig::default().with_human_mark(Mark::O);
    let (mut orch, _rx) = orchestrator(&config);
    let session = orch.start_session(Difficulty::Optimal);
    assert!(session.is_computer_turn());

    assert_eq!(
        orch.propose_move(Proposer::Human, Some(Position::Center)),
        Proposal::Ignored(IgnoreReason::NotYourTurn)
    );
    let pending = orch.schedule_computer_move().expect("computer opens");
    assert_eq!(pending.position(), Position::TopLeft);
    assert_eq!(orch.deliver(pending), Proposal::Applied(Outcome::Ongoing));
    assert_eq!(board_of(&orch).get(Position::TopLeft).mark(), Some(Mark::X));
}

#[test]
fn test_unbeatable_tier_never_loses_a_full_game() {
    let (mut orch, _rx) = orchestrator(&GameConfig::default());
    orch.start_session(Difficulty::Optimal);

    loop {
        let session = orch.session().expect("session running");
        if session.is_game_over() {
            break;
        }
        if session.is_computer_turn() {
            let pending = orch.schedule_computer_move().expect("computer to move");
            orch.deliver(pending);
        } else {
            let first = session.board().legal_moves()[0];
            orch.propose_move(Proposer::Human, Some(first));
        }
    }

    let outcome = orch.session().expect("session running").outcome();
    assert_ne!(outcome, Outcome::Won(Mark::X));
    assert!(outcome.is_over());
}

#[tokio::test]
async fn test_reveal_later_sends_the_chosen_move() {
    let config = GameConfig::default().with_thinking_delay_ms(0);
    let (mut orch, _rx) = orchestrator(&config);
    orch.start_session(Difficulty::Optimal);
    orch.propose_move(Proposer::Human, Some(Position::Center));

    let pending = orch.schedule_computer_move().expect("computer to move");
    let (reveal_tx, mut reveal_rx) = mpsc::unbounded_channel();
    let handle = pending.reveal_later(reveal_tx);

    let revealed = reveal_rx.recv().await.expect("move revealed");
    handle.await.expect("reveal task finished");
    assert_eq!(revealed, pending);
    assert_eq!(orch.deliver(revealed), Proposal::Applied(Outcome::Ongoing));
}
