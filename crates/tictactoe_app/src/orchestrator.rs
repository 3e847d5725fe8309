//! Move orchestration between the UI and the engine.
//!
//! [`Orchestrator::propose_move`] is the only way a mark reaches a board.
//! Human clicks and computer moves both go through it, so stale clicks,
//! double submits and out-of-turn moves are all rejected in one place.

use crate::config::GameConfig;
use crate::session::{GameMode, Generation, Session};
use derive_more::Display;
use std::time::Duration;
use tictactoe_core::{AiPlayer, Difficulty, Mark, Outcome, Position};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Who submitted a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Proposer {
    /// A person at the keyboard.
    Human,
    /// The computer opponent.
    Computer,
}

/// Why a proposed move was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IgnoreReason {
    /// No game is running (menu is showing).
    #[display("No game in progress")]
    NoSession,
    /// The game has already ended.
    #[display("Game is already over")]
    GameOver,
    /// No square was given.
    #[display("No square selected")]
    NoMove,
    /// The proposer is not the side to move.
    #[display("Not your turn")]
    NotYourTurn,
    /// The square is taken.
    #[display("{} is already taken", _0)]
    Illegal(Position),
    /// The session was reset or exited after the move was chosen.
    #[display("Move belongs to an earlier game")]
    Stale,
}

/// Result of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proposal {
    /// The move was played; the resulting outcome.
    Applied(Outcome),
    /// The move was dropped and the session left untouched.
    Ignored(IgnoreReason),
}

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A new board is ready.
    SessionStarted {
        /// Who is playing.
        mode: GameMode,
    },
    /// The computer has chosen a move and is waiting to show it.
    ComputerThinking,
    /// A mark was placed.
    MoveMade {
        /// Mark placed.
        mark: Mark,
        /// Where it was placed.
        position: Position,
        /// Who placed it.
        by: Proposer,
    },
    /// A proposal was ignored.
    MoveIgnored {
        /// Why.
        reason: IgnoreReason,
    },
    /// The game ended.
    GameOver {
        /// Final outcome.
        outcome: Outcome,
    },
    /// The session was closed.
    ReturnedToMenu,
}

/// A computer move chosen now and revealed after the thinking delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMove {
    generation: Generation,
    position: Position,
    delay: Duration,
}

impl PendingMove {
    /// Session generation the move was chosen for.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Chosen square.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Pause before the move should be shown.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sends this move on `tx` once the delay has passed.
    ///
    /// The move itself is fixed already; waiting never re-runs the search.
    pub fn reveal_later(self, tx: mpsc::UnboundedSender<PendingMove>) -> JoinHandle<()> {
        tokio::spawn(async move {
            tokio::time::sleep(self.delay).await;
            if tx.send(self).is_err() {
                debug!(generation = self.generation, "Reveal receiver dropped");
            }
        })
    }
}

/// Owns the session and routes every move through the rules.
#[derive(Debug)]
pub struct Orchestrator {
    session: Option<Session>,
    last_generation: Generation,
    human_mark: Mark,
    thinking_delay: Duration,
    ai: AiPlayer,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates an orchestrator showing the menu.
    #[instrument(skip(config, event_tx))]
    pub fn new(config: &GameConfig, event_tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        Self {
            session: None,
            last_generation: 0,
            human_mark: *config.human_mark(),
            thinking_delay: config.thinking_delay(),
            ai: AiPlayer::with_seed(*config.difficulty(), *config.seed()),
            event_tx,
        }
    }

    /// Returns the running session, `None` while the menu is showing.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Starts a new game at `difficulty`.
    #[instrument(skip(self))]
    pub fn start_session(&mut self, difficulty: Difficulty) -> &Session {
        let mode = GameMode::for_difficulty(difficulty, self.human_mark);
        self.ai.set_difficulty(difficulty);
        self.open(mode)
    }

    /// Clears the board, keeping the mode. Returns false on the menu.
    #[instrument(skip(self))]
    pub fn reset_board(&mut self) -> bool {
        match self.session.as_ref().map(Session::mode) {
            Some(mode) => {
                self.open(mode);
                true
            }
            None => {
                debug!("Reset requested with no session");
                false
            }
        }
    }

    /// Closes the session and returns to the menu.
    #[instrument(skip(self))]
    pub fn exit_to_menu(&mut self) {
        self.last_generation += 1;
        if self.session.take().is_some() {
            info!(generation = self.last_generation, "Returned to menu");
            self.emit(GameEvent::ReturnedToMenu);
        }
    }

    /// Validates and plays a move.
    ///
    /// Anything that is not a legal move by the side to move is ignored and
    /// leaves the session exactly as it was.
    #[instrument(skip(self))]
    pub fn propose_move(&mut self, proposer: Proposer, position: Option<Position>) -> Proposal {
        let checked = match self.session.as_ref() {
            Some(session) => validate(session, proposer, position),
            None => Err(IgnoreReason::NoSession),
        };

        let position = match checked {
            Ok(position) => position,
            Err(reason) => return self.ignore(reason),
        };
        let Some(session) = self.session.as_mut() else {
            return self.ignore(IgnoreReason::NoSession);
        };

        let mark = session.to_move();
        let outcome = session.place(position);
        let generation = session.generation();
        info!(generation, ?mark, ?position, %proposer, %outcome, "Move applied");

        if let Some(mark) = mark {
            self.emit(GameEvent::MoveMade {
                mark,
                position,
                by: proposer,
            });
        }
        if outcome.is_over() {
            self.emit(GameEvent::GameOver { outcome });
        }

        Proposal::Applied(outcome)
    }

    /// Chooses the computer's move if it is the computer's turn.
    ///
    /// The move is computed immediately and tagged with the current
    /// generation; show it with [`Orchestrator::deliver`] after
    /// [`PendingMove::delay`]. Returns `None` when it is not the computer's
    /// turn or a move is already pending.
    #[instrument(skip(self))]
    pub fn schedule_computer_move(&mut self) -> Option<PendingMove> {
        let session = self.session.as_mut()?;
        if session.is_game_over() || !session.is_computer_turn() || session.is_computer_thinking() {
            return None;
        }

        let position = self.ai.choose(session.board())?;
        session.set_computer_thinking(true);
        let pending = PendingMove {
            generation: session.generation(),
            position,
            delay: self.thinking_delay,
        };

        debug!(?pending, difficulty = %self.ai.difficulty(), "Computer move chosen");
        self.emit(GameEvent::ComputerThinking);
        Some(pending)
    }

    /// Plays a previously scheduled computer move.
    ///
    /// Moves chosen for an earlier generation are discarded.
    #[instrument(skip(self))]
    pub fn deliver(&mut self, pending: PendingMove) -> Proposal {
        match self.session.as_mut() {
            Some(session) if session.generation() == pending.generation => {
                session.set_computer_thinking(false);
            }
            _ => {
                debug!(generation = pending.generation, "Discarding stale computer move");
                return Proposal::Ignored(IgnoreReason::Stale);
            }
        }

        self.propose_move(Proposer::Computer, Some(pending.position))
    }

    fn open(&mut self, mode: GameMode) -> &Session {
        self.last_generation += 1;
        info!(generation = self.last_generation, mode = %mode.name(), "Starting session");
        self.emit(GameEvent::SessionStarted { mode });
        self.session.insert(Session::new(self.last_generation, mode))
    }

    fn ignore(&self, reason: IgnoreReason) -> Proposal {
        warn!(%reason, "Move ignored");
        self.emit(GameEvent::MoveIgnored { reason });
        Proposal::Ignored(reason)
    }

    fn emit(&self, event: GameEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("Event receiver dropped");
        }
    }
}

/// Checks a proposal against the session without changing it.
fn validate(
    session: &Session,
    proposer: Proposer,
    position: Option<Position>,
) -> Result<Position, IgnoreReason> {
    if session.is_game_over() {
        return Err(IgnoreReason::GameOver);
    }

    let position = position.ok_or(IgnoreReason::NoMove)?;

    let computer_turn = session.is_computer_turn();
    match proposer {
        Proposer::Human if computer_turn => return Err(IgnoreReason::NotYourTurn),
        Proposer::Computer if !computer_turn => return Err(IgnoreReason::NotYourTurn),
        _ => {}
    }

    if !session.board().legal_moves().contains(&position) {
        return Err(IgnoreReason::Illegal(position));
    }

    Ok(position)
}
