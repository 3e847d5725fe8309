//! Application state and logic.

use super::input::{digit_position, move_cursor, move_selection};
use crate::config::GameConfig;
use crate::orchestrator::{GameEvent, Orchestrator, PendingMove, Proposer};
use crossterm::event::KeyCode;
use strum::IntoEnumIterator;
use tictactoe_core::{Difficulty, Outcome, Position};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

/// Main application state.
pub struct App {
    orchestrator: Orchestrator,
    event_rx: mpsc::UnboundedReceiver<GameEvent>,
    reveal_tx: mpsc::UnboundedSender<PendingMove>,
    reveal_rx: mpsc::UnboundedReceiver<PendingMove>,
    reveal_task: Option<JoinHandle<()>>,
    tiers: Vec<Difficulty>,
    menu_selection: usize,
    cursor: Position,
    status: String,
    should_quit: bool,
}

impl App {
    /// Creates a new application showing the menu.
    #[instrument(skip(config))]
    pub fn new(config: &GameConfig) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (reveal_tx, reveal_rx) = mpsc::unbounded_channel();
        let tiers: Vec<Difficulty> = Difficulty::iter().collect();
        let menu_selection = tiers
            .iter()
            .position(|d| d == config.difficulty())
            .unwrap_or_default();

        Self {
            orchestrator: Orchestrator::new(config, event_tx),
            event_rx,
            reveal_tx,
            reveal_rx,
            reveal_task: None,
            tiers,
            menu_selection,
            cursor: Position::Center,
            status: "Choose a difficulty.".to_string(),
            should_quit: false,
        }
    }

    /// Gets the orchestrator (and through it the session).
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Tiers listed in the menu.
    pub fn tiers(&self) -> &[Difficulty] {
        &self.tiers
    }

    /// Highlighted menu entry.
    pub fn menu_selection(&self) -> usize {
        self.menu_selection
    }

    /// Highlighted square.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns true once the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Delivers revealed computer moves, schedules the next one and
    /// refreshes the status line from orchestrator events.
    pub fn tick(&mut self) {
        while let Ok(pending) = self.reveal_rx.try_recv() {
            self.reveal_task = None;
            self.orchestrator.deliver(pending);
        }

        if let Some(pending) = self.orchestrator.schedule_computer_move() {
            self.reveal_task = Some(pending.reveal_later(self.reveal_tx.clone()));
        }

        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    /// Handles a key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) {
        if key == KeyCode::Char('q') {
            debug!("User quit");
            self.should_quit = true;
            return;
        }

        if self.orchestrator.session().is_some() {
            self.handle_board_key(key);
        } else {
            self.handle_menu_key(key);
        }
    }

    fn handle_menu_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Down => {
                self.menu_selection = move_selection(self.menu_selection, self.tiers.len(), key);
            }
            KeyCode::Enter => self.start(self.menu_selection),
            KeyCode::Char(c) => {
                if let Some(index) = c.to_digit(10).and_then(|d| (d as usize).checked_sub(1)) {
                    if index < self.tiers.len() {
                        self.menu_selection = index;
                        self.start(index);
                    }
                }
            }
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_board_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.orchestrator.propose_move(Proposer::Human, Some(self.cursor));
            }
            KeyCode::Char('r') => {
                self.cancel_reveal();
                self.orchestrator.reset_board();
            }
            KeyCode::Char('m') | KeyCode::Esc => {
                self.cancel_reveal();
                self.orchestrator.exit_to_menu();
            }
            other => {
                if let Some(pos) = digit_position(other) {
                    self.cursor = pos;
                    self.orchestrator.propose_move(Proposer::Human, Some(pos));
                }
            }
        }
    }

    fn start(&mut self, index: usize) {
        if let Some(difficulty) = self.tiers.get(index).copied() {
            self.cancel_reveal();
            self.cursor = Position::Center;
            self.orchestrator.start_session(difficulty);
        }
    }

    /// Stops a pending reveal timer. A move it already sent is still
    /// dropped by the generation check.
    fn cancel_reveal(&mut self) {
        if let Some(task) = self.reveal_task.take() {
            task.abort();
        }
    }

    /// Handles a game event from the orchestrator.
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");

        let computer = self
            .orchestrator
            .session()
            .and_then(|s| s.mode().computer_mark());

        self.status = match event {
            GameEvent::SessionStarted { mode } => {
                format!("New game: {}. X moves first.", mode.name())
            }
            GameEvent::ComputerThinking => "Computer is thinking...".to_string(),
            GameEvent::MoveMade { mark, position, by } => {
                let who = match by {
                    Proposer::Computer => "Computer".to_string(),
                    Proposer::Human if computer.is_some() => "You".to_string(),
                    Proposer::Human => format!("Player {}", mark),
                };
                format!("{} ({}) played {}.", who, mark, position.label())
            }
            GameEvent::MoveIgnored { reason } => format!("{}.", reason),
            GameEvent::GameOver { outcome } => {
                let result = match (outcome, computer) {
                    (Outcome::Won(mark), Some(c)) if mark == c => "Computer wins!".to_string(),
                    (Outcome::Won(_), Some(_)) => "You win!".to_string(),
                    (Outcome::Won(mark), None) => format!("{} wins!", mark),
                    _ => "It's a tie!".to_string(),
                };
                format!("{} Press 'r' to play again or 'm' for the menu.", result)
            }
            GameEvent::ReturnedToMenu => "Choose a difficulty.".to_string(),
        };
    }
}
