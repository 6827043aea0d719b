//! Interaction state machine.
//!
//! A [`Session`] turns raw clicks into selections and move attempts against
//! its rules engine, and decides when the computer should reply. It owns the
//! only mutable UI state; everything a front end draws comes from
//! [`Session::view`].
//!
//! States:
//! - `Idle`: nothing selected
//! - `PieceSelected(square)`: the player to act has picked up a piece
//! - `ComputerTurn`: a computer reply is pending and clicks are ignored
//!
//! The computer's reply is not played inline. Accepting a human move that
//! hands the turn to the computer returns a [`ComputerTicket`]; the caller
//! waits out the visible delay and hands the ticket back to
//! [`Session::play_computer_turn`]. A reset in between invalidates the ticket.

use chess_core::{Move, Square};
use chess_rules::{LegalMove, RulesEngine, RulesError};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{GameMode, UiConfig};
use crate::heuristic::MoveHeuristic;
use crate::orientation::{Orientation, ScreenPos};
use crate::status::GameStatus;
use crate::view::BoardView;

/// UI-only state. The game position lives in the rules engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct UiState {
    pub orientation: Orientation,
    pub selected: Option<Square>,
    /// True exactly while a computer reply is pending.
    pub computer_thinking: bool,
}

/// The interaction state derived from [`UiState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    PieceSelected(Square),
    ComputerTurn,
}

/// Permission to play one computer reply, tied to the session generation it
/// was issued in.
#[must_use = "a computer turn is pending until its ticket is played"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputerTicket {
    generation: u64,
}

/// What a click did.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// A computer reply is pending; the click was dropped.
    Ignored,
    /// The clicked piece is now selected.
    Selected(Square),
    /// The selected piece moved. `computer` is set when the reply is due.
    Moved {
        applied: LegalMove,
        computer: Option<ComputerTicket>,
    },
    /// The move attempt was refused; the selection was cleared.
    Rejected(Move),
    /// Nothing selected and nothing selectable was clicked.
    NoOp,
}

/// What happened when a computer ticket was played.
#[derive(Debug, Clone, PartialEq)]
pub enum ComputerOutcome {
    /// The computer moved.
    Played(LegalMove),
    /// The session was reset after the ticket was issued.
    Stale,
    /// The game had already ended; nothing to play.
    GameOver,
    /// The engine refused the chosen move.
    Failed(RulesError),
}

/// One board, its UI state and its computer opponent.
#[derive(Debug)]
pub struct Session<R> {
    rules: R,
    ui: UiState,
    mode: GameMode,
    hints_enabled: bool,
    heuristic: MoveHeuristic,
    /// Bumped on reset so stale computer tickets are ignored.
    generation: u64,
}

impl<R: RulesEngine> Session<R> {
    /// Starts a session on `rules` with the given configuration.
    pub fn new(rules: R, config: &UiConfig) -> Self {
        Session {
            rules,
            ui: UiState::default(),
            mode: config.mode,
            hints_enabled: config.hints,
            heuristic: MoveHeuristic::new(config.heuristic),
            generation: 0,
        }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn hints_enabled(&self) -> bool {
        self.hints_enabled
    }

    pub fn interaction_state(&self) -> InteractionState {
        match (self.ui.computer_thinking, self.ui.selected) {
            (true, _) => InteractionState::ComputerTurn,
            (false, Some(square)) => InteractionState::PieceSelected(square),
            (false, None) => InteractionState::Idle,
        }
    }

    pub fn status(&self) -> GameStatus {
        GameStatus::of(&self.rules)
    }

    /// Renders the current frame.
    pub fn view(&self) -> BoardView {
        BoardView::build(&self.rules, &self.ui, self.mode, self.hints_enabled)
    }

    /// Handles a click on a screen cell, mapped through the orientation.
    pub fn on_screen_clicked(&mut self, pos: ScreenPos) -> ClickOutcome {
        let square = self.ui.orientation.square_at(pos);
        self.on_square_clicked(square)
    }

    /// Handles a click on `square`.
    ///
    /// Picking up another of the acting player's pieces always wins over
    /// treating the click as a move target.
    pub fn on_square_clicked(&mut self, square: Square) -> ClickOutcome {
        if self.ui.computer_thinking {
            debug!(%square, "click ignored while computer is thinking");
            return ClickOutcome::Ignored;
        }

        // Clicking the selected square again falls through to a move
        // attempt onto itself, which the engine refuses: a deselect.
        if self.ui.selected != Some(square) && self.can_select(square) {
            debug!(%square, "selected");
            self.ui.selected = Some(square);
            return ClickOutcome::Selected(square);
        }

        let Some(from) = self.ui.selected.take() else {
            return ClickOutcome::NoOp;
        };

        match self.rules.apply_move(Move::candidate(from, square)) {
            Ok(applied) => {
                info!(mv = %applied.mv, status = %self.status(), "move played");
                let computer = self.begin_computer_turn();
                ClickOutcome::Moved { applied, computer }
            }
            Err(err) => {
                if matches!(err, RulesError::Fault(_)) {
                    warn!(%from, to = %square, %err, "rules engine failed to apply move");
                } else {
                    debug!(%from, to = %square, %err, "move rejected");
                }
                ClickOutcome::Rejected(Move::new(from, square))
            }
        }
    }

    /// Restarts the game and the UI state. Pending computer tickets go stale.
    pub fn on_reset(&mut self) {
        self.rules.reset();
        self.ui = UiState::default();
        self.generation += 1;
        info!(generation = self.generation, "game reset");
    }

    /// Turns the board around and drops any selection.
    pub fn on_flip(&mut self) {
        self.ui.orientation = self.ui.orientation.flipped();
        self.ui.selected = None;
        debug!(orientation = ?self.ui.orientation, "board flipped");
    }

    pub fn on_hints_toggled(&mut self) {
        self.hints_enabled = !self.hints_enabled;
    }

    pub fn set_hints_enabled(&mut self, enabled: bool) {
        self.hints_enabled = enabled;
    }

    /// Switches the game mode.
    ///
    /// Takes effect immediately: a selection the new mode does not allow is
    /// dropped, and if the computer now owns the side to move its reply is
    /// scheduled.
    pub fn set_mode(&mut self, mode: GameMode) -> Option<ComputerTicket> {
        self.mode = mode;
        if let Some(square) = self.ui.selected {
            if !self.can_select(square) {
                self.ui.selected = None;
            }
        }
        self.begin_computer_turn()
    }

    /// Plays the computer's reply for `ticket`.
    ///
    /// Always leaves `computer_thinking` false unless the ticket is stale, in
    /// which case the turn it belonged to is gone and nothing changes. A
    /// ticket is also stale once its reply has been played.
    pub fn play_computer_turn(&mut self, ticket: ComputerTicket) -> ComputerOutcome {
        if ticket.generation != self.generation || !self.ui.computer_thinking {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "stale computer ticket dropped"
            );
            return ComputerOutcome::Stale;
        }
        self.ui.computer_thinking = false;

        if self.rules.is_game_over() {
            return ComputerOutcome::GameOver;
        }
        let Some(choice) = self.heuristic.choose_move(&self.rules) else {
            return ComputerOutcome::GameOver;
        };
        match self.rules.apply_move(choice.legal.mv) {
            Ok(applied) => {
                info!(mv = %applied.mv, score = choice.score, status = %self.status(), "computer played");
                ComputerOutcome::Played(applied)
            }
            Err(err) => {
                warn!(mv = %choice.legal.mv, %err, "rules engine refused computer move");
                ComputerOutcome::Failed(err)
            }
        }
    }

    /// True if `square` holds a piece of the side to move that a human
    /// controls in the current mode.
    fn can_select(&self, square: Square) -> bool {
        match self.rules.piece_at(square) {
            Some((_, color)) => color == self.rules.side_to_move() && self.mode.is_human(color),
            None => false,
        }
    }

    /// Enters `ComputerTurn` if the computer owns the side to move.
    fn begin_computer_turn(&mut self) -> Option<ComputerTicket> {
        if self.ui.computer_thinking || self.rules.is_game_over() {
            return None;
        }
        if self.mode.computer_color() != Some(self.rules.side_to_move()) {
            return None;
        }
        self.ui.computer_thinking = true;
        self.ui.selected = None;
        debug!(generation = self.generation, "computer turn scheduled");
        Some(ComputerTicket {
            generation: self.generation,
        })
    }
}
