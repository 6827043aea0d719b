//! WebAssembly bindings for the chess board UI.
//!
//! Wraps a [`Session`] so a browser page only has to draw frames and forward
//! clicks. The page owns the timer: when [`BoardSession::pending_computer_move`]
//! returns an id after a click, it waits [`BoardSession::computer_delay_ms`] and
//! hands that id to [`BoardSession::play_computer_move`]. An id from before a
//! reset no longer matches and plays nothing.
//!
//! # Usage
//!
//! ```javascript
//! import init, { BoardSession } from 'chess-wasm';
//!
//! await init();
//!
//! const board = new BoardSession();
//! draw(board.view());
//!
//! canvas.onclick = (e) => {
//!   draw(board.clickScreen(rowOf(e), colOf(e)));
//!   const id = board.pendingComputerMove();
//!   if (id !== undefined) {
//!     setTimeout(() => {
//!       const reply = board.playComputerMove(id);
//!       if (reply.outcome !== "stale") draw(reply.view);
//!     }, board.computerDelayMs());
//!   }
//! };
//! ```

use chess_core::Square;
use chess_rules::{LegalMove, StandardRules};
use chess_ui::{
    BoardView, ClickOutcome, ComputerOutcome, ComputerTicket, GameMode, ScreenPos, Session,
    UiConfig,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// A board session driven from JavaScript.
#[wasm_bindgen]
pub struct BoardSession {
    session: Session<StandardRules>,
    pending: Option<PendingReply>,
    /// Id handed out with the next scheduled reply.
    next_id: u32,
    delay_ms: u64,
}

/// A scheduled computer reply and the id the page holds for it.
#[derive(Debug, Clone, Copy)]
struct PendingReply {
    id: u32,
    ticket: ComputerTicket,
}

/// How a `playComputerMove` call went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Played,
    /// The id did not match the pending reply; nothing changed.
    Stale,
    GameOver,
    Failed,
}

/// Result of `playComputerMove`, as sent to the page.
#[derive(Debug, Clone, Serialize)]
pub struct ComputerReply {
    pub outcome: ReplyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub played: Option<LegalMove>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub view: BoardView,
}

#[wasm_bindgen]
impl BoardSession {
    /// Creates a session with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::with_rules(StandardRules::new(), &UiConfig::default())
    }

    /// Creates a session from a TOML configuration string.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(toml: &str) -> Result<BoardSession, JsError> {
        let config = UiConfig::from_toml_str(toml).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self::with_rules(StandardRules::new(), &config))
    }

    /// Creates a session starting from a FEN position.
    #[wasm_bindgen(js_name = fromFen)]
    pub fn from_fen(fen: &str) -> Result<BoardSession, JsError> {
        let rules = StandardRules::from_fen(fen).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self::with_rules(rules, &UiConfig::default()))
    }

    /// Handles a click on an algebraic square (e.g. "e2") and returns the new view.
    #[wasm_bindgen(js_name = clickSquare)]
    pub fn click_square(&mut self, square: &str) -> Result<JsValue, JsError> {
        let square = Square::from_algebraic(square)
            .ok_or_else(|| JsError::new(&format!("Invalid square: {}", square)))?;
        self.click(square);
        self.view()
    }

    /// Handles a click on a screen cell and returns the new view.
    #[wasm_bindgen(js_name = clickScreen)]
    pub fn click_screen(&mut self, row: u8, col: u8) -> Result<JsValue, JsError> {
        let pos = ScreenPos::new(row, col)
            .ok_or_else(|| JsError::new(&format!("Off-board cell: {}, {}", row, col)))?;
        self.click_at(pos);
        self.view()
    }

    /// Restarts the game. A pending computer move is dropped.
    pub fn reset(&mut self) -> Result<JsValue, JsError> {
        self.restart();
        self.view()
    }

    pub fn flip(&mut self) -> Result<JsValue, JsError> {
        self.session.on_flip();
        self.view()
    }

    #[wasm_bindgen(js_name = setHints)]
    pub fn set_hints(&mut self, enabled: bool) -> Result<JsValue, JsError> {
        self.session.set_hints_enabled(enabled);
        self.view()
    }

    #[wasm_bindgen(js_name = toggleHints)]
    pub fn toggle_hints(&mut self) -> Result<JsValue, JsError> {
        self.session.on_hints_toggled();
        self.view()
    }

    /// Switches between "human-vs-human" ("pvp") and "human-vs-computer" ("pvc").
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&mut self, mode: &str) -> Result<JsValue, JsError> {
        let mode = mode
            .parse::<GameMode>()
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.change_mode(mode);
        self.view()
    }

    /// Returns the current frame as a JS object.
    pub fn view(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.frame()).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Returns the status line, e.g. "white's turn".
    pub fn status(&self) -> String {
        self.session.status().to_string()
    }

    /// Returns true if a computer move is waiting to be played.
    #[wasm_bindgen(js_name = computerMovePending)]
    pub fn computer_move_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Id of the pending computer move, to pass to `playComputerMove`.
    #[wasm_bindgen(js_name = pendingComputerMove)]
    pub fn pending_computer_move(&self) -> Option<u32> {
        self.pending.map(|p| p.id)
    }

    /// Milliseconds the page should wait before playing the computer move.
    #[wasm_bindgen(js_name = computerDelayMs)]
    pub fn computer_delay_ms(&self) -> u32 {
        u32::try_from(self.delay_ms).unwrap_or(u32::MAX)
    }

    /// Plays the computer move scheduled under `id`.
    ///
    /// Returns `{ outcome, played?, error?, view }`. `outcome` is `"stale"`
    /// when `id` is not the pending move, e.g. a timer set before a reset.
    #[wasm_bindgen(js_name = playComputerMove)]
    pub fn play_computer_move(&mut self, id: u32) -> Result<JsValue, JsError> {
        let reply = self.reply(id);
        serde_wasm_bindgen::to_value(&reply).map_err(|e| JsError::new(&e.to_string()))
    }
}

// Rust-side operations behind the JS methods.
impl BoardSession {
    fn with_rules(rules: StandardRules, config: &UiConfig) -> Self {
        BoardSession {
            session: Session::new(rules, config),
            pending: None,
            next_id: 1,
            delay_ms: config.computer_delay_ms,
        }
    }

    /// The current frame.
    pub fn frame(&self) -> BoardView {
        self.session.view()
    }

    fn click(&mut self, square: Square) {
        let outcome = self.session.on_square_clicked(square);
        self.track(outcome);
    }

    fn click_at(&mut self, pos: ScreenPos) {
        let outcome = self.session.on_screen_clicked(pos);
        self.track(outcome);
    }

    fn track(&mut self, outcome: ClickOutcome) {
        if let ClickOutcome::Moved {
            computer: Some(ticket),
            ..
        } = outcome
        {
            self.schedule(ticket);
        }
    }

    fn schedule(&mut self, ticket: ComputerTicket) {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.pending = Some(PendingReply { id, ticket });
    }

    fn restart(&mut self) {
        self.session.on_reset();
        self.pending = None;
    }

    fn change_mode(&mut self, mode: GameMode) {
        if let Some(ticket) = self.session.set_mode(mode) {
            self.schedule(ticket);
        }
    }

    /// Plays the pending reply if `id` names it. A mismatched id leaves the
    /// pending reply in place.
    fn play_pending(&mut self, id: u32) -> ComputerOutcome {
        match self.pending {
            Some(pending) if pending.id == id => {
                self.pending = None;
                self.session.play_computer_turn(pending.ticket)
            }
            _ => ComputerOutcome::Stale,
        }
    }

    fn reply(&mut self, id: u32) -> ComputerReply {
        let (outcome, played, error) = match self.play_pending(id) {
            ComputerOutcome::Played(mv) => (ReplyKind::Played, Some(mv), None),
            ComputerOutcome::Stale => (ReplyKind::Stale, None, None),
            ComputerOutcome::GameOver => (ReplyKind::GameOver, None, None),
            ComputerOutcome::Failed(err) => (ReplyKind::Failed, None, Some(err.to_string())),
        };
        ComputerReply {
            outcome,
            played,
            error,
            view: self.frame(),
        }
    }
}

impl Default for BoardSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialization function called when WASM module loads.
#[wasm_bindgen(start)]
pub fn init() {}
