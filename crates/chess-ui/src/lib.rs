//! Interaction core for a single-board chess UI.
//!
//! The crate turns raw board clicks into legal moves against a
//! [`RulesEngine`](chess_rules::RulesEngine), derives what every square
//! should look like, and drives a shallow computer opponent.
//!
//! # Overview
//!
//! - [`Session`] - the click state machine: selection, move attempts,
//!   orientation, reset, and computer turns
//! - [`BoardView`] / [`render`] - pure view model, 64 [`SquareView`]s in screen order
//! - [`MoveHeuristic`] - one-ply capture heuristic with random tie-breaking
//! - [`GameStatus`] - status line derived from the engine
//! - [`UiConfig`] - TOML configuration
//! - `GameDriver` - async wrapper that schedules the computer's reply
//!   (feature `runtime`)
//!
//! # Example
//!
//! ```
//! use chess_core::Square;
//! use chess_rules::StandardRules;
//! use chess_ui::{ClickOutcome, GameMode, Session, UiConfig};
//!
//! let config = UiConfig { mode: GameMode::HumanVsHuman, ..UiConfig::default() };
//! let mut session = Session::new(StandardRules::new(), &config);
//!
//! session.on_square_clicked(Square::E2);
//! let outcome = session.on_square_clicked(Square::E4);
//! assert!(matches!(outcome, ClickOutcome::Moved { .. }));
//! assert_eq!(session.view().status_text, "black's turn");
//! ```

pub mod config;
#[cfg(feature = "runtime")]
pub mod driver;
pub mod heuristic;
pub mod orientation;
pub mod session;
pub mod status;
pub mod view;

pub use config::{ConfigError, GameMode, UiConfig};
#[cfg(feature = "runtime")]
pub use driver::{FrameReceiver, GameDriver};
pub use heuristic::{HeuristicConfig, MoveHeuristic, ScoredMove};
pub use orientation::{Orientation, ScreenPos, Shade};
pub use session::{
    ClickOutcome, ComputerOutcome, ComputerTicket, InteractionState, Session, UiState,
};
pub use status::GameStatus;
pub use view::{render, BoardView, HintKind, PieceView, SquareView};
