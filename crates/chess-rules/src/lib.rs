//! Rules engine interface for the board UI.
//!
//! The interaction core never implements chess rules itself. It talks to a
//! [`RulesEngine`], which owns the authoritative game state: whose turn it
//! is, which moves are legal, and whether the game has ended.
//!
//! [`StandardRules`] is the standard-chess implementation, backed by the
//! `shakmaty` move generator.
//!
//! # Example
//!
//! ```
//! use chess_core::{Move, Square};
//! use chess_rules::{MoveFilter, RulesEngine, StandardRules};
//!
//! let mut rules = StandardRules::new();
//! assert_eq!(rules.legal_moves(MoveFilter::all()).len(), 20);
//!
//! rules.apply_move(Move::candidate(Square::E2, Square::E4)).unwrap();
//! assert_eq!(rules.side_to_move(), chess_core::Color::Black);
//! ```

mod convert;
mod standard;

pub use standard::StandardRules;

use chess_core::{Color, Move, Piece, Square};
use serde::Serialize;
use thiserror::Error;

/// Why the rules engine refused to apply a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// No legal move matches the candidate.
    #[error("illegal move: {0}")]
    IllegalMove(Move),
    /// The game has already ended.
    #[error("game is over")]
    GameOver,
    /// The engine failed while applying a move it had listed as legal.
    #[error("rules engine fault: {0}")]
    Fault(String),
    /// A position could not be set up from FEN.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
}

/// A legal move annotated with what moves and what it captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegalMove {
    pub mv: Move,
    /// The piece being moved (a promoting pawn is still a pawn here).
    pub piece: Piece,
    /// The captured piece, including the pawn taken en passant.
    pub captured: Option<Piece>,
}

impl LegalMove {
    /// Returns true if this move takes an opposing piece.
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Restricts [`RulesEngine::legal_moves`] to a subset of moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveFilter {
    pub from: Option<Square>,
}

impl MoveFilter {
    /// Every legal move for the side to move.
    pub const fn all() -> Self {
        MoveFilter { from: None }
    }

    /// Only moves starting on `square`.
    pub const fn from_square(square: Square) -> Self {
        MoveFilter {
            from: Some(square),
        }
    }

    /// Returns true if `mv` passes this filter.
    pub fn accepts(&self, mv: &Move) -> bool {
        self.from.map_or(true, |from| mv.from == from)
    }
}

/// The authoritative chess state consumed by the board UI.
///
/// Read-only queries are infallible; only [`apply_move`](RulesEngine::apply_move)
/// can fail. Move order returned by [`legal_moves`](RulesEngine::legal_moves)
/// is stable for a given position, and callers rely on it for tie-breaking.
pub trait RulesEngine {
    /// The side whose turn it is.
    fn side_to_move(&self) -> Color;

    /// The piece on `square`, if any.
    fn piece_at(&self, square: Square) -> Option<(Piece, Color)>;

    /// Legal moves for the side to move, in engine order.
    ///
    /// For castling, `mv.to` is the king's destination square.
    fn legal_moves(&self, filter: MoveFilter) -> Vec<LegalMove>;

    /// Applies the legal move matching `candidate`.
    ///
    /// On success returns the annotated legal move that was played. The
    /// position is unchanged on error.
    fn apply_move(&mut self, candidate: Move) -> Result<LegalMove, RulesError>;

    /// True if the side to move is checkmated.
    fn is_checkmate(&self) -> bool;

    /// True if the game is drawn.
    fn is_draw(&self) -> bool;

    /// True if the side to move is in check.
    fn is_in_check(&self) -> bool;

    /// Returns to the standard starting position.
    fn reset(&mut self);

    /// True once the game has ended by checkmate or draw.
    fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }
}
