//! Standard chess rules backed by `shakmaty`.

use chess_core::{Color, Move, Piece, Square};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position};
use tracing::debug;

use crate::convert::{annotate, color_from_shakmaty, piece_from_role, square_to_shakmaty};
use crate::{LegalMove, MoveFilter, RulesEngine, RulesError};

/// Standard chess rules (FIDE).
///
/// Wraps a `shakmaty` position and adds the history needed for repetition
/// draws:
/// - Check, checkmate, and stalemate detection
/// - Insufficient material
/// - 50-move rule (100 half-moves)
/// - Threefold repetition of board and side to move
#[derive(Debug, Clone)]
pub struct StandardRules {
    position: Chess,
    /// One key per position reached, starting with the initial one.
    history: Vec<String>,
}

impl StandardRules {
    /// Creates a game at the standard starting position.
    pub fn new() -> Self {
        Self::with_position(Chess::default())
    }

    /// Creates a game from a FEN string.
    ///
    /// [`reset`](RulesEngine::reset) still returns to the standard start.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let fen: Fen = fen
            .trim()
            .parse()
            .map_err(|e: shakmaty::fen::ParseFenError| RulesError::InvalidFen(e.to_string()))?;
        let position: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| RulesError::InvalidFen(e.to_string()))?;
        Ok(Self::with_position(position))
    }

    fn with_position(position: Chess) -> Self {
        let history = vec![repetition_key(&position)];
        StandardRules { position, history }
    }

    /// How many times the current position has occurred.
    fn repetitions(&self) -> usize {
        match self.history.last() {
            Some(current) => self.history.iter().filter(|k| *k == current).count(),
            None => 0,
        }
    }
}

impl Default for StandardRules {
    fn default() -> Self {
        Self::new()
    }
}

/// Board contents plus side to move, one char per square.
fn repetition_key(position: &Chess) -> String {
    let board = position.board();
    let mut key: String = Square::all()
        .map(|sq| {
            board.piece_at(square_to_shakmaty(sq)).map_or('.', |p| {
                piece_from_role(p.role).to_fen_char(color_from_shakmaty(p.color))
            })
        })
        .collect();
    key.push(match position.turn() {
        shakmaty::Color::White => 'w',
        shakmaty::Color::Black => 'b',
    });
    key
}

impl RulesEngine for StandardRules {
    fn side_to_move(&self) -> Color {
        color_from_shakmaty(self.position.turn())
    }

    fn piece_at(&self, square: Square) -> Option<(Piece, Color)> {
        self.position
            .board()
            .piece_at(square_to_shakmaty(square))
            .map(|p| (piece_from_role(p.role), color_from_shakmaty(p.color)))
    }

    fn legal_moves(&self, filter: MoveFilter) -> Vec<LegalMove> {
        self.position
            .legal_moves()
            .iter()
            .filter_map(annotate)
            .filter(|lm| filter.accepts(&lm.mv))
            .collect()
    }

    fn apply_move(&mut self, candidate: Move) -> Result<LegalMove, RulesError> {
        if self.is_game_over() {
            return Err(RulesError::GameOver);
        }

        // Find the engine's own move so castling and en passant carry the
        // right encoding.
        let found = self.position.legal_moves().into_iter().find_map(|m| {
            let legal = annotate(&m)?;
            candidate.matches(legal.mv).then_some((m, legal))
        });
        let Some((m, legal)) = found else {
            // Report the squares clicked, not the implied queen.
            return Err(RulesError::IllegalMove(Move::new(candidate.from, candidate.to)));
        };

        self.position = self
            .position
            .clone()
            .play(&m)
            .map_err(|e| RulesError::Fault(e.to_string()))?;
        self.history.push(repetition_key(&self.position));
        debug!(mv = %legal.mv, piece = %legal.piece, "rules applied move");
        Ok(legal)
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn is_draw(&self) -> bool {
        self.position.is_stalemate()
            || self.position.is_insufficient_material()
            || self.position.halfmoves() >= 100
            || self.repetitions() >= 3
    }

    fn is_in_check(&self) -> bool {
        self.position.is_check()
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
