//! Move representation.

use crate::{Piece, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A chess move: origin, destination and an optional promotion piece.
///
/// A move built from two clicks is a *candidate* until the rules engine
/// accepts it. Candidates always ask for a queen when promoting; there is
/// no under-promotion choice in this UI.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
}

impl Move {
    /// Creates a move without a promotion piece.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Creates a candidate move from two clicks, promoting to a queen if the
    /// move turns out to be a promotion.
    #[inline]
    pub const fn candidate(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: Some(Piece::Queen),
        }
    }

    /// Returns true if `legal` is the move this candidate asks for.
    ///
    /// The candidate's promotion piece only matters when `legal` promotes.
    pub fn matches(self, legal: Move) -> bool {
        self.from == legal.from
            && self.to == legal.to
            && (legal.promotion.is_none() || legal.promotion == self.promotion)
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        let promo = match self.promotion {
            Some(Piece::Knight) => "n",
            Some(Piece::Bishop) => "b",
            Some(Piece::Rook) => "r",
            Some(Piece::Queen) => "q",
            _ => "",
        };
        format!("{}{}{}", self.from, self.to, promo)
    }

    /// Parses a move from UCI notation.
    pub fn from_uci(s: &str) -> Option<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => match c.to_ascii_lowercase() {
                'n' => Some(Piece::Knight),
                'b' => Some(Piece::Bishop),
                'r' => Some(Piece::Rook),
                'q' => Some(Piece::Queen),
                _ => return None,
            },
        };
        Some(Move {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
