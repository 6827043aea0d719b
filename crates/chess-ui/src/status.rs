//! Human-readable game status.

use chess_core::Color;
use chess_rules::RulesEngine;
use serde::Serialize;
use std::fmt;

/// Where the game stands, derived from the rules engine on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameStatus {
    /// The game continues.
    Ongoing { to_move: Color, in_check: bool },
    /// `mated` has no legal move and is in check.
    Checkmate { mated: Color },
    /// Stalemate, insufficient material, fifty moves or repetition.
    Draw,
}

impl GameStatus {
    /// Reads the status of the current position.
    pub fn of<R: RulesEngine + ?Sized>(rules: &R) -> Self {
        let to_move = rules.side_to_move();
        if rules.is_checkmate() {
            GameStatus::Checkmate { mated: to_move }
        } else if rules.is_draw() {
            GameStatus::Draw
        } else {
            GameStatus::Ongoing {
                to_move,
                in_check: rules.is_in_check(),
            }
        }
    }

    /// Returns true once no further moves will be accepted.
    pub const fn is_over(&self) -> bool {
        !matches!(self, GameStatus::Ongoing { .. })
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Checkmate { mated } => write!(f, "checkmate, {mated} is mated"),
            GameStatus::Draw => f.write_str("draw"),
            GameStatus::Ongoing {
                to_move,
                in_check: false,
            } => write!(f, "{to_move}'s turn"),
            GameStatus::Ongoing {
                to_move,
                in_check: true,
            } => write!(f, "{to_move}'s turn (check)"),
        }
    }
}
