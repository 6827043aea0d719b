//! Screen coordinates and board orientation.
//!
//! The screen is an 8x8 grid addressed by `(row, col)`, row 0 at the top.
//! Which algebraic square sits at a screen cell depends on the
//! [`Orientation`]; the mapping is a bijection for either orientation.

use chess_core::{File, Rank, Square};
use serde::{Deserialize, Serialize};

/// Which side is drawn at the bottom of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    #[default]
    WhiteBottom,
    BlackBottom,
}

impl Orientation {
    /// The other orientation.
    pub const fn flipped(self) -> Self {
        match self {
            Orientation::WhiteBottom => Orientation::BlackBottom,
            Orientation::BlackBottom => Orientation::WhiteBottom,
        }
    }

    /// The algebraic square shown at `pos`.
    ///
    /// White-bottom puts a8 top-left; black-bottom mirrors both axes.
    pub fn square_at(self, pos: ScreenPos) -> Square {
        let (row, col) = self.unmirror(pos.row, pos.col);
        Square::new(
            File::ALL[usize::from(col)],
            Rank::ALL[usize::from(7 - row)],
        )
    }

    /// The screen cell showing `square`. Inverse of [`square_at`](Self::square_at).
    pub fn screen_pos(self, square: Square) -> ScreenPos {
        let (row, col) = self.unmirror(7 - square.rank().index(), square.file().index());
        ScreenPos { row, col }
    }

    // Mirroring both axes is its own inverse.
    fn unmirror(self, row: u8, col: u8) -> (u8, u8) {
        match self {
            Orientation::WhiteBottom => (row, col),
            Orientation::BlackBottom => (7 - row, 7 - col),
        }
    }
}

/// Background shade of a screen cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shade {
    Light,
    Dark,
}

/// A cell on the screen grid. Row 0 is the top row, col 0 the left column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ScreenPos {
    row: u8,
    col: u8,
}

impl ScreenPos {
    /// Creates a screen position, or `None` if off the board.
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(ScreenPos { row, col })
        } else {
            None
        }
    }

    /// All 64 cells in row-major order.
    pub fn all() -> impl Iterator<Item = ScreenPos> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| ScreenPos { row, col }))
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Position in row-major order (0-63).
    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    /// Cells alternate light and dark, starting light at the top-left.
    /// The pattern does not depend on orientation.
    pub const fn shade(self) -> Shade {
        if (self.row + self.col) % 2 == 0 {
            Shade::Light
        } else {
            Shade::Dark
        }
    }
}
