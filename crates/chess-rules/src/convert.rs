//! Conversions between `chess-core` types and `shakmaty` types.

use chess_core::{Color, File, Move, Piece, Rank, Square};
use shakmaty::Role;

use crate::LegalMove;

pub(crate) fn square_to_shakmaty(sq: Square) -> shakmaty::Square {
    shakmaty::Square::from_coords(
        shakmaty::File::new(u32::from(sq.file().index())),
        shakmaty::Rank::new(u32::from(sq.rank().index())),
    )
}

pub(crate) fn square_from_shakmaty(sq: shakmaty::Square) -> Square {
    Square::new(
        File::ALL[usize::from(sq.file())],
        Rank::ALL[usize::from(sq.rank())],
    )
}

pub(crate) fn piece_from_role(role: Role) -> Piece {
    match role {
        Role::Pawn => Piece::Pawn,
        Role::Knight => Piece::Knight,
        Role::Bishop => Piece::Bishop,
        Role::Rook => Piece::Rook,
        Role::Queen => Piece::Queen,
        Role::King => Piece::King,
    }
}

pub(crate) fn color_from_shakmaty(color: shakmaty::Color) -> Color {
    match color {
        shakmaty::Color::White => Color::White,
        shakmaty::Color::Black => Color::Black,
    }
}

/// Where the king lands when castling; shakmaty encodes castling as
/// king-takes-own-rook.
fn castle_target(king: shakmaty::Square, rook: shakmaty::Square) -> shakmaty::Square {
    let file = if rook.file().char() > king.file().char() {
        shakmaty::File::G
    } else {
        shakmaty::File::C
    };
    shakmaty::Square::from_coords(file, king.rank())
}

/// Annotates a shakmaty move for the UI.
///
/// Returns `None` for moves the UI never plays: under-promotions and drops.
pub(crate) fn annotate(m: &shakmaty::Move) -> Option<LegalMove> {
    if matches!(m.promotion(), Some(role) if role != Role::Queen) {
        return None;
    }
    let from = m.from()?;
    let to = match *m {
        shakmaty::Move::Castle { king, rook } => castle_target(king, rook),
        _ => m.to(),
    };
    Some(LegalMove {
        mv: Move {
            from: square_from_shakmaty(from),
            to: square_from_shakmaty(to),
            promotion: m.promotion().map(piece_from_role),
        },
        piece: piece_from_role(m.role()),
        captured: m.capture().map(piece_from_role),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squares_map_both_ways() {
        for sq in Square::all() {
            assert_eq!(square_from_shakmaty(square_to_shakmaty(sq)), sq);
        }
        assert_eq!(square_to_shakmaty(Square::E4), shakmaty::Square::E4);
    }

    #[test]
    fn castling_lands_on_king_destination() {
        let short = shakmaty::Move::Castle {
            king: shakmaty::Square::E1,
            rook: shakmaty::Square::H1,
        };
        let long = shakmaty::Move::Castle {
            king: shakmaty::Square::E8,
            rook: shakmaty::Square::A8,
        };
        assert_eq!(annotate(&short).unwrap().mv.to.to_string(), "g1");
        assert_eq!(annotate(&long).unwrap().mv.to.to_string(), "c8");
    }

    #[test]
    fn under_promotions_are_dropped() {
        let knight = shakmaty::Move::Normal {
            role: Role::Pawn,
            from: shakmaty::Square::A7,
            capture: None,
            to: shakmaty::Square::A8,
            promotion: Some(Role::Knight),
        };
        assert!(annotate(&knight).is_none());
    }
}
