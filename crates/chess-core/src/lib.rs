//! Core value types for the board UI.
//!
//! This crate provides the vocabulary shared by the rules adapter and the
//! interaction core:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for candidate and legal moves

mod color;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use mov::Move;
pub use piece::Piece;
pub use square::{File, ParseSquareError, Rank, Square};
