//! Core types for chess.
//!
//! This crate provides the value types shared by the rules engine and its
//! callers:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for move representation
//! - FEN-style snapshot parsing and serialization

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::Move;
pub use piece::{Piece, PieceKind};
pub use square::{File, ParseSquareError, Rank, Square};
