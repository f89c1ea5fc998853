//! Chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - an 8×8 grid of optional pieces with no rule knowledge
//! - [`pseudo_legal_moves`] - per-piece move generation that ignores self-check
//! - [`Game`] - the side to move, legal move filtering, move application and
//!   check, checkmate and stalemate detection
//! - [`perft`](movegen::perft) node counting for validating the generator
//!
//! # Architecture
//!
//! Legality is decided by simulation: each pseudo-legal candidate is played
//! on a clone of the board and kept only if the mover's king is not attacked
//! afterwards. Castling and en passant are not part of the rules.
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, Square};
//! use chess_engine::Game;
//!
//! let mut game = Game::new();
//! let moves = game.legal_moves(Square::G1);
//! assert_eq!(moves.len(), 2);
//!
//! for m in ["f2f3", "e7e5", "g2g4", "d8h4"] {
//!     game.apply_uci(m).unwrap();
//! }
//! assert!(game.is_checkmate(Color::White));
//! ```

mod board;
mod game;
pub mod movegen;

pub use board::Board;
pub use game::{Game, GameResult, MoveRejected};
pub use movegen::{pseudo_legal_moves, MoveList};
