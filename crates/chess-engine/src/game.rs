//! Game state: a board, the side to move, and the legality rules.
//!
//! [`Game`] derives legal moves by simulating every pseudo-legal candidate
//! on a clone of the board and discarding those that leave the mover's own
//! king attacked. Checkmate and stalemate are evaluated on demand; no
//! terminal state is stored.

use crate::movegen::{pseudo_legal_moves, MoveList};
use crate::Board;
use chess_core::{Color, FenError, FenParser, Move, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

/// Reason a move was not applied. The game is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveRejected {
    /// There is no piece on the origin square.
    #[error("no piece on {0}")]
    EmptySquare(Square),
    /// The piece on the origin square belongs to the side not on move.
    #[error("piece on {square} does not belong to {turn}, who is on move")]
    WrongTurn { square: Square, turn: Color },
    /// The move is not among the legal moves of the origin piece.
    #[error("illegal move: {0}")]
    Illegal(Move),
    /// The move text could not be parsed.
    #[error("unreadable move: '{0}'")]
    Notation(String),
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Black is checkmated.
    WhiteWins,
    /// White is checkmated.
    BlackWins,
    /// The side to move has no legal move and is not in check.
    Stalemate,
}

/// A chess game: one board and whose turn it is.
///
/// The only mutation is [`apply_move`](Game::apply_move), which either
/// commits a legal move and passes the turn, or changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    turn: Color,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game from the standard opening with White to move.
    pub fn new() -> Self {
        Game {
            board: Board::standard(),
            turn: Color::White,
        }
    }

    /// Creates a game from an arbitrary board and side to move.
    pub fn from_board(board: Board, turn: Color) -> Self {
        Game { board, turn }
    }

    /// Creates a game from a snapshot string (see [`FenParser`]).
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        let board = Board::from_placement(&parsed.piece_placement)?;
        Ok(Self::from_board(board, parsed.active_color))
    }

    /// Returns the snapshot string for this game.
    pub fn to_fen(&self) -> String {
        FenParser {
            piece_placement: self.board.to_placement(),
            active_color: self.turn,
        }
        .to_fen()
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the legal moves of the piece on `from`.
    ///
    /// The mover is the owner of that piece, whoever is on move. An empty
    /// square yields no moves.
    pub fn legal_moves(&self, from: Square) -> MoveList {
        let Some(piece) = self.board.occupant(from) else {
            return MoveList::new();
        };

        let mut moves = pseudo_legal_moves(&self.board, from);
        moves.retain(|m| {
            let mut scratch = self.board.clone();
            play_unchecked(&mut scratch, *m);
            let keeps_king_safe = !king_attacked(&scratch, piece.color);
            if !keeps_king_safe {
                trace!(mv = %m, "candidate leaves king in check");
            }
            keeps_king_safe
        });
        moves
    }

    /// Returns every legal move available to `color`, in square order.
    ///
    /// Arbitrary arrangements can exceed the per-piece list capacity, so the
    /// moves are collected on the heap.
    pub fn all_legal_moves(&self, color: Color) -> Vec<Move> {
        self.board
            .pieces()
            .filter(|(_, piece)| piece.color == color)
            .flat_map(|(sq, _)| self.legal_moves(sq))
            .collect()
    }

    /// Applies `m` for the side to move.
    ///
    /// Fails without touching the game if the origin is empty, holds a piece
    /// of the side not on move, or `m` is not one of that piece's legal moves.
    pub fn apply_move(&mut self, m: Move) -> Result<(), MoveRejected> {
        if let Err(reason) = self.check_move(m) {
            debug!(mv = %m, turn = %self.turn, %reason, "move rejected");
            return Err(reason);
        }

        play_unchecked(&mut self.board, m);
        debug!(mv = %m, by = %self.turn, "move applied");
        self.turn = self.turn.opposite();
        Ok(())
    }

    /// Returns the game after `m`, which must come from
    /// [`all_legal_moves`](Self::all_legal_moves) for the side to move.
    pub(crate) fn after_generated(&self, m: Move) -> Game {
        debug_assert!(self.check_move(m).is_ok(), "{m} is not legal here");
        let mut next = self.clone();
        play_unchecked(&mut next.board, m);
        next.turn = next.turn.opposite();
        next
    }

    /// Parses coordinate notation (`e2e4`, `e7e8q`, `e2 e4`) and applies it.
    pub fn apply_uci(&mut self, text: &str) -> Result<Move, MoveRejected> {
        let m = Move::from_uci(text).ok_or_else(|| MoveRejected::Notation(text.to_string()))?;
        self.apply_move(m)?;
        Ok(m)
    }

    fn check_move(&self, m: Move) -> Result<(), MoveRejected> {
        let piece = self
            .board
            .occupant(m.from)
            .ok_or(MoveRejected::EmptySquare(m.from))?;
        if piece.color != self.turn {
            return Err(MoveRejected::WrongTurn {
                square: m.from,
                turn: self.turn,
            });
        }
        if !self.legal_moves(m.from).contains(&m) {
            return Err(MoveRejected::Illegal(m));
        }
        Ok(())
    }

    /// Returns true if a king of `color` stands on a square some enemy piece
    /// could move to.
    pub fn in_check(&self, color: Color) -> bool {
        king_attacked(&self.board, color)
    }

    /// Returns true if `color` has at least one legal move.
    pub fn has_any_legal_move(&self, color: Color) -> bool {
        self.board
            .pieces()
            .any(|(sq, piece)| piece.color == color && !self.legal_moves(sq).is_empty())
    }

    /// Returns true if `color` is in check with no legal move.
    pub fn is_checkmate(&self, color: Color) -> bool {
        !self.has_any_legal_move(color) && self.in_check(color)
    }

    /// Returns true if `color` is not in check but has no legal move.
    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.has_any_legal_move(color) && !self.in_check(color)
    }

    /// Returns the result if the side to move is checkmated or stalemated.
    pub fn outcome(&self) -> Option<GameResult> {
        if self.has_any_legal_move(self.turn) {
            return None;
        }
        if !self.in_check(self.turn) {
            return Some(GameResult::Stalemate);
        }
        Some(match self.turn {
            Color::White => GameResult::BlackWins,
            Color::Black => GameResult::WhiteWins,
        })
    }
}

/// Moves the occupant of `m.from` to `m.to` with no legality checks,
/// substituting the promotion piece if there is one.
fn play_unchecked(board: &mut Board, m: Move) {
    let moved = board.take(m.from).map(|piece| match m.promotion {
        Some(kind) => Piece::new(piece.color, kind),
        None => piece,
    });
    board.place(m.to, moved);
}

/// Scans the board for enemy pieces whose pseudo-legal moves reach any king
/// of `color`. Makes no assumption about the number of kings.
fn king_attacked(board: &Board, color: Color) -> bool {
    let kings = board.squares_of(Piece::new(color, PieceKind::King));
    if kings.is_empty() {
        return false;
    }

    board
        .pieces()
        .filter(|(_, piece)| piece.color != color)
        .any(|(sq, _)| {
            let attacks = pseudo_legal_moves(board, sq);
            kings.iter().any(|&king| attacks.targets(king))
        })
}
