//! Pseudo-legal move generation.
//!
//! Generation for a single piece respects board edges, blocking pieces and
//! friendly occupancy only. Whether a move exposes the mover's own king is
//! decided by [`Game`](crate::Game), which filters these candidates.

mod pawn;
pub mod perft;

use crate::Board;
use chess_core::{Move, PieceKind, Square};

/// Orthogonal rays as (rank, file) steps.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Diagonal rays as (rank, file) steps.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Queen rays: the union of rook and bishop rays.
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// The eight squares around a king.
pub const KING_OFFSETS: [(i8, i8); 8] = QUEEN_DIRECTIONS;

/// The eight knight jumps.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// A list of moves with a fixed maximum capacity.
///
/// Holds the moves of a single piece (at most 27 for a queen), so a
/// fixed-size array avoids heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves the list can hold.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns true if `m` is in the list.
    #[inline]
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    /// Returns true if any move in the list lands on `sq`.
    #[inline]
    pub fn targets(&self, sq: Square) -> bool {
        self.as_slice().iter().any(|m| m.to == sq)
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::iter::Take<std::array::IntoIter<Move, { MoveList::MAX_MOVES }>>;

    fn into_iter(self) -> Self::IntoIter {
        let len = self.len;
        self.moves.into_iter().take(len)
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates the pseudo-legal moves of the piece standing on `from`.
///
/// Returns an empty list when `from` is empty.
pub fn pseudo_legal_moves(board: &Board, from: Square) -> MoveList {
    let mut moves = MoveList::new();
    let Some(piece) = board.occupant(from) else {
        return moves;
    };

    match piece.kind {
        PieceKind::King => generate_steps(board, from, &KING_OFFSETS, &mut moves),
        PieceKind::Knight => generate_steps(board, from, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::Queen => generate_slides(board, from, &QUEEN_DIRECTIONS, &mut moves),
        PieceKind::Rook => generate_slides(board, from, &ROOK_DIRECTIONS, &mut moves),
        PieceKind::Bishop => generate_slides(board, from, &BISHOP_DIRECTIONS, &mut moves),
        PieceKind::Pawn => pawn::generate_pawn_moves(board, from, piece.color, &mut moves),
    }

    moves
}

/// Returns true if a piece from `from` may land on `to`: the square is
/// empty or holds an enemy.
#[inline]
fn can_land(board: &Board, from: Square, to: Square) -> bool {
    match (board.occupant(from), board.occupant(to)) {
        (Some(mover), Some(target)) => mover.color != target.color,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Single-step generation for kings and knights.
fn generate_steps(board: &Board, from: Square, offsets: &[(i8, i8)], moves: &mut MoveList) {
    for &(dr, df) in offsets {
        if let Some(to) = from.offset(dr, df) {
            if can_land(board, from, to) {
                moves.push(Move::normal(from, to));
            }
        }
    }
}

/// Ray generation for queens, rooks and bishops.
///
/// Each ray stops at the edge, before a friendly piece, or on an enemy
/// piece (which is included as a capture).
fn generate_slides(board: &Board, from: Square, directions: &[(i8, i8)], moves: &mut MoveList) {
    for &(dr, df) in directions {
        let mut current = from;
        while let Some(to) = current.offset(dr, df) {
            if !can_land(board, from, to) {
                break;
            }
            moves.push(Move::normal(from, to));
            if !board.is_empty(to) {
                break;
            }
            current = to;
        }
    }
}
