//! Pawn move generation.

use super::MoveList;
use crate::Board;
use chess_core::{Color, Move, PieceKind, Square};

/// Generates pseudo-legal pawn moves: pushes, the double push from the
/// starting rank, and diagonal captures. No en passant.
///
/// Every move landing on the promotion rank is emitted once per promotion
/// kind and never without one.
pub(super) fn generate_pawn_moves(board: &Board, from: Square, us: Color, moves: &mut MoveList) {
    let dir = us.pawn_direction();

    if let Some(one) = from.offset(dir, 0).filter(|&to| board.is_empty(to)) {
        push_pawn_move(from, one, us, moves);

        if from.rank() == us.pawn_start_rank() {
            if let Some(two) = one.offset(dir, 0).filter(|&to| board.is_empty(to)) {
                push_pawn_move(from, two, us, moves);
            }
        }
    }

    for side in [-1, 1] {
        let Some(to) = from.offset(dir, side) else {
            continue;
        };
        if board.occupant(to).is_some_and(|target| target.color != us) {
            push_pawn_move(from, to, us, moves);
        }
    }
}

fn push_pawn_move(from: Square, to: Square, us: Color, moves: &mut MoveList) {
    if to.rank() == us.promotion_rank() {
        for kind in PieceKind::PROMOTIONS {
            moves.push(Move::promoting(from, to, kind));
        }
    } else {
        moves.push(Move::normal(from, to));
    }
}
