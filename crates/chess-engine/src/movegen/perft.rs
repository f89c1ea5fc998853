//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Castling and en passant are not generated, so reference counts only
//! match up to the depth where those rules first become possible (4 plies
//! from the opening).

use crate::Game;

/// Counts the number of leaf nodes at the given depth for the side to move.
pub fn perft(game: &Game, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = game.all_legal_moves(game.turn());

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|&m| perft(&game.after_generated(m), depth - 1))
        .sum()
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(game: &Game, depth: u32) -> Vec<(String, u64)> {
    let moves = game.all_legal_moves(game.turn());
    let mut results = Vec::with_capacity(moves.len());

    for m in moves {
        let nodes = if depth > 1 {
            perft(&game.after_generated(m), depth - 1)
        } else {
            1
        };
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
