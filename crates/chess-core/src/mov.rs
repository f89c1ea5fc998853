//! Move representation.

use crate::{PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A chess move: origin, destination and an optional promotion piece.
///
/// `promotion` is only ever `Some` for a pawn arriving on its last rank.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, promotion: Option<PieceKind>) -> Self {
        Move {
            from,
            to,
            promotion,
        }
    }

    /// Creates a move without promotion.
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, None)
    }

    /// Creates a promoting move.
    #[inline]
    pub const fn promoting(from: Square, to: Square, kind: PieceKind) -> Self {
        Self::new(from, to, Some(kind))
    }

    /// Returns true if this move promotes a pawn.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.promotion {
            Some(kind) => format!("{}{}{}", self.from, self.to, kind.to_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Parses a move from coordinate notation.
    ///
    /// Accepts "e2e4", "e7e8q" and the spaced form "e2 e4". Only knight,
    /// bishop, rook and queen are accepted as promotion letters.
    pub fn from_uci(s: &str) -> Option<Self> {
        let compact: String = s.split_whitespace().collect();
        if !compact.is_ascii() || compact.len() < 4 || compact.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&compact[0..2])?;
        let to = Square::from_algebraic(&compact[2..4])?;
        let promotion = match compact[4..].chars().next() {
            Some(c) => {
                let kind = PieceKind::from_char(c)?;
                if !kind.is_promotion_target() {
                    return None;
                }
                Some(kind)
            }
            None => None,
        };
        Some(Move::new(from, to, promotion))
    }

    /// A null move (used as placeholder, not a legal move).
    pub const NULL: Move = Move::normal(Square::A1, Square::A1);
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{File, Rank};

    #[test]
    fn move_fields() {
        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        let m = Move::normal(e2, e4);

        assert_eq!(m.from, e2);
        assert_eq!(m.to, e4);
        assert_eq!(m.promotion, None);
        assert!(!m.is_promotion());
    }

    #[test]
    fn move_uci() {
        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(Move::normal(e2, e4).to_uci(), "e2e4");

        let e7 = Square::new(File::E, Rank::R7);
        let e8 = Square::new(File::E, Rank::R8);
        let promo = Move::promoting(e7, e8, PieceKind::Queen);
        assert_eq!(promo.to_uci(), "e7e8q");
        assert_eq!(Move::promoting(e7, e8, PieceKind::Knight).to_uci(), "e7e8n");
    }

    #[test]
    fn move_from_uci() {
        let m = Move::from_uci("e2e4").unwrap();
        assert_eq!(m.from.to_algebraic(), "e2");
        assert_eq!(m.to.to_algebraic(), "e4");
        assert_eq!(m.promotion, None);

        let promo = Move::from_uci("e7e8Q").unwrap();
        assert_eq!(promo.promotion, Some(PieceKind::Queen));

        assert!(Move::from_uci("invalid").is_none());
        assert!(Move::from_uci("e2e9").is_none());
    }

    #[test]
    fn move_from_uci_spaced() {
        assert_eq!(Move::from_uci("a2 a4"), Move::from_uci("a2a4"));
        assert!(Move::from_uci("a2 a4").is_some());
    }

    #[test]
    fn move_from_uci_rejects_bad_promotions() {
        assert!(Move::from_uci("e7e8k").is_none());
        assert!(Move::from_uci("e7e8p").is_none());
        assert!(Move::from_uci("e7e8x").is_none());
    }

    #[test]
    fn move_from_uci_edge_cases() {
        assert!(Move::from_uci("e2").is_none());
        assert!(Move::from_uci("e2e").is_none());
        assert!(Move::from_uci("e2e4qq").is_none());
        assert!(Move::from_uci("é2e4").is_none());
    }

    #[test]
    fn move_equality_includes_promotion() {
        let a = Move::from_uci("a7a8q").unwrap();
        let b = Move::from_uci("a7a8r").unwrap();
        let c = Move::from_uci("a7a8").unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, Move::from_uci("a7a8q").unwrap());
    }

    #[test]
    fn move_debug_display() {
        let m = Move::from_uci("e2e4").unwrap();
        assert_eq!(format!("{:?}", m), "Move(e2e4)");
        assert_eq!(format!("{}", m), "e2e4");
    }
}
