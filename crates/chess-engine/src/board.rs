//! Board storage: an 8×8 grid of optional pieces.
//!
//! The board knows nothing about chess rules. Any arrangement is
//! representable, including positions without kings, which the game's
//! check simulation may produce transiently.

use chess_core::{Color, FenError, FenParser, Piece, PieceKind, Rank, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An 8×8 chess board.
///
/// Equality and hashing are structural over all 64 squares. `Clone` yields a
/// fully independent copy. Serialized as its FEN piece-placement string.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Board {
    squares: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [None; Square::COUNT],
        }
    }

    /// Creates a board in the standard opening arrangement.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        board.reset_to_start();
        board
    }

    /// Clears the board and places the standard opening arrangement.
    pub fn reset_to_start(&mut self) {
        self.squares = [None; Square::COUNT];
        for color in Color::ALL {
            let back = color.back_rank().number();
            let pawns = color.pawn_start_rank().number();
            for (i, kind) in BACK_RANK.into_iter().enumerate() {
                let file = i as u8 + 1;
                if let Some(sq) = Square::at(back, file) {
                    self.place(sq, Some(Piece::new(color, kind)));
                }
                if let Some(sq) = Square::at(pawns, file) {
                    self.place(sq, Some(Piece::new(color, PieceKind::Pawn)));
                }
            }
        }
    }

    /// Returns the piece on `sq`, if any.
    #[inline]
    pub fn occupant(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize]
    }

    /// Puts `piece` on `sq`, replacing whatever was there. `None` clears it.
    #[inline]
    pub fn place(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index() as usize] = piece;
    }

    /// Clears `sq` and returns its former occupant.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize].take()
    }

    /// Returns true if `sq` holds no piece.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.occupant(sq).is_none()
    }

    /// Iterates over occupied squares in index order (a1 first).
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.occupant(sq).map(|p| (sq, p)))
    }

    /// Returns every square holding exactly `piece`.
    pub fn squares_of(&self, piece: Piece) -> Vec<Square> {
        self.pieces()
            .filter(|&(_, p)| p == piece)
            .map(|(sq, _)| sq)
            .collect()
    }

    /// Counts the pieces belonging to `color`.
    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.color == color).count()
    }

    /// Renders the board as eight lines, rank 8 first, one glyph per square.
    ///
    /// Empty light squares are drawn as `░` and dark squares as `█`.
    pub fn render(&self) -> String {
        self.render_with(|piece| piece.glyph(), ['░', '█'])
    }

    /// Renders the board with ASCII FEN letters and `.`/`:` for empty squares.
    pub fn render_ascii(&self) -> String {
        self.render_with(|piece| piece.to_fen_char(), ['.', ':'])
    }

    fn render_with(&self, glyph: impl Fn(Piece) -> char, empty: [char; 2]) -> String {
        let mut out = String::with_capacity(8 * 9 * 3);
        for rank in Rank::ALL.iter().rev() {
            for sq in Square::all().filter(|sq| sq.rank() == *rank) {
                let c = match self.occupant(sq) {
                    Some(piece) => glyph(piece),
                    None if sq.is_light() => empty[0],
                    None => empty[1],
                };
                out.push(c);
            }
            out.push('\n');
        }
        out
    }

    /// Encodes the board as a FEN piece-placement string.
    pub fn to_placement(&self) -> String {
        let mut fen = String::new();

        for rank in Rank::ALL.iter().rev() {
            let mut empty_count = 0;
            for sq in Square::all().filter(|sq| sq.rank() == *rank) {
                match self.occupant(sq) {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_fen_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if *rank != Rank::R1 {
                fen.push('/');
            }
        }

        fen
    }

    /// Decodes a FEN piece-placement string.
    pub fn from_placement(placement: &str) -> Result<Self, FenError> {
        FenParser::validate_piece_placement(placement)?;
        let mut board = Board::empty();

        // Placement lists rank 8 first.
        for (row, rank_str) in placement.split('/').enumerate() {
            let rank = 8 - row as u8;
            let mut file = 1u8;
            for c in rank_str.chars() {
                if let Some(run) = c.to_digit(10) {
                    file += run as u8;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    if let Some(sq) = Square::at(rank, file) {
                        board.place(sq, Some(piece));
                    }
                    file += 1;
                }
            }
        }

        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_placement())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.to_placement()
    }
}

impl TryFrom<String> for Board {
    type Error = FenError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Board::from_placement(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn standard_arrangement() {
        let board = Board::standard();
        assert_eq!(board.count(Color::White), 16);
        assert_eq!(board.count(Color::Black), 16);
        assert_eq!(
            board.occupant(Square::E1),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            board.occupant(Square::D8),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(
            board.occupant(sq("g7")),
            Some(Piece::new(Color::Black, PieceKind::Pawn))
        );
        assert_eq!(board.occupant(sq("e4")), None);
        assert_eq!(board.to_placement(), FenParser::STARTPOS_PLACEMENT);
    }

    #[test]
    fn reset_clears_previous_pieces() {
        let mut board = Board::empty();
        board.place(sq("e4"), Some(Piece::new(Color::Black, PieceKind::Queen)));
        board.reset_to_start();
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn place_and_clear() {
        let mut board = Board::empty();
        let knight = Piece::new(Color::Black, PieceKind::Knight);
        board.place(sq("c3"), Some(knight));
        assert_eq!(board.occupant(sq("c3")), Some(knight));
        board.place(sq("c3"), None);
        assert!(board.is_empty(sq("c3")));
    }

    #[test]
    fn take_returns_occupant() {
        let mut board = Board::standard();
        let taken = board.take(Square::A1);
        assert_eq!(taken, Some(Piece::new(Color::White, PieceKind::Rook)));
        assert_eq!(board.occupant(Square::A1), None);
        assert_eq!(board.take(Square::A1), None);
    }

    #[test]
    fn clone_is_independent() {
        let original = Board::standard();
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.place(sq("e2"), None);
        assert_ne!(copy, original);
        assert!(original.occupant(sq("e2")).is_some());
    }

    #[test]
    fn equality_is_structural() {
        let mut a = Board::empty();
        let mut b = Board::empty();
        assert_eq!(a, b);

        a.place(sq("b2"), Some(Piece::new(Color::White, PieceKind::Pawn)));
        assert_ne!(a, b);

        b.place(sq("b2"), Some(Piece::new(Color::White, PieceKind::Pawn)));
        assert_eq!(a, b);

        b.place(sq("c3"), Some(Piece::new(Color::Black, PieceKind::Knight)));
        assert_ne!(a, b);
    }

    #[test]
    fn kingless_boards_are_representable() {
        let mut board = Board::standard();
        board.place(Square::E1, None);
        assert!(board
            .squares_of(Piece::new(Color::White, PieceKind::King))
            .is_empty());
    }

    #[test]
    fn render_shape() {
        let rendered = Board::standard().render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "♜♞♝♛♚♝♞♜");
        assert_eq!(lines[7], "♖♘♗♕♔♗♘♖");
        assert!(lines.iter().all(|l| l.chars().count() == 8));
        // a6 is light, b6 dark.
        assert!(lines[2].starts_with("░█"));
    }

    #[test]
    fn render_ascii() {
        let rendered = Board::standard().render_ascii();
        assert_eq!(rendered.lines().next(), Some("rnbqkbnr"));
        assert_eq!(rendered.lines().nth(3), Some(":.:.:.:."));
    }

    #[test]
    fn placement_roundtrip() {
        let placement = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R";
        let board = Board::from_placement(placement).unwrap();
        assert_eq!(board.to_placement(), placement);
        assert_eq!(
            board.occupant(sq("c6")),
            Some(Piece::new(Color::Black, PieceKind::Knight))
        );
    }

    #[test]
    fn placement_rejects_garbage() {
        assert!(Board::from_placement("8/8/8").is_err());
        assert!(Board::from_placement("8/8/8/8/8/8/8/7x").is_err());
    }

    #[test]
    fn serde_uses_placement() {
        let json = serde_json::to_string(&Board::standard()).unwrap();
        assert_eq!(json, format!("\"{}\"", FenParser::STARTPOS_PLACEMENT));
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Board::standard());
        assert!(serde_json::from_str::<Board>("\"not a board\"").is_err());
    }
}
