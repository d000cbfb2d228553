//! Core types for the chesscoach engine.
//!
//! This module defines the fundamental data structures used throughout the
//! engine: piece and color representation, board squares, and the move
//! record with its coordinate-notation parser and renderer.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Piece & Color
// ---------------------------------------------------------------------------

/// Represents the color (side) of a chess piece or player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// The White side (starts on ranks 1–2).
    White,
    /// The Black side (starts on ranks 7–8).
    Black,
}

impl Color {
    /// Returns the opposite color.
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the home rank index (0-based) for pawns of this color.
    /// White pawns start on rank 2 (index 1), Black on rank 7 (index 6).
    pub fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Returns the direction pawns move: +1 for White, -1 for Black.
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Index into per-color arrays (White = 0, Black = 1).
    pub fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Represents a chess piece type (without color information).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// A chess piece with both kind and color.
///
/// An empty square is `Option::<Piece>::None`; the empty case carries no
/// color, so there is none to consult by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    /// Creates a new piece.
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// Converts the piece to its letter representation.
    /// Uppercase for White, lowercase for Black.
    pub fn to_char(self) -> char {
        let c = match self.kind {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Pawn => 'P',
        };
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }
}

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// Represents a square on the chessboard using 0-based file and rank indices.
///
/// - `file`: 0 (a) to 7 (h)
/// - `rank`: 0 (rank 1) to 7 (rank 8)
///
/// The flat index mapping is `rank * 8 + file`; conversions through
/// [`Square::index`] and [`Square::from_index`] are bijective on 0..64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub file: u8,
    pub rank: u8,
}

impl Square {
    /// Creates a new square from 0-based file and rank.
    /// Panics in debug builds if file or rank >= 8.
    pub fn new(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank < 8, "Square out of bounds");
        Self { file, rank }
    }

    /// Returns a flat index (0..63) for the square.
    pub fn index(self) -> usize {
        (self.rank as usize) * 8 + self.file as usize
    }

    /// Builds a square from a flat index, or `None` when out of 0..64.
    pub fn from_index(index: i32) -> Option<Square> {
        if (0..64).contains(&index) {
            Some(Square::new((index % 8) as u8, (index / 8) as u8))
        } else {
            None
        }
    }

    /// Parses an algebraic notation string (e.g. "e4") into a `Square`.
    /// Returns `None` for invalid input.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file < 8 && rank < 8 {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    /// Converts the square to its algebraic notation string (e.g. "e4").
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.file) as char, self.rank + 1)
    }

    /// Returns a new square offset by `(df, dr)`, or `None` if out of bounds.
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let f = self.file as i8 + df;
        let r = self.rank as i8 + dr;
        if (0..8).contains(&f) && (0..8).contains(&r) {
            Some(Square::new(f as u8, r as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

// ---------------------------------------------------------------------------
// Moves
// ---------------------------------------------------------------------------

/// A chess move in the engine's internal representation.
///
/// The generator fills in `is_capture`; the `promotion`, `is_castling` and
/// `is_en_passant` fields are reserved by the data model but are never set
/// by the generator and never executed by the board (simple piece transit
/// only). An absent ("invalid") move is `Option::<ChessMove>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub is_capture: bool,
    pub is_castling: bool,
    pub is_en_passant: bool,
}

impl ChessMove {
    /// Creates a quiet move (no capture, no promotion, no special flags).
    pub fn quiet(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            is_capture: false,
            is_castling: false,
            is_en_passant: false,
        }
    }

    /// Creates a capturing move.
    pub fn capture(from: Square, to: Square) -> Self {
        Self {
            is_capture: true,
            ..Self::quiet(from, to)
        }
    }

    /// Whether two moves name the same from/to squares.
    ///
    /// This is the equality used for matching a player's input against the
    /// legal-move list and for classification; the tag fields do not
    /// participate.
    pub fn same_squares(&self, other: &ChessMove) -> bool {
        self.from == other.from && self.to == other.to
    }

    /// Parses coordinate notation (`e2e4`) into a move.
    ///
    /// Rejects strings shorter than four characters and out-of-range
    /// coordinates. Only the first four characters are read: the result
    /// carries (from, to) and nothing else — promotion and special-move
    /// flags are resolved later against the legal-move list, never inferred
    /// here.
    pub fn parse(s: &str) -> Option<ChessMove> {
        if s.len() < 4 || !s.is_char_boundary(2) || !s.is_char_boundary(4) {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        Some(ChessMove::quiet(from, to))
    }
}

impl fmt::Display for ChessMove {
    /// Renders coordinate notation (`e2e4`), with a lowercase promotion
    /// letter appended when the promotion field is set.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from.to_algebraic(), self.to.to_algebraic())?;
        if let Some(promo) = self.promotion {
            let c = match promo {
                PieceKind::Queen => 'q',
                PieceKind::Rook => 'r',
                PieceKind::Bishop => 'b',
                PieceKind::Knight => 'n',
                _ => '?',
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_index_round_trip() {
        for i in 0..64 {
            let sq = Square::from_index(i).unwrap();
            assert_eq!(sq.index() as i32, i);
        }
        assert!(Square::from_index(-1).is_none());
        assert!(Square::from_index(64).is_none());
    }

    #[test]
    fn test_square_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::new(0, 0)));
        assert_eq!(Square::from_algebraic("h8"), Some(Square::new(7, 7)));
        assert_eq!(Square::new(4, 3).to_algebraic(), "e4");
        assert!(Square::from_algebraic("i1").is_none());
        assert!(Square::from_algebraic("a9").is_none());
        assert!(Square::from_algebraic("e").is_none());
    }

    #[test]
    fn test_parse_move() {
        let mv = ChessMove::parse("e2e4").unwrap();
        assert_eq!(mv.from, Square::new(4, 1));
        assert_eq!(mv.to, Square::new(4, 3));
        assert_eq!(mv.promotion, None);
        assert!(!mv.is_capture);
    }

    #[test]
    fn test_parse_move_rejects_bad_input() {
        assert!(ChessMove::parse("").is_none());
        assert!(ChessMove::parse("e2e").is_none());
        assert!(ChessMove::parse("z9z9").is_none());
        assert!(ChessMove::parse("e2x4").is_none());
    }

    #[test]
    fn test_parse_ignores_trailing_characters() {
        // The fifth character is part of the grammar but the parser carries
        // only (from, to); promotion is never inferred.
        let mv = ChessMove::parse("e7e8q").unwrap();
        assert_eq!(mv.promotion, None);
        assert_eq!(mv.to_string(), "e7e8");
    }

    #[test]
    fn test_render_parse_round_trip() {
        for s in ["e2e4", "a1h8", "h7h5", "d8d1"] {
            assert_eq!(ChessMove::parse(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn test_piece_chars() {
        assert_eq!(Piece::new(PieceKind::King, Color::White).to_char(), 'K');
        assert_eq!(Piece::new(PieceKind::Knight, Color::Black).to_char(), 'n');
    }
}
