//! Board state for the chesscoach engine.
//!
//! The board is a flat 64-element array of optional pieces plus the side to
//! move and the auxiliary state a full game carries: a cached king square
//! per color, castling rights, the en passant target, the half-move clock,
//! the full-move number, and the history of accepted move strings.
//!
//! Mutation happens through [`Board::apply_move`], which performs *simple
//! piece transit only*: the moving piece is copied to its target, the source
//! square is cleared, the king cache is refreshed when a king moves, the
//! side to move flips, and the move string is appended to the history.
//! Castling rook transfer, en passant pawn removal, promotion replacement,
//! and rights/en-passant/clock bookkeeping are deliberately not performed;
//! the corresponding fields are reserved by the data model and stay at their
//! setup values.

use crate::types::{ChessMove, Color, Piece, PieceKind, Square};

// ---------------------------------------------------------------------------
// Castling rights
// ---------------------------------------------------------------------------

/// Castling rights for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideCastlingRights {
    /// Whether kingside castling (short castling) is still available.
    pub kingside: bool,
    /// Whether queenside castling (long castling) is still available.
    pub queenside: bool,
}

impl Default for SideCastlingRights {
    fn default() -> Self {
        Self {
            kingside: true,
            queenside: true,
        }
    }
}

/// Castling rights for both sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CastlingRights {
    pub white: SideCastlingRights,
    pub black: SideCastlingRights,
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// The full position state. Cloning yields an independent copy; search and
/// legality testing clone freely and discard the copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    turn: Color,
    /// Cached king square per color, indexed by `Color::index()`.
    king_squares: [Option<Square>; 2],
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    history: Vec<String>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a board in the standard initial position, White to move.
    pub fn new() -> Self {
        let mut board = Board::empty();

        let mut place = |file: u8, rank: u8, kind: PieceKind, color: Color| {
            board.set_piece(Square::new(file, rank), Some(Piece::new(kind, color)));
        };

        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, &kind) in back_rank.iter().enumerate() {
            place(file as u8, 0, kind, Color::White);
            place(file as u8, 7, kind, Color::Black);
        }
        for file in 0..8 {
            place(file, 1, PieceKind::Pawn, Color::White);
            place(file, 6, PieceKind::Pawn, Color::Black);
        }

        board
    }

    /// Creates an empty board with no pieces, White to move.
    ///
    /// Used to hand-build positions; place a king for each side before
    /// asking check-related questions.
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
            turn: Color::White,
            king_squares: [None, None],
            castling: CastlingRights::default(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }

    /// Returns the piece at the given square, if any.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Sets (or clears) the piece at the given square, keeping the king
    /// cache coherent: placing a king records its square, and clearing a
    /// cached king square forgets it.
    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        if let Some(p) = piece
            && p.kind == PieceKind::King
        {
            self.king_squares[p.color.index()] = Some(sq);
        } else {
            for entry in &mut self.king_squares {
                if *entry == Some(sq) {
                    *entry = None;
                }
            }
        }
        self.squares[sq.index()] = piece;
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Overrides the side to move. Used when hand-building positions.
    pub fn set_turn(&mut self, color: Color) {
        self.turn = color;
    }

    /// The cached square of the given color's king.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.king_squares[color.index()]
    }

    /// The move strings accepted so far, in order.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Applies a move structurally: piece transit, king-cache refresh, turn
    /// flip, history append. No castling, en passant, or promotion
    /// mechanics, and no rights or clock bookkeeping.
    ///
    /// Legality is not checked here; callers validate against the
    /// legal-move list first.
    pub fn apply_move(&mut self, mv: ChessMove) {
        let Some(piece) = self.piece_at(mv.from) else {
            return;
        };

        if piece.kind == PieceKind::King {
            self.king_squares[piece.color.index()] = Some(mv.to);
        }

        self.squares[mv.to.index()] = Some(piece);
        self.squares[mv.from.index()] = None;

        self.turn = self.turn.opponent();
        self.history.push(mv.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let board = Board::new();

        assert_eq!(
            board.piece_at(Square::new(0, 0)),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert_eq!(
            board.piece_at(Square::new(4, 0)),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            board.piece_at(Square::new(3, 7)),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        for file in 0..8 {
            assert_eq!(
                board.piece_at(Square::new(file, 1)),
                Some(Piece::new(PieceKind::Pawn, Color::White))
            );
            assert_eq!(
                board.piece_at(Square::new(file, 6)),
                Some(Piece::new(PieceKind::Pawn, Color::Black))
            );
            assert_eq!(board.piece_at(Square::new(file, 3)), None);
        }

        assert_eq!(board.turn(), Color::White);
        assert_eq!(board.king_square(Color::White), Some(Square::new(4, 0)));
        assert_eq!(board.king_square(Color::Black), Some(Square::new(4, 7)));
        assert!(board.castling.white.kingside && board.castling.black.queenside);
        assert_eq!(board.en_passant, None);
        assert_eq!(board.halfmove_clock, 0);
        assert_eq!(board.fullmove_number, 1);
        assert!(board.history().is_empty());
    }

    #[test]
    fn test_apply_move_is_structural_transit() {
        let mut board = Board::new();
        let mv = ChessMove::parse("e2e4").unwrap();
        board.apply_move(mv);

        assert_eq!(board.piece_at(Square::new(4, 1)), None);
        assert_eq!(
            board.piece_at(Square::new(4, 3)),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert_eq!(board.turn(), Color::Black);
        assert_eq!(board.history(), ["e2e4"]);
        // Auxiliary state is untouched by application.
        assert!(board.castling.white.kingside);
        assert_eq!(board.en_passant, None);
        assert_eq!(board.halfmove_clock, 0);
        assert_eq!(board.fullmove_number, 1);
    }

    #[test]
    fn test_apply_move_tracks_king() {
        let mut board = Board::new();
        board.apply_move(ChessMove::parse("e2e4").unwrap());
        board.apply_move(ChessMove::parse("e7e5").unwrap());
        board.apply_move(ChessMove::parse("e1e2").unwrap());

        assert_eq!(board.king_square(Color::White), Some(Square::new(4, 1)));
        assert_eq!(board.king_square(Color::Black), Some(Square::new(4, 7)));
        assert_eq!(board.history().len(), 3);
    }

    #[test]
    fn test_pawn_reaching_last_rank_stays_a_pawn() {
        let mut board = Board::empty();
        board.set_piece(Square::new(0, 6), Some(Piece::new(PieceKind::Pawn, Color::White)));
        board.apply_move(ChessMove::parse("a7a8").unwrap());

        // Promotion is never executed; the pawn is simply translated.
        assert_eq!(
            board.piece_at(Square::new(0, 7)),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::new();
        let mut copy = board.clone();
        copy.apply_move(ChessMove::parse("d2d4").unwrap());

        assert_eq!(board.piece_at(Square::new(3, 1)).map(|p| p.kind), Some(PieceKind::Pawn));
        assert_eq!(copy.piece_at(Square::new(3, 1)), None);
        assert_eq!(board.turn(), Color::White);
        assert_eq!(copy.turn(), Color::Black);
    }

    #[test]
    fn test_set_piece_updates_king_cache() {
        let mut board = Board::empty();
        let e1 = Square::new(4, 0);
        board.set_piece(e1, Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(board.king_square(Color::White), Some(e1));

        board.set_piece(e1, None);
        assert_eq!(board.king_square(Color::White), None);
    }
}
