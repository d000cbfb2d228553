//! Static position evaluation.
//!
//! Scores are centipawns from White's perspective: material plus a crude
//! mobility bonus, with fixed terminal values for checkmate and stalemate.
//! There is no positional knowledge beyond mobility.

use crate::board::Board;
use crate::movegen;
use crate::types::{Color, PieceKind, Square};

/// Checkmate score magnitude (sign favors the winner).
pub const MATE_SCORE: i32 = 9999;

/// Material value of a piece kind, in centipawns.
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20000,
    }
}

/// Evaluates the position from White's perspective.
///
/// - Checkmate: −9999 when White is the mated side to move, +9999 when
///   Black is.
/// - Stalemate: 0.
/// - Otherwise: Σ material (White positive) plus 2 × the side to move's
///   legal-move count, negated when Black is to move.
///
/// One legal-move generation answers the terminal questions and the
/// mobility term together.
pub fn evaluate(board: &Board) -> i32 {
    let legal_moves = movegen::generate_legal_moves(board);

    if legal_moves.is_empty() {
        if movegen::is_in_check(board, board.turn()) {
            return match board.turn() {
                Color::White => -MATE_SCORE,
                Color::Black => MATE_SCORE,
            };
        }
        return 0;
    }

    let mut material = 0;
    for index in 0..64u8 {
        let sq = Square::new(index % 8, index / 8);
        if let Some(piece) = board.piece_at(sq) {
            let value = piece_value(piece.kind);
            match piece.color {
                Color::White => material += value,
                Color::Black => material -= value,
            }
        }
    }

    let mut mobility = legal_moves.len() as i32 * 2;
    if board.turn() == Color::Black {
        mobility = -mobility;
    }

    material + mobility
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChessMove, Piece};

    #[test]
    fn test_starting_position_scores_mobility_for_white() {
        let board = Board::new();
        // Material is balanced; 20 legal moves give +40.
        assert_eq!(evaluate(&board), 40);
    }

    #[test]
    fn test_evaluation_is_antisymmetric_in_side_to_move() {
        let mut board = Board::new();
        let white_view = evaluate(&board);
        board.set_turn(Color::Black);
        assert_eq!(evaluate(&board), -white_view);
    }

    #[test]
    fn test_checkmate_scores_for_the_winner() {
        let mut board = Board::new();
        for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            board.apply_move(ChessMove::parse(mv).unwrap());
        }
        // White is mated, so the White-relative score is the mate floor.
        assert_eq!(evaluate(&board), -MATE_SCORE);
    }

    #[test]
    fn test_stalemate_scores_zero() {
        let mut board = Board::empty();
        board.set_piece(
            Square::from_algebraic("a8").unwrap(),
            Some(Piece::new(PieceKind::King, Color::Black)),
        );
        board.set_piece(
            Square::from_algebraic("c7").unwrap(),
            Some(Piece::new(PieceKind::Queen, Color::White)),
        );
        board.set_piece(
            Square::from_algebraic("b6").unwrap(),
            Some(Piece::new(PieceKind::King, Color::White)),
        );
        board.set_turn(Color::Black);

        assert_eq!(evaluate(&board), 0);
    }

    #[test]
    fn test_material_imbalance_dominates() {
        // White has an extra queen in an otherwise quiet position.
        let mut board = Board::empty();
        board.set_piece(
            Square::from_algebraic("e1").unwrap(),
            Some(Piece::new(PieceKind::King, Color::White)),
        );
        board.set_piece(
            Square::from_algebraic("d1").unwrap(),
            Some(Piece::new(PieceKind::Queen, Color::White)),
        );
        board.set_piece(
            Square::from_algebraic("e8").unwrap(),
            Some(Piece::new(PieceKind::King, Color::Black)),
        );

        let score = evaluate(&board);
        assert!(score > 800, "score was {}", score);
    }
}
