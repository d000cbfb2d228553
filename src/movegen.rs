//! Move generation and attack detection.
//!
//! The rule set is deliberately partial: castling, en passant, and promotion
//! are not generated, and the board applies moves as simple piece transit.
//! What remains is exact within its scope:
//!
//! - Piece movement geometry for all six kinds
//! - The attack oracle ("can this piece, from here, hit that square?")
//! - Check detection through the cached king square
//! - Legal filtering: a pseudo-legal move is kept only if, after applying
//!   it to a cloned board, the mover's king is not attacked
//!
//! Enumeration order is part of the contract. Squares are scanned in
//! ascending index order and each per-piece generator emits its targets in a
//! fixed direction order, so two invocations on the same board produce
//! identical sequences and the search's capture-first stable sort is
//! deterministic.

use crate::board::Board;
use crate::types::{ChessMove, Color, Piece, PieceKind, Square};

// ---------------------------------------------------------------------------
// Attack oracle
// ---------------------------------------------------------------------------

/// Direction vectors for sliding pieces, in enumeration order.
const BISHOP_DIRS: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
const ROOK_DIRS: [(i8, i8); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// Knight jump offsets, in enumeration order.
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-1, -2), (1, -2), (-2, -1), (2, -1),
    (-2, 1), (2, 1), (-1, 2), (1, 2),
];

/// King step offsets, in enumeration order.
const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1), (0, -1), (1, -1), (-1, 0),
    (1, 0), (-1, 1), (0, 1), (1, 1),
];

/// Returns whether `piece`, standing on `from`, threatens `to`.
///
/// Pure geometry plus ray clearance; occupancy of `to` itself is not
/// consulted. Pawn "attacks" are the diagonal captures only — forward
/// pushes threaten nothing.
pub fn can_attack(board: &Board, from: Square, to: Square, piece: Piece) -> bool {
    let df = to.file as i8 - from.file as i8;
    let dr = to.rank as i8 - from.rank as i8;

    match piece.kind {
        PieceKind::Pawn => df.abs() == 1 && dr == piece.color.pawn_direction(),
        PieceKind::Knight => {
            (df.abs() == 2 && dr.abs() == 1) || (df.abs() == 1 && dr.abs() == 2)
        }
        PieceKind::Bishop => df.abs() == dr.abs() && is_path_clear(board, from, to),
        PieceKind::Rook => (df == 0 || dr == 0) && is_path_clear(board, from, to),
        PieceKind::Queen => {
            (df == 0 || dr == 0 || df.abs() == dr.abs()) && is_path_clear(board, from, to)
        }
        PieceKind::King => df.abs() <= 1 && dr.abs() <= 1,
    }
}

/// Walks the signed unit vector from `from` toward `to`, checking every
/// intermediate square (exclusive of `to`) for occupancy.
///
/// A walk of zero or one step has no intermediate squares and is trivially
/// clear.
pub fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let step_f = (to.file as i8 - from.file as i8).signum();
    let step_r = (to.rank as i8 - from.rank as i8).signum();

    let mut current = from;
    loop {
        match current.offset(step_f, step_r) {
            None => return true,
            Some(next) => {
                if next == to {
                    return true;
                }
                if board.piece_at(next).is_some() {
                    return false;
                }
                current = next;
            }
        }
    }
}

/// Returns `true` if any piece of `attacker_color` threatens `sq`.
///
/// Scans all 64 squares and asks the oracle for each attacker-colored
/// piece. O(64) per query, accepted.
pub fn is_square_attacked(board: &Board, sq: Square, attacker_color: Color) -> bool {
    for index in 0..64 {
        let from = Square::new(index % 8, index / 8);
        if let Some(piece) = board.piece_at(from)
            && piece.color == attacker_color
            && can_attack(board, from, sq, piece)
        {
            return true;
        }
    }
    false
}

/// Returns `true` if the king of the given color is currently attacked.
///
/// Consults the cached king square; a board without that king is never in
/// check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king_sq) => is_square_attacked(board, king_sq, color.opponent()),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Pseudo-legal move generation
// ---------------------------------------------------------------------------

/// Generates the pseudo-legal moves of a single piece.
fn generate_piece_moves(board: &Board, from: Square, piece: Piece, moves: &mut Vec<ChessMove>) {
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(board, from, piece.color, moves),
        PieceKind::Knight => generate_knight_moves(board, from, piece.color, moves),
        PieceKind::Bishop => generate_sliding_moves(board, from, piece.color, &BISHOP_DIRS, moves),
        PieceKind::Rook => generate_sliding_moves(board, from, piece.color, &ROOK_DIRS, moves),
        PieceKind::Queen => {
            generate_sliding_moves(board, from, piece.color, &BISHOP_DIRS, moves);
            generate_sliding_moves(board, from, piece.color, &ROOK_DIRS, moves);
        }
        PieceKind::King => generate_king_moves(board, from, piece.color, moves),
    }
}

/// Pawn moves: single push, double push from the start rank, and the two
/// diagonal captures. No en passant, and no promotion encoding — a pawn
/// reaching its final rank is emitted as a plain move.
fn generate_pawn_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<ChessMove>) {
    let dir = color.pawn_direction();

    if let Some(one_ahead) = from.offset(0, dir)
        && board.piece_at(one_ahead).is_none()
    {
        moves.push(ChessMove::quiet(from, one_ahead));

        if from.rank == color.pawn_start_rank()
            && let Some(two_ahead) = from.offset(0, 2 * dir)
            && board.piece_at(two_ahead).is_none()
        {
            moves.push(ChessMove::quiet(from, two_ahead));
        }
    }

    for df in [-1i8, 1] {
        if let Some(to) = from.offset(df, dir)
            && let Some(target) = board.piece_at(to)
            && target.color != color
        {
            moves.push(ChessMove::capture(from, to));
        }
    }
}

fn generate_knight_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<ChessMove>) {
    for &(df, dr) in &KNIGHT_OFFSETS {
        if let Some(to) = from.offset(df, dr) {
            match board.piece_at(to) {
                None => moves.push(ChessMove::quiet(from, to)),
                Some(target) if target.color != color => {
                    moves.push(ChessMove::capture(from, to));
                }
                Some(_) => {}
            }
        }
    }
}

/// Sliding moves (bishop, rook, and both halves of the queen): extend each
/// ray square by square, capture-then-stop on an enemy piece, stop on an
/// own piece or the board edge.
fn generate_sliding_moves(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    moves: &mut Vec<ChessMove>,
) {
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            match board.piece_at(to) {
                None => {
                    moves.push(ChessMove::quiet(from, to));
                    current = to;
                }
                Some(target) => {
                    if target.color != color {
                        moves.push(ChessMove::capture(from, to));
                    }
                    break;
                }
            }
        }
    }
}

/// King moves are the eight unit steps. Castling is not generated.
fn generate_king_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<ChessMove>) {
    for &(df, dr) in &KING_OFFSETS {
        if let Some(to) = from.offset(df, dr) {
            match board.piece_at(to) {
                None => moves.push(ChessMove::quiet(from, to)),
                Some(target) if target.color != color => {
                    moves.push(ChessMove::capture(from, to));
                }
                Some(_) => {}
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Legal move generation
// ---------------------------------------------------------------------------

/// Generates all legal moves for the side to move.
///
/// Generate-then-filter: every pseudo-legal candidate is applied to a fresh
/// clone of the board and rejected if the mover's king ends up attacked.
/// O(moves × 64) per call, accepted.
pub fn generate_legal_moves(board: &Board) -> Vec<ChessMove> {
    let turn = board.turn();
    let mut pseudo = Vec::with_capacity(64);

    for index in 0..64 {
        let from = Square::new(index % 8, index / 8);
        if let Some(piece) = board.piece_at(from)
            && piece.color == turn
        {
            generate_piece_moves(board, from, piece, &mut pseudo);
        }
    }

    let mut legal = Vec::with_capacity(pseudo.len());
    for mv in pseudo {
        let mut test_board = board.clone();
        test_board.apply_move(mv);
        if !is_in_check(&test_board, turn) {
            legal.push(mv);
        }
    }

    legal
}

/// Whether the side to move has no legal moves at all.
pub fn is_game_over(board: &Board) -> bool {
    generate_legal_moves(board).is_empty()
}

/// Checkmate: the side to move is in check with no legal moves.
pub fn is_checkmate(board: &Board) -> bool {
    is_in_check(board, board.turn()) && generate_legal_moves(board).is_empty()
}

/// Stalemate: the side to move is not in check but has no legal moves.
pub fn is_stalemate(board: &Board) -> bool {
    !is_in_check(board, board.turn()) && generate_legal_moves(board).is_empty()
}
