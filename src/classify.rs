//! Move-quality classification.
//!
//! After the player moves, the move is compared against every legal
//! alternative using the same one-ply static evaluation the search leaves
//! use, then given a badge from Brilliant down to Blunder plus a short
//! description. A session history of assessments backs the aggregate
//! statistics and the accuracy percentage.
//!
//! Scoring conventions: a candidate's one-ply score is the *negated*
//! evaluation of the position after the move (the perspective flips with
//! the turn), and `centipawns = -(score_after - score_before)` is the loss
//! magnitude relative to the static evaluation before the move.

use serde::Serialize;
use std::fmt;

use crate::board::Board;
use crate::eval;
use crate::movegen;
use crate::types::ChessMove;

// ---------------------------------------------------------------------------
// Badges
// ---------------------------------------------------------------------------

/// Quality badge for a played move, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Badge {
    Brilliant,
    Best,
    Great,
    Good,
    Inaccuracy,
    Mistake,
    Blunder,
}

impl Badge {
    /// Display label with the badge's marker symbol.
    pub fn label(self) -> &'static str {
        match self {
            Badge::Brilliant => "🔥 Brilliant!!",
            Badge::Best => "⭐ Best!",
            Badge::Great => "✨ Great",
            Badge::Good => "✓ Good",
            Badge::Inaccuracy => "❓ Inaccuracy",
            Badge::Mistake => "❗ Mistake",
            Badge::Blunder => "💥 Blunder",
        }
    }

    /// Whether the badge counts toward the accuracy percentage.
    pub fn is_accurate(self) -> bool {
        matches!(
            self,
            Badge::Brilliant | Badge::Best | Badge::Great | Badge::Good
        )
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Assessment records
// ---------------------------------------------------------------------------

/// One classified move, as stored in the session history.
#[derive(Debug, Clone, Serialize)]
pub struct MoveAssessment {
    /// The move in coordinate notation.
    pub notation: String,
    pub badge: Badge,
    pub description: String,
    /// Static evaluation before the move.
    pub score_before: i32,
    /// Negated static evaluation after the move (mover's perspective).
    pub score_after: i32,
    /// `score_after - score_before`.
    pub score_diff: i32,
    /// 1-based rank among all legal moves; ties share the best rank.
    pub rank: usize,
    /// Number of legal moves in the position.
    pub total_moves: usize,
}

/// Aggregate badge counts over a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BadgeCounts {
    pub brilliant: usize,
    pub best: usize,
    pub great: usize,
    pub good: usize,
    pub inaccuracy: usize,
    pub mistake: usize,
    pub blunder: usize,
}

impl BadgeCounts {
    pub fn total(&self) -> usize {
        self.brilliant
            + self.best
            + self.great
            + self.good
            + self.inaccuracy
            + self.mistake
            + self.blunder
    }
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Classifies played moves and keeps the per-session assessment history.
#[derive(Debug, Default)]
pub struct Classifier {
    history: Vec<MoveAssessment>,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// The assessments recorded so far, in play order.
    pub fn history(&self) -> &[MoveAssessment] {
        &self.history
    }

    /// Badge counts over the recorded history.
    pub fn counts(&self) -> BadgeCounts {
        let mut counts = BadgeCounts::default();
        for assessment in &self.history {
            match assessment.badge {
                Badge::Brilliant => counts.brilliant += 1,
                Badge::Best => counts.best += 1,
                Badge::Great => counts.great += 1,
                Badge::Good => counts.good += 1,
                Badge::Inaccuracy => counts.inaccuracy += 1,
                Badge::Mistake => counts.mistake += 1,
                Badge::Blunder => counts.blunder += 1,
            }
        }
        counts
    }

    /// Accuracy percentage: the share of Brilliant/Best/Great/Good moves.
    /// 0.0 for an empty history.
    pub fn accuracy(&self) -> f64 {
        if self.history.is_empty() {
            return 0.0;
        }
        let accurate = self
            .history
            .iter()
            .filter(|a| a.badge.is_accurate())
            .count();
        accurate as f64 / self.history.len() as f64 * 100.0
    }

    /// Classifies `mv` on `board` (the position *before* the move) and
    /// records the assessment.
    ///
    /// The caller is expected to pass a move from the legal-move list; a
    /// move that is not legal falls to the worst rank.
    pub fn assess(&mut self, board: &Board, mv: ChessMove) -> MoveAssessment {
        let score_before = eval::evaluate(board);

        let mut after = board.clone();
        after.apply_move(mv);
        // The turn flipped, so negate to stay in the mover's perspective.
        let score_after = -eval::evaluate(&after);

        let score_diff = score_after - score_before;
        let centipawns = -score_diff;

        let (rank, total_moves) = rank_move(board, mv);

        let is_capture = board.piece_at(mv.to).is_some();
        let is_check = movegen::is_in_check(&after, after.turn());

        let (badge, description) =
            describe(centipawns, rank, total_moves, is_capture, is_check);

        let assessment = MoveAssessment {
            notation: mv.to_string(),
            badge,
            description,
            score_before,
            score_after,
            score_diff,
            rank,
            total_moves,
        };
        self.history.push(assessment.clone());
        assessment
    }
}

/// Ranks `mv` among all legal moves by one-ply static score.
///
/// Every legal move is scored as the negated evaluation of the resulting
/// position; the rank is one plus the number of strictly better scores, so
/// tied moves share the best of their ranks and rank 1 means "achieves the
/// maximum one-ply score". A move absent from the legal list ranks last.
///
/// Returns `(rank, total_legal_moves)`.
fn rank_move(board: &Board, mv: ChessMove) -> (usize, usize) {
    let legal_moves = movegen::generate_legal_moves(board);
    let total = legal_moves.len();

    let mut own_score = None;
    let mut scores = Vec::with_capacity(total);
    for candidate in &legal_moves {
        let mut after = board.clone();
        after.apply_move(*candidate);
        let score = -eval::evaluate(&after);
        scores.push(score);
        if candidate.same_squares(&mv) {
            own_score = Some(score);
        }
    }

    match own_score {
        Some(own) => {
            let better = scores.iter().filter(|&&s| s > own).count();
            (better + 1, total)
        }
        None => (total, total),
    }
}

/// Applies the classification table; the first matching row wins.
fn describe(
    centipawns: i32,
    rank: usize,
    total_moves: usize,
    is_capture: bool,
    is_check: bool,
) -> (Badge, String) {
    let (badge, mut description) = if rank == 1
        && total_moves > 3
        && (centipawns > 150 || (is_capture && centipawns > 50))
    {
        (
            Badge::Brilliant,
            "Exceptional move that wins a decisive advantage!".to_string(),
        )
    } else if rank == 1 {
        (Badge::Best, "Best move in this position".to_string())
    } else if rank <= 2 && centipawns >= -15 {
        (Badge::Great, "Very strong move".to_string())
    } else if rank <= 3 && centipawns >= -35 {
        (Badge::Good, "Good move".to_string())
    } else if centipawns >= -80 {
        (
            Badge::Inaccuracy,
            format!("Slight loss ({} cp)", centipawns),
        )
    } else if centipawns >= -200 {
        (Badge::Mistake, format!("Mistake ({} cp)", centipawns))
    } else {
        (Badge::Blunder, format!("Blunder ({} cp)", centipawns))
    };

    if is_capture && centipawns >= -50 {
        description.push_str(" [good capture]");
    } else if is_capture && centipawns < -100 {
        description.push_str(" [bad capture]");
    }

    if is_check && centipawns >= -25 {
        description.push_str(" [effective check]");
    }

    if rank as f64 > total_moves as f64 * 0.8 {
        description.push_str(" [unusual choice]");
    }

    (badge, description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Piece, PieceKind, Square};

    fn put(board: &mut Board, alg: &str, kind: PieceKind, color: Color) {
        board.set_piece(
            Square::from_algebraic(alg).unwrap(),
            Some(Piece::new(kind, color)),
        );
    }

    #[test]
    fn test_opening_move_is_best() {
        // Every opening move leaves Black the same twenty replies, so the
        // one-ply scores all tie and every move shares rank 1.
        let board = Board::new();
        let mut classifier = Classifier::new();
        let assessment = classifier.assess(&board, ChessMove::parse("e2e4").unwrap());

        assert_eq!(assessment.rank, 1);
        assert_eq!(assessment.total_moves, 20);
        assert_eq!(assessment.badge, Badge::Best);
        assert_eq!(assessment.score_diff, 0);
        assert_eq!(classifier.history().len(), 1);
    }

    #[test]
    fn test_rank_one_iff_maximum_one_ply_score() {
        // White rook and king versus bare king: rook moves that leave the
        // black king its full five squares tie for the top one-ply score; a
        // checking move restricts the king and ranks below them. With the
        // material lead inflating centipawns past the Brilliant threshold,
        // the rank-1 move earns Brilliant rather than plain Best.
        let mut board = Board::empty();
        put(&mut board, "a1", PieceKind::Rook, Color::White);
        put(&mut board, "e1", PieceKind::King, Color::White);
        put(&mut board, "e8", PieceKind::King, Color::Black);

        let mut classifier = Classifier::new();
        let quiet = classifier.assess(&board, ChessMove::parse("a1a4").unwrap());
        assert_eq!(quiet.rank, 1);
        assert_eq!(quiet.badge, Badge::Brilliant);

        let check = classifier.assess(&board, ChessMove::parse("a1a8").unwrap());
        assert!(check.rank > 1);
        assert_ne!(check.badge, Badge::Best);
        assert_ne!(check.badge, Badge::Brilliant);
        assert!(check.description.contains("[effective check]"));
    }

    #[test]
    fn test_unknown_move_ranks_last() {
        let board = Board::new();
        let mut classifier = Classifier::new();
        // e2e5 parses but is not legal.
        let assessment = classifier.assess(&board, ChessMove::parse("e2e5").unwrap());
        assert_eq!(assessment.rank, assessment.total_moves);
        assert!(assessment.description.contains("[unusual choice]"));
    }

    #[test]
    fn test_capture_annotation() {
        // White wins a free queen; the material swing marks the capture.
        let mut board = Board::empty();
        put(&mut board, "e1", PieceKind::King, Color::White);
        put(&mut board, "d4", PieceKind::Rook, Color::White);
        put(&mut board, "d7", PieceKind::Queen, Color::Black);
        put(&mut board, "h8", PieceKind::King, Color::Black);

        let mut classifier = Classifier::new();
        let assessment = classifier.assess(&board, ChessMove::parse("d4d7").unwrap());

        // The material swing keeps centipawns comfortably above the
        // good-capture floor.
        assert!(-assessment.score_diff > 50);
        assert!(assessment.description.contains("[good capture]"));
    }

    #[test]
    fn test_counts_and_accuracy() {
        let mut classifier = Classifier::new();
        let board = Board::new();
        classifier.assess(&board, ChessMove::parse("e2e4").unwrap());
        classifier.assess(&board, ChessMove::parse("d2d4").unwrap());
        classifier.assess(&board, ChessMove::parse("e2e5").unwrap());

        let counts = classifier.counts();
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.best, 2);
        // Two of three classified moves carry an accurate badge.
        let expected = 2.0 / 3.0 * 100.0;
        assert!((classifier.accuracy() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_history_accuracy_is_zero() {
        let classifier = Classifier::new();
        assert_eq!(classifier.counts().total(), 0);
        assert_eq!(classifier.accuracy(), 0.0);
    }

    #[test]
    fn test_badge_ordering_table() {
        // Direct table checks, independent of any board.
        assert_eq!(describe(0, 1, 20, false, false).0, Badge::Best);
        assert_eq!(describe(200, 1, 20, false, false).0, Badge::Brilliant);
        assert_eq!(describe(60, 1, 20, true, false).0, Badge::Brilliant);
        assert_eq!(describe(-10, 2, 20, false, false).0, Badge::Great);
        assert_eq!(describe(-30, 3, 20, false, false).0, Badge::Good);
        assert_eq!(describe(-60, 10, 20, false, false).0, Badge::Inaccuracy);
        assert_eq!(describe(-150, 10, 20, false, false).0, Badge::Mistake);
        assert_eq!(describe(-300, 10, 20, false, false).0, Badge::Blunder);
        // Brilliant needs more than three alternatives.
        assert_eq!(describe(200, 1, 3, false, false).0, Badge::Best);
    }

    #[test]
    fn test_annotations() {
        let (_, desc) = describe(-10, 5, 20, true, false);
        assert!(desc.contains("[good capture]"));
        let (_, desc) = describe(-150, 5, 20, true, false);
        assert!(desc.contains("[bad capture]"));
        let (_, desc) = describe(-10, 5, 20, false, true);
        assert!(desc.contains("[effective check]"));
        let (_, desc) = describe(0, 17, 20, false, false);
        assert!(desc.contains("[unusual choice]"));
        let (_, desc) = describe(0, 16, 20, false, false);
        assert!(!desc.contains("[unusual choice]"));
    }
}
