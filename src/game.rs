//! Game session facade.
//!
//! [`ChessGame`] is the programmatic surface a UI builds on: it owns the
//! board, the engine settings, and the move classifier, and coordinates
//! them for a full interactive game. Moves submitted from outside are
//! validated against the legal-move list before they touch the board;
//! rejections leave the position unchanged.

use uuid::Uuid;

use crate::board::Board;
use crate::classify::{BadgeCounts, Classifier, MoveAssessment};
use crate::config::EngineSettings;
use crate::eval;
use crate::export;
use crate::movegen;
use crate::search::{Clock, MonotonicClock, SearchOutcome, Searcher};
use crate::types::{ChessMove, Color, Piece, Square};

/// A complete game session: board state, engine configuration, and the
/// move-quality history for the analysis report.
pub struct ChessGame {
    id: Uuid,
    board: Board,
    settings: EngineSettings,
    classifier: Classifier,
    clock: Box<dyn Clock>,
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessGame {
    /// Creates a session from the standard starting position with default
    /// settings and the system monotonic clock.
    pub fn new() -> Self {
        Self::with_clock(Box::new(MonotonicClock::new()))
    }

    /// Creates a session with an injected clock. Tests use this to
    /// simulate search time.
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            id: Uuid::new_v4(),
            board: Board::new(),
            settings: EngineSettings::default(),
            classifier: Classifier::new(),
            clock,
        }
    }

    /// The session's unique identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    // -- Board access -------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.board.turn()
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.board.set_piece(sq, piece);
    }

    // -- Rules queries ------------------------------------------------------

    pub fn legal_moves(&self) -> Vec<ChessMove> {
        movegen::generate_legal_moves(&self.board)
    }

    pub fn is_in_check(&self) -> bool {
        movegen::is_in_check(&self.board, self.board.turn())
    }

    /// Whether the side to move has no legal moves at all.
    pub fn is_game_over(&self) -> bool {
        movegen::is_game_over(&self.board)
    }

    pub fn is_checkmate(&self) -> bool {
        movegen::is_checkmate(&self.board)
    }

    pub fn is_stalemate(&self) -> bool {
        movegen::is_stalemate(&self.board)
    }

    /// Static evaluation of the current position, White's perspective.
    pub fn evaluate(&self) -> i32 {
        eval::evaluate(&self.board)
    }

    /// Parses coordinate notation (`e2e4`). Carries (from, to) only.
    pub fn parse_move(&self, input: &str) -> Option<ChessMove> {
        ChessMove::parse(input)
    }

    // -- Moves --------------------------------------------------------------

    /// Validates `mv` against the legal-move list and applies it.
    ///
    /// Matching uses (from, to) only; the applied move is the generator's
    /// version with its capture flag. On rejection the board is unchanged.
    pub fn apply_move(&mut self, mv: ChessMove) -> Result<ChessMove, String> {
        let matched = self
            .legal_moves()
            .into_iter()
            .find(|legal| legal.same_squares(&mv))
            .ok_or_else(|| format!("Illegal move: {}", mv))?;

        self.board.apply_move(matched);
        log::debug!("applied {} ({} to move)", matched, self.board.turn());
        Ok(matched)
    }

    /// Classifies a user's move without applying it, recording the
    /// assessment in the session history.
    ///
    /// Returns `Ok(None)` when grading is disabled, and an error for moves
    /// outside the legal set (nothing is recorded, board unchanged).
    pub fn classify_move(&mut self, mv: ChessMove) -> Result<Option<MoveAssessment>, String> {
        if !self.settings.classifier_enabled() {
            return Ok(None);
        }
        if !self.legal_moves().iter().any(|legal| legal.same_squares(&mv)) {
            return Err(format!("Illegal move: {}", mv));
        }
        Ok(Some(self.classifier.assess(&self.board, mv)))
    }

    /// Runs the engine search on the current position.
    ///
    /// Returns the outcome without touching the board; an empty legal-move
    /// set yields no best move and the caller treats the position as
    /// terminal.
    pub fn best_move(&self) -> SearchOutcome {
        let mut searcher = Searcher::new(&self.settings, self.clock.as_ref());
        searcher.find_best_move(&self.board)
    }

    // -- Settings -----------------------------------------------------------

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn set_search_depth(&mut self, depth: u8) -> Result<(), String> {
        self.settings.set_max_depth(depth)
    }

    pub fn set_time_limit_ms(&mut self, ms: u64) -> Result<(), String> {
        self.settings.set_time_limit_ms(ms)
    }

    pub fn set_time_limit_enabled(&mut self, enabled: bool) {
        self.settings.set_time_limit_enabled(enabled);
    }

    pub fn set_tree_trace_enabled(&mut self, enabled: bool) {
        self.settings.set_tree_trace_enabled(enabled);
    }

    pub fn set_classifier_enabled(&mut self, enabled: bool) {
        self.settings.set_classifier_enabled(enabled);
    }

    pub fn reset_settings(&mut self) {
        self.settings.reset();
    }

    // -- Analysis -----------------------------------------------------------

    /// The recorded move assessments, in play order.
    pub fn analysis_history(&self) -> &[MoveAssessment] {
        self.classifier.history()
    }

    /// Aggregate badge counts over the recorded history.
    pub fn analysis_counts(&self) -> BadgeCounts {
        self.classifier.counts()
    }

    /// Accuracy percentage over the recorded history.
    pub fn analysis_accuracy(&self) -> f64 {
        self.classifier.accuracy()
    }

    /// Renders the plain-text analysis report for this session.
    pub fn analysis_report(&self, timestamp: u64) -> String {
        export::format_report(
            self.id,
            self.classifier.history(),
            self.classifier.counts(),
            self.classifier.accuracy(),
            timestamp,
        )
    }

    /// Writes the analysis report to `path`, or to the default
    /// timestamped filename when `path` is `None`. Returns the path
    /// written. Fails when the history is empty or the write fails.
    pub fn export_analysis(&self, path: Option<&str>, timestamp: u64) -> Result<String, String> {
        if self.classifier.history().is_empty() {
            return Err("No analysis data to save".to_string());
        }
        let filename = match path {
            Some(p) => p.to_string(),
            None => export::default_report_filename(timestamp),
        };
        let report = self.analysis_report(timestamp);
        export::write_report(&filename, &report)?;
        log::info!("analysis report written to {}", filename);
        Ok(filename)
    }
}
