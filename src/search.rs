//! Iterative-deepening alpha-beta search.
//!
//! The search runs single-threaded and synchronous: depths 1..=max are
//! visited in order, each as a full alpha-beta pass from the root with an
//! open window. White maximizes, Black minimizes. Within a node, children
//! are visited in generator order after a stable captures-first sort, which
//! makes the chosen root move deterministic for a fixed position and depth.
//!
//! Time management is cooperative. The wall clock is polled on entry to
//! every node; once the budget is exceeded the node returns its static
//! evaluation with no move, so the worst-case overshoot is a single node
//! expansion. The iterative-deepening loop additionally stops early when a
//! completed depth consumed more than 80% of the budget, predicting that
//! the next depth will not fit.
//!
//! The clock is an injected capability so tests can simulate time.

use std::time::Instant;

use crate::board::Board;
use crate::config::EngineSettings;
use crate::eval;
use crate::movegen;
use crate::types::{ChessMove, Color};

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of monotonic elapsed milliseconds.
///
/// A wall clock that can move backwards is not acceptable here; the
/// production implementation is built on [`Instant`].
pub trait Clock {
    /// Milliseconds elapsed since some fixed origin.
    fn now_ms(&self) -> u64;
}

/// Monotonic clock over [`Instant`].
#[derive(Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

// ---------------------------------------------------------------------------
// Search outcome
// ---------------------------------------------------------------------------

/// Statistics for one completed iterative-deepening iteration.
#[derive(Debug, Clone)]
pub struct DepthReport {
    pub depth: u8,
    pub best_move: ChessMove,
    pub score: i32,
    pub nodes: u64,
    pub elapsed_ms: u64,
}

impl DepthReport {
    /// Nodes per second for this iteration (0 when no time elapsed).
    pub fn nodes_per_second(&self) -> u64 {
        if self.elapsed_ms > 0 {
            self.nodes * 1000 / self.elapsed_ms
        } else {
            0
        }
    }
}

/// The result of a search: the chosen root move (`None` when the position
/// has no legal moves or no depth completed), the score backing it, and
/// telemetry. `trace` holds the human-readable tree log when tracing was
/// enabled; it is observability only and never influences the result.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best_move: Option<ChessMove>,
    pub score: i32,
    pub depth_reached: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub depth_reports: Vec<DepthReport>,
    pub trace: Vec<String>,
}

// ---------------------------------------------------------------------------
// Searcher
// ---------------------------------------------------------------------------

/// One search invocation. Construct, call [`Searcher::find_best_move`],
/// discard.
pub struct Searcher<'a> {
    clock: &'a dyn Clock,
    max_depth: u8,
    time_limit_ms: u64,
    time_limit_enabled: bool,
    trace_enabled: bool,
    start_ms: u64,
    nodes: u64,
    trace: Vec<String>,
}

impl<'a> Searcher<'a> {
    pub fn new(settings: &EngineSettings, clock: &'a dyn Clock) -> Self {
        Self {
            clock,
            max_depth: settings.max_depth(),
            time_limit_ms: settings.time_limit_ms(),
            time_limit_enabled: settings.time_limit_enabled(),
            trace_enabled: settings.tree_trace_enabled(),
            start_ms: 0,
            nodes: 0,
            trace: Vec::new(),
        }
    }

    /// Runs iterative deepening from depth 1 to the configured maximum and
    /// returns the best root move found.
    ///
    /// Each completed depth replaces the running best; a depth aborted by
    /// the time budget returns no move and leaves the previous depth's
    /// answer standing.
    pub fn find_best_move(&mut self, board: &Board) -> SearchOutcome {
        self.start_ms = self.clock.now_ms();
        self.trace.clear();

        let maximizing = board.turn() == Color::White;
        let mut best_move = None;
        let mut best_score = 0;
        let mut depth_reached = 0;
        let mut total_nodes = 0;
        let mut depth_reports = Vec::new();

        for depth in 1..=self.max_depth {
            let depth_start = self.clock.now_ms();
            self.nodes = 0;

            if self.trace_enabled {
                self.trace.push(format!("--- depth {} ---", depth));
            }

            let (score, mv) =
                self.alpha_beta(board, depth, i32::MIN, i32::MAX, maximizing, 0, None);

            let elapsed = self.clock.now_ms().saturating_sub(depth_start);
            let depth_nodes = self.nodes;
            total_nodes += depth_nodes;

            if let Some(mv) = mv {
                best_move = Some(mv);
                best_score = score;
                depth_reached = depth;

                let report = DepthReport {
                    depth,
                    best_move: mv,
                    score,
                    nodes: depth_nodes,
                    elapsed_ms: elapsed,
                };
                log::debug!(
                    "depth {} done: best {} score {} ({} nodes, {} ms, {} nps)",
                    depth,
                    mv,
                    score,
                    depth_nodes,
                    elapsed,
                    report.nodes_per_second()
                );
                depth_reports.push(report);
            } else if best_move.is_none() {
                // No legal moves (or nothing completed): surface the
                // static evaluation with the invalid-move sentinel.
                best_score = score;
            }

            // Soft stop: this depth ate most of the budget, the next one
            // will not fit.
            if self.time_limit_enabled && elapsed * 10 > self.time_limit_ms * 8 {
                log::debug!("time budget nearly exhausted, stopping at depth {}", depth);
                break;
            }
        }

        SearchOutcome {
            best_move,
            score: best_score,
            depth_reached,
            nodes: total_nodes,
            elapsed_ms: self.clock.now_ms().saturating_sub(self.start_ms),
            depth_reports,
            trace: std::mem::take(&mut self.trace),
        }
    }

    /// One alpha-beta node.
    ///
    /// Returns the minimax value and, for interior nodes, the child move
    /// achieving it. Leaves, terminal positions, and time-budget aborts
    /// return the static evaluation with no move.
    fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        ply: u8,
        incoming: Option<ChessMove>,
    ) -> (i32, Option<ChessMove>) {
        self.nodes += 1;

        if self.trace_enabled && ply > 0 {
            let score = eval::evaluate(board);
            self.trace_node(ply, incoming, score, maximizing, alpha, beta, None);
        }

        if self.time_limit_enabled {
            let elapsed = self.clock.now_ms().saturating_sub(self.start_ms);
            if elapsed > self.time_limit_ms {
                let score = eval::evaluate(board);
                if self.trace_enabled {
                    self.trace_node(ply, incoming, score, maximizing, alpha, beta, Some("TIME_CUTOFF"));
                }
                return (score, None);
            }
        }

        let mut legal_moves = movegen::generate_legal_moves(board);

        if depth == 0 || legal_moves.is_empty() {
            let score = eval::evaluate(board);
            if self.trace_enabled {
                let tag = if depth == 0 { "LEAF" } else { "TERMINAL" };
                self.trace_node(ply, incoming, score, maximizing, alpha, beta, Some(tag));
            }
            return (score, None);
        }

        // Captures first; the sort is stable, so generator order breaks ties.
        legal_moves.sort_by_key(|m| !m.is_capture);

        let mut best_move = None;

        if maximizing {
            let mut max_eval = i32::MIN;
            for mv in legal_moves {
                let mut child = board.clone();
                child.apply_move(mv);
                let (score, _) =
                    self.alpha_beta(&child, depth - 1, alpha, beta, false, ply + 1, Some(mv));

                if score > max_eval {
                    max_eval = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(score);
                if beta <= alpha {
                    if self.trace_enabled {
                        self.trace_node(ply + 1, Some(mv), score, false, alpha, beta, Some("BETA_CUTOFF"));
                    }
                    break;
                }
            }
            (max_eval, best_move)
        } else {
            let mut min_eval = i32::MAX;
            for mv in legal_moves {
                let mut child = board.clone();
                child.apply_move(mv);
                let (score, _) =
                    self.alpha_beta(&child, depth - 1, alpha, beta, true, ply + 1, Some(mv));

                if score < min_eval {
                    min_eval = score;
                    best_move = Some(mv);
                }
                beta = beta.min(score);
                if beta <= alpha {
                    if self.trace_enabled {
                        self.trace_node(ply + 1, Some(mv), score, true, alpha, beta, Some("ALPHA_CUTOFF"));
                    }
                    break;
                }
            }
            (min_eval, best_move)
        }
    }

    /// Appends one line to the tree log.
    fn trace_node(
        &mut self,
        ply: u8,
        mv: Option<ChessMove>,
        score: i32,
        maximizing: bool,
        alpha: i32,
        beta: i32,
        tag: Option<&str>,
    ) {
        let mut line = String::new();
        for i in 0..ply {
            line.push_str(if i + 1 == ply { "├─ " } else { "│  " });
        }

        let side = if maximizing { "MAX" } else { "MIN" };
        let move_str = mv.map_or_else(|| "root".to_string(), |m| m.to_string());
        line.push_str(&format!(
            "{} d={} | {} | score={} | α={} β={}",
            side, ply, move_str, score, alpha, beta
        ));
        if let Some(tag) = tag {
            line.push_str(&format!(" [{}]", tag));
        }

        self.trace.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Piece, PieceKind, Square};
    use std::cell::Cell;

    /// Deterministic clock that advances by a fixed step on every reading.
    struct SteppingClock {
        ms: Cell<u64>,
        step: u64,
    }

    impl SteppingClock {
        fn new(step: u64) -> Self {
            Self {
                ms: Cell::new(0),
                step,
            }
        }
    }

    impl Clock for SteppingClock {
        fn now_ms(&self) -> u64 {
            let now = self.ms.get() + self.step;
            self.ms.set(now);
            now
        }
    }

    fn untimed_settings(depth: u8) -> EngineSettings {
        let mut settings = EngineSettings::default();
        settings.set_max_depth(depth).unwrap();
        settings.set_time_limit_enabled(false);
        settings
    }

    #[test]
    fn test_depth_zero_returns_static_eval_and_no_move() {
        let board = Board::new();
        let settings = untimed_settings(1);
        let clock = MonotonicClock::new();
        let mut searcher = Searcher::new(&settings, &clock);

        let (score, mv) = searcher.alpha_beta(&board, 0, i32::MIN, i32::MAX, true, 0, None);
        assert_eq!(score, eval::evaluate(&board));
        assert!(mv.is_none());
    }

    #[test]
    fn test_initial_position_finds_a_move() {
        let board = Board::new();
        let settings = untimed_settings(2);
        let clock = MonotonicClock::new();
        let outcome = Searcher::new(&settings, &clock).find_best_move(&board);

        assert!(outcome.best_move.is_some());
        assert_eq!(outcome.depth_reached, 2);
        assert_eq!(outcome.depth_reports.len(), 2);
        // Root plus twenty children at depth 1.
        assert_eq!(outcome.depth_reports[0].nodes, 21);
    }

    #[test]
    fn test_search_is_deterministic() {
        let board = Board::new();
        let settings = untimed_settings(3);
        let clock = MonotonicClock::new();

        let first = Searcher::new(&settings, &clock).find_best_move(&board);
        let second = Searcher::new(&settings, &clock).find_best_move(&board);
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.score, second.score);
        assert_eq!(first.nodes, second.nodes);
    }

    #[test]
    fn test_finds_mate_in_one() {
        // Fool's mate one move before the end: Black mates on h4.
        let mut board = Board::new();
        for mv in ["f2f3", "e7e5", "g2g4"] {
            board.apply_move(ChessMove::parse(mv).unwrap());
        }

        let settings = untimed_settings(1);
        let clock = MonotonicClock::new();
        let outcome = Searcher::new(&settings, &clock).find_best_move(&board);

        let best = outcome.best_move.expect("mate-in-one not found");
        assert_eq!(best.to, Square::from_algebraic("h4").unwrap());
        assert_eq!(outcome.score, -eval::MATE_SCORE);

        let mut after = board.clone();
        after.apply_move(best);
        assert!(movegen::is_checkmate(&after));
    }

    #[test]
    fn test_no_legal_moves_yields_invalid_move() {
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

        let settings = untimed_settings(3);
        let clock = MonotonicClock::new();
        let outcome = Searcher::new(&settings, &clock).find_best_move(&board);

        assert!(outcome.best_move.is_none());
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.depth_reached, 0);
    }

    #[test]
    fn test_time_budget_cuts_search_short() {
        let board = Board::new();
        let mut settings = EngineSettings::default();
        settings.set_max_depth(10).unwrap();
        settings.set_time_limit_ms(100).unwrap();
        settings.set_time_limit_enabled(true);

        // One simulated millisecond per clock reading: depth 1 completes
        // comfortably, deeper iterations hit the budget.
        let clock = SteppingClock::new(1);
        let outcome = Searcher::new(&settings, &clock).find_best_move(&board);

        assert!(outcome.best_move.is_some());
        assert!(outcome.depth_reached >= 1);
        assert!(outcome.depth_reached < 10, "budget never fired");
    }

    #[test]
    fn test_trace_does_not_change_the_result() {
        let board = Board::new();

        let plain = untimed_settings(3);
        let clock = MonotonicClock::new();
        let without = Searcher::new(&plain, &clock).find_best_move(&board);

        let mut traced = untimed_settings(3);
        traced.set_tree_trace_enabled(true);
        let with = Searcher::new(&traced, &clock).find_best_move(&board);

        assert_eq!(without.best_move, with.best_move);
        assert_eq!(without.score, with.score);
        assert!(without.trace.is_empty());
        assert!(!with.trace.is_empty());
        assert!(with.trace.iter().any(|line| line.contains("LEAF")));
    }

    #[test]
    fn test_black_to_move_minimizes() {
        // Black can win a free knight; at depth 1 the capture is chosen.
        let mut board = Board::empty();
        board.set_piece(
            Square::from_algebraic("e1").unwrap(),
            Some(Piece::new(PieceKind::King, Color::White)),
        );
        board.set_piece(
            Square::from_algebraic("d4").unwrap(),
            Some(Piece::new(PieceKind::Knight, Color::White)),
        );
        board.set_piece(
            Square::from_algebraic("d8").unwrap(),
            Some(Piece::new(PieceKind::Rook, Color::Black)),
        );
        board.set_piece(
            Square::from_algebraic("h8").unwrap(),
            Some(Piece::new(PieceKind::King, Color::Black)),
        );
        board.set_turn(Color::Black);

        let settings = untimed_settings(1);
        let clock = MonotonicClock::new();
        let outcome = Searcher::new(&settings, &clock).find_best_move(&board);

        let best = outcome.best_move.expect("no move found");
        assert!(best.is_capture);
        assert_eq!(best.to, Square::from_algebraic("d4").unwrap());
    }
}
