//! # chesscoach — a chess engine that grades your play
//!
//! chesscoach is an interactive chess system built around four tightly
//! coupled parts:
//!
//! - **Board model**: a 64-square mailbox board with side to move, a
//!   cached king square per color, and the auxiliary fields of a full
//!   game record.
//! - **Move generator**: offset-based piece geometry, generate-then-filter
//!   legality via the attack oracle. The rule set is deliberately partial
//!   (no castling, en passant, or promotion execution).
//! - **Search**: iterative-deepening alpha-beta with captures-first move
//!   ordering, a cooperative time budget over an injectable monotonic
//!   clock, and an optional human-readable tree trace.
//! - **Move classifier**: ranks every move you play against all legal
//!   alternatives at one ply and awards a badge from Brilliant down to
//!   Blunder, with session statistics and an exportable report.
//!
//! The [`game::ChessGame`] facade ties these together for any UI; the
//! bundled binary offers a colored terminal game:
//!
//! ```bash
//! # Play against the engine at the default depth
//! chesscoach play
//!
//! # Deeper search with the tree trace on
//! chesscoach play --depth 7 --tree
//! ```

pub mod board;
pub mod classify;
pub mod config;
pub mod eval;
pub mod export;
pub mod game;
pub mod movegen;
pub mod search;
pub mod terminal;
pub mod types;

pub use board::Board;
pub use classify::{Badge, MoveAssessment};
pub use config::EngineSettings;
pub use game::ChessGame;
pub use search::{Clock, MonotonicClock, SearchOutcome};
pub use types::{ChessMove, Color, Piece, PieceKind, Square};
