//! Interactive terminal game.
//!
//! A prompt loop where the human plays White against the engine playing
//! Black. Every user move is graded (when enabled) and the running
//! analysis can be inspected and saved from inside the game. All engine
//! behavior is reached through the [`ChessGame`] facade; this module only
//! renders and parses.

use colored::Colorize;
use std::io::{self, Write};

use crate::classify::MoveAssessment;
use crate::export;
use crate::game::ChessGame;
use crate::search::SearchOutcome;
use crate::types::{Color, Piece, PieceKind, Square};

/// Renders the board from White's perspective (rank 8 at top).
pub fn print_board(game: &ChessGame) {
    println!();
    println!("  +---+---+---+---+---+---+---+---+");

    for rank in (0..8u8).rev() {
        print!("{} ", rank + 1);
        for file in 0..8u8 {
            let sq = Square::new(file, rank);
            let piece_str = match game.piece_at(sq) {
                Some(piece) => {
                    let symbol = piece_to_unicode(piece);
                    if piece.color == Color::White {
                        symbol.white().bold().to_string()
                    } else {
                        symbol.blue().bold().to_string()
                    }
                }
                None => {
                    if (file + rank) % 2 == 0 {
                        "·".dimmed().to_string()
                    } else {
                        " ".to_string()
                    }
                }
            };
            print!("| {} ", piece_str);
        }
        println!("|");
        println!("  +---+---+---+---+---+---+---+---+");
    }
    println!("    a   b   c   d   e   f   g   h");
    println!();
}

/// Converts a piece to its Unicode chess symbol.
fn piece_to_unicode(piece: Piece) -> &'static str {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::King) => "♔",
        (Color::White, PieceKind::Queen) => "♕",
        (Color::White, PieceKind::Rook) => "♖",
        (Color::White, PieceKind::Bishop) => "♗",
        (Color::White, PieceKind::Knight) => "♘",
        (Color::White, PieceKind::Pawn) => "♙",
        (Color::Black, PieceKind::King) => "♚",
        (Color::Black, PieceKind::Queen) => "♛",
        (Color::Black, PieceKind::Rook) => "♜",
        (Color::Black, PieceKind::Bishop) => "♝",
        (Color::Black, PieceKind::Knight) => "♞",
        (Color::Black, PieceKind::Pawn) => "♟",
    }
}

/// Prints the status bar: side to move, check warning, legal-move count.
pub fn print_status(game: &ChessGame) {
    let turn_str = match game.current_player() {
        Color::White => "White (you)".white().bold(),
        Color::Black => "Black (engine)".blue().bold(),
    };
    print!("Turn: {}", turn_str);

    if game.is_in_check() {
        print!("  {}", "CHECK!".red().bold());
    }

    println!("  Legal moves: {}", game.legal_moves().len());
    println!();
}

/// Prints the current engine configuration.
pub fn print_config(game: &ChessGame) {
    let settings = game.settings();
    let on_off = |b: bool| if b { "on" } else { "off" };

    println!();
    println!("{}", "ENGINE CONFIGURATION".yellow().bold());
    println!("  Max depth     : {}", settings.max_depth());
    println!("  Time limit    : {} ms", settings.time_limit_ms());
    println!("  Timer         : {}", on_off(settings.time_limit_enabled()));
    println!("  Tree trace    : {}", on_off(settings.tree_trace_enabled()));
    println!("  Move grading  : {}", on_off(settings.classifier_enabled()));
    println!();
}

/// Prints the command reference.
pub fn print_help() {
    println!("{}", "COMMANDS".yellow().bold());
    println!("  {}        - play a move", "e2e4".green());
    println!("  {}       - list legal moves", "moves".green());
    println!("  {}       - redraw the board", "board".green());
    println!("  {}      - show engine settings", "config".green());
    println!("  {}     - set search depth (1-15)", "depth N".green());
    println!("  {}      - set time budget in ms (100-60000)", "time N".green());
    println!("  {} - toggle the time budget", "timer on|off".green());
    println!("  {}  - toggle the search tree trace", "tree on|off".green());
    println!("  {} - toggle move grading", "grade on|off".green());
    println!("  {}    - show the move-grade history", "analysis".green());
    println!("  {} - save the analysis report", "save [file]".green());
    println!("  {}        - dump the analysis as JSON", "json".green());
    println!("  {}        - leave the game", "quit".green());
    println!();
}

/// Prints the grading of a just-played user move.
fn print_assessment(assessment: &MoveAssessment) {
    println!();
    println!("{}", "MOVE ANALYSIS".yellow().bold());
    println!("  Move:   {}", assessment.notation);
    println!("  Badge:  {}", assessment.badge);
    println!("  Detail: {}", assessment.description);
    println!(
        "  Rank:   #{} of {} moves",
        assessment.rank, assessment.total_moves
    );
    print!(
        "  Score:  {} → {}",
        assessment.score_before, assessment.score_after
    );
    if assessment.score_diff != 0 {
        print!(" ({:+})", assessment.score_diff);
    }
    println!();
    println!();
}

/// Prints the recorded analysis history and session statistics.
pub fn print_analysis(game: &ChessGame) {
    let history = game.analysis_history();
    if history.is_empty() {
        println!("No graded moves yet.");
        return;
    }

    println!();
    println!("{}", "MOVE GRADE HISTORY".yellow().bold());
    for (i, assessment) in history.iter().enumerate() {
        println!(
            "  {:>3}. {:<7} {:<16} {}",
            i + 1,
            assessment.notation,
            assessment.badge.to_string(),
            assessment.description
        );
    }

    let counts = game.analysis_counts();
    println!();
    println!("{}", "STATISTICS".yellow().bold());
    println!(
        "  🔥 Brilliant: {}  ⭐ Best: {}  ✨ Great: {}  ✓ Good: {}",
        counts.brilliant, counts.best, counts.great, counts.good
    );
    println!(
        "  ❓ Inaccuracy: {}  ❗ Mistake: {}  💥 Blunder: {}",
        counts.inaccuracy, counts.mistake, counts.blunder
    );
    println!("  🎯 Accuracy: {:.1}%", game.analysis_accuracy());
    println!();
}

/// Prints the per-depth search telemetry and the chosen move.
fn print_search_report(outcome: &SearchOutcome) {
    for line in &outcome.trace {
        println!("{}", line.dimmed());
    }
    for report in &outcome.depth_reports {
        println!(
            "  depth {:>2}: {} score {:>6} | {} nodes in {} ms ({} nps)",
            report.depth,
            report.best_move,
            report.score,
            report.nodes,
            report.elapsed_ms,
            report.nodes_per_second()
        );
    }
    println!(
        "  total: {} nodes in {} ms",
        outcome.nodes, outcome.elapsed_ms
    );
}

/// Prints the final result banner.
fn print_game_result(game: &ChessGame) {
    println!();
    println!("{}", "═══════════════════════════════════".yellow());
    if game.is_checkmate() {
        let winner = game.current_player().opponent();
        let label = match winner {
            Color::White => "White (you) win by checkmate!",
            Color::Black => "Black (engine) wins by checkmate!",
        };
        println!("  {}", label.green().bold());
    } else if game.is_stalemate() {
        println!("  {}", "Draw by stalemate.".green().bold());
    }
    println!("{}", "═══════════════════════════════════".yellow());
    println!();
}

/// Handles the engine's turn: search, report, apply.
fn engine_turn(game: &mut ChessGame) {
    println!("{}", "Engine thinking...".blue().bold());
    let outcome = game.best_move();
    print_search_report(&outcome);

    match outcome.best_move {
        Some(mv) => match game.apply_move(mv) {
            Ok(applied) => println!("{} {}", "Engine plays:".blue().bold(), applied),
            Err(e) => println!("{}: {}", "Error".red().bold(), e),
        },
        None => println!("{}", "Engine has no legal move.".red()),
    }
}

/// Runs the interactive game loop until the game ends or the user quits.
pub fn run_game(mut game: ChessGame) {
    println!();
    println!("{}", "╔═══════════════════════════════════════╗".cyan());
    println!("{}", "║      CHESSCOACH — play & learn        ║".cyan());
    println!("{}", "║  every move you play gets a grade     ║".cyan());
    println!("{}", "╚═══════════════════════════════════════╝".cyan());
    println!();
    println!("Badges: 🔥 Brilliant  ⭐ Best  ✨ Great  ✓ Good  ❓ Inaccuracy  ❗ Mistake  💥 Blunder");
    println!();

    print_help();
    print_config(&game);
    print_board(&game);
    print_status(&game);

    loop {
        if game.is_game_over() {
            print_game_result(&game);
            break;
        }

        if game.current_player() == Color::Black {
            engine_turn(&mut game);
            print_board(&game);
            print_status(&game);
            continue;
        }

        print!("{} > ", "White".white().bold());
        io::stdout().flush().unwrap();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("{}", "Failed to read input.".red());
            continue;
        }
        if input.is_empty() {
            // EOF on stdin.
            break;
        }
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            continue;
        }

        match input.as_str() {
            "quit" | "exit" | "q" => {
                println!("Thanks for playing!");
                break;
            }
            "help" | "h" | "?" => print_help(),
            "board" | "b" => {
                print_board(&game);
                print_status(&game);
            }
            "config" | "info" => print_config(&game),
            "moves" | "m" => print_legal_moves(&game),
            "analysis" => print_analysis(&game),
            "json" => match export::format_json_report(
                game.id(),
                game.analysis_history(),
                game.analysis_counts(),
                game.analysis_accuracy(),
                export::unix_timestamp(),
            ) {
                Ok(json) => println!("{}", json),
                Err(e) => println!("{}: {}", "Error".red().bold(), e),
            },
            _ => handle_command_or_move(&mut game, &input),
        }
    }

    // Closing summary of the user's play, with an offer to save it.
    if !game.analysis_history().is_empty() {
        print_analysis(&game);

        print!("Save the analysis report? (y/n): ");
        io::stdout().flush().unwrap();
        let mut choice = String::new();
        if io::stdin().read_line(&mut choice).is_ok()
            && matches!(choice.trim().to_lowercase().as_str(), "y" | "yes")
        {
            match game.export_analysis(None, export::unix_timestamp()) {
                Ok(filename) => println!("{} {}", "Report saved to:".green(), filename),
                Err(e) => println!("{}: {}", "Error".red().bold(), e),
            }
        }
    }
}

/// Dispatches settings commands, the save command, and move input.
fn handle_command_or_move(game: &mut ChessGame, input: &str) {
    let mut parts = input.split_whitespace();
    let head = parts.next().unwrap_or("");
    let arg = parts.next();

    match (head, arg) {
        ("depth", Some(value)) => match value.parse::<u8>() {
            Ok(depth) => apply_setting(game.set_search_depth(depth), "Depth updated"),
            Err(_) => println!("{}", "Depth must be a number.".red()),
        },
        ("time", Some(value)) => match value.parse::<u64>() {
            Ok(ms) => apply_setting(game.set_time_limit_ms(ms), "Time limit updated"),
            Err(_) => println!("{}", "Time limit must be a number of milliseconds.".red()),
        },
        ("timer", Some(value)) => match parse_toggle(value) {
            Some(enabled) => {
                game.set_time_limit_enabled(enabled);
                println!("Timer: {}", if enabled { "on" } else { "off" });
            }
            None => println!("{}", "Use: timer on|off".red()),
        },
        ("tree", Some(value)) => match parse_toggle(value) {
            Some(enabled) => {
                game.set_tree_trace_enabled(enabled);
                println!("Tree trace: {}", if enabled { "on" } else { "off" });
                if enabled {
                    println!("{}", "Warning: the trace can be very long!".yellow());
                }
            }
            None => println!("{}", "Use: tree on|off".red()),
        },
        ("grade", Some(value)) => match parse_toggle(value) {
            Some(enabled) => {
                game.set_classifier_enabled(enabled);
                println!("Move grading: {}", if enabled { "on" } else { "off" });
            }
            None => println!("{}", "Use: grade on|off".red()),
        },
        ("save", path) => {
            match game.export_analysis(path, export::unix_timestamp()) {
                Ok(filename) => println!("{} {}", "Report saved to:".green(), filename),
                Err(e) => println!("{}: {}", "Error".red().bold(), e),
            }
        }
        ("reset", None) => {
            game.reset_settings();
            println!("Settings reset to defaults.");
            print_config(game);
        }
        _ => handle_move_input(game, input),
    }
}

/// Parses and plays a user move, printing its grade first.
fn handle_move_input(game: &mut ChessGame, input: &str) {
    let Some(mv) = game.parse_move(input) else {
        println!(
            "{} Use coordinates like {}, or '{}' for commands.",
            "Invalid input.".red(),
            "e2e4".green(),
            "help".green()
        );
        return;
    };

    match game.classify_move(mv) {
        Ok(assessment) => {
            if let Some(assessment) = &assessment {
                print_assessment(assessment);
            }
        }
        Err(_) => {
            print_illegal_move_hint(game);
            return;
        }
    }

    match game.apply_move(mv) {
        Ok(applied) => {
            println!("{} {}", "Your move:".green(), applied);
            print_board(game);
            print_status(game);
        }
        Err(_) => print_illegal_move_hint(game),
    }
}

fn print_illegal_move_hint(game: &ChessGame) {
    println!("{}", "Illegal move!".red().bold());
    let examples: Vec<String> = game
        .legal_moves()
        .iter()
        .take(5)
        .map(|m| m.to_string())
        .collect();
    println!(
        "Examples of legal moves: {} — type '{}' for the full list.",
        examples.join(" "),
        "moves".green()
    );
}

fn print_legal_moves(game: &ChessGame) {
    let moves = game.legal_moves();
    println!("{} ({} moves)", "LEGAL MOVES".yellow().bold(), moves.len());
    for (i, mv) in moves.iter().enumerate() {
        if i > 0 && i % 8 == 0 {
            println!();
        }
        let rendered = if mv.is_capture {
            format!("{} (x)", mv)
        } else {
            mv.to_string()
        };
        print!("  {}", rendered.green());
    }
    println!();
    println!();
}

fn apply_setting(result: Result<(), String>, success: &str) {
    match result {
        Ok(()) => println!("{}", success.green()),
        Err(e) => println!("{}: {}", "Error".red().bold(), e),
    }
}

fn parse_toggle(value: &str) -> Option<bool> {
    match value {
        "on" | "true" | "1" => Some(true),
        "off" | "false" | "0" => Some(false),
        _ => None,
    }
}
