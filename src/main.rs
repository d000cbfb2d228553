use clap::{Parser, Subcommand};

use chesscoach::game::ChessGame;
use chesscoach::terminal;

/// chesscoach — play chess against an engine that grades every move.
#[derive(Parser, Debug)]
#[command(name = "chesscoach")]
#[command(about = "Chess engine and trainer — every move you play gets a grade")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a game in the terminal (you are White, the engine is Black).
    Play {
        /// Maximum search depth (1-15).
        #[arg(short, long, default_value_t = 5)]
        depth: u8,

        /// Search time budget in milliseconds (100-60000).
        #[arg(short, long, default_value_t = 5000)]
        time_limit: u64,

        /// Disable the time budget (search always to full depth).
        #[arg(long)]
        no_time_limit: bool,

        /// Print the alpha-beta tree trace for every engine search.
        #[arg(long)]
        tree: bool,

        /// Disable move grading.
        #[arg(long)]
        no_grading: bool,
    },
}

fn main() -> Result<(), String> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            depth,
            time_limit,
            no_time_limit,
            tree,
            no_grading,
        } => {
            let mut game = ChessGame::new();
            game.set_search_depth(depth)?;
            game.set_time_limit_ms(time_limit)?;
            game.set_time_limit_enabled(!no_time_limit);
            game.set_tree_trace_enabled(tree);
            game.set_classifier_enabled(!no_grading);

            log::info!(
                "starting game {} (depth {}, time limit {} ms{})",
                game.id(),
                depth,
                time_limit,
                if no_time_limit { ", timer off" } else { "" }
            );

            terminal::run_game(game);
            Ok(())
        }
    }
}
