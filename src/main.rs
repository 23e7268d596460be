//! chess-minimax: a depth-limited minimax chess engine.
//!
//! ## Usage
//!
//! - `chess-minimax` - Recommend a move for the start position
//! - `chess-minimax search --fen <FEN> --depth 3` - Recommend a move for a position
//! - `chess-minimax uci` - Speak UCI on stdin/stdout for GUIs and bots

use std::path::PathBuf;

use anyhow::Context;
use chess::Board;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chess_minimax::config::SearchConfig;
use chess_minimax::constants::DEFAULT_MAX_DEPTH;
use chess_minimax::eval::MaterialEvaluator;
use chess_minimax::rules::{parse_fen, ChessRules};
use chess_minimax::search::Engine;
use chess_minimax::select::dump_children;
use chess_minimax::uci::UciEngine;

/// chess-minimax: exhaustive depth-limited minimax for chess
#[derive(Parser)]
#[command(name = "chess-minimax")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search one position and print the recommended move
    Search(SearchArgs),
    /// Start the UCI (Universal Chess Interface) loop
    Uci(SearchArgs),
}

#[derive(clap::Args, Default)]
struct SearchArgs {
    /// Starting position as FEN (defaults to the standard start position)
    #[arg(long)]
    fen: Option<String>,
    /// Search depth in plies
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    depth: u32,
    /// Directory for per-search diagnostic trace files
    #[arg(long)]
    trace_dir: Option<PathBuf>,
    /// Print every root move with its score to stderr
    #[arg(long)]
    verbose: bool,
}

impl SearchArgs {
    fn config(&self) -> SearchConfig {
        SearchConfig {
            max_depth: self.depth,
            trace_dir: self.trace_dir.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Uci(args)) => {
            let mut engine = UciEngine::new(args.config())?;
            engine.run().context("UCI loop failed")?;
        }
        Some(Commands::Search(args)) => run_search(&args)?,
        None => run_search(&SearchArgs {
            depth: DEFAULT_MAX_DEPTH,
            ..SearchArgs::default()
        })?,
    }
    Ok(())
}

fn run_search(args: &SearchArgs) -> anyhow::Result<()> {
    let engine = Engine::new(ChessRules::new(), MaterialEvaluator::new(), args.config())?;
    let board = match &args.fen {
        Some(fen) => parse_fen(fen)?,
        None => Board::default(),
    };

    let report = engine.search(board)?;
    if args.verbose {
        dump_children(&report.root);
    }

    println!("{}", report.best);
    if let Some(score) = report.best.score() {
        println!("score {score}");
    }
    if let Some(path) = &report.trace_path {
        eprintln!("trace written to {}", path.display());
    }
    Ok(())
}
