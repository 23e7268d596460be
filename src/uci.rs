//! Universal Chess Interface (UCI) implementation.
//!
//! UCI is a text-based protocol spoken between chess GUIs (or bots such as
//! lichess-bot) and engines. This module implements the subset needed to
//! set up positions and ask for moves.
//!
//! ## Supported Commands
//!
//! - `uci` - Identify the engine and list options
//! - `isready` - Synchronisation ping, answered with `readyok`
//! - `ucinewgame` - Reset to the start position
//! - `position startpos|fen <FEN> [moves <m1> <m2> ...]` - Set the position
//! - `go [depth <N>]` - Search the current position and report `bestmove`
//! - `setoption name Depth value <N>` - Change the default search depth
//! - `quit` - Exit the loop
//!
//! ## Example
//!
//! ```ignore
//! use chess_minimax::uci::UciEngine;
//! let mut engine = UciEngine::new(Default::default())?;
//! engine.run();
//! ```

use std::io::{self, BufRead, Write};

use chess::{Board, ChessMove};

use crate::config::SearchConfig;
use crate::constants::{ENGINE_NAME, MAX_SUPPORTED_DEPTH, NULL_MOVE, SENTINEL};
use crate::error::SearchResult;
use crate::eval::MaterialEvaluator;
use crate::node::BoardState;
use crate::rules::{parse_fen, parse_uci_move, ChessRules};
use crate::search::Engine;
use crate::select::BestMove;

/// UCI engine state.
pub struct UciEngine {
    /// Current game position
    board: Board,
    engine: Engine<ChessRules, MaterialEvaluator>,
}

impl UciEngine {
    /// Create a UCI engine searching with `config`.
    pub fn new(config: SearchConfig) -> SearchResult<Self> {
        Ok(Self {
            board: Board::default(),
            engine: Engine::new(ChessRules::new(), MaterialEvaluator::new(), config)?,
        })
    }

    /// Run the UCI command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the command loop over arbitrary input and output streams.
    pub fn run_with<I: BufRead, O: Write>(&mut self, input: I, mut output: O) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            let command = parts[0];
            let args = &parts[1..];

            if command == "quit" {
                break;
            }

            for response in self.execute(command, args) {
                writeln!(output, "{response}")?;
            }
            output.flush()?;
        }
        Ok(())
    }

    /// Execute a UCI command and return the response lines.
    fn execute(&mut self, command: &str, args: &[&str]) -> Vec<String> {
        match command {
            "uci" => vec![
                format!("id name {ENGINE_NAME} {}", env!("CARGO_PKG_VERSION")),
                format!(
                    "option name Depth type spin default {} min 1 max {MAX_SUPPORTED_DEPTH}",
                    self.engine.config().max_depth
                ),
                "uciok".to_string(),
            ],

            "isready" => vec!["readyok".to_string()],

            "ucinewgame" => {
                self.board = Board::default();
                Vec::new()
            }

            "position" => match self.set_position(args) {
                Ok(()) => Vec::new(),
                Err(err) => vec![format!("info string error: {err}")],
            },

            "setoption" => match self.set_option(args) {
                Ok(()) => Vec::new(),
                Err(err) => vec![format!("info string error: {err}")],
            },

            "go" => self.go(args),

            _ => vec![format!("info string unknown command: {command}")],
        }
    }

    /// Handle `position startpos|fen <FEN> [moves ...]`.
    fn set_position(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let moves_at = args.iter().position(|&a| a == "moves").unwrap_or(args.len());
        let (setup, moves) = args.split_at(moves_at);

        let mut board = match setup {
            ["startpos"] => Board::default(),
            ["fen", fen @ ..] if !fen.is_empty() => parse_fen(&fen.join(" "))?,
            _ => anyhow::bail!("expected 'startpos' or 'fen <FEN>'"),
        };

        for text in moves.iter().skip(1) {
            let mv = parse_uci_move(&board, text)?;
            board = board.make_move_new(mv);
        }

        self.board = board;
        Ok(())
    }

    /// Handle `setoption name <name> value <value>`.
    fn set_option(&mut self, args: &[&str]) -> anyhow::Result<()> {
        match args {
            ["name", name, "value", value] if name.eq_ignore_ascii_case("depth") => {
                let depth: u32 = value.parse()?;
                self.engine.set_max_depth(depth)?;
                Ok(())
            }
            ["name", name, ..] => anyhow::bail!("unknown option '{name}'"),
            _ => anyhow::bail!("expected 'name <option> value <value>'"),
        }
    }

    /// Handle `go [depth <N>]`. Other search limits are accepted and ignored.
    ///
    /// The protocol requires every `go` to be answered with a `bestmove`
    /// line, so a failed search still ends with `bestmove 0000`. The failure
    /// itself is reported first on an `info string error:` line, which a
    /// finished game never produces.
    fn go(&mut self, args: &[&str]) -> Vec<String> {
        let mut depth = self.engine.config().max_depth;
        if let Some(i) = args.iter().position(|&a| a == "depth") {
            match args.get(i + 1).map(|d| d.parse::<u32>()) {
                Some(Ok(d)) => depth = d,
                _ => return failed("invalid depth"),
            }
        }

        match self.search(depth) {
            Ok(lines) => lines,
            Err(err) => failed(&err.to_string()),
        }
    }

    /// Search the current position and format the report.
    fn search(&self, depth: u32) -> SearchResult<Vec<String>> {
        let report = self.engine.search_depth(self.board, depth)?;
        let info = format!(
            "info depth {depth} score {} nodes {}",
            score_field(&report.root),
            report.stats.nodes_created
        );
        let best = match report.best {
            BestMove::Move { mv, .. } => format!("bestmove {mv}"),
            BestMove::NoMove => format!("bestmove {NULL_MOVE}"),
        };
        Ok(vec![info, best])
    }
}

/// Response lines for a `go` that could not produce a move.
fn failed(reason: &str) -> Vec<String> {
    vec![
        format!("info string error: {reason}"),
        format!("bestmove {NULL_MOVE}"),
    ]
}

/// UCI score for a searched root: `mate N` when the line ends in mate,
/// otherwise `cp N`.
fn score_field(root: &BoardState<Board, ChessMove>) -> String {
    if root.score.abs() != SENTINEL {
        return format!("cp {}", root.score);
    }

    // Follow the principal line down to the terminal node.
    let mut node = root;
    while let Some(next) = node.children.iter().find(|c| c.score == node.score) {
        node = next;
    }
    let moves = i64::from(node.depth.div_ceil(2));
    let moves = if root.score > 0 { moves } else { -moves };
    format!("mate {moves}")
}
