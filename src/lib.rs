//! chess-minimax: a depth-limited minimax chess engine.
//!
//! This crate recommends a move by building the complete game tree down to
//! a fixed depth and propagating scores with plain minimax (no pruning).
//!
//! ## Modules
//!
//! - [`constants`] - Search limits, terminal scores, material values
//! - [`adapter`] - Rule engine and evaluator contracts
//! - [`node`] - Search tree nodes and terminal classification
//! - [`search`] - The minimax driver and the [`search::Engine`] facade
//! - [`select`] - Best-move selection from the scored root
//! - [`trace`] - Optional per-search diagnostic trace files
//! - [`rules`] - Standard chess rules via the `chess` crate
//! - [`eval`] - Material evaluator
//! - [`uci`] - UCI protocol loop
//!
//! ## Example
//!
//! ```
//! use chess_minimax::config::SearchConfig;
//! use chess_minimax::eval::MaterialEvaluator;
//! use chess_minimax::rules::{parse_fen, ChessRules};
//! use chess_minimax::search::Engine;
//!
//! let engine = Engine::new(ChessRules::new(), MaterialEvaluator::new(), SearchConfig::with_depth(2))?;
//! let board = parse_fen("q3k3/8/8/8/8/8/8/R3K3 w - - 0 1")?;
//! let best = engine.best_move(board)?;
//! println!("Best move: {best}");
//! # Ok::<(), chess_minimax::error::SearchError>(())
//! ```

pub mod adapter;
pub mod config;
pub mod constants;
pub mod error;
pub mod eval;
pub mod node;
pub mod rules;
pub mod search;
pub mod select;
pub mod trace;
pub mod uci;
