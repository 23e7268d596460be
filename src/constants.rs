//! Constants for search limits, terminal scores, and material values.
//!
//! This module contains the configuration constants shared by the search
//! driver, the bundled evaluator, and the front ends.

// =============================================================================
// Search Limits
// =============================================================================

/// Default search depth in plies.
pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// Deepest search the engine accepts. Without pruning the tree grows as
/// (branching factor)^depth, so anything beyond this is impractical.
pub const MAX_SUPPORTED_DEPTH: u32 = 8;

// =============================================================================
// Scores
// =============================================================================

/// Score of a certain win for the root side. Strictly larger in magnitude
/// than any evaluator output.
pub const SENTINEL: i64 = 1_000_000_000;

/// Score of a drawn terminal position.
pub const DRAW_SCORE: i64 = 0;

// =============================================================================
// Material Values (centipawns)
// =============================================================================

pub const PAWN_VALUE: i64 = 100;
pub const KNIGHT_VALUE: i64 = 300;
pub const BISHOP_VALUE: i64 = 300;
pub const ROOK_VALUE: i64 = 500;
pub const QUEEN_VALUE: i64 = 900;

// =============================================================================
// Protocol
// =============================================================================

/// Name reported by the UCI `id name` line.
pub const ENGINE_NAME: &str = "chess-minimax";

/// UCI null move, sent as `bestmove` when no legal move exists.
pub const NULL_MOVE: &str = "0000";

/// Prefix of diagnostic trace file names.
pub const TRACE_FILE_PREFIX: &str = "search-";
