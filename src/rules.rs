//! Standard chess rules, backed by the `chess` crate.
//!
//! Positions are `chess::Board` values (displayed as FEN) and moves are
//! `chess::ChessMove` values (displayed in UCI long algebraic notation).
//! A dead position with insufficient mating material has no legal moves:
//! the game is over there, just as after mate or stalemate.

use std::str::FromStr;

use anyhow::{anyhow, bail};
use chess::{Board, BoardBuilder, BoardStatus, ChessMove, Color, MoveGen, Piece, ALL_SQUARES};

use crate::adapter::{Classification, RuleEngine, Side};
use crate::error::{SearchError, SearchResult};

/// [`RuleEngine`] for standard chess.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChessRules;

impl ChessRules {
    pub fn new() -> Self {
        ChessRules
    }
}

impl RuleEngine for ChessRules {
    type Position = Board;
    type Move = ChessMove;

    fn legal_moves(&self, position: &Board) -> anyhow::Result<Vec<ChessMove>> {
        if is_insufficient_material(position) {
            return Ok(Vec::new());
        }
        Ok(MoveGen::new_legal(position).collect())
    }

    fn apply_move(&self, position: &Board, mv: &ChessMove) -> anyhow::Result<Board> {
        if is_insufficient_material(position) || !position.legal(*mv) {
            bail!("move {mv} is not legal in {position}");
        }
        Ok(position.make_move_new(*mv))
    }

    fn classify(&self, position: &Board) -> anyhow::Result<Classification> {
        Ok(match position.status() {
            BoardStatus::Checkmate => Classification::Checkmate {
                mated: side_of(position.side_to_move()),
            },
            BoardStatus::Stalemate => Classification::Stalemate,
            BoardStatus::Ongoing if is_insufficient_material(position) => {
                Classification::InsufficientMaterial
            }
            BoardStatus::Ongoing => Classification::Ongoing,
        })
    }

    fn side_to_move(&self, position: &Board) -> anyhow::Result<Side> {
        Ok(side_of(position.side_to_move()))
    }
}

/// White moves first.
pub fn side_of(color: Color) -> Side {
    match color {
        Color::White => Side::First,
        Color::Black => Side::Second,
    }
}

/// True when neither side can possibly mate: bare kings, or kings plus a
/// single knight or bishop.
pub fn is_insufficient_material(board: &Board) -> bool {
    let heavy =
        *board.pieces(Piece::Pawn) | *board.pieces(Piece::Rook) | *board.pieces(Piece::Queen);
    heavy.popcnt() == 0 && board.combined().popcnt() <= 3
}

/// Parse a FEN string into a starting position.
///
/// Each colour must have exactly one king; `Board` cannot represent any
/// other placement.
pub fn parse_fen(fen: &str) -> SearchResult<Board> {
    let invalid =
        |reason: String| SearchError::configuration(format!("invalid FEN '{fen}': {reason}"));
    let builder = BoardBuilder::from_str(fen.trim()).map_err(|e| invalid(e.to_string()))?;

    for color in [Color::White, Color::Black] {
        let kings = ALL_SQUARES
            .iter()
            .filter(|&&sq| builder[sq] == Some((Piece::King, color)))
            .count();
        if kings != 1 {
            return Err(invalid(format!("{color:?} has {kings} kings")));
        }
    }

    Board::try_from(&builder).map_err(|e| invalid(e.to_string()))
}

/// Parse a move in UCI notation (e.g. `e2e4`, `e7e8q`) and check that it
/// is legal in `board`.
pub fn parse_uci_move(board: &Board, text: &str) -> anyhow::Result<ChessMove> {
    let mv = ChessMove::from_str(text).map_err(|e| anyhow!("invalid move '{text}': {e}"))?;
    if !board.legal(mv) {
        bail!("illegal move '{text}' in {board}");
    }
    Ok(mv)
}
