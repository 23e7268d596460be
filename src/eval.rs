//! Static evaluation by material count.

use chess::{Board, Color, Piece};

use crate::adapter::Evaluator;
use crate::constants::{BISHOP_VALUE, KNIGHT_VALUE, PAWN_VALUE, QUEEN_VALUE, ROOK_VALUE};

/// Piece values in centipawns. Kings are not counted.
const PIECE_VALUES: [(Piece, i64); 5] = [
    (Piece::Pawn, PAWN_VALUE),
    (Piece::Knight, KNIGHT_VALUE),
    (Piece::Bishop, BISHOP_VALUE),
    (Piece::Rook, ROOK_VALUE),
    (Piece::Queen, QUEEN_VALUE),
];

/// Scores a position as the material of the side to move minus the
/// material of its opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    pub fn new() -> Self {
        MaterialEvaluator
    }
}

/// Total material value of `color`'s pieces.
pub fn material(board: &Board, color: Color) -> i64 {
    let own = *board.color_combined(color);
    PIECE_VALUES
        .iter()
        .map(|&(piece, value)| i64::from((*board.pieces(piece) & own).popcnt()) * value)
        .sum()
}

impl Evaluator<Board> for MaterialEvaluator {
    fn evaluate(&self, position: &Board) -> anyhow::Result<i64> {
        let us = position.side_to_move();
        Ok(material(position, us) - material(position, !us))
    }
}
