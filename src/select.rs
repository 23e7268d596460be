//! Best-move selection from a scored root.

use std::fmt;

use crate::node::BoardState;

/// Outcome of a search: a recommended move, or none when the root position
/// has no legal moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BestMove<M> {
    Move { mv: M, score: i64 },
    NoMove,
}

impl<M> BestMove<M> {
    pub fn mv(&self) -> Option<&M> {
        match self {
            BestMove::Move { mv, .. } => Some(mv),
            BestMove::NoMove => None,
        }
    }

    pub fn score(&self) -> Option<i64> {
        match self {
            BestMove::Move { score, .. } => Some(*score),
            BestMove::NoMove => None,
        }
    }
}

impl<M: fmt::Display> fmt::Display for BestMove<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BestMove::Move { mv, .. } => write!(f, "{mv}"),
            BestMove::NoMove => write!(f, "(none)"),
        }
    }
}

/// Pick the root child with the strictly highest score.
///
/// Children are scanned in generation order, so the earliest of several
/// equally scored moves wins.
pub fn best_move<P, M: Clone>(root: &BoardState<P, M>) -> BestMove<M> {
    let mut best: Option<&BoardState<P, M>> = None;
    for child in &root.children {
        if best.is_none_or(|b| child.score > b.score) {
            best = Some(child);
        }
    }
    match best.and_then(|b| b.move_made.clone().map(|mv| (mv, b.score))) {
        Some((mv, score)) => BestMove::Move { mv, score },
        None => BestMove::NoMove,
    }
}

/// Print debug information about the root's children.
pub fn dump_children<P, M: fmt::Display>(root: &BoardState<P, M>) {
    for child in &root.children {
        if let Some(mv) = &child.move_made {
            eprintln!("move {mv} score={} terminal={}", child.score, child.terminal);
        }
    }
}
