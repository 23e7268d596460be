//! Contracts for the collaborators the search consumes.
//!
//! The search never looks inside a position. Everything it knows about the
//! game comes through [`RuleEngine`], and every static score comes through
//! [`Evaluator`]. Both are synchronous and side-effect free; failures are
//! reported as `anyhow::Error` and turned into [`crate::error::SearchError`]
//! by the driver.

use std::fmt;

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => write!(f, "first"),
            Side::Second => write!(f, "second"),
        }
    }
}

/// Game-ending predicates reported by the rule engine for a position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    /// The king of `mated` is checkmated.
    Checkmate { mated: Side },
    Stalemate,
    InsufficientMaterial,
    /// Any other drawing rule the engine knows about.
    OtherDraw,
    Ongoing,
}

/// Legal-move generation, move application, and game-end detection.
///
/// An empty move list means the game is over in that position.
pub trait RuleEngine {
    type Position: Clone + fmt::Display;
    type Move: Clone + PartialEq + fmt::Debug + fmt::Display;

    /// Legal moves for the side to move, in a stable order.
    fn legal_moves(&self, position: &Self::Position) -> anyhow::Result<Vec<Self::Move>>;

    /// The position reached by playing `mv`. `mv` must be legal in `position`.
    fn apply_move(
        &self,
        position: &Self::Position,
        mv: &Self::Move,
    ) -> anyhow::Result<Self::Position>;

    fn classify(&self, position: &Self::Position) -> anyhow::Result<Classification>;

    fn side_to_move(&self, position: &Self::Position) -> anyhow::Result<Side>;
}

/// Static position evaluation.
pub trait Evaluator<P> {
    /// Score of `position` from the perspective of its side to move.
    /// Positive favours the side to move. The magnitude must stay below
    /// [`crate::constants::SENTINEL`].
    fn evaluate(&self, position: &P) -> anyhow::Result<i64>;
}

impl<P, F> Evaluator<P> for F
where
    F: Fn(&P) -> anyhow::Result<i64>,
{
    fn evaluate(&self, position: &P) -> anyhow::Result<i64> {
        self(position)
    }
}
