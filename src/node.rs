//! Search tree nodes.
//!
//! Each [`BoardState`] owns its children, so dropping the root discards the
//! whole tree. The back-reference to the parent is the parent's [`NodeId`],
//! an identifier that is only meaningful within one search.

use std::fmt;

use crate::adapter::{Classification, RuleEngine, Side};
use crate::constants::{DRAW_SCORE, SENTINEL};
use crate::error::{SearchError, SearchResult};

/// Identifier of a node within one search. Assigned in creation order;
/// the root is always 0.
pub type NodeId = u64;

/// Game outcome of a node, from the perspective of its side to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Terminal {
    Ongoing,
    Win,
    Lose,
    Draw,
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Terminal::Ongoing => "ongoing",
            Terminal::Win => "win",
            Terminal::Lose => "lose",
            Terminal::Draw => "draw",
        };
        f.write_str(s)
    }
}

/// A node in the minimax search tree.
#[derive(Debug, Clone)]
pub struct BoardState<P, M> {
    pub id: NodeId,
    /// The game position at this node
    pub position: P,
    /// Plies from the root
    pub depth: u32,
    pub side_to_move: Side,
    /// Move that produced this node (None at the root)
    pub move_made: Option<M>,
    pub terminal: Terminal,
    /// Minimax score, positive favours the root's side to move
    pub score: i64,
    pub parent: Option<NodeId>,
    /// Child nodes in move-generation order
    pub children: Vec<BoardState<P, M>>,
}

impl<P, M> BoardState<P, M> {
    /// Create the root node for `position`.
    pub fn root<R>(rules: &R, position: P) -> SearchResult<Self>
    where
        R: RuleEngine<Position = P, Move = M>,
    {
        let side_to_move = rules
            .side_to_move(&position)
            .map_err(|e| SearchError::adapter("side to move", e))?;
        Ok(Self {
            id: 0,
            position,
            depth: 0,
            side_to_move,
            move_made: None,
            terminal: Terminal::Ongoing,
            score: 0,
            parent: None,
            children: Vec::new(),
        })
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal != Terminal::Ongoing
    }

    /// Play `mv` from this node and append the resulting child.
    ///
    /// `id` becomes the child's identifier. Returns the new child.
    pub fn expand<R>(&mut self, rules: &R, mv: M, id: NodeId) -> SearchResult<&mut Self>
    where
        R: RuleEngine<Position = P, Move = M>,
    {
        let position = rules
            .apply_move(&self.position, &mv)
            .map_err(|e| SearchError::adapter("apply move", e))?;
        let side_to_move = rules
            .side_to_move(&position)
            .map_err(|e| SearchError::adapter("side to move", e))?;

        self.children.push(Self {
            id,
            position,
            depth: self.depth + 1,
            side_to_move,
            move_made: Some(mv),
            terminal: Terminal::Ongoing,
            score: 0,
            parent: Some(self.id),
            children: Vec::new(),
        });
        let last = self.children.len() - 1;
        Ok(&mut self.children[last])
    }

    /// Record the node's game outcome given its legal move count and the
    /// rule engine's classification.
    ///
    /// A node with legal moves must be classified `Ongoing`. A node without
    /// legal moves that is neither mate nor draw falls back to `Lose`.
    pub fn classify(
        &mut self,
        legal_moves: usize,
        classification: Classification,
    ) -> SearchResult<Terminal> {
        let terminal = if legal_moves > 0 {
            if classification != Classification::Ongoing {
                return Err(SearchError::InvariantViolation {
                    depth: self.depth,
                    message: format!(
                        "{legal_moves} legal moves but position classified {classification:?}"
                    ),
                });
            }
            Terminal::Ongoing
        } else {
            match classification {
                Classification::Checkmate { mated } if mated == self.side_to_move => {
                    Terminal::Lose
                }
                Classification::Checkmate { .. } => Terminal::Win,
                Classification::Stalemate
                | Classification::InsufficientMaterial
                | Classification::OtherDraw => Terminal::Draw,
                Classification::Ongoing => {
                    tracing::warn!(
                        depth = self.depth,
                        "no legal moves but no mate or draw reported, scoring as a loss"
                    );
                    Terminal::Lose
                }
            }
        };
        self.terminal = terminal;
        Ok(terminal)
    }

    /// Count the nodes in this subtree, including this one.
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(|c| c.subtree_size()).sum::<usize>()
    }

    /// Greatest depth reached in this subtree.
    pub fn max_depth(&self) -> u32 {
        self.children
            .iter()
            .map(|c| c.max_depth())
            .max()
            .unwrap_or(self.depth)
    }

    /// Visit every node of the subtree in depth-first pre-order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Self)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }
}

/// Turn a side-relative value into one oriented to the root side.
#[inline]
pub fn orient(value: i64, side: Side, root_side: Side) -> i64 {
    if side == root_side { value } else { -value }
}

/// Fixed score of a terminal node, oriented to the root side.
pub fn terminal_score(terminal: Terminal, side: Side, root_side: Side) -> i64 {
    match terminal {
        Terminal::Win => orient(SENTINEL, side, root_side),
        Terminal::Lose => orient(-SENTINEL, side, root_side),
        Terminal::Draw | Terminal::Ongoing => DRAW_SCORE,
    }
}
