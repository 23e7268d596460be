//! Synthetic games for driving the search with fully known trees.

#![allow(dead_code)]

use std::cell::Cell;
use std::fmt;

use anyhow::bail;
use chess_minimax::adapter::{Classification, Evaluator, RuleEngine, Side};

/// Move that leads out of the scripted tree. Offered by open leaves so
/// they are not mistaken for finished games.
pub const UNSCRIPTED: usize = usize::MAX;

// =============================================================================
// Scripted game
// =============================================================================

/// One position of a scripted game.
#[derive(Debug, Clone)]
pub struct ScriptNode {
    pub side: Side,
    pub moves: Vec<usize>,
    pub classification: Classification,
    /// Static value from the side to move's point of view
    pub eval: i64,
    /// Open leaves offer one unscripted move
    pub open: bool,
}

/// A game given as an explicit tree. Positions and moves are both node
/// indices: playing move `m` leads to position `m`.
#[derive(Debug)]
pub struct Script {
    pub nodes: Vec<ScriptNode>,
    /// Classification reported for every position, if set
    pub classify_override: Option<Classification>,
    pub fail_legal_moves_at: Option<usize>,
    pub fail_evaluate_at: Option<usize>,
    pub legal_move_calls: Cell<u64>,
    pub apply_calls: Cell<u64>,
    pub evaluate_calls: Cell<u64>,
}

impl Script {
    /// A script with just the root (index 0), open and valued 0.
    pub fn new(root_side: Side) -> Self {
        Self {
            nodes: vec![ScriptNode {
                side: root_side,
                moves: Vec::new(),
                classification: Classification::Ongoing,
                eval: 0,
                open: true,
            }],
            classify_override: None,
            fail_legal_moves_at: None,
            fail_evaluate_at: None,
            legal_move_calls: Cell::new(0),
            apply_calls: Cell::new(0),
            evaluate_calls: Cell::new(0),
        }
    }

    fn push(&mut self, parent: usize, node: ScriptNode) -> usize {
        let id = self.nodes.len();
        self.nodes.push(node);
        let p = &mut self.nodes[parent];
        p.open = false;
        p.moves.push(id);
        id
    }

    /// Add an open child of `parent` whose static value (for its own side
    /// to move) is `eval`.
    pub fn child(&mut self, parent: usize, eval: i64) -> usize {
        let side = self.nodes[parent].side.opponent();
        self.push(
            parent,
            ScriptNode {
                side,
                moves: Vec::new(),
                classification: Classification::Ongoing,
                eval,
                open: true,
            },
        )
    }

    /// Add a finished child of `parent` (no legal moves).
    pub fn ended(&mut self, parent: usize, classification: Classification) -> usize {
        let side = self.nodes[parent].side.opponent();
        self.push(
            parent,
            ScriptNode {
                side,
                moves: Vec::new(),
                classification,
                eval: 0,
                open: false,
            },
        )
    }

    /// Add a child of `parent` where its side to move has been mated.
    pub fn mated(&mut self, parent: usize) -> usize {
        let mated = self.nodes[parent].side.opponent();
        self.ended(parent, Classification::Checkmate { mated })
    }

    /// Make the root a finished position.
    pub fn end_root(&mut self, classification: Classification) {
        let root = &mut self.nodes[0];
        root.open = false;
        root.classification = classification;
    }

    /// A complete tree of the given shape with random values and no
    /// finished positions above `depth`.
    pub fn random(rng: &mut fastrand::Rng, depth: u32, max_branching: usize) -> Self {
        let root_side = if rng.bool() { Side::First } else { Side::Second };
        let mut script = Script::new(root_side);
        let mut frontier = vec![0];
        for _ in 0..depth {
            let mut next = Vec::new();
            for parent in frontier {
                for _ in 0..rng.usize(1..=max_branching) {
                    next.push(script.child(parent, rng.i64(-1000..=1000)));
                }
            }
            frontier = next;
        }
        script
    }

    /// Number of positions in the script, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl RuleEngine for &Script {
    type Position = usize;
    type Move = usize;

    fn legal_moves(&self, p: &usize) -> anyhow::Result<Vec<usize>> {
        self.legal_move_calls.set(self.legal_move_calls.get() + 1);
        if self.fail_legal_moves_at == Some(*p) {
            bail!("move generator crashed at {p}");
        }
        let node = &self.nodes[*p];
        Ok(if node.open {
            vec![UNSCRIPTED]
        } else {
            node.moves.clone()
        })
    }

    fn apply_move(&self, p: &usize, mv: &usize) -> anyhow::Result<usize> {
        self.apply_calls.set(self.apply_calls.get() + 1);
        if !self.nodes[*p].moves.contains(mv) {
            bail!("move {mv} cannot be played from {p}");
        }
        Ok(*mv)
    }

    fn classify(&self, p: &usize) -> anyhow::Result<Classification> {
        Ok(self
            .classify_override
            .unwrap_or(self.nodes[*p].classification))
    }

    fn side_to_move(&self, p: &usize) -> anyhow::Result<Side> {
        Ok(self.nodes[*p].side)
    }
}

impl Evaluator<usize> for &Script {
    fn evaluate(&self, p: &usize) -> anyhow::Result<i64> {
        self.evaluate_calls.set(self.evaluate_calls.get() + 1);
        if self.fail_evaluate_at == Some(*p) {
            bail!("evaluator crashed at {p}");
        }
        Ok(self.nodes[*p].eval)
    }
}

// =============================================================================
// Uniform game
// =============================================================================

/// Position in a game where every position has the same number of moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformPos {
    pub ply: u32,
    pub index: u64,
}

impl fmt::Display for UniformPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ply, self.index)
    }
}

/// Endless game with a fixed branching factor.
#[derive(Debug, Clone, Copy)]
pub struct Uniform {
    pub branching: u64,
}

impl Uniform {
    pub fn root() -> UniformPos {
        UniformPos { ply: 0, index: 0 }
    }
}

impl RuleEngine for Uniform {
    type Position = UniformPos;
    type Move = u64;

    fn legal_moves(&self, _: &UniformPos) -> anyhow::Result<Vec<u64>> {
        Ok((0..self.branching).collect())
    }

    fn apply_move(&self, p: &UniformPos, mv: &u64) -> anyhow::Result<UniformPos> {
        if *mv >= self.branching {
            bail!("no move {mv}");
        }
        Ok(UniformPos {
            ply: p.ply + 1,
            index: p.index * self.branching + mv,
        })
    }

    fn classify(&self, _: &UniformPos) -> anyhow::Result<Classification> {
        Ok(Classification::Ongoing)
    }

    fn side_to_move(&self, p: &UniformPos) -> anyhow::Result<Side> {
        Ok(if p.ply % 2 == 0 { Side::First } else { Side::Second })
    }
}

/// Deterministic pseudo-random value for a uniform position.
pub fn uniform_value(p: &UniformPos) -> anyhow::Result<i64> {
    Ok(((p.index.wrapping_mul(2_654_435_761) >> 7) % 2001) as i64 - 1000)
}
