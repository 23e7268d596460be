//! Depth-limited minimax search.
//!
//! The search builds the full game tree down to the configured depth,
//! one child at a time and depth first:
//! - Terminal positions get a fixed score (win, loss, or draw)
//! - Positions at the depth limit are scored by the evaluator
//! - Every other node takes the maximum of its children when the root side
//!   is to move there, and the minimum otherwise
//!
//! There is no pruning and no memoization. All per-search state lives in a
//! [`SearchContext`] created for each call, so nothing carries over from one
//! search to the next.
//!
//! When the search goes deeper than one ply, a child of the root that
//! turns out to be terminal (whatever the outcome) stops the whole search,
//! and the tree is cut back to the root's children. A one-ply search scores
//! every child of the root.

use std::path::PathBuf;

use chrono::Local;

use crate::adapter::{Evaluator, RuleEngine, Side};
use crate::config::SearchConfig;
use crate::constants::SENTINEL;
use crate::error::{SearchError, SearchResult};
use crate::node::{orient, terminal_score, BoardState, NodeId};
use crate::select::{best_move, BestMove};
use crate::trace::SearchTrace;

/// Counters collected during one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Child nodes created (the root is not counted)
    pub nodes_created: u64,
    /// Evaluator calls
    pub evaluations: u64,
    /// Nodes classified as won, lost, or drawn
    pub terminal_nodes: u64,
    /// Whether the search was cut short by a terminal child of the root
    pub early_stop: bool,
}

/// Everything a finished search produced.
#[derive(Debug)]
pub struct SearchReport<P, M> {
    /// The scored tree. Dropped with the report.
    pub root: BoardState<P, M>,
    pub best: BestMove<M>,
    pub stats: SearchStats,
    pub trace_path: Option<PathBuf>,
}

/// A rule engine and an evaluator bound to search settings.
pub struct Engine<R, E> {
    rules: R,
    evaluator: E,
    config: SearchConfig,
}

impl<R, E> Engine<R, E>
where
    R: RuleEngine,
    E: Evaluator<R::Position>,
{
    /// Create an engine. Fails with a configuration error if the settings
    /// are unusable.
    pub fn new(rules: R, evaluator: E, config: SearchConfig) -> SearchResult<Self> {
        config.validate()?;
        Ok(Self {
            rules,
            evaluator,
            config,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Change the default depth limit.
    pub fn set_max_depth(&mut self, max_depth: u32) -> SearchResult<()> {
        let config = SearchConfig {
            max_depth,
            ..self.config.clone()
        };
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Search `position` to the configured depth and return the whole report.
    pub fn search(
        &self,
        position: R::Position,
    ) -> SearchResult<SearchReport<R::Position, R::Move>> {
        self.search_depth(position, self.config.max_depth)
    }

    /// Search `position` to `max_depth` plies.
    pub fn search_depth(
        &self,
        position: R::Position,
        max_depth: u32,
    ) -> SearchResult<SearchReport<R::Position, R::Move>> {
        SearchConfig {
            max_depth,
            ..self.config.clone()
        }
        .validate()?;

        let started = Local::now();
        let mut root = BoardState::root(&self.rules, position)?;
        tracing::info!(
            position = %root.position,
            side = %root.side_to_move,
            max_depth,
            "search started"
        );

        let trace = self
            .config
            .trace_dir
            .as_deref()
            .and_then(|dir| SearchTrace::open(dir, started));
        let trace_path = trace.as_ref().map(|t| t.path().to_path_buf());

        let mut ctx = SearchContext::new(
            &self.rules,
            &self.evaluator,
            root.side_to_move,
            max_depth,
            trace,
        );
        let outcome = ctx.visit(&mut root);
        let SearchContext { stats, trace, .. } = ctx;
        if let Some(trace) = trace {
            trace.finish();
        }
        outcome?;

        if stats.early_stop {
            for child in &mut root.children {
                child.children.clear();
            }
        }

        let best = best_move(&root);
        tracing::info!(
            best = %best,
            score = root.score,
            nodes = stats.nodes_created,
            evaluations = stats.evaluations,
            early_stop = stats.early_stop,
            elapsed_ms = (Local::now() - started).num_milliseconds(),
            "search finished"
        );

        Ok(SearchReport {
            root,
            best,
            stats,
            trace_path,
        })
    }

    /// Search `position` to the configured depth and return only the
    /// recommended move.
    pub fn best_move(&self, position: R::Position) -> SearchResult<BestMove<R::Move>> {
        self.search(position).map(|report| report.best)
    }
}

/// State of one search in flight.
struct SearchContext<'a, R, E> {
    rules: &'a R,
    evaluator: &'a E,
    /// Side to move at the root; all scores are oriented to it
    root_side: Side,
    max_depth: u32,
    stopped: bool,
    next_id: NodeId,
    stats: SearchStats,
    trace: Option<SearchTrace>,
}

impl<'a, R, E> SearchContext<'a, R, E>
where
    R: RuleEngine,
    E: Evaluator<R::Position>,
{
    fn new(
        rules: &'a R,
        evaluator: &'a E,
        root_side: Side,
        max_depth: u32,
        trace: Option<SearchTrace>,
    ) -> Self {
        Self {
            rules,
            evaluator,
            root_side,
            max_depth,
            stopped: false,
            next_id: 1,
            stats: SearchStats::default(),
            trace,
        }
    }

    /// Classify, expand, and score `node` and its whole subtree.
    fn visit(&mut self, node: &mut BoardState<R::Position, R::Move>) -> SearchResult<()> {
        let rules = self.rules;
        let moves = rules
            .legal_moves(&node.position)
            .map_err(|e| SearchError::adapter("generate legal moves", e))?;
        let classification = rules
            .classify(&node.position)
            .map_err(|e| SearchError::adapter("classify", e))?;
        node.classify(moves.len(), classification)?;

        if node.is_terminal() {
            self.stats.terminal_nodes += 1;
            node.score = terminal_score(node.terminal, node.side_to_move, self.root_side);
            // A terminal leaf at the depth limit never stops the search.
            if node.depth == 1 && node.depth < self.max_depth {
                tracing::debug!(
                    terminal = %node.terminal,
                    mv = ?node.move_made,
                    "terminal reply at depth 1, stopping search"
                );
                self.stopped = true;
                self.stats.early_stop = true;
            }
        } else if node.depth >= self.max_depth {
            node.score = self.evaluate(node)?;
        } else {
            for mv in moves {
                if self.stopped {
                    break;
                }
                let id = self.next_id;
                self.next_id += 1;
                let child = node.expand(rules, mv, id)?;
                self.stats.nodes_created += 1;
                self.visit(child)?;
            }
            node.score = self.aggregate(node)?;
        }

        tracing::trace!(id = node.id, depth = node.depth, score = node.score, "node scored");
        if let Some(trace) = self.trace.as_mut() {
            trace.record(node);
        }
        Ok(())
    }

    /// Static score of `node`, oriented to the root side.
    fn evaluate(&mut self, node: &BoardState<R::Position, R::Move>) -> SearchResult<i64> {
        let value = self
            .evaluator
            .evaluate(&node.position)
            .map_err(|e| SearchError::adapter("evaluate", e))?;
        self.stats.evaluations += 1;
        if value.unsigned_abs() >= SENTINEL.unsigned_abs() {
            return Err(SearchError::adapter(
                "evaluate",
                anyhow::anyhow!("evaluation {value} is not below the terminal score {SENTINEL}"),
            ));
        }
        Ok(orient(value, node.side_to_move, self.root_side))
    }

    /// Minimax over the scored children of `node`.
    fn aggregate(&self, node: &BoardState<R::Position, R::Move>) -> SearchResult<i64> {
        let scores = node.children.iter().map(|c| c.score);
        let score = if node.side_to_move == self.root_side {
            scores.max()
        } else {
            scores.min()
        };
        score.ok_or_else(|| SearchError::InvariantViolation {
            depth: node.depth,
            message: "ongoing position produced no scored children".to_string(),
        })
    }
}
