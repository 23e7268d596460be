//! Search settings.

use std::path::PathBuf;

use crate::constants::{DEFAULT_MAX_DEPTH, MAX_SUPPORTED_DEPTH};
use crate::error::{SearchError, SearchResult};

/// Settings for one engine instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Depth limit in plies. Nodes at this depth are scored by the evaluator.
    pub max_depth: u32,
    /// Directory for diagnostic trace files. No trace is written when unset.
    pub trace_dir: Option<PathBuf>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            trace_dir: None,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(max_depth: u32) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    pub fn trace_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.trace_dir = Some(dir.into());
        self
    }

    /// Check the settings before any search starts.
    pub fn validate(&self) -> SearchResult<()> {
        if self.max_depth == 0 {
            return Err(SearchError::configuration("search depth must be at least 1"));
        }
        if self.max_depth > MAX_SUPPORTED_DEPTH {
            return Err(SearchError::configuration(format!(
                "search depth {} exceeds the supported maximum of {MAX_SUPPORTED_DEPTH}",
                self.max_depth
            )));
        }
        Ok(())
    }
}
