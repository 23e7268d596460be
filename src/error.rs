//! Error types for the search engine.
//!
//! Every failure aborts the search in flight. The caller never receives a
//! partially computed move.

/// Errors that can occur while configuring or running a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A rule engine or evaluator call failed, or returned data that
    /// violates its contract.
    #[error("adapter failure during {operation}: {source}")]
    Adapter {
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// Settings or starting resources are unusable. Raised before any
    /// search begins.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// The rule engine's classification contradicts its move list.
    #[error("invariant violation at depth {depth}: {message}")]
    InvariantViolation { depth: u32, message: String },
}

impl SearchError {
    pub fn adapter(operation: &'static str, source: anyhow::Error) -> Self {
        SearchError::Adapter { operation, source }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        SearchError::Configuration {
            message: message.into(),
        }
    }
}

/// Result type alias for search operations
pub type SearchResult<T> = Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_error_keeps_source() {
        let err = SearchError::adapter("apply move", anyhow::anyhow!("illegal move e2e5"));
        assert_eq!(
            err.to_string(),
            "adapter failure during apply move: illegal move e2e5"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_configuration_message() {
        let err = SearchError::configuration("depth must be at least 1");
        assert_eq!(
            err.to_string(),
            "configuration error: depth must be at least 1"
        );
    }
}
