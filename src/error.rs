//! Error types for the search engine and its solvers

use thiserror::Error;

/// Errors surfaced to callers of the search engine.
///
/// A search that finds no completion is not an error; it produces an empty
/// report with [`Outcome::Exhausted`](crate::engine::Outcome::Exhausted).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Malformed grid or target parameters that cannot describe a search.
    /// Detected before any frame runs.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Recursion went deeper than the configured limit.
    #[error("search exceeded the maximum depth of {limit} frames")]
    StackExhaustion { limit: usize },

    /// The worker thread or pool that hosts the recursion could not start.
    #[error("failed to start search thread: {0}")]
    ThreadSpawn(String),
}

impl SearchError {
    pub fn invalid(message: impl Into<String>) -> Self {
        SearchError::InvalidInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
