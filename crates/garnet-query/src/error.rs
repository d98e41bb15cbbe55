//! Query execution errors.

use thiserror::Error;

/// Error type for event collection queries.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The event collection could not be reached.
    #[error("event store unavailable: {reason}")]
    Unavailable {
        reason: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The stored collection exists but does not parse as a list of
    /// documents.
    #[error("malformed event collection: {0}")]
    MalformedCollection(#[from] serde_json::Error),

    /// A filter condition uses an operator the executor does not know.
    #[error("unsupported match operator '{0}'")]
    UnsupportedOperator(String),

    /// A known operator was given an operand of the wrong shape.
    #[error("invalid operand for '{operator}': {reason}")]
    InvalidOperand {
        operator: String,
        reason: String,
    },
}

impl QueryError {
    /// Wraps an I/O failure as an unavailability error.
    pub fn unavailable(reason: impl Into<String>, source: std::io::Error) -> Self {
        QueryError::Unavailable {
            reason: reason.into(),
            source: Some(source),
        }
    }
}

/// Result type for query execution.
pub type Result<T> = std::result::Result<T, QueryError>;
