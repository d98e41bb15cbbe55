//! Permission store errors.

use thiserror::Error;

/// Error type for permission store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The permissions collection could not be reached.
    ///
    /// Propagated unchanged to the caller; no retry happens at this layer.
    #[error("permission store unavailable: {reason}")]
    Unavailable {
        reason: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The stored collection exists but does not parse as a list of
    /// authorization records.
    #[error("malformed permissions collection: {0}")]
    MalformedCollection(#[from] serde_json::Error),
}

impl StoreError {
    /// Wraps an I/O failure as an unavailability error.
    pub fn unavailable(reason: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Unavailable {
            reason: reason.into(),
            source: Some(source),
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
