//! Authorization errors.

use garnet_store::StoreError;
use garnet_types::UserId;
use thiserror::Error;

/// Error type for query authorization.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// No authorization record exists for the identity.
    ///
    /// Terminal: no query executes. A missing record is never substituted
    /// with a default or an unrestricted one.
    #[error("user '{user}' does not have a permissions record")]
    Unauthorized { user: UserId },

    /// The permission store failed; propagated unchanged, not retried.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The caller-supplied filter is not a well-formed mapping.
    ///
    /// Rejected before any merge happens.
    #[error("invalid caller query: {0}")]
    InvalidQuery(#[from] garnet_types::ShapeError),
}

/// Result type for authorization operations.
pub type Result<T> = std::result::Result<T, AuthzError>;
