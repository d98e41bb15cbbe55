//! Caller and effective query shapes.

use garnet_types::{Filter, Projection, UserId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// A query as submitted by a caller, before authorization.
///
/// Transient: built per invocation, consumed by
/// [`QueryAuthorizer::authorize`](crate::QueryAuthorizer::authorize),
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerQuery {
    /// Caller-chosen match conditions. May be empty, never null.
    pub filter: Filter,

    /// Identity the caller claims to act as (verified upstream).
    pub user_id: UserId,
}

impl CallerQuery {
    pub fn new(filter: Filter, user_id: impl Into<UserId>) -> Self {
        Self {
            filter,
            user_id: user_id.into(),
        }
    }

    /// Builds a caller query from a raw JSON filter.
    ///
    /// # Errors
    ///
    /// Returns [`AuthzError::InvalidQuery`](crate::AuthzError::InvalidQuery)
    /// if the value is not a JSON object. This is the seam where untrusted
    /// filter input enters the system.
    pub fn from_json(filter: Value, user_id: impl Into<UserId>) -> Result<Self> {
        Ok(Self::new(Filter::from_value(filter)?, user_id))
    }
}

/// The filter/projection pair actually sent to the execution layer.
///
/// Produced only by the authorizer; the execution collaborator accepts
/// nothing else, so an unmerged caller filter cannot reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveQuery {
    /// Caller filter merged with the mandatory filter (mandatory wins).
    pub filter: Filter,

    /// The record's allowed projection, passed through unchanged.
    /// `None` means full document visibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<Projection>,
}
