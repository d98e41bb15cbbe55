//! # garnet-types: Core types for Garnet
//!
//! This crate contains the shared types used across the Garnet system:
//! - Identity ([`UserId`])
//! - Query shapes ([`Filter`], [`MatchCondition`])
//! - Field visibility ([`Projection`], [`ProjectionMode`])
//! - Stored permissions ([`AuthorizationRecord`])
//! - Event payloads ([`Document`])
//!
//! Everything here is plain data: no I/O, no policy decisions. The
//! authorization and execution crates build on these shapes.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A single event document, as stored in the event collection.
///
/// Field order follows the underlying JSON object.
pub type Document = serde_json::Map<String, Value>;

/// Error for JSON values that do not have the expected shape.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// A filter must be a JSON object mapping field names to conditions.
    #[error("filter must be a JSON object, got {actual}")]
    FilterNotAnObject {
        /// JSON type name of the offending value.
        actual: &'static str,
    },

    /// Projection flags must be 0 (exclude) or 1 (include).
    #[error("projection flag must be 0 or 1, got {0}")]
    InvalidProjectionFlag(u64),
}

// ============================================================================
// Identity
// ============================================================================

/// The identity a caller acts as.
///
/// Authentication happens upstream; Garnet only uses the identity as the
/// lookup key into the permissions collection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether the identity string is empty.
    ///
    /// Empty identities are rejected at the CLI and store seams; an empty
    /// key would never match a permissions record anyway.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// ============================================================================
// Filters
// ============================================================================

/// A single field-level match condition.
///
/// Opaque to the authorizer: merging operates on field keys only. The
/// executor interprets the payload, which is either a bare value (equality)
/// or an operator object such as `{"$gt": "2020-05-10"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchCondition(Value);

impl MatchCondition {
    pub fn new(condition: impl Into<Value>) -> Self {
        Self(condition.into())
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Returns the operator object entries if this condition is one,
    /// i.e. a JSON object whose keys all start with `$`.
    ///
    /// A bare object value (no `$` keys) is an equality match on that
    /// object and returns `None`.
    pub fn as_operators(&self) -> Option<&serde_json::Map<String, Value>> {
        match &self.0 {
            Value::Object(map) if !map.is_empty() && map.keys().all(|k| k.starts_with('$')) => {
                Some(map)
            }
            _ => None,
        }
    }
}

impl From<Value> for MatchCondition {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A set of field-level match conditions restricting which documents a
/// query returns.
///
/// Keys are field names; the mapping is ordered (`BTreeMap`) so that equal
/// filters always serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter(BTreeMap<String, MatchCondition>);

impl Filter {
    /// Creates an empty filter (matches every document).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a filter from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::FilterNotAnObject`] if the value is not a JSON
    /// object. An empty object is a valid, empty filter.
    pub fn from_value(value: Value) -> Result<Self, ShapeError> {
        match value {
            Value::Object(map) => Ok(Self(
                map.into_iter()
                    .map(|(field, condition)| (field, MatchCondition::new(condition)))
                    .collect(),
            )),
            other => Err(ShapeError::FilterNotAnObject {
                actual: json_type_name(&other),
            }),
        }
    }

    /// Adds a condition on a field, replacing any existing condition.
    pub fn with_condition(
        mut self,
        field: impl Into<String>,
        condition: impl Into<MatchCondition>,
    ) -> Self {
        self.0.insert(field.into(), condition.into());
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, condition: impl Into<MatchCondition>) {
        self.0.insert(field.into(), condition.into());
    }

    pub fn get(&self, field: &str) -> Option<&MatchCondition> {
        self.0.get(field)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over `(field, condition)` entries in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &MatchCondition)> {
        self.0.iter()
    }

    /// Iterates over field names in order.
    pub fn fields(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}

impl FromIterator<(String, MatchCondition)> for Filter {
    fn from_iter<T: IntoIterator<Item = (String, MatchCondition)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Projections
// ============================================================================

/// Whether a projected field is returned or withheld.
///
/// Serialized as `1` (include) / `0` (exclude) to match the stored
/// permissions record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum ProjectionMode {
    Exclude,
    Include,
}

impl TryFrom<u64> for ProjectionMode {
    type Error = ShapeError;

    fn try_from(flag: u64) -> Result<Self, Self::Error> {
        match flag {
            0 => Ok(ProjectionMode::Exclude),
            1 => Ok(ProjectionMode::Include),
            other => Err(ShapeError::InvalidProjectionFlag(other)),
        }
    }
}

impl From<ProjectionMode> for u64 {
    fn from(mode: ProjectionMode) -> Self {
        match mode {
            ProjectionMode::Exclude => 0,
            ProjectionMode::Include => 1,
        }
    }
}

/// A set of field inclusion/exclusion flags restricting which fields of a
/// matched document are returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Projection(BTreeMap<String, ProjectionMode>);

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an inclusion projection over the given fields.
    pub fn include<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            fields
                .into_iter()
                .map(|f| (f.into(), ProjectionMode::Include))
                .collect(),
        )
    }

    /// Builds an exclusion projection over the given fields.
    pub fn exclude<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            fields
                .into_iter()
                .map(|f| (f.into(), ProjectionMode::Exclude))
                .collect(),
        )
    }

    pub fn insert(&mut self, field: impl Into<String>, mode: ProjectionMode) {
        self.0.insert(field.into(), mode);
    }

    pub fn get(&self, field: &str) -> Option<ProjectionMode> {
        self.0.get(field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether any field is explicitly included.
    ///
    /// A projection with at least one include entry runs in inclusion mode:
    /// only the included fields are returned.
    pub fn has_includes(&self) -> bool {
        self.0.values().any(|m| *m == ProjectionMode::Include)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, ProjectionMode)> {
        self.0.iter().map(|(f, m)| (f, *m))
    }
}

// ============================================================================
// Authorization records
// ============================================================================

/// One user's stored permissions, keyed by identity.
///
/// Created and maintained by an out-of-band administration process; Garnet
/// only ever reads these.
///
/// An absent `filter` means "no additional row restriction" and an absent
/// `projection` means "full document visibility". Absence of the *record*
/// itself is a different thing entirely and is represented at the store
/// boundary, never by a default record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationRecord {
    /// Identity this record applies to. Unique key, immutable.
    pub user_id: UserId,

    /// Mandatory row filter, merged into every query this user runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,

    /// Allowed field projection, applied to every result this user sees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<Projection>,
}

impl AuthorizationRecord {
    /// Creates an unrestricted record for the given identity.
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            filter: None,
            projection: None,
        }
    }

    /// Sets the mandatory row filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the allowed field projection.
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
