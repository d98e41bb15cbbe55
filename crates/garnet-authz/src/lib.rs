//! # garnet-authz: Query authorization
//!
//! Turns a caller-supplied query into one the caller is allowed to run:
//! - **Row-level security**: the user's mandatory filter is merged into the
//!   caller's filter, and wins on any field collision
//! - **Field-level security**: the user's allowed projection is attached,
//!   unchanged
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  CallerQuery                         │
//! │  filter: {eventDateTime: {...}}      │
//! │  userId: "alice"                     │
//! └───────────────┬─────────────────────┘
//!                 │
//!                 ▼
//! ┌─────────────────────────────────────┐
//! │  QueryAuthorizer                     │
//! │  - Look up authorization record      │
//! │  - No record? hard Unauthorized      │
//! │  - Merge filter (mandatory wins)     │
//! │  - Attach allowed projection         │
//! └───────────────┬─────────────────────┘
//!                 │
//!                 ▼
//! ┌─────────────────────────────────────┐
//! │  EffectiveQuery                      │
//! │  filter: {eventDateTime: {...},      │
//! │           tenant: "acme"}            │
//! │  projection: {eventDateTime: 1, ...} │
//! └─────────────────────────────────────┘
//! ```
//!
//! Only the [`EffectiveQuery`] ever reaches the execution layer; the raw
//! caller filter stops here.
//!
//! ## Example
//!
//! ```
//! use garnet_authz::{CallerQuery, QueryAuthorizer};
//! use garnet_store::MemoryPermissionStore;
//! use garnet_types::{AuthorizationRecord, Filter, Projection};
//! use serde_json::json;
//!
//! let store = MemoryPermissionStore::new().with_record(
//!     AuthorizationRecord::new("alice")
//!         .with_filter(Filter::new().with_condition("tenant", json!("acme")))
//!         .with_projection(Projection::include(["eventDateTime", "action"])),
//! );
//! let authorizer = QueryAuthorizer::new(store);
//!
//! let query = CallerQuery::new(
//!     Filter::new().with_condition("eventDateTime", json!({"$gt": "2020-05-10"})),
//!     "alice",
//! );
//! let effective = authorizer.authorize(&query)?;
//!
//! assert!(effective.filter.contains_field("tenant"));
//! assert!(effective.filter.contains_field("eventDateTime"));
//! # Ok::<(), garnet_authz::AuthzError>(())
//! ```

mod authorizer;
mod error;
mod merge;
mod query;

pub use authorizer::QueryAuthorizer;
pub use error::{AuthzError, Result};
pub use merge::merge_filters;
pub use query::{CallerQuery, EffectiveQuery};
