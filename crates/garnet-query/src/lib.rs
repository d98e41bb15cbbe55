//! # garnet-query: Event collection execution
//!
//! Runs find-style queries against the event collection. This is the
//! execution side of the authorization boundary: every entry point takes an
//! [`EffectiveQuery`](garnet_authz::EffectiveQuery), so a raw, unmerged
//! caller filter cannot be executed by construction.
//!
//! Matching semantics follow the stored condition shape:
//! - a bare value is an equality match
//! - an operator object applies `$eq`/`$ne`/`$gt`/`$gte`/`$lt`/`$lte`/
//!   `$in`/`$nin`/`$exists`, all of which must hold
//! - unknown `$` operators are an error, never a silent match
//!
//! Projections are applied per returned document; an optional result limit
//! is supplied by the caller, never by the authorizer.

mod error;
mod executor;
mod matcher;
mod projection;

pub use error::{QueryError, Result};
pub use executor::{EventStore, JsonFileEventStore, MemoryEventStore};
pub use matcher::matches_filter;
pub use projection::apply_projection;
