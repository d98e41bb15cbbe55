//! Event collection backends and find execution.

use std::fs;
use std::path::{Path, PathBuf};

use garnet_authz::EffectiveQuery;
use garnet_types::Document;
use tracing::debug;

use crate::error::{QueryError, Result};
use crate::matcher::matches_filter;
use crate::projection::apply_projection;

/// Read-only access to the event collection.
///
/// The contract of the execution boundary: implementations take an
/// [`EffectiveQuery`] (never a raw caller filter) and an optional
/// caller-supplied result limit.
pub trait EventStore {
    /// Runs a find-style query: match against the effective filter, apply
    /// the effective projection, stop after `limit` documents.
    fn find(&self, query: &EffectiveQuery, limit: Option<usize>) -> Result<Vec<Document>>;
}

impl<E: EventStore + ?Sized> EventStore for &E {
    fn find(&self, query: &EffectiveQuery, limit: Option<usize>) -> Result<Vec<Document>> {
        (**self).find(query, limit)
    }
}

/// Scans documents in collection order, matching and projecting.
fn run_find<'a, I>(documents: I, query: &EffectiveQuery, limit: Option<usize>) -> Result<Vec<Document>>
where
    I: IntoIterator<Item = &'a Document>,
{
    let limit = limit.unwrap_or(usize::MAX);
    let mut results = Vec::new();

    for document in documents {
        if results.len() >= limit {
            break;
        }
        if matches_filter(document, &query.filter)? {
            results.push(apply_projection(document, query.projection.as_ref()));
        }
    }

    Ok(results)
}

/// Event collection backed by an in-memory list of documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventStore {
    events: Vec<Document>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event document.
    pub fn with_event(mut self, event: Document) -> Self {
        self.events.push(event);
        self
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl From<Vec<Document>> for MemoryEventStore {
    fn from(events: Vec<Document>) -> Self {
        Self { events }
    }
}

impl EventStore for MemoryEventStore {
    fn find(&self, query: &EffectiveQuery, limit: Option<usize>) -> Result<Vec<Document>> {
        run_find(&self.events, query, limit)
    }
}

/// Event collection reading a JSON array file, one document per element.
///
/// Re-read per query, like the permission store's file backend, so
/// connectivity failures surface per call as [`QueryError::Unavailable`].
#[derive(Debug, Clone)]
pub struct JsonFileEventStore {
    path: PathBuf,
}

impl JsonFileEventStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_collection(&self) -> Result<Vec<Document>> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            QueryError::unavailable(
                format!("cannot read event collection {}", self.path.display()),
                e,
            )
        })?;
        let documents = serde_json::from_str(&raw)?;
        Ok(documents)
    }
}

impl EventStore for JsonFileEventStore {
    fn find(&self, query: &EffectiveQuery, limit: Option<usize>) -> Result<Vec<Document>> {
        let documents = self.read_collection()?;
        debug!(
            path = %self.path.display(),
            documents = documents.len(),
            "Scanning event collection"
        );
        run_find(&documents, query, limit)
    }
}
