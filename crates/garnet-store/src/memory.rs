//! In-memory permission store.

use std::collections::BTreeMap;

use garnet_types::{AuthorizationRecord, UserId};

use crate::error::Result;
use crate::{PermissionStore, RecordLookup};

/// Permission store backed by an in-memory map.
///
/// Used for embedding and tests. Records are fixed at construction; the
/// store is read-only afterwards, matching the production contract.
#[derive(Debug, Clone, Default)]
pub struct MemoryPermissionStore {
    records: BTreeMap<UserId, AuthorizationRecord>,
}

impl MemoryPermissionStore {
    /// Creates an empty store (every lookup returns `NotFound`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record, keyed by its `user_id`.
    pub fn with_record(mut self, record: AuthorizationRecord) -> Self {
        self.records.insert(record.user_id.clone(), record);
        self
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PermissionStore for MemoryPermissionStore {
    fn lookup(&self, user: &UserId) -> Result<RecordLookup> {
        Ok(match self.records.get(user) {
            Some(record) => RecordLookup::Found(record.clone()),
            None => RecordLookup::NotFound,
        })
    }
}
