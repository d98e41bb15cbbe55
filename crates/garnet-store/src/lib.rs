//! # garnet-store: Permission store access
//!
//! Looks up a single [`AuthorizationRecord`](garnet_types::AuthorizationRecord)
//! by identity from a permissions collection.
//!
//! The one design rule here: **absence of a record is not a record**. A
//! lookup returns a tagged [`RecordLookup`], so "no record exists" (which
//! must hard-fail authorization) can never be confused with "a record with
//! no restrictions" (which authorizes everything).
//!
//! Two backends:
//! - [`MemoryPermissionStore`] for embedding and tests
//! - [`JsonFilePermissionStore`] reading a JSON-array collection file on
//!   every lookup, standing in for a remote document-store client

mod error;
mod file;
mod memory;

use garnet_types::{AuthorizationRecord, UserId};

pub use error::{Result, StoreError};
pub use file::JsonFilePermissionStore;
pub use memory::MemoryPermissionStore;

/// Outcome of a permissions lookup.
///
/// `NotFound` is a first-class variant rather than an `Option` so that call
/// sites must decide what a missing record means; defaulting is impossible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordLookup {
    /// A record exists for the identity.
    Found(AuthorizationRecord),

    /// No record exists for the identity.
    NotFound,
}

impl RecordLookup {
    /// Returns the record, if one was found.
    pub fn found(self) -> Option<AuthorizationRecord> {
        match self {
            RecordLookup::Found(record) => Some(record),
            RecordLookup::NotFound => None,
        }
    }
}

/// Read-only access to the permissions collection.
///
/// One record per identity; a single lookup per call. Implementations must
/// not retry internally and must surface connectivity problems as
/// [`StoreError::Unavailable`] rather than mapping them to `NotFound`.
pub trait PermissionStore {
    /// Looks up the authorization record for `user`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Unavailable`] if the collection cannot be reached
    /// - [`StoreError::MalformedCollection`] if stored data does not parse
    fn lookup(&self, user: &UserId) -> Result<RecordLookup>;
}

// Allow `&S`, `Box<S>` etc. where a store is expected.
impl<S: PermissionStore + ?Sized> PermissionStore for &S {
    fn lookup(&self, user: &UserId) -> Result<RecordLookup> {
        (**self).lookup(user)
    }
}
