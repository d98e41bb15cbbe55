//! JSON-file-backed permission store.

use std::fs;
use std::path::{Path, PathBuf};

use garnet_types::{AuthorizationRecord, UserId};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::{PermissionStore, RecordLookup};

/// Permission store reading a JSON collection file.
///
/// The file holds a JSON array of authorization records:
///
/// ```json
/// [
///   {"userId": "alice", "filter": {"tenant": "acme"}, "projection": {"action": 1}}
/// ]
/// ```
///
/// The file is re-read on every lookup, so each call observes the current
/// collection state and surfaces connectivity problems individually, the
/// same way a remote document-store client would.
#[derive(Debug, Clone)]
pub struct JsonFilePermissionStore {
    path: PathBuf,
}

impl JsonFilePermissionStore {
    /// Creates a store over the given collection file.
    ///
    /// The file is not touched until the first lookup.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing collection file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_collection(&self) -> Result<Vec<AuthorizationRecord>> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            StoreError::unavailable(
                format!("cannot read permissions collection {}", self.path.display()),
                e,
            )
        })?;
        let records = serde_json::from_str(&raw)?;
        Ok(records)
    }
}

impl PermissionStore for JsonFilePermissionStore {
    fn lookup(&self, user: &UserId) -> Result<RecordLookup> {
        let records = self.read_collection()?;
        debug!(
            user = %user,
            path = %self.path.display(),
            records = records.len(),
            "Scanning permissions collection"
        );

        Ok(records
            .into_iter()
            .find(|r| &r.user_id == user)
            .map_or(RecordLookup::NotFound, RecordLookup::Found))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_collection(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("user_perms.json");
        let mut file = fs::File::create(&path).expect("Failed to create collection file");
        file.write_all(contents.as_bytes())
            .expect("Failed to write collection file");
        path
    }

    #[test]
    fn test_lookup_found_and_not_found() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = write_collection(
            dir.path(),
            r#"[
                {"userId": "alice", "filter": {"tenant": "acme"},
                 "projection": {"eventDateTime": 1, "action": 1}},
                {"userId": "carol"}
            ]"#,
        );

        let store = JsonFilePermissionStore::new(path);

        let alice = store.lookup(&UserId::new("alice")).unwrap();
        let record = alice.found().expect("alice has a record");
        assert!(record.filter.is_some());
        assert!(record.projection.is_some());

        let carol = store.lookup(&UserId::new("carol")).unwrap();
        let record = carol.found().expect("carol has a record");
        assert!(record.filter.is_none());

        let bob = store.lookup(&UserId::new("bob")).unwrap();
        assert_eq!(bob, RecordLookup::NotFound);
    }

    #[test]
    fn test_missing_file_is_unavailable_not_notfound() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = JsonFilePermissionStore::new(dir.path().join("nope.json"));

        let err = store.lookup(&UserId::new("alice")).unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
    }

    #[test]
    fn test_malformed_collection() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = write_collection(dir.path(), r#"{"not": "an array"}"#);

        let store = JsonFilePermissionStore::new(path);
        let err = store.lookup(&UserId::new("alice")).unwrap_err();
        assert!(matches!(err, StoreError::MalformedCollection(_)));
    }

    #[test]
    fn test_lookup_observes_current_file_state() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = write_collection(dir.path(), "[]");
        let store = JsonFilePermissionStore::new(path.clone());

        assert_eq!(store.lookup(&UserId::new("alice")).unwrap(), RecordLookup::NotFound);

        write_collection(dir.path(), r#"[{"userId": "alice"}]"#);
        assert!(matches!(
            store.lookup(&UserId::new("alice")).unwrap(),
            RecordLookup::Found(_)
        ));
    }
}
