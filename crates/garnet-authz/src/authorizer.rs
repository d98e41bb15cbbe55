//! The query authorizer.

use garnet_store::{PermissionStore, RecordLookup};
use garnet_types::Filter;
use tracing::{info, warn};

use crate::error::{AuthzError, Result};
use crate::merge::merge_filters;
use crate::query::{CallerQuery, EffectiveQuery};

/// Authorizes caller queries against stored permissions.
///
/// One store lookup plus pure computation per call: no hidden clock, no
/// randomness, no mutation. Identical inputs against an identical stored
/// record always produce an identical [`EffectiveQuery`].
pub struct QueryAuthorizer<S: PermissionStore> {
    store: S,
}

impl<S: PermissionStore> QueryAuthorizer<S> {
    /// Creates an authorizer over the given permission store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Derives the effective query the caller is allowed to run.
    ///
    /// **Steps:**
    /// 1. Look up the caller's authorization record
    /// 2. Missing record ⇒ hard [`AuthzError::Unauthorized`]
    /// 3. Merge the caller filter with the mandatory filter (mandatory wins)
    /// 4. Attach the record's projection unchanged
    ///
    /// # Errors
    ///
    /// - [`AuthzError::Unauthorized`] if no record exists for the identity
    /// - [`AuthzError::Store`] if the permission store cannot be reached
    pub fn authorize(&self, query: &CallerQuery) -> Result<EffectiveQuery> {
        let record = match self.store.lookup(&query.user_id)? {
            RecordLookup::Found(record) => record,
            RecordLookup::NotFound => {
                warn!(user = %query.user_id, "No permissions record, query denied");
                return Err(AuthzError::Unauthorized {
                    user: query.user_id.clone(),
                });
            }
        };

        // Absent filter means "no additional restriction"; merging with the
        // empty filter keeps that equivalent to an explicit empty one.
        let mandatory = record.filter.unwrap_or_else(Filter::new);
        let filter = merge_filters(&query.filter, &mandatory);

        info!(
            user = %query.user_id,
            mandatory_fields = mandatory.len(),
            effective_fields = filter.len(),
            projected = record.projection.is_some(),
            "Query authorized"
        );

        Ok(EffectiveQuery {
            filter,
            projection: record.projection,
        })
    }

    /// Returns the underlying permission store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garnet_store::{MemoryPermissionStore, StoreError};
    use garnet_types::{AuthorizationRecord, Projection, UserId};
    use serde_json::json;

    fn alice_record() -> AuthorizationRecord {
        AuthorizationRecord::new("alice")
            .with_filter(Filter::new().with_condition("tenant", json!("acme")))
            .with_projection(Projection::include(["eventDateTime", "action"]))
    }

    fn date_range_filter() -> Filter {
        Filter::new().with_condition(
            "eventDateTime",
            json!({"$gt": "2020-05-10", "$lt": "2020-05-11"}),
        )
    }

    #[test]
    fn test_authorize_merges_mandatory_filter() {
        let authorizer =
            QueryAuthorizer::new(MemoryPermissionStore::new().with_record(alice_record()));

        let effective = authorizer
            .authorize(&CallerQuery::new(date_range_filter(), "alice"))
            .unwrap();

        assert_eq!(effective.filter.len(), 2);
        assert_eq!(effective.filter.get("tenant").unwrap().as_value(), &json!("acme"));
        assert_eq!(
            effective.filter.get("eventDateTime").unwrap().as_value(),
            &json!({"$gt": "2020-05-10", "$lt": "2020-05-11"})
        );
    }

    #[test]
    fn test_authorize_projection_passthrough() {
        let authorizer =
            QueryAuthorizer::new(MemoryPermissionStore::new().with_record(alice_record()));

        let effective = authorizer
            .authorize(&CallerQuery::new(Filter::new(), "alice"))
            .unwrap();

        assert_eq!(
            effective.projection,
            Some(Projection::include(["eventDateTime", "action"]))
        );
    }

    #[test]
    fn test_authorize_absent_projection_means_full_visibility() {
        let record = AuthorizationRecord::new("carol");
        let authorizer = QueryAuthorizer::new(MemoryPermissionStore::new().with_record(record));

        let effective = authorizer
            .authorize(&CallerQuery::new(Filter::new(), "carol"))
            .unwrap();

        assert!(effective.projection.is_none());
        assert!(effective.filter.is_empty());
    }

    #[test]
    fn test_missing_record_is_unauthorized() {
        let authorizer = QueryAuthorizer::new(MemoryPermissionStore::new());

        let err = authorizer
            .authorize(&CallerQuery::new(date_range_filter(), "bob"))
            .unwrap_err();

        match err {
            AuthzError::Unauthorized { user } => assert_eq!(user, UserId::new("bob")),
            other => panic!("Expected Unauthorized, got {other:?}"),
        }
    }

    #[test]
    fn test_caller_cannot_override_mandatory_field() {
        let authorizer =
            QueryAuthorizer::new(MemoryPermissionStore::new().with_record(alice_record()));

        // Caller names the mandatory field with a wider condition.
        let query = CallerQuery::new(
            Filter::new().with_condition("tenant", json!({"$ne": "acme"})),
            "alice",
        );
        let effective = authorizer.authorize(&query).unwrap();

        assert_eq!(effective.filter.get("tenant").unwrap().as_value(), &json!("acme"));
    }

    #[test]
    fn test_explicit_empty_filter_equals_absent_filter() {
        let absent = AuthorizationRecord::new("absent");
        let explicit = AuthorizationRecord::new("explicit").with_filter(Filter::new());
        let store = MemoryPermissionStore::new()
            .with_record(absent)
            .with_record(explicit);
        let authorizer = QueryAuthorizer::new(store);

        let caller_filter = Filter::new().with_condition("action", json!("login"));
        let a = authorizer
            .authorize(&CallerQuery::new(caller_filter.clone(), "absent"))
            .unwrap();
        let b = authorizer
            .authorize(&CallerQuery::new(caller_filter, "explicit"))
            .unwrap();

        assert_eq!(a.filter, b.filter);
    }

    #[test]
    fn test_store_failure_propagates_unchanged() {
        struct FailingStore;
        impl PermissionStore for FailingStore {
            fn lookup(&self, _: &UserId) -> garnet_store::Result<RecordLookup> {
                Err(StoreError::Unavailable {
                    reason: "connection refused".to_string(),
                    source: None,
                })
            }
        }

        let authorizer = QueryAuthorizer::new(FailingStore);
        let err = authorizer
            .authorize(&CallerQuery::new(Filter::new(), "alice"))
            .unwrap_err();

        assert!(matches!(err, AuthzError::Store(StoreError::Unavailable { .. })));
    }

    #[test]
    fn test_authorize_is_deterministic() {
        let authorizer =
            QueryAuthorizer::new(MemoryPermissionStore::new().with_record(alice_record()));
        let query = CallerQuery::new(date_range_filter(), "alice");

        let first = serde_json::to_vec(&authorizer.authorize(&query).unwrap()).unwrap();
        let second = serde_json::to_vec(&authorizer.authorize(&query).unwrap()).unwrap();

        assert_eq!(first, second);
    }
}
