use std::sync::Arc;

use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthOwner;
use crate::store::{FileStore, MatchOutcome};

/// Scopes every write to `(resolved owner, target record)`.
///
/// The owner id comes exclusively from [`AuthOwner`], never from request
/// fields, and the target matcher travels into the store in the same
/// atomic operation as the owner scope. Missing targets are rejected
/// before the store is touched; a zero-match outcome surfaces as
/// `file_not_found` rather than silent success.
#[derive(Clone)]
pub struct MutationGuard {
    store: Arc<dyn FileStore>,
}

impl MutationGuard {
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self { store }
    }

    pub async fn set_visibility(
        &self,
        owner: &AuthOwner,
        content_id: &str,
        state: Option<bool>,
    ) -> Result<(), ApiError> {
        let state = state.ok_or_else(|| ApiError::missing_field("state"))?;
        if content_id.trim().is_empty() {
            return Err(ApiError::missing_field("content_id"));
        }

        match self
            .store
            .set_visibility(&owner.owner_id, content_id, state)
            .await?
        {
            MatchOutcome::Matched => Ok(()),
            MatchOutcome::NoMatch => Err(ApiError::not_found("file_not_found")),
        }
    }

    pub async fn delete_file(&self, owner: &AuthOwner, record_id: &str) -> Result<(), ApiError> {
        if record_id.trim().is_empty() {
            return Err(ApiError::missing_field("record_id"));
        }
        let record_id = Uuid::parse_str(record_id)
            .map_err(|_| ApiError::bad_request("Invalid record id format"))?;

        match self.store.delete_file(&owner.owner_id, record_id).await? {
            MatchOutcome::Matched => Ok(()),
            MatchOutcome::NoMatch => Err(ApiError::not_found("file_not_found")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryFileStore;
    use crate::store::models::FileRecord;
    use chrono::{TimeZone, Utc};

    async fn guarded_store() -> (MutationGuard, Arc<MemoryFileStore>) {
        let store = Arc::new(MemoryFileStore::new());
        store.insert_owner("u1", "u1@example.com", "User One").await;
        store
            .insert_file(
                "u1",
                FileRecord {
                    id: Uuid::from_u128(1),
                    content_id: "c1".to_string(),
                    file_name: "photo.jpg".to_string(),
                    public: false,
                    size_bytes: 2048,
                    created_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
                },
            )
            .await
            .unwrap();
        (MutationGuard::new(store.clone()), store)
    }

    fn owner(id: &str) -> AuthOwner {
        AuthOwner {
            owner_id: id.to_string(),
        }
    }

    #[tokio::test]
    async fn missing_state_fails_before_store_access() {
        let (guard, store) = guarded_store().await;

        let err = guard
            .set_visibility(&owner("u1"), "c1", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingField(_)));

        // Record untouched
        let listing = store.list_files("u1").await.unwrap();
        assert!(!listing.files[0].public);
    }

    #[tokio::test]
    async fn empty_content_id_is_a_missing_field() {
        let (guard, _store) = guarded_store().await;

        let err = guard
            .set_visibility(&owner("u1"), "  ", Some(true))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingField(_)));
    }

    #[tokio::test]
    async fn zero_match_surfaces_as_not_found() {
        let (guard, _store) = guarded_store().await;

        let err = guard
            .set_visibility(&owner("u1"), "no-such-cid", Some(true))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn cross_owner_mutation_never_lands() {
        let (guard, store) = guarded_store().await;
        store.insert_owner("u2", "u2@example.com", "User Two").await;

        let err = guard
            .set_visibility(&owner("u2"), "c1", Some(true))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let listing = store.list_files("u1").await.unwrap();
        assert!(!listing.files[0].public);
    }

    #[tokio::test]
    async fn delete_requires_wellformed_record_id() {
        let (guard, _store) = guarded_store().await;

        let err = guard
            .delete_file(&owner("u1"), "not-a-uuid")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err = guard.delete_file(&owner("u1"), " ").await.unwrap_err();
        assert!(matches!(err, ApiError::MissingField(_)));
    }

    #[tokio::test]
    async fn delete_then_list_never_returns_the_record() {
        let (guard, store) = guarded_store().await;

        guard
            .delete_file(&owner("u1"), &Uuid::from_u128(1).to_string())
            .await
            .unwrap();

        let listing = store.list_files("u1").await.unwrap();
        assert!(listing.files.is_empty());
    }
}
