pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::query::FileQuery;
use models::FileRecord;

/// Errors from the file record store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Owner not found: {0}")]
    OwnerNotFound(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Whether a scoped mutation found its target record. A zero-match outcome
/// is reported, never silently treated as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched,
    NoMatch,
}

/// An owner's matching records together with the owner's display name, so a
/// single store call answers both halves of the listing response.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerFiles {
    pub owner: String,
    pub files: Vec<FileRecord>,
}

/// Persistent mapping from owner id to an ordered collection of file records.
///
/// Every operation is scoped: nothing here can read or mutate another
/// owner's data. Listing operations distinguish "owner has zero matching
/// files" (empty collection) from "owner does not exist" (`OwnerNotFound`).
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Point lookup by email, used by the pre-login existence check.
    async fn owner_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Projection returning only the display name, never other attributes.
    async fn display_name(&self, owner_id: &str) -> Result<Option<String>, StoreError>;

    /// The owner's full collection in insertion order.
    async fn list_files(&self, owner_id: &str) -> Result<OwnerFiles, StoreError>;

    /// The owner's records matching `query.filter`, ordered by `query.sort`.
    async fn query_files(&self, owner_id: &str, query: &FileQuery) -> Result<OwnerFiles, StoreError>;

    /// Atomically update the `public` flag of the one record with
    /// `content_id` among the owner's records.
    async fn set_visibility(
        &self,
        owner_id: &str,
        content_id: &str,
        public: bool,
    ) -> Result<MatchOutcome, StoreError>;

    /// Atomically remove the one record with `record_id` among the owner's
    /// records.
    async fn delete_file(&self, owner_id: &str, record_id: Uuid) -> Result<MatchOutcome, StoreError>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
