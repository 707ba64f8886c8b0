use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One file's metadata entry under an owner. `id` is unique within the
/// owning collection; `content_id` is the immutable content address.
///
/// Owner rows never leave the store as a whole: lookups project the single
/// attribute they need (existence, display name), so there is no full
/// `Owner` row type here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileRecord {
    pub id: Uuid,
    pub content_id: String,
    pub file_name: String,
    pub public: bool,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}
