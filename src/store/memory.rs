// In-memory file record store. The injectable stand-in for the Postgres
// store; integration tests run the full HTTP surface against it.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::FileRecord;
use super::{FileStore, MatchOutcome, OwnerFiles, StoreError};
use crate::query::{FileQuery, SortDirection, SortField};

#[derive(Debug)]
struct OwnerEntry {
    email: String,
    display_name: String,
    files: Vec<FileRecord>,
}

#[derive(Debug, Default)]
pub struct MemoryFileStore {
    owners: RwLock<HashMap<String, OwnerEntry>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_owner(&self, owner_id: &str, email: &str, display_name: &str) {
        let mut owners = self.owners.write().await;
        owners.insert(
            owner_id.to_string(),
            OwnerEntry {
                email: email.to_string(),
                display_name: display_name.to_string(),
                files: Vec::new(),
            },
        );
    }

    pub async fn insert_file(&self, owner_id: &str, record: FileRecord) -> Result<(), StoreError> {
        let mut owners = self.owners.write().await;
        let entry = owners
            .get_mut(owner_id)
            .ok_or_else(|| StoreError::OwnerNotFound(owner_id.to_string()))?;
        entry.files.push(record);
        Ok(())
    }
}

fn compare(a: &FileRecord, b: &FileRecord, field: SortField) -> Ordering {
    match field {
        SortField::FileName => a.file_name.cmp(&b.file_name),
        SortField::SizeBytes => a.size_bytes.cmp(&b.size_bytes),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Public => a.public.cmp(&b.public),
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn owner_exists(&self, email: &str) -> Result<bool, StoreError> {
        let owners = self.owners.read().await;
        Ok(owners.values().any(|entry| entry.email == email))
    }

    async fn display_name(&self, owner_id: &str) -> Result<Option<String>, StoreError> {
        let owners = self.owners.read().await;
        Ok(owners.get(owner_id).map(|entry| entry.display_name.clone()))
    }

    async fn list_files(&self, owner_id: &str) -> Result<OwnerFiles, StoreError> {
        let owners = self.owners.read().await;
        let entry = owners
            .get(owner_id)
            .ok_or_else(|| StoreError::OwnerNotFound(owner_id.to_string()))?;

        Ok(OwnerFiles {
            owner: entry.display_name.clone(),
            files: entry.files.clone(),
        })
    }

    async fn query_files(&self, owner_id: &str, query: &FileQuery) -> Result<OwnerFiles, StoreError> {
        let owners = self.owners.read().await;
        let entry = owners
            .get(owner_id)
            .ok_or_else(|| StoreError::OwnerNotFound(owner_id.to_string()))?;

        let mut files: Vec<FileRecord> = entry
            .files
            .iter()
            .filter(|record| query.filter.matches(record))
            .cloned()
            .collect();

        // sort_by is stable, so ties keep insertion order
        files.sort_by(|a, b| {
            let ordering = compare(a, b, query.sort.field);
            match query.sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        Ok(OwnerFiles {
            owner: entry.display_name.clone(),
            files,
        })
    }

    async fn set_visibility(
        &self,
        owner_id: &str,
        content_id: &str,
        public: bool,
    ) -> Result<MatchOutcome, StoreError> {
        let mut owners = self.owners.write().await;
        let entry = match owners.get_mut(owner_id) {
            Some(entry) => entry,
            // Unknown owner matches nothing; same outcome as a missing record
            None => return Ok(MatchOutcome::NoMatch),
        };

        match entry.files.iter_mut().find(|f| f.content_id == content_id) {
            Some(record) => {
                record.public = public;
                Ok(MatchOutcome::Matched)
            }
            None => Ok(MatchOutcome::NoMatch),
        }
    }

    async fn delete_file(&self, owner_id: &str, record_id: Uuid) -> Result<MatchOutcome, StoreError> {
        let mut owners = self.owners.write().await;
        let entry = match owners.get_mut(owner_id) {
            Some(entry) => entry,
            None => return Ok(MatchOutcome::NoMatch),
        };

        match entry.files.iter().position(|f| f.id == record_id) {
            Some(index) => {
                entry.files.remove(index);
                Ok(MatchOutcome::Matched)
            }
            None => Ok(MatchOutcome::NoMatch),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
