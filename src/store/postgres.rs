// Postgres-backed file record store.
//
// Expected schema:
//   owners (id TEXT PRIMARY KEY, email TEXT UNIQUE NOT NULL, display_name TEXT NOT NULL)
//   files  (id UUID PRIMARY KEY, owner_id TEXT NOT NULL REFERENCES owners(id),
//           content_id TEXT NOT NULL, file_name TEXT NOT NULL,
//           public BOOLEAN NOT NULL, size_bytes BIGINT NOT NULL,
//           created_at TIMESTAMPTZ NOT NULL,
//           UNIQUE (owner_id, content_id))

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgArguments, PgPoolOptions};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::FileRecord;
use super::{FileStore, MatchOutcome, OwnerFiles, StoreError};
use crate::config;
use crate::query::FileQuery;

const FILE_COLUMNS: &str = "id, content_id, file_name, public, size_bytes, created_at";

pub struct PgFileStore {
    pool: PgPool,
}

impl PgFileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a pool from DATABASE_URL with the configured sizing.
    pub async fn connect() -> Result<Self, StoreError> {
        let url =
            std::env::var("DATABASE_URL").map_err(|_| StoreError::ConfigMissing("DATABASE_URL"))?;

        let database = &config::config().database;
        let pool = PgPoolOptions::new()
            .max_connections(database.max_connections)
            .acquire_timeout(Duration::from_secs(database.connection_timeout))
            .connect(&url)
            .await?;

        Ok(Self::new(pool))
    }

    async fn require_display_name(&self, owner_id: &str) -> Result<String, StoreError> {
        self.display_name_inner(owner_id)
            .await?
            .ok_or_else(|| StoreError::OwnerNotFound(owner_id.to_string()))
    }

    async fn display_name_inner(&self, owner_id: &str) -> Result<Option<String>, StoreError> {
        let name = sqlx::query_scalar::<_, String>("SELECT display_name FROM owners WHERE id = $1")
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(name)
    }
}

#[async_trait]
impl FileStore for PgFileStore {
    async fn owner_exists(&self, email: &str) -> Result<bool, StoreError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM owners WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn display_name(&self, owner_id: &str) -> Result<Option<String>, StoreError> {
        self.display_name_inner(owner_id).await
    }

    async fn list_files(&self, owner_id: &str) -> Result<OwnerFiles, StoreError> {
        let owner = self.require_display_name(owner_id).await?;

        let sql = format!(
            "SELECT {} FROM files WHERE owner_id = $1 ORDER BY created_at ASC, id ASC",
            FILE_COLUMNS
        );
        let files = sqlx::query_as::<_, FileRecord>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(OwnerFiles { owner, files })
    }

    async fn query_files(&self, owner_id: &str, query: &FileQuery) -> Result<OwnerFiles, StoreError> {
        let owner = self.require_display_name(owner_id).await?;

        // Filter params start at $2; $1 is the owner scope. The sort column
        // comes from the validated SortField set, never from raw input.
        let fragment = query.filter.to_sql(2);
        let mut sql = format!("SELECT {} FROM files WHERE owner_id = $1", FILE_COLUMNS);
        if !fragment.clause.is_empty() {
            sql.push_str(" AND ");
            sql.push_str(&fragment.clause);
        }
        sql.push_str(&format!(
            " ORDER BY \"{}\" {}",
            query.sort.field.column(),
            query.sort.direction.to_sql()
        ));

        let mut q = sqlx::query_as::<_, FileRecord>(&sql).bind(owner_id);
        for param in &fragment.params {
            q = bind_param(q, param);
        }
        let files = q.fetch_all(&self.pool).await?;

        Ok(OwnerFiles { owner, files })
    }

    async fn set_visibility(
        &self,
        owner_id: &str,
        content_id: &str,
        public: bool,
    ) -> Result<MatchOutcome, StoreError> {
        let result =
            sqlx::query("UPDATE files SET public = $3 WHERE owner_id = $1 AND content_id = $2")
                .bind(owner_id)
                .bind(content_id)
                .bind(public)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() > 0 {
            Ok(MatchOutcome::Matched)
        } else {
            Ok(MatchOutcome::NoMatch)
        }
    }

    async fn delete_file(&self, owner_id: &str, record_id: Uuid) -> Result<MatchOutcome, StoreError> {
        let result = sqlx::query("DELETE FROM files WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(record_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            Ok(MatchOutcome::Matched)
        } else {
            Ok(MatchOutcome::NoMatch)
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn bind_param<'q>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, FileRecord, PgArguments>,
    v: &'q Value,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, FileRecord, PgArguments> {
    match v {
        Value::Bool(b) => q.bind(*b),
        Value::String(s) => q.bind(s),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else {
                q.bind(n.to_string())
            }
        }
        other => q.bind(other.to_string()),
    }
}
