#![allow(dead_code)] // not every test binary touches every helper

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use fileshelf_api::auth::{IdentityResolver, ResolveError};
use fileshelf_api::routes;
use fileshelf_api::state::AppState;
use fileshelf_api::store::memory::MemoryFileStore;
use fileshelf_api::store::models::FileRecord;

/// Deterministic resolver fake: `token-<owner>` resolves to `<owner>`,
/// anything else fails like a bad credential would.
pub struct StaticResolver;

#[async_trait]
impl IdentityResolver for StaticResolver {
    async fn resolve(&self, token: &str) -> Result<String, ResolveError> {
        token
            .strip_prefix("token-")
            .map(|owner| owner.to_string())
            .ok_or_else(|| ResolveError::InvalidToken("unknown test token".to_string()))
    }
}

pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryFileStore>,
}

/// Boot the full router on an ephemeral port, backed by a freshly seeded
/// in-memory store. Each test gets its own server so mutations can't bleed
/// between tests.
pub async fn spawn_server() -> Result<TestServer> {
    let store = Arc::new(MemoryFileStore::new());
    seed(&store).await?;

    let state = AppState::new(store.clone(), Arc::new(StaticResolver));
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });

    Ok(TestServer {
        base_url: format!("http://{}", addr),
        store,
    })
}

pub fn bearer(owner: &str) -> String {
    format!("Bearer token-{}", owner)
}

pub fn record_id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn file(n: u128, content_id: &str, name: &str, public: bool, size: i64) -> FileRecord {
    FileRecord {
        id: Uuid::from_u128(n),
        content_id: content_id.to_string(),
        file_name: name.to_string(),
        public,
        size_bytes: size,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, n as u32 % 60).unwrap(),
    }
}

async fn seed(store: &MemoryFileStore) -> Result<()> {
    store.insert_owner("u1", "u1@example.com", "User One").await;
    store.insert_file("u1", file(1, "c1", "photo.jpg", false, 2048)).await?;
    store.insert_file("u1", file(2, "c2", "doc.pdf", true, 512)).await?;

    store.insert_owner("u2", "u2@example.com", "User Two").await;
    store.insert_file("u2", file(3, "c3", "notes.txt", false, 64)).await?;

    Ok(())
}
