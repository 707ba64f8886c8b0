use std::sync::Arc;

use fileshelf_api::auth::JwtIdentityResolver;
use fileshelf_api::config;
use fileshelf_api::routes;
use fileshelf_api::state::AppState;
use fileshelf_api::store::postgres::PgFileStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, AUTH_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting fileshelf API in {:?} mode", config.environment);

    let store = PgFileStore::connect().await?;
    let resolver = JwtIdentityResolver::from_config();
    let state = AppState::new(Arc::new(store), Arc::new(resolver));

    let app = routes::app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("FILESHELF_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    println!("fileshelf API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
