use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::user;
use crate::middleware::auth::bearer_auth_middleware;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_user_routes())
        // Owner-scoped (bearer token required)
        .merge(owner_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/user/check", post(user::check))
        .route("/api/user/getName/:owner_id", get(user::get_name))
}

fn owner_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/user/checkFiles", post(user::check_files))
        .route("/api/user/files", post(user::files))
        .route("/api/user/makePublic/:content_id", patch(user::make_public))
        .route("/api/user/deleteFile/:record_id", patch(user::delete_file))
        .layer(middleware::from_fn_with_state(state, bearer_auth_middleware))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "fileshelf API",
        "version": version,
        "endpoints": {
            "check": "POST /api/user/check (public)",
            "check_files": "POST /api/user/checkFiles (bearer)",
            "files": "POST /api/user/files (bearer)",
            "make_public": "PATCH /api/user/makePublic/:content_id (bearer)",
            "delete_file": "PATCH /api/user/deleteFile/:record_id (bearer)",
            "get_name": "GET /api/user/getName/:owner_id (public)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "store": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "store_error": e.to_string()
            })),
        ),
    }
}
