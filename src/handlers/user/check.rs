use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub email: String,
}

/// POST /api/user/check - pre-login existence probe.
///
/// The not-found case is deliberately HTTP 200 with an error payload; the
/// login frontend treats it as a routing hint, not a failure.
pub async fn check(
    State(state): State<AppState>,
    Json(body): Json<CheckRequest>,
) -> Result<Json<Value>, ApiError> {
    if state.store.owner_exists(&body.email).await? {
        Ok(Json(json!({ "message": "user_found" })))
    } else {
        Ok(Json(json!({ "error": true, "message": "user_not_found" })))
    }
}
