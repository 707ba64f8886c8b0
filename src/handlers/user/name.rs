use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/user/getName/:owner_id - unauthenticated display name lookup.
/// Returns only the display name; other owner attributes never leave the store.
pub async fn get_name(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    match state.store.display_name(&owner_id).await? {
        Some(display_name) => Ok(Json(json!({ "display_name": display_name }))),
        None => Err(ApiError::not_found("user_not_found")),
    }
}
