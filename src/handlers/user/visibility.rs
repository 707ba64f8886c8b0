use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::AuthOwner;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VisibilityRequest {
    pub state: Option<bool>,
}

/// PATCH /api/user/makePublic/:content_id - toggle a record's visibility
pub async fn make_public(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthOwner>,
    Path(content_id): Path<String>,
    Json(body): Json<VisibilityRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .guard
        .set_visibility(&owner, &content_id, body.state)
        .await?;

    Ok(Json(
        json!({ "message": "File visibility updated successfully!" }),
    ))
}
