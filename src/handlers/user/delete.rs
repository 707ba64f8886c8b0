use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::AuthOwner;
use crate::state::AppState;

/// PATCH /api/user/deleteFile/:record_id - remove a record permanently
pub async fn delete_file(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthOwner>,
    Path(record_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.guard.delete_file(&owner, &record_id).await?;

    Ok(Json(json!({ "message": "File deleted successfully!" })))
}
