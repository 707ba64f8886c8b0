use axum::{
    extract::{Extension, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::AuthOwner;
use crate::query::{FileQuery, ListFilesRequest};
use crate::state::AppState;
use crate::store::StoreError;

/// POST /api/user/checkFiles - the owner's raw collection, no filter or sort
pub async fn check_files(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthOwner>,
) -> Result<Json<Value>, ApiError> {
    let listing = state
        .store
        .list_files(&owner.owner_id)
        .await
        .map_err(owner_lookup_error)?;

    Ok(Json(json!({ "files": listing.files, "owner": listing.owner })))
}

/// POST /api/user/files - filtered and sorted listing
pub async fn files(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthOwner>,
    Json(request): Json<ListFilesRequest>,
) -> Result<Json<Value>, ApiError> {
    // Sort field validation happens here, before the store sees the query
    let query = FileQuery::build(&request)?;

    let listing = state
        .store
        .query_files(&owner.owner_id, &query)
        .await
        .map_err(owner_lookup_error)?;

    Ok(Json(json!({ "files": listing.files, "owner": listing.owner })))
}

// A resolved credential pointing at a nonexistent owner is a 400 on the
// listing endpoints, per the existing wire contract
fn owner_lookup_error(err: StoreError) -> ApiError {
    match err {
        StoreError::OwnerNotFound(_) => ApiError::bad_request("user_not_found"),
        other => other.into(),
    }
}
