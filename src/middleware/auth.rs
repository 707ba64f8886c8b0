use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Owner identity resolved from the bearer credential.
///
/// Constructed only by [`bearer_auth_middleware`] from resolver output;
/// handlers and the mutation guard take the owner id from here and never
/// from request fields, which is what makes cross-owner mutation
/// structurally impossible.
#[derive(Clone, Debug)]
pub struct AuthOwner {
    pub owner_id: String,
}

/// Bearer authentication middleware: extracts the credential, resolves it
/// to an owner id, and injects [`AuthOwner`] into the request.
pub async fn bearer_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_from_headers(&headers).map_err(ApiError::unauthorized)?;

    // The token stays opaque; only the resolver interprets it
    let owner_id = state
        .resolver
        .resolve(&token)
        .await
        .map_err(|e| ApiError::unauthorized(e.to_string()))?;

    request.extensions_mut().insert(AuthOwner { owner_id });

    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
