use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;

/// Resolves a bearer credential to a stable owner identifier.
///
/// The token is opaque to the rest of the service: handlers and the mutation
/// guard only ever see the resolved owner id, never the credential itself.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<String, ResolveError>;
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid bearer token: {0}")]
    InvalidToken(String),

    #[error("Token generation error: {0}")]
    TokenGeneration(String),

    #[error("Token secret not configured")]
    MissingSecret,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(owner_id: String, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: owner_id,
            exp,
            iat: now.timestamp(),
        }
    }
}

/// JWT-backed identity resolver. The owner id travels in the `sub` claim.
pub struct JwtIdentityResolver {
    secret: String,
    expiry_hours: u64,
}

impl JwtIdentityResolver {
    pub fn new(secret: impl Into<String>, expiry_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiry_hours,
        }
    }

    pub fn from_config() -> Self {
        let security = &config::config().security;
        Self::new(security.jwt_secret.clone(), security.jwt_expiry_hours)
    }

    /// Issue a signed token for an owner id. Used by tests and ops tooling;
    /// the login flow that hands tokens to end users lives outside this service.
    pub fn issue_token(&self, owner_id: &str) -> Result<String, ResolveError> {
        if self.secret.is_empty() {
            return Err(ResolveError::MissingSecret);
        }

        let claims = Claims::new(owner_id.to_string(), self.expiry_hours);
        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());

        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| ResolveError::TokenGeneration(e.to_string()))
    }
}

#[async_trait]
impl IdentityResolver for JwtIdentityResolver {
    async fn resolve(&self, token: &str) -> Result<String, ResolveError> {
        if self.secret.is_empty() {
            return Err(ResolveError::MissingSecret);
        }

        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| ResolveError::InvalidToken(e.to_string()))?;

        Ok(token_data.claims.sub)
    }
}
