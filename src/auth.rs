//! Token verification for the external identity provider.
//!
//! The marketplace does not register users itself; it trusts HS256 bearer
//! tokens minted by the shared identity service and mirrors the public
//! identity claims it finds in them.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("token has expired")]
    TokenExpired,
}

/// Claims carried by an access token. `sub` is the provider's numeric user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Sign an access token. Used by tests and local tooling; production tokens
/// come from the identity provider.
pub fn issue_token(
    user_id: i64,
    username: &str,
    email: &str,
    secret: &str,
    ttl_seconds: i64,
) -> Result<String, JwtError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        email: email.to_string(),
        iat: now,
        exp: now + ttl_seconds,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::EncodingFailed(e.to_string()))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        _ => JwtError::DecodingFailed(e.to_string()),
    })
}

/// Holds the verification secret; shared with the auth extractor through
/// application state.
#[derive(Clone)]
pub struct TokenVerifier {
    jwt_secret: String,
}

impl TokenVerifier {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        verify_token(token, &self.jwt_secret)
    }
}
