//! Bearer-token authentication extractor.
//!
//! Reads stay open; write handlers opt in to authentication by taking an
//! [`AuthenticatedUser`] argument, which rejects the request with 401 before
//! the handler body runs.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::Serialize;

use crate::auth::{JwtError, TokenVerifier};

/// Verified principal for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
struct AuthErrorBody {
    error: AuthErrorDetails,
}

#[derive(Debug, Serialize)]
struct AuthErrorDetails {
    code: String,
    message: String,
}

fn unauthorized(code: &str, message: &str) -> Response {
    let body = AuthErrorBody {
        error: AuthErrorDetails {
            code: code.to_string(),
            message: message.to_string(),
        },
    };
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<TokenVerifier>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    unauthorized(
                        "MISSING_TOKEN",
                        "Authorization header with Bearer token required",
                    )
                })?;

        let verifier = Arc::<TokenVerifier>::from_ref(state);

        let claims = verifier.verify(bearer.token()).map_err(|e| match e {
            JwtError::TokenExpired => unauthorized("TOKEN_EXPIRED", "token has expired"),
            _ => unauthorized("INVALID_TOKEN", "invalid authentication token"),
        })?;

        // The identity provider issues numeric subjects; anything else is
        // a token we did not mint.
        let id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| unauthorized("INVALID_TOKEN", "invalid subject in token"))?;

        Ok(AuthenticatedUser {
            id,
            username: claims.username,
            email: claims.email,
        })
    }
}
