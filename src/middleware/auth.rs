//! Authentication gate: bearer-token extractor for protected routes.

use axum::http::{header::AUTHORIZATION, request::Parts, HeaderMap};
use tracing::debug;

use crate::auth::Claims;
use crate::error::{AppError, AuthError};
use crate::handlers::http::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the token from `Authorization: Bearer <token>`. Any other shape counts as absent.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::Unauthenticated)
}

/// Extractor: identity carried by a verified bearer token. Handlers taking it never run
/// for unauthenticated requests.
#[derive(Clone, Debug)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Refuses to act on another account's resources when ownership is enforced.
    pub fn ensure_can_act_on(&self, state: &AppState, username: &str) -> Result<(), AuthError> {
        if state.enforce_ownership() && self.0.username != username {
            return Err(AuthError::Forbidden {
                token_user: self.0.username.clone(),
                target: username.to_string(),
            });
        }
        Ok(())
    }
}

#[axum::async_trait]
impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let claims = state.jwt_keys().verify(token).map_err(|e| {
            debug!(error = %e, "rejected bearer token");
            e
        })?;
        Ok(AuthUser(claims))
    }
}
