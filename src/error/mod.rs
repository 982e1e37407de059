//! Application error types: the authentication taxonomy and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Why a username/password pair was refused. Kept distinct for logs; clients only see "Login failed".
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFailure {
    #[error("Incorrect username.")]
    UnknownUsername,

    #[error("Incorrect password.")]
    WrongPassword,
}

/// Authentication and account-lifecycle failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0}")]
    InvalidCredentials(CredentialFailure),

    #[error("No bearer token presented")]
    Unauthenticated,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("{0} already exists")]
    DuplicateAccount(String),

    #[error("Token identity {token_user} may not act on {target}")]
    Forbidden { token_user: String, target: String },
}

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Auth(e) => match e {
                AuthError::InvalidCredentials(_) => {
                    (StatusCode::BAD_REQUEST, "Login failed".to_string())
                }
                AuthError::Unauthenticated
                | AuthError::InvalidToken(_)
                | AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
                AuthError::AccountNotFound(_) => {
                    (StatusCode::NOT_FOUND, "User not found".to_string())
                }
                AuthError::DuplicateAccount(_) => (StatusCode::BAD_REQUEST, e.to_string()),
                AuthError::Forbidden { .. } => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
            },
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            AppError::Db(e) => {
                tracing::error!(error = %e, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
