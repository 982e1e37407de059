//! Auth HTTP handlers: register, login.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::info;
use validator::Validate;

use crate::auth::hash_password;
use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::models::{Account, LoginRequest, NewAccount, RegisterRequest};

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: Account,
    pub token: String,
}

/// POST /users
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Account>), AppError> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let password_hash = hash_password(&body.password)?;
    let account = state
        .accounts()
        .create(NewAccount {
            username: body.username,
            password_hash,
            email: body.email,
            birthday: body.birthday,
        })
        .await?;

    info!(username = %account.username, "account registered");
    Ok((StatusCode::CREATED, Json(account)))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let who = state
        .credentials()
        .verify(&body.username, &body.password)
        .await?;
    let token = state.jwt_keys().issue(&who)?;

    Ok(Json(LoginResponse {
        user: who.into_account(),
        token,
    }))
}
