//! Account maintenance handlers: profile update, favorites, deregistration.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::hash_password;
use crate::error::{AppError, AuthError};
use crate::handlers::http::AppState;
use crate::middleware::AuthUser;
use crate::models::{Account, AccountChanges, UpdateAccountRequest};

#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub message: String,
    pub user: Account,
}

fn not_found(username: &str) -> AppError {
    AuthError::AccountNotFound(username.to_string()).into()
}

/// PUT /users/:username
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(username): Path<String>,
    Json(body): Json<UpdateAccountRequest>,
) -> Result<Json<Account>, AppError> {
    user.ensure_can_act_on(&state, &username)?;
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let password_hash = body.password.as_deref().map(hash_password).transpose()?;
    let changes = AccountChanges {
        username: body.username,
        password_hash,
        email: body.email,
        birthday: body.birthday,
    };
    let account = state
        .accounts()
        .update(&username, changes)
        .await?
        .ok_or_else(|| not_found(&username))?;

    info!(username = %username, updated = %account.username, "account updated");
    Ok(Json(account))
}

/// POST /users/:username/movies/:movie_id
pub async fn add_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path((username, movie_id)): Path<(String, Uuid)>,
) -> Result<Json<FavoriteResponse>, AppError> {
    user.ensure_can_act_on(&state, &username)?;
    let account = state
        .accounts()
        .add_favorite(&username, movie_id)
        .await?
        .ok_or_else(|| not_found(&username))?;

    Ok(Json(FavoriteResponse {
        message: format!("Movie {movie_id} was added to {username}'s favorites."),
        user: account,
    }))
}

/// DELETE /users/:username/movies/:movie_id
pub async fn remove_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path((username, movie_id)): Path<(String, Uuid)>,
) -> Result<Json<FavoriteResponse>, AppError> {
    user.ensure_can_act_on(&state, &username)?;
    let account = state
        .accounts()
        .remove_favorite(&username, movie_id)
        .await?
        .ok_or_else(|| not_found(&username))?;

    Ok(Json(FavoriteResponse {
        message: format!("Movie {movie_id} was removed from {username}'s favorites."),
        user: account,
    }))
}

/// DELETE /users/:username
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(username): Path<String>,
) -> Result<String, AppError> {
    user.ensure_can_act_on(&state, &username)?;
    if !state.accounts().delete(&username).await? {
        return Err(not_found(&username));
    }
    info!(username = %username, deleted_by = %user.0.username, "account deleted");
    Ok(format!("{username} was deleted"))
}
