//! Movie catalogue handlers. All routes sit behind the bearer-token gate.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::middleware::AuthUser;
use crate::models::{Director, Genre, Movie};

/// GET /movies
pub async fn list_movies(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<Movie>>, AppError> {
    Ok(Json(state.movies().list().await?))
}

/// GET /movies/:title
pub async fn get_movie(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(title): Path<String>,
) -> Result<Json<Movie>, AppError> {
    state
        .movies()
        .find_by_title(&title)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Movie not found"))
}

/// GET /genres/:name
pub async fn get_genre(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(name): Path<String>,
) -> Result<Json<Genre>, AppError> {
    state
        .movies()
        .find_genre(&name)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Genre not found"))
}

/// GET /directors/:name
pub async fn get_director(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(name): Path<String>,
) -> Result<Json<Director>, AppError> {
    state
        .movies()
        .find_director(&name)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Director not found"))
}
