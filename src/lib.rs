//! Movie catalogue REST API with stateless bearer-token authentication.
//!
//! Accounts log in with a username and password, receive a signed seven-day
//! token, and present it as `Authorization: Bearer <token>` on protected routes.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;

pub use config::Config;
pub use error::{AppError, AuthError};
pub use handlers::http::AppState;

use axum::routing::{get, post, put};
use handlers::{http, movies, users};

/// Build the API router. Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/", get(http::welcome))
        .route("/health", get(http::health))
        .route("/login", post(auth::login))
        .route("/movies", get(movies::list_movies))
        .route("/movies/:title", get(movies::get_movie))
        .route("/genres/:name", get(movies::get_genre))
        .route("/directors/:name", get(movies::get_director))
        .route("/users", post(auth::register))
        .route(
            "/users/:username",
            put(users::update_user).delete(users::delete_user),
        )
        .route(
            "/users/:username/movies/:movie_id",
            post(users::add_favorite).delete(users::remove_favorite),
        )
        .with_state(state)
}
