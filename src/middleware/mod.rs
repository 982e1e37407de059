//! Middleware: the bearer-token gate shared by protected routes.

pub mod auth;

pub use auth::{bearer_token, AuthUser};
