//! HTTP handlers: catalogue reads, account maintenance, health.

pub mod http;
pub mod movies;
pub mod users;

pub use http::{health, welcome, AppState};
