//! Application configuration loaded from environment.

use std::net::SocketAddr;

/// Application configuration loaded from `.env` and environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g. `0.0.0.0:8080`).
    pub server_addr: SocketAddr,
    /// PostgreSQL connection URL. Unset means the in-memory store.
    pub database_url: Option<String>,
    /// Token signing secret. Required; there is no built-in fallback.
    pub jwt_secret: String,
    /// Log level: `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    /// Restrict user-scoped routes to the token's own username.
    pub enforce_ownership: bool,
}

const MIN_SECRET_LEN: usize = 32;

impl Config {
    /// Load configuration from environment. Call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigLoadError> {
        let server_addr = match var("SERVER_ADDR") {
            Some(addr) => addr,
            None => format!("0.0.0.0:{}", var("PORT").unwrap_or_else(|| "8080".to_string())),
        };
        let server_addr: SocketAddr = server_addr
            .parse()
            .map_err(|_| ConfigLoadError::InvalidServerAddr)?;

        let database_url = var("DATABASE_URL").filter(|u| !u.is_empty());
        let jwt_secret = var("JWT_SECRET").ok_or(ConfigLoadError::MissingJwtSecret)?;
        if jwt_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigLoadError::WeakJwtSecret(MIN_SECRET_LEN));
        }
        let log_level = var("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let enforce_ownership = match var("ENFORCE_OWNERSHIP").as_deref() {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(_) => return Err(ConfigLoadError::InvalidFlag("ENFORCE_OWNERSHIP")),
        };

        Ok(Self {
            server_addr,
            database_url,
            jwt_secret,
            log_level,
            enforce_ownership,
        })
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigLoadError {
    #[error("Invalid SERVER_ADDR")]
    InvalidServerAddr,
    #[error("JWT_SECRET must be set")]
    MissingJwtSecret,
    #[error("JWT_SECRET must be at least {0} characters")]
    WeakJwtSecret(usize),
    #[error("{0} must be true/false/1/0")]
    InvalidFlag(&'static str),
}
