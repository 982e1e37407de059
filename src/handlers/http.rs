//! Shared application state plus the unauthenticated health and welcome routes.

use std::sync::Arc;

use axum::{http::StatusCode, Json};
use serde_json::json;

use crate::auth::{CredentialVerifier, JwtKeys};
use crate::db::{AccountStore, MovieStore};

/// Shared application state, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub movies: Arc<dyn MovieStore>,
    pub credentials: CredentialVerifier,
    pub jwt_keys: JwtKeys,
    pub enforce_ownership: bool,
}

impl AppState {
    /// Wires the credential verifier to the same account store the handlers use.
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        movies: Arc<dyn MovieStore>,
        jwt_keys: JwtKeys,
    ) -> Self {
        Self {
            credentials: CredentialVerifier::new(accounts.clone()),
            accounts,
            movies,
            jwt_keys,
            enforce_ownership: false,
        }
    }

    pub fn with_ownership_check(mut self, enforce: bool) -> Self {
        self.enforce_ownership = enforce;
        self
    }

    pub fn accounts(&self) -> &Arc<dyn AccountStore> {
        &self.accounts
    }
    pub fn movies(&self) -> &Arc<dyn MovieStore> {
        &self.movies
    }
    pub fn credentials(&self) -> &CredentialVerifier {
        &self.credentials
    }
    pub fn jwt_keys(&self) -> &JwtKeys {
        &self.jwt_keys
    }
    pub fn enforce_ownership(&self) -> bool {
        self.enforce_ownership
    }
}

/// GET /
pub async fn welcome() -> &'static str {
    "Welcome to my movies selection!"
}

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "filmvault" })),
    )
}
