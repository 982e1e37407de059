//! Username/password verification against the account store.

use std::sync::{Arc, OnceLock};

use tracing::debug;

use super::password::{hash_password, verify_password};
use crate::db::AccountStore;
use crate::error::{AppError, AppResult, AuthError, CredentialFailure};
use crate::models::Account;

/// Proof that an account passed credential verification. Only this module constructs it,
/// so token issuance cannot be reached without a successful login.
#[derive(Debug, Clone)]
pub struct Authenticated(Account);

impl Authenticated {
    pub(crate) fn new(account: Account) -> Self {
        Self(account)
    }

    pub fn account(&self) -> &Account {
        &self.0
    }

    pub fn into_account(self) -> Account {
        self.0
    }
}

/// Outcome of a credential check: found and matched, refused, or the lookup itself failed.
#[derive(Debug)]
pub enum Verification {
    Success(Authenticated),
    NoMatch(CredentialFailure),
    Error(AppError),
}

/// Hash checked when the username is unknown, so both refusals cost one Argon2 run.
fn decoy_hash() -> Option<&'static str> {
    static DECOY: OnceLock<Option<String>> = OnceLock::new();
    DECOY
        .get_or_init(|| hash_password("decoy-password-never-issued").ok())
        .as_deref()
}

#[derive(Clone)]
pub struct CredentialVerifier {
    accounts: Arc<dyn AccountStore>,
}

impl CredentialVerifier {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    /// Looks up `username` and compares `password` with the stored hash.
    pub async fn authenticate(&self, username: &str, password: &str) -> Verification {
        let account = match self.accounts.find_by_username(username).await {
            Ok(Some(account)) => account,
            Ok(None) => {
                if let Some(decoy) = decoy_hash() {
                    let _ = verify_password(password, decoy);
                }
                return Verification::NoMatch(CredentialFailure::UnknownUsername);
            }
            Err(e) => return Verification::Error(e),
        };
        match verify_password(password, &account.password_hash) {
            Ok(true) => Verification::Success(Authenticated::new(account)),
            Ok(false) => Verification::NoMatch(CredentialFailure::WrongPassword),
            Err(e) => Verification::Error(e),
        }
    }

    /// [`authenticate`](Self::authenticate) folded into a `Result`.
    pub async fn verify(&self, username: &str, password: &str) -> AppResult<Authenticated> {
        match self.authenticate(username, password).await {
            Verification::Success(who) => Ok(who),
            Verification::NoMatch(reason) => {
                debug!(username = %username, %reason, "credentials rejected");
                Err(AuthError::InvalidCredentials(reason).into())
            }
            Verification::Error(e) => Err(e),
        }
    }
}
