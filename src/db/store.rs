//! Storage seams: the account and movie stores the handlers and verifiers depend on.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Account, AccountChanges, Director, Genre, Movie, NewAccount};

/// Account persistence. Lookups are by exact username; `None` means no such account.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;

    /// Fails with `AuthError::DuplicateAccount` when the username is taken.
    async fn create(&self, account: NewAccount) -> AppResult<Account>;

    async fn update(&self, username: &str, changes: AccountChanges) -> AppResult<Option<Account>>;

    /// Adds `movie_id` unless already present.
    async fn add_favorite(&self, username: &str, movie_id: Uuid) -> AppResult<Option<Account>>;

    async fn remove_favorite(&self, username: &str, movie_id: Uuid) -> AppResult<Option<Account>>;

    /// Returns whether an account was removed.
    async fn delete(&self, username: &str) -> AppResult<bool>;
}

/// Read-only movie catalogue.
#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Movie>>;

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Movie>>;

    async fn find_genre(&self, name: &str) -> AppResult<Option<Genre>>;

    async fn find_director(&self, name: &str) -> AppResult<Option<Director>>;
}
