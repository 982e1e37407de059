//! In-memory store used when no database is configured, and by tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AccountStore, MovieStore};
use crate::error::{AppResult, AuthError};
use crate::models::{Account, AccountChanges, Director, Genre, Movie, NewAccount};

/// Accounts keyed by username, plus a fixed movie list.
#[derive(Clone, Default)]
pub struct MemoryStore {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
    movies: Arc<RwLock<Vec<Movie>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            accounts: Arc::default(),
            movies: Arc::new(RwLock::new(movies)),
        }
    }

    async fn modify<F>(&self, username: &str, f: F) -> Option<Account>
    where
        F: FnOnce(&mut Account),
    {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(username)?;
        f(account);
        Some(account.clone())
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        Ok(self.accounts.read().await.get(username).cloned())
    }

    async fn create(&self, account: NewAccount) -> AppResult<Account> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.username) {
            return Err(AuthError::DuplicateAccount(account.username).into());
        }
        let created = Account {
            id: Uuid::new_v4(),
            username: account.username,
            password_hash: account.password_hash,
            email: account.email,
            birthday: account.birthday,
            favorite_movies: Vec::new(),
        };
        accounts.insert(created.username.clone(), created.clone());
        Ok(created)
    }

    async fn update(&self, username: &str, changes: AccountChanges) -> AppResult<Option<Account>> {
        let mut accounts = self.accounts.write().await;
        if let Some(new_name) = changes.username.as_deref() {
            if new_name != username && accounts.contains_key(new_name) {
                return Err(AuthError::DuplicateAccount(new_name.to_string()).into());
            }
        }
        let Some(mut account) = accounts.remove(username) else {
            return Ok(None);
        };
        if let Some(v) = changes.username {
            account.username = v;
        }
        if let Some(v) = changes.password_hash {
            account.password_hash = v;
        }
        if let Some(v) = changes.email {
            account.email = v;
        }
        if let Some(v) = changes.birthday {
            account.birthday = Some(v);
        }
        accounts.insert(account.username.clone(), account.clone());
        Ok(Some(account))
    }

    async fn add_favorite(&self, username: &str, movie_id: Uuid) -> AppResult<Option<Account>> {
        Ok(self
            .modify(username, |a| {
                if !a.favorite_movies.contains(&movie_id) {
                    a.favorite_movies.push(movie_id);
                }
            })
            .await)
    }

    async fn remove_favorite(&self, username: &str, movie_id: Uuid) -> AppResult<Option<Account>> {
        Ok(self
            .modify(username, |a| a.favorite_movies.retain(|id| *id != movie_id))
            .await)
    }

    async fn delete(&self, username: &str) -> AppResult<bool> {
        Ok(self.accounts.write().await.remove(username).is_some())
    }
}

#[async_trait]
impl MovieStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Movie>> {
        Ok(self.movies.read().await.clone())
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Movie>> {
        Ok(self
            .movies
            .read()
            .await
            .iter()
            .find(|m| m.title == title)
            .cloned())
    }

    async fn find_genre(&self, name: &str) -> AppResult<Option<Genre>> {
        Ok(self
            .movies
            .read()
            .await
            .iter()
            .find(|m| m.genre.name == name)
            .map(|m| m.genre.clone()))
    }

    async fn find_director(&self, name: &str) -> AppResult<Option<Director>> {
        Ok(self
            .movies
            .read()
            .await
            .iter()
            .find(|m| m.director.name == name)
            .map(|m| m.director.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn new_account(username: &str) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            password_hash: "hash".to_string(),
            email: format!("{username}@example.com"),
            birthday: None,
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_username() {
        let store = MemoryStore::new();
        store.create(new_account("alice")).await.unwrap();
        let err = store.create(new_account("alice")).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Auth(AuthError::DuplicateAccount(ref name)) if name == "alice"
        ));
    }

    #[tokio::test]
    async fn favorites_behave_as_a_set() {
        let store = MemoryStore::new();
        store.create(new_account("alice")).await.unwrap();
        let movie = Uuid::new_v4();

        store.add_favorite("alice", movie).await.unwrap();
        let account = store.add_favorite("alice", movie).await.unwrap().unwrap();
        assert_eq!(account.favorite_movies, vec![movie]);

        let account = store.remove_favorite("alice", movie).await.unwrap().unwrap();
        assert!(account.favorite_movies.is_empty());

        assert!(store.add_favorite("nobody", movie).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rename_rekeys_and_checks_uniqueness() {
        let store = MemoryStore::new();
        store.create(new_account("alice")).await.unwrap();
        store.create(new_account("bobby")).await.unwrap();

        let clash = AccountChanges {
            username: Some("bobby".into()),
            ..Default::default()
        };
        assert!(store.update("alice", clash).await.is_err());

        let rename = AccountChanges {
            username: Some("alicia".into()),
            ..Default::default()
        };
        let updated = store.update("alice", rename).await.unwrap().unwrap();
        assert_eq!(updated.username, "alicia");
        assert!(store.find_by_username("alice").await.unwrap().is_none());
        assert!(store.find_by_username("alicia").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_reports_whether_removed() {
        let store = MemoryStore::new();
        store.create(new_account("alice")).await.unwrap();
        assert!(store.delete("alice").await.unwrap());
        assert!(!store.delete("alice").await.unwrap());
    }
}
