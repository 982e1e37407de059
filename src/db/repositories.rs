//! PostgreSQL repositories: users and movies. Schema lives in `migrations/`.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::{AccountStore, DbPool, MovieStore};
use crate::error::{AppError, AppResult, AuthError};
use crate::models::{Account, AccountChanges, Director, Genre, Movie, NewAccount};

const USER_COLUMNS: &str = "id, username, password_hash, email, birthday, favorite_movies";
const MOVIE_COLUMNS: &str =
    "id, title, description, genre, director, image_path, featured";

/// Postgres-backed account and movie store.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

// ---- User ----

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
    email: String,
    birthday: Option<NaiveDate>,
    favorite_movies: Vec<Uuid>,
}

impl From<UserRow> for Account {
    fn from(row: UserRow) -> Self {
        Account {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            email: row.email,
            birthday: row.birthday,
            favorite_movies: row.favorite_movies,
        }
    }
}

/// Maps a unique-constraint violation on `users.username` to `DuplicateAccount`.
fn map_unique(err: sqlx::Error, username: &str) -> AppError {
    let duplicate = err
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);
    if duplicate {
        AuthError::DuplicateAccount(username.to_string()).into()
    } else {
        AppError::Db(err)
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Account::from))
    }

    async fn create(&self, account: NewAccount) -> AppResult<Account> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (username, password_hash, email, birthday)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(&account.email)
        .bind(account.birthday)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, &account.username))?;
        Ok(row.into())
    }

    async fn update(&self, username: &str, changes: AccountChanges) -> AppResult<Option<Account>> {
        let target = changes.username.clone().unwrap_or_else(|| username.to_string());
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users SET
                username = COALESCE($2, username),
                password_hash = COALESCE($3, password_hash),
                email = COALESCE($4, email),
                birthday = COALESCE($5, birthday)
            WHERE username = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(changes.username)
        .bind(changes.password_hash)
        .bind(changes.email)
        .bind(changes.birthday)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique(e, &target))?;
        Ok(row.map(Account::from))
    }

    async fn add_favorite(&self, username: &str, movie_id: Uuid) -> AppResult<Option<Account>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users SET favorite_movies = CASE
                WHEN $2 = ANY(favorite_movies) THEN favorite_movies
                ELSE array_append(favorite_movies, $2)
            END
            WHERE username = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Account::from))
    }

    async fn remove_favorite(&self, username: &str, movie_id: Uuid) -> AppResult<Option<Account>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users SET favorite_movies = array_remove(favorite_movies, $2)
            WHERE username = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Account::from))
    }

    async fn delete(&self, username: &str) -> AppResult<bool> {
        let r = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await?;
        Ok(r.rows_affected() > 0)
    }
}

// ---- Movies ----

#[derive(Debug, FromRow)]
struct MovieRow {
    id: Uuid,
    title: String,
    description: String,
    genre: Json<Genre>,
    director: Json<Director>,
    image_path: Option<String>,
    featured: bool,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            id: row.id,
            title: row.title,
            description: row.description,
            genre: row.genre.0,
            director: row.director.0,
            image_path: row.image_path,
            featured: row.featured,
        }
    }
}

#[async_trait]
impl MovieStore for PgStore {
    async fn list(&self) -> AppResult<Vec<Movie>> {
        let rows = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies ORDER BY title"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Movie>> {
        let row = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE title = $1 LIMIT 1"
        ))
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Movie::from))
    }

    async fn find_genre(&self, name: &str) -> AppResult<Option<Genre>> {
        let row: Option<(Json<Genre>,)> =
            sqlx::query_as("SELECT genre FROM movies WHERE genre->>'Name' = $1 LIMIT 1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(g,)| g.0))
    }

    async fn find_director(&self, name: &str) -> AppResult<Option<Director>> {
        let row: Option<(Json<Director>,)> =
            sqlx::query_as("SELECT director FROM movies WHERE director->>'Name' = $1 LIMIT 1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(d,)| d.0))
    }
}
