//! Database operations for the site's `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `post` - Blog posts (slug UNIQUE)
//! - `work` - Case studies (slug UNIQUE)
//! - `goal` - Checklist goals
//! - `media` - Uploaded media bookkeeping
//! - `contact_submission` - Contact form log (insert-only)
//! - `session` - tower-sessions storage (owned by the session store)
//!
//! # Migrations
//!
//! Migrations are plain SQL statements in [`migrations`], run via:
//! ```bash
//! cargo run -p atelier-cli -- migrate
//! ```
//! The server also runs them at startup; every statement is idempotent.
//!
//! All queries bind at runtime (`sqlx::query_as::<_, Row>`) so the workspace
//! builds without a live database.

pub mod contact;
pub mod goals;
pub mod media;
pub mod migrations;
pub mod posts;
pub mod works;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use contact::ContactRepository;
pub use goals::GoalRepository;
pub use media::MediaRepository;
pub use posts::PostRepository;
pub use works::WorkRepository;

/// Errors that can occur during repository operations.
///
/// The taxonomy is kept distinct internally; the HTTP boundary flattens it
/// to a status code plus a message.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate slug).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A required field was empty or malformed.
    #[error("validation: {0}")]
    Validation(String),
}

/// Postgres error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Map a sqlx error, turning unique violations into [`RepositoryError::Conflict`].
pub(crate) fn map_write_error(err: sqlx::Error, conflict_message: &str) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            RepositoryError::Conflict(conflict_message.to_owned())
        }
        _ => RepositoryError::Database(err),
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
