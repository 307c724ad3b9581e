//! Database operations for contact form submissions.
//!
//! Insert-only from the public surface; the admin dashboard reads the log.
//! Submissions are never updated.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use atelier_core::{Email, SubmissionId};

use super::RepositoryError;
use crate::models::{ContactSubmission, NewSubmission};

const COLUMNS: &str = "id, name, email, message, created_at";

#[derive(Debug, sqlx::FromRow)]
struct SubmissionRow {
    id: i32,
    name: String,
    email: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<SubmissionRow> for ContactSubmission {
    type Error = RepositoryError;

    fn try_from(row: SubmissionRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        Ok(Self {
            id: SubmissionId::new(row.id),
            name: row.name,
            email,
            message: row.message,
            created_at: row.created_at,
        })
    }
}

/// Repository for contact submission database operations.
pub struct ContactRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a submission. The route validates before calling this.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, new: NewSubmission) -> Result<ContactSubmission, RepositoryError> {
        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            "INSERT INTO contact_submission (name, email, message)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        ))
        .bind(&new.name)
        .bind(new.email.as_str())
        .bind(&new.message)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// List every submission, newest first (admin log).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<ContactSubmission>, RepositoryError> {
        let rows = sqlx::query_as::<_, SubmissionRow>(&format!(
            "SELECT {COLUMNS} FROM contact_submission ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
