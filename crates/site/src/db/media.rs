//! Database operations for media bookkeeping.
//!
//! The bytes themselves live with the hosting provider; this table only
//! records what was uploaded. Deletion is unconditional and irreversible.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use atelier_core::MediaId;

use super::RepositoryError;
use crate::models::{MediaItem, NewMedia};

const COLUMNS: &str = "id, url, name, kind, size_bytes, created_at";

#[derive(Debug, sqlx::FromRow)]
struct MediaRow {
    id: i32,
    url: String,
    name: String,
    kind: String,
    size_bytes: i64,
    created_at: DateTime<Utc>,
}

impl From<MediaRow> for MediaItem {
    fn from(row: MediaRow) -> Self {
        Self {
            id: MediaId::new(row.id),
            url: row.url,
            name: row.name,
            kind: row.kind,
            size_bytes: row.size_bytes,
            created_at: row.created_at,
        }
    }
}

/// Repository for media database operations.
pub struct MediaRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MediaRepository<'a> {
    /// Create a new media repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record an upload. No uniqueness constraint - the same URL can be
    /// saved twice.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn save(&self, new: NewMedia) -> Result<MediaItem, RepositoryError> {
        let row = sqlx::query_as::<_, MediaRow>(&format!(
            "INSERT INTO media (url, name, kind, size_bytes)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        ))
        .bind(&new.url)
        .bind(&new.name)
        .bind(&new.kind)
        .bind(new.size_bytes)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List every media record, newest first (admin library).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<MediaItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, MediaRow>(&format!(
            "SELECT {COLUMNS} FROM media ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List image records, newest first (public gallery).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_images(&self) -> Result<Vec<MediaItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, MediaRow>(&format!(
            "SELECT {COLUMNS} FROM media WHERE kind LIKE 'image%' ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Delete a media record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the record doesn't exist.
    pub async fn delete(&self, id: MediaId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM media WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
