//! Database operations for checklist goals.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use atelier_core::{GoalId, Progress};

use super::RepositoryError;
use crate::models::{Goal, GoalChanges, NewGoal};

const COLUMNS: &str = "id, title, progress, category, created_at";

/// Internal row type for goal queries.
#[derive(Debug, sqlx::FromRow)]
struct GoalRow {
    id: i32,
    title: String,
    progress: i32,
    category: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<GoalRow> for Goal {
    type Error = RepositoryError;

    fn try_from(row: GoalRow) -> Result<Self, Self::Error> {
        let progress = Progress::new(row.progress)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        Ok(Self {
            id: GoalId::new(row.id),
            title: row.title,
            progress,
            category: row.category,
            created_at: row.created_at,
        })
    }
}

/// Repository for goal database operations.
pub struct GoalRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> GoalRepository<'a> {
    /// Create a new goal repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a goal.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, new: NewGoal) -> Result<Goal, RepositoryError> {
        let row = sqlx::query_as::<_, GoalRow>(&format!(
            "INSERT INTO goal (title, progress, category)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        ))
        .bind(&new.title)
        .bind(new.progress.value())
        .bind(&new.category)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// List every goal, newest first.
    ///
    /// Grouping by category is a presentation concern and happens in the
    /// route layer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Goal>, RepositoryError> {
        let rows = sqlx::query_as::<_, GoalRow>(&format!(
            "SELECT {COLUMNS} FROM goal ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Replace a goal's fields. Partial progress is set here, never via
    /// [`toggle`](Self::toggle).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the goal doesn't exist.
    pub async fn update(&self, id: GoalId, changes: GoalChanges) -> Result<Goal, RepositoryError> {
        let row = sqlx::query_as::<_, GoalRow>(&format!(
            "UPDATE goal
             SET title = $1, progress = $2, category = $3
             WHERE id = $4
             RETURNING {COLUMNS}"
        ))
        .bind(&changes.title)
        .bind(changes.progress.value())
        .bind(&changes.category)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Flip a goal's progress between the boundary values: 100 becomes 0,
    /// anything else becomes 100.
    ///
    /// Read-then-write without a version check; concurrent toggles are
    /// last-writer-wins like every other update here.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the goal doesn't exist.
    pub async fn toggle(&self, id: GoalId) -> Result<Goal, RepositoryError> {
        let current = sqlx::query_as::<_, GoalRow>(&format!(
            "SELECT {COLUMNS} FROM goal WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        let progress = Progress::new(current.progress)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?
            .toggled();

        let row = sqlx::query_as::<_, GoalRow>(&format!(
            "UPDATE goal SET progress = $1 WHERE id = $2 RETURNING {COLUMNS}"
        ))
        .bind(progress.value())
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Delete a goal.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the goal doesn't exist.
    pub async fn delete(&self, id: GoalId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM goal WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
