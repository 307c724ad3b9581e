//! Database operations for case studies.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use atelier_core::{Slug, Visibility, WorkId};

use super::{RepositoryError, map_write_error};
use crate::models::{NewWork, Work, WorkChanges};

const COLUMNS: &str = "id, title, slug, tech_stack, description, visibility, \
                       github_link, live_link, image_url, video_url, created_at, updated_at";

/// Internal row type for case-study queries.
#[derive(Debug, sqlx::FromRow)]
struct WorkRow {
    id: i32,
    title: String,
    slug: String,
    tech_stack: Vec<String>,
    description: String,
    visibility: String,
    github_link: Option<String>,
    live_link: Option<String>,
    image_url: Option<String>,
    video_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<WorkRow> for Work {
    type Error = RepositoryError;

    fn try_from(row: WorkRow) -> Result<Self, Self::Error> {
        let visibility = row
            .visibility
            .parse::<Visibility>()
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        let slug = Slug::parse(&row.slug)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        Ok(Self {
            id: WorkId::new(row.id),
            title: row.title,
            slug,
            tech_stack: row.tech_stack,
            description: row.description,
            visibility,
            github_link: row.github_link,
            live_link: row.live_link,
            image_url: row.image_url,
            video_url: row.video_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for case-study database operations.
pub struct WorkRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WorkRepository<'a> {
    /// Create a new case-study repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a case study.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is already taken.
    pub async fn create(&self, new: NewWork) -> Result<Work, RepositoryError> {
        let row = sqlx::query_as::<_, WorkRow>(&format!(
            "INSERT INTO work
                 (title, slug, tech_stack, description, visibility,
                  github_link, live_link, image_url, video_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        ))
        .bind(&new.title)
        .bind(new.slug.as_str())
        .bind(&new.tech_stack)
        .bind(&new.description)
        .bind(new.visibility.as_str())
        .bind(&new.github_link)
        .bind(&new.live_link)
        .bind(&new.image_url)
        .bind(&new.video_url)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_write_error(e, "a case study with this slug already exists"))?;

        row.try_into()
    }

    /// Get a case study by id, regardless of visibility (admin view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no case study has this id.
    pub async fn get(&self, id: WorkId) -> Result<Work, RepositoryError> {
        let row = sqlx::query_as::<_, WorkRow>(&format!(
            "SELECT {COLUMNS} FROM work WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Get a public case study by slug (public detail page).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_public_by_slug(&self, slug: &str) -> Result<Option<Work>, RepositoryError> {
        let row = sqlx::query_as::<_, WorkRow>(&format!(
            "SELECT {COLUMNS} FROM work WHERE slug = $1 AND visibility = 'public'"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(r.try_into()?)),
            None => Ok(None),
        }
    }

    /// List every case study, newest first (admin list).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Work>, RepositoryError> {
        let rows = sqlx::query_as::<_, WorkRow>(&format!(
            "SELECT {COLUMNS} FROM work ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List public case studies, oldest first.
    ///
    /// The ascending order is deliberate: the homepage's "selected work"
    /// section shows earliest projects first, unlike every other list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_public(&self) -> Result<Vec<Work>, RepositoryError> {
        let rows = sqlx::query_as::<_, WorkRow>(&format!(
            "SELECT {COLUMNS} FROM work WHERE visibility = 'public' ORDER BY created_at ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Replace a case study's fields (last writer wins, no version check).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the case study doesn't exist,
    /// `RepositoryError::Conflict` if the new slug belongs to another one.
    pub async fn update(&self, id: WorkId, changes: WorkChanges) -> Result<Work, RepositoryError> {
        let row = sqlx::query_as::<_, WorkRow>(&format!(
            "UPDATE work
             SET title = $1, slug = $2, tech_stack = $3, description = $4,
                 visibility = $5, github_link = $6, live_link = $7,
                 image_url = $8, video_url = $9, updated_at = now()
             WHERE id = $10
             RETURNING {COLUMNS}"
        ))
        .bind(&changes.title)
        .bind(changes.slug.as_str())
        .bind(&changes.tech_stack)
        .bind(&changes.description)
        .bind(changes.visibility.as_str())
        .bind(&changes.github_link)
        .bind(&changes.live_link)
        .bind(&changes.image_url)
        .bind(&changes.video_url)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_write_error(e, "a case study with this slug already exists"))?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Delete a case study.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the case study doesn't exist.
    pub async fn delete(&self, id: WorkId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM work WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
