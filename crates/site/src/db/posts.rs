//! Database operations for blog posts.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use atelier_core::{PostId, PostStatus, Slug};

use super::{RepositoryError, map_write_error};
use crate::models::{NewPost, Post, PostChanges};

const COLUMNS: &str = "id, title, slug, content, image_url, status, created_at, updated_at";

/// Internal row type for post queries. Status and slug are stored as TEXT
/// and validated on the way out.
#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: i32,
    title: String,
    slug: String,
    content: String,
    image_url: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = RepositoryError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<PostStatus>()
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        let slug = Slug::parse(&row.slug)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        Ok(Self {
            id: PostId::new(row.id),
            title: row.title,
            slug,
            content: row.content,
            image_url: row.image_url,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for blog post database operations.
pub struct PostRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a blog post.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is already taken,
    /// `RepositoryError::Database` for other failures.
    pub async fn create(&self, new: NewPost) -> Result<Post, RepositoryError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "INSERT INTO post (title, slug, content, image_url, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        ))
        .bind(&new.title)
        .bind(new.slug.as_str())
        .bind(&new.content)
        .bind(&new.image_url)
        .bind(new.status.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_write_error(e, "a post with this slug already exists"))?;

        row.try_into()
    }

    /// Get a post by id, regardless of status (admin view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no post has this id.
    pub async fn get(&self, id: PostId) -> Result<Post, RepositoryError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {COLUMNS} FROM post WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Get a published post by slug (public detail page).
    ///
    /// Returns `Ok(None)` if no published post has this slug - a draft with
    /// the same slug stays invisible.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_published_by_slug(&self, slug: &str) -> Result<Option<Post>, RepositoryError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {COLUMNS} FROM post WHERE slug = $1 AND status = 'published'"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(r.try_into()?)),
            None => Ok(None),
        }
    }

    /// List every post, newest first (admin list).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Post>, RepositoryError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {COLUMNS} FROM post ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List published posts, newest first (public list).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_published(&self) -> Result<Vec<Post>, RepositoryError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {COLUMNS} FROM post WHERE status = 'published' ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Replace a post's fields (last writer wins, no version check).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the post doesn't exist,
    /// `RepositoryError::Conflict` if the new slug belongs to another post.
    pub async fn update(&self, id: PostId, changes: PostChanges) -> Result<Post, RepositoryError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "UPDATE post
             SET title = $1, slug = $2, content = $3, image_url = $4, status = $5,
                 updated_at = now()
             WHERE id = $6
             RETURNING {COLUMNS}"
        ))
        .bind(&changes.title)
        .bind(changes.slug.as_str())
        .bind(&changes.content)
        .bind(&changes.image_url)
        .bind(changes.status.as_str())
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_write_error(e, "a post with this slug already exists"))?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Delete a post.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the post doesn't exist -
    /// deleting twice is an error, not a no-op.
    pub async fn delete(&self, id: PostId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM post WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
