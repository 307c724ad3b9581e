//! Admin blog post management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use atelier_core::{PostId, PostStatus, Slug};

use crate::cache::ContentTag;
use crate::db::PostRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::{NewPost, PostChanges};
use crate::state::AppState;

/// Write payload for a post. The slug is always explicit - unlike case
/// studies, posts never derive it from the title.
#[derive(Debug, Deserialize)]
pub struct PostPayload {
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub status: PostStatus,
}

impl PostPayload {
    fn validated(self) -> Result<(String, Slug, String, Option<String>, PostStatus), AppError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::BadRequest("title is required".into()));
        }
        let slug = Slug::parse(&self.slug)
            .map_err(|e| AppError::BadRequest(format!("invalid slug: {e}")))?;
        Ok((title, slug, self.content, self.image_url, self.status))
    }
}

/// List every post, drafts included, newest first.
///
/// GET /admin/api/posts
#[instrument(skip_all)]
pub async fn list(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let posts = PostRepository::new(state.pool()).list_all().await?;
    Ok(Json(json!({ "success": true, "posts": posts })))
}

/// Create a post.
///
/// POST /admin/api/posts
#[instrument(skip_all)]
pub async fn create(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<PostPayload>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let (title, slug, content, image_url, status) = payload.validated()?;
    let post = PostRepository::new(state.pool())
        .create(NewPost {
            title,
            slug,
            content,
            image_url,
            status,
        })
        .await?;

    state
        .cache()
        .invalidate(ContentTag::Posts, [post.slug.as_str().to_string()]);
    tracing::info!(id = %post.id, slug = %post.slug, "post created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "post": post })),
    ))
}

/// Replace a post's fields.
///
/// Evicts cached pages for both the old and the new slug, so a rename
/// can't leave the old detail page serving stale content.
///
/// PUT /admin/api/posts/{id}
#[instrument(skip_all, fields(id = %id))]
pub async fn update(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    Json(payload): Json<PostPayload>,
) -> Result<Json<Value>, AppError> {
    let (title, slug, content, image_url, status) = payload.validated()?;

    let repo = PostRepository::new(state.pool());
    let old_slug = repo.get(id).await?.slug;
    let post = repo
        .update(
            id,
            PostChanges {
                title,
                slug,
                content,
                image_url,
                status,
            },
        )
        .await?;

    state.cache().invalidate(
        ContentTag::Posts,
        [old_slug.as_str().to_string(), post.slug.as_str().to_string()],
    );
    tracing::info!(id = %post.id, slug = %post.slug, "post updated");
    Ok(Json(json!({ "success": true, "post": post })))
}

/// Delete a post. Deleting twice is a 404, not a no-op.
///
/// DELETE /admin/api/posts/{id}
#[instrument(skip_all, fields(id = %id))]
pub async fn delete(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<PostId>,
) -> Result<Json<Value>, AppError> {
    let repo = PostRepository::new(state.pool());
    let slug = repo.get(id).await?.slug;
    repo.delete(id).await?;

    state
        .cache()
        .invalidate(ContentTag::Posts, [slug.as_str().to_string()]);
    tracing::info!(%id, %slug, "post deleted");
    Ok(Json(json!({ "success": true })))
}
