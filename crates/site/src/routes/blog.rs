//! Public blog routes.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use tracing::instrument;

use crate::cache::CacheKey;
use crate::db::PostRepository;
use crate::error::AppError;
use crate::state::AppState;

/// List published posts, newest first.
///
/// GET /api/posts
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let value = state
        .cache()
        .fetch(CacheKey::PostList, async {
            let posts = PostRepository::new(state.pool()).list_published().await?;
            Ok(json!({ "success": true, "posts": posts }))
        })
        .await?;
    Ok(Json(value))
}

/// Fetch one published post by slug.
///
/// A draft or archived post with this slug is indistinguishable from no
/// post at all: both are 404.
///
/// GET /api/posts/{slug}
#[instrument(skip(state))]
pub async fn detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, AppError> {
    let value = state
        .cache()
        .fetch(CacheKey::Post(slug.clone()), async {
            let post = PostRepository::new(state.pool())
                .get_published_by_slug(&slug)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("no published post at '{slug}'")))?;
            Ok(json!({ "success": true, "post": post }))
        })
        .await?;
    Ok(Json(value))
}
