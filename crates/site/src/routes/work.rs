//! Public case-study routes.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use tracing::instrument;

use crate::cache::CacheKey;
use crate::db::WorkRepository;
use crate::error::AppError;
use crate::state::AppState;

/// List public case studies, oldest first.
///
/// GET /api/works
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let value = state
        .cache()
        .fetch(CacheKey::WorkList, async {
            let works = WorkRepository::new(state.pool()).list_public().await?;
            Ok(json!({ "success": true, "works": works }))
        })
        .await?;
    Ok(Json(value))
}

/// Fetch one public case study by slug.
///
/// GET /api/works/{slug}
#[instrument(skip(state))]
pub async fn detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, AppError> {
    let value = state
        .cache()
        .fetch(CacheKey::Work(slug.clone()), async {
            let work = WorkRepository::new(state.pool())
                .get_public_by_slug(&slug)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("no public case study at '{slug}'")))?;
            Ok(json!({ "success": true, "work": work }))
        })
        .await?;
    Ok(Json(value))
}
