//! Public gallery route.

use axum::{Json, extract::State};
use serde_json::{Value, json};
use tracing::instrument;

use crate::cache::CacheKey;
use crate::db::MediaRepository;
use crate::error::AppError;
use crate::state::AppState;

/// Image media only, newest first. Non-image uploads never appear here.
///
/// GET /api/gallery
#[instrument(skip(state))]
pub async fn images(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let value = state
        .cache()
        .fetch(CacheKey::GalleryImages, async {
            let images = MediaRepository::new(state.pool()).list_images().await?;
            Ok(json!({ "success": true, "images": images }))
        })
        .await?;
    Ok(Json(value))
}
