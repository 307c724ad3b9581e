//! Admin media library.
//!
//! Uploads go straight from the dashboard to the hosting provider; this API
//! only records the resulting URL so the gallery and editors can find it.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use atelier_core::MediaId;

use crate::cache::ContentTag;
use crate::db::MediaRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::NewMedia;
use crate::state::AppState;

/// Payload recording a completed upload.
#[derive(Debug, Deserialize)]
pub struct MediaPayload {
    pub url: String,
    pub name: String,
    /// Mime/category string, e.g. "image/png".
    #[serde(rename = "type")]
    pub kind: String,
    /// Size in bytes.
    pub size: i64,
}

impl MediaPayload {
    fn validated(self) -> Result<NewMedia, AppError> {
        let url = self.url.trim().to_string();
        if url.is_empty() {
            return Err(AppError::BadRequest("url is required".into()));
        }
        if self.size < 0 {
            return Err(AppError::BadRequest("size must be non-negative".into()));
        }
        Ok(NewMedia {
            url,
            name: self.name.trim().to_string(),
            kind: self.kind.trim().to_string(),
            size_bytes: self.size,
        })
    }
}

/// List every media record, newest first.
///
/// GET /admin/api/media
#[instrument(skip_all)]
pub async fn list(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let media = MediaRepository::new(state.pool()).list_all().await?;
    Ok(Json(json!({ "success": true, "media": media })))
}

/// Record an upload. The same URL may be recorded twice.
///
/// POST /admin/api/media
#[instrument(skip_all)]
pub async fn save(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<MediaPayload>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let new = payload.validated()?;
    let item = MediaRepository::new(state.pool()).save(new).await?;

    if item.kind.starts_with("image") {
        state
            .cache()
            .invalidate(ContentTag::MediaImages, Vec::<String>::new());
    }
    tracing::info!(id = %item.id, kind = %item.kind, "media recorded");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "media": item })),
    ))
}

/// Delete a media record. Unconditional and irreversible; the bytes at the
/// hosting provider are not touched.
///
/// DELETE /admin/api/media/{id}
#[instrument(skip_all, fields(id = %id))]
pub async fn delete(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<MediaId>,
) -> Result<Json<Value>, AppError> {
    MediaRepository::new(state.pool()).delete(id).await?;

    // The record may have been an image; evicting the gallery is cheap
    // and correct either way.
    state
        .cache()
        .invalidate(ContentTag::MediaImages, Vec::<String>::new());
    tracing::info!(%id, "media deleted");
    Ok(Json(json!({ "success": true })))
}
