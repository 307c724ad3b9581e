//! Admin case-study management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use atelier_core::{Slug, Visibility, WorkId};

use crate::cache::ContentTag;
use crate::db::WorkRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::{NewWork, WorkChanges};
use crate::state::AppState;

/// Write payload for a case study.
///
/// A blank slug on create derives one from the title; on update the slug
/// must be explicit, since the record already has one.
#[derive(Debug, Deserialize)]
pub struct WorkPayload {
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub description: String,
    pub visibility: Visibility,
    #[serde(default)]
    pub github_link: Option<String>,
    #[serde(default)]
    pub live_link: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

impl WorkPayload {
    fn validated_title(&self) -> Result<String, AppError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::BadRequest("title is required".into()));
        }
        Ok(title.to_string())
    }

    /// Resolve the slug for creation: explicit when given, derived from the
    /// title when blank.
    fn create_slug(&self, title: &str) -> Result<Slug, AppError> {
        if self.slug.trim().is_empty() {
            Slug::derive(title)
                .map_err(|e| AppError::BadRequest(format!("cannot derive slug from title: {e}")))
        } else {
            Slug::parse(self.slug.trim())
                .map_err(|e| AppError::BadRequest(format!("invalid slug: {e}")))
        }
    }

    fn explicit_slug(&self) -> Result<Slug, AppError> {
        Slug::parse(self.slug.trim())
            .map_err(|e| AppError::BadRequest(format!("invalid slug: {e}")))
    }
}

/// List every case study, private ones included, newest first.
///
/// GET /admin/api/works
#[instrument(skip_all)]
pub async fn list(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let works = WorkRepository::new(state.pool()).list_all().await?;
    Ok(Json(json!({ "success": true, "works": works })))
}

/// Create a case study.
///
/// POST /admin/api/works
#[instrument(skip_all)]
pub async fn create(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<WorkPayload>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let title = payload.validated_title()?;
    let slug = payload.create_slug(&title)?;

    let work = WorkRepository::new(state.pool())
        .create(NewWork {
            title,
            slug,
            tech_stack: payload.tech_stack,
            description: payload.description,
            visibility: payload.visibility,
            github_link: payload.github_link,
            live_link: payload.live_link,
            image_url: payload.image_url,
            video_url: payload.video_url,
        })
        .await?;

    state
        .cache()
        .invalidate(ContentTag::Works, [work.slug.as_str().to_string()]);
    tracing::info!(id = %work.id, slug = %work.slug, "case study created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "work": work })),
    ))
}

/// Replace a case study's fields. Evicts both the old and the new slug.
///
/// PUT /admin/api/works/{id}
#[instrument(skip_all, fields(id = %id))]
pub async fn update(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<WorkId>,
    Json(payload): Json<WorkPayload>,
) -> Result<Json<Value>, AppError> {
    let title = payload.validated_title()?;
    let slug = payload.explicit_slug()?;

    let repo = WorkRepository::new(state.pool());
    let old_slug = repo.get(id).await?.slug;
    let work = repo
        .update(
            id,
            WorkChanges {
                title,
                slug,
                tech_stack: payload.tech_stack,
                description: payload.description,
                visibility: payload.visibility,
                github_link: payload.github_link,
                live_link: payload.live_link,
                image_url: payload.image_url,
                video_url: payload.video_url,
            },
        )
        .await?;

    state.cache().invalidate(
        ContentTag::Works,
        [old_slug.as_str().to_string(), work.slug.as_str().to_string()],
    );
    tracing::info!(id = %work.id, slug = %work.slug, "case study updated");
    Ok(Json(json!({ "success": true, "work": work })))
}

/// Delete a case study.
///
/// DELETE /admin/api/works/{id}
#[instrument(skip_all, fields(id = %id))]
pub async fn delete(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<WorkId>,
) -> Result<Json<Value>, AppError> {
    let repo = WorkRepository::new(state.pool());
    let slug = repo.get(id).await?.slug;
    repo.delete(id).await?;

    state
        .cache()
        .invalidate(ContentTag::Works, [slug.as_str().to_string()]);
    tracing::info!(%id, %slug, "case study deleted");
    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(title: &str, slug: &str) -> WorkPayload {
        WorkPayload {
            title: title.to_string(),
            slug: slug.to_string(),
            tech_stack: vec![],
            description: String::new(),
            visibility: Visibility::Public,
            github_link: None,
            live_link: None,
            image_url: None,
            video_url: None,
        }
    }

    #[test]
    fn test_blank_slug_derives_from_title() {
        let p = payload("My Rust Project!", "");
        let slug = p.create_slug("My Rust Project!").unwrap();
        assert_eq!(slug.as_str(), "my-rust-project");
    }

    #[test]
    fn test_explicit_slug_wins_over_title() {
        let p = payload("My Rust Project!", "custom-slug");
        let slug = p.create_slug("My Rust Project!").unwrap();
        assert_eq!(slug.as_str(), "custom-slug");
    }

    #[test]
    fn test_underivable_title_is_rejected() {
        let p = payload("???", "");
        assert!(matches!(
            p.create_slug("???"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_update_requires_explicit_slug() {
        let p = payload("Title", "");
        assert!(matches!(p.explicit_slug(), Err(AppError::BadRequest(_))));
    }
}
