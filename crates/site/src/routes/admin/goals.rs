//! Admin goal management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use atelier_core::{GoalId, Progress};

use crate::cache::ContentTag;
use crate::db::GoalRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::{GoalChanges, NewGoal};
use crate::state::AppState;

/// Write payload for a goal.
#[derive(Debug, Deserialize)]
pub struct GoalPayload {
    pub title: String,
    #[serde(default)]
    pub progress: i32,
    pub category: String,
}

impl GoalPayload {
    fn validated(self) -> Result<(String, Progress, String), AppError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::BadRequest("title is required".into()));
        }
        let progress = Progress::new(self.progress)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let category = self.category.trim().to_string();
        if category.is_empty() {
            return Err(AppError::BadRequest("category is required".into()));
        }
        Ok((title, progress, category))
    }
}

/// List every goal, newest first.
///
/// GET /admin/api/goals
#[instrument(skip_all)]
pub async fn list(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let goals = GoalRepository::new(state.pool()).list_all().await?;
    Ok(Json(json!({ "success": true, "goals": goals })))
}

/// Create a goal.
///
/// POST /admin/api/goals
#[instrument(skip_all)]
pub async fn create(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<GoalPayload>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let (title, progress, category) = payload.validated()?;
    let goal = GoalRepository::new(state.pool())
        .create(NewGoal {
            title,
            progress,
            category,
        })
        .await?;

    state.cache().invalidate(ContentTag::Goals, Vec::<String>::new());
    tracing::info!(id = %goal.id, "goal created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "goal": goal })),
    ))
}

/// Replace a goal's fields. Partial progress values are set here.
///
/// PUT /admin/api/goals/{id}
#[instrument(skip_all, fields(id = %id))]
pub async fn update(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<GoalId>,
    Json(payload): Json<GoalPayload>,
) -> Result<Json<Value>, AppError> {
    let (title, progress, category) = payload.validated()?;
    let goal = GoalRepository::new(state.pool())
        .update(
            id,
            GoalChanges {
                title,
                progress,
                category,
            },
        )
        .await?;

    state.cache().invalidate(ContentTag::Goals, Vec::<String>::new());
    tracing::info!(id = %goal.id, "goal updated");
    Ok(Json(json!({ "success": true, "goal": goal })))
}

/// Flip a goal's progress: 100 becomes 0, anything else becomes 100.
///
/// POST /admin/api/goals/{id}/toggle
#[instrument(skip_all, fields(id = %id))]
pub async fn toggle(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<GoalId>,
) -> Result<Json<Value>, AppError> {
    let goal = GoalRepository::new(state.pool()).toggle(id).await?;

    state.cache().invalidate(ContentTag::Goals, Vec::<String>::new());
    tracing::info!(id = %goal.id, progress = goal.progress.value(), "goal toggled");
    Ok(Json(json!({ "success": true, "goal": goal })))
}

/// Delete a goal.
///
/// DELETE /admin/api/goals/{id}
#[instrument(skip_all, fields(id = %id))]
pub async fn delete(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<GoalId>,
) -> Result<Json<Value>, AppError> {
    GoalRepository::new(state.pool()).delete(id).await?;

    state.cache().invalidate(ContentTag::Goals, Vec::<String>::new());
    tracing::info!(%id, "goal deleted");
    Ok(Json(json!({ "success": true })))
}
