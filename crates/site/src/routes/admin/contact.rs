//! Admin contact submission log.

use axum::{Json, extract::State};
use serde_json::{Value, json};
use tracing::instrument;

use crate::db::ContactRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// List every contact submission, newest first. Read-only.
///
/// GET /admin/api/contact
#[instrument(skip_all)]
pub async fn list(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let submissions = ContactRepository::new(state.pool()).list_all().await?;
    Ok(Json(json!({ "success": true, "submissions": submissions })))
}
