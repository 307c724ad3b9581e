//! Health check route.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::instrument;

use crate::state::AppState;

/// Report whether the database answers.
///
/// GET /health
#[instrument(skip(state))]
pub async fn check(State(state): State<AppState>) -> impl IntoResponse {
    let started = std::time::Instant::now();
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => {
            let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            (
                StatusCode::OK,
                Json(json!({
                    "status": "ok",
                    "db_latency_ms": latency_ms,
                })),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "health check: database unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded" })),
            )
        }
    }
}
