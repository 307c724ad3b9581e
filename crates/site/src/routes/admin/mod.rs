//! Admin routes: login, logout, and the content-management API.
//!
//! Everything under `/admin/api` takes the [`RequireAdmin`] extractor;
//! login and logout are the only admin endpoints reachable anonymously.

pub mod contact;
pub mod goals;
pub mod media;
pub mod posts;
pub mod works;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post, put},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::state::AppState;

/// Build the admin router (mounted at the root, all paths under `/admin`).
pub fn router() -> Router<AppState> {
    let api = Router::new()
        .route("/posts", get(posts::list).post(posts::create))
        .route("/posts/{id}", put(posts::update).delete(posts::delete))
        .route("/works", get(works::list).post(works::create))
        .route("/works/{id}", put(works::update).delete(works::delete))
        .route("/goals", get(goals::list).post(goals::create))
        .route("/goals/{id}", put(goals::update).delete(goals::delete))
        .route("/goals/{id}/toggle", post(goals::toggle))
        .route("/media", get(media::list).post(media::save))
        .route("/media/{id}", axum::routing::delete(media::delete))
        .route("/contact", get(contact::list));

    Router::new()
        .route("/admin/login", post(login))
        .route("/admin/logout", post(logout))
        .nest("/admin/api", api)
}

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Check credentials and mark the session as authenticated.
///
/// The response body never says which of the two fields was wrong.
///
/// POST /admin/login
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<Value>, AppError> {
    if !state.config().admin.matches(&form.username, &form.password) {
        tracing::warn!(username = %form.username, "failed admin login attempt");
        return Err(AppError::Unauthorized("incorrect credentials".into()));
    }

    // Fresh session id on privilege change
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("session cycle failed: {e}")))?;
    set_current_admin(&session, &form.username)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    tracing::info!(username = %form.username, "admin logged in");
    Ok(Json(json!({ "success": true })))
}

/// Clear the session's authenticated state.
///
/// Always succeeds, even when called without a live session.
///
/// POST /admin/logout
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Json<Value>, AppError> {
    clear_current_admin(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;
    Ok(Json(json!({ "success": true })))
}
