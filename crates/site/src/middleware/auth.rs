//! Admin auth gate.
//!
//! A two-state machine: `anonymous` and `authenticated`. Login flips the
//! session to authenticated; expiry (or explicit logout) flips it back.
//! Every handler under `/admin` takes the [`RequireAdmin`] extractor, so a
//! route cannot be mounted there without passing the gate.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_sessions::Session;

/// Session key for the admin marker.
const CURRENT_ADMIN_KEY: &str = "current_admin";

/// Session-stored admin identity.
///
/// There is exactly one admin, so this only records the login name - its
/// presence in the session IS the authenticated state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// The login name that authenticated this session.
    pub username: String,
}

/// Extractor that requires an authenticated admin session.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.username)
/// }
/// ```
pub struct RequireAdmin(pub CurrentAdmin);

/// Rejection for an unauthenticated request to an admin route.
pub struct AdminAuthRejection;

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": "authentication required" })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // The session is placed in extensions by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection)?;

        let admin: CurrentAdmin = session
            .get(CURRENT_ADMIN_KEY)
            .await
            .ok()
            .flatten()
            .ok_or(AdminAuthRejection)?;

        Ok(Self(admin))
    }
}

/// Mark the session as authenticated.
///
/// # Errors
///
/// Returns the session store error if the write fails.
pub async fn set_current_admin(
    session: &Session,
    username: &str,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(
            CURRENT_ADMIN_KEY,
            CurrentAdmin {
                username: username.to_owned(),
            },
        )
        .await
}

/// Clear the authenticated state (logout).
///
/// # Errors
///
/// Returns the session store error if the removal fails.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<CurrentAdmin>(CURRENT_ADMIN_KEY).await?;
    Ok(())
}
