//! Atelier site library.
//!
//! The whole site - public JSON API, admin API, chat relay - lives in one
//! binary. This crate exposes the pieces so the CLI and integration tests
//! can reuse them.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::PostgresStore;

use state::AppState;

/// Assemble the application router with its middleware stack.
///
/// The session layer is passed in because building it needs a database
/// round trip; everything else is derived from the state.
#[must_use]
pub fn app(state: AppState, session_layer: SessionManagerLayer<PostgresStore>) -> Router {
    let cors = cors_layer(&state.config().allowed_origins);

    routes::router()
        .layer(session_layer)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the JSON APIs: explicit origin list, credentials allowed so the
/// admin dashboard can send the session cookie cross-origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "skipping unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
