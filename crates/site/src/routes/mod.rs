//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Health check (db ping)
//!
//! # Public surface (JSON, cached)
//! GET  /api/posts                     - Published posts, newest first
//! GET  /api/posts/{slug}              - Published post detail
//! GET  /api/works                     - Public case studies, oldest first
//! GET  /api/works/{slug}              - Public case-study detail
//! GET  /api/goals                     - Goals grouped by category
//! GET  /api/gallery                   - Image media, newest first
//! POST /api/contact                   - Contact form submission
//! POST /api/chat                      - Chat relay
//!
//! # Admin (session-gated)
//! POST /admin/login                   - Credential check, issues session
//! POST /admin/logout                  - Clears session
//! GET  /admin/api/posts               - All posts, newest first
//! POST /admin/api/posts               - Create post
//! PUT  /admin/api/posts/{id}          - Update post
//! DELETE /admin/api/posts/{id}        - Delete post
//! GET/POST /admin/api/works           - Case studies (same shape)
//! PUT/DELETE /admin/api/works/{id}
//! GET/POST /admin/api/goals           - Goals
//! PUT/DELETE /admin/api/goals/{id}
//! POST /admin/api/goals/{id}/toggle   - Flip progress 0 <-> 100
//! GET/POST /admin/api/media           - Media library
//! DELETE /admin/api/media/{id}
//! GET  /admin/api/contact             - Contact submission log
//! ```

pub mod admin;
pub mod blog;
pub mod chat;
pub mod contact;
pub mod gallery;
pub mod goals;
pub mod health;
pub mod work;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the full application router (public + admin).
pub fn router() -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health::check))
        .route("/api/posts", get(blog::list))
        .route("/api/posts/{slug}", get(blog::detail))
        .route("/api/works", get(work::list))
        .route("/api/works/{slug}", get(work::detail))
        .route("/api/goals", get(goals::board))
        .route("/api/gallery", get(gallery::images))
        .route("/api/contact", post(contact::submit))
        .route("/api/chat", post(chat::relay));

    public.merge(admin::router())
}
