//! Integration tests for the Atelier site.
//!
//! # Running Tests
//!
//! ```bash
//! # Start Postgres and the server, then:
//! ADMIN_USERNAME=... ADMIN_PASSWORD=... cargo test -p atelier-integration-tests -- --ignored
//! ```
//!
//! Every test is `#[ignore]`d because it needs live infrastructure: a
//! running server (`cargo run -p atelier-site`) backed by a Postgres the
//! tests may freely write into.

use reqwest::Client;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

/// Base URL for the site (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("SITE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// HTTP client with a cookie store, so a login carries across requests.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Log in as the admin using `ADMIN_USERNAME` / `ADMIN_PASSWORD` from the
/// environment. The session rides in the client's cookie store afterwards.
///
/// # Panics
///
/// Panics if the credentials are unset or the login fails.
pub async fn admin_login(client: &Client) {
    let username = std::env::var("ADMIN_USERNAME").expect("ADMIN_USERNAME not set");
    let password = std::env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD not set");

    let resp = client
        .post(format!("{}/admin/login", base_url()))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("login request failed");

    assert!(
        resp.status().is_success(),
        "admin login rejected: {}",
        resp.status()
    );
}

/// A slug that won't collide with earlier test runs.
#[must_use]
pub fn unique_slug(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Connect directly to the database the server is using, for assertions the
/// HTTP surface cannot express (e.g. that a rejected write left no row).
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the connection fails.
pub async fn db_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
    PgPool::connect(&url)
        .await
        .expect("Failed to connect to Postgres")
}
