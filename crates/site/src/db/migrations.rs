//! Schema migrations as idempotent SQL statements.
//!
//! The schema is small enough that versioned migration files would be
//! ceremony; every statement here is `IF NOT EXISTS`-safe and can run on
//! every startup.

use sqlx::PgPool;

/// All schema statements, in application order.
const MIGRATIONS: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS post (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        content TEXT NOT NULL,
        image_url TEXT,
        status TEXT NOT NULL DEFAULT 'draft',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    ",
    r"
    CREATE INDEX IF NOT EXISTS idx_post_status_created ON post(status, created_at DESC)
    ",
    r"
    CREATE TABLE IF NOT EXISTS work (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        tech_stack TEXT[] NOT NULL DEFAULT '{}',
        description TEXT NOT NULL,
        visibility TEXT NOT NULL DEFAULT 'private',
        github_link TEXT,
        live_link TEXT,
        image_url TEXT,
        video_url TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    ",
    r"
    CREATE INDEX IF NOT EXISTS idx_work_visibility_created ON work(visibility, created_at)
    ",
    r"
    CREATE TABLE IF NOT EXISTS goal (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        progress INTEGER NOT NULL DEFAULT 0 CHECK (progress >= 0 AND progress <= 100),
        category TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS media (
        id SERIAL PRIMARY KEY,
        url TEXT NOT NULL,
        name TEXT NOT NULL,
        kind TEXT NOT NULL,
        size_bytes BIGINT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS contact_submission (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        message TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    ",
];

/// Apply all schema statements.
///
/// # Errors
///
/// Returns `sqlx::Error` if any statement fails.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running database migrations");
    for statement in MIGRATIONS {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::info!("Migrations complete");
    Ok(())
}
