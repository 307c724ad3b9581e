//! CLI command implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;

/// Connect to the database named by `DATABASE_URL`.
pub async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| "DATABASE_URL not set")?;

    let pool = atelier_site::db::create_pool(&database_url).await?;
    tracing::info!("Connected to database");
    Ok(pool)
}
