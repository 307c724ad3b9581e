//! Database migration command.
//!
//! The schema statements are idempotent, so running this repeatedly (or
//! alongside the server's own startup migration) is safe.

use super::connect;

/// Apply the site schema.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is unset or a statement fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect().await?;

    tracing::info!("Applying schema...");
    atelier_site::db::migrations::run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
