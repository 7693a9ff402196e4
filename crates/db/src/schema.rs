use eyre::{Result, WrapErr};
use sqlx::{Pool, Postgres, migrate::Migrator};
use tracing::info;

/// Versioned migrations embedded from `crates/db/migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Applies every pending migration. Already applied versions are skipped.
pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Applying database migrations...");

    MIGRATOR
        .run(pool)
        .await
        .wrap_err("Failed to apply database migrations")?;

    info!("Database schema is up to date.");
    Ok(())
}
