use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotsync_api::{ApiState, config::ApiConfig, init_tracing};
use slotsync_db::{PgRepository, create_pool, schema::initialize_database};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    init_tracing(config.log_level)?;

    // Create database connection pool
    info!("Connecting to database...");
    let db_pool = create_pool(
        &config.database_url,
        config.database_max_connections,
        config.database_acquire_timeout(),
    )
    .await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Start API server
    let state = Arc::new(ApiState::new(PgRepository::new(db_pool)));
    slotsync_api::start_server(config, state).await?;

    Ok(())
}
