use std::time::Duration;

use color_eyre::eyre::{Result, eyre};
use dotenv::dotenv;
use slotsync_db::{create_pool, schema::initialize_database};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| eyre!("DATABASE_URL environment variable must be set"))?;

    info!("Connecting to database...");
    let db_pool = create_pool(&database_url, 1, Duration::from_secs(30)).await?;

    initialize_database(&db_pool).await?;
    info!("Migrations applied.");

    Ok(())
}
