//! Migrate command - creates the database schema

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::user::create_schema;

/// Create the users table and its indexes
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    info!("Connecting to PostgreSQL...");
    let pool = sqlx::PgPool::connect(&config.database.url).await?;

    create_schema(&pool).await?;
    info!("Users table and email index created");

    Ok(())
}
