//! Churn Gateway
//!
//! A churn-prediction model served behind JWT-protected endpoints, with
//! a user-account subsystem backed by PostgreSQL:
//! - Pipeline inference over a JSON model artifact (metadata, class
//!   probabilities, expected loss)
//! - HS256 tokens carrying issuer, user id and a permissions list
//! - User registration, sign-in and activation lifecycle

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use infrastructure::auth::{JwtConfig, JwtService};
use infrastructure::model::ArtifactStore;
use infrastructure::user::{hasher_from_config, PasswordHasher, PostgresUserRepository, UserService};

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    info!(
        "Loading model artifact from {}",
        config.model.artifact_path
    );
    let artifacts = ArtifactStore::load(&config.model.artifact_path, &config.model.params_path)?;
    info!("Serving model {}", artifacts.meta().id);

    info!("Connecting to PostgreSQL...");
    let pg_pool = sqlx::PgPool::connect(&config.database.url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
    info!("PostgreSQL connection established");

    let repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let hasher: Arc<dyn PasswordHasher> = Arc::from(hasher_from_config(&config.auth.password));
    let user_service = UserService::new(repository, hasher);

    let jwt_service = JwtService::new(JwtConfig::from(&config.auth));

    Ok(AppState::new(
        Arc::new(user_service),
        Arc::new(jwt_service),
        Arc::new(artifacts),
    ))
}
