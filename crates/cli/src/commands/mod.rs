//! CLI command implementations.

pub mod migrate;
pub mod products;
pub mod seed;
pub mod user;

use inventory_server::config::{ConfigError, InventoryConfig};
use sqlx::SqlitePool;
use thiserror::Error;

/// Errors shared by every command that opens the database.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// Environment could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Open the database named by `DATABASE_URL`.
pub async fn connect() -> Result<SqlitePool, ConnectError> {
    let config = InventoryConfig::from_env()?;

    tracing::info!("Connecting to database...");
    Ok(inventory_server::db::create_pool(&config.database_url).await?)
}
