//! Schema command.
//!
//! # Usage
//!
//! ```bash
//! inv-cli migrate
//! inv-cli migrate --no-users
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - SQLite connection string (default: `sqlite://database.db`)
//!
//! The server runs the same step on startup, so this is only needed to
//! prepare a database ahead of time or to inspect the resulting columns.

use inventory_server::db::{self, SchemaOptions};

use super::connect;

/// Create missing tables and add missing columns.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or altered.
pub async fn run(users: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect().await?;

    tracing::info!(users, "Ensuring schema...");
    db::ensure_schema(&pool, SchemaOptions { users }).await?;

    let columns = db::table_columns(&pool, "products").await?;
    tracing::info!("products columns: {}", columns.join(", "));
    tracing::info!("Schema is up to date");

    Ok(())
}
