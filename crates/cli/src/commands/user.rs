//! Login account commands.
//!
//! # Usage
//!
//! ```bash
//! inv-cli user create -e owner@example.com -p 'long-password' -n "Shop Owner"
//! ```

use inventory_server::db::{self, SchemaOptions};
use inventory_server::services::AuthService;

use super::connect;

/// Create a new user.
///
/// The users table is created first if it does not exist yet.
///
/// # Errors
///
/// Returns an error if the email is invalid, the password is too short,
/// the email is taken or the database fails.
pub async fn create(
    email: &str,
    password: &str,
    name: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect().await?;
    db::ensure_schema(&pool, SchemaOptions { users: true }).await?;

    tracing::info!("Creating user: {}", email);
    let user = AuthService::new(&pool)
        .create_user(email, password, name)
        .await?;

    tracing::info!(
        "User created successfully! ID: {}, Email: {}",
        user.id,
        user.email
    );

    Ok(())
}
