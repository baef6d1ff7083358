//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `DATABASE_URL` - SQLite connection string (default: `sqlite://database.db`)
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 3000)
//! - `BASE_URL` - Public URL, decides the cookie `Secure` flag (default: `http://localhost:<PORT>`)
//! - `AUTH_ENABLED` - Gate the product API and pages behind a login (default: true)
//! - `SESSION_TTL_SECONDS` - Session lifetime from login (default: 28800, 8 hours)
//! - `SEED_USER_EMAIL` - Bootstrap account email (default: admin@example.com)
//! - `SEED_USER_PASSWORD` - Bootstrap account password (default: admin123)
//! - `SEED_USER_NAME` - Bootstrap account display name (default: Administrator)
//! - `STATIC_DIR` - Directory served for unmatched paths (default: crates/server/static)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `LOG_FORMAT` - `json` for JSON log lines, anything else for human-readable output

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Password used for the bootstrap account when none is configured.
pub const DEFAULT_SEED_PASSWORD: &str = "admin123";

const DEFAULT_SESSION_TTL_SECONDS: i64 = 8 * 60 * 60;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Inventory server configuration.
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// SQLite connection URL
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of the server
    pub base_url: String,
    /// Whether the identity gate is active
    pub auth_enabled: bool,
    /// Session lifetime in seconds, counted from login
    pub session_ttl_seconds: i64,
    /// Account created when the users table is empty
    pub seed_user: SeedUserConfig,
    /// Directory with static assets
    pub static_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
    /// Log line format
    pub log_format: LogFormat,
}

/// Bootstrap account settings.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct SeedUserConfig {
    pub email: String,
    pub password: SecretString,
    pub name: Option<String>,
}

impl std::fmt::Debug for SeedUserConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedUserConfig")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

impl SeedUserConfig {
    /// Whether the built-in default password is in use.
    #[must_use]
    pub fn uses_default_password(&self) -> bool {
        self.password.expose_secret() == DEFAULT_SEED_PASSWORD
    }
}

impl Default for SeedUserConfig {
    fn default() -> Self {
        Self {
            email: "admin@example.com".to_owned(),
            password: SecretString::from(DEFAULT_SEED_PASSWORD),
            name: Some("Administrator".to_owned()),
        }
    }
}

impl InventoryConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let or_default =
            |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_owned());

        let database_url = SecretString::from(or_default("DATABASE_URL", "sqlite://database.db"));
        let host: IpAddr = parse_var("HOST", &or_default("HOST", "127.0.0.1"))?;
        let port: u16 = parse_var("PORT", &or_default("PORT", "3000"))?;
        let base_url = get("BASE_URL").unwrap_or_else(|| format!("http://localhost:{port}"));
        let auth_enabled = parse_bool("AUTH_ENABLED", &or_default("AUTH_ENABLED", "true"))?;

        let session_ttl_seconds: i64 = match get("SESSION_TTL_SECONDS") {
            Some(value) => parse_var("SESSION_TTL_SECONDS", &value)?,
            None => DEFAULT_SESSION_TTL_SECONDS,
        };
        if session_ttl_seconds <= 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SESSION_TTL_SECONDS".to_owned(),
                "must be greater than zero".to_owned(),
            ));
        }

        let defaults = SeedUserConfig::default();
        let seed_user = SeedUserConfig {
            email: get("SEED_USER_EMAIL").unwrap_or(defaults.email),
            password: get("SEED_USER_PASSWORD").map_or(defaults.password, SecretString::from),
            name: get("SEED_USER_NAME").or(defaults.name),
        };

        let static_dir = PathBuf::from(or_default("STATIC_DIR", "crates/server/static"));
        let log_format = match get("LOG_FORMAT").as_deref() {
            Some(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            auth_enabled,
            session_ttl_seconds,
            seed_user,
            static_dir,
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
            log_format,
        })
    }

    /// Configuration for tests: in-memory database, auth on, assets from this crate.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            database_url: SecretString::from("sqlite::memory:"),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            base_url: "http://localhost".to_owned(),
            auth_enabled: true,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            seed_user: SeedUserConfig::default(),
            static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
            sentry_dsn: None,
            sentry_environment: None,
            log_format: LogFormat::Pretty,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies must carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_owned(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<InventoryConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        InventoryConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.database_url.expose_secret(), "sqlite://database.db");
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(config.auth_enabled);
        assert_eq!(config.session_ttl_seconds, 28_800);
        assert_eq!(config.seed_user.email, "admin@example.com");
        assert!(config.seed_user.uses_default_password());
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(!config.is_secure());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("BASE_URL", "https://shop.example.com"),
            ("AUTH_ENABLED", "false"),
            ("SESSION_TTL_SECONDS", "60"),
            ("SEED_USER_PASSWORD", "correct horse"),
            ("LOG_FORMAT", "JSON"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.is_secure());
        assert!(!config.auth_enabled);
        assert_eq!(config.session_ttl_seconds, 60);
        assert!(!config.seed_user.uses_default_password());
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            load(&[("PORT", "http")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "PORT"
        ));
        assert!(load(&[("AUTH_ENABLED", "maybe")]).is_err());
        assert!(load(&[("SESSION_TTL_SECONDS", "0")]).is_err());
    }

    #[test]
    fn test_seed_user_debug_redacts_password() {
        let seed = SeedUserConfig {
            email: "owner@example.com".to_owned(),
            password: SecretString::from("super_secret_seed_password"),
            name: None,
        };
        let debug_output = format!("{seed:?}");
        assert!(debug_output.contains("owner@example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_seed_password"));
    }
}
