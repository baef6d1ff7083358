//! Startup schema management.
//!
//! The schema only ever grows: tables are created when absent and columns are
//! added when absent. Nothing is dropped or renamed, so running
//! [`ensure_schema`] against a database from any earlier release is safe.

use sqlx::{Row, SqlitePool};
use thiserror::Error;

/// Errors raised while inspecting or evolving the schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A table, column or type name that cannot be safely placed in DDL.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}

/// Which optional tables to provision.
#[derive(Debug, Clone, Copy)]
pub struct SchemaOptions {
    /// Create the `users` table used by the identity gate.
    pub users: bool,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self { users: true }
    }
}

const CREATE_PRODUCTS: &str = r"
    CREATE TABLE IF NOT EXISTS products (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        name      TEXT    NOT NULL,
        sku       TEXT    NOT NULL UNIQUE,
        price     REAL    NOT NULL CHECK (price >= 0),
        size      TEXT    NOT NULL CHECK (size IN ('XS','S','M','L','XL')),
        color     TEXT,
        quantity  INTEGER NOT NULL CHECK (quantity >= 0),
        brand     TEXT,
        category  TEXT
    )
";

const CREATE_USERS: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        email     TEXT    NOT NULL UNIQUE,
        password  TEXT    NOT NULL,
        name      TEXT
    )
";

/// Make sure every table and column the server needs exists.
///
/// Idempotent; called once at startup.
///
/// # Errors
///
/// Returns `SchemaError::Database` if any statement fails.
pub async fn ensure_schema(pool: &SqlitePool, options: SchemaOptions) -> Result<(), SchemaError> {
    sqlx::query(CREATE_PRODUCTS).execute(pool).await?;
    // Databases created before these columns existed.
    ensure_column(pool, "products", "brand", "TEXT").await?;
    ensure_column(pool, "products", "category", "TEXT").await?;

    if options.users {
        sqlx::query(CREATE_USERS).execute(pool).await?;
        ensure_column(pool, "users", "name", "TEXT").await?;
    }

    tracing::debug!(users = options.users, "Schema ensured");
    Ok(())
}

/// Add `column` to `table` unless it is already there.
///
/// Returns `true` if the column was added, `false` if it already existed.
///
/// # Errors
///
/// Returns `SchemaError::InvalidIdentifier` if any argument is not a plain
/// SQL word, or `SchemaError::Database` if the inspection or `ALTER` fails.
pub async fn ensure_column(
    pool: &SqlitePool,
    table: &str,
    column: &str,
    column_type: &str,
) -> Result<bool, SchemaError> {
    validate_identifier(column)?;
    validate_type(column_type)?;

    let columns = table_columns(pool, table).await?;
    if columns.iter().any(|c| c.eq_ignore_ascii_case(column)) {
        return Ok(false);
    }

    // Identifiers cannot be bound as parameters; they were validated above.
    let ddl = format!("ALTER TABLE {table} ADD COLUMN {column} {column_type}");
    sqlx::query(&ddl).execute(pool).await?;

    tracing::info!(table, column, column_type, "Added missing column");
    Ok(true)
}

/// Names of the columns currently defined on `table`, in declaration order.
///
/// An unknown table yields an empty list.
///
/// # Errors
///
/// Returns `SchemaError::InvalidIdentifier` for an unsafe table name, or
/// `SchemaError::Database` if the pragma query fails.
pub async fn table_columns(pool: &SqlitePool, table: &str) -> Result<Vec<String>, SchemaError> {
    validate_identifier(table)?;

    let rows = sqlx::query("SELECT name FROM pragma_table_info(?1) ORDER BY cid")
        .bind(table)
        .fetch_all(pool)
        .await?;

    rows.iter()
        .map(|row| row.try_get::<String, _>("name").map_err(SchemaError::from))
        .collect()
}

fn validate_identifier(name: &str) -> Result<(), SchemaError> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(SchemaError::InvalidIdentifier(name.to_owned()))
    }
}

/// Column types may be several words (`TEXT NOT NULL`) or carry a size
/// (`VARCHAR(32)`), but never quotes, separators or comments.
fn validate_type(column_type: &str) -> Result<(), SchemaError> {
    let valid = !column_type.trim().is_empty()
        && column_type
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ' ' | '(' | ')'));

    if valid {
        Ok(())
    } else {
        Err(SchemaError::InvalidIdentifier(column_type.to_owned()))
    }
}
