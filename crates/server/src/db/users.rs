//! User repository for database operations.

use inventory_core::{Email, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::{RepositoryError, conflict_on_unique};
use crate::models::User;

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user and their password hash by email.
    ///
    /// Returns `None` if no user has this email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the email in the database is invalid.
    pub async fn get_by_email_with_password(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query("SELECT id, email, name, password FROM users WHERE email = ?1")
            .bind(email.as_str())
            .fetch_optional(self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let password_hash: String = row.try_get("password")?;
        Ok(Some((user_from_row(&row)?, password_hash)))
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the email in the database is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT id, email, name FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    /// Create a new user with an already hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &Email,
        password_hash: &str,
        name: Option<&str>,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query(
            r"
            INSERT INTO users (email, password, name)
            VALUES (?1, ?2, ?3)
            RETURNING id, email, name
            ",
        )
        .bind(email.as_str())
        .bind(password_hash)
        .bind(name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "email already exists"))?;

        user_from_row(&row)
    }

    /// Number of registered users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }
}

fn user_from_row(row: &SqliteRow) -> Result<User, RepositoryError> {
    let email: String = row.try_get("email")?;
    let email = Email::parse(&email)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid email in database: {e}")))?;

    Ok(User {
        id: row.try_get("id")?,
        email,
        name: row.try_get("name")?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::{SchemaOptions, create_memory_pool, ensure_schema};

    async fn setup() -> SqlitePool {
        let pool = create_memory_pool().await.unwrap();
        ensure_schema(&pool, SchemaOptions::default()).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let pool = setup().await;
        let repo = UserRepository::new(&pool);
        let email = Email::parse("owner@example.com").unwrap();

        let user = repo.create(&email, "hash", Some("Owner")).await.unwrap();
        assert_eq!(user.email, email);
        assert_eq!(user.name.as_deref(), Some("Owner"));

        let (found, hash) = repo
            .get_by_email_with_password(&email)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, user);
        assert_eq!(hash, "hash");

        assert_eq!(repo.get_by_id(user.id).await.unwrap(), Some(user));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let pool = setup().await;
        let repo = UserRepository::new(&pool);
        let email = Email::parse("dup@example.com").unwrap();

        repo.create(&email, "h1", None).await.unwrap();
        let err = repo.create(&email, "h2", None).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_unknown_user_is_none() {
        let pool = setup().await;
        let repo = UserRepository::new(&pool);
        let email = Email::parse("nobody@example.com").unwrap();

        assert!(repo.get_by_email_with_password(&email).await.unwrap().is_none());
        assert!(repo.get_by_id(UserId::new(42)).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
