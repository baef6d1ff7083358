//! Authentication service.
//!
//! Password login against the `users` table and the bootstrap account that
//! makes a fresh database usable. Session handling lives in
//! [`crate::middleware::auth`].

mod error;

pub use error::AuthError;

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::ExposeSecret;
use sqlx::SqlitePool;

use inventory_core::Email;

use crate::config::SeedUserConfig;
use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash checked when the email is unknown, so both failure paths cost one
/// Argon2 verification.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("inventory-dummy-password").ok());

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Check an email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is malformed or
    /// unknown, or the password does not match. The three cases are
    /// indistinguishable to the caller.
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let Ok(email) = Email::parse(email) else {
            return Err(AuthError::InvalidCredentials);
        };

        let Some((user, password_hash)) = self.users.get_by_email_with_password(&email).await?
        else {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                let _ = verify_password(password, dummy);
            }
            return Err(AuthError::InvalidCredentials);
        };

        verify_password(password, &password_hash)?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// Register a new user with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let user = self
            .users
            .create(&email, &password_hash, name)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, email = %user.email, "User created");
        Ok(user)
    }

    /// Create the bootstrap account if there are no users yet.
    ///
    /// Returns the created user, or `None` if users already existed.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::create_user`].
    pub async fn ensure_seed_user(
        &self,
        seed: &SeedUserConfig,
    ) -> Result<Option<User>, AuthError> {
        if self.users.count().await? > 0 {
            return Ok(None);
        }

        if seed.uses_default_password() {
            tracing::warn!(
                email = %seed.email,
                "Creating seed user with the default password; set SEED_USER_PASSWORD"
            );
        }

        let user = self
            .create_user(
                &seed.email,
                seed.password.expose_secret(),
                seed.name.as_deref(),
            )
            .await?;
        Ok(Some(user))
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id with a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a PHC hash string.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` on mismatch or an unreadable hash.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::db::{SchemaOptions, create_memory_pool, ensure_schema};

    async fn setup() -> SqlitePool {
        let pool = create_memory_pool().await.unwrap();
        ensure_schema(&pool, SchemaOptions::default()).await.unwrap();
        pool
    }

    #[test]
    fn test_hash_is_salted_and_verifies() {
        let a = hash_password("hunter22").unwrap();
        let b = hash_password("hunter22").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("$argon2id$"));
        assert!(verify_password("hunter22", &a).is_ok());
        assert!(matches!(
            verify_password("hunter23", &a),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            verify_password("hunter22", "plaintext"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_succeeds_with_right_password() {
        let pool = setup().await;
        let auth = AuthService::new(&pool);
        let created = auth
            .create_user("Owner@Example.com", "s3cret-pass", Some("Owner"))
            .await
            .unwrap();

        let user = auth.login(" owner@example.COM ", "s3cret-pass").await.unwrap();
        assert_eq!(user, created);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let pool = setup().await;
        let auth = AuthService::new(&pool);
        auth.create_user("owner@example.com", "s3cret-pass", None)
            .await
            .unwrap();

        let wrong_password = auth.login("owner@example.com", "nope").await.unwrap_err();
        let unknown_email = auth.login("ghost@example.com", "nope").await.unwrap_err();
        let malformed = auth.login("not-an-email", "nope").await.unwrap_err();

        for err in [&wrong_password, &unknown_email, &malformed] {
            assert!(matches!(err, AuthError::InvalidCredentials));
        }
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_create_user_rules() {
        let pool = setup().await;
        let auth = AuthService::new(&pool);

        assert!(matches!(
            auth.create_user("bad", "long-enough", None).await,
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            auth.create_user("a@b.c", "short", None).await,
            Err(AuthError::WeakPassword(_))
        ));
        auth.create_user("a@b.c", "long-enough", Some("   ")).await.unwrap();
        assert!(matches!(
            auth.create_user("A@B.C", "long-enough", None).await,
            Err(AuthError::UserAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn test_seed_user_only_on_empty_table() {
        let pool = setup().await;
        let auth = AuthService::new(&pool);
        let seed = SeedUserConfig {
            email: "boot@example.com".to_owned(),
            password: SecretString::from("bootstrap-pass"),
            name: Some("Boot".to_owned()),
        };

        let created = auth.ensure_seed_user(&seed).await.unwrap().unwrap();
        assert_eq!(created.email.as_str(), "boot@example.com");
        assert!(auth.ensure_seed_user(&seed).await.unwrap().is_none());
        assert!(auth.login("boot@example.com", "bootstrap-pass").await.is_ok());
    }
}
