//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use inventory_core::{Email, UserId};

use super::user::User;

/// Session-stored user identity.
///
/// Serialized as `{id, email, name}`, which is also the shape returned by
/// `GET /api/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// User's display name, if set.
    pub name: Option<String>,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_flat_identity() {
        let user = CurrentUser {
            id: UserId::new(1),
            email: Email::parse("admin@example.com").unwrap(),
            name: Some("Administrator".to_owned()),
        };
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            serde_json::json!({"id": 1, "email": "admin@example.com", "name": "Administrator"})
        );
    }
}
