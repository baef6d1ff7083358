//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use inventory_core::{Email, UserId};

/// An account that can pass the identity gate.
///
/// The password hash is deliberately not part of this type; only
/// [`UserRepository::get_by_email_with_password`](crate::db::UserRepository::get_by_email_with_password)
/// hands it out, and only to the login check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login email, lower-cased.
    pub email: Email,
    /// Optional display name.
    pub name: Option<String>,
}
