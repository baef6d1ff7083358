//! Business logic services for the inventory server.
//!
//! # Services
//!
//! - `auth` - Password login and account bootstrap for the identity gate

pub mod auth;

pub use auth::{AuthError, AuthService};
