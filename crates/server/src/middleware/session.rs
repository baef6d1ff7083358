//! Session middleware configuration.
//!
//! Sets up in-process sessions using tower-sessions. Sessions do not survive a
//! restart and are not shared between server instances.

use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::config::InventoryConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "inv_session";

/// Create the session layer with an in-memory store.
///
/// Anonymous sessions end with the browser session; a successful login pins
/// the expiry to a fixed instant (see [`super::auth::start_session`]).
#[must_use]
pub fn create_session_layer(config: &InventoryConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
