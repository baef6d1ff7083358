//! HTTP middleware stack for the inventory server.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (one `http_request` span per request)
//! 3. Request ID (reuse or generate `x-request-id`)
//! 4. Session layer (tower-sessions with an in-memory store)
//! 5. Auth guard (`require_auth`, route layer on protected routes only)

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{
    OptionalAuth, RequireAuth, current_user, end_session, require_auth, start_session,
};
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
