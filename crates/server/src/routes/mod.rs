//! HTTP route handlers for the inventory.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Product pages (HTML)
//! GET  /                       - Product table and add form (?edit=<id> pre-fills)
//! POST /add                    - Create product, redirect to /
//! POST /update/{id}            - Replace product, redirect to /
//! POST /delete/{id}            - Delete product, redirect to /
//!
//! # Product API (JSON)
//! GET    /api/products         - List products, newest first
//! POST   /api/products         - Create product (201)
//! GET    /api/products/{id}    - Show product
//! PUT    /api/products/{id}    - Replace product
//! DELETE /api/products/{id}    - Delete product (204)
//!
//! # Auth (only when AUTH_ENABLED)
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! POST /logout                 - Logout action
//! GET  /api/auth/me            - Current user
//! POST /api/auth/login         - Login (JSON)
//! POST /api/auth/logout        - Logout (JSON)
//! ```
//!
//! Product pages and the product API require a session when authentication
//! is enabled. Anything else falls through to the static files and then to
//! [`fallback::not_found`].

pub mod api;
pub mod auth;
pub mod fallback;
pub mod health;
pub mod pages;

use axum::{Router, middleware::from_fn};
use inventory_core::ProductId;

use crate::error::AppError;
use crate::middleware::require_auth;
use crate::state::AppState;

/// Parse a product id taken from the URL path.
///
/// # Errors
///
/// Returns `AppError::InvalidId` if `raw` is not a plain integer. Decimal
/// and exponent forms such as `1.5` or `1e2` are not ids.
pub(crate) fn parse_product_id(raw: &str) -> Result<ProductId, AppError> {
    raw.trim().parse().map_err(|_| AppError::InvalidId)
}

/// Create all routes for the inventory.
pub fn routes(auth_enabled: bool) -> Router<AppState> {
    let catalog = Router::new()
        .merge(api::products::router())
        .merge(pages::router());

    let mut app = health::router();

    if auth_enabled {
        app = app
            .merge(catalog.route_layer(from_fn(require_auth)))
            .merge(auth::router())
            .merge(api::auth::router());
    } else {
        app = app.merge(catalog);
    }

    app
}
