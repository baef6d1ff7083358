//! Inventory server library.
//!
//! This crate provides the inventory web application as a library,
//! allowing it to be tested and reused. The binary in `main.rs` adds
//! configuration loading, tracing, Sentry and the listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, handler::HandlerWithoutStateExt, http::Request};
use tower_http::{services::ServeDir, trace::TraceLayer};

use state::AppState;

/// Assemble the application router with its middleware stack.
///
/// Sentry layers are left to the caller so tests can drive the router
/// without a Sentry client.
pub fn build_router(state: AppState) -> Router {
    let config = state.config();
    let session_layer = middleware::create_session_layer(config);
    let static_files = ServeDir::new(&config.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .fallback(routes::fallback::not_found.into_service());

    routes::routes(config.auth_enabled)
        .fallback_service(static_files)
        .layer(session_layer)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                        request_id = tracing::field::Empty,
                        user_id = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::response::Response,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        tracing::debug!("finished processing request");
                    },
                ),
        )
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{body::Body, http::StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::config::InventoryConfig;
    use crate::db::{SchemaOptions, create_memory_pool, ensure_schema};

    async fn app(auth_enabled: bool) -> Router {
        let mut config = InventoryConfig::for_testing();
        config.auth_enabled = auth_enabled;
        let pool = create_memory_pool().await.unwrap();
        ensure_schema(&pool, SchemaOptions { users: auth_enabled })
            .await
            .unwrap();
        build_router(AppState::new(config, pool))
    }

    async fn status(app: Router, uri: &str) -> StatusCode {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_gate_follows_config() {
        assert_eq!(status(app(true).await, "/api/products").await, StatusCode::UNAUTHORIZED);
        assert_eq!(status(app(false).await, "/api/products").await, StatusCode::OK);
        assert_eq!(status(app(false).await, "/login").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_is_always_public() {
        assert_eq!(status(app(true).await, "/health").await, StatusCode::OK);
        assert_eq!(status(app(true).await, "/health/ready").await, StatusCode::OK);
    }
}
