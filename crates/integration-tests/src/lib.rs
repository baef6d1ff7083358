//! Integration tests for the clothing inventory.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p inventory-integration-tests
//! ```
//!
//! Every test drives the full router (sessions, auth guard, static files and
//! fallback) in process against its own in-memory `SQLite` database. No
//! listener or external service is needed.
//!
//! # Test Categories
//!
//! - `products_api` - JSON CRUD, validation and error mapping
//! - `auth` - Login, logout, session expiry and route gating
//! - `pages` - HTML form flow
//! - `fallback` - Health, static files, request IDs and 404s

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, HeaderValue, Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use inventory_server::config::InventoryConfig;
use inventory_server::db::{SchemaOptions, create_memory_pool, ensure_schema};
use inventory_server::middleware::session::SESSION_COOKIE_NAME;
use inventory_server::services::AuthService;
use inventory_server::state::AppState;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Email of the account every [`TestApp`] starts with.
pub const ADMIN_EMAIL: &str = "admin@example.com";
/// Password of the account every [`TestApp`] starts with.
pub const ADMIN_PASSWORD: &str = "admin123";

/// A fully assembled application plus a cookie jar holding one session.
pub struct TestApp {
    router: Router,
    pool: SqlitePool,
    cookie: Option<String>,
}

/// A buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Body parsed as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    /// Body as UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }

    /// Value of the `Location` header.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    /// App with authentication enabled and the default seed account.
    pub async fn new() -> Self {
        Self::with_config(InventoryConfig::for_testing()).await
    }

    /// App with authentication disabled.
    pub async fn without_auth() -> Self {
        let mut config = InventoryConfig::for_testing();
        config.auth_enabled = false;
        Self::with_config(config).await
    }

    /// App built from `config`, prepared the way the server binary does it.
    pub async fn with_config(config: InventoryConfig) -> Self {
        let pool = create_memory_pool().await.unwrap();
        ensure_schema(
            &pool,
            SchemaOptions {
                users: config.auth_enabled,
            },
        )
        .await
        .unwrap();

        if config.auth_enabled {
            AuthService::new(&pool)
                .ensure_seed_user(&config.seed_user)
                .await
                .unwrap();
        }

        let router = inventory_server::build_router(AppState::new(config, pool.clone()));
        Self {
            router,
            pool,
            cookie: None,
        }
    }

    /// App with authentication enabled and an admin session already open.
    pub async fn logged_in() -> Self {
        let mut app = Self::new().await;
        app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
        app
    }

    /// A second client of the same running app, with an empty cookie jar.
    pub fn new_client(&self) -> Self {
        Self {
            router: self.router.clone(),
            pool: self.pool.clone(),
            cookie: None,
        }
    }

    /// The session cookie currently held, as `name=value`.
    pub fn session_cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    /// Replace the held session cookie.
    pub fn set_session_cookie(&mut self, cookie: Option<String>) {
        self.cookie = cookie;
    }

    /// The database behind the app.
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Log in through the JSON API, keeping the session cookie.
    pub async fn login(&mut self, email: &str, password: &str) -> TestResponse {
        self.post_json(
            "/api/auth/login",
            &serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, Body::empty()).await
    }

    pub async fn delete(&mut self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None, Body::empty()).await
    }

    pub async fn post_json(&mut self, uri: &str, body: &Value) -> TestResponse {
        self.send_json(Method::POST, uri, body).await
    }

    pub async fn put_json(&mut self, uri: &str, body: &Value) -> TestResponse {
        self.send_json(Method::PUT, uri, body).await
    }

    async fn send_json(&mut self, method: Method, uri: &str, body: &Value) -> TestResponse {
        self.send(
            method,
            uri,
            Some("application/json"),
            Body::from(body.to_string()),
        )
        .await
    }

    /// POST a raw body with an explicit content type.
    pub async fn post_raw(&mut self, uri: &str, content_type: &str, body: &str) -> TestResponse {
        self.send(
            Method::POST,
            uri,
            Some(content_type),
            Body::from(body.to_owned()),
        )
        .await
    }

    /// POST an HTML form.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        self.post_raw(uri, "application/x-www-form-urlencoded", &body)
            .await
    }

    /// Send a prepared request through the router.
    pub async fn request(&mut self, mut request: Request<Body>) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        }

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec();

        self.store_cookie(&headers);
        TestResponse {
            status,
            headers,
            body,
        }
    }

    async fn send(
        &mut self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: Body,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        self.request(builder.body(body).unwrap()).await
    }

    fn store_cookie(&mut self, headers: &HeaderMap) {
        let prefix = format!("{SESSION_COOKIE_NAME}=");
        for value in headers.get_all(header::SET_COOKIE) {
            let Ok(value) = value.to_str() else { continue };
            let Some(pair) = value.split(';').next() else {
                continue;
            };
            if !pair.starts_with(&prefix) {
                continue;
            }
            // A removal cookie has an empty value.
            if pair.len() == prefix.len() {
                self.cookie = None;
            } else {
                self.cookie = Some(pair.to_owned());
            }
        }
    }
}

/// JSON body of a valid product.
pub fn tee(sku: &str) -> Value {
    serde_json::json!({
        "name": "Basic Tee",
        "sku": sku,
        "price": 49.99,
        "size": "M",
        "color": "black",
        "quantity": 10,
    })
}
