//! Session API for script and SPA clients.
//!
//! ```text
//! GET  /api/auth/me      - {"user": {...} | null}
//! POST /api/auth/login   - {"email", "password"} -> {"ok": true} + session cookie
//! POST /api/auth/logout  - {"ok": true}
//! ```

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAuth, end_session, start_session};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Build the session API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
}

/// GET /api/auth/me
///
/// The identity is re-read from the store, so a deleted account reads as
/// `null` even while its session lives on.
async fn me(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<Json<Value>> {
    let user = match user {
        Some(user) => state.users().get_by_id(user.id).await?.map(CurrentUser::from),
        None => None,
    };
    Ok(Json(json!({ "user": user })))
}

/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(request) = payload?;
    let (Some(email), Some(password)) = (
        request.email.filter(|e| !e.trim().is_empty()),
        request.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::BadRequest(
            "Email and password are required.".to_owned(),
        ));
    };

    let user = state.auth().login(&email, &password).await.inspect_err(|e| {
        tracing::warn!(error = %e, "Login failed");
    })?;

    let current = CurrentUser::from(user);
    start_session(&session, &current, state.config().session_ttl_seconds).await?;
    set_sentry_user(&current.id, Some(current.email.as_str()));

    Ok(Json(json!({ "ok": true })))
}

/// POST /api/auth/logout
async fn logout(session: Session) -> Result<Json<Value>> {
    end_session(&session).await?;
    clear_sentry_user();
    Ok(Json(json!({ "ok": true })))
}
