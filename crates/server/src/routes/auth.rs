//! Login page and form handlers.
//!
//! Mounted only when authentication is enabled. Failures redirect back to
//! the login page with an `error` code that the template turns into a message.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, end_session, start_session};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Build the login page router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
}

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
///
/// Fields are optional so an incomplete form gets a message instead of a
/// form rejection.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
}

/// Message for a login error code.
fn error_message(code: &str) -> Option<&'static str> {
    match code {
        "credentials" => Some("Invalid email or password."),
        "missing" => Some("Email and password are required."),
        "session" => Some("Could not start a session. Please try again."),
        _ => None,
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
///
/// GET /login
async fn login_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }

    LoginTemplate {
        error: query.error.as_deref().and_then(error_message),
    }
    .into_response()
}

/// Handle login form submission.
///
/// POST /login
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let email = form.email.as_deref().map(str::trim).unwrap_or_default();
    let password = form.password.as_deref().unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Redirect::to("/login?error=missing").into_response();
    }

    let user = match state.auth().login(email, password).await {
        Ok(user) => CurrentUser::from(user),
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            return Redirect::to("/login?error=credentials").into_response();
        }
    };

    if let Err(e) = start_session(&session, &user, state.config().session_ttl_seconds).await {
        tracing::error!("Failed to set session: {}", e);
        return Redirect::to("/login?error=session").into_response();
    }
    set_sentry_user(&user.id, Some(user.email.as_str()));

    Redirect::to("/").into_response()
}

/// Log out and return to the login page.
///
/// POST /logout
async fn logout(session: Session) -> Redirect {
    if let Err(e) = end_session(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }
    clear_sentry_user();
    Redirect::to("/login")
}
