//! Authentication middleware and extractors.
//!
//! A session is either anonymous or holds a [`CurrentUser`]. Logging in
//! stores the identity and pins the session expiry; logging out or reaching
//! that expiry returns it to anonymous.

use axum::{
    extract::{FromRequestParts, OriginalUri, Request},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::{Expiry, Session, cookie::time};

use crate::error::AppError;
use crate::models::{CurrentUser, session_keys};

/// Extractor that requires an authenticated session.
///
/// If the user is not logged in, API requests get `401 {"error": ...}` and
/// page requests are redirected to `/login`.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when authentication is required but the user is not logged in.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Unauthorized => AppError::Unauthorized.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Nested routers see a stripped URI; decide on the one the client sent.
        let is_api = parts
            .extensions
            .get::<OriginalUri>()
            .map_or_else(|| parts.uri.path(), |uri| uri.0.path())
            .starts_with("/api/");
        let rejection = || {
            if is_api {
                AuthRejection::Unauthorized
            } else {
                AuthRejection::RedirectToLogin
            }
        };

        let session = parts.extensions.get::<Session>().ok_or_else(rejection)?;
        let user = current_user(session).await.ok_or_else(rejection)?;

        Ok(Self(user))
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request if the user is not logged in.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => current_user(session).await,
            None => None,
        };

        Ok(Self(user))
    }
}

/// Route layer that stops unauthenticated requests before any handler runs.
///
/// The authenticated [`CurrentUser`] is made available to handlers as a
/// request extension.
///
/// ```rust,ignore
/// Router::new()
///     .route("/api/products", get(list))
///     .route_layer(axum::middleware::from_fn(require_auth))
/// ```
pub async fn require_auth(
    RequireAuth(user): RequireAuth,
    mut request: Request,
    next: Next,
) -> Response {
    tracing::Span::current().record("user_id", user.id.as_i64());
    request.extensions_mut().insert(user);
    next.run(request).await
}

/// Identity bound to a still-valid session, if any.
///
/// Expired sessions are never loaded by the store, so they read as anonymous.
pub async fn current_user(session: &Session) -> Option<CurrentUser> {
    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

/// Bind `user` to the session for `ttl_seconds` from now.
///
/// The session ID is replaced first so a token handed out before login
/// cannot be reused after it.
///
/// # Errors
///
/// Returns an error if the session store cannot be updated.
pub async fn start_session(
    session: &Session,
    user: &CurrentUser,
    ttl_seconds: i64,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await?;
    session.set_expiry(Some(Expiry::AtDateTime(
        time::OffsetDateTime::now_utc() + time::Duration::seconds(ttl_seconds),
    )));
    Ok(())
}

/// Destroy the session. Safe to call on an anonymous or expired session.
///
/// # Errors
///
/// Returns an error if the session store cannot be updated.
pub async fn end_session(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use inventory_core::{Email, UserId};
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn admin() -> CurrentUser {
        CurrentUser {
            id: UserId::new(1),
            email: Email::parse("admin@example.com").unwrap(),
            name: None,
        }
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let session = session();
        assert!(current_user(&session).await.is_none());

        start_session(&session, &admin(), 60).await.unwrap();
        assert_eq!(current_user(&session).await, Some(admin()));
        assert!(matches!(session.expiry(), Some(Expiry::AtDateTime(_))));

        end_session(&session).await.unwrap();
        assert!(current_user(&session).await.is_none());
        end_session(&session).await.unwrap();
    }

    #[test]
    fn test_rejection_responses() {
        let api = AuthRejection::Unauthorized.into_response();
        assert_eq!(api.status(), StatusCode::UNAUTHORIZED);

        let page = AuthRejection::RedirectToLogin.into_response();
        assert_eq!(page.status(), StatusCode::SEE_OTHER);
        assert_eq!(page.headers()["location"], "/login");
    }
}
