//! Responses for paths no route or static file claims.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::OriginalUri,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::filters;

/// Not found page template.
#[derive(Template, WebTemplate)]
#[template(path = "errors/not_found.html")]
pub struct NotFoundTemplate {
    pub path: String,
}

/// Answer an unknown path with a 404.
///
/// API clients get `{"error": "Endpoint <path> does not exist."}`; browsers
/// get an HTML page.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> Response {
    let path = uri.path();
    if path == "/api" || path.starts_with("/api/") {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Endpoint {path} does not exist.") })),
        )
            .into_response();
    }

    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            path: path.to_owned(),
        },
    )
        .into_response()
}
