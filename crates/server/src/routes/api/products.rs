//! Product JSON API.
//!
//! ```text
//! GET    /api/products       - list, newest first
//! GET    /api/products/{id}  - one product
//! POST   /api/products       - create (201)
//! PUT    /api/products/{id}  - replace all fields
//! DELETE /api/products/{id}  - delete (204)
//! ```

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use inventory_core::{Product, ProductSubmission, validate_product_input};

use crate::error::Result;
use crate::routes::parse_product_id;
use crate::state::AppState;

/// Build the product API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list).post(create))
        .route("/api/products/{id}", get(show).put(update).delete(destroy))
}

/// GET /api/products
async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.products().list().await?))
}

/// GET /api/products/{id}
async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let id = parse_product_id(&id)?;
    Ok(Json(state.products().get(id).await?))
}

/// POST /api/products
async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ProductSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>)> {
    let Json(submission) = payload?;
    let product = validate_product_input(&submission)?;
    let created = state.products().create(&product).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/products/{id}
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ProductSubmission>, JsonRejection>,
) -> Result<Json<Product>> {
    let id = parse_product_id(&id)?;
    let Json(submission) = payload?;
    let product = validate_product_input(&submission)?;
    Ok(Json(state.products().update(id, &product).await?))
}

/// DELETE /api/products/{id}
async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    let id = parse_product_id(&id)?;
    state.products().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
