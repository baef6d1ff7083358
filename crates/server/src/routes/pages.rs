//! Server-rendered product pages.
//!
//! One page lists the catalog and carries a form that either adds a product
//! or, with `?edit=<id>`, edits an existing one. Writes answer with a redirect
//! back to `/` or, on failure, a plain-text message with a 4xx status.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::Redirect,
    routing::{get, post},
};
use inventory_core::{Product, ProductSubmission, Size, validate_product_input};
use serde::Deserialize;

use crate::db::RepositoryError;
use crate::error::PageError;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::parse_product_id;
use crate::state::AppState;

/// Stock at or below this level is highlighted.
const LOW_STOCK_THRESHOLD: i64 = 5;

/// Build the product pages router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/add", post(add))
        .route("/update/{id}", post(update))
        .route("/delete/{id}", post(delete))
}

// =============================================================================
// View Types
// =============================================================================

/// Product row as displayed in the table.
#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub price: String,
    pub size: &'static str,
    pub color: String,
    pub quantity: i64,
    pub qty_class: &'static str,
    pub brand: String,
    pub category: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            sku: product.sku.to_string(),
            price: product.price.display(),
            size: product.size.as_str(),
            color: product.color.clone().unwrap_or_default(),
            quantity: product.quantity,
            qty_class: qty_class(product.quantity),
            brand: product.brand.clone().unwrap_or_default(),
            category: product.category.clone().unwrap_or_default(),
        }
    }
}

/// One `<option>` of the size select.
#[derive(Debug, Clone)]
pub struct SizeOption {
    pub value: &'static str,
    pub selected: bool,
}

/// The add/edit form, pre-filled when editing.
#[derive(Debug, Clone)]
pub struct ProductForm {
    pub action: String,
    pub editing_id: Option<i64>,
    pub name: String,
    pub sku: String,
    pub price: String,
    pub size_options: Vec<SizeOption>,
    pub color: String,
    pub quantity: String,
    pub brand: String,
    pub category: String,
}

impl ProductForm {
    fn size_options(selected: Option<Size>) -> Vec<SizeOption> {
        Size::ALL
            .iter()
            .map(|size| SizeOption {
                value: size.as_str(),
                selected: Some(*size) == selected,
            })
            .collect()
    }

    fn blank() -> Self {
        Self {
            action: "/add".to_owned(),
            editing_id: None,
            name: String::new(),
            sku: String::new(),
            price: String::new(),
            size_options: Self::size_options(None),
            color: String::new(),
            quantity: "0".to_owned(),
            brand: String::new(),
            category: String::new(),
        }
    }

    fn editing(product: &Product) -> Self {
        Self {
            action: format!("/update/{}", product.id),
            editing_id: Some(product.id.as_i64()),
            name: product.name.clone(),
            sku: product.sku.to_string(),
            price: product.price.to_string(),
            size_options: Self::size_options(Some(product.size)),
            color: product.color.clone().unwrap_or_default(),
            quantity: product.quantity.to_string(),
            brand: product.brand.clone().unwrap_or_default(),
            category: product.category.clone().unwrap_or_default(),
        }
    }
}

/// Product list page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsTemplate {
    pub user_email: Option<String>,
    pub form: ProductForm,
    pub products: Vec<ProductRow>,
}

/// Query parameters for the list page.
#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub edit: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Render the product table and form.
///
/// GET /
async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<IndexQuery>,
) -> Result<ProductsTemplate, PageError> {
    let products = state.products().list().await?;

    // An unusable or stale `edit` id just shows the blank form.
    let editing = match query.edit.as_deref().map(parse_product_id) {
        Some(Ok(id)) => match state.products().get(id).await {
            Ok(product) => Some(product),
            Err(RepositoryError::NotFound) => None,
            Err(e) => return Err(e.into()),
        },
        _ => None,
    };

    Ok(ProductsTemplate {
        user_email: user.map(|u| u.email.into_inner()),
        form: editing.as_ref().map_or_else(ProductForm::blank, ProductForm::editing),
        products: products.iter().map(ProductRow::from).collect(),
    })
}

/// Create a product from the form.
///
/// POST /add
async fn add(
    State(state): State<AppState>,
    Form(submission): Form<ProductSubmission>,
) -> Result<Redirect, PageError> {
    let product = validate_product_input(&submission)?;
    state.products().create(&product).await?;
    Ok(Redirect::to("/"))
}

/// Replace a product from the form.
///
/// POST /update/{id}
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(submission): Form<ProductSubmission>,
) -> Result<Redirect, PageError> {
    let id = parse_product_id(&id)?;
    let product = validate_product_input(&submission)?;
    state.products().update(id, &product).await?;
    Ok(Redirect::to("/"))
}

/// Delete a product.
///
/// POST /delete/{id}
async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, PageError> {
    let id = parse_product_id(&id)?;
    state.products().delete(id).await?;
    Ok(Redirect::to("/"))
}

/// CSS class for a stock level.
fn qty_class(quantity: i64) -> &'static str {
    match quantity {
        ..=0 => "zero",
        1..=LOW_STOCK_THRESHOLD => "low",
        _ => "ok",
    }
}
