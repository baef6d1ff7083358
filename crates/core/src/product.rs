//! The catalog entity.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId, Size, Sku};

/// A product as stored in the catalog.
///
/// Serializes to the flat JSON object served by the API:
/// `{id, name, sku, price, size, color, quantity, brand, category}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub sku: Sku,
    pub price: Price,
    pub size: Size,
    pub color: Option<String>,
    pub quantity: i64,
    pub brand: Option<String>,
    pub category: Option<String>,
}

impl Product {
    /// The mutable fields of this product, without its id.
    #[must_use]
    pub fn fields(&self) -> ValidatedProduct {
        ValidatedProduct {
            name: self.name.clone(),
            sku: self.sku.clone(),
            price: self.price,
            size: self.size,
            color: self.color.clone(),
            quantity: self.quantity,
            brand: self.brand.clone(),
            category: self.category.clone(),
        }
    }
}

/// A fully normalized product, ready to be written to the store.
///
/// Only [`validate_product_input`](crate::validate_product_input) produces
/// these from user input, so holding one means every field already satisfies
/// the catalog's rules: trimmed non-empty name, canonical SKU, non-negative
/// price and quantity, a known size, and blank optional text mapped to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedProduct {
    pub name: String,
    pub sku: Sku,
    pub price: Price,
    pub size: Size,
    pub color: Option<String>,
    pub quantity: i64,
    pub brand: Option<String>,
    pub category: Option<String>,
}
