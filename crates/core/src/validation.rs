//! Product input validation.
//!
//! Both front ends (JSON API and HTML forms) deserialize their request body
//! into a [`ProductSubmission`] and hand it to [`validate_product_input`],
//! which either produces a [`ValidatedProduct`] or explains what is wrong.
//! Nothing here performs I/O; SKU uniqueness is the store's job.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. required fields present (`name`, `sku`, `price`, `size`, `quantity`)
//! 2. price is a number `>= 0`
//! 3. size is one of `XS, S, M, L, XL` (case-insensitive)
//! 4. quantity is a whole number `>= 0`
//!
//! An unknown size is always rejected, never coerced to a default.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::product::ValidatedProduct;
use crate::types::price::parse_decimal;
use crate::types::{Price, Size, Sku};

/// Reasons a submission is rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields were omitted, null, or blank.
    #[error("Missing required fields: {}.", .0.join(", "))]
    MissingField(Vec<&'static str>),

    /// Price is not a number or is negative.
    #[error("Invalid price.")]
    InvalidPrice,

    /// Size is not one of the known sizes.
    #[error("Invalid size. Allowed: XS, S, M, L, XL.")]
    InvalidSize,

    /// Quantity is not a whole number or is negative.
    #[error("Invalid quantity.")]
    InvalidQuantity,
}

/// A single submitted value.
///
/// JSON clients send numbers as numbers, HTML forms send everything as text;
/// both are accepted wherever a number is expected.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawField {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl RawField {
    /// Textual form of the value, trimmed.
    fn text(&self) -> String {
        match self {
            Self::Text(s) => s.trim().to_owned(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }

    /// Whether the value carries nothing (blank text).
    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }

    /// Numeric reading of the value, if it has one.
    fn decimal(&self) -> Option<Decimal> {
        match self {
            Self::Text(s) => parse_decimal(s),
            // `Number`'s Display is the shortest round-trip form, e.g. `19.99`.
            Self::Number(n) => parse_decimal(&n.to_string()),
            Self::Bool(_) => None,
        }
    }
}

impl From<&str> for RawField {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i64> for RawField {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for RawField {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value).map_or_else(|| Self::Text(value.to_string()), Self::Number)
    }
}

/// Raw product fields as submitted by a client. Every field is optional here;
/// [`validate_product_input`] decides what is required.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProductSubmission {
    pub name: Option<RawField>,
    pub sku: Option<RawField>,
    pub price: Option<RawField>,
    pub size: Option<RawField>,
    pub color: Option<RawField>,
    pub quantity: Option<RawField>,
    pub brand: Option<RawField>,
    pub category: Option<RawField>,
}

/// Validate and normalize a raw submission.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered, in the order described
/// in the module documentation.
pub fn validate_product_input(
    raw: &ProductSubmission,
) -> Result<ValidatedProduct, ValidationError> {
    let name = present(raw.name.as_ref());
    let sku = present(raw.sku.as_ref());
    let price = present(raw.price.as_ref());
    let size = present(raw.size.as_ref());
    let quantity = present(raw.quantity.as_ref());

    let (Some(name), Some(sku), Some(price), Some(size), Some(quantity)) =
        (name, sku, price, size, quantity)
    else {
        let missing = [
            ("name", name.is_none()),
            ("sku", sku.is_none()),
            ("price", price.is_none()),
            ("size", size.is_none()),
            ("quantity", quantity.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();
        return Err(ValidationError::MissingField(missing));
    };

    let price = price
        .decimal()
        .and_then(|amount| Price::new(amount).ok())
        .ok_or(ValidationError::InvalidPrice)?;

    let size: Size = size
        .text()
        .parse()
        .map_err(|_| ValidationError::InvalidSize)?;

    let quantity = quantity
        .decimal()
        .filter(|q| q.fract().is_zero() && !(q.is_sign_negative() && !q.is_zero()))
        .and_then(|q| q.to_i64())
        .ok_or(ValidationError::InvalidQuantity)?;

    let sku = Sku::parse(&sku.text()).map_err(|_| ValidationError::MissingField(vec!["sku"]))?;

    Ok(ValidatedProduct {
        name: name.text(),
        sku,
        price,
        size,
        color: optional_text(raw.color.as_ref()),
        quantity,
        brand: optional_text(raw.brand.as_ref()),
        category: optional_text(raw.category.as_ref()),
    })
}

/// A required field counts as present unless absent, null, or blank.
fn present(value: Option<&RawField>) -> Option<&RawField> {
    value.filter(|v| !v.is_blank())
}

/// Trim an optional text field; blank becomes `None`.
fn optional_text(value: Option<&RawField>) -> Option<String> {
    value.map(RawField::text).filter(|s| !s.is_empty())
}
