//! Non-negative product price backed by decimal arithmetic.
//!
//! Prices are validated and compared as [`Decimal`] values. The JSON
//! representation is a plain number (`19.99`), and the SQLite column is a
//! `REAL`, so conversions to and from `f64` go through the shortest decimal
//! string to avoid binary noise such as `19.989999999999998`.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Currency every price in the shop is quoted in.
pub const CURRENCY: &str = "PLN";

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input could not be read as a number.
    #[error("price is not a number")]
    NotANumber,
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A price in the shop currency. Always `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount.normalize()))
    }

    /// Parse a price from text such as `"19.99"`, `" 20 "` or `"1e2"`.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::NotANumber` for non-numeric input and
    /// `PriceError::Negative` for amounts below zero.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        Self::new(parse_decimal(s).ok_or(PriceError::NotANumber)?)
    }

    /// Build a price from a value read out of a `REAL` column.
    ///
    /// # Errors
    ///
    /// Returns an error for non-finite or negative values.
    pub fn from_f64(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::NotANumber);
        }
        // `f64`'s Display is the shortest string that round-trips.
        Self::parse(&value.to_string())
    }

    /// The amount as `f64`, for binding into a `REAL` column.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    /// Format for display, e.g. `19.99 PLN`.
    #[must_use]
    pub fn display(self) -> String {
        format!("{:.2} {CURRENCY}", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Read a decimal from text, accepting plain and scientific notation.
///
/// Only digits, a sign, a decimal point and an exponent marker are allowed,
/// so digit separators such as `1_000` are not numbers.
pub(crate) fn parse_decimal(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty()
        || !trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}
