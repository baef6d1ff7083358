//! Stock keeping unit.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned for an empty SKU.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("sku cannot be empty")]
pub struct SkuError;

/// A canonical SKU: trimmed and upper-cased, never empty.
///
/// Two SKUs that differ only in case or surrounding whitespace are the same
/// SKU, which is what makes the store's uniqueness constraint case-insensitive.
///
/// ```
/// use inventory_core::Sku;
///
/// assert_eq!(Sku::parse(" ts-basic-blk ").unwrap().as_str(), "TS-BASIC-BLK");
/// assert!(Sku::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    /// Normalize and validate a SKU.
    ///
    /// # Errors
    ///
    /// Returns `SkuError` if nothing is left after trimming.
    pub fn parse(s: &str) -> Result<Self, SkuError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SkuError);
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Returns the SKU as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
