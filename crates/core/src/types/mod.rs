//! Core types for the inventory.
//!
//! This module provides type-safe wrappers for the catalog's domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod size;
pub mod sku;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Price, PriceError};
pub use size::{Size, SizeError};
pub use sku::{Sku, SkuError};
