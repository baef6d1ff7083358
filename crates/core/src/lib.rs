//! Inventory Core - domain types and validation for the clothing inventory.
//!
//! This crate is shared by every inventory component:
//! - `server` - HTML and JSON front ends over the product store
//! - `cli` - Command-line tools for schema migration, users and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Everything that touches storage lives in the server crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, SKUs, prices, sizes and emails
//! - [`product`] - The catalog entity and its normalized, ready-to-store form
//! - [`validation`] - Turns a raw submission into a [`ValidatedProduct`]

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod product;
pub mod types;
pub mod validation;

pub use product::{Product, ValidatedProduct};
pub use types::*;
pub use validation::{ProductSubmission, RawField, ValidationError, validate_product_input};
