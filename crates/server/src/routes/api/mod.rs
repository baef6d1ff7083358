//! JSON API routes.

pub mod auth;
pub mod products;
