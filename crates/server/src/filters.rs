//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Swatch used when a color name cannot be shown as CSS.
const FALLBACK_SWATCH: &str = "#111827";

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns a CSS color for a product color name.
///
/// Hex codes and plain color keywords pass through; anything else becomes a
/// neutral swatch so free-form input never reaches a `style` attribute.
///
/// Usage in templates: `{{ product.color|swatch_color }}`
#[askama::filter_fn]
pub fn swatch_color(color: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(css_color(&color.to_string()))
}

fn css_color(color: &str) -> String {
    let color = color.trim();
    let is_hex = color
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()));
    let is_keyword = !color.is_empty() && color.chars().all(|c| c.is_ascii_alphabetic());

    if is_hex || is_keyword {
        color.to_ascii_lowercase()
    } else {
        FALLBACK_SWATCH.to_owned()
    }
}
