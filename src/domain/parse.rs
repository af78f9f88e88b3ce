//! Permissive numeric coercion for user-entered values.
//!
//! Unparseable or negative input becomes zero instead of an error so that
//! data entry is never interrupted. Callers must not replace this with
//! strict validation.

/// Coerce a raw money amount to a non-negative `f64`. Accepts a comma as
/// decimal separator.
pub fn coerce_amount(raw: &str) -> f64 {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

/// Coerce a raw occurrence count to a non-negative integer.
pub fn coerce_count(raw: &str) -> u32 {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|v| *v >= 0)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}
