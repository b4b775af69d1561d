//! US postal code checks used before any geocoder call.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::QueryError;

static US_POSTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("valid regex"));

/// Trim `raw` and reject it if nothing is left.
///
/// # Errors
///
/// Returns [`QueryError::EmptyPostalCode`] for blank input.
pub fn normalize_postal_code(raw: &str) -> Result<&str, QueryError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(QueryError::EmptyPostalCode);
    }
    Ok(trimmed)
}

/// `12345` or `12345-6789`.
#[must_use]
pub fn is_us_postal_code(candidate: &str) -> bool {
    US_POSTAL_RE.is_match(candidate)
}

/// Trim, reject blanks, and optionally enforce the US format.
///
/// # Errors
///
/// Returns [`QueryError::EmptyPostalCode`] or, when `strict` is set,
/// [`QueryError::InvalidPostalCode`].
pub fn validate_postal_code(raw: &str, strict: bool) -> Result<&str, QueryError> {
    let trimmed = normalize_postal_code(raw)?;
    if strict && !is_us_postal_code(trimmed) {
        return Err(QueryError::InvalidPostalCode(trimmed.to_string()));
    }
    Ok(trimmed)
}
