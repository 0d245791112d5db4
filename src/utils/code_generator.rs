//! Short code generation and validation utilities.
//!
//! Generated codes and caller-supplied codes obey the same format rule:
//! 4 to 10 ASCII letters or digits.

use crate::error::AppError;
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of generated codes.
pub const GENERATED_CODE_LENGTH: usize = 6;

pub const MIN_CODE_LENGTH: usize = 4;
pub const MAX_CODE_LENGTH: usize = 10;

/// Path segments served by fixed routes; a link under one of these names
/// could never be redirected to. Matched case-sensitively, like routing.
pub const RESERVED_CODES: &[&str] = &["health", "shorturls"];

/// Compiled format rule for short codes.
pub static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{4,10}$").unwrap());

/// Draws a random 6-character alphanumeric code.
///
/// Purely a random draw: uniqueness is the caller's concern.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(is_valid_code(&code));
/// ```
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Returns true iff `code` matches `^[A-Za-z0-9]{4,10}$`.
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

/// Returns true if `code` collides with a fixed route.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Validates a caller-supplied short code.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the code is not 4-10 alphanumeric
/// characters or is reserved.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_code("promo2025").is_ok());
/// assert!(validate_code("ab").is_err());         // Too short
/// assert!(validate_code("my-link").is_err());    // Hyphen
/// assert!(validate_code("health").is_err());     // Reserved
/// ```
pub fn validate_code(code: &str) -> Result<(), AppError> {
    if !is_valid_code(code) {
        return Err(AppError::bad_request(
            "Invalid shortcode format. Must be alphanumeric 4-10 chars.",
            json!({
                "shortcode": code,
                "min_length": MIN_CODE_LENGTH,
                "max_length": MAX_CODE_LENGTH,
            }),
        ));
    }

    if is_reserved_code(code) {
        return Err(AppError::bad_request(
            "This shortcode is reserved",
            json!({ "shortcode": code }),
        ));
    }

    Ok(())
}
