//! Alias generation and validation utilities.
//!
//! Generated aliases are uniform random draws from a fixed alphabet. The
//! generator makes no uniqueness promise; the database unique constraint on
//! `urls.alias` is the only collision arbiter.

use crate::error::AppError;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};

/// Alphabet for generated aliases.
const ALIAS_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Default length of generated aliases.
pub const DEFAULT_ALIAS_LENGTH: usize = 6;

/// Aliases that would shadow mounted routes.
const RESERVED_ALIASES: &[&str] = &["api", "auth", "health", "url", "user", "admin"];

/// Generates a random alias of the given length.
///
/// Draws characters independently and uniformly from lowercase letters and
/// digits. The generator is reseeded from the current time on every call; it
/// is not cryptographically secure and does not need to be, since aliases
/// carry no authority.
///
/// # Examples
///
/// ```ignore
/// let alias = generate_alias(6);
/// assert_eq!(alias.len(), 6);
/// assert!(alias.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
/// ```
pub fn generate_alias(length: usize) -> String {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();

    let mut rng = StdRng::seed_from_u64(seed);

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..ALIAS_CHARSET.len());
            ALIAS_CHARSET[idx] as char
        })
        .collect()
}

/// Validates a user-chosen alias.
///
/// # Rules
///
/// - Length: 3-64 characters
/// - Allowed characters: lowercase letters, digits, hyphens
/// - Cannot start or end with a hyphen
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    if alias.len() < 3 || alias.len() > 64 {
        return Err(AppError::bad_request(
            "Alias must be 3-64 characters",
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !alias
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AppError::bad_request(
            "Alias can only contain lowercase letters, digits, and hyphens",
            json!({ "alias": alias }),
        ));
    }

    if alias.starts_with('-') || alias.ends_with('-') {
        return Err(AppError::bad_request(
            "Alias cannot start or end with a hyphen",
            json!({ "alias": alias }),
        ));
    }

    if RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
