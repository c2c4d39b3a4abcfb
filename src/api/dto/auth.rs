//! DTOs for signup, login, and token refresh endpoints.

use crate::domain::entities::TokenPair;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for username validation.
static USERNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").unwrap());

/// Request to create an account.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    /// Display handle, 3-20 word characters.
    #[validate(length(min = 3, max = 20))]
    #[validate(regex(
        path = "*USERNAME_REGEX",
        message = "Username can only contain letters, digits, and underscores"
    ))]
    pub username: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Request to open a session.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token pair returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Minimal acknowledgement body for logout and delete endpoints.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(email: &str, username: &str, password: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_signup() {
        assert!(
            signup("alice@example.com", "alice_42", "secret123")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_signup_bad_email() {
        assert!(signup("not-an-email", "alice", "secret123").validate().is_err());
    }

    #[test]
    fn test_signup_short_username() {
        assert!(
            signup("alice@example.com", "al", "secret123")
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_signup_username_with_spaces() {
        assert!(
            signup("alice@example.com", "alice smith", "secret123")
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_signup_short_password() {
        assert!(
            signup("alice@example.com", "alice", "short")
                .validate()
                .is_err()
        );
    }
}
