//! Access and refresh token issuance.
//!
//! Access tokens are HS256-signed JWTs verified statelessly by the auth
//! middleware. Refresh tokens are opaque random strings whose only meaning is
//! the session record stored under them.

use crate::domain::entities::TokenPair;
use crate::error::AppError;
use base64::Engine as _;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Length of random bytes behind an opaque refresh token.
const REFRESH_TOKEN_BYTES: usize = 32;

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user's database id.
    pub sub: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Issues and verifies the token pair handed out at login and refresh.
#[derive(Clone)]
pub struct TokenManager {
    secret: String,
    access_ttl_secs: i64,
}

impl TokenManager {
    pub fn new(secret: impl Into<String>, access_ttl_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            access_ttl_secs,
        }
    }

    /// Issues a fresh access/refresh pair for the given user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if JWT signing or the system RNG fails.
    pub fn issue_pair(&self, user_id: i64) -> Result<TokenPair, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            exp: now + self.access_ttl_secs,
            iat: now,
        };

        let access_token = encode(
            &Header::default(), // HS256
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to sign access token");
            AppError::internal("Failed to issue tokens", json!({}))
        })?;

        Ok(TokenPair {
            access_token,
            refresh_token: generate_refresh_token()?,
        })
    }

    /// Verifies an access token and returns its claims.
    ///
    /// Every failure maps to the same generic unauthorized error so callers
    /// cannot distinguish forged from expired tokens.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the signature is invalid or the
    /// token has expired.
    pub fn verify_access(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(), // HS256, validates exp
        )
        .map(|data| data.claims)
        .map_err(|_| AppError::unauthorized("Invalid or expired access token", json!({})))
    }
}

/// Generates an opaque random refresh token.
///
/// 32 bytes of OS entropy encoded as URL-safe base64 without padding. The
/// result is a 43-character string safe to carry in a cookie.
fn generate_refresh_token() -> Result<String, AppError> {
    let mut buffer = [0u8; REFRESH_TOKEN_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        tracing::error!(error = %e, "System RNG failure");
        AppError::internal("Failed to issue tokens", json!({}))
    })?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn test_manager() -> TokenManager {
        TokenManager::new("test-secret-that-is-long-enough-for-hmac", 900)
    }

    #[test]
    fn test_issue_and_verify_access_token() {
        let manager = test_manager();
        let pair = manager.issue_pair(42).expect("issuing should succeed");

        let claims = manager
            .verify_access(&pair.access_token)
            .expect("verification should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_expired_token_fails() {
        let manager = test_manager();

        // Manually build an already-expired token.
        // Use a margin well beyond the default 60-second leeway.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            exp: now - 300,
            iat: now - 600,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret-that-is-long-enough-for-hmac".as_bytes()),
        )
        .expect("encoding should succeed");

        let result = manager.verify_access(&token);
        assert!(result.is_err(), "expired token must fail verification");
    }

    #[test]
    fn test_different_secrets_fail() {
        let alpha = TokenManager::new("secret-alpha", 900);
        let bravo = TokenManager::new("secret-bravo", 900);

        let pair = alpha.issue_pair(1).expect("issuing should succeed");

        let result = bravo.verify_access(&pair.access_token);
        assert!(
            result.is_err(),
            "token signed with a different secret must fail"
        );
    }

    #[test]
    fn test_garbage_token_fails() {
        let manager = test_manager();

        assert!(manager.verify_access("not-a-jwt").is_err());
        assert!(manager.verify_access("").is_err());
    }

    #[test]
    fn test_refresh_token_shape() {
        let pair = test_manager().issue_pair(1).expect("issuing should succeed");

        assert_eq!(pair.refresh_token.len(), 43);
        assert!(!pair.refresh_token.contains('='));
        assert!(
            pair.refresh_token
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_refresh_tokens_are_unique() {
        let manager = test_manager();
        let mut tokens = HashSet::new();

        for _ in 0..100 {
            let pair = manager.issue_pair(1).expect("issuing should succeed");
            tokens.insert(pair.refresh_token);
        }

        assert_eq!(tokens.len(), 100);
    }
}
