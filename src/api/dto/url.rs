//! DTOs for short URL management endpoints.

use crate::domain::entities::{ShortUrl, ShortUrlPatch};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a short URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    /// The long URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional custom alias. Generated when absent or empty; otherwise
    /// checked against the alias rules.
    pub alias: Option<String>,
}

/// Partial update for a short URL.
///
/// Absent and empty fields keep their current values.
#[derive(Debug, Deserialize)]
pub struct UpdateUrlRequest {
    pub url: Option<String>,
    pub alias: Option<String>,
}

impl From<UpdateUrlRequest> for ShortUrlPatch {
    fn from(request: UpdateUrlRequest) -> Self {
        Self {
            long_url: request.url,
            alias: request.alias,
        }
    }
}

/// A short URL as returned to its owner.
#[derive(Debug, Serialize)]
pub struct ShortUrlResponse {
    pub id: i64,
    pub url: String,
    pub alias: String,
    pub redirects: i64,
}

impl From<ShortUrl> for ShortUrlResponse {
    fn from(short_url: ShortUrl) -> Self {
        Self {
            id: short_url.id,
            url: short_url.long_url,
            alias: short_url.alias,
            redirects: short_url.redirects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_create_request() {
        let request = CreateUrlRequest {
            url: "https://example.com/page".to_string(),
            alias: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_relative_url() {
        let request = CreateUrlRequest {
            url: "/relative/path".to_string(),
            alias: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_request_maps_to_patch() {
        let request = UpdateUrlRequest {
            url: Some("https://example.com/new".to_string()),
            alias: None,
        };

        let patch: ShortUrlPatch = request.into();
        assert_eq!(patch.long_url.as_deref(), Some("https://example.com/new"));
        assert!(patch.alias.is_none());
    }
}
