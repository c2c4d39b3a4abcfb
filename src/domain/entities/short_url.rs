//! Short URL entity representing an alias to long-URL mapping.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A stored alias mapping with its redirect counter.
///
/// `alias` is globally unique; the database constraint is the single source
/// of truth for uniqueness. `redirects` only ever grows.
#[derive(Debug, Clone, FromRow)]
pub struct ShortUrl {
    pub id: i64,
    pub user_id: i64,
    pub long_url: String,
    pub alias: String,
    pub redirects: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a new short URL.
#[derive(Debug, Clone)]
pub struct NewShortUrl {
    pub user_id: i64,
    pub long_url: String,
    pub alias: String,
}

/// Partial update for an existing short URL.
///
/// `None` fields are left unchanged. Empty strings are normalized to `None`
/// before reaching the repository.
#[derive(Debug, Clone, Default)]
pub struct ShortUrlPatch {
    pub long_url: Option<String>,
    pub alias: Option<String>,
}

impl ShortUrlPatch {
    /// Returns true when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.long_url.is_none() && self.alias.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_short_url_construction() {
        let now = Utc::now();
        let url = ShortUrl {
            id: 1,
            user_id: 7,
            long_url: "https://example.com".to_string(),
            alias: "abc123".to_string(),
            redirects: 0,
            created_at: now,
            updated_at: now,
        };

        assert_eq!(url.alias, "abc123");
        assert_eq!(url.redirects, 0);
        assert_eq!(url.created_at, url.updated_at);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ShortUrlPatch::default().is_empty());

        let patch = ShortUrlPatch {
            long_url: Some("https://example.com".to_string()),
            alias: None,
        };
        assert!(!patch.is_empty());
    }
}
