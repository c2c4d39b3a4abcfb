//! Alias resolution and redirect counting.

use std::sync::Arc;

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use serde_json::json;

/// Service behind the public redirect endpoint.
pub struct RedirectService<R: UrlRepository> {
    url_repository: Arc<R>,
}

impl<R: UrlRepository> RedirectService<R> {
    pub fn new(url_repository: Arc<R>) -> Self {
        Self { url_repository }
    }

    /// Resolves an alias to its long URL and counts the redirect.
    ///
    /// The counter update happens after resolution and never blocks the
    /// redirect: if the increment fails, the error is logged and the caller
    /// still gets the long URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the alias does not exist.
    /// Returns [`AppError::Internal`] on database errors during resolution.
    pub async fn resolve_and_count(&self, alias: &str) -> Result<String, AppError> {
        let url = self
            .url_repository
            .find_by_alias(alias)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short URL not found", json!({ "alias": alias }))
            })?;

        if let Err(e) = self.url_repository.increment_redirects(url.id).await {
            tracing::error!(error = %e, alias, "Failed to count redirect");
        }

        Ok(url.long_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShortUrl;
    use crate::domain::repositories::MockUrlRepository;
    use chrono::Utc;

    fn test_url(id: i64, alias: &str, long_url: &str) -> ShortUrl {
        ShortUrl {
            id,
            user_id: 7,
            long_url: long_url.to_string(),
            alias: alias.to_string(),
            redirects: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_resolve_counts_redirect() {
        let mut mock_repo = MockUrlRepository::new();

        let url = test_url(3, "abc123", "https://example.com/page");
        mock_repo
            .expect_find_by_alias()
            .withf(|alias| alias == "abc123")
            .times(1)
            .returning(move |_| Ok(Some(url.clone())));

        mock_repo
            .expect_increment_redirects()
            .withf(|id| *id == 3)
            .times(1)
            .returning(|_| Ok(true));

        let service = RedirectService::new(Arc::new(mock_repo));

        let result = service.resolve_and_count("abc123").await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "https://example.com/page");
    }

    #[tokio::test]
    async fn test_resolve_unknown_alias() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_alias()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo.expect_increment_redirects().times(0);

        let service = RedirectService::new(Arc::new(mock_repo));

        let result = service.resolve_and_count("missing").await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_survives_count_failure() {
        let mut mock_repo = MockUrlRepository::new();

        let url = test_url(3, "abc123", "https://example.com/page");
        mock_repo
            .expect_find_by_alias()
            .times(1)
            .returning(move |_| Ok(Some(url.clone())));

        mock_repo
            .expect_increment_redirects()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = RedirectService::new(Arc::new(mock_repo));

        // The redirect must still be served when counting fails.
        let result = service.resolve_and_count("abc123").await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "https://example.com/page");
    }
}
