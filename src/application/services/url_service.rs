//! Short URL creation and management service.

use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl, ShortUrlPatch};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::alias::{generate_alias, validate_custom_alias};
use serde_json::json;
use url::Url;

/// Service for creating, updating, deleting, and listing short URLs.
///
/// Alias uniqueness is enforced by the database constraint alone. There is no
/// pre-insert existence check; a collision surfaces as a conflict, whether the
/// alias was chosen by the caller or drawn by the generator.
pub struct UrlService<R: UrlRepository> {
    url_repository: Arc<R>,
    alias_length: usize,
}

impl<R: UrlRepository> UrlService<R> {
    /// Creates a new URL service.
    ///
    /// `alias_length` is the length of generated aliases.
    pub fn new(url_repository: Arc<R>, alias_length: usize) -> Self {
        Self {
            url_repository,
            alias_length,
        }
    }

    /// Creates a short URL owned by `user_id`.
    ///
    /// The long URL is stored exactly as given; it is validated but never
    /// rewritten. An empty custom alias is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute
    /// http(s) URL or the custom alias is malformed.
    ///
    /// Returns [`AppError::Conflict`] if the alias is already taken.
    pub async fn create(
        &self,
        user_id: i64,
        long_url: String,
        custom_alias: Option<String>,
    ) -> Result<ShortUrl, AppError> {
        validate_long_url(&long_url)?;

        let alias = match custom_alias.filter(|a| !a.is_empty()) {
            Some(custom) => {
                validate_custom_alias(&custom)?;
                custom
            }
            None => generate_alias(self.alias_length),
        };

        let new_url = NewShortUrl {
            user_id,
            long_url,
            alias,
        };

        self.url_repository.create(new_url).await
    }

    /// Applies a partial update to a short URL owned by `user_id`.
    ///
    /// Absent and empty fields keep their current values. Updating with an
    /// empty patch still succeeds and returns the current row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no such URL exists,
    /// [`AppError::Forbidden`] if it belongs to someone else,
    /// [`AppError::Validation`] if a new value is malformed, and
    /// [`AppError::Conflict`] if the new alias is already taken.
    pub async fn update(
        &self,
        user_id: i64,
        url_id: i64,
        patch: ShortUrlPatch,
    ) -> Result<ShortUrl, AppError> {
        self.find_owned(user_id, url_id).await?;

        // Empty strings mean "leave unchanged", same as absent fields.
        let patch = ShortUrlPatch {
            long_url: patch.long_url.filter(|u| !u.is_empty()),
            alias: patch.alias.filter(|a| !a.is_empty()),
        };

        if let Some(long_url) = &patch.long_url {
            validate_long_url(long_url)?;
        }
        if let Some(alias) = &patch.alias {
            validate_custom_alias(alias)?;
        }

        self.url_repository
            .update(url_id, patch)
            .await?
            .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "id": url_id })))
    }

    /// Deletes a short URL owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no such URL exists and
    /// [`AppError::Forbidden`] if it belongs to someone else.
    pub async fn delete(&self, user_id: i64, url_id: i64) -> Result<(), AppError> {
        self.find_owned(user_id, url_id).await?;

        let deleted = self.url_repository.delete(url_id).await?;
        if !deleted {
            return Err(AppError::not_found(
                "Short URL not found",
                json!({ "id": url_id }),
            ));
        }

        Ok(())
    }

    /// Lists the URLs owned by `user_id`, newest first.
    ///
    /// Only the owner may list their URLs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if `requester_id` is not `user_id`.
    pub async fn list_for_user(
        &self,
        requester_id: i64,
        user_id: i64,
    ) -> Result<Vec<ShortUrl>, AppError> {
        if requester_id != user_id {
            return Err(AppError::forbidden(
                "You can only list your own URLs",
                json!({ "user_id": user_id }),
            ));
        }

        self.url_repository.list_by_user(user_id).await
    }

    /// Fetches a URL and verifies ownership.
    async fn find_owned(&self, user_id: i64, url_id: i64) -> Result<ShortUrl, AppError> {
        let url = self
            .url_repository
            .find_by_id(url_id)
            .await?
            .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "id": url_id })))?;

        if url.user_id != user_id {
            return Err(AppError::forbidden(
                "Not your URL",
                json!({ "id": url_id }),
            ));
        }

        Ok(url)
    }
}

/// Validates that a long URL is absolute and uses http or https.
fn validate_long_url(long_url: &str) -> Result<(), AppError> {
    let parsed = Url::parse(long_url)
        .map_err(|e| AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() })))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(AppError::bad_request(
            "URL must use http or https",
            json!({ "scheme": parsed.scheme() }),
        ));
    }

    Ok(())
}
