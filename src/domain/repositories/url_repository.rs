//! Repository trait for short URL data access.

use crate::domain::entities::{NewShortUrl, ShortUrl, ShortUrlPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short URLs.
///
/// Alias uniqueness is enforced by the store's unique constraint, never by an
/// application-side existence check; a violated constraint surfaces as
/// [`AppError::Conflict`]. The redirect counter is incremented with a single
/// atomic statement so concurrent redirects are never lost.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Creates a new short URL.
    ///
    /// The insert is atomic; no partial state is left behind on failure.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the alias already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError>;

    /// Finds a short URL by its alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_alias(&self, alias: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Finds a short URL by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<ShortUrl>, AppError>;

    /// Atomically increments the redirect counter by 1 and refreshes
    /// `updated_at`.
    ///
    /// The increment happens inside a single UPDATE so two concurrent
    /// redirects both count.
    ///
    /// Returns `Ok(true)` if a row was updated, `Ok(false)` if the id is
    /// unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_redirects(&self, id: i64) -> Result<bool, AppError>;

    /// Partially updates a short URL.
    ///
    /// Only `Some` fields in [`ShortUrlPatch`] are modified. Changing the
    /// alias is subject to the same uniqueness constraint as creation.
    ///
    /// Returns `Ok(None)` if no row matches `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new alias already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, patch: ShortUrlPatch) -> Result<Option<ShortUrl>, AppError>;

    /// Deletes a short URL.
    ///
    /// Returns `Ok(true)` if the row was found and deleted, `Ok(false)` if
    /// the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Lists all short URLs owned by a user.
    ///
    /// Returns an empty vector, not an error, when the user owns none.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<ShortUrl>, AppError>;
}
