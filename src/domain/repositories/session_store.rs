//! Store trait for refresh sessions.

use crate::domain::entities::RefreshSession;
use crate::error::AppError;
use async_trait::async_trait;

/// Store interface for refresh sessions, keyed by the raw refresh token.
///
/// A refresh token resolves to at most one live session. Rotation is
/// delete-then-create: [`close`](SessionStore::close) the old token before
/// [`create`](SessionStore::create) binds the new one.
///
/// Backends with native TTL eviction (Redis) may let expired sessions vanish
/// on their own; backends without it must treat an expired-but-present
/// session as absent on every [`get`](SessionStore::get).
///
/// # Implementations
///
/// - [`crate::infrastructure::session::RedisSessionStore`] - Redis with native TTL
/// - [`crate::infrastructure::session::MemorySessionStore`] - in-process fallback
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Binds a refresh token to a session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the token already has a live
    /// session. Token values are random enough that this should never
    /// happen, but it is checked, not assumed.
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn create(&self, refresh_token: &str, session: RefreshSession) -> Result<(), AppError>;

    /// Looks up the session for a refresh token.
    ///
    /// Returns `Ok(None)` for unknown and expired tokens alike.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn get(&self, refresh_token: &str) -> Result<Option<RefreshSession>, AppError>;

    /// Deletes the session for a refresh token.
    ///
    /// Returns `Ok(true)` if a session was deleted, `Ok(false)` if the token
    /// had none; closing twice yields `false` the second time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn close(&self, refresh_token: &str) -> Result<bool, AppError>;

    /// Checks if the store backend is reachable.
    ///
    /// Used by the health endpoint to report session store status.
    async fn health_check(&self) -> bool;
}
