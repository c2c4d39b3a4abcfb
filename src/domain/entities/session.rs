//! Refresh session entity and issued token pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A server-side session bound to one opaque refresh token.
///
/// The refresh token itself is the session key in the store and is not part
/// of the payload. Serialized as JSON when the backing store is Redis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshSession {
    pub user_id: i64,
    pub ip: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl RefreshSession {
    /// Returns true if the session has passed its expiry time.
    ///
    /// Stores without native TTL eviction must treat an expired session as
    /// absent on every lookup.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Access/refresh token pair issued at login and on every rotation.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
