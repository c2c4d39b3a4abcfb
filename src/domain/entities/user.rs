//! User account entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A registered user account.
///
/// `password_hash` is the salted HMAC of the password, never the plaintext.
/// It must not appear in API responses or log output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}
