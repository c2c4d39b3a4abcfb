//! DTOs for user profile endpoints.

use crate::domain::entities::User;
use serde::Serialize;

/// Public view of an account.
///
/// Never carries the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_response_drops_password_hash() {
        let user = User {
            id: 7,
            email: "alice@example.com".to_string(),
            username: "alice".to_string(),
            password_hash: "secret-hash".to_string(),
            created_at: Utc::now(),
        };

        let response = UserResponse::from(user);
        let rendered = serde_json::to_string(&response).unwrap();

        assert!(!rendered.contains("secret-hash"));
        assert!(rendered.contains("alice@example.com"));
    }
}
