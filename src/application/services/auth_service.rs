//! Account registration and session lifecycle service.

use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;

use crate::application::services::token_manager::TokenManager;
use crate::domain::entities::{NewUser, RefreshSession, TokenPair, User};
use crate::domain::repositories::{SessionStore, UserRepository};
use crate::error::AppError;
use crate::utils::hasher::Hasher;

/// Service for account registration, login, logout, and token refresh.
///
/// Passwords are hashed before they reach the repository, so neither storage
/// nor logs ever see plaintext. Refresh tokens rotate on every use: the old
/// session is closed before a new one is bound to a fresh token, and a token
/// that has already been rotated is indistinguishable from one that never
/// existed.
pub struct AuthService<U: UserRepository> {
    user_repository: Arc<U>,
    session_store: Arc<dyn SessionStore>,
    token_manager: TokenManager,
    hasher: Hasher,
    refresh_ttl_secs: i64,
}

impl<U: UserRepository> AuthService<U> {
    /// Creates a new auth service.
    ///
    /// # Arguments
    ///
    /// - `user_repository` - user storage
    /// - `session_store` - refresh session storage
    /// - `token_manager` - issues and verifies token pairs
    /// - `hasher` - password hasher; must match the one used at registration
    /// - `refresh_ttl_secs` - refresh session lifetime in seconds
    pub fn new(
        user_repository: Arc<U>,
        session_store: Arc<dyn SessionStore>,
        token_manager: TokenManager,
        hasher: Hasher,
        refresh_ttl_secs: i64,
    ) -> Self {
        Self {
            user_repository,
            session_store,
            token_manager,
            hasher,
            refresh_ttl_secs,
        }
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email or username is already
    /// taken. Returns [`AppError::Internal`] on database errors.
    pub async fn register(
        &self,
        email: String,
        username: String,
        password: &str,
    ) -> Result<User, AppError> {
        let new_user = NewUser {
            email,
            username,
            password_hash: self.hasher.hash(password),
        };

        self.user_repository.create(new_user).await
    }

    /// Authenticates credentials and opens a refresh session.
    ///
    /// Looks up the account by the `(email, password_hash)` pair in a single
    /// query. Unknown email and wrong password produce the same error, so the
    /// response does not reveal which accounts exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the credentials do not match any
    /// account. Returns [`AppError::Internal`] on storage errors.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        ip: String,
        user_agent: String,
    ) -> Result<TokenPair, AppError> {
        let password_hash = self.hasher.hash(password);

        let user = self
            .user_repository
            .find_by_credentials(email, &password_hash)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid credentials", json!({})))?;

        let pair = self.token_manager.issue_pair(user.id)?;
        self.open_session(&pair.refresh_token, user.id, ip, user_agent)
            .await?;

        Ok(pair)
    }

    /// Closes the session bound to a refresh token.
    ///
    /// Closing is idempotent at the store level; the second attempt finds
    /// nothing and surfaces as not found.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the token has no live session.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AppError> {
        let closed = self.session_store.close(refresh_token).await?;

        if !closed {
            return Err(AppError::not_found("Session not found", json!({})));
        }

        Ok(())
    }

    /// Rotates a refresh token, returning a fresh token pair.
    ///
    /// The old session is closed before the new one is created, so the
    /// presented token is single-use. If a concurrent refresh already
    /// consumed it, the close finds nothing and the request is rejected the
    /// same way as a forged token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown, expired,
    /// already rotated, or bound to a deleted account. Returns
    /// [`AppError::Internal`] on storage errors.
    pub async fn refresh(
        &self,
        refresh_token: &str,
        ip: String,
        user_agent: String,
    ) -> Result<TokenPair, AppError> {
        let session = self
            .session_store
            .get(refresh_token)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid or expired refresh token", json!({})))?;

        // The account may have been deleted while the session was live.
        if self
            .user_repository
            .find_by_id(session.user_id)
            .await?
            .is_none()
        {
            let _ = self.session_store.close(refresh_token).await;
            return Err(AppError::unauthorized(
                "Invalid or expired refresh token",
                json!({}),
            ));
        }

        let closed = self.session_store.close(refresh_token).await?;
        if !closed {
            return Err(AppError::unauthorized(
                "Invalid or expired refresh token",
                json!({}),
            ));
        }

        let pair = self.token_manager.issue_pair(session.user_id)?;
        self.open_session(&pair.refresh_token, session.user_id, ip, user_agent)
            .await?;

        Ok(pair)
    }

    async fn open_session(
        &self,
        refresh_token: &str,
        user_id: i64,
        ip: String,
        user_agent: String,
    ) -> Result<(), AppError> {
        let now = Utc::now();
        let session = RefreshSession {
            user_id,
            ip,
            user_agent,
            created_at: now,
            expires_at: now + Duration::seconds(self.refresh_ttl_secs),
        };

        self.session_store.create(refresh_token, session).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockSessionStore, MockUserRepository};

    fn test_salt() -> &'static str {
        "test-password-salt"
    }

    fn test_token_manager() -> TokenManager {
        TokenManager::new("test-secret-that-is-long-enough-for-hmac", 900)
    }

    fn test_service(
        user_repo: MockUserRepository,
        session_store: MockSessionStore,
    ) -> AuthService<MockUserRepository> {
        AuthService::new(
            Arc::new(user_repo),
            Arc::new(session_store),
            test_token_manager(),
            Hasher::new(test_salt()),
            604_800,
        )
    }

    fn test_user(id: i64, password_hash: &str) -> User {
        User {
            id,
            email: "alice@example.com".to_string(),
            username: "alice".to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut mock_users = MockUserRepository::new();
        let mock_sessions = MockSessionStore::new();

        let expected_hash = Hasher::new(test_salt()).hash("secret123");
        let stored = test_user(1, &expected_hash);

        mock_users
            .expect_create()
            .withf(move |new_user| {
                new_user.password_hash == expected_hash && new_user.password_hash != "secret123"
            })
            .times(1)
            .returning(move |_| Ok(stored.clone()));

        let service = test_service(mock_users, mock_sessions);

        let result = service
            .register(
                "alice@example.com".to_string(),
                "alice".to_string(),
                "secret123",
            )
            .await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().username, "alice");
    }

    #[tokio::test]
    async fn test_login_success_opens_session() {
        let mut mock_users = MockUserRepository::new();
        let mut mock_sessions = MockSessionStore::new();

        let expected_hash = Hasher::new(test_salt()).hash("secret123");
        let user = test_user(7, &expected_hash);

        mock_users
            .expect_find_by_credentials()
            .withf(move |email, hash| email == "alice@example.com" && hash == expected_hash)
            .times(1)
            .returning(move |_, _| Ok(Some(user.clone())));

        mock_sessions
            .expect_create()
            .withf(|_, session| session.user_id == 7 && session.ip == "10.0.0.1")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = test_service(mock_users, mock_sessions);

        let result = service
            .login(
                "alice@example.com",
                "secret123",
                "10.0.0.1".to_string(),
                "test-agent".to_string(),
            )
            .await;

        assert!(result.is_ok());
        let pair = result.unwrap();
        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
    }

    #[tokio::test]
    async fn test_login_wrong_credentials() {
        let mut mock_users = MockUserRepository::new();
        let mut mock_sessions = MockSessionStore::new();

        mock_users
            .expect_find_by_credentials()
            .times(1)
            .returning(|_, _| Ok(None));

        // No session may be opened on a failed login.
        mock_sessions.expect_create().times(0);

        let service = test_service(mock_users, mock_sessions);

        let result = service
            .login(
                "alice@example.com",
                "wrong-password",
                "10.0.0.1".to_string(),
                "test-agent".to_string(),
            )
            .await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_logout_success() {
        let mock_users = MockUserRepository::new();
        let mut mock_sessions = MockSessionStore::new();

        mock_sessions
            .expect_close()
            .withf(|token| token == "live-token")
            .times(1)
            .returning(|_| Ok(true));

        let service = test_service(mock_users, mock_sessions);

        assert!(service.logout("live-token").await.is_ok());
    }

    #[tokio::test]
    async fn test_logout_unknown_token() {
        let mock_users = MockUserRepository::new();
        let mut mock_sessions = MockSessionStore::new();

        mock_sessions
            .expect_close()
            .times(1)
            .returning(|_| Ok(false));

        let service = test_service(mock_users, mock_sessions);

        let result = service.logout("gone-token").await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_refresh_rotates_session() {
        let mut mock_users = MockUserRepository::new();
        let mut mock_sessions = MockSessionStore::new();

        let now = Utc::now();
        let session = RefreshSession {
            user_id: 7,
            ip: "10.0.0.1".to_string(),
            user_agent: "test-agent".to_string(),
            created_at: now,
            expires_at: now + Duration::seconds(3600),
        };

        let user = test_user(7, "irrelevant-hash");
        mock_users
            .expect_find_by_id()
            .withf(|id| *id == 7)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        mock_sessions
            .expect_get()
            .withf(|token| token == "old-token")
            .times(1)
            .returning(move |_| Ok(Some(session.clone())));

        mock_sessions
            .expect_close()
            .withf(|token| token == "old-token")
            .times(1)
            .returning(|_| Ok(true));

        mock_sessions
            .expect_create()
            .withf(|token, session| token != "old-token" && session.user_id == 7)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = test_service(mock_users, mock_sessions);

        let result = service
            .refresh(
                "old-token",
                "10.0.0.2".to_string(),
                "test-agent".to_string(),
            )
            .await;

        assert!(result.is_ok());
        assert_ne!(result.unwrap().refresh_token, "old-token");
    }

    #[tokio::test]
    async fn test_refresh_unknown_token() {
        let mock_users = MockUserRepository::new();
        let mut mock_sessions = MockSessionStore::new();

        mock_sessions.expect_get().times(1).returning(|_| Ok(None));
        mock_sessions.expect_create().times(0);

        let service = test_service(mock_users, mock_sessions);

        let result = service
            .refresh(
                "unknown-token",
                "10.0.0.1".to_string(),
                "test-agent".to_string(),
            )
            .await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_refresh_lost_race_is_unauthorized() {
        let mut mock_users = MockUserRepository::new();
        let mut mock_sessions = MockSessionStore::new();

        let now = Utc::now();
        let session = RefreshSession {
            user_id: 7,
            ip: "10.0.0.1".to_string(),
            user_agent: "test-agent".to_string(),
            created_at: now,
            expires_at: now + Duration::seconds(3600),
        };

        let user = test_user(7, "irrelevant-hash");
        mock_users
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        mock_sessions
            .expect_get()
            .times(1)
            .returning(move |_| Ok(Some(session.clone())));

        // A concurrent refresh consumed the token between get and close.
        mock_sessions
            .expect_close()
            .times(1)
            .returning(|_| Ok(false));

        mock_sessions.expect_create().times(0);

        let service = test_service(mock_users, mock_sessions);

        let result = service
            .refresh(
                "old-token",
                "10.0.0.1".to_string(),
                "test-agent".to_string(),
            )
            .await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_refresh_for_deleted_account() {
        let mut mock_users = MockUserRepository::new();
        let mut mock_sessions = MockSessionStore::new();

        let now = Utc::now();
        let session = RefreshSession {
            user_id: 7,
            ip: "10.0.0.1".to_string(),
            user_agent: "test-agent".to_string(),
            created_at: now,
            expires_at: now + Duration::seconds(3600),
        };

        mock_sessions
            .expect_get()
            .times(1)
            .returning(move |_| Ok(Some(session.clone())));

        mock_users
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        // The stale session is cleaned up, but no new one is created.
        mock_sessions
            .expect_close()
            .times(1)
            .returning(|_| Ok(true));
        mock_sessions.expect_create().times(0);

        let service = test_service(mock_users, mock_sessions);

        let result = service
            .refresh(
                "orphaned-token",
                "10.0.0.1".to_string(),
                "test-agent".to_string(),
            )
            .await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }
}
