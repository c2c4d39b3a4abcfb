#![allow(dead_code)]

use makeshort::application::services::{
    AuthService, RedirectService, TokenManager, UrlService, UserService,
};
use makeshort::domain::repositories::SessionStore;
use makeshort::infrastructure::persistence::{PgUrlRepository, PgUserRepository};
use makeshort::infrastructure::session::MemorySessionStore;
use makeshort::state::AppState;
use makeshort::utils::hasher::Hasher;
use sqlx::PgPool;
use std::sync::Arc;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";
pub const TEST_PASSWORD_SALT: &str = "test-password-salt";
pub const TEST_ACCESS_TTL: i64 = 900;
pub const TEST_REFRESH_TTL: i64 = 3600;

pub async fn create_test_user(pool: &PgPool, email: &str, username: &str, password: &str) -> i64 {
    let password_hash = Hasher::new(TEST_PASSWORD_SALT).hash(password);

    sqlx::query_scalar(
        "INSERT INTO users (email, username, password_hash) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(email)
    .bind(username)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_url(pool: &PgPool, user_id: i64, alias: &str, long_url: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO urls (user_id, long_url, alias) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(user_id)
    .bind(long_url)
    .bind(alias)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn redirect_count(pool: &PgPool, alias: &str) -> i64 {
    sqlx::query_scalar("SELECT redirects FROM urls WHERE alias = $1")
        .bind(alias)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Issues an access token the way the service under test would.
pub fn access_token_for(user_id: i64) -> String {
    TokenManager::new(TEST_JWT_SECRET, TEST_ACCESS_TTL)
        .issue_pair(user_id)
        .unwrap()
        .access_token
}

pub fn create_test_state(pool: PgPool) -> AppState {
    let pool_arc = Arc::new(pool.clone());

    let user_repo = Arc::new(PgUserRepository::new(pool_arc.clone()));
    let url_repo = Arc::new(PgUrlRepository::new(pool_arc.clone()));

    let session_store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    let token_manager = TokenManager::new(TEST_JWT_SECRET, TEST_ACCESS_TTL);
    let hasher = Hasher::new(TEST_PASSWORD_SALT);

    let auth_service = Arc::new(AuthService::new(
        user_repo.clone(),
        session_store.clone(),
        token_manager.clone(),
        hasher,
        TEST_REFRESH_TTL,
    ));
    let url_service = Arc::new(UrlService::new(url_repo.clone(), 6));
    let redirect_service = Arc::new(RedirectService::new(url_repo));
    let user_service = Arc::new(UserService::new(user_repo));

    AppState {
        auth_service,
        url_service,
        redirect_service,
        user_service,
        token_manager,
        session_store,
        db: pool,
        refresh_ttl_secs: TEST_REFRESH_TTL,
    }
}
