mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use sqlx::PgPool;

use makeshort::api::handlers::redirect_handler;
use makeshort::state::AppState;

fn redirect_app(state: AppState) -> Router {
    Router::new()
        .route("/{alias}", get(redirect_handler))
        .with_state(state)
}

#[sqlx::test]
async fn test_redirect_is_permanent(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice@example.com", "alice", "password123").await;
    common::create_test_url(&pool, user_id, "rust", "https://www.rust-lang.org/").await;

    let state = common::create_test_state(pool);
    let server = TestServer::new(redirect_app(state)).unwrap();

    let response = server.get("/rust").await;

    assert_eq!(response.status_code(), 308);
    assert_eq!(response.header("location"), "https://www.rust-lang.org/");
}

#[sqlx::test]
async fn test_redirect_counts_every_hit(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "bob@example.com", "bob", "password123").await;
    common::create_test_url(&pool, user_id, "docs", "https://example.com/docs").await;

    let state = common::create_test_state(pool.clone());
    let server = TestServer::new(redirect_app(state)).unwrap();

    assert_eq!(server.get("/docs").await.status_code(), 308);
    assert_eq!(server.get("/docs").await.status_code(), 308);

    assert_eq!(common::redirect_count(&pool, "docs").await, 2);
}

#[sqlx::test]
async fn test_redirect_unknown_alias(pool: PgPool) {
    let state = common::create_test_state(pool);
    let server = TestServer::new(redirect_app(state)).unwrap();

    let response = server.get("/missing").await;

    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}
