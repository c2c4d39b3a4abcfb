//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, session store setup, service wiring, and
//! Axum server lifecycle.

use crate::application::services::{
    AuthService, RedirectService, TokenManager, UrlService, UserService,
};
use crate::config::Config;
use crate::domain::repositories::SessionStore;
use crate::infrastructure::persistence::{PgUrlRepository, PgUserRepository};
use crate::infrastructure::session::{MemorySessionStore, RedisSessionStore};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::hasher::Hasher;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Redis session store (or in-memory fallback)
/// - Application services
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate");

    let session_store: Arc<dyn SessionStore> = if let Some(redis_url) = &config.redis_url {
        match RedisSessionStore::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Refresh sessions stored in Redis");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to connect to Redis: {}. Falling back to in-memory sessions; \
                     active sessions will not survive a restart.",
                    e
                );
                Arc::new(MemorySessionStore::new())
            }
        }
    } else {
        tracing::info!("Refresh sessions stored in memory");
        Arc::new(MemorySessionStore::new())
    };

    let pool_arc = Arc::new(pool.clone());
    let user_repository = Arc::new(PgUserRepository::new(pool_arc.clone()));
    let url_repository = Arc::new(PgUrlRepository::new(pool_arc.clone()));

    let token_manager = TokenManager::new(&config.jwt_secret, config.access_ttl_secs);
    let hasher = Hasher::new(&config.password_salt);

    let auth_service = Arc::new(AuthService::new(
        user_repository.clone(),
        session_store.clone(),
        token_manager.clone(),
        hasher,
        config.refresh_ttl_secs,
    ));
    let url_service = Arc::new(UrlService::new(
        url_repository.clone(),
        config.alias_length,
    ));
    let redirect_service = Arc::new(RedirectService::new(url_repository));
    let user_service = Arc::new(UserService::new(user_repository));

    let state = AppState {
        auth_service,
        url_service,
        redirect_service,
        user_service,
        token_manager,
        session_store,
        db: pool,
        refresh_ttl_secs: config.refresh_ttl_secs,
    };

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
