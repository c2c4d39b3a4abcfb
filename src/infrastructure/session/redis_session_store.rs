//! Redis-backed session store.

use async_trait::async_trait;
use chrono::Utc;
use redis::{AsyncCommands, Client, ExistenceCheck, SetExpiry, SetOptions, aio::ConnectionManager};
use serde_json::json;
use tracing::{error, info};

use crate::domain::entities::RefreshSession;
use crate::domain::repositories::SessionStore;
use crate::error::AppError;

/// Redis session store with native TTL eviction.
///
/// Sessions are stored as JSON under `session:<token>` keys and expire with
/// the key itself. Unlike a cache, this store is authoritative: operation
/// errors propagate instead of degrading silently, because a lost session
/// write would hand out a refresh token that can never be redeemed.
pub struct RedisSessionStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisSessionStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection cannot be
    /// established, or the PING fails.
    pub async fn connect(redis_url: &str) -> anyhow::Result<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut test_conn = manager.clone();
        test_conn.ping::<()>().await?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "session:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, refresh_token: &str) -> String {
        format!("{}{}", self.key_prefix, refresh_token)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, refresh_token: &str, session: RefreshSession) -> Result<(), AppError> {
        let key = self.build_key(refresh_token);
        let mut conn = self.client.clone();

        let payload = serde_json::to_string(&session).map_err(|e| {
            error!(error = %e, "Failed to serialize session");
            AppError::internal("Session store error", json!({}))
        })?;

        let ttl_secs = (session.expires_at - Utc::now()).num_seconds().max(1) as u64;

        // SET NX keeps create atomic with the existence check.
        let options = SetOptions::default()
            .conditional_set(ExistenceCheck::NX)
            .with_expiration(SetExpiry::EX(ttl_secs));

        let created: Option<String> = conn
            .set_options(&key, payload, options)
            .await
            .map_err(|e| {
                error!(error = %e, "Redis SET error");
                AppError::internal("Session store error", json!({}))
            })?;

        if created.is_none() {
            return Err(AppError::conflict("Session already exists", json!({})));
        }

        Ok(())
    }

    async fn get(&self, refresh_token: &str) -> Result<Option<RefreshSession>, AppError> {
        let key = self.build_key(refresh_token);
        let mut conn = self.client.clone();

        let payload: Option<String> = conn.get(&key).await.map_err(|e| {
            error!(error = %e, "Redis GET error");
            AppError::internal("Session store error", json!({}))
        })?;

        match payload {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(session) => Ok(Some(session)),
                Err(e) => {
                    // A corrupt payload forces re-login instead of a 500 loop.
                    error!(error = %e, "Failed to parse stored session");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn close(&self, refresh_token: &str) -> Result<bool, AppError> {
        let key = self.build_key(refresh_token);
        let mut conn = self.client.clone();

        let deleted: i64 = conn.del(&key).await.map_err(|e| {
            error!(error = %e, "Redis DEL error");
            AppError::internal("Session store error", json!({}))
        })?;

        Ok(deleted > 0)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
