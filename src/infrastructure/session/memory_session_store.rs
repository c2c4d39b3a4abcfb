//! In-process session store.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::RefreshSession;
use crate::domain::repositories::SessionStore;
use crate::error::AppError;

/// Session store backed by a process-local map.
///
/// Sessions do not survive restarts and are not shared between instances.
/// Expiry is checked on read; expired entries are dropped when touched.
///
/// # Use Cases
///
/// - Development environments without Redis
/// - Integration tests
/// - Fallback when the Redis connection fails at startup
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, RefreshSession>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using MemorySessionStore (sessions are process-local)");
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, refresh_token: &str, session: RefreshSession) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;

        if let Some(existing) = sessions.get(refresh_token) {
            if !existing.is_expired() {
                return Err(AppError::conflict("Session already exists", json!({})));
            }
        }

        sessions.insert(refresh_token.to_string(), session);
        Ok(())
    }

    async fn get(&self, refresh_token: &str) -> Result<Option<RefreshSession>, AppError> {
        let mut sessions = self.sessions.write().await;

        match sessions.get(refresh_token) {
            Some(session) if session.is_expired() => {
                sessions.remove(refresh_token);
                Ok(None)
            }
            Some(session) => Ok(Some(session.clone())),
            None => Ok(None),
        }
    }

    async fn close(&self, refresh_token: &str) -> Result<bool, AppError> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.remove(refresh_token).is_some())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
