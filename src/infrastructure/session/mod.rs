//! Refresh session storage backends.
//!
//! Implementations of [`SessionStore`](crate::domain::repositories::SessionStore):
//! - [`RedisSessionStore`] - Redis with native TTL eviction
//! - [`MemorySessionStore`] - process-local fallback for development and tests

mod memory_session_store;
mod redis_session_store;

pub use memory_session_store::MemorySessionStore;
pub use redis_session_store::RedisSessionStore;
