//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl, ShortUrlPatch};
use crate::domain::repositories::UrlRepository;
use crate::error::{AppError, is_unique_violation};
use serde_json::json;

const URL_COLUMNS: &str = "id, user_id, long_url, alias, redirects, created_at, updated_at";

/// PostgreSQL repository for short URLs.
///
/// Alias uniqueness rests on the `urls_alias_key` constraint; inserts and
/// alias updates translate its violation into a conflict instead of checking
/// first.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let query = format!(
            "INSERT INTO urls (user_id, long_url, alias) \
             VALUES ($1, $2, $3) \
             RETURNING {URL_COLUMNS}"
        );

        sqlx::query_as::<_, ShortUrl>(&query)
            .bind(new_url.user_id)
            .bind(&new_url.long_url)
            .bind(&new_url.alias)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::conflict(
                        "Alias already exists",
                        json!({ "alias": new_url.alias }),
                    )
                } else {
                    e.into()
                }
            })
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<ShortUrl>, AppError> {
        let query = format!("SELECT {URL_COLUMNS} FROM urls WHERE alias = $1");

        Ok(sqlx::query_as::<_, ShortUrl>(&query)
            .bind(alias)
            .fetch_optional(self.pool.as_ref())
            .await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ShortUrl>, AppError> {
        let query = format!("SELECT {URL_COLUMNS} FROM urls WHERE id = $1");

        Ok(sqlx::query_as::<_, ShortUrl>(&query)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?)
    }

    async fn increment_redirects(&self, id: i64) -> Result<bool, AppError> {
        // Single atomic update; concurrent redirects never lose counts.
        let result =
            sqlx::query("UPDATE urls SET redirects = redirects + 1, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update(&self, id: i64, patch: ShortUrlPatch) -> Result<Option<ShortUrl>, AppError> {
        let query = format!(
            "UPDATE urls \
             SET long_url = COALESCE($2, long_url), \
                 alias = COALESCE($3, alias), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {URL_COLUMNS}"
        );

        sqlx::query_as::<_, ShortUrl>(&query)
            .bind(id)
            .bind(&patch.long_url)
            .bind(&patch.alias)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::conflict(
                        "Alias already exists",
                        json!({ "alias": patch.alias }),
                    )
                } else {
                    e.into()
                }
            })
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<ShortUrl>, AppError> {
        let query = format!(
            "SELECT {URL_COLUMNS} FROM urls WHERE user_id = $1 ORDER BY created_at DESC"
        );

        Ok(sqlx::query_as::<_, ShortUrl>(&query)
            .bind(user_id)
            .fetch_all(self.pool.as_ref())
            .await?)
    }
}
