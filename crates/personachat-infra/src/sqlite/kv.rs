//! SQLite key/value backend implementation.
//!
//! Implements `KvBackend` from `personachat-core` using sqlx with split
//! read/write pools. Values are opaque strings; the store above decides
//! what they contain.

use chrono::Utc;
use personachat_core::storage::kv_backend::KvBackend;
use personachat_types::error::StoreError;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `KvBackend`.
#[derive(Clone)]
pub struct SqliteKvBackend {
    pool: DatabasePool,
}

impl SqliteKvBackend {
    /// Create a new backend over the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn backend_error(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

impl KvBackend for SqliteKvBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(backend_error)?;

        match row {
            Some(row) => Ok(Some(row.try_get("value").map_err(backend_error)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO kv_store (key, value, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(backend_error)?;

        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        // instr() is case-sensitive and has no wildcard characters, unlike LIKE.
        let rows = sqlx::query("SELECT key FROM kv_store WHERE instr(key, ?) = 1")
            .bind(prefix)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(backend_error)?;

        rows.iter()
            .map(|row| row.try_get("key").map_err(backend_error))
            .collect()
    }
}
