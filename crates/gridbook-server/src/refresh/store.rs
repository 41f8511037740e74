//! Persistence for the cached reference document
//!
//! The document lives in a single row. Writers replace it wholesale in one
//! statement, so readers see either the previous document or the new one.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Latest committed reference document
#[derive(Debug, Clone, PartialEq)]
pub struct StoredReference {
    pub info: Value,
    pub refreshed_at: DateTime<Utc>,
}

/// Storage backend for the reference document
#[async_trait]
pub trait ReferenceInfoStore: Send + Sync {
    /// Replace the stored document with `info`
    async fn replace(&self, info: &Value) -> Result<(), sqlx::Error>;

    /// Last committed document, `None` before the first successful refresh
    async fn latest(&self) -> Result<Option<StoredReference>, sqlx::Error>;
}

/// PostgreSQL-backed store using the single-row `reference_info` table
#[derive(Debug, Clone)]
pub struct PgReferenceInfoStore {
    pool: PgPool,
}

impl PgReferenceInfoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReferenceInfoStore for PgReferenceInfoStore {
    async fn replace(&self, info: &Value) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO reference_info (id, info, refreshed_at)
            VALUES (1, $1, NOW())
            ON CONFLICT (id) DO UPDATE
            SET info = EXCLUDED.info,
                refreshed_at = EXCLUDED.refreshed_at
            "#,
        )
        .bind(info)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn latest(&self) -> Result<Option<StoredReference>, sqlx::Error> {
        let row: Option<(Value, DateTime<Utc>)> =
            sqlx::query_as("SELECT info, refreshed_at FROM reference_info WHERE id = 1")
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(info, refreshed_at)| StoredReference { info, refreshed_at }))
    }
}

/// In-process store, used by tests and when running without a database
#[derive(Debug, Clone, Default)]
pub struct MemoryReferenceInfoStore {
    inner: Arc<RwLock<Option<StoredReference>>>,
}

impl MemoryReferenceInfoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store starting out with `info` already committed
    pub fn seeded(info: Value) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(StoredReference {
                info,
                refreshed_at: Utc::now(),
            }))),
        }
    }
}

#[async_trait]
impl ReferenceInfoStore for MemoryReferenceInfoStore {
    async fn replace(&self, info: &Value) -> Result<(), sqlx::Error> {
        *self.inner.write().await = Some(StoredReference {
            info: info.clone(),
            refreshed_at: Utc::now(),
        });
        Ok(())
    }

    async fn latest(&self) -> Result<Option<StoredReference>, sqlx::Error> {
        Ok(self.inner.read().await.clone())
    }
}
