//! libSQL backend — async `SnapshotStore` over a local database file.
//!
//! Supports local file and in-memory databases. A single `snapshots` table
//! holds one row per key; writes upsert in place.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::info;

use crate::error::StorageError;
use crate::store::traits::SnapshotStore;

/// libSQL snapshot backend.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlBackend {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and initialize the schema.
    pub async fn new_local(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StorageError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| StorageError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.init_schema().await?;
        info!(path = %path.display(), "Snapshot database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, StorageError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| StorageError::Pool(format!("Failed to create in-memory database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| StorageError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.init_schema().await?;
        Ok(backend)
    }

    async fn init_schema(&self) -> Result<(), StorageError> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS snapshots (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                )",
                (),
            )
            .await
            .map_err(|e| StorageError::Query(format!("init_schema: {e}")))?;
        Ok(())
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[async_trait]
impl SnapshotStore for LibSqlBackend {
    async fn load(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        let conn = self.conn();
        let mut rows = conn
            .query("SELECT value FROM snapshots WHERE key = ?1", params![key])
            .await
            .map_err(|e| StorageError::Query(format!("load: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let value_str: String = row.get(0).unwrap_or_else(|_| "null".to_string());
                let value: serde_json::Value =
                    serde_json::from_str(&value_str).unwrap_or(serde_json::Value::Null);
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(StorageError::Query(format!("load: {e}"))),
        }
    }

    async fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        let conn = self.conn();
        let now = Utc::now().to_rfc3339();
        let value_str =
            serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;

        conn.execute(
            "INSERT INTO snapshots (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT (key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value_str, now],
        )
        .await
        .map_err(|e| StorageError::Query(format!("save: {e}")))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        let conn = self.conn();
        let count = conn
            .execute("DELETE FROM snapshots WHERE key = ?1", params![key])
            .await
            .map_err(|e| StorageError::Query(format!("delete: {e}")))?;
        Ok(count > 0)
    }
}
