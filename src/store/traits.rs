//! `SnapshotStore` trait — single async interface for snapshot persistence.
//!
//! The wizard writes one JSON snapshot per mutation under a fixed key and
//! reads it back once at startup. Backends must make the write durable
//! enough that a fresh process sees the last completed `save`.

use async_trait::async_trait;

use crate::error::StorageError;

/// Backend-agnostic key-value snapshot storage.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the snapshot stored under `key`, if any.
    async fn load(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError>;

    /// Store `value` under `key`, replacing any previous snapshot.
    async fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError>;

    /// Remove the snapshot under `key`. Returns whether one existed.
    async fn delete(&self, key: &str) -> Result<bool, StorageError>;
}
