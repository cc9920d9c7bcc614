//! In-memory `SnapshotStore` — for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::store::traits::SnapshotStore;

/// HashMap-backed snapshot store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for MemoryBackend {
    async fn load(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.entries.lock().unwrap().remove(key).is_some())
    }
}
