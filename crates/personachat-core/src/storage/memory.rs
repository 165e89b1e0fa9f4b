//! In-memory key/value backend.

use std::sync::Arc;

use dashmap::DashMap;
use personachat_types::error::StoreError;

use super::kv_backend::KvBackend;

/// `KvBackend` held entirely in memory.
///
/// Clones share the same map, so several services can be wired to one
/// backend the same way they share a database pool.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvBackend {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryKvBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvBackend for MemoryKvBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect())
    }
}
