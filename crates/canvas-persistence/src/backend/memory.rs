//! In-memory storage backend.

use canvas_model::StoredPayload;

use super::merge_payload;
use crate::error::Result;
use crate::manager::{StorageConfig, StorageManager};

/// Keeps the last stored payload in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    config: StorageConfig,
    cache: StoredPayload,
    store_count: usize,
}

impl MemoryStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            cache: StoredPayload::default(),
            store_count: 0,
        }
    }

    /// Seed the cache, as if the payload had been stored earlier.
    #[must_use]
    pub fn with_cached(mut self, payload: StoredPayload) -> Self {
        self.cache = payload;
        self
    }

    /// The payload a subsequent load would return.
    pub fn cached(&self) -> &StoredPayload {
        &self.cache
    }

    /// Number of store calls received.
    pub fn store_count(&self) -> usize {
        self.store_count
    }

    pub fn set_config(&mut self, config: StorageConfig) {
        self.config = config;
    }
}

impl StorageManager for MemoryStorage {
    fn config(&self) -> StorageConfig {
        self.config
    }

    fn store(&mut self, payload: &StoredPayload) {
        merge_payload(&mut self.cache, payload);
        self.store_count += 1;
        tracing::debug!(stores = self.store_count, "Stored payload in memory");
    }

    fn load_cached(&self) -> Result<StoredPayload> {
        Ok(self.cache.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_then_load() {
        let mut storage = MemoryStorage::new(StorageConfig::default());
        assert!(storage.load_cached().unwrap().is_empty());

        storage.store(&StoredPayload::from_styles("[]"));
        assert_eq!(storage.store_count(), 1);
        assert_eq!(storage.load_cached().unwrap().styles(), Some("[]"));
    }

    #[test]
    fn test_seeded_cache() {
        let storage = MemoryStorage::default().with_cached(StoredPayload::from_css(".a{}"));
        assert_eq!(storage.cached().css(), Some(".a{}"));
        assert_eq!(storage.store_count(), 0);
    }
}
