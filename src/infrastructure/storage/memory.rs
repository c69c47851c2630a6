use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::models::Storage;
use crate::domain::models::StorageKey;

/// Process-local storage. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStorage {
    values: DashMap<String, String>,
}

#[async_trait]
impl Storage for MemoryStorage {
    #[allow(clippy::implicit_return)]
    async fn get(&self, key: StorageKey) -> Result<Option<String>> {
        return Ok(self
            .values
            .get(&key.to_string())
            .map(|e| return e.value().to_string()));
    }

    #[allow(clippy::implicit_return)]
    async fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn remove(&self, key: StorageKey) -> Result<()> {
        self.values.remove(&key.to_string());
        return Ok(());
    }
}
