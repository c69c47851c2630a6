use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

/// The blobs the app persists between runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum StorageKey {
    /// Serialized session history.
    History,
    /// Authentication marker.
    Auth,
    /// Product catalog override.
    Catalog,
}

/// String key/value persistence in the manner of browser local storage.
#[async_trait]
pub trait Storage {
    async fn get(&self, key: StorageKey) -> Result<Option<String>>;
    async fn set(&self, key: StorageKey, value: &str) -> Result<()>;
    async fn remove(&self, key: StorageKey) -> Result<()>;
}

pub type StorageBox = Arc<dyn Storage + Send + Sync>;
