use std::sync::Arc;

use lexi_config::limits::LimitsConfig;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::backend::{KeyValueStore, MemoryStore};
use crate::error::StoreError;

/// Typed access to the collections kept in a [`KeyValueStore`].
///
/// `update` is load, modify, save with no locking: two concurrent updates of the
/// same key are last-write-wins and one of them can be lost.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KeyValueStore>,
    pub(crate) limits: LimitsConfig,
}

impl Store {
    pub fn new(backend: Arc<dyn KeyValueStore>, limits: LimitsConfig) -> Self {
        Self { backend, limits }
    }

    /// Store backed by memory only, with default limits
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), LimitsConfig::default())
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.backend
    }

    /// Stored value, or `None` when it is missing or unreadable (the failure is logged)
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = match self.backend.get(key).await {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!("Error loading {key}: {e}");
                return None;
            }
        };

        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Discarding unreadable {key}: {e}");
                None
            }
        }
    }

    pub async fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.load(key).await.unwrap_or_default()
    }

    pub async fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_value(value)?;
        self.backend.set(key, json).await.inspect_err(|e| {
            tracing::error!("Error saving {key}: {e}");
        })
    }

    /// Apply `f` to the current value (or its default), save and return the result
    pub async fn update<T, F>(&self, key: &str, f: F) -> Result<T, StoreError>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(&mut T),
    {
        let mut current: T = self.load_or_default(key).await;
        f(&mut current);
        self.save(key, &current).await?;
        Ok(current)
    }

    pub async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.backend.remove(key).await
    }

    pub async fn clear_all(&self) -> Result<(), StoreError> {
        tracing::info!("Clearing all stored data");
        self.backend.clear().await
    }
}

/// Prepend `item`, dropping the oldest entries beyond `cap`
pub(crate) fn push_front_capped<T>(list: &mut Vec<T>, item: T, cap: usize) {
    list.insert(0, item);
    if list.len() > cap {
        let evicted = list.len() - cap;
        list.truncate(cap);
        tracing::debug!("Evicted {evicted} oldest entries");
    }
}
