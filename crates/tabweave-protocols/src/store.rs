//! Persistent key/value storage.

use async_trait::async_trait;

use crate::error::StoreError;

/// Persistent key/value storage for settings such as the host access policy.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError>;

    /// Write `value` under `key`. The write is durable when this returns.
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StoreError>;
}
