//! Host access policy backed by a key/value store.

use std::sync::Arc;

use tracing::{debug, info, warn};

use tabweave_protocols::{KeyValueStore, StoreError};

use crate::config::{AccessList, AccessMode, HostAccessConfig};
use crate::error::AccessError;
use crate::matcher::{is_allowed, AccessDecision};

/// Store key holding the config of record.
pub const STORAGE_KEY: &str = "hostAccessConfig";

const PACKAGED_DEFAULT: &str = include_str!("../defaults/host-access.json");

/// Holds the host access rules.
///
/// Nothing is cached: every call reads the store, so an update made through
/// another policy instance over the same store is seen immediately.
pub struct HostAccessPolicy {
    store: Arc<dyn KeyValueStore>,
}

impl HostAccessPolicy {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The packaged default document, or include-all if it cannot be read.
    pub fn packaged_default() -> HostAccessConfig {
        serde_json::from_str(PACKAGED_DEFAULT).unwrap_or_else(|e| {
            warn!("Packaged host access defaults are invalid: {}", e);
            HostAccessConfig::default()
        })
    }

    /// Load the current config.
    ///
    /// Falls back to the packaged default when the store has no usable value.
    pub async fn load(&self) -> HostAccessConfig {
        match self.store.get(STORAGE_KEY).await {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(config) => return config,
                Err(e) => warn!("Ignoring stored host access config: {}", e),
            },
            Ok(None) => debug!("No stored host access config, using defaults"),
            Err(e) => warn!("Failed to read host access config: {}", e),
        }
        Self::packaged_default()
    }

    /// Persist `config` as the new config of record.
    pub async fn update(&self, config: &HostAccessConfig) -> Result<(), AccessError> {
        let value = serde_json::to_value(config).map_err(StoreError::from)?;
        self.store.set(STORAGE_KEY, value).await?;
        info!(
            "Host access config updated: mode={}, {} whitelisted, {} blocked",
            config.mode,
            config.whitelist.len(),
            config.blocklist.len()
        );
        Ok(())
    }

    /// Check `url` against the current config.
    pub async fn check(&self, url: &str) -> AccessDecision {
        let config = self.load().await;
        let decision = is_allowed(url, &config);
        if !decision.allowed {
            debug!("Access denied for {}: {:?}", url, decision.reason);
        }
        decision
    }

    pub async fn set_mode(&self, mode: AccessMode) -> Result<HostAccessConfig, AccessError> {
        let mut config = self.load().await;
        config.mode = mode;
        self.update(&config).await?;
        Ok(config)
    }

    /// Add a pattern to a list. Returns `false` if it was already present.
    pub async fn add_pattern(&self, list: AccessList, pattern: &str) -> Result<bool, AccessError> {
        let pattern = normalize_pattern(pattern)?;
        let mut config = self.load().await;
        let entries = config.list_mut(list);
        if entries.iter().any(|e| e.trim().eq_ignore_ascii_case(&pattern)) {
            return Ok(false);
        }
        entries.push(pattern);
        self.update(&config).await?;
        Ok(true)
    }

    /// Remove a pattern from a list. Returns `false` if it was not present.
    pub async fn remove_pattern(
        &self,
        list: AccessList,
        pattern: &str,
    ) -> Result<bool, AccessError> {
        let pattern = normalize_pattern(pattern)?;
        let mut config = self.load().await;
        let entries = config.list_mut(list);
        let before = entries.len();
        entries.retain(|e| !e.trim().eq_ignore_ascii_case(&pattern));
        if entries.len() == before {
            return Ok(false);
        }
        self.update(&config).await?;
        Ok(true)
    }
}

fn normalize_pattern(pattern: &str) -> Result<String, AccessError> {
    let pattern = pattern.trim().to_lowercase();
    if pattern.is_empty() || pattern == "*." {
        return Err(AccessError::InvalidPattern(pattern));
    }
    Ok(pattern)
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
