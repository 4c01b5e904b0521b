//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use tabweave_protocols::GroupColor;

use crate::loader::ConfigLoader;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub context: ContextConfig,

    #[serde(default)]
    pub organizer: OrganizerConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Context synchronization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Quiet period after the last browser event before a rebuild fires.
    #[serde(default = "default_quiet_period_ms")]
    pub quiet_period_ms: u64,
}

impl SyncConfig {
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: default_quiet_period_ms(),
        }
    }
}

fn default_quiet_period_ms() -> u64 {
    300
}

/// Context aggregation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Maximum number of bookmarks offered as context.
    #[serde(default = "default_bookmark_limit")]
    pub bookmark_limit: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            bookmark_limit: default_bookmark_limit(),
        }
    }
}

fn default_bookmark_limit() -> usize {
    50
}

/// Tab organizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizerConfig {
    /// Color given to groups the organizer creates.
    #[serde(default = "default_group_color")]
    pub group_color: GroupColor,

    #[serde(default = "default_min_groups")]
    pub min_groups: usize,

    #[serde(default = "default_max_groups")]
    pub max_groups: usize,
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            group_color: default_group_color(),
            min_groups: default_min_groups(),
            max_groups: default_max_groups(),
        }
    }
}

fn default_group_color() -> GroupColor {
    GroupColor::Blue
}

fn default_min_groups() -> usize {
    3
}

fn default_max_groups() -> usize {
    7
}

/// Inference endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Base URL of an OpenAI-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            model: default_model(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

/// Persistent storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding persisted settings such as the host access policy.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl StorageConfig {
    /// Storage path with `~` expanded.
    pub fn resolved_path(&self) -> PathBuf {
        PathBuf::from(ConfigLoader::expand_path(&self.path))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

fn default_storage_path() -> String {
    "~/.tabweave/storage.json".to_string()
}

/// Default data directory (`~/.tabweave`).
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tabweave")
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
