//! Common utility types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata map type.
pub type Metadata = HashMap<String, serde_json::Value>;

/// Platform identifier of a tab.
pub type TabId = i64;

/// Platform identifier of a browser window.
pub type WindowId = i64;

/// Platform identifier of a tab group.
pub type GroupId = i64;

/// Risk level for callable actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}
