//! Context items offered to the model as selectable input.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::common::{Metadata, TabId};

/// Kind of a context item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextType {
    Page,
    Tab,
    Bookmark,
    Clipboard,
    Screenshot,
    Custom,
}

impl ContextType {
    /// Prefix used in item ids of this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            ContextType::Page => "page",
            ContextType::Tab => "tab",
            ContextType::Bookmark => "bookmark",
            ContextType::Clipboard => "clipboard",
            ContextType::Screenshot => "screenshot",
            ContextType::Custom => "custom",
        }
    }
}

/// A candidate piece of information offered to the model.
///
/// The id is `<kind>-<source id>`, so the kind and the originating browser
/// object can always be recovered from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContextType,
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: Metadata,
}

impl ContextItem {
    /// Create an item of any kind from its source identifier.
    pub fn new(
        kind: ContextType,
        source_id: impl std::fmt::Display,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("{}-{}", kind.prefix(), source_id),
            kind,
            label: label.into(),
            value: value.into(),
            metadata: HashMap::new(),
        }
    }

    /// The current page, rendered from the tab `tab_id`.
    pub fn page(tab_id: TabId, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(ContextType::Page, tab_id, label, value)
    }

    /// An open tab.
    pub fn tab(tab_id: TabId, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(ContextType::Tab, tab_id, label, value)
    }

    /// A bookmark tree node carrying a URL.
    pub fn bookmark(node_id: &str, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(ContextType::Bookmark, node_id, label, value)
    }

    /// Add a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Originating tab of a `page` or `tab` item.
    pub fn tab_id(&self) -> Option<TabId> {
        match self.kind {
            ContextType::Page | ContextType::Tab => self
                .id
                .strip_prefix(self.kind.prefix())
                .and_then(|rest| rest.strip_prefix('-'))
                .and_then(|raw| raw.parse().ok()),
            _ => None,
        }
    }

    /// URL recorded in the metadata bag.
    pub fn url(&self) -> Option<&str> {
        self.metadata.get("url").and_then(|v| v.as_str())
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
