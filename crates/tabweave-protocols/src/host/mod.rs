//! Browser host capability surface.
//!
//! The engine never talks to a browser directly. Everything it reads or
//! mutates goes through [`BrowserHost`], so the browser stays the source of
//! truth and hosts can be swapped (extension bridge, CDP, in-memory snapshot).

mod memory;

pub use memory::{BrowserSnapshot, MemoryBrowser};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::HostError;
use crate::types::{
    BookmarkNode, GroupId, GroupQuery, GroupUpdate, PageContent, Tab, TabEvent, TabGroup, TabId,
    TabQuery,
};

/// Capability groups a host may deny (missing permission, unsupported API).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    Tabs,
    TabGroups,
    Bookmarks,
    PageContent,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Capability::Tabs => "tabs",
            Capability::TabGroups => "tabGroups",
            Capability::Bookmarks => "bookmarks",
            Capability::PageContent => "pageContent",
        };
        f.write_str(name)
    }
}

/// Query and mutation primitives of the browser, plus its lifecycle events.
#[async_trait]
pub trait BrowserHost: Send + Sync {
    /// List tabs matching `query`.
    async fn query_tabs(&self, query: TabQuery) -> Result<Vec<Tab>, HostError>;

    /// Get one tab by id.
    async fn get_tab(&self, id: TabId) -> Result<Tab, HostError>;

    /// Subscribe to tab lifecycle notifications.
    fn subscribe(&self) -> broadcast::Receiver<TabEvent>;

    /// List tab groups matching `query`.
    async fn query_tab_groups(&self, query: GroupQuery) -> Result<Vec<TabGroup>, HostError>;

    /// Move tabs into `group_id`, or into a new group when `None`.
    /// Returns the id of the group the tabs landed in.
    async fn group_tabs(
        &self,
        tab_ids: &[TabId],
        group_id: Option<GroupId>,
    ) -> Result<GroupId, HostError>;

    /// Change a group's title, color, or collapsed state.
    async fn update_group(&self, group_id: GroupId, update: GroupUpdate)
        -> Result<TabGroup, HostError>;

    /// Remove tabs from whatever group holds them.
    async fn ungroup_tabs(&self, tab_ids: &[TabId]) -> Result<(), HostError>;

    /// The full bookmark tree, roots first.
    async fn get_bookmark_tree(&self) -> Result<Vec<BookmarkNode>, HostError>;

    /// Render the content of a tab by running an extractor inside it.
    async fn extract_page_content(&self, tab_id: TabId) -> Result<PageContent, HostError> {
        let _ = tab_id;
        Err(HostError::Unsupported("page content extraction".to_string()))
    }
}
