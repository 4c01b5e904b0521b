//! Snapshot-backed in-memory browser host.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use super::{BrowserHost, Capability};
use crate::error::HostError;
use crate::types::{
    BookmarkNode, GroupId, GroupQuery, GroupUpdate, PageContent, Tab, TabChange, TabEvent,
    TabGroup, TabId, TabQuery, WindowId,
};

const EVENT_CAPACITY: usize = 256;

fn default_window() -> WindowId {
    1
}

/// Serializable state of a browser session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserSnapshot {
    /// Window the user is focused on.
    #[serde(default = "default_window")]
    pub current_window: WindowId,
    #[serde(default)]
    pub tabs: Vec<Tab>,
    #[serde(default)]
    pub groups: Vec<TabGroup>,
    #[serde(default)]
    pub bookmarks: Vec<BookmarkNode>,
    /// Rendered page content keyed by tab id.
    #[serde(default)]
    pub page_contents: HashMap<TabId, PageContent>,
    /// Capabilities the host refuses, as if the permission was missing.
    #[serde(default)]
    pub denied: Vec<Capability>,
}

impl BrowserSnapshot {
    /// Parse a snapshot from JSON.
    pub fn from_json_str(content: &str) -> Result<Self, HostError> {
        serde_json::from_str(content)
            .map_err(|e| HostError::Failed(format!("Invalid browser snapshot: {}", e)))
    }

    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self, HostError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HostError::Failed(format!("Cannot read snapshot {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }
}

struct BrowserState {
    current_window: WindowId,
    tabs: Vec<Tab>,
    groups: Vec<TabGroup>,
    bookmarks: Vec<BookmarkNode>,
    page_contents: HashMap<TabId, PageContent>,
    denied: HashSet<Capability>,
    next_tab_id: TabId,
    next_group_id: GroupId,
}

impl BrowserState {
    fn tab_mut(&mut self, id: TabId) -> Result<&mut Tab, HostError> {
        self.tabs
            .iter_mut()
            .find(|t| t.id == Some(id))
            .ok_or_else(|| HostError::NotFound(format!("tab {}", id)))
    }

    /// Groups die with their last member, as in the browser.
    fn prune_empty_groups(&mut self) {
        let used: HashSet<GroupId> = self.tabs.iter().filter_map(|t| t.group_id).collect();
        self.groups.retain(|g| used.contains(&g.id));
    }
}

/// A [`BrowserHost`] over an in-memory session.
///
/// Mutations made through the host API or the helper methods emit the same
/// lifecycle events a real browser would.
pub struct MemoryBrowser {
    state: Mutex<BrowserState>,
    events: broadcast::Sender<TabEvent>,
}

impl MemoryBrowser {
    /// An empty browser with a single window.
    pub fn new() -> Self {
        Self::from_snapshot(BrowserSnapshot {
            current_window: default_window(),
            ..Default::default()
        })
    }

    /// Build a browser from a snapshot.
    pub fn from_snapshot(snapshot: BrowserSnapshot) -> Self {
        let next_tab_id = snapshot.tabs.iter().filter_map(|t| t.id).max().unwrap_or(0) + 1;
        let next_group_id = snapshot.groups.iter().map(|g| g.id).max().unwrap_or(0) + 1;
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Mutex::new(BrowserState {
                current_window: snapshot.current_window,
                tabs: snapshot.tabs,
                groups: snapshot.groups,
                bookmarks: snapshot.bookmarks,
                page_contents: snapshot.page_contents,
                denied: snapshot.denied.into_iter().collect(),
                next_tab_id,
                next_group_id,
            }),
            events,
        }
    }

    /// Load a browser from a JSON snapshot file.
    pub fn load(path: &Path) -> Result<Self, HostError> {
        Ok(Self::from_snapshot(BrowserSnapshot::load(path)?))
    }

    /// Capture the current session.
    pub fn snapshot(&self) -> BrowserSnapshot {
        let state = self.state.lock();
        BrowserSnapshot {
            current_window: state.current_window,
            tabs: state.tabs.clone(),
            groups: state.groups.clone(),
            bookmarks: state.bookmarks.clone(),
            page_contents: state.page_contents.clone(),
            denied: state.denied.iter().copied().collect(),
        }
    }

    /// Refuse a capability from now on.
    pub fn deny(&self, capability: Capability) {
        self.state.lock().denied.insert(capability);
    }

    /// Grant a previously denied capability.
    pub fn allow(&self, capability: Capability) {
        self.state.lock().denied.remove(&capability);
    }

    /// All tabs, in window order.
    pub fn tabs(&self) -> Vec<Tab> {
        self.state.lock().tabs.clone()
    }

    /// All tab groups.
    pub fn groups(&self) -> Vec<TabGroup> {
        self.state.lock().groups.clone()
    }

    /// Register the rendered content of a tab.
    pub fn set_page_content(&self, tab_id: TabId, content: PageContent) {
        self.state.lock().page_contents.insert(tab_id, content);
    }

    /// Open a tab. A tab without an id gets the next free one.
    pub fn open_tab(&self, mut tab: Tab) -> TabId {
        let id = {
            let mut state = self.state.lock();
            let id = match tab.id {
                Some(id) => id,
                None => state.next_tab_id,
            };
            state.next_tab_id = state.next_tab_id.max(id + 1);
            tab.id = Some(id);
            if tab.active {
                for other in state.tabs.iter_mut().filter(|t| t.window_id == tab.window_id) {
                    other.active = false;
                }
            }
            state.tabs.push(tab.clone());
            id
        };
        self.emit(TabEvent::Created { tab });
        id
    }

    /// Make a tab the active tab of its window.
    pub fn activate_tab(&self, id: TabId) -> Result<(), HostError> {
        let window_id = {
            let mut state = self.state.lock();
            let window_id = state.tab_mut(id)?.window_id;
            for tab in state.tabs.iter_mut().filter(|t| t.window_id == window_id) {
                tab.active = tab.id == Some(id);
            }
            window_id
        };
        self.emit(TabEvent::Activated { tab_id: id, window_id });
        Ok(())
    }

    /// Close a tab.
    pub fn close_tab(&self, id: TabId) -> Result<(), HostError> {
        let window_id = {
            let mut state = self.state.lock();
            let window_id = state.tab_mut(id)?.window_id;
            state.tabs.retain(|t| t.id != Some(id));
            state.page_contents.remove(&id);
            state.prune_empty_groups();
            window_id
        };
        self.emit(TabEvent::Removed { tab_id: id, window_id });
        Ok(())
    }

    /// Apply a property change to a tab.
    pub fn update_tab(&self, id: TabId, change: TabChange) -> Result<(), HostError> {
        {
            let mut state = self.state.lock();
            let tab = state.tab_mut(id)?;
            if let Some(title) = &change.title {
                tab.title = Some(title.clone());
            }
            if let Some(url) = &change.url {
                tab.url = Some(url.clone());
            }
            if let Some(status) = change.status {
                tab.status = Some(status);
            }
            if let Some(icon) = &change.fav_icon_url {
                tab.fav_icon_url = Some(icon.clone());
            }
        }
        self.emit(TabEvent::Updated { tab_id: id, change });
        Ok(())
    }

    fn emit(&self, event: TabEvent) {
        debug!("Browser event: {:?}", event);
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn check(&self, capability: Capability) -> Result<(), HostError> {
        if self.state.lock().denied.contains(&capability) {
            return Err(HostError::PermissionDenied(capability.to_string()));
        }
        Ok(())
    }
}

impl Default for MemoryBrowser {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BrowserHost for MemoryBrowser {
    async fn query_tabs(&self, query: TabQuery) -> Result<Vec<Tab>, HostError> {
        self.check(Capability::Tabs)?;
        let state = self.state.lock();
        Ok(state
            .tabs
            .iter()
            .filter(|t| query.active.is_none_or(|active| t.active == active))
            .filter(|t| !query.current_window || t.window_id == state.current_window)
            .filter(|t| query.window_id.is_none_or(|w| t.window_id == w))
            .filter(|t| query.group_id.is_none_or(|g| t.group_id == Some(g)))
            .cloned()
            .collect())
    }

    async fn get_tab(&self, id: TabId) -> Result<Tab, HostError> {
        self.check(Capability::Tabs)?;
        let mut state = self.state.lock();
        let tab = state.tab_mut(id)?.clone();
        Ok(tab)
    }

    fn subscribe(&self) -> broadcast::Receiver<TabEvent> {
        self.events.subscribe()
    }

    async fn query_tab_groups(&self, query: GroupQuery) -> Result<Vec<TabGroup>, HostError> {
        self.check(Capability::TabGroups)?;
        let state = self.state.lock();
        Ok(state
            .groups
            .iter()
            .filter(|g| !query.current_window || g.window_id == state.current_window)
            .filter(|g| query.window_id.is_none_or(|w| g.window_id == w))
            .filter(|g| {
                query
                    .title
                    .as_deref()
                    .is_none_or(|title| g.title.as_deref() == Some(title))
            })
            .cloned()
            .collect())
    }

    async fn group_tabs(
        &self,
        tab_ids: &[TabId],
        group_id: Option<GroupId>,
    ) -> Result<GroupId, HostError> {
        self.check(Capability::TabGroups)?;
        let mut state = self.state.lock();
        let first = *tab_ids
            .first()
            .ok_or_else(|| HostError::Failed("No tabs to group".to_string()))?;
        for id in tab_ids {
            state.tab_mut(*id)?;
        }

        let target = match group_id {
            Some(id) => {
                if !state.groups.iter().any(|g| g.id == id) {
                    return Err(HostError::NotFound(format!("group {}", id)));
                }
                id
            }
            None => {
                let id = state.next_group_id;
                state.next_group_id += 1;
                let window_id = state.tab_mut(first)?.window_id;
                state.groups.push(TabGroup {
                    id,
                    window_id,
                    title: None,
                    color: Default::default(),
                    collapsed: false,
                });
                id
            }
        };

        for id in tab_ids {
            state.tab_mut(*id)?.group_id = Some(target);
        }
        state.prune_empty_groups();
        Ok(target)
    }

    async fn update_group(
        &self,
        group_id: GroupId,
        update: GroupUpdate,
    ) -> Result<TabGroup, HostError> {
        self.check(Capability::TabGroups)?;
        let mut state = self.state.lock();
        let group = state
            .groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| HostError::NotFound(format!("group {}", group_id)))?;
        if let Some(title) = update.title {
            group.title = Some(title);
        }
        if let Some(color) = update.color {
            group.color = color;
        }
        if let Some(collapsed) = update.collapsed {
            group.collapsed = collapsed;
        }
        Ok(group.clone())
    }

    async fn ungroup_tabs(&self, tab_ids: &[TabId]) -> Result<(), HostError> {
        self.check(Capability::TabGroups)?;
        let mut state = self.state.lock();
        for id in tab_ids {
            state.tab_mut(*id)?.group_id = None;
        }
        state.prune_empty_groups();
        Ok(())
    }

    async fn get_bookmark_tree(&self) -> Result<Vec<BookmarkNode>, HostError> {
        self.check(Capability::Bookmarks)?;
        Ok(self.state.lock().bookmarks.clone())
    }

    async fn extract_page_content(&self, tab_id: TabId) -> Result<PageContent, HostError> {
        self.check(Capability::PageContent)?;
        self.state
            .lock()
            .page_contents
            .get(&tab_id)
            .cloned()
            .ok_or_else(|| HostError::Unsupported(format!("no content script in tab {}", tab_id)))
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
