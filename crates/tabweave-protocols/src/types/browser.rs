//! Browser object model: tabs, tab groups, bookmarks and lifecycle events.
//!
//! Field names serialize in camelCase to match the shape browser APIs hand
//! out, so snapshots captured from a real browser load unchanged.

use serde::{Deserialize, Serialize};

use super::common::{GroupId, TabId, WindowId};

/// Loading status of a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabStatus {
    Loading,
    Complete,
}

/// An open browser tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    /// Tab id. Some special tabs (devtools, prerender) have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TabId>,

    pub window_id: WindowId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fav_icon_url: Option<String>,

    #[serde(default)]
    pub active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TabStatus>,

    /// Last access time in milliseconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_accessed: Option<f64>,
}

impl Tab {
    /// Create a tab with an id, title and URL.
    pub fn new(
        id: TabId,
        window_id: WindowId,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            window_id,
            title: Some(title.into()),
            url: Some(url.into()),
            fav_icon_url: None,
            active: false,
            group_id: None,
            status: Some(TabStatus::Complete),
            last_accessed: None,
        }
    }

    /// Mark the tab as the active tab of its window.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Place the tab in a group.
    pub fn with_group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Set the favicon URL.
    pub fn with_fav_icon(mut self, url: impl Into<String>) -> Self {
        self.fav_icon_url = Some(url.into());
        self
    }
}

/// Filter for tab queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabQuery {
    pub active: Option<bool>,
    /// Restrict to the window the user is focused on.
    pub current_window: bool,
    pub window_id: Option<WindowId>,
    pub group_id: Option<GroupId>,
}

impl TabQuery {
    /// All tabs across all windows.
    pub fn all() -> Self {
        Self::default()
    }

    /// All tabs of the current window.
    pub fn current_window() -> Self {
        Self {
            current_window: true,
            ..Self::default()
        }
    }

    /// The active tab of the current window.
    pub fn active_in_current_window() -> Self {
        Self {
            active: Some(true),
            current_window: true,
            ..Self::default()
        }
    }

    /// Members of one tab group.
    pub fn in_group(group_id: GroupId) -> Self {
        Self {
            group_id: Some(group_id),
            ..Self::default()
        }
    }
}

/// Tab group colors offered by the browser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupColor {
    #[default]
    Grey,
    Blue,
    Red,
    Yellow,
    Green,
    Pink,
    Purple,
    Cyan,
    Orange,
}

/// A named, collapsible cluster of tabs within one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabGroup {
    pub id: GroupId,
    pub window_id: WindowId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub color: GroupColor,
    #[serde(default)]
    pub collapsed: bool,
}

/// Filter for tab group queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupQuery {
    pub current_window: bool,
    pub window_id: Option<WindowId>,
    pub title: Option<String>,
}

impl GroupQuery {
    /// All groups of the current window.
    pub fn current_window() -> Self {
        Self {
            current_window: true,
            ..Self::default()
        }
    }

    /// Groups of one window.
    pub fn in_window(window_id: WindowId) -> Self {
        Self {
            window_id: Some(window_id),
            ..Self::default()
        }
    }
}

/// Partial update applied to a tab group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupUpdate {
    pub title: Option<String>,
    pub color: Option<GroupColor>,
    pub collapsed: Option<bool>,
}

impl GroupUpdate {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn color(mut self, color: GroupColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }
}

/// A node of the bookmark tree. Folders carry children and no URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkNode {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BookmarkNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<f64>,
}

impl BookmarkNode {
    /// Create a URL-bearing bookmark.
    pub fn bookmark(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: Some(url.into()),
            children: Vec::new(),
            date_added: None,
        }
    }

    /// Create a folder holding `children`.
    pub fn folder(id: impl Into<String>, title: impl Into<String>, children: Vec<BookmarkNode>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: None,
            children,
            date_added: None,
        }
    }
}

/// Rendered content extracted from a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    pub title: String,
    pub url: String,
    pub content: String,
}

/// Properties that changed in a tab update notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TabStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fav_icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
}

impl TabChange {
    /// Whether the change can alter a context item: a new title, a new URL,
    /// or the page finishing its load.
    pub fn affects_context(&self) -> bool {
        self.title.is_some() || self.url.is_some() || self.status == Some(TabStatus::Complete)
    }
}

/// Browser lifecycle notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TabEvent {
    #[serde(rename_all = "camelCase")]
    Activated { tab_id: TabId, window_id: WindowId },
    Created { tab: Tab },
    #[serde(rename_all = "camelCase")]
    Removed { tab_id: TabId, window_id: WindowId },
    #[serde(rename_all = "camelCase")]
    Updated { tab_id: TabId, change: TabChange },
}

#[cfg(test)]
#[path = "browser_tests.rs"]
mod tests;
