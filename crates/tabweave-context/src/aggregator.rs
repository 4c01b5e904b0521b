//! Context aggregation from live browser sources.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use tabweave_protocols::{BookmarkNode, BrowserHost, ContextItem, HostError, Tab, TabQuery};

/// Bookmarks offered as context when no limit is configured.
pub const DEFAULT_BOOKMARK_LIMIT: usize = 50;

/// Anything that can produce a fresh list of context items.
#[async_trait]
pub trait ContextSource: Send + Sync {
    async fn fetch_contexts(&self) -> Result<Vec<ContextItem>, HostError>;
}

/// Gathers context items from the current page, the open tabs and the
/// bookmark tree.
pub struct ContextAggregator {
    host: Arc<dyn BrowserHost>,
    bookmark_limit: usize,
}

impl ContextAggregator {
    pub fn new(host: Arc<dyn BrowserHost>) -> Self {
        Self {
            host,
            bookmark_limit: DEFAULT_BOOKMARK_LIMIT,
        }
    }

    pub fn with_bookmark_limit(mut self, limit: usize) -> Self {
        self.bookmark_limit = limit;
        self
    }

    /// Build the full, deduplicated candidate list.
    ///
    /// The three sources are fetched concurrently and independently. A source
    /// that fails contributes nothing; this never returns an error.
    pub async fn aggregate(&self) -> Vec<ContextItem> {
        let (page, tabs, bookmarks) =
            tokio::join!(self.current_page(), self.open_tabs(), self.bookmarks());

        let page = page.unwrap_or_else(|e| {
            warn!("Current page context unavailable: {}", e);
            None
        });
        let mut tabs = tabs.unwrap_or_else(|e| {
            warn!("Tab context unavailable: {}", e);
            Vec::new()
        });
        let mut bookmarks = bookmarks.unwrap_or_else(|e| {
            warn!("Bookmark context unavailable: {}", e);
            Vec::new()
        });

        let mut contexts = Vec::with_capacity(1 + tabs.len() + bookmarks.len());
        if let Some(page) = page {
            let page_tab = page.tab_id();
            let page_url = page.url().map(str::to_string);
            tabs.retain(|item| item.tab_id() != page_tab);
            if let Some(url) = page_url {
                bookmarks.retain(|item| item.url() != Some(url.as_str()));
            }
            contexts.push(page);
        }
        contexts.extend(tabs);
        contexts.extend(bookmarks);

        debug!("Aggregated {} context items", contexts.len());
        contexts
    }

    /// The active tab of the current window as a `page` item.
    ///
    /// Uses the rendered page content when the host can extract it and falls
    /// back to the tab's URL and title otherwise.
    pub async fn current_page(&self) -> Result<Option<ContextItem>, HostError> {
        let active = self
            .host
            .query_tabs(TabQuery::active_in_current_window())
            .await?;
        let Some(tab) = active.into_iter().next() else {
            debug!("No active tab in the current window");
            return Ok(None);
        };
        let Some(tab_id) = tab.id else {
            return Ok(None);
        };
        let url = tab.url.clone().unwrap_or_default();

        let item = match self.host.extract_page_content(tab_id).await {
            Ok(page) => {
                let title = non_empty(&page.title)
                    .or(tab.title.as_deref())
                    .unwrap_or(url.as_str())
                    .to_string();
                ContextItem::page(tab_id, title.clone(), page.content)
                    .with_metadata("url", json!(url))
                    .with_metadata("title", json!(title))
                    .with_metadata("extracted", json!(true))
            }
            Err(e) => {
                debug!("Page content unavailable for tab {}: {}", tab_id, e);
                let title = tab.title.clone().unwrap_or_else(|| url.clone());
                ContextItem::page(tab_id, title.clone(), url.clone())
                    .with_metadata("url", json!(url))
                    .with_metadata("title", json!(title))
                    .with_metadata("extracted", json!(false))
            }
        };
        Ok(Some(with_fav_icon(item, &tab)))
    }

    /// Every tab with an id and a title, across all windows.
    pub async fn open_tabs(&self) -> Result<Vec<ContextItem>, HostError> {
        let tabs = self.host.query_tabs(TabQuery::all()).await?;
        Ok(tabs.iter().filter_map(tab_item).collect())
    }

    /// URL-bearing bookmarks in depth-first order, up to the bookmark limit.
    pub async fn bookmarks(&self) -> Result<Vec<ContextItem>, HostError> {
        let tree = self.host.get_bookmark_tree().await?;
        let mut items = Vec::new();
        collect_bookmarks(&tree, self.bookmark_limit, &mut items);
        Ok(items)
    }
}

#[async_trait]
impl ContextSource for ContextAggregator {
    async fn fetch_contexts(&self) -> Result<Vec<ContextItem>, HostError> {
        Ok(self.aggregate().await)
    }
}

fn tab_item(tab: &Tab) -> Option<ContextItem> {
    let id = tab.id?;
    let title = tab.title.as_deref()?;
    let url = tab.url.clone().unwrap_or_default();
    let mut item = ContextItem::tab(id, title, url.clone())
        .with_metadata("url", json!(url))
        .with_metadata("title", json!(title))
        .with_metadata("windowId", json!(tab.window_id));
    if let Some(accessed) = tab.last_accessed {
        item = item.with_metadata("lastAccessed", json!(accessed));
    }
    Some(with_fav_icon(item, tab))
}

fn with_fav_icon(item: ContextItem, tab: &Tab) -> ContextItem {
    match &tab.fav_icon_url {
        Some(icon) => item.with_metadata("favIconUrl", json!(icon)),
        None => item,
    }
}

fn collect_bookmarks(nodes: &[BookmarkNode], limit: usize, out: &mut Vec<ContextItem>) {
    for node in nodes {
        if out.len() >= limit {
            return;
        }
        if let Some(url) = &node.url {
            let label = non_empty(&node.title).unwrap_or(url.as_str());
            let mut item = ContextItem::bookmark(&node.id, label, url.clone())
                .with_metadata("url", json!(url))
                .with_metadata("title", json!(node.title));
            if let Some(added) = node.date_added {
                item = item.with_metadata("dateAdded", json!(added));
            }
            out.push(item);
        }
        collect_bookmarks(&node.children, limit, out);
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.trim().is_empty() { None } else { Some(s) }
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod tests;
