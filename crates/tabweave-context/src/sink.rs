//! Receivers of rebuilt context lists.

use parking_lot::RwLock;
use tracing::debug;

use tabweave_protocols::ContextItem;

/// Receives aggregation results and owns the user's selection.
///
/// Methods are synchronous: removals must land before the caller returns.
pub trait ContextSink: Send + Sync {
    /// A rebuild finished with `contexts`.
    fn contexts_updated(&self, contexts: Vec<ContextItem>);

    /// Items the user has selected as model input.
    fn selected(&self) -> Vec<ContextItem>;

    /// Drop a selected item.
    fn remove_selected(&self, id: &str);
}

#[derive(Default)]
struct StateInner {
    available: Vec<ContextItem>,
    selected: Vec<ContextItem>,
    revision: u64,
}

/// In-process [`ContextSink`] holding the latest candidates and a selection.
#[derive(Default)]
pub struct ContextState {
    inner: RwLock<StateInner>,
}

impl ContextState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest candidate list.
    pub fn available(&self) -> Vec<ContextItem> {
        self.inner.read().available.clone()
    }

    /// Number of rebuilds received.
    pub fn revision(&self) -> u64 {
        self.inner.read().revision
    }

    /// Select a candidate by id. Returns `false` if it is unknown or already
    /// selected.
    pub fn select(&self, id: &str) -> bool {
        let mut inner = self.inner.write();
        if inner.selected.iter().any(|item| item.id == id) {
            return false;
        }
        let Some(item) = inner.available.iter().find(|item| item.id == id).cloned() else {
            return false;
        };
        inner.selected.push(item);
        true
    }

    /// Select an item directly, whether or not it is a current candidate.
    pub fn select_item(&self, item: ContextItem) {
        let mut inner = self.inner.write();
        if !inner.selected.iter().any(|s| s.id == item.id) {
            inner.selected.push(item);
        }
    }
}

impl ContextSink for ContextState {
    fn contexts_updated(&self, contexts: Vec<ContextItem>) {
        let mut inner = self.inner.write();
        inner.available = contexts;
        inner.revision += 1;
        debug!(
            "Context list updated (revision {}, {} items)",
            inner.revision,
            inner.available.len()
        );
    }

    fn selected(&self) -> Vec<ContextItem> {
        self.inner.read().selected.clone()
    }

    fn remove_selected(&self, id: &str) {
        self.inner.write().selected.retain(|item| item.id != id);
    }
}
