//! Keeps the context list in step with the browser.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use tabweave_protocols::{BrowserHost, TabEvent, TabId, TabQuery};

use crate::aggregator::ContextSource;
use crate::debounce::Debouncer;
use crate::sink::ContextSink;

/// Quiet period after the last browser event before a rebuild fires.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

struct Inner {
    source: Arc<dyn ContextSource>,
    sink: Arc<dyn ContextSink>,
    debouncer: Debouncer,
    quiet_period: Duration,
    initialized: AtomicBool,
    stopped: AtomicBool,
    rebuild_lock: tokio::sync::Mutex<()>,
}

impl Inner {
    fn handle_event(self: &Arc<Self>, event: TabEvent) {
        if self.stopped.load(Ordering::SeqCst) {
            debug!("Ignoring browser event after stop");
            return;
        }
        match event {
            TabEvent::Activated { tab_id, .. } => {
                debug!("Tab {} activated", tab_id);
                self.schedule_rebuild();
            }
            TabEvent::Created { tab } => {
                debug!("Tab {:?} created", tab.id);
                self.schedule_rebuild();
            }
            TabEvent::Updated { tab_id, change } => {
                if change.affects_context() {
                    debug!("Tab {} updated", tab_id);
                    self.schedule_rebuild();
                }
            }
            TabEvent::Removed { tab_id, .. } => {
                self.drop_selected_for(tab_id);
                self.schedule_rebuild();
            }
        }
    }

    /// Selected items that point at a closed tab go away before any rebuild.
    fn drop_selected_for(&self, tab_id: TabId) {
        for item in self.sink.selected() {
            if item.tab_id() == Some(tab_id) {
                debug!("Removing selected context {} of closed tab", item.id);
                self.sink.remove_selected(&item.id);
            }
        }
    }

    /// Drop selected items whose tab is no longer open. Used when removal
    /// events may have been missed.
    async fn prune_closed(&self, host: &dyn BrowserHost) {
        let open: HashSet<TabId> = match host.query_tabs(TabQuery::all()).await {
            Ok(tabs) => tabs.into_iter().filter_map(|t| t.id).collect(),
            Err(e) => {
                warn!("Cannot list open tabs to prune the selection: {}", e);
                return;
            }
        };
        for item in self.sink.selected() {
            if item.tab_id().is_some_and(|id| !open.contains(&id)) {
                debug!("Removing selected context {} of closed tab", item.id);
                self.sink.remove_selected(&item.id);
            }
        }
    }

    fn schedule_rebuild(self: &Arc<Self>) {
        let inner = self.clone();
        self.debouncer
            .schedule(self.quiet_period, move || async move { inner.rebuild().await });
    }

    async fn rebuild(&self) {
        let _guard = self.rebuild_lock.lock().await;
        if self.stopped.load(Ordering::SeqCst) {
            return;
        }
        match self.source.fetch_contexts().await {
            Ok(contexts) => {
                if self.stopped.load(Ordering::SeqCst) {
                    return;
                }
                debug!("Context rebuild produced {} items", contexts.len());
                self.sink.contexts_updated(contexts);
            }
            Err(e) => error!("Context rebuild failed: {}", e),
        }
    }
}

/// Rebuilds the context list after browser lifecycle events.
///
/// Bursts of events are coalesced into one rebuild after a quiet period.
/// Closing a tab removes the user's selected items for it right away.
pub struct SyncController {
    host: Arc<dyn BrowserHost>,
    inner: Arc<Inner>,
    event_loop: Mutex<Option<JoinHandle<()>>>,
}

impl SyncController {
    pub fn new(
        host: Arc<dyn BrowserHost>,
        source: Arc<dyn ContextSource>,
        sink: Arc<dyn ContextSink>,
        quiet_period: Duration,
    ) -> Self {
        Self {
            host,
            inner: Arc::new(Inner {
                source,
                sink,
                debouncer: Debouncer::new(),
                quiet_period,
                initialized: AtomicBool::new(false),
                stopped: AtomicBool::new(false),
                rebuild_lock: tokio::sync::Mutex::new(()),
            }),
            event_loop: Mutex::new(None),
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.inner.quiet_period
    }

    /// Subscribe to browser events and start rebuilding on them.
    ///
    /// The first start also rebuilds once, immediately. Starting a running
    /// controller does nothing.
    pub async fn start(&self) {
        if self.is_running() {
            return;
        }
        self.inner.stopped.store(false, Ordering::SeqCst);
        let mut events = self.host.subscribe();

        if !self.inner.initialized.swap(true, Ordering::SeqCst) {
            self.inner.rebuild().await;
        }

        let inner = self.inner.clone();
        let host = self.host.clone();
        let handle = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => inner.handle_event(event),
                    Err(RecvError::Lagged(missed)) => {
                        warn!("Missed {} browser events, rebuilding", missed);
                        inner.prune_closed(host.as_ref()).await;
                        inner.schedule_rebuild();
                    }
                    Err(RecvError::Closed) => {
                        debug!("Browser event stream closed");
                        break;
                    }
                }
            }
        });
        *self.event_loop.lock() = Some(handle);
        info!("Context sync started");
    }

    /// Stop listening and drop any pending rebuild.
    pub fn stop(&self) {
        self.inner.stopped.store(true, Ordering::SeqCst);
        self.inner.debouncer.cancel();
        if let Some(handle) = self.event_loop.lock().take() {
            handle.abort();
            info!("Context sync stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.event_loop
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Whether a debounced rebuild is waiting.
    pub fn rebuild_pending(&self) -> bool {
        self.inner.debouncer.is_pending()
    }

    /// Feed one browser event, as the event loop does.
    pub fn handle_event(&self, event: TabEvent) {
        self.inner.handle_event(event);
    }

    /// Rebuild now, bypassing the quiet period.
    pub async fn rebuild_now(&self) {
        self.inner.rebuild().await;
    }
}

impl Drop for SyncController {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
