//! # Tabweave Context
//!
//! Builds the list of context items offered to the model and keeps it in
//! step with the browser.
//!
//! - [`ContextAggregator`] gathers the current page, open tabs and bookmarks
//! - [`SyncController`] rebuilds the aggregate after browser events, debounced
//! - [`ContextSink`] receives the rebuilt list and owns the user's selection

mod aggregator;
mod controller;
mod debounce;
mod search;
mod sink;

pub use aggregator::{ContextAggregator, ContextSource, DEFAULT_BOOKMARK_LIMIT};
pub use controller::{SyncController, DEFAULT_QUIET_PERIOD};
pub use debounce::Debouncer;
pub use search::search;
pub use sink::{ContextSink, ContextState};
