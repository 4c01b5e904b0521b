//! Tab summaries sent to the classifier.

use serde::Serialize;
use url::Url;

use tabweave_protocols::{Tab, TabId};

/// What the classifier sees of one tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabDescriptor {
    pub id: TabId,
    pub title: String,
    pub url: String,
    pub hostname: String,
}

impl TabDescriptor {
    /// Describe a tab. Tabs without an id or URL cannot be grouped.
    pub fn from_tab(tab: &Tab) -> Option<Self> {
        let id = tab.id?;
        let url = tab.url.as_deref().filter(|u| !u.trim().is_empty())?;
        Some(Self {
            id,
            title: tab.title.clone().unwrap_or_default(),
            url: url.to_string(),
            hostname: hostname_of(url),
        })
    }
}

/// The URL host, or `scheme://` for URLs without one. Unparsable input
/// without a scheme is kept whole, followed by `://`.
pub(crate) fn hostname_of(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => format!("{}://", parsed.scheme()),
        },
        Err(_) => match url.split_once(':') {
            Some((scheme, _)) => format!("{}://", scheme),
            None => format!("{}://", url),
        },
    }
}
