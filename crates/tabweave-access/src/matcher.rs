//! Host matching against a [`HostAccessConfig`].

use serde::Serialize;
use url::Url;

use crate::config::{AccessMode, HostAccessConfig};

/// Outcome of an access check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AccessDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

/// Decide whether the assistant may act on `url`.
///
/// A URL without a host (`about:blank`, `file://`) is checked with an empty
/// hostname, which no list entry matches.
pub fn is_allowed(url: &str, config: &HostAccessConfig) -> AccessDecision {
    let host = match Url::parse(url) {
        Ok(parsed) => parsed.host_str().unwrap_or_default().to_lowercase(),
        Err(_) => return AccessDecision::deny("Invalid URL"),
    };

    match config.mode {
        AccessMode::IncludeAll => AccessDecision::allow(),
        AccessMode::Whitelist => {
            if matches_any(&host, &config.whitelist) {
                AccessDecision::allow()
            } else {
                AccessDecision::deny(format!("Host {} is not in the whitelist", host))
            }
        }
        AccessMode::Blocklist => {
            if matches_any(&host, &config.blocklist) {
                AccessDecision::deny(format!("Host {} is blocked", host))
            } else {
                AccessDecision::allow()
            }
        }
    }
}

fn matches_any(host: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| host_matches(host, pattern))
}

/// `*.domain` and bare `domain` both cover the domain and its subdomains.
pub(crate) fn host_matches(host: &str, pattern: &str) -> bool {
    let pattern = pattern.trim().to_lowercase();
    let domain = pattern.strip_prefix("*.").unwrap_or(&pattern);
    if domain.is_empty() || host.is_empty() {
        return false;
    }
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
