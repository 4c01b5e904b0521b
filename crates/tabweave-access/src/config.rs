//! Host access configuration document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AccessError;

/// How the host lists are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessMode {
    /// Every host is allowed.
    #[default]
    IncludeAll,
    /// Only hosts matching the whitelist are allowed.
    Whitelist,
    /// Hosts matching the blocklist are denied.
    Blocklist,
}

impl AccessMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IncludeAll => "include-all",
            Self::Whitelist => "whitelist",
            Self::Blocklist => "blocklist",
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessMode {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "include-all" | "all" => Ok(Self::IncludeAll),
            "whitelist" => Ok(Self::Whitelist),
            "blocklist" => Ok(Self::Blocklist),
            other => Err(AccessError::UnknownMode(other.to_string())),
        }
    }
}

/// One of the two pattern lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessList {
    Whitelist,
    Blocklist,
}

impl fmt::Display for AccessList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whitelist => f.write_str("whitelist"),
            Self::Blocklist => f.write_str("blocklist"),
        }
    }
}

impl FromStr for AccessList {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "whitelist" => Ok(Self::Whitelist),
            "blocklist" => Ok(Self::Blocklist),
            other => Err(AccessError::UnknownList(other.to_string())),
        }
    }
}

/// The host access rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostAccessConfig {
    pub mode: AccessMode,

    #[serde(default)]
    pub whitelist: Vec<String>,

    #[serde(default)]
    pub blocklist: Vec<String>,
}

impl HostAccessConfig {
    pub fn whitelist(patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            mode: AccessMode::Whitelist,
            whitelist: patterns.into_iter().map(Into::into).collect(),
            blocklist: Vec::new(),
        }
    }

    pub fn blocklist(patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            mode: AccessMode::Blocklist,
            whitelist: Vec::new(),
            blocklist: patterns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn list(&self, list: AccessList) -> &[String] {
        match list {
            AccessList::Whitelist => &self.whitelist,
            AccessList::Blocklist => &self.blocklist,
        }
    }

    pub fn list_mut(&mut self, list: AccessList) -> &mut Vec<String> {
        match list {
            AccessList::Whitelist => &mut self.whitelist,
            AccessList::Blocklist => &mut self.blocklist,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serde_names() {
        let json = serde_json::to_string(&AccessMode::IncludeAll).unwrap();
        assert_eq!(json, "\"include-all\"");
        let mode: AccessMode = serde_json::from_str("\"blocklist\"").unwrap();
        assert_eq!(mode, AccessMode::Blocklist);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("Whitelist".parse::<AccessMode>().unwrap(), AccessMode::Whitelist);
        assert_eq!(" include-all ".parse::<AccessMode>().unwrap(), AccessMode::IncludeAll);
        assert!(matches!(
            "open".parse::<AccessMode>(),
            Err(AccessError::UnknownMode(_))
        ));
    }

    #[test]
    fn test_list_from_str() {
        assert_eq!("blocklist".parse::<AccessList>().unwrap(), AccessList::Blocklist);
        assert!("greylist".parse::<AccessList>().is_err());
    }

    #[test]
    fn test_config_missing_lists_default_empty() {
        let config: HostAccessConfig = serde_json::from_str(r#"{"mode": "whitelist"}"#).unwrap();
        assert_eq!(config.mode, AccessMode::Whitelist);
        assert!(config.whitelist.is_empty());
        assert!(config.blocklist.is_empty());
    }

    #[test]
    fn test_config_requires_mode() {
        assert!(serde_json::from_str::<HostAccessConfig>(r#"{"whitelist": []}"#).is_err());
    }
}
