//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// tabweave CLI.
#[derive(Parser)]
#[command(name = "tabweave")]
#[command(about = "Context synchronization and AI tab organization for browser assistants")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.tabweave/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Host access policy management
    Access {
        #[command(subcommand)]
        action: AccessAction,
    },

    /// List the context items a browser snapshot offers
    Context {
        /// Browser snapshot (JSON)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Only show items whose label or value contains this text
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Group the current window's tabs of a snapshot by topic
    Organize {
        /// Browser snapshot (JSON)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Write the reorganized snapshot here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the available tools
    Tools,

    /// Run one tool against a snapshot
    Tool {
        /// Tool ID
        tool_id: String,

        /// Browser snapshot (JSON)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Tool parameters (JSON object)
        #[arg(short, long, default_value = "{}")]
        params: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum AccessAction {
    /// Show the current policy
    Show,

    /// Check whether a URL is allowed
    Check {
        /// URL to check
        url: String,
    },

    /// Set the policy mode (include-all, whitelist, blocklist)
    Mode {
        mode: String,
    },

    /// Add a pattern to the whitelist
    Allow {
        pattern: String,
    },

    /// Add a pattern to the blocklist
    Block {
        pattern: String,
    },

    /// Remove a pattern from a list
    Forget {
        /// List name (whitelist, blocklist)
        list: String,

        pattern: String,
    },
}
