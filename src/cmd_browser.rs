//! Snapshot-backed subcommand handlers.

use std::path::Path;

use anyhow::{bail, Context as _};
use tracing::info;

use tabweave_config::Config;
use tabweave_context::search;
use tabweave_protocols::{MemoryBrowser, ToolContext};

use crate::engine::Engine;

/// Print the context items of a snapshot.
pub(crate) async fn context(config: &Config, snapshot: &Path, query: Option<&str>) -> anyhow::Result<()> {
    let engine = Engine::from_snapshot(config, snapshot)?;
    let contexts = engine.aggregator.aggregate().await;
    let found = search(&contexts, query.unwrap_or_default());

    if found.is_empty() {
        println!("No context items found.");
        return Ok(());
    }

    println!("{:<16} {:<9} {:<40} {}", "ID", "TYPE", "LABEL", "VALUE");
    println!("{}", "-".repeat(100));
    for item in &found {
        println!(
            "{:<16} {:<9} {:<40} {}",
            item.id,
            item.kind.prefix(),
            truncate(&item.label, 38),
            truncate(&item.value, 60)
        );
    }
    println!("\n{} of {} items", found.len(), contexts.len());
    Ok(())
}

/// Organize a snapshot's tabs and print the resulting groups.
pub(crate) async fn organize(config: &Config, snapshot: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let engine = Engine::from_snapshot(config, snapshot)?;
    let result = engine.organizer.organize_tabs().await;
    if !result.success {
        bail!(
            "Organization failed: {}",
            result.error.unwrap_or_else(|| "unknown error".to_string())
        );
    }

    println!(
        "Organized {} tabs into {} proposed groups.",
        result.grouped_tabs.unwrap_or(0),
        result.groups.unwrap_or(0)
    );
    let tabs = engine.browser.tabs();
    for group in engine.browser.groups() {
        let state = if group.collapsed { "collapsed" } else { "expanded" };
        println!(
            "\n{} ({}, {:?})",
            group.title.as_deref().unwrap_or("(untitled)"),
            state,
            group.color
        );
        for tab in tabs.iter().filter(|t| t.group_id == Some(group.id)) {
            println!("  - {}", tab.title.as_deref().unwrap_or("(untitled)"));
        }
    }

    if let Some(output) = output {
        write_snapshot(&engine.browser, output)?;
        info!("Wrote reorganized snapshot to {}", output.display());
    }
    Ok(())
}

/// List every registered tool.
pub(crate) fn list_tools(config: &Config) -> anyhow::Result<()> {
    let engine = Engine::new(config, MemoryBrowser::new())?;
    println!("{:<20} {:<8} {}", "ID", "RISK", "DESCRIPTION");
    println!("{}", "-".repeat(80));
    for definition in engine.registry.list() {
        println!(
            "{:<20} {:<8} {}",
            definition.id,
            format!("{:?}", definition.risk_level).to_lowercase(),
            definition.description
        );
    }
    Ok(())
}

/// Run one tool and print its result as JSON.
pub(crate) async fn run_tool(
    config: &Config,
    tool_id: &str,
    snapshot: &Path,
    params: &str,
) -> anyhow::Result<()> {
    let params: serde_json::Value =
        serde_json::from_str(params).context("Tool parameters must be JSON")?;
    let engine = Engine::from_snapshot(config, snapshot)?;
    let result = engine
        .registry
        .execute(tool_id, params, ToolContext::new("cli"))
        .await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    if !result.success {
        bail!("Tool {} failed", tool_id);
    }
    Ok(())
}

fn write_snapshot(browser: &MemoryBrowser, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&browser.snapshot())?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    let text = text.replace('\n', " ");
    if text.chars().count() <= max {
        return text;
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer piece of text", 10), "a longe...");
        assert_eq!(truncate("line\nbreak", 20), "line break");
    }
}
