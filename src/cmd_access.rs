//! Access subcommand handlers.

use anyhow::Context as _;

use tabweave_access::{AccessList, AccessMode};
use tabweave_config::Config;

use crate::cli::AccessAction;
use crate::engine::access_policy;

/// Handle access subcommands.
pub(crate) async fn handle_access_command(action: AccessAction, config: &Config) -> anyhow::Result<()> {
    let policy = access_policy(config);

    match action {
        AccessAction::Show => {
            let current = policy.load().await;
            println!("Mode: {}", current.mode);
            print_list("Whitelist", &current.whitelist);
            print_list("Blocklist", &current.blocklist);
        }
        AccessAction::Check { url } => {
            let decision = policy.check(&url).await;
            if decision.allowed {
                println!("allowed: {}", url);
            } else {
                println!(
                    "denied: {} ({})",
                    url,
                    decision.reason.as_deref().unwrap_or("no reason given")
                );
            }
        }
        AccessAction::Mode { mode } => {
            let mode: AccessMode = mode.parse()?;
            policy.set_mode(mode).await?;
            println!("Mode set to {}", mode);
        }
        AccessAction::Allow { pattern } => {
            add(&policy, AccessList::Whitelist, &pattern).await?;
        }
        AccessAction::Block { pattern } => {
            add(&policy, AccessList::Blocklist, &pattern).await?;
        }
        AccessAction::Forget { list, pattern } => {
            let list: AccessList = list.parse()?;
            if policy
                .remove_pattern(list, &pattern)
                .await
                .with_context(|| format!("Failed to update the {}", list))?
            {
                println!("Removed {} from the {}", pattern, list);
            } else {
                println!("{} is not in the {}", pattern, list);
            }
        }
    }
    Ok(())
}

async fn add(
    policy: &tabweave_access::HostAccessPolicy,
    list: AccessList,
    pattern: &str,
) -> anyhow::Result<()> {
    if policy
        .add_pattern(list, pattern)
        .await
        .with_context(|| format!("Failed to update the {}", list))?
    {
        println!("Added {} to the {}", pattern, list);
    } else {
        println!("{} is already in the {}", pattern, list);
    }
    Ok(())
}

fn print_list(name: &str, entries: &[String]) {
    if entries.is_empty() {
        println!("{}: (empty)", name);
        return;
    }
    println!("{}:", name);
    for entry in entries {
        println!("  {}", entry);
    }
}
