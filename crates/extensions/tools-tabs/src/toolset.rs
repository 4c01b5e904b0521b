//! Wiring of the tab tools into a registry.

use std::sync::Arc;

use tracing::info;

use tabweave_access::HostAccessPolicy;
use tabweave_context::ContextAggregator;
use tabweave_organizer::TabOrganizer;
use tabweave_protocols::{Tool, ToolError};

use crate::registry::ToolRegistry;
use crate::tools::{ContextListTool, HostAccessCheckTool, OrganizeTabsTool, UngroupAllTool};

/// The engine components the tab tools act through.
pub struct TabToolset {
    organizer: Arc<TabOrganizer>,
    aggregator: Arc<ContextAggregator>,
    policy: Arc<HostAccessPolicy>,
}

impl TabToolset {
    pub fn new(
        organizer: Arc<TabOrganizer>,
        aggregator: Arc<ContextAggregator>,
        policy: Arc<HostAccessPolicy>,
    ) -> Self {
        Self {
            organizer,
            aggregator,
            policy,
        }
    }

    pub fn tools(&self) -> Vec<Arc<dyn Tool>> {
        vec![
            Arc::new(OrganizeTabsTool::new(self.organizer.clone())),
            Arc::new(UngroupAllTool::new(self.organizer.clone())),
            Arc::new(ContextListTool::new(self.aggregator.clone())),
            Arc::new(HostAccessCheckTool::new(self.policy.clone())),
        ]
    }

    /// Register every tab tool.
    pub fn register(&self, registry: &ToolRegistry) -> Result<(), ToolError> {
        let tools = self.tools();
        let count = tools.len();
        for tool in tools {
            registry.register(tool)?;
        }
        info!("Registered {} tab tools", count);
        Ok(())
    }
}
