//! Tool registry.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use tabweave_protocols::{Tool, ToolContext, ToolDefinition, ToolError, ToolResult};

/// Registry of callable tools, keyed by tool id.
pub struct ToolRegistry {
    tools: DashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: DashMap::new(),
        }
    }

    /// Register a tool. Fails if the id is taken.
    pub fn register(&self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let id = tool.definition().id.clone();
        if self.tools.contains_key(&id) {
            return Err(ToolError::AlreadyRegistered(id));
        }
        debug!("Registered tool {}", id);
        self.tools.insert(id, tool);
        Ok(())
    }

    pub fn unregister(&self, id: &str) -> Result<(), ToolError> {
        self.tools
            .remove(id)
            .ok_or_else(|| ToolError::NotFound(id.to_string()))?;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(id).map(|tool| tool.clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tools.contains_key(id)
    }

    /// All tool definitions, sorted by id.
    pub fn list(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> = self
            .tools
            .iter()
            .map(|tool| tool.definition().clone())
            .collect();
        definitions.sort_by(|a, b| a.id.cmp(&b.id));
        definitions
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Validate and run a tool by id.
    pub async fn execute(
        &self,
        id: &str,
        params: serde_json::Value,
        ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let tool = self
            .get(id)
            .ok_or_else(|| ToolError::NotFound(id.to_string()))?;
        tool.validate(&params)?;
        debug!("Executing tool {} (correlation {})", id, ctx.correlation_id);
        tool.execute(params, ctx).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
