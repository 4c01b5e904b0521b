//! Context listing tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use tabweave_context::{search, ContextAggregator};
use tabweave_protocols::{Tool, ToolContext, ToolDefinition, ToolError, ToolResult};

#[derive(Debug, Default, Deserialize)]
pub struct ContextListParams {
    #[serde(default)]
    pub query: Option<String>,
}

/// Lists the context items currently on offer.
pub struct ContextListTool {
    definition: ToolDefinition,
    aggregator: Arc<ContextAggregator>,
}

impl ContextListTool {
    pub fn new(aggregator: Arc<ContextAggregator>) -> Self {
        Self {
            definition: ToolDefinition::new(
                "context_list",
                "List Context",
                "List the current page, open tabs and bookmarks available as context",
            )
            .with_parameters_schema(serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Case-insensitive text to filter labels and values by"
                    }
                }
            })),
            aggregator,
        }
    }
}

#[async_trait]
impl Tool for ContextListTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let params: ContextListParams = if params.is_null() {
            ContextListParams::default()
        } else {
            serde_json::from_value(params)
                .map_err(|e| ToolError::InvalidParameters(e.to_string()))?
        };

        let contexts = self.aggregator.aggregate().await;
        let query = params.query.unwrap_or_default();
        let found = search(&contexts, &query);
        debug!("context_list: {} of {} items match", found.len(), contexts.len());

        let content = found
            .iter()
            .map(|item| format!("[{}] {}: {}", item.id, item.label, item.value))
            .collect::<Vec<_>>()
            .join("\n");
        let output = serde_json::to_value(&found)
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;
        Ok(ToolResult::success_json(content, output).with_metadata("total", found.len().into()))
    }
}
