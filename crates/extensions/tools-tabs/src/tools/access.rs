//! Host access tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use tabweave_access::HostAccessPolicy;
use tabweave_protocols::{Tool, ToolContext, ToolDefinition, ToolError, ToolResult};

#[derive(Debug, Deserialize)]
pub struct HostAccessParams {
    pub url: String,
}

/// Reports whether the assistant may act on a URL.
pub struct HostAccessCheckTool {
    definition: ToolDefinition,
    policy: Arc<HostAccessPolicy>,
}

impl HostAccessCheckTool {
    pub fn new(policy: Arc<HostAccessPolicy>) -> Self {
        Self {
            definition: ToolDefinition::new(
                "host_access_check",
                "Check Host Access",
                "Check whether the assistant is allowed to act on a URL",
            )
            .with_parameters_schema(serde_json::json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "URL to check"
                    }
                },
                "required": ["url"]
            })),
            policy,
        }
    }
}

#[async_trait]
impl Tool for HostAccessCheckTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let params: HostAccessParams = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParameters(e.to_string()))?;

        let decision = self.policy.check(&params.url).await;
        let content = match (&decision.reason, decision.allowed) {
            (_, true) => format!("Access to {} is allowed", params.url),
            (Some(reason), false) => format!("Access denied: {}", reason),
            (None, false) => "Access denied".to_string(),
        };
        let output = serde_json::to_value(&decision)
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;
        Ok(ToolResult::success_json(content, output))
    }
}
