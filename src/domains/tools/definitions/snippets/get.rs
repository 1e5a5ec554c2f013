//! Get snippet tool definition.
//!
//! Reads the raw content stored under `snippets/{name}.json` and returns
//! it verbatim. A missing snippet propagates as a not-found fault to the
//! host.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::Tool,
};
use serde::Deserialize;
use tracing::info;

use super::SNIPPET_NAME_PROPERTY;
use crate::domains::storage::snippet_key;
use crate::domains::tools::binder;
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::{to_mcp_error, tool_model};
use crate::domains::tools::error::ToolError;
use crate::domains::tools::response::ToolResponse;
use crate::domains::tools::schema::{PropertyDefinition, PropertyType, ToolDefinition};

/// Parameters for the get snippet tool.
#[derive(Debug, Clone, Deserialize)]
pub struct GetSnippetParams {
    /// Name of the snippet to retrieve.
    #[serde(rename = "snippetname")]
    pub name: String,
}

/// Get snippet tool - retrieves stored snippet content by name.
pub struct GetSnippetTool;

impl GetSnippetTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_snippet";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Retrieve a saved code snippet by name";

    /// Invocation contract for this tool.
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION).with_property(
            PropertyDefinition::required(
                SNIPPET_NAME_PROPERTY,
                PropertyType::String,
                "The name of the snippet to retrieve",
            ),
        )
    }

    /// Execute the tool logic.
    pub async fn execute(
        params: &GetSnippetParams,
        ctx: &ToolContext,
    ) -> Result<ToolResponse, ToolError> {
        info!("Retrieving snippet: {}", params.name);
        let content = ctx.store.read(&snippet_key(&params.name)).await?;
        Ok(ToolResponse::Text(content))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model(&Self::definition())
    }

    /// Create a ToolRoute for STDIO transport.
    pub fn create_route<S>(context: Arc<ToolContext>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let context = context.clone();
            async move {
                let params: GetSnippetParams = binder::bind(&Self::definition(), &args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                let response = Self::execute(&params, &context)
                    .await
                    .map_err(to_mcp_error)?;
                Ok(response.into_call_result())
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
