//! Save snippet tool definition.
//!
//! Writes the raw snippet content under `snippets/{name}.json` and echoes
//! the content back as confirmation.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::Tool,
};
use serde::Deserialize;
use tracing::info;

use super::{SNIPPET_NAME_PROPERTY, SNIPPET_PROPERTY};
use crate::domains::storage::snippet_key;
use crate::domains::tools::binder;
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::{to_mcp_error, tool_model};
use crate::domains::tools::error::ToolError;
use crate::domains::tools::response::ToolResponse;
use crate::domains::tools::schema::{PropertyDefinition, PropertyType, ToolDefinition};

/// Parameters for the save snippet tool.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveSnippetParams {
    /// Name to store the snippet under.
    #[serde(rename = "snippetname")]
    pub name: String,

    /// The snippet content to store.
    #[serde(rename = "snippet")]
    pub snippet: String,
}

/// Save snippet tool - stores snippet content by name.
pub struct SaveSnippetTool;

impl SaveSnippetTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "save_snippet";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Save a code snippet under a given name";

    /// Invocation contract for this tool.
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION)
            .with_property(PropertyDefinition::required(
                SNIPPET_NAME_PROPERTY,
                PropertyType::String,
                "The name to store the snippet under",
            ))
            .with_property(PropertyDefinition::required(
                SNIPPET_PROPERTY,
                PropertyType::String,
                "The snippet content to store",
            ))
    }

    /// Execute the tool logic.
    pub async fn execute(
        params: &SaveSnippetParams,
        ctx: &ToolContext,
    ) -> Result<ToolResponse, ToolError> {
        info!("Saving snippet: {}", params.name);
        ctx.store
            .write(&snippet_key(&params.name), &params.snippet)
            .await?;
        Ok(ToolResponse::Text(params.snippet.clone()))
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
                let params: SaveSnippetParams = binder::bind(&Self::definition(), &args)
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
