//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tools domain.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per
//! tool. Each tool declares its schema via `definition()` and its logic
//! via `execute()`. The ToolRouter (STDIO) and the ToolRegistry (HTTP and
//! tests) are both built from those definitions, so adding a new tool
//! does not require modifying this file.

use rmcp::{
    ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler,
};
use std::sync::Arc;

use super::config::Config;
// Renamed so the plain `Result` the tool_handler expansion spells stays std's.
use super::error::Result as CoreResult;
use crate::domains::tools::{ToolContext, ToolRegistry, build_tool_router};

#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// The main MCP server handler.
///
/// Implements the `ServerHandler` trait from rmcp and routes tool calls
/// through the schema registry and binder.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Central tool registry (schemas + dispatch).
    registry: Arc<ToolRegistry>,

    /// Tool router for handling STDIO tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails fast when two tools declare the same name.
    pub fn new(config: Config) -> CoreResult<Self> {
        let config = Arc::new(config);
        let context = Arc::new(ToolContext::from_config(&config));
        let registry = Arc::new(ToolRegistry::new(context.clone())?);

        Ok(Self {
            tool_router: build_tool_router::<Self>(context),
            config,
            registry,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.registry
            .get_all_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Dispatch goes through the ToolRegistry: schema lookup, binding,
    /// execution, then rendering into MCP content. Errors stay typed so the
    /// transport can map them onto JSON-RPC codes.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let response = self.registry.call_tool(name, arguments).await?;
        Ok(serde_json::json!({
            "content": [ { "type": "text", "text": response.render() } ],
            "isError": false
        }))
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool
/// routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Snippet MCP server. Provides snippet storage and search, \
                 order processing demos, and an identity greeting tool."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_builds_from_default_config() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.name(), "snippet-mcp-server");
        assert_eq!(server.list_tools().len(), 7);
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_http_call_tool_renders_content() {
        let server = McpServer::new(Config::default()).unwrap();
        let result = server
            .call_tool(
                "validate_order",
                serde_json::json!({ "order-data": { "orderId": "abc12345" } }),
            )
            .await
            .unwrap();

        assert_eq!(result["isError"], false);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("\"isValid\": false"));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_http_call_unknown_tool_errors() {
        let server = McpServer::new(Config::default()).unwrap();
        let err = server
            .call_tool("unknown", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(name) if name == "unknown"));
    }
}
