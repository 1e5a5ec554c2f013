//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod hello;
pub mod order;
pub mod snippets;

pub use hello::SayHelloTool;
pub use order::{
    OrderItem, OrderSummary, ProcessOrderParams, ProcessOrderTool, ValidateOrderParams,
    ValidateOrderTool,
};
pub use snippets::{
    BulkSaveSnippetsParams, BulkSaveSnippetsTool, GetSnippetParams, GetSnippetTool,
    SaveSnippetParams, SaveSnippetTool, SearchCriteria, SearchSnippetsParams, SearchSnippetsTool,
    SnippetInfo,
};

use rmcp::ErrorData as McpError;
use rmcp::model::Tool;

use super::error::ToolError;
use super::schema::ToolDefinition;

/// Build the rmcp Tool model from a schema definition.
pub(crate) fn tool_model(definition: &ToolDefinition) -> Tool {
    Tool {
        name: definition.name.clone().into(),
        description: Some(definition.description.clone().into()),
        input_schema: definition.input_schema_arc(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Map a tool error onto the MCP fault taxonomy.
pub(crate) fn to_mcp_error(err: ToolError) -> McpError {
    match err {
        ToolError::ResourceNotFound(_) | ToolError::NotFound(_) => {
            McpError::resource_not_found(err.to_string(), None)
        }
        ToolError::InvalidArguments(_) => McpError::invalid_params(err.to_string(), None),
        other => McpError::internal_error(other.to_string(), None),
    }
}
