//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! Each tool knows how to create its own route; the routes bind their
//! arguments with the same schema definitions the registry dispatches
//! through, so both transports enforce identical contracts.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::context::ToolContext;
use super::definitions::{
    BulkSaveSnippetsTool, GetSnippetTool, ProcessOrderTool, SaveSnippetTool, SayHelloTool,
    SearchSnippetsTool, ValidateOrderTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(context: Arc<ToolContext>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(SayHelloTool::create_route(context.clone()))
        .with_route(ProcessOrderTool::create_route())
        .with_route(ValidateOrderTool::create_route())
        .with_route(GetSnippetTool::create_route(context.clone()))
        .with_route(SaveSnippetTool::create_route(context.clone()))
        .with_route(BulkSaveSnippetsTool::create_route(context.clone()))
        .with_route(SearchSnippetsTool::create_route(context))
}
