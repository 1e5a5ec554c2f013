//! Tool Registry - central registration and dispatch for all tools.
//!
//! Every tool's schema is registered here once at startup (failing fast on
//! duplicate names). Dispatch resolves the schema, binds the raw arguments,
//! runs the matching handler, and hands back the unserialized response.
//! The HTTP transport and tests call tools through this path; STDIO goes
//! through the rmcp router, which binds with the same definitions.

use std::sync::Arc;

use rmcp::model::Tool;
use serde_json::{Map, Value};

use super::binder;
use super::context::ToolContext;
use super::definitions::{
    BulkSaveSnippetsTool, GetSnippetTool, ProcessOrderTool, SaveSnippetTool, SayHelloTool,
    SearchSnippetsTool, ValidateOrderTool,
};
use super::error::ToolError;
use super::response::ToolResponse;
use super::schema::{SchemaError, SchemaRegistry};

/// Tool registry - owns the schema registry and dispatches invocations.
pub struct ToolRegistry {
    context: Arc<ToolContext>,
    schemas: SchemaRegistry,
}

impl ToolRegistry {
    /// Create a registry with every tool's schema registered.
    ///
    /// Fails when two tools declare the same name.
    pub fn new(context: Arc<ToolContext>) -> Result<Self, SchemaError> {
        let mut schemas = SchemaRegistry::new();
        schemas.register(SayHelloTool::definition())?;
        schemas.register(ProcessOrderTool::definition())?;
        schemas.register(ValidateOrderTool::definition())?;
        schemas.register(GetSnippetTool::definition())?;
        schemas.register(SaveSnippetTool::definition())?;
        schemas.register(BulkSaveSnippetsTool::definition())?;
        schemas.register(SearchSnippetsTool::definition())?;

        Ok(Self { context, schemas })
    }

    /// All registered tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.schemas.tool_names()
    }

    /// All tools as Tool models (metadata).
    pub fn get_all_tools(&self) -> Vec<Tool> {
        self.schemas
            .definitions()
            .iter()
            .map(super::definitions::tool_model)
            .collect()
    }

    /// Dispatch a tool call: resolve schema, bind arguments, execute.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolResponse, ToolError> {
        let definition = self.schemas.get(name)?;
        let args: Map<String, Value> = arguments.as_object().cloned().unwrap_or_default();

        match name {
            SayHelloTool::NAME => {
                binder::validate(definition, &args)?;
                Ok(SayHelloTool::execute(&self.context).await)
            }
            ProcessOrderTool::NAME => {
                let params = binder::bind(definition, &args)?;
                Ok(ProcessOrderTool::execute(&params))
            }
            ValidateOrderTool::NAME => {
                let params = binder::bind(definition, &args)?;
                Ok(ValidateOrderTool::execute(&params))
            }
            GetSnippetTool::NAME => {
                let params = binder::bind(definition, &args)?;
                GetSnippetTool::execute(&params, &self.context).await
            }
            SaveSnippetTool::NAME => {
                let params = binder::bind(definition, &args)?;
                SaveSnippetTool::execute(&params, &self.context).await
            }
            BulkSaveSnippetsTool::NAME => {
                let params = binder::bind(definition, &args)?;
                Ok(BulkSaveSnippetsTool::execute(&params, &self.context).await)
            }
            SearchSnippetsTool::NAME => {
                let params = binder::bind(definition, &args)?;
                SearchSnippetsTool::execute(&params, &self.context).await
            }
            // The schema lookup above already rejects unknown names.
            other => Err(ToolError::NotFound(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::context::test_support::memory_context;
    use serde_json::json;

    fn registry() -> ToolRegistry {
        ToolRegistry::new(Arc::new(memory_context())).unwrap()
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = registry();
        let names = registry.tool_names();
        assert_eq!(names.len(), 7);
        assert!(names.contains(&"say_hello"));
        assert!(names.contains(&"process_order"));
        assert!(names.contains(&"validate_order"));
        assert!(names.contains(&"get_snippet"));
        assert!(names.contains(&"save_snippet"));
        assert!(names.contains(&"bulk_save_snippets"));
        assert!(names.contains(&"search_snippets"));
    }

    #[test]
    fn test_every_tool_has_a_model() {
        let tools = registry().get_all_tools();
        assert_eq!(tools.len(), 7);
        assert!(tools.iter().all(|t| t.description.is_some()));
    }

    #[tokio::test]
    async fn test_call_process_order_end_to_end() {
        let response = registry()
            .call_tool(
                "process_order",
                json!({
                    "order-items": [ { "itemId": "A1", "quantity": 2, "price": 5.0 } ],
                    "customer-name": "Grace",
                    "is-urgent": false
                }),
            )
            .await
            .unwrap();

        let ToolResponse::Json(summary) = response else {
            panic!("expected JSON summary");
        };
        assert_eq!(summary["totalAmount"], 10.0);
        assert_eq!(summary["items"][0]["itemId"], "A1");
    }

    #[tokio::test]
    async fn test_call_unknown_tool_fails() {
        let err = registry().call_tool("unknown", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(name) if name == "unknown"));
    }

    #[tokio::test]
    async fn test_binding_failure_stops_dispatch() {
        let err = registry()
            .call_tool("process_order", json!({ "customer-name": 42 }))
            .await
            .unwrap_err();

        let ToolError::InvalidArguments(binding) = err else {
            panic!("expected binding failure");
        };
        // Missing requireds and the mismatch are reported together.
        assert_eq!(binding.missing_required.len(), 2);
        assert_eq!(binding.type_mismatches.len(), 1);
    }

    #[tokio::test]
    async fn test_say_hello_never_faults() {
        // Directory double fails, but the tool converts it to data.
        let response = registry().call_tool("say_hello", json!({})).await.unwrap();
        let ToolResponse::Json(payload) = response else {
            panic!("expected JSON error payload");
        };
        assert_eq!(payload["authenticated"], false);
    }
}
