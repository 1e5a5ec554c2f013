//! Bulk save snippets tool definition.
//!
//! Saves a batch of snippets with partial-failure semantics: each snippet
//! is processed independently and one failure never aborts the rest. The
//! per-snippet outcome is reported inline; the tool itself always succeeds
//! structurally.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::Tool,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument, warn};

use super::SnippetInfo;
use crate::domains::storage::{SnippetStore, StorageError, snippet_key};
use crate::domains::tools::binder;
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::tool_model;
use crate::domains::tools::response::ToolResponse;
use crate::domains::tools::schema::{PropertyDefinition, PropertyType, ToolDefinition};

/// Parameters for the bulk save snippets tool.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkSaveSnippetsParams {
    /// The snippets to save.
    pub snippets: Vec<SnippetInfo>,

    /// Whether snippets may replace existing ones with the same name.
    #[serde(rename = "overwrite-existing", default)]
    pub overwrite_existing: bool,
}

/// Outcome of one snippet in a bulk save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulkStatus {
    Success,
    Error,
}

/// Per-snippet result record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSaveResult {
    pub name: String,
    pub status: BulkStatus,
    pub message: String,
}

/// Summary returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSaveSummary {
    pub total_processed: usize,
    pub success_count: usize,
    pub results: Vec<BulkSaveResult>,
}

/// Bulk save snippets tool - saves multiple snippets at once.
pub struct BulkSaveSnippetsTool;

impl BulkSaveSnippetsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "bulk_save_snippets";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Save multiple code snippets at once";

    /// Invocation contract for this tool.
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION)
            .with_property(
                PropertyDefinition::required(
                    "snippets",
                    PropertyType::Array,
                    "Array of snippet objects containing name, content, description, and tags",
                )
                .with_shape(vec![
                    PropertyDefinition::field("name", PropertyType::String, "Snippet name"),
                    PropertyDefinition::field("content", PropertyType::String, "Snippet content"),
                    PropertyDefinition::field(
                        "description",
                        PropertyType::String,
                        "Snippet description",
                    ),
                    PropertyDefinition::field("tags", PropertyType::Array, "Snippet tags"),
                ]),
            )
            .with_property(PropertyDefinition::optional(
                "overwrite-existing",
                PropertyType::Boolean,
                "Whether to overwrite existing snippets with same names",
                json!(false),
            ))
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(count = params.snippets.len()))]
    pub async fn execute(params: &BulkSaveSnippetsParams, ctx: &ToolContext) -> ToolResponse {
        info!("Bulk saving {} snippets", params.snippets.len());

        let mut results = Vec::with_capacity(params.snippets.len());
        for snippet in &params.snippets {
            match save_one(ctx.store.as_ref(), snippet, params.overwrite_existing).await {
                Ok(()) => {
                    info!("Saved snippet: {}", snippet.name);
                    results.push(BulkSaveResult {
                        name: snippet.name.clone(),
                        status: BulkStatus::Success,
                        message: format!("Snippet '{}' saved successfully", snippet.name),
                    });
                }
                Err(message) => {
                    warn!("Failed to save snippet '{}': {}", snippet.name, message);
                    results.push(BulkSaveResult {
                        name: snippet.name.clone(),
                        status: BulkStatus::Error,
                        message,
                    });
                }
            }
        }

        let summary = BulkSaveSummary {
            total_processed: params.snippets.len(),
            success_count: results
                .iter()
                .filter(|r| r.status == BulkStatus::Success)
                .count(),
            results,
        };
        ToolResponse::json(&summary)
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
                let params: BulkSaveSnippetsParams = binder::bind(&Self::definition(), &args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &context).await.into_call_result())
            }
            .boxed()
        })
    }
}

/// Persist one snippet, enforcing the non-empty-name and overwrite rules.
async fn save_one(
    store: &dyn SnippetStore,
    snippet: &SnippetInfo,
    overwrite_existing: bool,
) -> Result<(), String> {
    if snippet.name.is_empty() {
        return Err("Snippet name must not be empty".to_string());
    }

    let key = snippet_key(&snippet.name);

    if !overwrite_existing {
        let exists = store.exists(&key).await.map_err(render_storage_error)?;
        if exists {
            return Err(format!(
                "Snippet '{}' already exists and overwrite is disabled",
                snippet.name
            ));
        }
    }

    // Bulk-saved snippets keep their metadata alongside the content.
    let record = serde_json::to_string_pretty(snippet).map_err(|e| e.to_string())?;
    store.write(&key, &record).await.map_err(render_storage_error)
}

fn render_storage_error(err: StorageError) -> String {
    err.to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::context::test_support::memory_context;

    fn snippet(name: &str) -> SnippetInfo {
        SnippetInfo {
            name: name.to_string(),
            content: format!("content of {}", name),
            description: String::new(),
            tags: vec!["demo".to_string()],
        }
    }

    fn summary_from(response: ToolResponse) -> BulkSaveSummary {
        match response {
            ToolResponse::Json(value) => serde_json::from_value(value).unwrap(),
            other => panic!("expected JSON response, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_all_snippets_saved() {
        let ctx = memory_context();
        let params = BulkSaveSnippetsParams {
            snippets: vec![snippet("a"), snippet("b")],
            overwrite_existing: false,
        };

        let summary = summary_from(BulkSaveSnippetsTool::execute(&params, &ctx).await);
        assert_eq!(summary.total_processed, 2);
        assert_eq!(summary.success_count, 2);
        assert!(ctx.store.exists(&snippet_key("a")).await.unwrap());
    }

    #[tokio::test]
    async fn test_one_failure_does_not_abort_the_rest() {
        let ctx = memory_context();
        let params = BulkSaveSnippetsParams {
            snippets: vec![snippet("ok-1"), snippet(""), snippet("ok-2")],
            overwrite_existing: false,
        };

        let summary = summary_from(BulkSaveSnippetsTool::execute(&params, &ctx).await);
        assert_eq!(summary.total_processed, 3);
        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.results[0].status, BulkStatus::Success);
        assert_eq!(summary.results[1].status, BulkStatus::Error);
        assert_eq!(summary.results[2].status, BulkStatus::Success);
        assert!(ctx.store.exists(&snippet_key("ok-2")).await.unwrap());
    }

    #[tokio::test]
    async fn test_existing_snippet_not_overwritten_by_default() {
        let ctx = memory_context();
        ctx.store
            .write(&snippet_key("taken"), "original")
            .await
            .unwrap();

        let params = BulkSaveSnippetsParams {
            snippets: vec![snippet("taken")],
            overwrite_existing: false,
        };
        let summary = summary_from(BulkSaveSnippetsTool::execute(&params, &ctx).await);

        assert_eq!(summary.success_count, 0);
        assert_eq!(summary.results[0].status, BulkStatus::Error);
        assert!(summary.results[0].message.contains("already exists"));
        assert_eq!(
            ctx.store.read(&snippet_key("taken")).await.unwrap(),
            "original"
        );
    }

    #[tokio::test]
    async fn test_overwrite_flag_allows_replacement() {
        let ctx = memory_context();
        ctx.store
            .write(&snippet_key("taken"), "original")
            .await
            .unwrap();

        let params = BulkSaveSnippetsParams {
            snippets: vec![snippet("taken")],
            overwrite_existing: true,
        };
        let summary = summary_from(BulkSaveSnippetsTool::execute(&params, &ctx).await);

        assert_eq!(summary.success_count, 1);
        let stored = ctx.store.read(&snippet_key("taken")).await.unwrap();
        let record: SnippetInfo = serde_json::from_str(&stored).unwrap();
        assert_eq!(record.content, "content of taken");
    }

    #[tokio::test]
    async fn test_status_serializes_as_plain_words() {
        let result = BulkSaveResult {
            name: "x".to_string(),
            status: BulkStatus::Error,
            message: "boom".to_string(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "Error");
    }
}
