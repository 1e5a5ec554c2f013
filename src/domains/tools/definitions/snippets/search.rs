//! Search snippets tool definition.
//!
//! Filters the stored snippet catalog by tags and name pattern. Tag
//! matching is case-insensitive exact, name matching is a case-insensitive
//! substring; both filters are ANDed when both are given. Content is only
//! included in results when requested.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::Tool,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::SnippetInfo;
use crate::domains::storage::{SNIPPET_PREFIX, SnippetStore, snippet_name};
use crate::domains::tools::binder;
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::tool_model;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::response::ToolResponse;
use crate::domains::tools::schema::{PropertyDefinition, PropertyType, ToolDefinition};

/// Search criteria supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    /// Keep snippets whose tag set intersects these (case-insensitive).
    #[serde(default)]
    pub tags: Vec<String>,

    /// Keep snippets whose name contains this substring (case-insensitive).
    #[serde(default)]
    pub name_pattern: String,

    /// Whether to include snippet content in the results.
    #[serde(default = "default_include_content")]
    pub include_content: bool,
}

fn default_include_content() -> bool {
    true
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            name_pattern: String::new(),
            include_content: default_include_content(),
        }
    }
}

/// Parameters for the search snippets tool.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSnippetsParams {
    /// The criteria to filter by.
    #[serde(rename = "search-criteria")]
    pub search_criteria: SearchCriteria,
}

/// One search hit; content is omitted unless requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Search results returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub search_criteria: SearchCriteria,
    pub result_count: usize,
    pub results: Vec<SearchHit>,
}

/// Search snippets tool - filters the stored catalog by criteria.
pub struct SearchSnippetsTool;

impl SearchSnippetsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_snippets";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search for snippets using various criteria";

    /// Invocation contract for this tool.
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION).with_property(
            PropertyDefinition::required(
                "search-criteria",
                PropertyType::Object,
                "Search criteria object with tags, name pattern, and content inclusion options",
            )
            .with_shape(vec![
                PropertyDefinition::field("tags", PropertyType::Array, "Tags to match"),
                PropertyDefinition::field(
                    "namePattern",
                    PropertyType::String,
                    "Substring to match in names",
                ),
                PropertyDefinition::field(
                    "includeContent",
                    PropertyType::Boolean,
                    "Include snippet content in results",
                ),
            ]),
        )
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(pattern = %params.search_criteria.name_pattern))]
    pub async fn execute(
        params: &SearchSnippetsParams,
        ctx: &ToolContext,
    ) -> Result<ToolResponse, ToolError> {
        let criteria = &params.search_criteria;
        info!(
            "Searching snippets with criteria: tags={}, pattern={}",
            criteria.tags.join(","),
            criteria.name_pattern
        );

        let catalog = load_catalog(ctx.store.as_ref()).await?;

        let results: Vec<SearchHit> = catalog
            .into_iter()
            .filter(|s| matches_criteria(s, criteria))
            .map(|s| SearchHit {
                name: s.name,
                description: s.description,
                tags: s.tags,
                content: criteria.include_content.then_some(s.content),
            })
            .collect();

        info!("Search completed. Found {} matching snippets", results.len());

        let response = SearchResults {
            search_criteria: criteria.clone(),
            result_count: results.len(),
            results,
        };
        Ok(ToolResponse::json(&response))
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
                let params: SearchSnippetsParams = binder::bind(&Self::definition(), &args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                let response = Self::execute(&params, &context)
                    .await
                    .map_err(|e| McpError::internal_error(e.to_string(), None))?;
                Ok(response.into_call_result())
            }
            .boxed()
        })
    }
}

/// Load every stored snippet into an in-memory catalog.
///
/// Blobs written by bulk save carry their metadata as JSON; blobs written
/// by single save hold raw content and get an empty description/tag set.
async fn load_catalog(store: &dyn SnippetStore) -> Result<Vec<SnippetInfo>, ToolError> {
    let keys = store.list(SNIPPET_PREFIX).await?;

    let mut catalog = Vec::with_capacity(keys.len());
    for key in keys {
        let Some(name) = snippet_name(&key) else {
            continue;
        };
        let content = match store.read(&key).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping unreadable snippet {}: {}", key, e);
                continue;
            }
        };
        let snippet = match serde_json::from_str::<SnippetInfo>(&content) {
            Ok(record) if !record.name.is_empty() => record,
            _ => SnippetInfo {
                name: name.to_string(),
                content,
                description: String::new(),
                tags: Vec::new(),
            },
        };
        catalog.push(snippet);
    }
    Ok(catalog)
}

/// Apply the tag and name filters; both must pass when both are given.
fn matches_criteria(snippet: &SnippetInfo, criteria: &SearchCriteria) -> bool {
    if !criteria.tags.is_empty() {
        let matched = criteria.tags.iter().any(|wanted| {
            snippet
                .tags
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(wanted))
        });
        if !matched {
            return false;
        }
    }

    if !criteria.name_pattern.is_empty() {
        let name = snippet.name.to_lowercase();
        if !name.contains(&criteria.name_pattern.to_lowercase()) {
            return false;
        }
    }

    true
}

// ============================================================================
// Tests
// ============================================================================
