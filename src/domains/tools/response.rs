//! Tool response serialization - the single wire-format boundary.
//!
//! Handlers return a [`ToolResponse`]; the transports render it exactly
//! once here. Text responses pass through verbatim, structured responses
//! are rendered as indented JSON.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::Value;

/// The result of a tool handler, before serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResponse {
    /// Raw text returned verbatim (snippet content, greetings).
    Text(String),

    /// Structured result rendered as indented JSON.
    Json(Value),
}

impl ToolResponse {
    /// Build a JSON response from any serializable value.
    pub fn json<T: Serialize>(value: &T) -> Self {
        // Handler result types serialize infallibly.
        Self::Json(serde_json::to_value(value).unwrap_or(Value::Null))
    }

    /// Render the response to its wire text.
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }

    /// Convert into an rmcp call result.
    pub fn into_call_result(self) -> CallToolResult {
        CallToolResult::success(vec![Content::text(self.render())])
    }
}

impl From<String> for ToolResponse {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for ToolResponse {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_passes_through_verbatim() {
        let response = ToolResponse::Text("console.log('hi');".to_string());
        assert_eq!(response.render(), "console.log('hi');");
    }

    #[test]
    fn test_json_renders_indented() {
        let response = ToolResponse::Json(json!({ "isValid": true }));
        let rendered = response.render();
        assert!(rendered.contains("\n"));
        assert!(rendered.contains("\"isValid\": true"));
    }

    #[test]
    fn test_into_call_result_is_success() {
        let result = ToolResponse::Text("ok".to_string()).into_call_result();
        assert!(result.is_error.is_none() || !result.is_error.unwrap());
    }
}
