//! Say hello tool definition.
//!
//! Fetches the caller's profile from the directory collaborator and greets
//! them by name. Every failure is converted into a structured JSON error
//! payload; this tool never surfaces a fault to the host.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::Tool,
};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::domains::identity::IdentityError;
use crate::domains::tools::binder;
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::tool_model;
use crate::domains::tools::response::ToolResponse;
use crate::domains::tools::schema::ToolDefinition;

/// Say hello tool - greets the authenticated caller by directory profile.
pub struct SayHelloTool;

impl SayHelloTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "say_hello";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Greet the signed-in user by their directory display name";

    /// Invocation contract for this tool (no properties).
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION)
    }

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(ctx: &ToolContext) -> ToolResponse {
        info!("Say hello tool processed a request");

        match ctx.directory.current_user().await {
            Ok(profile) => ToolResponse::Text(format!(
                "Hello, {} ({})!",
                profile.display_name, profile.principal_name
            )),
            Err(e) => {
                warn!("Directory lookup failed: {}", e);
                error_payload(&e, ctx.consent_hostname.as_deref())
            }
        }
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
                // No properties, but binding still rejects malformed payloads
                // uniformly with every other tool.
                binder::validate(&Self::definition(), &args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&context).await.into_call_result())
            }
            .boxed()
        })
    }
}

/// Build the structured error payload for a failed directory call.
fn error_payload(error: &IdentityError, hostname: Option<&str>) -> ToolResponse {
    let guidance = match hostname {
        Some(hostname) => format!(
            "You're logged in but might need to grant consent to the application. \
             Open a browser to the following link to consent: https://{}/.auth/login/aad",
            hostname
        ),
        None => "You might need to grant consent to the application.".to_string(),
    };

    ToolResponse::Json(json!({
        "authenticated": false,
        "message": format!(
            "Error during token exchange and directory call: {}. {}",
            error, guidance
        ),
        "error": error.kind_name(),
    }))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::identity::UserProfile;
    use crate::domains::tools::context::test_support::{StubDirectory, memory_context};

    #[tokio::test]
    async fn test_greets_resolved_profile() {
        let ctx = memory_context().with_directory(Arc::new(StubDirectory(UserProfile {
            display_name: "Ada Lovelace".to_string(),
            principal_name: "ada@example.com".to_string(),
        })));

        let response = SayHelloTool::execute(&ctx).await;
        assert_eq!(
            response,
            ToolResponse::Text("Hello, Ada Lovelace (ada@example.com)!".to_string())
        );
    }

    #[tokio::test]
    async fn test_failure_becomes_structured_payload() {
        let ctx = memory_context();

        let ToolResponse::Json(payload) = SayHelloTool::execute(&ctx).await else {
            panic!("expected JSON error payload");
        };

        assert_eq!(payload["authenticated"], false);
        assert_eq!(payload["error"], "TokenAcquisitionError");
        let message = payload["message"].as_str().unwrap();
        assert!(message.contains("grant consent"));
        assert!(!message.contains(".auth/login/aad"));
    }

    #[tokio::test]
    async fn test_consent_url_built_from_hostname() {
        let mut ctx = memory_context();
        ctx.consent_hostname = Some("myapp.azurewebsites.net".to_string());

        let ToolResponse::Json(payload) = SayHelloTool::execute(&ctx).await else {
            panic!("expected JSON error payload");
        };

        let message = payload["message"].as_str().unwrap();
        assert!(message.contains("https://myapp.azurewebsites.net/.auth/login/aad"));
    }
}
