//! Validate order tool definition.
//!
//! Checks an [`OrderSummary`] against the business rules and reports every
//! violation. The tool itself always succeeds structurally; an invalid
//! order is data, not a fault.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::Tool,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::OrderSummary;
use crate::domains::tools::binder;
use crate::domains::tools::definitions::tool_model;
use crate::domains::tools::response::ToolResponse;
use crate::domains::tools::schema::{PropertyDefinition, PropertyType, ToolDefinition};

/// Parameters for the validate order tool.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateOrderParams {
    /// The order to validate.
    #[serde(rename = "order-data")]
    pub order_data: OrderSummary,
}

/// Validation outcome returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub validation_errors: Vec<String>,
    pub order_id: String,
}

/// Validate order tool - business-rule validation of an order summary.
pub struct ValidateOrderTool;

impl ValidateOrderTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "validate_order";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Validate order data structure";

    /// Invocation contract for this tool.
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION).with_property(
            PropertyDefinition::required(
                "order-data",
                PropertyType::Object,
                "Complete order data object containing all order information",
            )
            // Fields are type-checked when present; absent or null fields
            // fall back to defaults and get flagged by the business rules
            // instead.
            .with_shape(vec![
                PropertyDefinition::field("orderId", PropertyType::String, "Order identifier"),
                PropertyDefinition::field(
                    "totalAmount",
                    PropertyType::Number,
                    "Final order amount",
                ),
                PropertyDefinition::field("items", PropertyType::Array, "Ordered items"),
                PropertyDefinition::field("isUrgent", PropertyType::Boolean, "Urgency flag"),
            ]),
        )
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(order_id = %params.order_data.order_id))]
    pub fn execute(params: &ValidateOrderParams) -> ToolResponse {
        let order = &params.order_data;
        info!("Validating order data for Order ID: {}", order.order_id);

        let mut validation_errors = Vec::new();

        if order.order_id.is_empty() {
            validation_errors.push("Order ID is required".to_string());
        }

        if order.total_amount <= 0.0 {
            validation_errors.push("Total amount must be greater than zero".to_string());
        }

        if order.items.is_empty() {
            validation_errors.push("At least one order item is required".to_string());
        } else {
            for (i, item) in order.items.iter().enumerate() {
                let index = i + 1;
                if item.item_id.is_empty() {
                    validation_errors.push(format!("Item {}: Item ID is required", index));
                }
                if item.quantity <= 0 {
                    validation_errors
                        .push(format!("Item {}: Quantity must be greater than zero", index));
                }
                if item.price < 0.0 {
                    validation_errors.push(format!("Item {}: Price cannot be negative", index));
                }
            }
        }

        let report = ValidationReport {
            is_valid: validation_errors.is_empty(),
            validation_errors,
            order_id: order.order_id.clone(),
        };

        info!("Order validation completed. Valid: {}", report.is_valid);
        ToolResponse::json(&report)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model(&Self::definition())
    }

    /// Create a ToolRoute for STDIO transport.
    pub fn create_route<S>() -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            async move {
                let params: ValidateOrderParams = binder::bind(&Self::definition(), &args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params).into_call_result())
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
