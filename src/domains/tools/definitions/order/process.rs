//! Process order tool definition.
//!
//! Sums the order lines, applies the discount, and returns an
//! [`OrderSummary`] with a freshly generated order identifier.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::Tool,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use super::OrderItem;
use super::OrderSummary;
use crate::domains::tools::binder;
use crate::domains::tools::definitions::tool_model;
use crate::domains::tools::response::ToolResponse;
use crate::domains::tools::schema::{PropertyDefinition, PropertyType, ToolDefinition};

/// Parameters for the process order tool.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessOrderParams {
    /// The order lines.
    #[serde(rename = "order-items")]
    pub order_items: Vec<OrderItem>,

    /// Name of the customer placing the order.
    #[serde(rename = "customer-name")]
    pub customer_name: String,

    /// Whether the order should be processed urgently.
    #[serde(rename = "is-urgent")]
    pub is_urgent: bool,

    /// Discount percentage, clamped to 0-100.
    #[serde(rename = "discount-percent", default)]
    pub discount_percent: f64,
}

/// Process order tool - computes totals and produces an order summary.
pub struct ProcessOrderTool;

impl ProcessOrderTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "process_order";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Process an order with multiple items";

    /// Invocation contract for this tool.
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION)
            .with_property(
                PropertyDefinition::required(
                    "order-items",
                    PropertyType::Array,
                    "List of order items, each containing item ID, quantity, and price",
                )
                .with_shape(item_shape()),
            )
            .with_property(PropertyDefinition::required(
                "customer-name",
                PropertyType::String,
                "Name of the customer placing the order",
            ))
            .with_property(PropertyDefinition::required(
                "is-urgent",
                PropertyType::Boolean,
                "Whether this order should be processed urgently",
            ))
            .with_property(PropertyDefinition::optional(
                "discount-percent",
                PropertyType::Number,
                "Discount percentage to apply (0-100)",
                json!(0),
            ))
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(customer = %params.customer_name))]
    pub fn execute(params: &ProcessOrderParams) -> ToolResponse {
        info!("Processing order for customer: {}", params.customer_name);

        let total_amount: f64 = params
            .order_items
            .iter()
            .map(|item| item.price * item.quantity as f64)
            .sum();
        let discount_percent = params.discount_percent.clamp(0.0, 100.0);
        let discount_amount = total_amount * (discount_percent / 100.0);

        let summary = OrderSummary {
            order_id: generate_order_id(),
            total_amount: total_amount - discount_amount,
            items: params.order_items.clone(),
            is_urgent: params.is_urgent,
        };

        info!("Order processed successfully. Order ID: {}", summary.order_id);
        ToolResponse::json(&summary)
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
                let params: ProcessOrderParams = binder::bind(&Self::definition(), &args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params).into_call_result())
            }
            .boxed()
        })
    }
}

/// Shared element shape for the `order-items` array.
pub(super) fn item_shape() -> Vec<PropertyDefinition> {
    vec![
        PropertyDefinition::required("itemId", PropertyType::String, "Item identifier"),
        PropertyDefinition::required("quantity", PropertyType::Number, "Quantity ordered"),
        PropertyDefinition::required("price", PropertyType::Number, "Unit price"),
    ]
}

/// Generate a random 8-character lowercase hexadecimal order identifier.
fn generate_order_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value};

    fn item(id: &str, quantity: i64, price: f64) -> OrderItem {
        OrderItem {
            item_id: id.to_string(),
            quantity,
            price,
        }
    }

    fn params(items: Vec<OrderItem>, discount: f64) -> ProcessOrderParams {
        ProcessOrderParams {
            order_items: items,
            customer_name: "Ada".to_string(),
            is_urgent: false,
            discount_percent: discount,
        }
    }

    fn summary_from(response: ToolResponse) -> OrderSummary {
        match response {
            ToolResponse::Json(value) => serde_json::from_value(value).unwrap(),
            other => panic!("expected JSON response, got {:?}", other),
        }
    }

    #[test]
    fn test_total_without_discount() {
        let response =
            ProcessOrderTool::execute(&params(vec![item("A1", 2, 9.5), item("B2", 1, 1.0)], 0.0));
        let summary = summary_from(response);
        assert_eq!(summary.total_amount, 20.0);
        assert_eq!(summary.items.len(), 2);
    }

    #[test]
    fn test_discount_applied() {
        let response = ProcessOrderTool::execute(&params(vec![item("A1", 1, 100.0)], 25.0));
        assert_eq!(summary_from(response).total_amount, 75.0);
    }

    #[test]
    fn test_discount_clamped_to_range() {
        let over = ProcessOrderTool::execute(&params(vec![item("A1", 1, 50.0)], 150.0));
        assert_eq!(summary_from(over).total_amount, 0.0);

        let under = ProcessOrderTool::execute(&params(vec![item("A1", 1, 50.0)], -10.0));
        assert_eq!(summary_from(under).total_amount, 50.0);
    }

    #[test]
    fn test_empty_items_total_zero() {
        let response = ProcessOrderTool::execute(&params(vec![], 0.0));
        assert_eq!(summary_from(response).total_amount, 0.0);
    }

    #[test]
    fn test_order_id_is_8_lowercase_hex() {
        for _ in 0..16 {
            let id = generate_order_id();
            assert_eq!(id.len(), 8);
            assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_order_ids_differ_per_call() {
        assert_ne!(generate_order_id(), generate_order_id());
    }

    #[test]
    fn test_bind_from_wire_arguments() {
        let args: Map<String, Value> = serde_json::json!({
            "order-items": [ { "itemId": "A1", "quantity": 3, "price": 2.5 } ],
            "customer-name": "Grace",
            "is-urgent": true
        })
        .as_object()
        .unwrap()
        .clone();

        let params: ProcessOrderParams =
            binder::bind(&ProcessOrderTool::definition(), &args).unwrap();
        assert_eq!(params.customer_name, "Grace");
        assert!(params.is_urgent);
        assert_eq!(params.discount_percent, 0.0);
        assert_eq!(params.order_items[0], item("A1", 3, 2.5));
    }

    #[test]
    fn test_missing_required_property_fails_binding() {
        let args: Map<String, Value> = serde_json::json!({
            "order-items": [],
            "is-urgent": false
        })
        .as_object()
        .unwrap()
        .clone();

        let err = binder::validate(&ProcessOrderTool::definition(), &args).unwrap_err();
        assert_eq!(err.missing_required, vec!["customer-name".to_string()]);
    }
}
