//! Order tool definitions.
//!
//! `process_order` computes an order summary from in-memory data;
//! `validate_order` checks a summary against the business rules.

mod process;
mod validate;

pub use process::{ProcessOrderParams, ProcessOrderTool};
pub use validate::{ValidateOrderParams, ValidateOrderTool};

use serde::{Deserialize, Serialize};

/// One line of an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Identifier of the ordered item.
    #[serde(default)]
    pub item_id: String,

    /// Quantity ordered.
    #[serde(default)]
    pub quantity: i64,

    /// Unit price.
    #[serde(default)]
    pub price: f64,
}

/// A processed order, as returned by `process_order` and consumed by
/// `validate_order`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Generated order identifier (8 lowercase hex characters).
    #[serde(default)]
    pub order_id: String,

    /// Final amount after discount.
    #[serde(default)]
    pub total_amount: f64,

    /// The ordered items.
    #[serde(default)]
    pub items: Vec<OrderItem>,

    /// Whether the order is flagged urgent.
    #[serde(default)]
    pub is_urgent: bool,
}
