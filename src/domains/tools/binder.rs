//! Request binder - validates and decodes raw invocation arguments.
//!
//! Given a tool's [`ToolDefinition`] and the raw argument payload, the
//! binder checks required properties, validates JSON types (recursing into
//! declared array/object shapes), applies defaults, and finally decodes
//! into the tool's typed parameter struct. Binding is all-or-nothing: every
//! missing property and every type mismatch is collected before failing,
//! and no handler runs when binding fails.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use super::schema::{PropertyDefinition, PropertyType, ToolDefinition};

// ============================================================================
// Binding Errors
// ============================================================================

/// One type mismatch found while validating arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMismatch {
    /// Path of the offending property, e.g. `order-items[0].quantity`.
    pub property: String,

    /// The type the schema expected.
    pub expected: PropertyType,

    /// Textual form of the offending raw value.
    pub value: String,
}

impl std::fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "property '{}' expected {} but got: {}",
            self.property, self.expected, self.value
        )
    }
}

/// Aggregated binding failure: all problems are reported together.
#[derive(Debug, Clone, Default, Error)]
pub struct BindingError {
    /// Required properties absent from the payload.
    pub missing_required: Vec<String>,

    /// Properties (possibly nested) whose values had the wrong type.
    pub type_mismatches: Vec<TypeMismatch>,
}

impl BindingError {
    pub fn is_empty(&self) -> bool {
        self.missing_required.is_empty() && self.type_mismatches.is_empty()
    }

    /// All problems as human-readable lines.
    pub fn messages(&self) -> Vec<String> {
        let mut messages: Vec<String> = self
            .missing_required
            .iter()
            .map(|name| format!("missing required property '{}'", name))
            .collect();
        messages.extend(self.type_mismatches.iter().map(|m| m.to_string()));
        messages
    }
}

impl std::fmt::Display for BindingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

// ============================================================================
// Binding
// ============================================================================

/// Validate raw arguments against a definition and decode them into `T`.
///
/// Defaults declared for absent optional properties are filled in before
/// decoding, so both transports see identical argument records.
pub fn bind<T: DeserializeOwned>(
    definition: &ToolDefinition,
    raw_arguments: &Map<String, Value>,
) -> Result<T, BindingError> {
    let validated = validate(definition, raw_arguments)?;
    // Shape validation passed, so a decode failure here would mean the
    // definition and the parameter struct disagree.
    serde_json::from_value(Value::Object(validated)).map_err(|e| BindingError {
        missing_required: Vec::new(),
        type_mismatches: vec![TypeMismatch {
            property: definition.name.clone(),
            expected: PropertyType::Object,
            value: e.to_string(),
        }],
    })
}

/// Validate raw arguments against a definition without decoding.
///
/// Returns the argument map with defaults applied, or every accumulated
/// problem at once. An explicit JSON `null` on an optional property or
/// shape field is treated as absent, not as a type mismatch.
pub fn validate(
    definition: &ToolDefinition,
    raw_arguments: &Map<String, Value>,
) -> Result<Map<String, Value>, BindingError> {
    let mut errors = BindingError::default();
    let mut bound = Map::new();

    for property in &definition.properties {
        match raw_arguments.get(&property.name) {
            Some(value) if value.is_null() && !property.required => {
                if let Some(default) = &property.default {
                    bound.insert(property.name.clone(), default.clone());
                }
            }
            Some(value) => {
                let mut value = value.clone();
                strip_null_fields(property, &mut value);
                check_value(property, &property.name, &value, &mut errors);
                bound.insert(property.name.clone(), value);
            }
            None if property.required => {
                errors.missing_required.push(property.name.clone());
            }
            None => {
                if let Some(default) = &property.default {
                    bound.insert(property.name.clone(), default.clone());
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(bound)
    } else {
        Err(errors)
    }
}

/// Remove explicit `null`s on optional declared fields, recursing into
/// shapes, so they decode through `#[serde(default)]` like absent fields.
fn strip_null_fields(property: &PropertyDefinition, value: &mut Value) {
    if property.shape.is_empty() {
        return;
    }

    match (property.ty, value) {
        (PropertyType::Array, Value::Array(elements)) => {
            for element in elements {
                strip_shape_fields(&property.shape, element);
            }
        }
        (PropertyType::Object, value) => {
            strip_shape_fields(&property.shape, value);
        }
        _ => {}
    }
}

fn strip_shape_fields(shape: &[PropertyDefinition], value: &mut Value) {
    let Some(fields) = value.as_object_mut() else {
        return;
    };

    for field in shape {
        let is_null = matches!(fields.get(&field.name), Some(v) if v.is_null());
        if is_null && !field.required {
            fields.remove(&field.name);
        } else if let Some(v) = fields.get_mut(&field.name) {
            strip_null_fields(field, v);
        }
    }
}

/// Check one value against a property declaration, recursing into shapes.
fn check_value(
    property: &PropertyDefinition,
    path: &str,
    value: &Value,
    errors: &mut BindingError,
) {
    if !property.ty.matches(value) {
        errors.type_mismatches.push(TypeMismatch {
            property: path.to_string(),
            expected: property.ty,
            value: render_value(value),
        });
        return;
    }

    if property.shape.is_empty() {
        return;
    }

    match property.ty {
        PropertyType::Array => {
            // Type check above guarantees an array here.
            for (i, element) in value.as_array().into_iter().flatten().enumerate() {
                let element_path = format!("{}[{}]", path, i);
                check_fields(&property.shape, &element_path, element, errors);
            }
        }
        PropertyType::Object => {
            check_fields(&property.shape, path, value, errors);
        }
        _ => {}
    }
}

/// Check the declared fields of one object-shaped value.
fn check_fields(
    shape: &[PropertyDefinition],
    path: &str,
    value: &Value,
    errors: &mut BindingError,
) {
    let Some(fields) = value.as_object() else {
        errors.type_mismatches.push(TypeMismatch {
            property: path.to_string(),
            expected: PropertyType::Object,
            value: render_value(value),
        });
        return;
    };

    for field in shape {
        let field_path = format!("{}.{}", path, field.name);
        match fields.get(&field.name) {
            Some(v) => check_value(field, &field_path, v, errors),
            None if field.required => errors.missing_required.push(field_path),
            None => {}
        }
    }
}

/// Compact textual form of a raw value for error messages.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct GreetParams {
        name: String,
        #[serde(default)]
        shout: bool,
    }

    fn greet_definition() -> ToolDefinition {
        ToolDefinition::new("greet", "Greet someone")
            .with_property(PropertyDefinition::required(
                "name",
                PropertyType::String,
                "Who to greet",
            ))
            .with_property(PropertyDefinition::optional(
                "shout",
                PropertyType::Boolean,
                "Uppercase the greeting",
                json!(false),
            ))
    }

    fn order_definition() -> ToolDefinition {
        ToolDefinition::new("orders", "Order tool").with_property(
            PropertyDefinition::required("order-items", PropertyType::Array, "Items").with_shape(
                vec![
                    PropertyDefinition::required("itemId", PropertyType::String, "Item ID"),
                    PropertyDefinition::required("quantity", PropertyType::Number, "Quantity"),
                    PropertyDefinition::required("price", PropertyType::Number, "Price"),
                ],
            ),
        )
    }

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_bind_happy_path() {
        let params: GreetParams =
            bind(&greet_definition(), &args(json!({ "name": "Ada" }))).unwrap();
        assert_eq!(params.name, "Ada");
        assert!(!params.shout);
    }

    #[test]
    fn test_missing_required_is_reported() {
        let err = validate(&greet_definition(), &Map::new()).unwrap_err();
        assert_eq!(err.missing_required, vec!["name".to_string()]);
        assert!(err.type_mismatches.is_empty());
    }

    #[test]
    fn test_all_errors_reported_together() {
        let err = validate(
            &greet_definition()
                .with_property(PropertyDefinition::required(
                    "count",
                    PropertyType::Number,
                    "Count",
                )),
            &args(json!({ "shout": "loud" })),
        )
        .unwrap_err();

        // Two missing required plus one mismatch, all at once.
        assert_eq!(err.missing_required, vec!["name".to_string(), "count".to_string()]);
        assert_eq!(err.type_mismatches.len(), 1);
        assert_eq!(err.type_mismatches[0].property, "shout");
        assert_eq!(err.type_mismatches[0].value, "loud");
    }

    #[test]
    fn test_defaults_applied_for_absent_optional() {
        let bound = validate(&greet_definition(), &args(json!({ "name": "Ada" }))).unwrap();
        assert_eq!(bound["shout"], json!(false));
    }

    #[test]
    fn test_number_accepts_integer_and_decimal() {
        let def = ToolDefinition::new("t", "t").with_property(PropertyDefinition::required(
            "amount",
            PropertyType::Number,
            "Amount",
        ));
        assert!(validate(&def, &args(json!({ "amount": 3 }))).is_ok());
        assert!(validate(&def, &args(json!({ "amount": 3.25 }))).is_ok());
        assert!(validate(&def, &args(json!({ "amount": "3" }))).is_err());
    }

    #[test]
    fn test_nested_element_mismatches_are_aggregated() {
        let err = validate(
            &order_definition(),
            &args(json!({
                "order-items": [
                    { "itemId": "A1", "quantity": 1, "price": 9.99 },
                    { "itemId": 7, "quantity": "two", "price": 1.0 },
                    { "quantity": 1, "price": 2.0 }
                ]
            })),
        )
        .unwrap_err();

        assert_eq!(err.missing_required, vec!["order-items[2].itemId".to_string()]);
        let mismatched: Vec<_> = err
            .type_mismatches
            .iter()
            .map(|m| m.property.as_str())
            .collect();
        assert_eq!(
            mismatched,
            vec!["order-items[1].itemId", "order-items[1].quantity"]
        );
    }

    #[test]
    fn test_non_object_element_is_a_mismatch() {
        let err = validate(
            &order_definition(),
            &args(json!({ "order-items": ["not-an-item"] })),
        )
        .unwrap_err();
        assert_eq!(err.type_mismatches.len(), 1);
        assert_eq!(err.type_mismatches[0].property, "order-items[0]");
    }

    #[test]
    fn test_null_optional_property_treated_as_absent() {
        let bound = validate(
            &greet_definition(),
            &args(json!({ "name": "Ada", "shout": null })),
        )
        .unwrap();
        // The default fills in, exactly as if the property were missing.
        assert_eq!(bound["shout"], json!(false));
    }

    #[test]
    fn test_null_optional_shape_field_is_stripped() {
        let def = ToolDefinition::new("orders", "Order tool").with_property(
            PropertyDefinition::required("order-data", PropertyType::Object, "Order").with_shape(
                vec![
                    PropertyDefinition::field("orderId", PropertyType::String, "Order ID"),
                    PropertyDefinition::field("items", PropertyType::Array, "Items"),
                ],
            ),
        );

        let bound = validate(
            &def,
            &args(json!({ "order-data": { "orderId": "abc", "items": null } })),
        )
        .unwrap();
        assert!(bound["order-data"].get("items").is_none());
        assert_eq!(bound["order-data"]["orderId"], "abc");
    }

    #[test]
    fn test_null_required_property_is_a_mismatch() {
        let err = validate(&greet_definition(), &args(json!({ "name": null }))).unwrap_err();
        assert_eq!(err.type_mismatches.len(), 1);
        assert_eq!(err.type_mismatches[0].property, "name");
    }

    #[test]
    fn test_error_messages_name_every_problem() {
        let err = validate(&greet_definition(), &args(json!({ "shout": 1 }))).unwrap_err();
        let messages = err.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("name"));
        assert!(messages[1].contains("shout"));
    }
}
