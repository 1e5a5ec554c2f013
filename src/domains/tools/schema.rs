//! Tool schema declarations - names, descriptions, and typed properties.
//!
//! Every tool declares its invocation contract as a [`ToolDefinition`]:
//! an ordered set of named, typed properties with required/optional flags.
//! The [`SchemaRegistry`] collects all definitions once at startup and is
//! read-only afterwards, so concurrent lookups need no synchronization.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value, json};
use thiserror::Error;

// ============================================================================
// Property Types
// ============================================================================

/// The JSON type of a tool property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl PropertyType {
    /// Name used in the MCP input schema.
    pub fn schema_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Check whether a raw JSON value matches this type.
    ///
    /// Numbers accept both integer and decimal tokens.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.schema_name())
    }
}

// ============================================================================
// Property and Tool Definitions
// ============================================================================

/// One named, typed argument of a tool.
#[derive(Debug, Clone)]
pub struct PropertyDefinition {
    /// Property name, unique within its tool.
    pub name: String,

    /// JSON type the property must decode as.
    pub ty: PropertyType,

    /// Description shown to clients.
    pub description: String,

    /// Whether the property must be present in the invocation payload.
    pub required: bool,

    /// Default applied when an optional property is absent.
    pub default: Option<Value>,

    /// Shape of array elements (for `Array`) or object fields (for
    /// `Object`). Empty means any shape is accepted.
    pub shape: Vec<PropertyDefinition>,
}

impl PropertyDefinition {
    /// Create a required property.
    pub fn required(name: impl Into<String>, ty: PropertyType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty,
            description: description.into(),
            required: true,
            default: None,
            shape: Vec::new(),
        }
    }

    /// Create an optional property with a default value.
    pub fn optional(
        name: impl Into<String>,
        ty: PropertyType,
        description: impl Into<String>,
        default: Value,
    ) -> Self {
        Self {
            name: name.into(),
            ty,
            description: description.into(),
            required: false,
            default: Some(default),
            shape: Vec::new(),
        }
    }

    /// Create an optional property without a default (nested shape fields).
    pub fn field(name: impl Into<String>, ty: PropertyType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty,
            description: description.into(),
            required: false,
            default: None,
            shape: Vec::new(),
        }
    }

    /// Attach an element/field shape to an array or object property.
    pub fn with_shape(mut self, shape: Vec<PropertyDefinition>) -> Self {
        self.shape = shape;
        self
    }

    /// Render this property as a JSON schema fragment.
    fn to_schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".into(), json!(self.ty.schema_name()));
        schema.insert("description".into(), json!(self.description));

        if !self.shape.is_empty() {
            let fields: Map<String, Value> = self
                .shape
                .iter()
                .map(|p| (p.name.clone(), p.to_schema()))
                .collect();
            let required: Vec<&str> = self
                .shape
                .iter()
                .filter(|p| p.required)
                .map(|p| p.name.as_str())
                .collect();
            let nested = json!({
                "type": "object",
                "properties": fields,
                "required": required,
            });
            match self.ty {
                PropertyType::Array => {
                    schema.insert("items".into(), nested);
                }
                PropertyType::Object => {
                    schema.insert("properties".into(), nested["properties"].clone());
                    schema.insert("required".into(), nested["required"].clone());
                }
                _ => {}
            }
        }

        if let Some(default) = &self.default {
            schema.insert("default".into(), default.clone());
        }

        Value::Object(schema)
    }
}

/// A tool's full invocation contract: name, description, and properties.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    /// Tool name, globally unique across the registry.
    pub name: String,

    /// Description shown to clients.
    pub description: String,

    /// Ordered property declarations.
    pub properties: Vec<PropertyDefinition>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            properties: Vec::new(),
        }
    }

    /// Add a property declaration.
    pub fn with_property(mut self, property: PropertyDefinition) -> Self {
        debug_assert!(
            !self.properties.iter().any(|p| p.name == property.name),
            "duplicate property name in tool definition"
        );
        self.properties.push(property);
        self
    }

    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Render the MCP input schema for this tool.
    pub fn input_schema(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .properties
            .iter()
            .map(|p| (p.name.clone(), p.to_schema()))
            .collect();
        let required: Vec<&str> = self
            .properties
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        schema.insert("required".into(), json!(required));
        schema
    }

    /// Render the input schema behind an `Arc`, as rmcp's `Tool` expects.
    pub fn input_schema_arc(&self) -> Arc<Map<String, Value>> {
        Arc::new(self.input_schema())
    }
}

// ============================================================================
// Schema Registry
// ============================================================================

/// Errors from schema registration and lookup.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A tool with this name is already registered.
    #[error("Duplicate tool name: {0}")]
    DuplicateToolName(String),

    /// No tool with this name is registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// Registry of all tool definitions, populated once at startup.
///
/// Registration is sequential during configuration; afterwards the registry
/// is only read, so it can be shared freely across invocations.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    tools: Vec<ToolDefinition>,
    index: HashMap<String, usize>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool definition. Fails if the name is already taken.
    pub fn register(&mut self, definition: ToolDefinition) -> Result<(), SchemaError> {
        if self.index.contains_key(&definition.name) {
            return Err(SchemaError::DuplicateToolName(definition.name));
        }
        self.index.insert(definition.name.clone(), self.tools.len());
        self.tools.push(definition);
        Ok(())
    }

    /// Look up a tool definition by name.
    pub fn get(&self, name: &str) -> Result<&ToolDefinition, SchemaError> {
        self.index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| SchemaError::UnknownTool(name.to_string()))
    }

    /// All registered definitions, in registration order.
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// All registered tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tool() -> ToolDefinition {
        ToolDefinition::new("sample_tool", "A sample tool")
            .with_property(PropertyDefinition::required(
                "name",
                PropertyType::String,
                "The name",
            ))
            .with_property(PropertyDefinition::optional(
                "count",
                PropertyType::Number,
                "How many",
                json!(1),
            ))
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = SchemaRegistry::new();
        registry.register(sample_tool()).unwrap();

        let def = registry.get("sample_tool").unwrap();
        assert_eq!(def.name, "sample_tool");
        assert_eq!(def.properties.len(), 2);
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut registry = SchemaRegistry::new();
        registry.register(sample_tool()).unwrap();

        let err = registry.register(sample_tool()).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateToolName(name) if name == "sample_tool"));
    }

    #[test]
    fn test_get_unknown_fails() {
        let registry = SchemaRegistry::new();
        let err = registry.get("missing").unwrap_err();
        assert!(matches!(err, SchemaError::UnknownTool(name) if name == "missing"));
    }

    #[test]
    fn test_input_schema_shape() {
        let schema = sample_tool().input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["name"]["type"], "string");
        assert_eq!(schema["properties"]["count"]["type"], "number");
        assert_eq!(schema["properties"]["count"]["default"], 1);
        assert_eq!(schema["required"], json!(["name"]));
    }

    #[test]
    fn test_array_shape_renders_items() {
        let def = ToolDefinition::new("orders", "Order tool").with_property(
            PropertyDefinition::required("items", PropertyType::Array, "Order items").with_shape(
                vec![
                    PropertyDefinition::required("itemId", PropertyType::String, "Item ID"),
                    PropertyDefinition::required("quantity", PropertyType::Number, "Quantity"),
                ],
            ),
        );

        let schema = def.input_schema();
        let items = &schema["properties"]["items"]["items"];
        assert_eq!(items["type"], "object");
        assert_eq!(items["properties"]["itemId"]["type"], "string");
        assert_eq!(items["required"], json!(["itemId", "quantity"]));
    }

    #[test]
    fn test_property_type_matches() {
        assert!(PropertyType::Number.matches(&json!(3)));
        assert!(PropertyType::Number.matches(&json!(3.25)));
        assert!(!PropertyType::Number.matches(&json!("3")));
        assert!(PropertyType::Array.matches(&json!([])));
        assert!(!PropertyType::Object.matches(&json!([])));
    }

    #[test]
    fn test_tool_names_preserve_order() {
        let mut registry = SchemaRegistry::new();
        registry.register(ToolDefinition::new("b_tool", "b")).unwrap();
        registry.register(ToolDefinition::new("a_tool", "a")).unwrap();
        assert_eq!(registry.tool_names(), vec!["b_tool", "a_tool"]);
    }
}
