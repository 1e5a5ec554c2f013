//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients to
//! perform specific actions or computations.
//!
//! ## Architecture
//!
//! - `schema.rs` - Tool/property declarations and the startup schema registry
//! - `binder.rs` - Raw-argument validation and typed decoding
//! - `response.rs` - The single JSON/text serialization boundary
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Central dispatch: resolve schema, bind, execute
//! - `router.rs` - Dynamic rmcp ToolRouter builder for STDIO transport
//! - `context.rs` - Collaborators injected into handlers
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with params, `definition()`,
//!    `execute()`, and `create_route()`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register the definition in `registry.rs` and add a dispatch arm
//! 4. Add the route in `router.rs` using `with_route()`

pub mod binder;
pub mod context;
pub mod definitions;
mod error;
mod registry;
pub mod response;
pub mod router;
pub mod schema;

pub use context::ToolContext;
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use response::ToolResponse;
pub use router::build_tool_router;
pub use schema::{PropertyDefinition, PropertyType, SchemaError, SchemaRegistry, ToolDefinition};
