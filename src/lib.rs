//! Snippet MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server exposing a
//! small family of demo tools: snippet storage and search backed by a
//! key-value blob store, order processing and validation over in-memory
//! data, and an identity greeting tool backed by a directory API.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the main server handler, and
//!   the transport layer
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Schema registry, request binder, response serializer,
//!     and the tool definitions themselves
//!   - **storage**: The key-value blob collaborator for snippets
//!   - **identity**: The credential and directory collaborators
//!
//! # Example
//!
//! ```rust,no_run
//! use snippet_mcp_server::{core::Config, core::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
