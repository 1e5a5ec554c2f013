//! Domains module containing business logic organized by bounded contexts.
//!
//! Each subdomain represents a specific area of functionality within the
//! MCP server: the tools themselves plus the identity and storage
//! collaborators they depend on.

pub mod identity;
pub mod storage;
pub mod tools;
