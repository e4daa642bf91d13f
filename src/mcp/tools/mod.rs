//! # MCP Tools System
//!
//! The tools system provides functionality for defining and executing the
//! remote functions exposed by the tool servers.
//!
//! ## Features
//!
//! - Tool definition and registration
//! - Asynchronous execution with proper error handling
//! - Safe serialization/deserialization of inputs and outputs
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mcp_tools::mcp::tools::{BasicToolProvider, Tool, ToolResult, ToolsHandler};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let provider = BasicToolProvider::new();
//!
//! let tool = Tool::new(
//!     "calculate_sum",
//!     "Sum a list of loosely-typed numeric values",
//!     json!({
//!         "type": "object",
//!         "properties": {
//!             "values": { "type": "array" }
//!         },
//!         "required": ["values"]
//!     }),
//! );
//!
//! provider.register_tool(tool, |args| {
//!     Box::pin(async move {
//!         let count = args["values"].as_array().map(|v| v.len()).unwrap_or(0);
//!         Ok(ToolResult::text(&format!("Received {} values", count)))
//!     })
//! }).unwrap();
//!
//! let handler = ToolsHandler::new(Arc::new(provider));
//! ```

mod handler;
mod models;
mod provider;

// Re-export the public API
pub use handler::{CallToolParams, ListToolsParams, ListToolsResponse, ToolsHandler, ToolsProvider};
pub use models::{Tool, ToolResult, ToolResultContent};
pub use provider::{BasicToolProvider, ToolFunction, ToolFuture};
