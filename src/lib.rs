#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::invalid_codeblock_attributes)]
#![deny(rustdoc::invalid_html_tags)]
#![deny(rustdoc::bare_urls)]

//! A set of MCP tool servers and a matching client, speaking JSON-RPC 2.0
//! over HTTP: a web search server backed by DuckDuckGo, a math server doing
//! robust numeric aggregation, and a read-only database lookup server.
//!
//! Each server registers its tools with a [`mcp::tools::BasicToolProvider`],
//! exposes them through the standard `tools/list` and `tools/call` methods,
//! and serves them with [`mcp::server::ToolServer`]. The
//! [`mcp::client::ToolClient`] invokes tools on any of them.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use mcp_tools::mcp::client::ToolClient;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ToolClient::new("http://127.0.0.1:8082")?;
//!
//!     let result = client
//!         .call_tool("calculate_mean", json!({ "values": [1, "2,5", "oops"] }))
//!         .await?;
//!
//!     println!("{:?}", result.first_json());
//!     Ok(())
//! }
//! ```

/// Core MCP protocol implementation: JSON-RPC types and dispatch, the tools
/// subsystem, and the HTTP server and client transports.
pub mod mcp;

/// Utility modules for error handling and common functionality.
pub mod utils;

/// Configuration management for the server binaries.
pub mod config;

/// Query normalization for heterogeneous search input.
pub mod query;

/// Robust numeric coercion and aggregation.
pub mod numeric;

/// Web search backend integration.
pub mod search;

/// Read-only database lookups.
pub mod db;

/// Tool registration for each server binary.
pub mod servers;

pub use utils::error::{McpError, McpResult};
