//! Core MCP protocol implementation: JSON-RPC types, dispatch, tools, and
//! the HTTP transport used by the tool servers and the client.

/// JSON-RPC 2.0 dispatch handler
pub mod jsonrpc;

/// Tools primitive: definitions, providers, and the request handler
pub mod tools;

/// MCP protocol message types
pub mod types;

/// HTTP server transport
pub mod server;

/// HTTP client transport
pub mod client;
