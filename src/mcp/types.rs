//! # MCP Protocol Types
//!
//! This module defines the JSON-RPC 2.0 message types used by the tool
//! servers and the client: requests, responses, notifications, and the
//! standard error object with its well-known error codes.
//!
//! ## Example
//!
//! ```rust
//! use mcp_tools::mcp::types::{JsonRpcRequest, JsonRpcResponse};
//! use serde_json::json;
//!
//! let request = JsonRpcRequest::new(
//!     "tools/call",
//!     Some(json!({ "name": "calculate_sum", "arguments": { "values": [1, 2] } })),
//!     json!("1"),
//! );
//!
//! let response = JsonRpcResponse::success(json!(3.0), request.id.clone());
//! assert!(response.error.is_none());
//! ```

use serde::{Deserialize, Serialize};

use crate::utils::error::{McpError, McpResult};

/// JSON-RPC 2.0 request object for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version, always "2.0"
    pub jsonrpc: String,
    /// Method name to invoke
    pub method: String,
    /// Parameters for the method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    /// Unique identifier for the request
    pub id: serde_json::Value,
}

impl JsonRpcRequest {
    /// Create a new JSON-RPC request
    pub fn new(method: &str, params: Option<serde_json::Value>, id: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id,
        }
    }

    /// Serialize the request to JSON bytes
    pub fn to_bytes(&self) -> McpResult<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| McpError::Serialization(format!("Failed to serialize request: {}", e)))
    }

    /// Deserialize from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> McpResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| McpError::Deserialization(format!("Failed to deserialize request: {}", e)))
    }
}

/// JSON-RPC 2.0 response object for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version, always "2.0"
    pub jsonrpc: String,
    /// Result of the method call, must be present if no error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Error information, must be present if no result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    /// Request identifier that this response corresponds to
    pub id: serde_json::Value,
}

impl JsonRpcResponse {
    /// Create a new successful JSON-RPC response
    pub fn success(result: serde_json::Value, id: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Create a new error JSON-RPC response
    pub fn error(error: JsonRpcError, id: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }

    /// Serialize the response to JSON bytes
    pub fn to_bytes(&self) -> McpResult<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| McpError::Serialization(format!("Failed to serialize response: {}", e)))
    }

    /// Deserialize from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> McpResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| {
            McpError::Deserialization(format!("Failed to deserialize response: {}", e))
        })
    }
}

/// JSON-RPC 2.0 notification object for MCP protocol (has no ID)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    /// JSON-RPC version, always "2.0"
    pub jsonrpc: String,
    /// Method name to invoke
    pub method: String,
    /// Parameters for the method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

impl JsonRpcNotification {
    /// Create a new JSON-RPC notification
    pub fn new(method: &str, params: Option<serde_json::Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        }
    }

    /// Serialize the notification to JSON bytes
    pub fn to_bytes(&self) -> McpResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| {
            McpError::Serialization(format!("Failed to serialize notification: {}", e))
        })
    }

    /// Deserialize from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> McpResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| {
            McpError::Deserialization(format!("Failed to deserialize notification: {}", e))
        })
    }
}

/// JSON-RPC 2.0 error object for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
    /// Additional error data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    /// Create a new JSON-RPC error
    pub fn new(code: i32, message: &str, data: Option<serde_json::Value>) -> Self {
        Self {
            code,
            message: message.to_string(),
            data,
        }
    }

    /// Parse error (-32700)
    pub fn parse_error(message: &str) -> Self {
        Self::new(-32700, message, None)
    }

    /// Invalid request error (-32600)
    pub fn invalid_request(message: &str) -> Self {
        Self::new(-32600, message, None)
    }

    /// Method not found error (-32601)
    pub fn method_not_found(message: &str) -> Self {
        Self::new(-32601, message, None)
    }

    /// Invalid params error (-32602)
    pub fn invalid_params(message: &str) -> Self {
        Self::new(-32602, message, None)
    }

    /// Internal error (-32603)
    pub fn internal_error(message: &str) -> Self {
        Self::new(-32603, message, None)
    }
}

impl From<&McpError> for JsonRpcError {
    fn from(error: &McpError) -> Self {
        Self::new(error.jsonrpc_code(), &error.to_string(), None)
    }
}
