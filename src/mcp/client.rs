//! HTTP client for invoking tools on a remote MCP server.
//!
//! This module provides a JSON-RPC-over-HTTP client using the reqwest
//! library. Each call is an independent request/response exchange; there is
//! no persistent connection state beyond reqwest's pooling.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::mcp::tools::{ListToolsResponse, ToolResult};
use crate::mcp::types::{JsonRpcRequest, JsonRpcResponse};
use crate::utils::error::{McpError, McpResult};

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// JSON-RPC client for a single tool server
#[derive(Debug)]
pub struct ToolClient {
    /// The HTTP client
    client: Client,
    /// The RPC endpoint URL
    url: Url,
    /// Monotonic counter used to build request IDs
    next_id: AtomicU64,
}

impl ToolClient {
    /// Create a new client for the server at `base_url` (e.g. `http://127.0.0.1:8080`)
    pub fn new(base_url: &str) -> McpResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new client with an explicit request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> McpResult<Self> {
        let base = Url::parse(base_url)
            .map_err(|_| McpError::Config(format!("Invalid server URL: {}", base_url)))?;
        let url = base
            .join("/rpc")
            .map_err(|e| McpError::Config(format!("Failed to build RPC URL: {}", e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| McpError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url,
            next_id: AtomicU64::new(1),
        })
    }

    /// Send a JSON-RPC request and return the `result` value
    pub async fn request(
        &self,
        method: &str,
        params: Option<serde_json::Value>,
    ) -> McpResult<serde_json::Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest::new(method, params, serde_json::json!(id.to_string()));

        debug!("Sending request to {}: method={}", self.url, method);

        let response = self
            .client
            .post(self.url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    McpError::Timeout
                } else {
                    McpError::Backend(format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(McpError::Backend(format!("HTTP error: {}", status)));
        }

        let response_bytes = response
            .bytes()
            .await
            .map_err(|e| McpError::Backend(format!("Failed to read response: {}", e)))?;

        let response = JsonRpcResponse::from_bytes(&response_bytes)?;

        if let Some(error) = response.error {
            return Err(match error.code {
                -32601 => McpError::NotFound(error.message),
                -32602 => McpError::InvalidParams(error.message),
                _ => McpError::Execution(error.message),
            });
        }

        response
            .result
            .ok_or_else(|| McpError::InvalidMessage("No result in response".to_string()))
    }

    /// List the tools exposed by the server
    pub async fn list_tools(&self) -> McpResult<ListToolsResponse> {
        let result = self.request("tools/list", None).await?;
        serde_json::from_value(result)
            .map_err(|e| McpError::Deserialization(format!("Invalid tools/list response: {}", e)))
    }

    /// Invoke a named tool with the given arguments
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> McpResult<ToolResult> {
        let params = serde_json::json!({ "name": name, "arguments": arguments });
        let result = self.request("tools/call", Some(params)).await?;
        serde_json::from_value(result)
            .map_err(|e| McpError::Deserialization(format!("Invalid tools/call response: {}", e)))
    }
}
