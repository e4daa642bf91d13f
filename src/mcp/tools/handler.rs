use crate::mcp::jsonrpc::JsonRpcHandler;
use crate::mcp::tools::models::{Tool, ToolResult};
use crate::utils::error::{McpError, McpResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Request parameters for listing tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsParams {
    /// Optional cursor for pagination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// Response for listing tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsResponse {
    /// List of available tools
    pub tools: Vec<Tool>,

    /// Optional cursor for fetching next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Request parameters for calling a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolParams {
    /// Name of the tool to call
    pub name: String,

    /// Arguments to pass to the tool
    #[serde(default)]
    pub arguments: Value,
}

/// Handler trait for tools functionality
#[async_trait]
pub trait ToolsProvider: Send + Sync {
    /// Lists available tools
    async fn list_tools(&self, cursor: Option<&str>) -> McpResult<ListToolsResponse>;

    /// Calls a tool
    async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<ToolResult>;
}

/// Handler for tools requests
///
/// Bridges a [`ToolsProvider`] to the JSON-RPC dispatch layer by registering
/// the `tools/list` and `tools/call` methods.
pub struct ToolsHandler {
    /// Provider for tools functionality
    provider: Arc<dyn ToolsProvider>,
}

impl fmt::Debug for ToolsHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolsHandler").finish_non_exhaustive()
    }
}

impl ToolsHandler {
    /// Creates a new tools handler with the given provider
    pub fn new(provider: Arc<dyn ToolsProvider>) -> Self {
        Self { provider }
    }

    /// Registers the `tools/list` and `tools/call` methods with the JSON-RPC handler
    pub async fn register_methods(&self, method_handler: &JsonRpcHandler) {
        let list_provider = self.provider.clone();
        method_handler
            .register_method("tools/list", move |params| {
                let provider = list_provider.clone();
                Box::pin(async move {
                    let params: ListToolsParams =
                        serde_json::from_value(params.unwrap_or(Value::Null))
                            .unwrap_or(ListToolsParams { cursor: None });

                    let response = provider.list_tools(params.cursor.as_deref()).await?;

                    serde_json::to_value(response)
                        .map_err(|e| McpError::Serialization(e.to_string()))
                })
            })
            .await;

        let call_provider = self.provider.clone();
        method_handler
            .register_method("tools/call", move |params| {
                let provider = call_provider.clone();
                Box::pin(async move {
                    let params_value = params.unwrap_or(Value::Null);
                    let params: CallToolParams = serde_json::from_value(params_value)
                        .map_err(|e| McpError::InvalidParams(format!("Invalid params: {}", e)))?;

                    let result = provider.call_tool(&params.name, params.arguments).await?;

                    serde_json::to_value(result)
                        .map_err(|e| McpError::Serialization(e.to_string()))
                })
            })
            .await;
    }
}

impl Clone for ToolsHandler {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
        }
    }
}
