//! Web search tool server.
//!
//! Exposes a single tool, `duckduckgo_search`, whose query argument may be a
//! plain string, a structured object, or a JSON object encoded in a string.
//! The argument is normalized (see [`crate::query`]) before the backend is
//! called; backend failures are converted into an error text result, never
//! propagated to the transport.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::info;

use crate::mcp::jsonrpc::JsonRpcHandler;
use crate::mcp::tools::{BasicToolProvider, Tool, ToolResult, ToolsHandler};
use crate::query::{normalize, RawQueryInput};
use crate::search::{format_results, SearchBackend};
use crate::utils::error::{McpError, McpResult};

/// Builds the JSON-RPC handler for the search server.
pub async fn build_handler(
    backend: Arc<dyn SearchBackend>,
    max_results: usize,
) -> McpResult<Arc<JsonRpcHandler>> {
    let provider = BasicToolProvider::new();

    let tool = Tool::new(
        "duckduckgo_search",
        "Runs a web search using DuckDuckGo and returns the top results.",
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "description": "Search query: free text or a key/value payload"
                }
            },
            "required": ["query"]
        }),
    );

    provider.register_tool(tool, move |args| {
        let backend = backend.clone();
        Box::pin(async move {
            let raw_query = extract_query(&args)?;
            let query = normalize(RawQueryInput::resolve(raw_query));
            info!("Searching for: {}", query);

            match backend.search(&query, max_results).await {
                Ok(results) => Ok(ToolResult::text(&format_results(&results))),
                // One conversion, no retry: the caller gets a descriptive string.
                Err(e) => Ok(ToolResult::error(&format!("Search failed: {}", e))),
            }
        })
    })?;

    let rpc = Arc::new(JsonRpcHandler::new());
    ToolsHandler::new(Arc::new(provider))
        .register_methods(&rpc)
        .await;
    Ok(rpc)
}

/// Pulls the raw query value out of the tool arguments.
///
/// Accepts either `{"query": <value>}` or a bare string as the arguments
/// object.
fn extract_query(args: &Value) -> McpResult<Value> {
    match args {
        Value::Object(map) => map
            .get("query")
            .cloned()
            .ok_or_else(|| McpError::InvalidParams("Missing required 'query' argument".to_string())),
        Value::String(_) => Ok(args.clone()),
        _ => Err(McpError::InvalidParams(
            "'query' must be a string or object".to_string(),
        )),
    }
}
