//! Math tool server.
//!
//! Exposes `calculate_mean` and `calculate_sum` over a `values` array.
//! Both tools run the same coercion pipeline (see [`crate::numeric`]) and
//! return the full [`AggregationResult`] as structured JSON, including the
//! diagnostics for values that could not be converted.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::mcp::jsonrpc::JsonRpcHandler;
use crate::mcp::tools::{BasicToolProvider, Tool, ToolResult, ToolsHandler};
use crate::numeric::{coerce, AggregateOp};
use crate::utils::error::{McpError, McpResult};

/// Builds the JSON-RPC handler for the math server.
///
/// `mean_precision` is the number of decimal places the mean is rounded to;
/// sums are never rounded.
pub async fn build_handler(mean_precision: u32) -> McpResult<Arc<JsonRpcHandler>> {
    let provider = BasicToolProvider::new();

    let values_schema = json!({
        "type": "object",
        "properties": {
            "values": {
                "type": "array",
                "description": "Numbers, or strings that look like numbers"
            }
        },
        "required": ["values"]
    });

    provider.register_tool(
        Tool::new(
            "calculate_mean",
            "Computes the arithmetic mean of a list of values, ignoring entries that are not numeric.",
            values_schema.clone(),
        ),
        move |args| {
            Box::pin(async move {
                let values = extract_values(&args)?;
                let result = coerce(&values, AggregateOp::Mean { precision: mean_precision });
                Ok(ToolResult::json(serde_json::to_value(result).map_err(
                    |e| McpError::Serialization(e.to_string()),
                )?))
            })
        },
    )?;

    provider.register_tool(
        Tool::new(
            "calculate_sum",
            "Computes the sum of a list of values, ignoring entries that are not numeric.",
            values_schema,
        ),
        |args| {
            Box::pin(async move {
                let values = extract_values(&args)?;
                let result = coerce(&values, AggregateOp::Sum);
                Ok(ToolResult::json(serde_json::to_value(result).map_err(
                    |e| McpError::Serialization(e.to_string()),
                )?))
            })
        },
    )?;

    let rpc = Arc::new(JsonRpcHandler::new());
    ToolsHandler::new(Arc::new(provider))
        .register_methods(&rpc)
        .await;
    Ok(rpc)
}

/// Pulls the `values` array out of the tool arguments.
fn extract_values(args: &Value) -> McpResult<Vec<Value>> {
    match args.get("values") {
        Some(Value::Array(values)) => Ok(values.clone()),
        Some(_) => Err(McpError::InvalidParams(
            "'values' must be an array".to_string(),
        )),
        None => Err(McpError::InvalidParams(
            "Missing required 'values' argument".to_string(),
        )),
    }
}
