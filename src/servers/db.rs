//! Database tool server.
//!
//! Exposes `get_user_account` (salary lookup by exact name match) and
//! `get_names` (the full name list). Database failures never surface as
//! JSON-RPC errors: `get_user_account` answers with an error text result and
//! `get_names` with a single-element list carrying the error message, so a
//! client always gets a well-formed tool result.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::warn;

use crate::db::{format_salary_lines, DirectoryBackend};
use crate::mcp::jsonrpc::JsonRpcHandler;
use crate::mcp::tools::{BasicToolProvider, Tool, ToolResult, ToolsHandler};
use crate::utils::error::{McpError, McpResult};

/// Builds the JSON-RPC handler for the database server.
pub async fn build_handler(directory: Arc<dyn DirectoryBackend>) -> McpResult<Arc<JsonRpcHandler>> {
    let provider = BasicToolProvider::new();

    let lookup_directory = directory.clone();
    provider.register_tool(
        Tool::new(
            "get_user_account",
            "Returns the salary for each given name, one line per name.",
            json!({
                "type": "object",
                "properties": {
                    "names": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Names to look up, matched exactly"
                    }
                },
                "required": ["names"]
            }),
        ),
        move |args| {
            let directory = lookup_directory.clone();
            Box::pin(async move {
                let names = extract_names(&args)?;
                if names.is_empty() {
                    return Ok(ToolResult::text("Empty name list provided"));
                }

                match directory.salaries(&names).await {
                    Ok(rows) => Ok(ToolResult::text(&format_salary_lines(&rows))),
                    Err(e) => {
                        warn!("Salary lookup failed: {}", e);
                        Ok(ToolResult::error(&format!("Database query failed: {}", e)))
                    }
                }
            })
        },
    )?;

    provider.register_tool(
        Tool::new(
            "get_names",
            "Returns every name known to the directory.",
            json!({ "type": "object", "properties": {} }),
        ),
        move |_args| {
            let directory = directory.clone();
            Box::pin(async move {
                match directory.names().await {
                    Ok(names) => Ok(ToolResult::json(json!(names))),
                    Err(e) => {
                        warn!("Name listing failed: {}", e);
                        // Errors ride inside the list so the shape stays stable.
                        Ok(ToolResult::json(json!([format!(
                            "Database query failed: {}",
                            e
                        )])))
                    }
                }
            })
        },
    )?;

    let rpc = Arc::new(JsonRpcHandler::new());
    ToolsHandler::new(Arc::new(provider))
        .register_methods(&rpc)
        .await;
    Ok(rpc)
}

/// Pulls the `names` array of strings out of the tool arguments.
fn extract_names(args: &Value) -> McpResult<Vec<String>> {
    let names = args
        .get("names")
        .ok_or_else(|| McpError::InvalidParams("Missing required 'names' argument".to_string()))?;

    serde_json::from_value(names.clone())
        .map_err(|_| McpError::InvalidParams("'names' must be an array of strings".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::types::JsonRpcRequest;
    use async_trait::async_trait;

    /// Directory double backed by a fixed row set, or failing outright.
    struct StubDirectory {
        rows: Vec<(String, Option<f64>)>,
        fail: bool,
    }

    impl StubDirectory {
        fn with_rows(rows: Vec<(String, Option<f64>)>) -> Arc<Self> {
            Arc::new(Self { rows, fail: false })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                rows: Vec::new(),
                fail: true,
            })
        }
    }

    #[async_trait]
    impl DirectoryBackend for StubDirectory {
        async fn salaries(&self, names: &[String]) -> McpResult<Vec<(String, Option<f64>)>> {
            if self.fail {
                return Err(McpError::Backend("connection refused".to_string()));
            }
            Ok(names
                .iter()
                .map(|name| {
                    let salary = self
                        .rows
                        .iter()
                        .find(|(n, _)| n == name)
                        .and_then(|(_, s)| *s);
                    (name.clone(), salary)
                })
                .collect())
        }

        async fn names(&self) -> McpResult<Vec<String>> {
            if self.fail {
                return Err(McpError::Backend("connection refused".to_string()));
            }
            Ok(self.rows.iter().map(|(n, _)| n.clone()).collect())
        }
    }

    async fn call(rpc: &JsonRpcHandler, name: &str, arguments: Value) -> Value {
        let request = JsonRpcRequest::new(
            "tools/call",
            Some(json!({ "name": name, "arguments": arguments })),
            json!("1"),
        );
        rpc.handle_request(request).await.result.unwrap()
    }

    #[tokio::test]
    async fn test_salary_lines_for_found_and_missing_names() {
        let directory = StubDirectory::with_rows(vec![("Alice".to_string(), Some(4200.5))]);
        let rpc = build_handler(directory).await.unwrap();

        let result = call(
            &rpc,
            "get_user_account",
            json!({ "names": ["Alice", "Bob"] }),
        )
        .await;

        assert_eq!(result["is_error"], false);
        assert_eq!(
            result["content"][0]["text"],
            "Alice: 4200.5\nBob: not found"
        );
    }

    #[tokio::test]
    async fn test_empty_name_list_reply() {
        let directory = StubDirectory::with_rows(Vec::new());
        let rpc = build_handler(directory).await.unwrap();

        let result = call(&rpc, "get_user_account", json!({ "names": [] })).await;

        assert_eq!(result["is_error"], false);
        assert_eq!(result["content"][0]["text"], "Empty name list provided");
    }

    #[tokio::test]
    async fn test_lookup_failure_becomes_error_text() {
        let directory = StubDirectory::failing();
        let rpc = build_handler(directory).await.unwrap();

        let result = call(&rpc, "get_user_account", json!({ "names": ["Alice"] })).await;

        assert_eq!(result["is_error"], true);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Database query failed:"));
        assert!(text.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_names_listing() {
        let directory = StubDirectory::with_rows(vec![
            ("Alice".to_string(), Some(1.0)),
            ("Bob".to_string(), None),
        ]);
        let rpc = build_handler(directory).await.unwrap();

        let result = call(&rpc, "get_names", json!({})).await;

        assert_eq!(result["is_error"], false);
        assert_eq!(result["content"][0]["value"], json!(["Alice", "Bob"]));
    }

    #[tokio::test]
    async fn test_names_failure_rides_inside_the_list() {
        let directory = StubDirectory::failing();
        let rpc = build_handler(directory).await.unwrap();

        let result = call(&rpc, "get_names", json!({})).await;

        assert_eq!(result["is_error"], false);
        let list = result["content"][0]["value"].as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert!(list[0]
            .as_str()
            .unwrap()
            .starts_with("Database query failed:"));
    }

    #[test]
    fn test_extract_names_accepts_strings() {
        let names = extract_names(&json!({ "names": ["Alice", "Bob"] })).unwrap();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_extract_names_rejects_mixed_types() {
        let error = extract_names(&json!({ "names": ["Alice", 42] })).unwrap_err();
        assert!(matches!(error, McpError::InvalidParams(_)));
    }

    #[test]
    fn test_extract_names_requires_argument() {
        let error = extract_names(&json!({})).unwrap_err();
        assert!(matches!(error, McpError::InvalidParams(_)));
    }
}
