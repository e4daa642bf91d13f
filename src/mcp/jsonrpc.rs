//! JSON-RPC implementation for MCP protocol, compliant with JSON-RPC 2.0 specification.
//!
//! This module provides the dispatch layer shared by every tool server. It
//! handles:
//!
//! - Method registration and invocation
//! - Notification processing
//! - Error handling and reporting
//! - Raw message processing for the HTTP transport
//!
//! Method handlers are asynchronous so that registered tools can await
//! external I/O (search backend, database) without blocking the runtime.
//!
//! # Example
//!
//! ```rust,no_run
//! use mcp_tools::mcp::jsonrpc::JsonRpcHandler;
//! use mcp_tools::mcp::types::JsonRpcRequest;
//!
//! async fn example() {
//!     let handler = JsonRpcHandler::new();
//!
//!     handler
//!         .register_method("echo", |params| {
//!             Box::pin(async move { Ok(params.unwrap_or(serde_json::Value::Null)) })
//!         })
//!         .await;
//!
//!     let request = JsonRpcRequest::new(
//!         "echo",
//!         Some(serde_json::json!("Hello, world!")),
//!         serde_json::Value::String("1".to_string()),
//!     );
//!
//!     let response = handler.handle_request(request).await;
//!     println!("Result: {:?}", response.result);
//! }
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::mcp::types::{JsonRpcError, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse};
use crate::utils::error::{McpError, McpResult};

/// Boxed future returned by a method handler.
pub type MethodFuture = Pin<Box<dyn Future<Output = McpResult<serde_json::Value>> + Send>>;

/// Handler for JSON-RPC method calls
///
/// The function receives the optional `params` value from the request and
/// returns a future resolving to the method result. It must be thread-safe
/// (`Send + Sync`) since requests are dispatched concurrently.
pub type MethodHandler =
    Arc<dyn Fn(Option<serde_json::Value>) -> MethodFuture + Send + Sync>;

/// JSON-RPC handler for MCP protocol
///
/// The `JsonRpcHandler` is the central dispatch component of a tool server.
/// It manages method registration and request processing. The handler is
/// thread-safe and can be shared between tasks behind an `Arc`.
pub struct JsonRpcHandler {
    /// Registered method handlers mapped by method name
    methods: RwLock<HashMap<String, MethodHandler>>,
    /// Notification handlers mapped by notification name
    notification_handlers: RwLock<HashMap<String, MethodHandler>>,
}

impl std::fmt::Debug for JsonRpcHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonRpcHandler")
            .field(
                "methods_count",
                &self.methods.try_read().map(|m| m.len()).unwrap_or(0),
            )
            .finish_non_exhaustive()
    }
}

impl JsonRpcHandler {
    /// Creates a new JSON-RPC handler with empty registrations
    pub fn new() -> Self {
        debug!("Creating new JSON-RPC handler");
        Self {
            methods: RwLock::new(HashMap::new()),
            notification_handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a method handler for a specified method name
    ///
    /// When a JSON-RPC request is received for this method, the handler will
    /// be invoked with the parameters from the request.
    pub async fn register_method<F>(&self, name: &str, handler: F)
    where
        F: Fn(Option<serde_json::Value>) -> MethodFuture + Send + Sync + 'static,
    {
        let mut methods = self.methods.write().await;
        methods.insert(name.to_string(), Arc::new(handler));
        debug!("Registered method handler for '{}'", name);
    }

    /// Registers a notification handler for a specified notification type
    ///
    /// Unlike methods, notifications do not expect or generate responses.
    pub async fn register_notification<F>(&self, name: &str, handler: F)
    where
        F: Fn(Option<serde_json::Value>) -> MethodFuture + Send + Sync + 'static,
    {
        let mut handlers = self.notification_handlers.write().await;
        handlers.insert(name.to_string(), Arc::new(handler));
        debug!("Registered notification handler for '{}'", name);
    }

    /// Handles a JSON-RPC request and produces a response
    ///
    /// All error cases (invalid version, unknown method, handler failure)
    /// produce a valid JSON-RPC error response with the appropriate error
    /// code; this method itself never fails.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!(
            "Handling JSON-RPC request: method={}, id={:?}",
            request.method, request.id
        );

        if request.jsonrpc != "2.0" {
            warn!("Invalid JSON-RPC version: {}", request.jsonrpc);
            return JsonRpcResponse::error(
                JsonRpcError::invalid_request("Invalid JSON-RPC version"),
                request.id,
            );
        }

        // Clone the handler out of the map so the lock is not held across await.
        let handler = {
            let methods = self.methods.read().await;
            methods.get(&request.method).cloned()
        };

        match handler {
            Some(handler) => match handler(request.params).await {
                Ok(result) => {
                    debug!("Method call successful: {}", request.method);
                    JsonRpcResponse::success(result, request.id)
                }
                Err(error) => {
                    warn!("Method call failed: {}: {}", request.method, error);
                    JsonRpcResponse::error(JsonRpcError::from(&error), request.id)
                }
            },
            None => {
                warn!("Method not found: {}", request.method);
                JsonRpcResponse::error(
                    JsonRpcError::method_not_found(&format!(
                        "Method '{}' not found",
                        request.method
                    )),
                    request.id,
                )
            }
        }
    }

    /// Handles a JSON-RPC notification
    ///
    /// If no handler is found for a notification, it is silently ignored per
    /// the JSON-RPC 2.0 specification.
    pub async fn handle_notification(&self, notification: JsonRpcNotification) -> McpResult<()> {
        debug!("Handling JSON-RPC notification: method={}", notification.method);

        if notification.jsonrpc != "2.0" {
            warn!(
                "Invalid JSON-RPC version in notification: {}",
                notification.jsonrpc
            );
            return Err(McpError::InvalidMessage(format!(
                "Invalid JSON-RPC version: {}",
                notification.jsonrpc
            )));
        }

        let handler = {
            let handlers = self.notification_handlers.read().await;
            handlers.get(&notification.method).cloned()
        };

        match handler {
            Some(handler) => {
                handler(notification.params).await?;
                debug!("Notification processed: {}", notification.method);
                Ok(())
            }
            None => {
                debug!("No handler for notification method: {}", notification.method);
                Ok(())
            }
        }
    }

    /// Processes a raw JSON message and determines if it's a request or notification
    ///
    /// Returns `Some(bytes)` with the serialized response if the message was
    /// a request, or `None` if it was a notification. A payload that parses
    /// as neither is rejected with [`McpError::InvalidMessage`]; the HTTP
    /// layer answers those with a 400 status instead of a JSON-RPC response.
    pub async fn process_json_message(&self, json_data: &[u8]) -> McpResult<Option<Vec<u8>>> {
        match serde_json::from_slice::<JsonRpcRequest>(json_data) {
            Ok(request) => {
                let response = self.handle_request(request).await;
                Ok(Some(response.to_bytes()?))
            }
            Err(_) => match serde_json::from_slice::<JsonRpcNotification>(json_data) {
                Ok(notification) => {
                    self.handle_notification(notification).await?;
                    Ok(None)
                }
                Err(e) => {
                    warn!("Invalid JSON-RPC message: {}", e);
                    Err(McpError::InvalidMessage(format!(
                        "Invalid JSON-RPC message: {}",
                        e
                    )))
                }
            },
        }
    }
}

impl Default for JsonRpcHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_and_handle_method() {
        let handler = JsonRpcHandler::new();

        handler
            .register_method("test.method", |params| {
                Box::pin(async move {
                    match params {
                        Some(serde_json::Value::Object(obj)) if obj.contains_key("echo") => {
                            Ok(obj["echo"].clone())
                        }
                        _ => Ok(serde_json::Value::String("default".to_string())),
                    }
                })
            })
            .await;

        let params = serde_json::json!({ "echo": "hello world" });
        let request = JsonRpcRequest::new(
            "test.method",
            Some(params),
            serde_json::Value::String("1".to_string()),
        );

        let response = handler.handle_request(request).await;

        assert_eq!(response.jsonrpc, "2.0");
        assert_eq!(response.id, serde_json::Value::String("1".to_string()));
        assert!(response.error.is_none());
        assert_eq!(
            response.result.as_ref().unwrap(),
            &serde_json::Value::String("hello world".to_string())
        );
    }

    #[tokio::test]
    async fn test_method_not_found() {
        let handler = JsonRpcHandler::new();

        let request = JsonRpcRequest::new(
            "nonexistent.method",
            None,
            serde_json::Value::String("1".to_string()),
        );

        let response = handler.handle_request(request).await;

        assert_eq!(response.result, None);
        let error = response.error.unwrap();
        assert_eq!(error.code, -32601);
    }

    #[tokio::test]
    async fn test_invalid_version_rejected() {
        let handler = JsonRpcHandler::new();

        let mut request = JsonRpcRequest::new("x", None, serde_json::Value::String("1".into()));
        request.jsonrpc = "1.0".to_string();

        let response = handler.handle_request(request).await;
        assert_eq!(response.error.unwrap().code, -32600);
    }

    #[tokio::test]
    async fn test_process_json_message_request() {
        let handler = JsonRpcHandler::new();
        handler
            .register_method("ping", |_| {
                Box::pin(async { Ok(serde_json::Value::String("pong".to_string())) })
            })
            .await;

        let raw = br#"{"jsonrpc":"2.0","method":"ping","id":"7"}"#;
        let bytes = handler.process_json_message(raw).await.unwrap().unwrap();
        let response = JsonRpcResponse::from_bytes(&bytes).unwrap();
        assert_eq!(
            response.result,
            Some(serde_json::Value::String("pong".to_string()))
        );
    }

    #[tokio::test]
    async fn test_process_json_message_rejects_malformed_payload() {
        let handler = JsonRpcHandler::new();

        let error = handler
            .process_json_message(b"{ not json")
            .await
            .unwrap_err();
        assert!(matches!(error, McpError::InvalidMessage(_)));
    }

    #[tokio::test]
    async fn test_process_json_message_notification() {
        let handler = JsonRpcHandler::new();

        let raw = br#"{"jsonrpc":"2.0","method":"log"}"#;
        let result = handler.process_json_message(raw).await.unwrap();
        assert!(result.is_none());
    }
}
