//! HTTP server for the MCP protocol transport layer.
//!
//! Each tool server binary builds a [`ToolServer`] around a configured
//! [`JsonRpcHandler`] and serves it at a fixed network port. Requests are
//! accepted as JSON-RPC 2.0 payloads on `POST /rpc`; a `GET /health` route
//! reports liveness.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::mcp::jsonrpc::JsonRpcHandler;
use crate::utils::error::{McpError, McpResult};

/// Shared state for the HTTP routes
struct ServerState {
    /// Human-readable server name, reported by the health route
    name: String,
    /// JSON-RPC dispatch handler
    handler: Arc<JsonRpcHandler>,
}

/// HTTP server exposing a JSON-RPC handler as a tool server
pub struct ToolServer {
    state: Arc<ServerState>,
}

impl std::fmt::Debug for ToolServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolServer")
            .field("name", &self.state.name)
            .finish_non_exhaustive()
    }
}

impl ToolServer {
    /// Creates a new tool server around the given JSON-RPC handler
    pub fn new(name: &str, handler: Arc<JsonRpcHandler>) -> Self {
        Self {
            state: Arc::new(ServerState {
                name: name.to_string(),
                handler,
            }),
        }
    }

    /// Builds the axum router for this server
    pub fn router(&self) -> Router {
        Router::new()
            .route("/rpc", post(Self::rpc_handler))
            .route("/health", get(Self::health_handler))
            .with_state(self.state.clone())
    }

    /// Binds the given address and serves requests until the process exits
    pub async fn serve(&self, addr: SocketAddr) -> McpResult<()> {
        let listener = TcpListener::bind(addr).await?;
        info!("{} listening on {}", self.state.name, addr);
        self.serve_on(listener).await
    }

    /// Serves requests on an already-bound listener
    ///
    /// Useful in tests, where the listener is bound to an ephemeral port
    /// before the server task is spawned.
    pub async fn serve_on(&self, listener: TcpListener) -> McpResult<()> {
        axum::serve(listener, self.router())
            .await
            .map_err(|e| McpError::Execution(format!("HTTP server error: {}", e)))
    }

    /// RPC handler for incoming JSON-RPC payloads
    async fn rpc_handler(
        State(state): State<Arc<ServerState>>,
        body: Bytes,
    ) -> impl IntoResponse {
        debug!("Received {} byte JSON-RPC payload", body.len());

        match state.handler.process_json_message(&body).await {
            Ok(Some(response)) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                response,
            )
                .into_response(),
            // Notification: nothing to send back
            Ok(None) => StatusCode::NO_CONTENT.into_response(),
            Err(e) => {
                error!("Failed to process JSON-RPC message: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "error": e.to_string() })),
                )
                    .into_response()
            }
        }
    }

    /// Health check handler
    async fn health_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
        (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "ok", "server": state.name })),
        )
    }
}
