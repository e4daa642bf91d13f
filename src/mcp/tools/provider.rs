use crate::mcp::tools::handler::{ListToolsResponse, ToolsProvider};
use crate::mcp::tools::models::{Tool, ToolResult};
use crate::utils::error::{McpError, McpResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

/// Boxed future returned by a tool function.
pub type ToolFuture = Pin<Box<dyn Future<Output = McpResult<ToolResult>> + Send>>;

/// Type for tool execution functions
///
/// The function receives the `arguments` value from a `tools/call` request
/// and returns a future resolving to the tool result, so implementations may
/// await external I/O.
pub type ToolFunction = Arc<dyn Fn(Value) -> ToolFuture + Send + Sync>;

/// Basic implementation of the tools provider
///
/// Tools are registered once at server startup; the registry is never
/// mutated while requests are in flight, so a std `RwLock` suffices.
pub struct BasicToolProvider {
    /// Map of tools by name
    tools: RwLock<HashMap<String, Tool>>,

    /// Map of tool handlers by name
    handlers: RwLock<HashMap<String, ToolFunction>>,
}

impl fmt::Debug for BasicToolProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicToolProvider")
            .field(
                "tools_count",
                &self.tools.read().map(|t| t.len()).unwrap_or(0),
            )
            .finish_non_exhaustive()
    }
}

impl BasicToolProvider {
    /// Creates a new basic tools provider
    pub fn new() -> Self {
        Self {
            tools: RwLock::new(HashMap::new()),
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a new tool
    pub fn register_tool<F>(&self, tool: Tool, handler: F) -> McpResult<()>
    where
        F: Fn(Value) -> ToolFuture + Send + Sync + 'static,
    {
        let name = tool.name.clone();

        let mut tools = self
            .tools
            .write()
            .map_err(|_| McpError::Execution("Failed to acquire tools lock".to_string()))?;

        let mut handlers = self
            .handlers
            .write()
            .map_err(|_| McpError::Execution("Failed to acquire handlers lock".to_string()))?;

        tools.insert(name.clone(), tool);
        handlers.insert(name, Arc::new(handler));

        Ok(())
    }

    /// Unregisters a tool
    pub fn unregister_tool(&self, name: &str) -> McpResult<()> {
        let mut tools = self
            .tools
            .write()
            .map_err(|_| McpError::Execution("Failed to acquire tools lock".to_string()))?;

        let mut handlers = self
            .handlers
            .write()
            .map_err(|_| McpError::Execution("Failed to acquire handlers lock".to_string()))?;

        tools.remove(name);
        handlers.remove(name);

        Ok(())
    }
}

#[async_trait]
impl ToolsProvider for BasicToolProvider {
    async fn list_tools(&self, _cursor: Option<&str>) -> McpResult<ListToolsResponse> {
        let tools = self
            .tools
            .read()
            .map_err(|_| McpError::Execution("Failed to acquire tools lock".to_string()))?;

        let mut tools_vec: Vec<Tool> = tools.values().cloned().collect();
        tools_vec.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(ListToolsResponse {
            tools: tools_vec,
            next_cursor: None,
        })
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<ToolResult> {
        let handler = {
            let handlers = self
                .handlers
                .read()
                .map_err(|_| McpError::Execution("Failed to acquire handlers lock".to_string()))?;

            handlers
                .get(name)
                .cloned()
                .ok_or_else(|| McpError::NotFound(format!("Tool '{}' not found", name)))?
        };

        handler(arguments).await
    }
}

impl Default for BasicToolProvider {
    fn default() -> Self {
        Self::new()
    }
}
