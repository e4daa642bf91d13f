use thiserror::Error;

/// A specialized Result type for MCP operations.
pub type McpResult<T> = Result<T, McpError>;

/// Represents errors that can occur during MCP protocol operations.
#[derive(Debug, Error)]
pub enum McpError {
    /// Invalid message format or content
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// Invalid method parameters
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Failed to serialize a value
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Failed to deserialize a value
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Tool or method execution failed
    #[error("Execution error: {0}")]
    Execution(String),

    /// A named tool, method, or resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// An external collaborator (search backend, database) failed
    #[error("Backend error: {0}")]
    Backend(String),

    /// Configuration is missing or malformed
    #[error("Config error: {0}")]
    Config(String),

    /// IO error during read/write operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Operation timed out
    #[error("Operation timed out")]
    Timeout,
}

impl McpError {
    /// Returns the JSON-RPC 2.0 error code that corresponds to this error.
    pub fn jsonrpc_code(&self) -> i32 {
        match self {
            McpError::InvalidMessage(_) => -32600,
            McpError::InvalidParams(_) => -32602,
            McpError::NotFound(_) => -32601,
            _ => -32603,
        }
    }
}
