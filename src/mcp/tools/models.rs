use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Represents a single tool that can be invoked by a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Unique identifier for the tool
    pub name: String,

    /// Human-readable description of functionality
    pub description: String,

    /// JSON Schema defining expected parameters
    pub input_schema: Value,
}

impl Tool {
    /// Creates a new tool with the given name, description, and input schema
    pub fn new(name: &str, description: &str, input_schema: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Represents different content types for tool results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolResultContent {
    /// Text content
    #[serde(rename = "text")]
    Text {
        /// The text content
        text: String,
    },

    /// Structured JSON content
    #[serde(rename = "json")]
    Json {
        /// The structured value
        value: Value,
    },
}

/// Represents the result of a tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// List of content items in the result
    pub content: Vec<ToolResultContent>,

    /// Whether the tool execution resulted in an error
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    /// Creates a new success result with text content
    pub fn text(text: &str) -> Self {
        Self {
            content: vec![ToolResultContent::Text {
                text: text.to_string(),
            }],
            is_error: false,
        }
    }

    /// Creates a new success result with structured JSON content
    pub fn json(value: Value) -> Self {
        Self {
            content: vec![ToolResultContent::Json { value }],
            is_error: false,
        }
    }

    /// Creates a new error result with text content
    pub fn error(text: &str) -> Self {
        Self {
            content: vec![ToolResultContent::Text {
                text: text.to_string(),
            }],
            is_error: true,
        }
    }

    /// Returns the first text content item, if any
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|item| match item {
            ToolResultContent::Text { text } => Some(text.as_str()),
            ToolResultContent::Json { .. } => None,
        })
    }

    /// Returns the first structured JSON content item, if any
    pub fn first_json(&self) -> Option<&Value> {
        self.content.iter().find_map(|item| match item {
            ToolResultContent::Json { value } => Some(value),
            ToolResultContent::Text { .. } => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_result() {
        let result = ToolResult::text("ok");
        assert!(!result.is_error);
        assert_eq!(result.first_text(), Some("ok"));
        assert!(result.first_json().is_none());
    }

    #[test]
    fn test_error_result() {
        let result = ToolResult::error("boom");
        assert!(result.is_error);
        assert_eq!(result.first_text(), Some("boom"));
    }

    #[test]
    fn test_json_result_serialization() {
        let result = ToolResult::json(json!({ "success": true }));
        let serialized = serde_json::to_value(&result).unwrap();
        assert_eq!(serialized["content"][0]["type"], "json");
        assert_eq!(serialized["content"][0]["value"]["success"], true);
        assert_eq!(serialized["is_error"], false);
    }
}
