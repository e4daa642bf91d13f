//! Minimal tool client binary.
//!
//! Connects to a tool server, lists its tools, invokes one, and prints the
//! result. Usage:
//!
//! ```text
//! client <server-url> <tool-name> [arguments-json]
//! ```
//!
//! With no arguments it calls `duckduckgo_search` on the local search server.

use anyhow::{bail, Context};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use mcp_tools::mcp::client::ToolClient;
use mcp_tools::mcp::tools::ToolResultContent;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let url = args
        .next()
        .unwrap_or_else(|| "http://127.0.0.1:8080".to_string());
    let tool = args
        .next()
        .unwrap_or_else(|| "duckduckgo_search".to_string());
    let arguments = match args.next() {
        Some(raw) => serde_json::from_str(&raw).context("Arguments must be valid JSON")?,
        None => json!({ "query": "Rust programming language" }),
    };

    let client = ToolClient::new(&url)?;

    let tools = client.list_tools().await.context("tools/list failed")?;
    println!("Available tools:");
    for t in &tools.tools {
        println!("  {}: {}", t.name, t.description);
    }

    if !tools.tools.iter().any(|t| t.name == tool) {
        bail!("Tool '{}' is not available on {}", tool, url);
    }

    let result = client
        .call_tool(&tool, arguments)
        .await
        .context("tools/call failed")?;

    if result.is_error {
        eprintln!("Tool reported an error:");
    }
    for item in &result.content {
        match item {
            ToolResultContent::Text { text } => println!("{}", text),
            ToolResultContent::Json { value } => {
                println!("{}", serde_json::to_string_pretty(value)?)
            }
        }
    }

    Ok(())
}
