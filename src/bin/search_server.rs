//! Web search tool server binary.
//!
//! Serves the `duckduckgo_search` tool at port 8080 by default. An optional
//! first argument names a YAML settings file.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mcp_tools::config::Settings;
use mcp_tools::mcp::server::ToolServer;
use mcp_tools::search::DuckDuckGoBackend;
use mcp_tools::servers::search;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(config_path.as_deref()).context("Failed to load settings")?;

    let backend = Arc::new(
        DuckDuckGoBackend::new(Duration::from_secs(settings.search.timeout_seconds))
            .context("Failed to create search backend")?,
    );
    let handler = search::build_handler(backend, settings.search.max_results)
        .await
        .context("Failed to register tools")?;

    let addr = settings
        .search
        .addr
        .parse()
        .with_context(|| format!("Invalid bind address: {}", settings.search.addr))?;

    info!("Starting web search server");
    ToolServer::new("Web Search Assistant Server", handler)
        .serve(addr)
        .await
        .context("Server error")?;

    Ok(())
}
