//! Math tool server binary.
//!
//! Serves the `calculate_mean` and `calculate_sum` tools at port 8082 by
//! default. An optional first argument names a YAML settings file.

use std::path::PathBuf;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mcp_tools::config::Settings;
use mcp_tools::mcp::server::ToolServer;
use mcp_tools::servers::math;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(config_path.as_deref()).context("Failed to load settings")?;

    let handler = math::build_handler(settings.math.mean_precision)
        .await
        .context("Failed to register tools")?;

    let addr = settings
        .math
        .addr
        .parse()
        .with_context(|| format!("Invalid bind address: {}", settings.math.addr))?;

    info!("Starting math server");
    ToolServer::new("Math Tools Server", handler)
        .serve(addr)
        .await
        .context("Server error")?;

    Ok(())
}
