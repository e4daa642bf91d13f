//! Database tool server binary.
//!
//! Serves the `get_user_account` and `get_names` tools at port 8081 by
//! default. An optional first argument names a YAML settings file; the
//! `DATABASE_URL` environment variable overrides the configured connection
//! URL.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mcp_tools::config::Settings;
use mcp_tools::db::Directory;
use mcp_tools::mcp::server::ToolServer;
use mcp_tools::servers::db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(config_path.as_deref()).context("Failed to load settings")?;

    let directory = Directory::connect(&settings.database_url())
        .await
        .context("Failed to connect to database")?;
    let handler = db::build_handler(Arc::new(directory))
        .await
        .context("Failed to register tools")?;

    let addr = settings
        .database
        .addr
        .parse()
        .with_context(|| format!("Invalid bind address: {}", settings.database.addr))?;

    info!("Starting database server");
    ToolServer::new("Database Lookup Server", handler)
        .serve(addr)
        .await
        .context("Server error")?;

    Ok(())
}
