//! Configuration for the tool servers.
//!
//! Settings load from an optional YAML file; every field has a default so a
//! server can start with no configuration at all. The database URL can also
//! be supplied through the `DATABASE_URL` environment variable, which takes
//! precedence over the file.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::utils::error::{McpError, McpResult};

/// Settings for all tool servers
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Search server settings
    #[serde(default)]
    pub search: SearchServerSettings,

    /// Math server settings
    #[serde(default)]
    pub math: MathServerSettings,

    /// Database server settings
    #[serde(default)]
    pub database: DatabaseServerSettings,
}

/// Settings for the web search server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchServerSettings {
    /// Bind address
    #[serde(default = "default_search_addr")]
    pub addr: String,

    /// Maximum number of results returned per search
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Backend request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Settings for the math server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MathServerSettings {
    /// Bind address
    #[serde(default = "default_math_addr")]
    pub addr: String,

    /// Decimal places the mean is rounded to
    #[serde(default = "default_mean_precision")]
    pub mean_precision: u32,
}

/// Settings for the database server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseServerSettings {
    /// Bind address
    #[serde(default = "default_db_addr")]
    pub addr: String,

    /// Postgres connection URL
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for SearchServerSettings {
    fn default() -> Self {
        Self {
            addr: default_search_addr(),
            max_results: default_max_results(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for MathServerSettings {
    fn default() -> Self {
        Self {
            addr: default_math_addr(),
            mean_precision: default_mean_precision(),
        }
    }
}

impl Default for DatabaseServerSettings {
    fn default() -> Self {
        Self {
            addr: default_db_addr(),
            url: default_database_url(),
        }
    }
}

impl Settings {
    /// Loads settings from a YAML file, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> McpResult<Self> {
        match path {
            Some(path) => {
                let mut file = File::open(path).map_err(|e| {
                    McpError::Config(format!("Failed to open {}: {}", path.display(), e))
                })?;
                let mut contents = String::new();
                file.read_to_string(&mut contents)?;
                serde_yaml::from_str(&contents)
                    .map_err(|e| McpError::Config(format!("Invalid settings file: {}", e)))
            }
            None => Ok(Self::default()),
        }
    }

    /// The database URL, with the `DATABASE_URL` environment variable taking
    /// precedence over the configured value.
    pub fn database_url(&self) -> String {
        std::env::var("DATABASE_URL").unwrap_or_else(|_| self.database.url.clone())
    }
}

fn default_search_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_math_addr() -> String {
    "127.0.0.1:8082".to_string()
}

fn default_db_addr() -> String {
    "127.0.0.1:8081".to_string()
}

fn default_max_results() -> usize {
    crate::search::DEFAULT_MAX_RESULTS
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_mean_precision() -> u32 {
    1
}

fn default_database_url() -> String {
    "postgres://postgres@localhost:5432/mcpdb".to_string()
}
