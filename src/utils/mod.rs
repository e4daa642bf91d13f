//! Utility modules shared across the crate.

/// Error types and the `McpResult` alias.
pub mod error;
