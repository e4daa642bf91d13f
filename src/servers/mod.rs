//! Tool registration for each server binary.
//!
//! Every function here builds a fully-wired [`JsonRpcHandler`]: it creates a
//! tool provider, registers the server's tools with their handlers, and
//! exposes them through `tools/list` and `tools/call`. The binaries only add
//! the HTTP listener on top.

/// Tools of the web search server
pub mod search;

/// Tools of the math server
pub mod math;

/// Tools of the database server
pub mod db;
