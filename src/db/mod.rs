//! Read-only database lookups for the db tool server.
//!
//! The server answers point lookups against the `pessoas` table (exact name
//! match returning a salary) and a full name scan. Both operations acquire
//! one pooled connection for the duration of a single tool invocation; the
//! checkout guard releases it on every exit path, including errors.
//!
//! The lookups sit behind the [`DirectoryBackend`] trait so the request
//! handler can be exercised in tests without a running database.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::debug;

use crate::utils::error::{McpError, McpResult};

/// Interface to the people directory.
#[async_trait]
pub trait DirectoryBackend: Send + Sync {
    /// Fetches the salary for each name, `None` when the name is absent.
    ///
    /// Rows come back in the same order as the input names.
    async fn salaries(&self, names: &[String]) -> McpResult<Vec<(String, Option<f64>)>>;

    /// Returns every name in the table.
    async fn names(&self) -> McpResult<Vec<String>>;
}

/// Read-only handle to the people directory database.
#[derive(Debug, Clone)]
pub struct Directory {
    pool: PgPool,
}

impl Directory {
    /// Connects a small pool to the database at `url`.
    pub async fn connect(url: &str) -> McpResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(|e| McpError::Backend(format!("Failed to connect to database: {}", e)))?;

        Ok(Self { pool })
    }

    /// Wraps an existing pool (used by tests with their own fixtures).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DirectoryBackend for Directory {
    async fn salaries(&self, names: &[String]) -> McpResult<Vec<(String, Option<f64>)>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| McpError::Backend(format!("Failed to acquire connection: {}", e)))?;

        let mut rows = Vec::with_capacity(names.len());
        for name in names {
            debug!("Looking up salary for {}", name);
            let salary: Option<f64> =
                sqlx::query_scalar("SELECT salary::float8 FROM pessoas WHERE name = $1")
                    .bind(name)
                    .fetch_optional(&mut *conn)
                    .await
                    .map_err(|e| McpError::Backend(format!("Query failed: {}", e)))?;

            rows.push((name.clone(), salary));
        }

        Ok(rows)
    }

    async fn names(&self) -> McpResult<Vec<String>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| McpError::Backend(format!("Failed to acquire connection: {}", e)))?;

        sqlx::query_scalar("SELECT name FROM pessoas")
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| McpError::Backend(format!("Query failed: {}", e)))
    }
}

/// Renders lookup rows as the newline-joined text returned by the tool:
/// `"<name>: <salary>"` or `"<name>: not found"` per line.
pub fn format_salary_lines(rows: &[(String, Option<f64>)]) -> String {
    rows.iter()
        .map(|(name, salary)| match salary {
            Some(value) => format!("{}: {}", name, value),
            None => format!("{}: not found", name),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_salary_lines() {
        let rows = vec![
            ("Alice".to_string(), Some(4200.5)),
            ("Bob".to_string(), None),
        ];

        let text = format_salary_lines(&rows);
        assert_eq!(text, "Alice: 4200.5\nBob: not found");
    }

    #[test]
    fn test_format_salary_lines_empty() {
        assert_eq!(format_salary_lines(&[]), "");
    }
}
