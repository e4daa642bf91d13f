//! Web search backend integration.
//!
//! The search server talks to DuckDuckGo's Instant Answer API (no API key
//! required). The backend sits behind the [`SearchBackend`] trait so the
//! request handler can be exercised in tests without network access.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::utils::error::{McpError, McpResult};

/// Default cap on returned results
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// One search hit: title, URL, and a text snippet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The title of the result
    pub title: String,
    /// URL of the result, when the API provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Text snippet or description
    pub snippet: String,
}

/// Interface to a web search service.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Runs `query` and returns at most `max_results` hits.
    async fn search(&self, query: &str, max_results: usize) -> McpResult<Vec<SearchResult>>;
}

/// DuckDuckGo Instant Answer API response (the fields we consume).
#[derive(Debug, Deserialize)]
struct DdgResponse {
    #[serde(rename = "Abstract")]
    abstract_text: Option<String>,
    #[serde(rename = "AbstractURL")]
    abstract_url: Option<String>,
    #[serde(rename = "Heading")]
    heading: Option<String>,
    #[serde(rename = "Answer")]
    answer: Option<String>,
    #[serde(rename = "Definition")]
    definition: Option<String>,
    #[serde(rename = "DefinitionURL")]
    definition_url: Option<String>,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<DdgRelatedTopic>,
}

/// Related topics arrive either as plain topics or nested groups.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DdgRelatedTopic {
    Topic {
        #[serde(rename = "Text")]
        text: Option<String>,
        #[serde(rename = "FirstURL")]
        first_url: Option<String>,
    },
    Group {
        #[serde(rename = "Topics", default)]
        topics: Vec<DdgRelatedTopic>,
    },
}

/// Search backend talking to DuckDuckGo over HTTPS.
#[derive(Debug, Clone)]
pub struct DuckDuckGoBackend {
    client: Client,
    endpoint: String,
}

impl DuckDuckGoBackend {
    /// Creates a backend with the given request timeout.
    pub fn new(timeout: Duration) -> McpResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| McpError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: "https://api.duckduckgo.com/".to_string(),
        })
    }

    /// Flattens related topics into results, respecting the cap.
    fn extract_related(topics: &[DdgRelatedTopic], results: &mut Vec<SearchResult>, max: usize) {
        for topic in topics {
            if results.len() >= max {
                break;
            }
            match topic {
                DdgRelatedTopic::Topic { text, first_url } => {
                    if let Some(text) = text.as_ref().filter(|t| !t.is_empty()) {
                        results.push(SearchResult {
                            title: "Related".to_string(),
                            url: first_url.clone(),
                            snippet: text.clone(),
                        });
                    }
                }
                DdgRelatedTopic::Group { topics } => {
                    Self::extract_related(topics, results, max);
                }
            }
        }
    }

    fn collect_results(response: DdgResponse, max_results: usize) -> Vec<SearchResult> {
        let mut results = Vec::new();

        if let Some(answer) = response.answer.filter(|a| !a.is_empty()) {
            results.push(SearchResult {
                title: "Instant Answer".to_string(),
                url: None,
                snippet: answer,
            });
        }

        if let Some(definition) = response.definition.filter(|d| !d.is_empty()) {
            results.push(SearchResult {
                title: "Definition".to_string(),
                url: response.definition_url,
                snippet: definition,
            });
        }

        if let Some(abstract_text) = response.abstract_text.filter(|a| !a.is_empty()) {
            results.push(SearchResult {
                title: response.heading.unwrap_or_else(|| "Summary".to_string()),
                url: response.abstract_url,
                snippet: abstract_text,
            });
        }

        Self::extract_related(&response.related_topics, &mut results, max_results);

        results.truncate(max_results);
        results
    }
}

#[async_trait]
impl SearchBackend for DuckDuckGoBackend {
    async fn search(&self, query: &str, max_results: usize) -> McpResult<Vec<SearchResult>> {
        debug!("Searching DuckDuckGo: {}", query);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .header("User-Agent", "mcp-tools/0.1")
            .send()
            .await
            .map_err(|e| McpError::Backend(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(McpError::Backend(format!(
                "Search API returned status: {}",
                status
            )));
        }

        let ddg_response: DdgResponse = response
            .json()
            .await
            .map_err(|e| McpError::Backend(format!("Failed to parse response: {}", e)))?;

        Ok(Self::collect_results(ddg_response, max_results))
    }
}

/// Renders search hits as the plain-text block returned by the search tool.
///
/// One `- title: url — snippet` line per hit; "No results found." when the
/// list is empty.
pub fn format_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "No results found.".to_string();
    }

    results
        .iter()
        .map(|r| match &r.url {
            Some(url) => format!("- {}: {} — {}", r.title, url, r.snippet),
            None => format!("- {} — {}", r.title, r.snippet),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
