//! End-to-end tests for the search server, using a stub backend so no
//! network access is needed.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mcp_tools::mcp::client::ToolClient;
use mcp_tools::mcp::server::ToolServer;
use mcp_tools::query::BOOST_TERMS;
use mcp_tools::search::{SearchBackend, SearchResult};
use mcp_tools::servers::search;
use mcp_tools::McpResult;
use serde_json::json;
use tokio::net::TcpListener;

/// Stub backend that records the queries it receives.
struct StubBackend {
    queries: Mutex<Vec<String>>,
    results: Vec<SearchResult>,
}

#[async_trait]
impl SearchBackend for StubBackend {
    async fn search(&self, query: &str, _max_results: usize) -> McpResult<Vec<SearchResult>> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.results.clone())
    }
}

async fn start_server(backend: Arc<StubBackend>) -> String {
    let handler = search::build_handler(backend, 5).await.unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = ToolServer::new("search-test", handler);
    tokio::spawn(async move { server.serve_on(listener).await });

    format!("http://{}", addr)
}

fn stub_with_results(results: Vec<SearchResult>) -> Arc<StubBackend> {
    Arc::new(StubBackend {
        queries: Mutex::new(Vec::new()),
        results,
    })
}

#[tokio::test]
async fn test_free_text_query_round_trip() {
    let backend = stub_with_results(vec![SearchResult {
        title: "Rust".to_string(),
        url: Some("https://rust-lang.org".to_string()),
        snippet: "A systems language".to_string(),
    }]);
    let url = start_server(backend.clone()).await;
    let client = ToolClient::new(&url).unwrap();

    let result = client
        .call_tool("duckduckgo_search", json!({ "query": "rust language" }))
        .await
        .unwrap();

    assert!(!result.is_error);
    assert!(result.first_text().unwrap().contains("https://rust-lang.org"));
    assert_eq!(backend.queries.lock().unwrap().as_slice(), ["rust language"]);
}

#[tokio::test]
async fn test_structured_query_is_canonicalized_and_boosted() {
    let backend = stub_with_results(Vec::new());
    let url = start_server(backend.clone()).await;
    let client = ToolClient::new(&url).unwrap();

    client
        .call_tool(
            "duckduckgo_search",
            json!({ "query": { "categoria": "linguagem", "artefato": "Java 8" } }),
        )
        .await
        .unwrap();

    let queries = backend.queries.lock().unwrap();
    assert_eq!(
        queries[0],
        format!("Linguagem de Programação Java 8 {}", BOOST_TERMS)
    );
}

#[tokio::test]
async fn test_string_encoded_query_is_parsed() {
    let backend = stub_with_results(Vec::new());
    let url = start_server(backend.clone()).await;
    let client = ToolClient::new(&url).unwrap();

    let encoded = "{\"categoria\": \"Linguagem de Programa\\u00e7\\u00e3o\", \"artefato\": \"Java 8\"}";
    client
        .call_tool("duckduckgo_search", json!({ "query": encoded }))
        .await
        .unwrap();

    let queries = backend.queries.lock().unwrap();
    assert!(queries[0].contains("Linguagem de Programação"));
    assert!(queries[0].contains("Java 8"));
    assert!(queries[0].ends_with(BOOST_TERMS));
}

#[tokio::test]
async fn test_empty_results_yield_placeholder_text() {
    let backend = stub_with_results(Vec::new());
    let url = start_server(backend).await;
    let client = ToolClient::new(&url).unwrap();

    let result = client
        .call_tool("duckduckgo_search", json!({ "query": "anything" }))
        .await
        .unwrap();

    assert_eq!(result.first_text(), Some("No results found."));
}
