//! General web search via the Tavily API.

use crate::error::{Result, SvarError};
use serde::Deserialize;

const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

/// Web search client backed by Tavily.
pub struct WebSearchClient {
    http: reqwest::Client,
    api_key: String,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    title: String,
    url: String,
    content: String,
}

impl WebSearchClient {
    pub fn new(api_key: String, max_results: usize) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            max_results,
        }
    }

    /// Search the web and return ranked result snippets as formatted text.
    pub async fn search(&self, query: &str) -> Result<String> {
        let body = serde_json::json!({
            "api_key": self.api_key,
            "query": query,
            "max_results": self.max_results,
        });

        let response = self.http.post(TAVILY_ENDPOINT).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(SvarError::Search(format!(
                "Tavily returned status {}",
                response.status()
            )));
        }

        let parsed: TavilyResponse = response.json().await?;
        Ok(format_results(&parsed.results))
    }
}

fn format_results(results: &[TavilyResult]) -> String {
    if results.is_empty() {
        return "No web results found.".to_string();
    }

    results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {} ({})\n   {}", i + 1, r.title, r.url, r.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}
