//! Encyclopedia lookup via the MediaWiki API.

use crate::error::{Result, SvarError};
use serde_json::Value;

const WIKIPEDIA_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

/// Wikipedia lookup client.
///
/// Returns the plain-text body of the single best-matching article.
pub struct WikipediaClient {
    http: reqwest::Client,
}

impl WikipediaClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Look up the best-matching article for a query and return its extract.
    pub async fn search(&self, query: &str) -> Result<String> {
        let response = self
            .http
            .get(WIKIPEDIA_ENDPOINT)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("generator", "search"),
                ("gsrsearch", query),
                ("gsrlimit", "1"),
                ("prop", "extracts"),
                ("explaintext", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SvarError::Search(format!(
                "Wikipedia returned status {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        Ok(extract_article(&body)
            .unwrap_or_else(|| format!("No Wikipedia article found for '{}'.", query)))
    }
}

impl Default for WikipediaClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the title and extract out of a MediaWiki query response.
fn extract_article(body: &Value) -> Option<String> {
    let pages = body["query"]["pages"].as_object()?;
    let page = pages.values().next()?;
    let title = page["title"].as_str()?;
    let extract = page["extract"].as_str()?;
    Some(format!("{}\n\n{}", title, extract))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_article() {
        let body = serde_json::json!({
            "query": {
                "pages": {
                    "12345": {
                        "pageid": 12345,
                        "title": "Rust (programming language)",
                        "extract": "Rust is a systems programming language."
                    }
                }
            }
        });
        let text = extract_article(&body).unwrap();
        assert!(text.starts_with("Rust (programming language)"));
        assert!(text.contains("systems programming language"));
    }

    #[test]
    fn test_extract_article_no_results() {
        let body = serde_json::json!({"batchcomplete": ""});
        assert_eq!(extract_article(&body), None);
    }
}
