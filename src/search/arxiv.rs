//! Academic-paper search via the arXiv Atom API.

use crate::error::{Result, SvarError};

const ARXIV_ENDPOINT: &str = "https://export.arxiv.org/api/query";

/// arXiv search client.
///
/// Returns title/abstract-level detail for matching papers, not full text.
pub struct ArxivClient {
    http: reqwest::Client,
    max_results: usize,
}

/// One paper from an arXiv search.
#[derive(Debug, Clone, PartialEq)]
pub struct ArxivPaper {
    pub id: String,
    pub title: String,
    pub summary: String,
}

impl ArxivClient {
    pub fn new(max_results: usize) -> Self {
        Self {
            http: reqwest::Client::new(),
            max_results,
        }
    }

    /// Search arXiv and return matching papers as formatted text.
    pub async fn search(&self, query: &str) -> Result<String> {
        let search_query = format!("all:{}", query);
        let max_results = self.max_results.to_string();
        let response = self
            .http
            .get(ARXIV_ENDPOINT)
            .query(&[
                ("search_query", search_query.as_str()),
                ("start", "0"),
                ("max_results", max_results.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SvarError::Search(format!(
                "arXiv returned status {}",
                response.status()
            )));
        }

        let atom = response.text().await?;
        let papers = parse_atom_entries(&atom);

        if papers.is_empty() {
            return Ok(format!("No arXiv papers found for '{}'.", query));
        }

        Ok(papers
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{}. {} ({})\n   {}", i + 1, p.title, p.id, p.summary))
            .collect::<Vec<_>>()
            .join("\n\n"))
    }
}

/// Parse `<entry>` elements out of an Atom feed.
///
/// The arXiv feed is simple enough that a tag scan suffices; the crate does
/// not carry an XML parser for this one endpoint.
fn parse_atom_entries(atom: &str) -> Vec<ArxivPaper> {
    let mut papers = Vec::new();
    let mut rest = atom;

    while let Some(start) = rest.find("<entry>") {
        let Some(end) = rest[start..].find("</entry>") else {
            break;
        };
        let entry = &rest[start + "<entry>".len()..start + end];

        let id = extract_tag(entry, "id").unwrap_or_default();
        let title = extract_tag(entry, "title").unwrap_or_default();
        let summary = extract_tag(entry, "summary").unwrap_or_default();

        if !title.is_empty() {
            papers.push(ArxivPaper { id, title, summary });
        }

        rest = &rest[start + end + "</entry>".len()..];
    }

    papers
}

/// Extract the text of the first `<tag>...</tag>` element, whitespace
/// collapsed and basic entities unescaped.
fn extract_tag(entry: &str, tag: &str) -> Option<String> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);

    let start = entry.find(&open)? + open.len();
    let end = entry[start..].find(&close)? + start;

    let text = entry[start..end]
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    Some(unescape(&text))
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_ATOM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query Results</title>
  <entry>
    <id>http://arxiv.org/abs/1706.03762v7</id>
    <title>Attention Is All
      You Need</title>
    <summary>The dominant sequence transduction models are based on
      complex recurrent networks.</summary>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/0805.3415v1</id>
    <title>Q &amp; A</title>
    <summary>Short.</summary>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_atom_entries() {
        let papers = parse_atom_entries(SAMPLE_ATOM);
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0].title, "Attention Is All You Need");
        assert_eq!(papers[0].id, "http://arxiv.org/abs/1706.03762v7");
        assert!(papers[0].summary.starts_with("The dominant sequence"));
        assert_eq!(papers[1].title, "Q & A");
    }

    #[test]
    fn test_parse_empty_feed() {
        let atom = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>Empty</title></feed>"#;
        assert!(parse_atom_entries(atom).is_empty());
    }

    #[test]
    fn test_extract_tag_collapses_whitespace() {
        let entry = "<title>Line\n  one  two</title>";
        assert_eq!(extract_tag(entry, "title").unwrap(), "Line one two");
    }
}
