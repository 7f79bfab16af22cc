//! Tool definitions and implementations for the agent system.

use crate::config::Settings;
use crate::error::{Result, SvarError};
use crate::search::{ArxivClient, WebSearchClient, WikipediaClient};
use crate::video::VideoInfoExtractor;
use serde::{Deserialize, Serialize};

/// Available tools for the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// Search Wikipedia for a best-matching article.
    WikipediaSearch { query: String },

    /// Extract transcript and metadata from a YouTube video URL.
    YoutubeSearch { query: String },

    /// Search arXiv for papers.
    ArxivSearch { query: String },

    /// Search the web for ranked result snippets.
    WebSearch { query: String },
}

/// Tool execution context owning the search clients and video extractor.
pub struct ToolContext {
    wikipedia: WikipediaClient,
    arxiv: ArxivClient,
    web: Option<WebSearchClient>,
    video: VideoInfoExtractor,
}

impl ToolContext {
    /// Build the tool context from settings.
    pub fn new(settings: &Settings) -> Self {
        let web = settings
            .credentials
            .tavily_api_key
            .clone()
            .map(|key| WebSearchClient::new(key, settings.search.web_max_results));

        if web.is_none() {
            tracing::warn!("TAVILY_API_KEY not set; web search tool will be unavailable");
        }

        Self {
            wikipedia: WikipediaClient::new(),
            arxiv: ArxivClient::new(settings.search.arxiv_max_results),
            web,
            video: VideoInfoExtractor::new(),
        }
    }

    /// Execute a tool call and return the result as a string.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::WikipediaSearch { query } => self.wikipedia.search(query).await,
            ToolCall::YoutubeSearch { query } => self.execute_youtube(query).await,
            ToolCall::ArxivSearch { query } => self.arxiv.search(query).await,
            ToolCall::WebSearch { query } => match &self.web {
                Some(client) => client.search(query).await,
                None => Ok("Web search is not configured (missing API key).".to_string()),
            },
        }
    }

    async fn execute_youtube(&self, query: &str) -> Result<String> {
        // Transcripts are often missing. That is a null result for the
        // agent to reason about, not an error.
        match self.video.fetch_context(query).await? {
            Some(context) => Ok(context),
            None => Ok(
                "No transcript is available for this video; no answer can be derived from it."
                    .to_string(),
            ),
        }
    }
}

/// Get OpenAI function/tool definitions for the agent.
///
/// The descriptions drive the model's tool selection and are part of each
/// adapter's contract.
pub fn tool_definitions() -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    let query_only = |description: &str| {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": description
                }
            },
            "required": ["query"]
        })
    };

    vec![
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "wikipedia_search".to_string(),
                description: Some(
                    "Search Wikipedia and return the best-matching article's text. \
                    Use this for encyclopedic facts about people, places, events, and concepts."
                        .to_string(),
                ),
                parameters: Some(query_only("The topic to look up")),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "youtube_search".to_string(),
                description: Some(
                    "Extract the transcript and metadata of a YouTube video. \
                    Use this when the question contains a YouTube URL."
                        .to_string(),
                ),
                parameters: Some(query_only("The YouTube video URL")),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "arxiv_search".to_string(),
                description: Some(
                    "Search arXiv for academic papers and return titles and abstracts. \
                    Use this for questions about scientific publications and research."
                        .to_string(),
                ),
                parameters: Some(query_only("The paper topic or keywords")),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "web_search".to_string(),
                description: Some(
                    "Search the web and return ranked result snippets. \
                    Use this for current events or anything the other tools don't cover."
                        .to_string(),
                ),
                parameters: Some(query_only("The search query")),
                strict: None,
            },
        },
    ]
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: serde_json::Value = serde_json::from_str(arguments)
        .map_err(|e| SvarError::Agent(format!("Invalid tool arguments: {}", e)))?;

    let query = args["query"]
        .as_str()
        .ok_or_else(|| SvarError::Agent("Missing 'query' argument".to_string()))?
        .to_string();

    match name {
        "wikipedia_search" => Ok(ToolCall::WikipediaSearch { query }),
        "youtube_search" => Ok(ToolCall::YoutubeSearch { query }),
        "arxiv_search" => Ok(ToolCall::ArxivSearch { query }),
        "web_search" => Ok(ToolCall::WebSearch { query }),
        _ => Err(SvarError::Agent(format!("Unknown tool: {}", name))),
    }
}
