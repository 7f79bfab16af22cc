//! OpenAI-compatible client configuration with sensible defaults.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for chat API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Groq exposes an OpenAI-compatible API at this base.
pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Create a client for the given OpenAI-compatible endpoint.
///
/// Uses a 5-minute timeout by default to prevent hung API calls.
pub fn create_client(api_base: Option<&str>, api_key: Option<&str>) -> Client<OpenAIConfig> {
    create_client_with_timeout(api_base, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create a client with a custom timeout.
pub fn create_client_with_timeout(
    api_base: Option<&str>,
    api_key: Option<&str>,
    timeout: Duration,
) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client");

    let mut config = OpenAIConfig::default();
    if let Some(base) = api_base {
        config = config.with_api_base(base);
    }
    if let Some(key) = api_key {
        config = config.with_api_key(key);
    }

    Client::with_config(config).with_http_client(http_client)
}
