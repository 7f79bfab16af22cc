//! Configuration settings for Svar.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub api: ApiSettings,
    pub agent: AgentSettings,
    pub search: SearchSettings,

    /// Environment-sourced credentials, loaded once at startup.
    #[serde(skip)]
    pub credentials: Credentials,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for cached attachment files. Defaults to a subfolder of the
    /// system temp directory.
    pub cache_dir: Option<String>,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            cache_dir: None,
            log_level: "info".to_string(),
        }
    }
}

/// Scoring service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the scoring service.
    pub base_url: String,
    /// Username reported with submissions.
    pub username: Option<String>,
    /// Link to the agent code, reported with submissions.
    pub agent_code: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://agents-course-unit4-scoring.hf.space".to_string(),
            username: None,
            agent_code: None,
        }
    }
}

/// Agent backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// LLM provider (groq, openai).
    pub provider: String,
    /// Model to use for the agent.
    pub model: String,
    /// Maximum tool-calling iterations per question.
    pub max_iterations: usize,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            model: "qwen/qwen3-32b".to_string(),
            max_iterations: 15,
        }
    }
}

/// Search tool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum web search results to return to the agent.
    pub web_max_results: usize,
    /// Maximum arXiv papers to return to the agent.
    pub arxiv_max_results: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            web_max_results: 5,
            arxiv_max_results: 5,
        }
    }
}

/// API keys sourced from the process environment.
///
/// Loaded once at startup so the rest of the library never reads the
/// environment directly.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub tavily_api_key: Option<String>,
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> Self {
        Self {
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            groq_api_key: std::env::var("GROQ_API_KEY").ok(),
            tavily_api_key: std::env::var("TAVILY_API_KEY").ok(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    ///
    /// A missing default file falls back to defaults; a missing explicit
    /// path is an error.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(crate::error::SvarError::Config(format!(
                        "Configuration file not found: {}",
                        p.display()
                    )));
                }
                p.clone()
            }
            None => Self::default_config_path(),
        };

        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str::<Settings>(&content)?
        } else {
            Settings::default()
        };

        settings.credentials = Credentials::from_env();
        Ok(settings)
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("svar")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Directory where attachment files are cached.
    pub fn cache_dir(&self) -> PathBuf {
        match &self.general.cache_dir {
            Some(dir) => Self::expand_path(dir),
            None => std::env::temp_dir().join("svar_cached_files"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.agent.provider, "groq");
        assert_eq!(settings.agent.max_iterations, 15);
        assert!(settings.api.base_url.starts_with("https://"));
    }

    #[test]
    fn test_cache_dir_default_is_under_temp() {
        let settings = Settings::default();
        assert!(settings.cache_dir().starts_with(std::env::temp_dir()));
        assert!(settings.cache_dir().ends_with("svar_cached_files"));
    }

    #[test]
    fn test_load_from_missing_explicit_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let result = Settings::load_from(Some(&missing));
        assert!(matches!(
            result,
            Err(crate::error::SvarError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[agent]\nprovider = \"openai\"\n").unwrap();

        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.agent.provider, "openai");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [agent]
            provider = "openai"
            "#,
        )
        .unwrap();
        assert_eq!(settings.agent.provider, "openai");
        assert_eq!(settings.agent.model, "qwen/qwen3-32b");
        assert_eq!(settings.search.web_max_results, 5);
    }
}
