//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;

/// Show configuration or its file path.
pub fn run_config(action: &ConfigAction, settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let content = toml::to_string_pretty(&settings)?;
            Output::header("Current configuration");
            println!("{}", content);

            Output::header("Credentials (from environment)");
            Output::kv(
                "OPENAI_API_KEY",
                if settings.credentials.openai_api_key.is_some() { "set" } else { "not set" },
            );
            Output::kv(
                "GROQ_API_KEY",
                if settings.credentials.groq_api_key.is_some() { "set" } else { "not set" },
            );
            Output::kv(
                "TAVILY_API_KEY",
                if settings.credentials.tavily_api_key.is_some() { "set" } else { "not set" },
            );
        }
        ConfigAction::Path => {
            println!("{}", Settings::default_config_path().display());
        }
    }

    Ok(())
}
