//! Ask command implementation: a one-off agent invocation.

use crate::agent::{Agent, Answerer, ToolContext};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the agent on a single ad-hoc question.
pub async fn run_ask(
    question: &str,
    provider: Option<String>,
    model: Option<String>,
    mut settings: Settings,
) -> Result<()> {
    if let Some(provider) = provider {
        settings.agent.provider = provider;
    }
    if let Some(model) = model {
        settings.agent.model = model;
    }

    let tools = ToolContext::new(&settings);
    let agent = Agent::build(&settings, tools)?;

    let spinner = Output::spinner("Agent working...");
    match agent.answer("adhoc", question).await {
        Ok(answer) => {
            spinner.finish_and_clear();
            println!("\n{}\n", answer);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Agent failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
