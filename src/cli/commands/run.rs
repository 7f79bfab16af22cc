//! Run command implementation: the full fetch -> answer -> submit flow.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{render_results_table, Orchestrator};
use anyhow::Result;

/// Run the agent over the whole question set and submit the answers.
pub async fn run_run(
    no_submit: bool,
    limit: Option<usize>,
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

    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Running agent on the question set...");
    let outcome = match orchestrator.run_batch(limit).await {
        Ok(outcome) => {
            spinner.finish_and_clear();
            outcome
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Batch run failed: {}", e));
            return Err(e.into());
        }
    };

    Output::header("Results");
    print!("{}", render_results_table(&outcome.results_log));

    if outcome.answers.is_empty() {
        Output::warning("No answers collected; nothing to submit.");
        return Ok(());
    }

    if no_submit {
        Output::info(&format!(
            "Collected {} answers (submission skipped).",
            outcome.answers.len()
        ));
        return Ok(());
    }

    let spinner = Output::spinner("Submitting answers...");
    match orchestrator.submit(&outcome).await {
        Ok(status) => {
            spinner.finish_and_clear();
            Output::success("Submission successful.");
            println!("\n{}\n", status);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Submission failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
