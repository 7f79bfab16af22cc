//! Questions command implementation.

use crate::benchmark::{HttpScoringService, ScoringService};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Fetch and list the benchmark question set.
pub async fn run_questions(settings: Settings) -> Result<()> {
    let service = HttpScoringService::new(&settings.api.base_url);

    let spinner = Output::spinner("Fetching questions...");
    let questions = match service.fetch_questions().await {
        Ok(questions) => {
            spinner.finish_and_clear();
            questions
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to fetch questions: {}", e));
            return Err(e.into());
        }
    };

    Output::header(&format!("Questions ({})", questions.len()));
    for question in &questions {
        Output::question_item(
            question.task_id.as_deref().unwrap_or("<no task id>"),
            question.question.as_deref().unwrap_or("<no question text>"),
        );
    }

    Ok(())
}
