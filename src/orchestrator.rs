//! Run loop and submission for a benchmark evaluation.

use crate::agent::{Agent, Answerer, ToolContext};
use crate::benchmark::{
    resolve_attachment, AnswerItem, HttpScoringService, ResultsEntry, ScoreReport, ScoringService,
    Submission,
};
use crate::config::Settings;
use crate::error::Result;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Collected output of one batch run.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Human-readable log, one entry per processed question, in fetch order.
    pub results_log: Vec<ResultsEntry>,
    /// The submission payload, same order.
    pub answers: Vec<AnswerItem>,
}

/// Coordinates the question source, the agent, and the submitter.
pub struct Orchestrator {
    settings: Settings,
    service: Box<dyn ScoringService>,
    answerer: Box<dyn Answerer>,
    cache_dir: PathBuf,
}

impl Orchestrator {
    /// Build the full production pipeline from settings.
    ///
    /// Fails if the configured provider is not supported.
    pub fn new(settings: Settings) -> Result<Self> {
        let service = HttpScoringService::new(&settings.api.base_url);
        let tools = ToolContext::new(&settings);
        let agent = Agent::build(&settings, tools)?;
        let cache_dir = settings.cache_dir();

        Ok(Self {
            settings,
            service: Box::new(service),
            answerer: Box::new(agent),
            cache_dir,
        })
    }

    /// Build an orchestrator from explicit parts. Test seam.
    pub fn with_parts(
        settings: Settings,
        service: Box<dyn ScoringService>,
        answerer: Box<dyn Answerer>,
        cache_dir: PathBuf,
    ) -> Self {
        Self {
            settings,
            service,
            answerer,
            cache_dir,
        }
    }

    /// Run the agent over every fetched question, sequentially, in fetch
    /// order.
    ///
    /// Questions missing a task id or question text are skipped. A failing
    /// agent invocation is recorded as `AGENT ERROR: {message}` and never
    /// aborts the batch.
    pub async fn run_batch(&self, limit: Option<usize>) -> Result<BatchOutcome> {
        let mut questions = self.service.fetch_questions().await?;
        if let Some(limit) = limit {
            questions.truncate(limit);
        }

        info!("Running agent on {} questions", questions.len());
        let mut outcome = BatchOutcome::default();

        for question in &questions {
            let Some(text) = question.question.as_deref() else {
                warn!("Skipping invalid item (missing question): {:?}", question);
                continue;
            };
            let Some(task_id) = question.task_id.as_deref().filter(|t| !t.is_empty()) else {
                warn!("Skipping invalid item (missing task_id): {:?}", question);
                continue;
            };

            let enriched =
                resolve_attachment(self.service.as_ref(), &self.cache_dir, task_id, text).await?;

            let submitted_answer = match self.answerer.answer(task_id, &enriched).await {
                Ok(answer) => answer,
                Err(e) => {
                    error!("Error running agent on task {}: {}", task_id, e);
                    format!("AGENT ERROR: {}", e)
                }
            };

            outcome.answers.push(AnswerItem {
                task_id: task_id.to_string(),
                submitted_answer: submitted_answer.clone(),
            });
            outcome.results_log.push(ResultsEntry {
                task_id: task_id.to_string(),
                question: enriched,
                submitted_answer,
            });
        }

        Ok(outcome)
    }

    /// Submit the collected answers for scoring and return the formatted
    /// status message. Transport failures propagate.
    pub async fn submit(&self, outcome: &BatchOutcome) -> Result<String> {
        let submission = Submission {
            username: self.settings.api.username.clone(),
            agent_code: self.settings.api.agent_code.clone(),
            answers: outcome.answers.clone(),
        };

        info!("Submitting {} answers", submission.answers.len());
        let report = self.service.submit(&submission).await?;
        Ok(format_status(&report))
    }
}

/// Format the score summary returned by the scoring service.
///
/// Missing fields fall back to placeholders rather than failing.
pub fn format_status(report: &ScoreReport) -> String {
    let score = report
        .score
        .map(|s| s.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let correct = report
        .correct_count
        .map(|c| c.to_string())
        .unwrap_or_else(|| "?".to_string());
    let total = report
        .total_attempted
        .map(|t| t.to_string())
        .unwrap_or_else(|| "?".to_string());

    format!(
        "Submission Successful!\nUser: {}\nOverall Score: {}% ({}/{} correct)\nMessage: {}",
        report.username.as_deref().unwrap_or("N/A"),
        score,
        correct,
        total,
        report.message.as_deref().unwrap_or("No message received.")
    )
}

/// Render the results log as a fixed-width text table.
pub fn render_results_table(log: &[ResultsEntry]) -> String {
    const QUESTION_WIDTH: usize = 60;
    const ANSWER_WIDTH: usize = 40;

    let mut out = String::new();
    out.push_str(&format!(
        "{:<36}  {:<QUESTION_WIDTH$}  {:<ANSWER_WIDTH$}\n",
        "Task ID", "Question", "Submitted Answer"
    ));
    out.push_str(&format!(
        "{:-<36}  {:-<QUESTION_WIDTH$}  {:-<ANSWER_WIDTH$}\n",
        "", "", ""
    ));

    for entry in log {
        out.push_str(&format!(
            "{:<36}  {:<QUESTION_WIDTH$}  {:<ANSWER_WIDTH$}\n",
            entry.task_id,
            truncate(&entry.question, QUESTION_WIDTH),
            truncate(&entry.submitted_answer, ANSWER_WIDTH),
        ));
    }

    out
}

fn truncate(s: &str, max_len: usize) -> String {
    let flat = s.replace('\n', " ");
    if flat.chars().count() <= max_len {
        flat
    } else {
        let cut: String = flat.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::{FileFetch, Question};
    use crate::error::SvarError;
    use async_trait::async_trait;

    struct FixtureService {
        questions: Vec<Question>,
    }

    #[async_trait]
    impl ScoringService for FixtureService {
        async fn fetch_questions(&self) -> Result<Vec<Question>> {
            Ok(self.questions.clone())
        }

        async fn fetch_file(&self, _task_id: &str) -> Result<FileFetch> {
            Ok(FileFetch::NotFound)
        }

        async fn submit(&self, _submission: &Submission) -> Result<ScoreReport> {
            Ok(ScoreReport::default())
        }
    }

    /// Answerer that echoes the task id, failing on a designated task.
    struct FixtureAnswerer {
        fail_on: Option<String>,
    }

    #[async_trait]
    impl Answerer for FixtureAnswerer {
        async fn answer(&self, task_id: &str, _question: &str) -> Result<String> {
            if self.fail_on.as_deref() == Some(task_id) {
                return Err(SvarError::Agent("model unavailable".to_string()));
            }
            Ok(format!("answer for {}", task_id))
        }
    }

    fn question(task_id: Option<&str>, text: Option<&str>) -> Question {
        Question {
            task_id: task_id.map(|t| t.to_string()),
            question: text.map(|t| t.to_string()),
        }
    }

    fn orchestrator(questions: Vec<Question>, fail_on: Option<&str>) -> (Orchestrator, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = Orchestrator::with_parts(
            Settings::default(),
            Box::new(FixtureService { questions }),
            Box::new(FixtureAnswerer {
                fail_on: fail_on.map(|s| s.to_string()),
            }),
            dir.path().to_path_buf(),
        );
        (orchestrator, dir)
    }

    #[tokio::test]
    async fn test_one_entry_per_valid_question_in_fetch_order() {
        let (orchestrator, _dir) = orchestrator(
            vec![
                question(Some("t1"), Some("Q1")),
                question(Some("t2"), Some("Q2")),
            ],
            None,
        );

        let outcome = orchestrator.run_batch(None).await.unwrap();
        assert_eq!(outcome.results_log.len(), 2);
        assert_eq!(outcome.answers.len(), 2);
        assert_eq!(outcome.answers[0].task_id, "t1");
        assert_eq!(outcome.answers[1].task_id, "t2");
        assert_eq!(outcome.answers[0].submitted_answer, "answer for t1");
    }

    #[tokio::test]
    async fn test_invalid_questions_are_skipped() {
        let (orchestrator, _dir) = orchestrator(
            vec![
                question(None, Some("no id")),
                question(Some(""), Some("empty id")),
                question(Some("t2"), None),
                question(Some("t3"), Some("Q3")),
            ],
            None,
        );

        let outcome = orchestrator.run_batch(None).await.unwrap();
        assert_eq!(outcome.results_log.len(), 1);
        assert_eq!(outcome.answers.len(), 1);
        assert_eq!(outcome.answers[0].task_id, "t3");
    }

    #[tokio::test]
    async fn test_agent_failure_is_captured_and_batch_continues() {
        let (orchestrator, _dir) = orchestrator(
            vec![
                question(Some("t1"), Some("Q1")),
                question(Some("t2"), Some("Q2")),
            ],
            Some("t1"),
        );

        let outcome = orchestrator.run_batch(None).await.unwrap();
        assert_eq!(outcome.answers.len(), 2);
        assert_eq!(
            outcome.answers[0].submitted_answer,
            "AGENT ERROR: Agent error: model unavailable"
        );
        assert_eq!(outcome.answers[1].submitted_answer, "answer for t2");
        assert_eq!(
            outcome.results_log[0].submitted_answer,
            outcome.answers[0].submitted_answer
        );
    }

    #[tokio::test]
    async fn test_limit_truncates_the_batch() {
        let (orchestrator, _dir) = orchestrator(
            vec![
                question(Some("t1"), Some("Q1")),
                question(Some("t2"), Some("Q2")),
            ],
            None,
        );

        let outcome = orchestrator.run_batch(Some(1)).await.unwrap();
        assert_eq!(outcome.answers.len(), 1);
    }

    #[test]
    fn test_format_status_with_all_fields() {
        let report = ScoreReport {
            username: Some("alice".to_string()),
            score: Some(30.0),
            correct_count: Some(6),
            total_attempted: Some(20),
            message: Some("Well done".to_string()),
        };
        let status = format_status(&report);
        assert!(status.contains("User: alice"));
        assert!(status.contains("Overall Score: 30% (6/20 correct)"));
        assert!(status.contains("Message: Well done"));
    }

    #[test]
    fn test_format_status_defaults_for_missing_fields() {
        let status = format_status(&ScoreReport::default());
        assert!(status.contains("User: N/A"));
        assert!(status.contains("Overall Score: N/A% (?/? correct)"));
        assert!(status.contains("Message: No message received."));
    }

    #[test]
    fn test_render_results_table() {
        let log = vec![ResultsEntry {
            task_id: "t1".to_string(),
            question: "A question\nwith a newline".to_string(),
            submitted_answer: "42".to_string(),
        }];
        let table = render_results_table(&log);
        assert!(table.contains("Task ID"));
        assert!(table.contains("t1"));
        assert!(table.contains("A question with a newline"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer string here", 10), "a longe...");
    }
}
