//! Scoring service client and benchmark data types.
//!
//! The remote service provides the question set, per-task attachment files,
//! and answer scoring. It is abstracted behind the [`ScoringService`] trait
//! so the run loop can be tested against a local fixture.

mod attachments;
mod http;

pub use attachments::resolve_attachment;
pub use http::HttpScoringService;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One benchmark item as returned by the question endpoint.
///
/// Either field may be missing or null in the wire data; such items are
/// skipped by the run loop.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
}

/// One answer in the submission payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnswerItem {
    pub task_id: String,
    pub submitted_answer: String,
}

/// The batch submission body.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_code: Option<String>,
    pub answers: Vec<AnswerItem>,
}

/// Score summary returned by the submit endpoint.
///
/// All fields are optional; formatting falls back to placeholders.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreReport {
    pub username: Option<String>,
    pub score: Option<f64>,
    pub correct_count: Option<u64>,
    pub total_attempted: Option<u64>,
    pub message: Option<String>,
}

/// One row of the human-readable results log.
#[derive(Debug, Clone)]
pub struct ResultsEntry {
    pub task_id: String,
    /// Question text after attachment resolution.
    pub question: String,
    pub submitted_answer: String,
}

/// Outcome of a file lookup for a task.
#[derive(Debug, Clone)]
pub enum FileFetch {
    /// The task has an attachment.
    Found {
        /// Filename from the content-disposition header, when present.
        filename: Option<String>,
        bytes: Vec<u8>,
    },
    /// The task has no attachment (HTTP 404).
    NotFound,
}

/// Narrow interface over the remote scoring service.
#[async_trait]
pub trait ScoringService: Send + Sync {
    /// Fetch the ordered question set. Transport and decode errors propagate.
    async fn fetch_questions(&self) -> Result<Vec<Question>>;

    /// Look up the attachment for a task.
    async fn fetch_file(&self, task_id: &str) -> Result<FileFetch>;

    /// Submit the answer batch for scoring. Transport errors propagate.
    async fn submit(&self, submission: &Submission) -> Result<ScoreReport>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_tolerates_missing_fields() {
        let q: Question = serde_json::from_str(r#"{"question": "What?"}"#).unwrap();
        assert!(q.task_id.is_none());
        assert_eq!(q.question.as_deref(), Some("What?"));

        let q: Question = serde_json::from_str(r#"{"task_id": "t1", "question": null}"#).unwrap();
        assert_eq!(q.task_id.as_deref(), Some("t1"));
        assert!(q.question.is_none());
    }

    #[test]
    fn test_question_tolerates_null_task_id() {
        // A single null task_id must not break decoding the whole array.
        let questions: Vec<Question> = serde_json::from_str(
            r#"[{"task_id": null, "question": "What?"}, {"task_id": "t2", "question": "Why?"}]"#,
        )
        .unwrap();
        assert_eq!(questions.len(), 2);
        assert!(questions[0].task_id.is_none());
        assert_eq!(questions[1].task_id.as_deref(), Some("t2"));
    }

    #[test]
    fn test_submission_omits_absent_identity_fields() {
        let submission = Submission {
            username: None,
            agent_code: None,
            answers: vec![AnswerItem {
                task_id: "t1".to_string(),
                submitted_answer: "42".to_string(),
            }],
        };
        let json = serde_json::to_string(&submission).unwrap();
        assert!(!json.contains("username"));
        assert!(!json.contains("agent_code"));
        assert!(json.contains("\"submitted_answer\":\"42\""));
    }

    #[test]
    fn test_score_report_tolerates_sparse_response() {
        let report: ScoreReport = serde_json::from_str(r#"{"username": "alice"}"#).unwrap();
        assert_eq!(report.username.as_deref(), Some("alice"));
        assert!(report.score.is_none());
        assert!(report.message.is_none());
    }
}
