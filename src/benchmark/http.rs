//! HTTP implementation of the scoring service client.

use super::{FileFetch, Question, ScoreReport, ScoringService, Submission};
use crate::error::Result;
use async_trait::async_trait;
use regex::Regex;
use reqwest::StatusCode;
use std::time::Duration;

/// Connect/read timeout for attachment downloads.
const FILE_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed client for the remote scoring service.
pub struct HttpScoringService {
    http: reqwest::Client,
    base_url: String,
    filename_regex: Regex,
}

impl HttpScoringService {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            filename_regex: Regex::new(r#"filename="([^"]+)""#).expect("Invalid regex"),
        }
    }
}

#[async_trait]
impl ScoringService for HttpScoringService {
    async fn fetch_questions(&self) -> Result<Vec<Question>> {
        let url = format!("{}/questions", self.base_url);
        let questions = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(questions)
    }

    async fn fetch_file(&self, task_id: &str) -> Result<FileFetch> {
        let url = format!("{}/files/{}", self.base_url, task_id);
        let response = self.http.get(&url).timeout(FILE_TIMEOUT).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(FileFetch::NotFound);
        }
        let response = response.error_for_status()?;

        let filename = response
            .headers()
            .get("content-disposition")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| self.filename_regex.captures(v))
            .map(|caps| caps[1].to_string());

        let bytes = response.bytes().await?.to_vec();
        Ok(FileFetch::Found { filename, bytes })
    }

    async fn submit(&self, submission: &Submission) -> Result<ScoreReport> {
        let url = format!("{}/submit", self.base_url);
        let report = self
            .http
            .post(&url)
            .json(submission)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(report)
    }
}
