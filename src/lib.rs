//! Svar - Benchmark Agent Harness
//!
//! A CLI tool that runs a tool-calling LLM agent over a benchmark question
//! set and submits the answers to a remote scoring service.
//!
//! The name "Svar" comes from the Norwegian word for "answer."
//!
//! # Overview
//!
//! Svar allows you to:
//! - Fetch a benchmark question set (with optional attached files)
//! - Answer each question with an agent that can search the web, Wikipedia,
//!   arXiv, and YouTube transcripts
//! - Submit the collected answers for scoring and view the results
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `agent` - LLM agent with tool calling
//! - `search` - Web, Wikipedia, and arXiv search clients
//! - `video` - YouTube transcript and metadata extraction
//! - `benchmark` - Scoring service client and attachment cache
//! - `orchestrator` - Run loop and submission
//!
//! # Example
//!
//! ```rust,no_run
//! use svar::config::Settings;
//! use svar::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let outcome = orchestrator.run_batch(None).await?;
//!     println!("Answered {} questions", outcome.answers.len());
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod benchmark;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod search;
pub mod video;

pub use error::{Result, SvarError};
