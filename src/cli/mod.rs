//! CLI module for Svar.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Svar - Benchmark Agent Harness
///
/// Runs a tool-calling LLM agent over a benchmark question set and submits
/// the answers for scoring. The name "Svar" comes from the Norwegian word
/// for "answer."
#[derive(Parser, Debug)]
#[command(name = "svar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the question set, run the agent, and submit the answers
    Run {
        /// Run the agent but skip submitting the answers
        #[arg(long)]
        no_submit: bool,

        /// Only process the first N questions
        #[arg(short, long)]
        limit: Option<usize>,

        /// LLM provider to use (groq, openai)
        #[arg(short, long)]
        provider: Option<String>,

        /// Model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Fetch and list the benchmark questions
    Questions,

    /// Run the agent on a single ad-hoc question
    Ask {
        /// The question to answer
        question: String,

        /// LLM provider to use (groq, openai)
        #[arg(short, long)]
        provider: Option<String>,

        /// Model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
