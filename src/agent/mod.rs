//! Agent system for tool-augmented question answering.
//!
//! Provides an LLM agent that can search the web, Wikipedia, and arXiv, and
//! extract YouTube transcripts, to answer benchmark questions.

mod runner;
mod tools;

pub use runner::{Agent, Answerer, Provider};
pub use tools::{parse_tool_call, tool_definitions, ToolCall, ToolContext};
