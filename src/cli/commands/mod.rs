//! CLI command implementations.

mod ask;
mod config;
mod questions;
mod run;

pub use ask::run_ask;
pub use config::run_config;
pub use questions::run_questions;
pub use run::run_run;
