//! Configuration management for Svar.

mod settings;

pub use settings::{AgentSettings, ApiSettings, Credentials, GeneralSettings, SearchSettings, Settings};
