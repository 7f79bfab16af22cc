//! Search clients used as agent tools.
//!
//! Each client wraps one external information source behind a
//! "free-text query in, formatted text out" contract.

mod arxiv;
mod web;
mod wikipedia;

pub use arxiv::ArxivClient;
pub use web::WebSearchClient;
pub use wikipedia::WikipediaClient;
