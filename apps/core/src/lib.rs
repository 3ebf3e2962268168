//! Summarist core library.
//!
//! "The Engine" - local summarization and text analytics, plus the thin
//! service layer (sources, providers, history) that calling code wires to it.

pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod providers;
pub mod service;
pub mod sources;
pub mod telemetry;
pub mod text_extract;

#[cfg(test)]
mod tests;

pub use config::EngineConfig;
pub use error::{AppError, EngineError};
pub use service::SummaryService;
