use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;
use validator::Validate;

use crate::engine::SummaryLength;
use crate::error::AppError;

const DEFAULT_HISTORY_PATH: &str = "data/history.json";
const DEFAULT_NOTION_API_BASE: &str = "https://api.notion.com";
const DEFAULT_GOOGLE_DOCS_BASE: &str = "https://docs.google.com";

/// Runtime configuration for the summarization service.
///
/// Passed explicitly into `SummaryService`; the engine functions themselves
/// never read configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EngineConfig {
    /// Inputs shorter than this (after trimming) are rejected.
    #[validate(range(min = 1))]
    pub min_input_chars: usize,
    /// Inputs longer than this are rejected.
    #[validate(range(min = 1, max = 10_000_000))]
    pub max_input_chars: usize,
    /// Length used when the caller does not ask for one.
    pub default_length: SummaryLength,
    /// Key for an external AI summary provider. The local engine is used when absent.
    #[validate(length(min = 1))]
    pub api_key: Option<String>,
    /// Integration token for reading Notion pages.
    #[validate(length(min = 1))]
    pub notion_token: Option<String>,
    /// Where the summary history is persisted.
    pub history_path: PathBuf,
    /// Maximum number of summaries kept in history.
    #[validate(range(min = 1, max = 1000))]
    pub history_limit: usize,
    /// Timeout for remote content fetches.
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_secs: u64,
    /// Base URL of the Notion API.
    #[validate(url)]
    pub notion_api_base: String,
    /// Base URL of Google Docs.
    #[validate(url)]
    pub google_docs_base: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_input_chars: 50,
            max_input_chars: 100_000,
            default_length: SummaryLength::Medium,
            api_key: None,
            notion_token: None,
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
            history_limit: 50,
            request_timeout_secs: 30,
            notion_api_base: DEFAULT_NOTION_API_BASE.to_string(),
            google_docs_base: DEFAULT_GOOGLE_DOCS_BASE.to_string(),
        }
    }
}

/// Read and parse an optional environment variable.
fn env_parse<T>(name: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| AppError::Config(format!("{} is invalid: {}", name, e))),
        Err(_) => Ok(None),
    }
}

fn env_string(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse a length setting: `short`, `medium`, `long`, or a bare percentage such as `40`.
pub fn parse_length(raw: &str) -> Result<SummaryLength, AppError> {
    let raw = raw.trim().trim_end_matches('%');
    let length = match raw.parse::<u32>() {
        Ok(percent) => SummaryLength::from_parts("percentage", Some(percent))?,
        Err(_) => SummaryLength::from_parts(raw, None)?,
    };
    Ok(length)
}

impl EngineConfig {
    /// Load configuration from `SUMMARIST_*` environment variables (and `.env`),
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, AppError> {
        if dotenv::dotenv().is_ok() {
            info!("Loaded environment from .env");
        }

        let defaults = Self::default();
        let default_length = match env_string("SUMMARIST_DEFAULT_LENGTH") {
            Some(raw) => parse_length(&raw)?,
            None => defaults.default_length,
        };

        let config = Self {
            min_input_chars: env_parse("SUMMARIST_MIN_INPUT_CHARS")?
                .unwrap_or(defaults.min_input_chars),
            max_input_chars: env_parse("SUMMARIST_MAX_INPUT_CHARS")?
                .unwrap_or(defaults.max_input_chars),
            default_length,
            api_key: env_string("SUMMARIST_API_KEY"),
            notion_token: env_string("SUMMARIST_NOTION_TOKEN"),
            history_path: env_string("SUMMARIST_HISTORY_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.history_path),
            history_limit: env_parse("SUMMARIST_HISTORY_LIMIT")?.unwrap_or(defaults.history_limit),
            request_timeout_secs: env_parse("SUMMARIST_REQUEST_TIMEOUT_SECS")?
                .unwrap_or(defaults.request_timeout_secs),
            notion_api_base: env_string("SUMMARIST_NOTION_API_BASE")
                .unwrap_or(defaults.notion_api_base),
            google_docs_base: env_string("SUMMARIST_GOOGLE_DOCS_BASE")
                .unwrap_or(defaults.google_docs_base),
        };

        config.check()?;
        Ok(config)
    }

    /// Validate field ranges and the relation between the input bounds.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        self.default_length.validate()?;
        if self.min_input_chars > self.max_input_chars {
            return Err(AppError::Config(format!(
                "min_input_chars ({}) exceeds max_input_chars ({})",
                self.min_input_chars, self.max_input_chars
            )));
        }
        Ok(())
    }
}
