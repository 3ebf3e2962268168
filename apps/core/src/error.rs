use std::io;
use thiserror::Error;

/// Errors raised by the strict engine components (summarizer and analyzer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The input was empty or contained only whitespace.
    #[error("Input text is empty")]
    EmptyInput,

    /// A length parameter was outside its accepted range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The input produced no extractable sentences.
    #[error("Text contains no extractable sentences")]
    NoContent,
}

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents errors returned by the summarization engine itself.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents data validation errors (e.g., input outside accepted bounds).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents failures while fetching remote content.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Represents a source identifier that no content source can handle.
    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),

    /// Represents an external summary provider that failed to answer.
    #[error("Provider error: {0}")]
    Provider(String),
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Engine(e) => AppError::Engine(e.clone()),
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Fetch(s) => AppError::Fetch(s.clone()),
            AppError::UnsupportedSource(s) => AppError::UnsupportedSource(s.clone()),
            AppError::Provider(s) => AppError::Provider(s.clone()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Validation(format!("URL parse error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Config(format!("Validation errors: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Fetch(format!("HTTP error: {}", err))
    }
}
