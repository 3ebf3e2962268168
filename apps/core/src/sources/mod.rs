//! # Content Sources
//!
//! Fetch plain text from wherever the user points: a web page, a Google Doc,
//! a Notion page or a local file. Every source exposes the same single
//! capability, so real implementations can be swapped without touching the
//! engine.

pub mod file;
pub mod google_docs;
pub mod notion;
pub mod web;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::EngineConfig;
use crate::error::AppError;

pub use file::FileSource;
pub use google_docs::GoogleDocsSource;
pub use notion::NotionSource;
pub use web::WebPageSource;

/// Something that can turn a source identifier (URL, path) into plain text.
#[async_trait]
pub trait ContentSource: Send + Sync + 'static {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether this source knows how to read `source`.
    fn accepts(&self, source: &str) -> bool;

    /// Fetch the text behind `source`.
    async fn fetch_content(&self, source: &str) -> Result<String, AppError>;
}

/// Build the shared HTTP client used by remote sources.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("summarist/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(AppError::from)
}

/// Ordered set of sources; the first one that accepts an identifier reads it.
#[derive(Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<Arc<dyn ContentSource>>,
}

impl SourceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the Notion, Google Docs, web page and file sources, in that order.
    pub fn from_config(config: &EngineConfig) -> Result<Self, AppError> {
        let client = http_client(Duration::from_secs(config.request_timeout_secs))?;
        Ok(Self::new()
            .with_source(NotionSource::new(
                client.clone(),
                config.notion_api_base.clone(),
                config.notion_token.clone(),
            ))
            .with_source(GoogleDocsSource::new(client.clone(), config.google_docs_base.clone()))
            .with_source(WebPageSource::new(client))
            .with_source(FileSource::new()))
    }

    /// Append a source. Earlier sources take precedence.
    pub fn with_source<S: ContentSource>(mut self, source: S) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    /// Names of the registered sources, in priority order.
    pub fn names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Fetch `source` with the first source that accepts it.
    pub async fn fetch(&self, source: &str) -> Result<String, AppError> {
        let handler = self
            .sources
            .iter()
            .find(|s| s.accepts(source))
            .ok_or_else(|| AppError::UnsupportedSource(source.to_string()))?;

        info!("Fetching '{}' with {} source", source, handler.name());
        handler.fetch_content(source).await
    }
}
