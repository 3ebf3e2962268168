//! Summary providers.
//!
//! An external AI service can stand in front of the local extractive engine.
//! Whenever it is missing or fails, the extractive summary is used instead.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::engine::{summarize, SummaryLength, SummaryResult};
use crate::error::AppError;

/// Produces a summary for a text.
///
/// Implemented by the local engine and by whatever external AI client the
/// calling application plugs in.
#[async_trait]
pub trait SummaryProvider: Send + Sync + 'static {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Summarize `text` to roughly the requested length.
    async fn summarize(&self, text: &str, length: SummaryLength) -> Result<SummaryResult, AppError>;
}

/// The local extractive summarizer
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractiveProvider;

#[async_trait]
impl SummaryProvider for ExtractiveProvider {
    fn name(&self) -> &'static str {
        "extractive"
    }

    async fn summarize(&self, text: &str, length: SummaryLength) -> Result<SummaryResult, AppError> {
        Ok(summarize(text, length)?)
    }
}

/// Tries an optional primary provider, falling back to the extractive engine.
#[derive(Clone)]
pub struct FallbackSummarizer {
    primary: Option<Arc<dyn SummaryProvider>>,
    fallback: ExtractiveProvider,
}

impl Default for FallbackSummarizer {
    fn default() -> Self {
        Self::local()
    }
}

impl FallbackSummarizer {
    /// Only the local extractive engine.
    pub fn local() -> Self {
        Self {
            primary: None,
            fallback: ExtractiveProvider,
        }
    }

    /// Consult `primary` first.
    pub fn with_primary(primary: Arc<dyn SummaryProvider>) -> Self {
        Self {
            primary: Some(primary),
            fallback: ExtractiveProvider,
        }
    }

    /// Name of the provider tried first.
    pub fn primary_name(&self) -> &'static str {
        self.primary
            .as_ref()
            .map(|p| p.name())
            .unwrap_or_else(|| self.fallback.name())
    }

    /// Summarize with the primary provider, or locally if it is absent or fails.
    ///
    /// Input errors from the local engine (empty text, bad percentage) are
    /// returned as-is; there is nothing further to fall back to.
    pub async fn summarize(&self, text: &str, length: SummaryLength) -> Result<SummaryResult, AppError> {
        if let Some(primary) = &self.primary {
            match primary.summarize(text, length).await {
                Ok(result) => {
                    info!("Summary produced by {} provider", primary.name());
                    return Ok(result);
                }
                Err(e) => {
                    warn!(
                        "{} provider failed ({}), falling back to {}",
                        primary.name(),
                        e,
                        self.fallback.name()
                    );
                }
            }
        }
        self.fallback.summarize(text, length).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GenerationMethod;
    use crate::error::EngineError;

    struct FailingProvider;

    #[async_trait]
    impl SummaryProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn summarize(&self, _text: &str, _length: SummaryLength) -> Result<SummaryResult, AppError> {
            Err(AppError::Provider("service unavailable".to_string()))
        }
    }

    struct CannedProvider;

    #[async_trait]
    impl SummaryProvider for CannedProvider {
        fn name(&self) -> &'static str {
            "canned"
        }

        async fn summarize(&self, text: &str, length: SummaryLength) -> Result<SummaryResult, AppError> {
            Ok(SummaryResult {
                source_text: text.to_string(),
                summary_text: "An external summary.".to_string(),
                length,
                method: GenerationMethod::External,
                source_label: None,
            })
        }
    }

    const TEXT: &str = "Rivers shape valleys over time. Floods deposit rich soil. Farmers settle nearby.";

    #[tokio::test]
    async fn test_local_only() {
        let summarizer = FallbackSummarizer::local();
        let result = summarizer.summarize(TEXT, SummaryLength::Short).await.unwrap();
        assert_eq!(result.method, GenerationMethod::Extractive);
        assert_eq!(summarizer.primary_name(), "extractive");
    }

    #[tokio::test]
    async fn test_primary_used_when_healthy() {
        let summarizer = FallbackSummarizer::with_primary(Arc::new(CannedProvider));
        let result = summarizer.summarize(TEXT, SummaryLength::Short).await.unwrap();
        assert_eq!(result.method, GenerationMethod::External);
        assert_eq!(result.summary_text, "An external summary.");
    }

    #[tokio::test]
    async fn test_falls_back_on_failure() {
        let summarizer = FallbackSummarizer::with_primary(Arc::new(FailingProvider));
        let result = summarizer.summarize(TEXT, SummaryLength::Short).await.unwrap();
        assert_eq!(result.method, GenerationMethod::Extractive);
        assert_eq!(result.sentence_count(), 1);
    }

    #[tokio::test]
    async fn test_engine_errors_surface() {
        let summarizer = FallbackSummarizer::local();
        let result = summarizer.summarize("   ", SummaryLength::Short).await;
        assert!(matches!(result, Err(AppError::Engine(EngineError::EmptyInput))));
    }
}
