use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::config::EngineConfig;
use crate::engine::{
    self, AnalysisResult, FlashCard, SummaryLength, SummaryResult,
};
use crate::error::AppError;
use crate::history::{HistoryStore, SummaryRecord};
use crate::providers::{FallbackSummarizer, SummaryProvider};
use crate::sources::SourceRegistry;

/// Facade used by calling code (CLI, UI bindings).
///
/// Owns the configuration, the content sources, the summarizer chain and the
/// history store. Input bounds are enforced here, not in the engine.
pub struct SummaryService {
    config: EngineConfig,
    sources: SourceRegistry,
    summarizer: FallbackSummarizer,
    history: HistoryStore,
}

impl SummaryService {
    /// Build a service with the default sources and the local summarizer.
    pub fn new(config: EngineConfig) -> Result<Self, AppError> {
        config.check()?;
        let sources = SourceRegistry::from_config(&config)?;
        Ok(Self::with_sources(config, sources))
    }

    /// Build a service with an explicit source registry.
    pub fn with_sources(config: EngineConfig, sources: SourceRegistry) -> Self {
        let history = HistoryStore::new(config.history_path.clone(), config.history_limit);
        Self {
            config,
            sources,
            summarizer: FallbackSummarizer::local(),
            history,
        }
    }

    /// Put an external provider in front of the local summarizer.
    ///
    /// Ignored unless an API key is configured or stored in history.
    pub fn with_external_provider(mut self, provider: Arc<dyn SummaryProvider>) -> Self {
        if self.api_key().is_some() {
            info!("Using {} provider with local fallback", provider.name());
            self.summarizer = FallbackSummarizer::with_primary(provider);
        } else {
            warn!("No API key configured; {} provider disabled", provider.name());
        }
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// API key from configuration, else the one stored with the history.
    pub fn api_key(&self) -> Option<String> {
        self.config.api_key.clone().or_else(|| self.history.api_key())
    }

    /// Name of the provider consulted first.
    pub fn provider_name(&self) -> &'static str {
        self.summarizer.primary_name()
    }

    /// Reject input outside the configured character bounds.
    pub fn guard_input(&self, text: &str) -> Result<(), AppError> {
        let len = text.trim().chars().count();
        if len < self.config.min_input_chars {
            return Err(AppError::Validation(format!(
                "Text is too short to summarize ({} characters, minimum {})",
                len, self.config.min_input_chars
            )));
        }
        if len > self.config.max_input_chars {
            return Err(AppError::Validation(format!(
                "Text is too long to summarize ({} characters, maximum {})",
                len, self.config.max_input_chars
            )));
        }
        Ok(())
    }

    /// Fetch text from a URL, Google Doc, Notion page or file.
    #[instrument(skip(self))]
    pub async fn fetch(&self, source: &str) -> Result<String, AppError> {
        self.sources.fetch(source).await
    }

    /// Summarize pasted text and record it in history.
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn summarize_text(
        &self,
        text: &str,
        length: Option<SummaryLength>,
    ) -> Result<SummaryResult, AppError> {
        self.summarize_and_record(text, length, None).await
    }

    /// Fetch a source, summarize it and record it in history.
    #[instrument(skip(self))]
    pub async fn summarize_source(
        &self,
        source: &str,
        length: Option<SummaryLength>,
    ) -> Result<SummaryResult, AppError> {
        let text = self.fetch(source).await?;
        self.summarize_and_record(&text, length, Some(source)).await
    }

    async fn summarize_and_record(
        &self,
        text: &str,
        length: Option<SummaryLength>,
        label: Option<&str>,
    ) -> Result<SummaryResult, AppError> {
        self.guard_input(text)?;
        let length = length.unwrap_or(self.config.default_length);

        let mut result = self.summarizer.summarize(text, length).await?;
        if let Some(label) = label {
            result = result.with_source_label(label);
        }

        // history is best-effort; a failed write must not lose the summary
        if let Err(e) = self.history.append(result.clone()) {
            warn!("Failed to record summary in history: {}", e);
        }
        Ok(result)
    }

    /// Readability, keywords and sentiment for a text.
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult, AppError> {
        Ok(engine::analyze(text)?)
    }

    /// Study cards for a summary.
    pub fn flashcards(&self, summary: &SummaryResult) -> Vec<FlashCard> {
        engine::generate_flashcards(&summary.summary_text)
    }

    /// Answer a question about a summary.
    pub fn ask(&self, question: &str, summary: &SummaryResult) -> String {
        engine::answer(question, summary)
    }

    /// Most recent stored summary.
    pub fn latest(&self) -> Option<SummaryRecord> {
        self.history.list().into_iter().next()
    }
}
