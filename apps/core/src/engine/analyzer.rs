//! Text Analyzer - readability, keywords and sentiment in one pass.
//!
//! Strict about its input: blank text is rejected with `EmptyInput` rather
//! than producing a zeroed result.

use std::sync::LazyLock;
use std::time::Instant;
use tracing::debug;

use super::keywords::KeywordExtractor;
use super::readability;
use super::result::AnalysisResult;
use super::sentiment;
use crate::error::EngineError;

static DEFAULT_ANALYZER: LazyLock<TextAnalyzer> = LazyLock::new(TextAnalyzer::new);

/// Orchestrates the readability, keyword and sentiment components
pub struct TextAnalyzer {
    keyword_extractor: KeywordExtractor,
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextAnalyzer {
    /// Create a new analyzer with default settings
    pub fn new() -> Self {
        Self {
            keyword_extractor: KeywordExtractor::new(),
        }
    }

    /// Analyze a text and produce readability, keyword and sentiment results
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult, EngineError> {
        if text.trim().is_empty() {
            return Err(EngineError::EmptyInput);
        }
        let start = Instant::now();

        let readability = readability::measure(text);
        let keywords = self.keyword_extractor.extract(text, None);
        let sentiment = sentiment::score(text);

        debug!(
            "Analyzed {} words in {:?}: readability {} ({}), sentiment {}",
            readability.word_count,
            start.elapsed(),
            readability.score,
            readability.level,
            sentiment.label
        );

        Ok(AnalysisResult {
            readability_score: readability.score,
            reading_level: readability.level,
            reading_time_minutes: readability.reading_time_minutes,
            keywords,
            sentiment,
        })
    }
}

/// Analyze `text` with the default analyzer.
pub fn analyze(text: &str) -> Result<AnalysisResult, EngineError> {
    DEFAULT_ANALYZER.analyze(text)
}
