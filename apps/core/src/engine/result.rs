//! Result records produced by the engine.
//!
//! These are the structures handed back to calling code. They serialize with
//! camelCase field names so they can be stored alongside browser-side records.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::text::split_sentences;
use crate::error::EngineError;

/// Requested summary length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum SummaryLength {
    /// Roughly 15% of the source sentences
    Short,
    /// Roughly 30% of the source sentences
    #[default]
    Medium,
    /// Roughly 50% of the source sentences
    Long,
    /// An explicit percentage in `1..=100`
    Percentage(u8),
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryLength::Percentage(p) => write!(f, "percentage({})", p),
            other => write!(f, "{}", other.length_type()),
        }
    }
}

impl SummaryLength {
    /// Build a length from its wire representation (`"short"`, `"percentage"` + value, ...).
    pub fn from_parts(kind: &str, value: Option<u32>) -> Result<Self, EngineError> {
        let length = match kind.trim().to_lowercase().as_str() {
            "short" => SummaryLength::Short,
            "medium" => SummaryLength::Medium,
            "long" => SummaryLength::Long,
            "percentage" => {
                let value = value.ok_or_else(|| {
                    EngineError::InvalidParameter("percentage requires a value".to_string())
                })?;
                if !(1..=100).contains(&value) {
                    return Err(EngineError::InvalidParameter(format!(
                        "percentage must be between 1 and 100, got {}",
                        value
                    )));
                }
                SummaryLength::Percentage(value as u8)
            }
            other => {
                return Err(EngineError::InvalidParameter(format!(
                    "unknown length type '{}'",
                    other
                )))
            }
        };
        length.validate()?;
        Ok(length)
    }

    /// Reject percentages outside `1..=100`.
    pub fn validate(&self) -> Result<(), EngineError> {
        match self {
            SummaryLength::Percentage(p) if !(1..=100).contains(p) => Err(
                EngineError::InvalidParameter(format!("percentage must be between 1 and 100, got {}", p)),
            ),
            _ => Ok(()),
        }
    }

    /// Share of the source sentences to keep, in percent.
    pub fn percent(&self) -> u32 {
        match self {
            SummaryLength::Short => 15,
            SummaryLength::Medium => 30,
            SummaryLength::Long => 50,
            SummaryLength::Percentage(p) => u32::from(*p),
        }
    }

    /// Number of sentences to keep out of `sentence_count`: `ceil(count * percent / 100)`, at least 1.
    pub fn target_count(&self, sentence_count: usize) -> usize {
        let percent = self.percent() as usize;
        let target = (sentence_count * percent).div_ceil(100);
        target.clamp(1, sentence_count.max(1))
    }

    /// The length type label (`short`, `medium`, `long`, `percentage`).
    pub fn length_type(&self) -> &'static str {
        match self {
            SummaryLength::Short => "short",
            SummaryLength::Medium => "medium",
            SummaryLength::Long => "long",
            SummaryLength::Percentage(_) => "percentage",
        }
    }
}

/// How a summary was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMethod {
    /// Selected from the source by the local extractive summarizer
    Extractive,
    /// Returned by an external AI provider
    External,
}

/// A generated summary together with the request that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    /// The text that was summarized
    pub source_text: String,
    /// The summary body
    pub summary_text: String,
    /// Requested length
    pub length: SummaryLength,
    /// Which generator produced the summary
    pub method: GenerationMethod,
    /// Where the source text came from (URL, file name), if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_label: Option<String>,
}

impl SummaryResult {
    /// Attach a source label (URL, file name) for attribution.
    pub fn with_source_label(mut self, label: impl Into<String>) -> Self {
        self.source_label = Some(label.into());
        self
    }

    /// Number of sentences in the summary body.
    pub fn sentence_count(&self) -> usize {
        split_sentences(&self.summary_text).len()
    }

    /// Summary length as a fraction of the source length, in characters.
    pub fn compression_ratio(&self) -> f64 {
        let source = self.source_text.chars().count();
        if source == 0 {
            return 0.0;
        }
        self.summary_text.chars().count() as f64 / source as f64
    }
}

/// Reading level derived from the readability score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadingLevel {
    #[serde(rename = "Elementary")]
    Elementary,
    #[serde(rename = "Middle School")]
    MiddleSchool,
    #[serde(rename = "High School")]
    HighSchool,
    #[serde(rename = "College")]
    College,
    #[serde(rename = "College Graduate")]
    CollegeGraduate,
    #[serde(rename = "Professional")]
    Professional,
}

impl ReadingLevel {
    /// Map a readability score to its level: >=90, >=80, >=70, >=60, >=50, else Professional.
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => ReadingLevel::Elementary,
            80..=89 => ReadingLevel::MiddleSchool,
            70..=79 => ReadingLevel::HighSchool,
            60..=69 => ReadingLevel::College,
            50..=59 => ReadingLevel::CollegeGraduate,
            _ => ReadingLevel::Professional,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ReadingLevel::Elementary => "Elementary",
            ReadingLevel::MiddleSchool => "Middle School",
            ReadingLevel::HighSchool => "High School",
            ReadingLevel::College => "College",
            ReadingLevel::CollegeGraduate => "College Graduate",
            ReadingLevel::Professional => "Professional",
        }
    }
}

impl fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Overall tone of a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        };
        write!(f, "{}", label)
    }
}

/// Lexicon-based sentiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    /// Strength in `0..=10`; always 0 when neutral
    pub score: u8,
}

/// A keyword and how often it occurs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordResult {
    /// The keyword, lowercased
    pub keyword: String,
    /// Raw frequency in the text
    pub frequency: usize,
}

/// Readability, keyword and sentiment analysis of a text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Flesch reading ease, clamped to `0..=100`
    pub readability_score: u8,
    pub reading_level: ReadingLevel,
    /// Estimated reading time at 200 words per minute, at least 1
    pub reading_time_minutes: u32,
    /// Up to 10 keywords, most frequent first
    pub keywords: Vec<KeywordResult>,
    pub sentiment: Sentiment,
}

/// A question/answer study card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashCard {
    pub question: String,
    /// Verbatim segment of the source text
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_length_is_medium() {
        assert_eq!(SummaryLength::default(), SummaryLength::Medium);
        assert_eq!(SummaryLength::default().percent(), 30);
    }

    #[test]
    fn test_target_count_rounds_up() {
        assert_eq!(SummaryLength::Short.target_count(3), 1);
        assert_eq!(SummaryLength::Medium.target_count(10), 3);
        assert_eq!(SummaryLength::Medium.target_count(11), 4);
        assert_eq!(SummaryLength::Long.target_count(7), 4);
        assert_eq!(SummaryLength::Percentage(100).target_count(7), 7);
        assert_eq!(SummaryLength::Percentage(1).target_count(2), 1);
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(SummaryLength::from_parts("short", None), Ok(SummaryLength::Short));
        assert_eq!(
            SummaryLength::from_parts("Percentage", Some(40)),
            Ok(SummaryLength::Percentage(40))
        );
        assert!(matches!(
            SummaryLength::from_parts("percentage", Some(0)),
            Err(EngineError::InvalidParameter(_))
        ));
        assert!(matches!(
            SummaryLength::from_parts("percentage", Some(101)),
            Err(EngineError::InvalidParameter(_))
        ));
        assert!(matches!(
            SummaryLength::from_parts("percentage", None),
            Err(EngineError::InvalidParameter(_))
        ));
        assert!(matches!(
            SummaryLength::from_parts("tiny", None),
            Err(EngineError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_reading_level_boundaries() {
        assert_eq!(ReadingLevel::from_score(100), ReadingLevel::Elementary);
        assert_eq!(ReadingLevel::from_score(90), ReadingLevel::Elementary);
        assert_eq!(ReadingLevel::from_score(89), ReadingLevel::MiddleSchool);
        assert_eq!(ReadingLevel::from_score(80), ReadingLevel::MiddleSchool);
        assert_eq!(ReadingLevel::from_score(79), ReadingLevel::HighSchool);
        assert_eq!(ReadingLevel::from_score(60), ReadingLevel::College);
        assert_eq!(ReadingLevel::from_score(50), ReadingLevel::CollegeGraduate);
        assert_eq!(ReadingLevel::from_score(49), ReadingLevel::Professional);
        assert_eq!(ReadingLevel::from_score(0), ReadingLevel::Professional);
    }

    #[test]
    fn test_summary_length_serialization() {
        let json = serde_json::to_string(&SummaryLength::Percentage(40)).unwrap();
        assert_eq!(json, r#"{"type":"percentage","value":40}"#);
        let json = serde_json::to_string(&SummaryLength::Short).unwrap();
        assert_eq!(json, r#"{"type":"short"}"#);
    }

    #[test]
    fn test_reading_level_serializes_label() {
        let json = serde_json::to_string(&ReadingLevel::MiddleSchool).unwrap();
        assert_eq!(json, "\"Middle School\"");
    }
}
