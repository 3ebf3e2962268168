//! Extractive summarization.
//!
//! Scores every sentence with position, length and keyword heuristics, keeps
//! the best `ceil(sentences * fraction)` of them and reassembles the selection
//! in its original narrative order. Deterministic for a fixed input.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::result::{GenerationMethod, SummaryLength, SummaryResult};
use super::text::{char_len, join_sentences, normalize_whitespace, split_sentences};
use crate::error::EngineError;

/// Words that mark a sentence as carrying a key point
static IMPORTANCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(important|significant|key|main|primary|essential|crucial|critical|conclusion|result|results|therefore|because|however|finally|overall|in summary)\b",
    )
    .expect("Invalid regex: importance lexicon")
});

const LEADING_SENTENCES: usize = 3;
const LEADING_WEIGHT: f64 = 3.0;
const EARLY_WEIGHT: f64 = 2.0;
const MIDDLE_WEIGHT: f64 = 1.0;
const LATE_WEIGHT: f64 = 0.5;

const MIN_FULL_LENGTH: usize = 20;
const MAX_FULL_LENGTH: usize = 200;
const FULL_LENGTH_WEIGHT: f64 = 2.0;
const LONG_LENGTH_WEIGHT: f64 = 1.0;

const KEYWORD_BONUS: f64 = 2.0;

/// A sentence with its heuristic score and original position
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSentence<'a> {
    pub index: usize,
    pub text: &'a str,
    pub score: f64,
}

/// Position weight: the first three sentences score highest, the rest decay
/// through three bands of relative position.
fn position_score(index: usize, total: usize) -> f64 {
    if index < LEADING_SENTENCES {
        return LEADING_WEIGHT;
    }
    let relative = index as f64 / total as f64;
    if relative < 1.0 / 3.0 {
        EARLY_WEIGHT
    } else if relative < 2.0 / 3.0 {
        MIDDLE_WEIGHT
    } else {
        LATE_WEIGHT
    }
}

/// Length weight: full credit for 20..=200 characters, partial credit above.
fn length_score(sentence: &str) -> f64 {
    let len = char_len(sentence);
    if len < MIN_FULL_LENGTH {
        0.0
    } else if len <= MAX_FULL_LENGTH {
        FULL_LENGTH_WEIGHT
    } else {
        LONG_LENGTH_WEIGHT
    }
}

fn keyword_bonus(sentence: &str) -> f64 {
    if IMPORTANCE_PATTERN.is_match(sentence) {
        KEYWORD_BONUS
    } else {
        0.0
    }
}

/// Score every sentence. Output order matches input order.
pub fn score_sentences<'a>(sentences: &[&'a str]) -> Vec<ScoredSentence<'a>> {
    let total = sentences.len();
    sentences
        .iter()
        .enumerate()
        .map(|(index, &text)| ScoredSentence {
            index,
            text,
            score: position_score(index, total) + length_score(text) + keyword_bonus(text),
        })
        .collect()
}

/// Keep the `target` best sentences (ties go to the earlier sentence) and
/// return them in original order.
pub fn select_sentences<'a>(
    mut scored: Vec<ScoredSentence<'a>>,
    target: usize,
) -> Vec<ScoredSentence<'a>> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));
    scored.truncate(target);
    scored.sort_by_key(|s| s.index);
    scored
}

/// Produce an extractive summary of `text`.
///
/// # Errors
///
/// * `EmptyInput` if `text` is blank.
/// * `InvalidParameter` if a percentage length is outside `1..=100`.
/// * `NoContent` if no sentence survives splitting.
pub fn summarize(text: &str, length: SummaryLength) -> Result<SummaryResult, EngineError> {
    if text.trim().is_empty() {
        return Err(EngineError::EmptyInput);
    }
    length.validate()?;

    let normalized = normalize_whitespace(text);
    let sentences = split_sentences(&normalized);
    if sentences.is_empty() {
        return Err(EngineError::NoContent);
    }

    let target = length.target_count(sentences.len());
    let selected = select_sentences(score_sentences(&sentences), target);

    debug!(
        "Extractive summary: kept {} of {} sentences ({})",
        selected.len(),
        sentences.len(),
        length
    );

    let texts: Vec<&str> = selected.iter().map(|s| s.text).collect();
    Ok(SummaryResult {
        source_text: text.to_string(),
        summary_text: join_sentences(&texts),
        length,
        method: GenerationMethod::Extractive,
        source_label: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_because_sentence_wins_short_summary() {
        let text = "The cat sat. The dog ran fast because it was scared. Cats are quiet.";
        let result = summarize(text, SummaryLength::Short).unwrap();
        assert_eq!(result.summary_text, "The dog ran fast because it was scared.");
        assert_eq!(result.method, GenerationMethod::Extractive);
    }

    #[test]
    fn test_position_bands() {
        assert_eq!(position_score(0, 30), LEADING_WEIGHT);
        assert_eq!(position_score(2, 30), LEADING_WEIGHT);
        assert_eq!(position_score(5, 30), EARLY_WEIGHT);
        assert_eq!(position_score(15, 30), MIDDLE_WEIGHT);
        assert_eq!(position_score(25, 30), LATE_WEIGHT);
    }

    #[test]
    fn test_length_score() {
        assert_eq!(length_score("short one"), 0.0);
        assert_eq!(length_score("This sentence is comfortably long"), FULL_LENGTH_WEIGHT);
        assert_eq!(length_score(&"x".repeat(250)), LONG_LENGTH_WEIGHT);
    }

    #[test]
    fn test_keyword_bonus_is_case_insensitive() {
        assert_eq!(keyword_bonus("This is IMPORTANT"), KEYWORD_BONUS);
        assert_eq!(keyword_bonus("Nothing to see"), 0.0);
        // whole words only
        assert_eq!(keyword_bonus("The keyboard broke"), 0.0);
    }

    #[test]
    fn test_ties_prefer_earlier_sentence() {
        let sentences = vec!["alpha alpha alpha alpha", "bravo bravo bravo bravo"];
        let selected = select_sentences(score_sentences(&sentences), 1);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].index, 0);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(summarize("   \n", SummaryLength::Short), Err(EngineError::EmptyInput));
    }

    #[test]
    fn test_only_punctuation_has_no_content() {
        assert_eq!(summarize("... !!! ???", SummaryLength::Long), Err(EngineError::NoContent));
    }

    #[test]
    fn test_invalid_percentage() {
        assert!(matches!(
            summarize("One. Two.", SummaryLength::Percentage(0)),
            Err(EngineError::InvalidParameter(_))
        ));
        assert!(matches!(
            summarize("One. Two.", SummaryLength::Percentage(150)),
            Err(EngineError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let result = summarize("Line   one\nstill one.", SummaryLength::Percentage(100)).unwrap();
        assert_eq!(result.summary_text, "Line one still one.");
        assert_eq!(result.source_text, "Line   one\nstill one.");
    }
}
