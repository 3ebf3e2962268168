//! Lexicon-based sentiment scoring.
//!
//! Counts whole-word matches against fixed positive and negative lexicons.
//! The label follows whichever side has more hits; the score is
//! `round(min(10, |pos - neg| / (pos + neg + 1) * 10))`, and 0 when neutral.

use regex::Regex;
use std::sync::LazyLock;

use super::result::{Sentiment, SentimentLabel};

static POSITIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(good|great|excellent|amazing|wonderful|fantastic|positive|benefit|benefits|beneficial|success|successful|improve|improved|improvement|effective|happy|love|best|better|strong|growth|advantage|opportunity|progress|innovative|efficient|helpful|valuable|win)\b",
    )
    .expect("Invalid regex: positive lexicon")
});

static NEGATIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(bad|poor|terrible|awful|horrible|negative|problem|problems|issue|issues|failure|fail|failed|difficult|risk|risks|loss|decline|worse|worst|weak|sad|hate|crisis|threat|danger|harmful|damage|concern|concerns)\b",
    )
    .expect("Invalid regex: negative lexicon")
});

/// Count `(positive, negative)` lexicon hits in `text`.
pub fn lexicon_hits(text: &str) -> (usize, usize) {
    (
        POSITIVE_PATTERN.find_iter(text).count(),
        NEGATIVE_PATTERN.find_iter(text).count(),
    )
}

/// Score the sentiment of `text`.
pub fn score(text: &str) -> Sentiment {
    let (positive, negative) = lexicon_hits(text);

    let label = match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => SentimentLabel::Positive,
        std::cmp::Ordering::Less => SentimentLabel::Negative,
        std::cmp::Ordering::Equal => SentimentLabel::Neutral,
    };

    let score = if label == SentimentLabel::Neutral {
        0
    } else {
        let diff = positive.abs_diff(negative) as f64;
        let total = (positive + negative + 1) as f64;
        (diff / total * 10.0).min(10.0).round() as u8
    };

    Sentiment { label, score }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive() {
        let s = score("The results were excellent and the team made great progress.");
        assert_eq!(s.label, SentimentLabel::Positive);
        // 3 positive, 0 negative => 3/4 * 10
        assert_eq!(s.score, 8);
    }

    #[test]
    fn test_negative() {
        let s = score("A terrible failure.");
        assert_eq!(s.label, SentimentLabel::Negative);
        assert_eq!(s.score, 7);
    }

    #[test]
    fn test_balanced_is_neutral() {
        let s = score("Good news and bad news.");
        assert_eq!(s.label, SentimentLabel::Neutral);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_whole_words_only() {
        // "goodness" and "badge" must not count
        assert_eq!(lexicon_hits("goodness gracious, a badge"), (0, 0));
        assert_eq!(score("Nothing here").label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_score_stays_in_range() {
        let text = "great ".repeat(500);
        let s = score(&text);
        assert_eq!(s.label, SentimentLabel::Positive);
        assert!(s.score <= 10);
        assert_eq!(s.score, 10);
    }
}
