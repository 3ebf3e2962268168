//! Readability scoring.
//!
//! Flesch reading ease with a vowel-group syllable estimate:
//! `206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)`,
//! clamped to `0..=100`.

use regex::Regex;
use std::sync::LazyLock;

use super::result::ReadingLevel;
use super::text::split_sentences;

static VOWEL_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[aeiouy]+").expect("Invalid regex: vowel group"));

const WORDS_PER_MINUTE: usize = 200;

/// Readability metrics for a text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readability {
    pub word_count: usize,
    pub sentence_count: usize,
    pub syllable_count: usize,
    /// Clamped and rounded Flesch reading ease
    pub score: u8,
    pub level: ReadingLevel,
    pub reading_time_minutes: u32,
}

/// Estimate the syllables of a single word.
///
/// Counts vowel groups, drops one for a silent trailing `e` on words longer
/// than three letters (not `-le` or `-ee`), and never returns less than 1.
pub fn count_syllables(word: &str) -> usize {
    let letters: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphabetic())
        .collect();
    if letters.is_empty() {
        return 1;
    }

    let mut count = VOWEL_GROUP.find_iter(&letters).count();
    let silent_e = letters.chars().count() > 3
        && letters.ends_with('e')
        && !letters.ends_with("le")
        && !letters.ends_with("ee");
    if silent_e && count > 1 {
        count -= 1;
    }
    count.max(1)
}

/// Reading time in whole minutes at 200 words per minute, at least 1.
pub fn reading_time_minutes(word_count: usize) -> u32 {
    word_count.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

/// Raw Flesch reading ease before clamping.
fn flesch(words: usize, sentences: usize, syllables: usize) -> f64 {
    if words == 0 {
        return 0.0;
    }
    let sentences = sentences.max(1) as f64;
    let words = words as f64;
    206.835 - 1.015 * (words / sentences) - 84.6 * (syllables as f64 / words)
}

/// Compute readability for `text`. Blank text scores 0 with a 1 minute reading time.
pub fn measure(text: &str) -> Readability {
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| w.chars().any(|c| c.is_alphanumeric()))
        .collect();
    let word_count = words.len();
    let sentence_count = split_sentences(text).len().max(1);
    let syllable_count: usize = words.iter().map(|w| count_syllables(w)).sum();

    let score = flesch(word_count, sentence_count, syllable_count)
        .clamp(0.0, 100.0)
        .round() as u8;

    Readability {
        word_count,
        sentence_count,
        syllable_count,
        score,
        level: ReadingLevel::from_score(score),
        reading_time_minutes: reading_time_minutes(word_count),
    }
}
