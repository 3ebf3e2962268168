//! Shared text primitives.
//!
//! Sentence splitting, whitespace normalization and tokenization used by every
//! engine component. Sentences are recomputed on every call and never cached.

use regex::Regex;
use std::sync::LazyLock;

static SENTENCE_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("Invalid regex: sentence delimiter"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex: whitespace run"));

/// Collapse every whitespace run into a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Split text on `.`, `!` and `?`, trimming each piece and dropping empties.
///
/// The returned slices borrow from `text`, so every sentence is a verbatim
/// substring of the input (without its terminating punctuation).
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_DELIMITER
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Join sentences with `". "` and close with a trailing period.
pub fn join_sentences<S: AsRef<str>>(sentences: &[S]) -> String {
    if sentences.is_empty() {
        return String::new();
    }
    let body = sentences
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(". ");
    format!("{}.", body)
}

/// Lowercase, strip punctuation and split on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .map(|s| s.to_string())
        .collect()
}

/// Number of characters (not bytes) in a string.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// The first `count` whitespace-separated words of `text`.
pub fn leading_words(text: &str, count: usize) -> String {
    text.split_whitespace()
        .take(count)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("The cat sat. The dog ran!  Why? ");
        assert_eq!(sentences, vec!["The cat sat", "The dog ran", "Why"]);
    }

    #[test]
    fn test_split_drops_empty_pieces() {
        assert!(split_sentences("...!!?").is_empty());
        assert!(split_sentences("   ").is_empty());
        assert_eq!(split_sentences("Wait... what"), vec!["Wait", "what"]);
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a\n\n b\t c  "), "a b c");
    }

    #[test]
    fn test_join_sentences() {
        assert_eq!(join_sentences(&["One", "Two"]), "One. Two.");
        assert_eq!(join_sentences::<&str>(&[]), "");
    }

    #[test]
    fn test_tokenize_strips_punctuation() {
        assert_eq!(
            tokenize("Hello, World! It's fine."),
            vec!["hello", "world", "its", "fine"]
        );
    }

    #[test]
    fn test_leading_words() {
        assert_eq!(leading_words("one two three four", 3), "one two three");
        assert_eq!(leading_words("solo", 3), "solo");
    }
}
