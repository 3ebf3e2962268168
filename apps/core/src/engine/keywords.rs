//! Keyword Extraction using term frequency.
//!
//! Lowercases, strips punctuation, drops short words and stopwords, then ranks
//! the remaining words by how often they occur. Ties keep first-seen order.

use std::collections::{HashMap, HashSet};

use super::result::KeywordResult;
use super::text::tokenize;

/// Stopwords excluded from keyword results.
///
/// Words of three letters or fewer never qualify, so only longer function
/// words need to be listed.
pub const STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "also", "although", "always", "among",
    "another", "because", "been", "before", "being", "below", "between", "both", "cannot",
    "could", "does", "doing", "down", "during", "each", "either", "even", "ever", "every",
    "from", "further", "have", "having", "here", "hers", "herself", "himself", "however",
    "into", "itself", "just", "like", "made", "make", "many", "more", "most", "much", "must",
    "myself", "neither", "never", "only", "other", "ours", "ourselves", "over", "same",
    "shall", "should", "since", "some", "such", "than", "that", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "though", "through",
    "thus", "under", "until", "upon", "very", "want", "were", "what", "whatever", "when",
    "where", "whether", "which", "while", "whom", "whose", "will", "with", "within",
    "without", "would", "your", "yours", "yourself", "yourselves",
];

/// Keyword extractor ranking words by raw frequency
pub struct KeywordExtractor {
    stopwords: HashSet<&'static str>,
    min_word_length: usize,
    max_keywords: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    /// Create a new keyword extractor with default settings (words longer than 3, top 10)
    pub fn new() -> Self {
        Self::with_config(4, 10)
    }

    /// Create a keyword extractor with custom configuration
    pub fn with_config(min_word_length: usize, max_keywords: usize) -> Self {
        Self {
            stopwords: STOPWORDS.iter().copied().collect(),
            min_word_length,
            max_keywords,
        }
    }

    fn qualifies(&self, word: &str) -> bool {
        word.chars().count() >= self.min_word_length && !self.stopwords.contains(word)
    }

    /// Extract the top N keywords from text, most frequent first
    pub fn extract(&self, text: &str, top_k: Option<usize>) -> Vec<KeywordResult> {
        let max_results = top_k.unwrap_or(self.max_keywords);

        // first-seen order doubles as the tie-breaker
        let mut order: Vec<String> = Vec::new();
        let mut freq: HashMap<String, usize> = HashMap::new();
        for word in tokenize(text) {
            if !self.qualifies(&word) {
                continue;
            }
            let count = freq.entry(word.clone()).or_insert(0);
            if *count == 0 {
                order.push(word);
            }
            *count += 1;
        }

        let mut ranked: Vec<KeywordResult> = order
            .into_iter()
            .map(|keyword| {
                let frequency = freq.get(&keyword).copied().unwrap_or(0);
                KeywordResult { keyword, frequency }
            })
            .collect();

        // stable sort keeps first-seen order among equal counts
        ranked.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        ranked.truncate(max_results);
        ranked
    }
}
