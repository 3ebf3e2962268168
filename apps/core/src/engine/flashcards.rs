//! Flashcard generation.
//!
//! Best-effort: never fails. Text too thin to yield a qualifying segment
//! produces an empty deck and the caller decides what to show.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

use super::result::FlashCard;
use super::text::{char_len, leading_words, split_sentences};

/// Hard cap on cards per summary
pub const MAX_CARDS: usize = 7;
/// The fill pass stops once this many cards exist
pub const TARGET_CARDS: usize = 5;

const MIN_PARAGRAPH_CHARS: usize = 30;
const MIN_SENTENCE_CHARS: usize = 20;
const MIN_FILL_CHARS: usize = 40;
const MIN_PARAGRAPHS: usize = 2;
const LEAD_WORDS: usize = 3;

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("Invalid regex: paragraph break"));

static SELECTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // Importance words
        Regex::new(r"(?i)\b(important|significant|key|main|primary|essential|crucial|critical)\b")
            .expect("Invalid regex: importance words"),
        // Ordinal and sequence words
        Regex::new(r"(?i)\b(first|second|third|next|then|finally|step|stage|phase)\b")
            .expect("Invalid regex: sequence words"),
        // Change verbs
        Regex::new(
            r"(?i)\b(increase[sd]?|decrease[sd]?|improve[sd]?|reduce[sd]?|change[sd]?|grow|grows|grew|develop(s|ed)?|cause[sd]?|affect(s|ed)?|lead to|led to)\b",
        )
        .expect("Invalid regex: change verbs"),
        // Citation phrases
        Regex::new(
            r"(?i)\b(according to|research shows|studies show|study found|experts say|reported|evidence suggests)\b",
        )
        .expect("Invalid regex: citation phrases"),
    ]
});

static REASON_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(because|due to)\b").expect("Invalid regex: reason cue"));

static WH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(what|who|when|where|which|why|how)\b").expect("Invalid regex: wh-words")
});

/// Split text into flashcard segments.
///
/// Paragraphs (blank-line separated, at least 30 characters) are preferred;
/// with fewer than two of them the text is split into sentences of at least
/// 20 characters instead. Every segment is a verbatim slice of `text`.
pub fn segment(text: &str) -> Vec<&str> {
    let paragraphs: Vec<&str> = PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|p| char_len(p) >= MIN_PARAGRAPH_CHARS)
        .collect();

    if paragraphs.len() >= MIN_PARAGRAPHS {
        return paragraphs;
    }

    split_sentences(text)
        .into_iter()
        .filter(|s| char_len(s) >= MIN_SENTENCE_CHARS)
        .collect()
}

/// Build a question for a segment from its structural cues.
pub fn question_for(segment: &str) -> String {
    let lead = leading_words(segment, LEAD_WORDS);
    if REASON_PATTERN.is_match(segment) {
        format!("What is the reason behind \"{}...\"?", lead)
    } else if WH_PATTERN.is_match(segment) {
        format!("What key fact is given in \"{}...\"?", lead)
    } else {
        generic_question(&lead)
    }
}

fn generic_question(lead: &str) -> String {
    format!("What does the text say about \"{}...\"?", lead)
}

/// Generate up to seven question/answer cards from a summary.
pub fn generate_flashcards(summary_text: &str) -> Vec<FlashCard> {
    let segments = segment(summary_text);
    if segments.is_empty() {
        debug!("No qualifying segments for flashcards");
        return Vec::new();
    }

    let mut used: HashSet<usize> = HashSet::new();
    let mut cards: Vec<FlashCard> = Vec::new();

    for pattern in SELECTION_PATTERNS.iter() {
        if cards.len() >= MAX_CARDS {
            break;
        }
        let hit = segments
            .iter()
            .enumerate()
            .find(|(i, s)| !used.contains(i) && pattern.is_match(s));
        if let Some((i, s)) = hit {
            used.insert(i);
            cards.push(FlashCard {
                question: question_for(s),
                answer: s.to_string(),
            });
        }
    }

    if cards.len() < TARGET_CARDS {
        for (i, s) in segments.iter().enumerate() {
            if cards.len() >= TARGET_CARDS {
                break;
            }
            if used.contains(&i) || char_len(s) <= MIN_FILL_CHARS {
                continue;
            }
            used.insert(i);
            cards.push(FlashCard {
                question: generic_question(&leading_words(s, LEAD_WORDS)),
                answer: s.to_string(),
            });
        }
    }

    debug!(
        "Generated {} flashcards from {} segments",
        cards.len(),
        segments.len()
    );
    cards
}
