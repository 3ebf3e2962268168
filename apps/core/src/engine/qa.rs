//! Contextual question answering over a summary.
//!
//! A question is first classified into a [`QuestionCategory`], then answered by
//! the handler for that category. Answers are always built from sentences of
//! the summary (or from its stored statistics); the responder never fails.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

use super::result::SummaryResult;
use super::text::{join_sentences, split_sentences, tokenize};

/// Reply used when the summary has no sentences at all
pub const NO_ANSWER: &str = "The summary does not contain enough information to answer that question.";

const MAX_ANSWER_SENTENCES: usize = 2;
const MIN_KEYWORD_LENGTH: usize = 4;

/// Words that carry no topical meaning in a question
const FUNCTION_WORDS: &[&str] = &[
    "what", "when", "where", "which", "while", "whom", "whose", "does", "doing", "this", "that",
    "these", "those", "with", "about", "from", "there", "their", "they", "them", "have", "been",
    "being", "were", "tell", "explain", "describe", "define", "would", "could", "should", "please",
    "into", "your", "some", "text", "summary", "mean", "means", "happen", "happened",
];

/// Kind of question being asked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    /// What the text is about overall
    Topic,
    /// Size of the source and summary
    Length,
    /// Why something happened
    Reason,
    /// When something happened
    Time,
    /// How something is done
    Process,
    /// Who is involved
    People,
    /// What something is
    Definition,
    /// Anything else
    General,
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QuestionCategory::Topic => "topic",
            QuestionCategory::Length => "length",
            QuestionCategory::Reason => "reason",
            QuestionCategory::Time => "time",
            QuestionCategory::Process => "process",
            QuestionCategory::People => "people",
            QuestionCategory::Definition => "definition",
            QuestionCategory::General => "general",
        };
        write!(f, "{}", label)
    }
}

// Checked in order; the first category whose pattern matches wins.
static CATEGORY_PATTERNS: LazyLock<Vec<(QuestionCategory, Regex)>> = LazyLock::new(|| {
    vec![
        (
            QuestionCategory::Topic,
            Regex::new(r"(?i)\b(what is (this|it|the text|the summary|the article) about|main (topic|idea|point|subject|theme)|topic|gist)\b")
                .expect("Invalid regex: topic question"),
        ),
        (
            QuestionCategory::Length,
            Regex::new(r"(?i)\b(how long|length|how many (words|characters|sentences)|word count|character count|size|how big|compression|shorter)\b")
                .expect("Invalid regex: length question"),
        ),
        (
            QuestionCategory::Reason,
            Regex::new(r"(?i)\b(why|reason|reasons|cause|caused|how come)\b")
                .expect("Invalid regex: reason question"),
        ),
        (
            QuestionCategory::Time,
            Regex::new(r"(?i)(^\s*when\b|\bwhat (year|date|time|month|day)\b|\bwhich year\b)")
                .expect("Invalid regex: time question"),
        ),
        (
            QuestionCategory::Process,
            Regex::new(r"(?i)(^\s*how\b|\bprocess\b|\bsteps?\b|\bmethod\b|\bin what way\b)")
                .expect("Invalid regex: process question"),
        ),
        (
            QuestionCategory::People,
            Regex::new(r"(?i)(^\s*who\b|\bwhom\b|\bwhose\b|\bpeople\b|\bperson\b|\bauthor\b)")
                .expect("Invalid regex: people question"),
        ),
        (
            QuestionCategory::Definition,
            Regex::new(r"(?i)(^\s*what\b|\bexplain\b|\bdescribe\b|\bdefine\b|\bdefinition\b|\bmeaning\b|\btell me about\b)")
                .expect("Invalid regex: definition question"),
        ),
    ]
});

static PROCESS_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(by|through|using|with)\b").expect("Invalid regex: process markers")
});

static REASON_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(because|due to|reason|reasons|result of)\b")
        .expect("Invalid regex: reason markers")
});

static TIME_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\b1[0-9]{3}\b|\b20[0-9]{2}\b|\b\d{1,2}/\d{1,2}/\d{2,4}\b|\b(january|february|march|april|may|june|july|august|september|october|november|december)\b)",
    )
    .expect("Invalid regex: time markers")
});

/// Determine what kind of question is being asked.
pub fn classify_question(question: &str) -> QuestionCategory {
    CATEGORY_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(question))
        .map(|(category, _)| *category)
        .unwrap_or(QuestionCategory::General)
}

/// Significant words of a question: longer than three letters, no function words.
pub fn question_keywords(question: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(question)
        .into_iter()
        .filter(|w| w.chars().count() >= MIN_KEYWORD_LENGTH && !FUNCTION_WORDS.contains(&w.as_str()))
        .filter(|w| seen.insert(w.clone()))
        .collect()
}

/// Number of question keywords present in `sentence` as whole words.
pub fn keyword_overlap(keywords: &[String], sentence: &str) -> usize {
    let words: HashSet<String> = tokenize(sentence).into_iter().collect();
    keywords.iter().filter(|k| words.contains(k.as_str())).count()
}

/// Indices of the best-overlapping sentences (score > 0, at most two), in original order.
fn top_overlapping(keywords: &[String], sentences: &[&str]) -> Vec<usize> {
    let mut scored: Vec<(usize, usize)> = sentences
        .iter()
        .enumerate()
        .map(|(i, s)| (i, keyword_overlap(keywords, s)))
        .filter(|(_, score)| *score > 0)
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.truncate(MAX_ANSWER_SENTENCES);

    let mut indices: Vec<usize> = scored.into_iter().map(|(i, _)| i).collect();
    indices.sort_unstable();
    indices
}

fn answer_by_overlap(keywords: &[String], sentences: &[&str]) -> String {
    let indices = top_overlapping(keywords, sentences);
    if indices.is_empty() {
        return join_sentences(&sentences[..1]);
    }
    let picked: Vec<&str> = indices.into_iter().map(|i| sentences[i]).collect();
    join_sentences(&picked)
}

/// Best sentence carrying `markers`; falls back to keyword overlap when none does.
fn answer_by_marker(markers: &Regex, keywords: &[String], sentences: &[&str]) -> String {
    let best = sentences
        .iter()
        .enumerate()
        .filter(|(_, s)| markers.is_match(s))
        .max_by(|(ia, a), (ib, b)| {
            keyword_overlap(keywords, a)
                .cmp(&keyword_overlap(keywords, b))
                .then(ib.cmp(ia))
        });

    match best {
        Some((_, sentence)) => join_sentences(&[*sentence]),
        None => answer_by_overlap(keywords, sentences),
    }
}

/// First sentence mentioning a year, date or month; falls back to keyword overlap.
fn answer_by_first_marker(markers: &Regex, keywords: &[String], sentences: &[&str]) -> String {
    match sentences.iter().find(|s| markers.is_match(s)) {
        Some(sentence) => join_sentences(&[*sentence]),
        None => answer_by_overlap(keywords, sentences),
    }
}

fn answer_topic(summary: &SummaryResult, sentences: &[&str]) -> String {
    let first = join_sentences(&sentences[..1]);
    match &summary.source_label {
        Some(label) => format!("{} (Source: {})", first, label),
        None => first,
    }
}

fn answer_length(summary: &SummaryResult) -> String {
    let original = summary.source_text.chars().count();
    let condensed = summary.summary_text.chars().count();
    let percent = (summary.compression_ratio() * 100.0).round() as u64;
    format!(
        "The original text is {} characters long and the summary is {} characters, about {}% of the original.",
        original, condensed, percent
    )
}

/// Answer `question` from the content of `summary`.
pub fn answer(question: &str, summary: &SummaryResult) -> String {
    let category = classify_question(question);
    let keywords = question_keywords(question);
    debug!("Question classified as {} with keywords {:?}", category, keywords);

    if category == QuestionCategory::Length {
        return answer_length(summary);
    }

    let sentences = split_sentences(&summary.summary_text);
    if sentences.is_empty() {
        return NO_ANSWER.to_string();
    }

    match category {
        QuestionCategory::Topic => answer_topic(summary, &sentences),
        QuestionCategory::Process => answer_by_marker(&PROCESS_MARKERS, &keywords, &sentences),
        QuestionCategory::Reason => answer_by_marker(&REASON_MARKERS, &keywords, &sentences),
        QuestionCategory::Time => answer_by_first_marker(&TIME_MARKERS, &keywords, &sentences),
        QuestionCategory::Definition
        | QuestionCategory::People
        | QuestionCategory::General
        | QuestionCategory::Length => answer_by_overlap(&keywords, &sentences),
    }
}
