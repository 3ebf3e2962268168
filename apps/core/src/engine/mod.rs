//! # Engine Module
//!
//! Local, non-LLM text processing for Summarist.
//! Every component is a pure function of its input: no shared state, no I/O.
//!
//! ## Components
//! - `summarizer`: extractive summarization (position/length/keyword scoring)
//! - `analyzer`: readability, keywords and sentiment in one pass
//! - `readability`: Flesch reading ease and reading time
//! - `keywords`: frequency-ranked keyword extraction
//! - `sentiment`: lexicon-based sentiment
//! - `flashcards`: question/answer card generation
//! - `qa`: question answering over a summary
//! - `result`: output data structures
//! - `text`: sentence splitting and tokenization shared by all of the above

pub mod analyzer;
pub mod flashcards;
pub mod keywords;
pub mod qa;
pub mod readability;
pub mod result;
pub mod sentiment;
pub mod summarizer;
pub mod text;

pub use analyzer::{analyze, TextAnalyzer};
pub use flashcards::generate_flashcards;
pub use keywords::{KeywordExtractor, STOPWORDS};
pub use qa::{answer, classify_question, QuestionCategory};
pub use result::{
    AnalysisResult, FlashCard, GenerationMethod, KeywordResult, ReadingLevel, Sentiment,
    SentimentLabel, SummaryLength, SummaryResult,
};
pub use summarizer::summarize;
