//! Engine Tests
//!
//! Properties that span the summarizer, analyzer, flashcard generator and
//! Q&A responder.

use crate::engine::{
    analyze, answer, classify_question, generate_flashcards, summarize, GenerationMethod,
    QuestionCategory, SentimentLabel, SummaryLength, SummaryResult, STOPWORDS,
};
use crate::error::EngineError;

const ARTICLE: &str = "Coral reefs cover a tiny fraction of the ocean floor. \
    They support roughly a quarter of all marine species. \
    Warmer water causes corals to expel the algae living in their tissue. \
    This process is known as bleaching. \
    Bleached corals are not dead but they are under serious stress. \
    Repeated bleaching events reduce the time reefs have to recover. \
    Scientists track reef health with satellite temperature data. \
    Local protection helps reefs survive by limiting pollution and overfishing. \
    Some reefs have shown surprising resilience after major events. \
    The key conclusion is that cutting emissions remains essential for reef survival.";

fn article_sentence_count() -> usize {
    ARTICLE.split('.').filter(|s| !s.trim().is_empty()).count()
}

#[cfg(test)]
mod summarizer_tests {
    use super::*;

    #[test]
    fn test_percentage_sentence_counts() {
        let n = article_sentence_count();
        assert_eq!(n, 10);

        for (percent, expected) in [(1u8, 1usize), (10, 1), (25, 3), (33, 4), (50, 5), (75, 8), (100, 10)] {
            let result = summarize(ARTICLE, SummaryLength::Percentage(percent)).unwrap();
            assert_eq!(
                result.sentence_count(),
                expected,
                "Expected {} sentences at {}%",
                expected,
                percent
            );
        }
    }

    #[test]
    fn test_named_lengths() {
        let short = summarize(ARTICLE, SummaryLength::Short).unwrap();
        let medium = summarize(ARTICLE, SummaryLength::Medium).unwrap();
        let long = summarize(ARTICLE, SummaryLength::Long).unwrap();

        assert_eq!(short.sentence_count(), 2);
        assert_eq!(medium.sentence_count(), 3);
        assert_eq!(long.sentence_count(), 5);
        assert!(short.compression_ratio() < long.compression_ratio());
    }

    #[test]
    fn test_selection_keeps_original_order() {
        let result = summarize(ARTICLE, SummaryLength::Long).unwrap();
        let sentences: Vec<&str> = result
            .summary_text
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        let positions: Vec<usize> = sentences
            .iter()
            .map(|s| ARTICLE.find(s).expect("summary sentence should come from the source"))
            .collect();
        assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "Sentences out of order: {:?}",
            sentences
        );
    }

    #[test]
    fn test_summary_is_deterministic() {
        let first = summarize(ARTICLE, SummaryLength::Percentage(40)).unwrap();
        let second = summarize(ARTICLE, SummaryLength::Percentage(40)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_full_percentage_keeps_every_sentence() {
        let result = summarize(ARTICLE, SummaryLength::Percentage(100)).unwrap();
        assert_eq!(result.sentence_count(), article_sentence_count());
        assert_eq!(result.method, GenerationMethod::Extractive);
        assert_eq!(result.source_text, ARTICLE);
    }

    #[test]
    fn test_single_sentence_without_terminator() {
        let result = summarize("Just one sentence here", SummaryLength::Short).unwrap();
        assert_eq!(result.summary_text, "Just one sentence here.");
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(summarize("", SummaryLength::Short), Err(EngineError::EmptyInput));
        assert_eq!(summarize(" \n ", SummaryLength::Short), Err(EngineError::EmptyInput));
        assert_eq!(summarize("...!?", SummaryLength::Short), Err(EngineError::NoContent));
        assert!(matches!(
            summarize(ARTICLE, SummaryLength::Percentage(0)),
            Err(EngineError::InvalidParameter(_))
        ));
        assert!(matches!(
            summarize(ARTICLE, SummaryLength::Percentage(101)),
            Err(EngineError::InvalidParameter(_))
        ));
    }
}

#[cfg(test)]
mod analyzer_tests {
    use super::*;

    #[test]
    fn test_analysis_ranges() {
        let analysis = analyze(ARTICLE).unwrap();
        assert!(analysis.readability_score <= 100);
        assert!(analysis.reading_time_minutes >= 1);
        assert!(analysis.sentiment.score <= 10);
        assert!(!analysis.keywords.is_empty());
        assert!(analysis.keywords.len() <= 10);
    }

    #[test]
    fn test_keywords_skip_stopwords() {
        let analysis = analyze(ARTICLE).unwrap();
        for keyword in &analysis.keywords {
            assert!(
                !STOPWORDS.contains(&keyword.keyword.as_str()),
                "Stopword '{}' returned as keyword",
                keyword.keyword
            );
            assert!(keyword.keyword.chars().count() >= 4);
            assert_eq!(keyword.keyword, keyword.keyword.to_lowercase());
        }
        assert!(analysis
            .keywords
            .windows(2)
            .all(|w| w[0].frequency >= w[1].frequency));
        assert_eq!(analysis.keywords[0].keyword, "reefs");
    }

    #[test]
    fn test_sentiment_direction() {
        let upbeat = analyze("The launch was a great success and the team is happy with the progress.").unwrap();
        assert_eq!(upbeat.sentiment.label, SentimentLabel::Positive);
        assert!(upbeat.sentiment.score > 0);

        let grim = analyze("The crisis caused terrible damage and a serious loss for the region.").unwrap();
        assert_eq!(grim.sentiment.label, SentimentLabel::Negative);

        let flat = analyze("The meeting is on Tuesday in the main hall.").unwrap();
        assert_eq!(flat.sentiment.label, SentimentLabel::Neutral);
        assert_eq!(flat.sentiment.score, 0);
    }

    #[test]
    fn test_empty_text_rejected() {
        assert_eq!(analyze(""), Err(EngineError::EmptyInput));
    }
}

#[cfg(test)]
mod flashcard_tests {
    use super::*;

    #[test]
    fn test_answers_are_slices_of_summary() {
        let summary = summarize(ARTICLE, SummaryLength::Percentage(100)).unwrap();
        let cards = generate_flashcards(&summary.summary_text);

        assert!(!cards.is_empty());
        assert!(cards.len() <= 7);
        for card in &cards {
            assert!(
                summary.summary_text.contains(&card.answer),
                "Answer not found in summary: {}",
                card.answer
            );
            assert!(card.question.ends_with('?'));
        }
    }

    #[test]
    fn test_answers_are_distinct() {
        let cards = generate_flashcards(ARTICLE);
        for (i, a) in cards.iter().enumerate() {
            for b in cards.iter().skip(i + 1) {
                assert_ne!(a.answer, b.answer);
            }
        }
    }

    #[test]
    fn test_thin_text_gives_no_cards() {
        assert!(generate_flashcards("Too short. Tiny.").is_empty());
        assert!(generate_flashcards("").is_empty());
    }
}

#[cfg(test)]
mod qa_tests {
    use super::*;

    fn dog_summary() -> SummaryResult {
        summarize(
            "The cat sat. The dog ran fast because it was scared. Cats are quiet.",
            SummaryLength::Short,
        )
        .unwrap()
    }

    #[test]
    fn test_why_question_finds_reason() {
        let summary = dog_summary();
        assert_eq!(summary.summary_text, "The dog ran fast because it was scared.");

        let reply = answer("Why did the dog run?", &summary);
        assert!(reply.contains("because it was scared"), "Got: {}", reply);
    }

    #[test]
    fn test_topic_question_cites_source() {
        let summary = summarize(ARTICLE, SummaryLength::Medium)
            .unwrap()
            .with_source_label("https://example.com/reefs");
        let reply = answer("What is this about?", &summary);
        assert!(reply.starts_with("Coral reefs cover a tiny fraction of the ocean floor."));
        assert!(reply.ends_with("(Source: https://example.com/reefs)"));
    }

    #[test]
    fn test_length_question_reports_counts() {
        let summary = dog_summary();
        let reply = answer("How long is the summary?", &summary);
        assert_eq!(classify_question("How long is the summary?"), QuestionCategory::Length);
        assert!(reply.contains(&summary.source_text.chars().count().to_string()));
        assert!(reply.contains(&summary.summary_text.chars().count().to_string()));
    }

    #[test]
    fn test_answer_is_never_empty() {
        let summary = summarize(ARTICLE, SummaryLength::Long).unwrap();
        for question in [
            "Who studies the reefs?",
            "When did bleaching start?",
            "How do reefs survive?",
            "Explain bleaching",
            "zzz",
        ] {
            assert!(!answer(question, &summary).is_empty(), "Empty answer for '{}'", question);
        }
    }
}
