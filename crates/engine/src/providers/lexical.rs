//! Local lexical answer engine.
//!
//! Picks the sentence of the context that shares the most content words with
//! the question. It needs no model or network, which makes it the offline
//! default and a predictable engine for demos.

use crate::client::{AnswerEngine, AnswerRequest, CandidateAnswer};
use docqa_core::AppResult;
use std::collections::HashSet;

/// Default cap on the length of a returned answer, in characters.
pub const DEFAULT_MAX_ANSWER_CHARS: usize = 300;

/// Words ignored when matching a question against a sentence.
const STOP_WORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "a", "an", "as", "are", "was", "were", "for", "to", "of",
    "in", "and", "or", "but", "with", "by", "from", "this", "that", "be", "have", "has", "had",
    "it", "its", "their", "they", "them", "he", "she", "his", "her", "did", "do", "does", "when",
    "where", "who", "what", "why", "how", "whom", "whose",
];

/// Sentence-overlap extractive engine.
///
/// Score is the share of the question's content words found in the chosen
/// sentence. Ties keep the earliest sentence.
#[derive(Debug, Clone)]
pub struct LexicalEngine {
    max_answer_chars: usize,
}

impl LexicalEngine {
    /// Create an engine with the default answer length cap.
    pub fn new() -> Self {
        Self::with_max_answer_chars(DEFAULT_MAX_ANSWER_CHARS)
    }

    /// Create an engine with a custom answer length cap.
    pub fn with_max_answer_chars(max_answer_chars: usize) -> Self {
        Self {
            max_answer_chars: max_answer_chars.max(1),
        }
    }

    fn extract(&self, question: &str, context: &str) -> CandidateAnswer {
        let keywords = content_words(question);
        if keywords.is_empty() {
            return CandidateAnswer::empty();
        }

        let mut best: Option<(&str, usize)> = None;
        for sentence in sentences(context) {
            let words = content_words(sentence);
            let matched = keywords.iter().filter(|k| words.contains(*k)).count();
            if matched > best.map(|(_, m)| m).unwrap_or(0) {
                best = Some((sentence, matched));
            }
        }

        match best {
            Some((sentence, matched)) => {
                let score = matched as f64 / keywords.len() as f64;
                CandidateAnswer::new(truncate_chars(sentence, self.max_answer_chars), score)
            }
            None => CandidateAnswer::empty(),
        }
    }
}

impl Default for LexicalEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AnswerEngine for LexicalEngine {
    fn provider_name(&self) -> &str {
        "lexical"
    }

    async fn answer(&self, request: &AnswerRequest<'_>) -> AppResult<CandidateAnswer> {
        Ok(self.extract(request.question, request.context))
    }
}

/// Lower-cased alphanumeric words of `text`, minus stop words.
fn content_words(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .filter(|w| !STOP_WORDS.contains(&w.as_str()))
        .collect()
}

/// Trimmed, non-empty sentences of `text`, split on terminal punctuation and newlines.
fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].trim_end().to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXT: &str = "Barack Obama was born in Honolulu, Hawaii. \
        He served as the 44th president of the United States.\n\
        Obama was born on August 4, 1961.";

    #[tokio::test]
    async fn test_picks_best_overlapping_sentence() {
        let engine = LexicalEngine::new();
        let request = AnswerRequest::new("Who served as president?", CONTEXT);
        let candidate = engine.answer(&request).await.unwrap();

        assert_eq!(
            candidate.answer,
            "He served as the 44th president of the United States."
        );
        assert_eq!(candidate.score, 1.0);
    }

    #[tokio::test]
    async fn test_first_sentence_wins_ties() {
        let engine = LexicalEngine::new();
        let request = AnswerRequest::new("When was Obama born?", CONTEXT);
        let candidate = engine.answer(&request).await.unwrap();

        // "obama" and "born" appear in both the first and last sentence
        assert_eq!(candidate.answer, "Barack Obama was born in Honolulu, Hawaii.");
        assert_eq!(candidate.score, 1.0);
    }

    #[tokio::test]
    async fn test_partial_overlap_scores_fraction() {
        let engine = LexicalEngine::new();
        let request = AnswerRequest::new("Was Obama a senator?", CONTEXT);
        let candidate = engine.answer(&request).await.unwrap();

        assert_eq!(candidate.score, 0.5);
    }

    #[tokio::test]
    async fn test_no_overlap_is_empty() {
        let engine = LexicalEngine::new();
        let request = AnswerRequest::new("Capital of France?", CONTEXT);
        let candidate = engine.answer(&request).await.unwrap();

        assert_eq!(candidate, CandidateAnswer::empty());
    }

    #[tokio::test]
    async fn test_stop_word_only_question() {
        let engine = LexicalEngine::new();
        let request = AnswerRequest::new("Who is he?", CONTEXT);
        let candidate = engine.answer(&request).await.unwrap();

        assert_eq!(candidate.score, 0.0);
    }

    #[test]
    fn test_truncate_chars_respects_utf8() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("short", 50), "short");
    }

    #[test]
    fn test_sentences_split() {
        let parts: Vec<&str> = sentences("One. Two!\nThree? ").collect();
        assert_eq!(parts, vec!["One.", "Two!", "Three?"]);
    }
}
