//! Answer engine abstraction and request/response types.

use docqa_core::AppResult;
use serde::{Deserialize, Serialize};

/// A single question/context pair sent to an engine.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AnswerRequest<'a> {
    /// The question to answer
    pub question: &'a str,

    /// The passage to extract the answer from
    pub context: &'a str,
}

impl<'a> AnswerRequest<'a> {
    /// Create a new request.
    pub fn new(question: &'a str, context: &'a str) -> Self {
        Self { question, context }
    }
}

/// Answer span proposed by an engine for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateAnswer {
    /// Extracted answer text
    pub answer: String,

    /// Confidence score in [0, 1]
    pub score: f64,

    /// Start offset of the span within the context, when the engine reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,

    /// End offset of the span within the context, when the engine reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
}

impl CandidateAnswer {
    /// Create a candidate, clamping the score into [0, 1].
    ///
    /// A NaN score is treated as 0.
    pub fn new(answer: impl Into<String>, score: f64) -> Self {
        Self {
            answer: answer.into(),
            score: clamp_score(score),
            start: None,
            end: None,
        }
    }

    /// A candidate that carries no answer.
    pub fn empty() -> Self {
        Self::new(String::new(), 0.0)
    }

    /// Attach span offsets.
    pub fn with_span(mut self, start: usize, end: usize) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }
}

pub(crate) fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// Trait for extractive question-answering engines.
///
/// Engines are stateless per call; whatever model state they hold is
/// created once when the engine is constructed.
#[async_trait::async_trait]
pub trait AnswerEngine: Send + Sync {
    /// Get the provider name (e.g., "lexical", "huggingface").
    fn provider_name(&self) -> &str;

    /// Extract an answer for the question from the request context.
    async fn answer(&self, request: &AnswerRequest<'_>) -> AppResult<CandidateAnswer>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_score_is_clamped() {
        assert_eq!(CandidateAnswer::new("a", 1.7).score, 1.0);
        assert_eq!(CandidateAnswer::new("a", -0.2).score, 0.0);
        assert_eq!(CandidateAnswer::new("a", f64::NAN).score, 0.0);
        assert_eq!(CandidateAnswer::new("a", 0.42).score, 0.42);
    }

    #[test]
    fn test_empty_candidate() {
        let empty = CandidateAnswer::empty();
        assert!(empty.answer.is_empty());
        assert_eq!(empty.score, 0.0);
    }

    #[test]
    fn test_request_serializes_fields() {
        let request = AnswerRequest::new("who?", "ctx");
        let json = serde_json::to_value(request).unwrap();
        assert_eq!(json, serde_json::json!({"question": "who?", "context": "ctx"}));
    }
}
