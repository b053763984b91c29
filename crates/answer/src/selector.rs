//! Chunked best-answer selection.
//!
//! Long contexts exceed what an extractive engine accepts in one call, so the
//! context is cut into fixed-size chunks and the engine is asked the same
//! question once per chunk. The highest-scoring candidate wins.

use crate::chunker::chunk_text;
use docqa_core::AppResult;
use docqa_engine::{AnswerEngine, AnswerRequest};
use serde::Serialize;
use std::num::NonZeroUsize;

/// What to do when the engine fails on one chunk or sub-question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the whole query with the engine error.
    #[default]
    Propagate,
    /// Log the error and treat that chunk or sub-question as unanswered.
    Isolate,
}

/// Winning candidate across all chunks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestAnswer {
    pub text: String,
    pub score: f64,
    /// Index of the chunk the answer came from
    pub chunk_index: usize,
}

/// Ask `question` against every chunk of `context` and keep the best answer.
///
/// Chunks are evaluated in order. The running best score starts at 0 and is
/// only replaced by a strictly greater score, so the first chunk reaching the
/// maximum wins and an all-zero run yields `None`. Empty context yields `None`
/// without calling the engine.
pub async fn select_best_answer(
    engine: &dyn AnswerEngine,
    question: &str,
    context: &str,
    chunk_size: NonZeroUsize,
    policy: FailurePolicy,
) -> AppResult<Option<BestAnswer>> {
    let chunks = chunk_text(context, chunk_size);

    tracing::debug!(
        "Selecting answer for {:?} over {} chunks (size: {})",
        question,
        chunks.len(),
        chunk_size
    );

    let mut best: Option<BestAnswer> = None;
    let mut best_score = 0.0;

    for (chunk_index, chunk) in chunks.iter().enumerate() {
        let request = AnswerRequest::new(question, chunk);

        let candidate = match engine.answer(&request).await {
            Ok(candidate) => candidate,
            Err(e) if policy == FailurePolicy::Isolate => {
                tracing::warn!("Engine failed on chunk {}: {}", chunk_index, e);
                continue;
            }
            Err(e) => return Err(e),
        };

        tracing::trace!(
            "Chunk {} scored {:.4}: {:?}",
            chunk_index,
            candidate.score,
            candidate.answer
        );

        if candidate.score > best_score {
            best_score = candidate.score;
            best = Some(BestAnswer {
                text: candidate.answer,
                score: candidate.score,
                chunk_index,
            });
        }
    }

    match &best {
        Some(answer) => tracing::debug!(
            "Best answer from chunk {} (score: {:.4})",
            answer.chunk_index,
            answer.score
        ),
        None => tracing::debug!("No chunk produced a positive score"),
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::ScriptedEngine;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[tokio::test]
    async fn test_highest_score_wins() {
        let engine = ScriptedEngine::new()
            .on_chunk("AAAA", "first", 0.2)
            .on_chunk("BBBB", "second", 0.9)
            .on_chunk("CCCC", "third", 0.5);

        let best = select_best_answer(
            &engine,
            "q?",
            "AAAABBBBCCCC",
            size(4),
            FailurePolicy::Propagate,
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(best.text, "second");
        assert_eq!(best.score, 0.9);
        assert_eq!(best.chunk_index, 1);
        assert_eq!(engine.calls(), 3);
    }

    #[tokio::test]
    async fn test_all_zero_scores_is_none() {
        let engine = ScriptedEngine::new()
            .on_chunk("AAAA", "first", 0.0)
            .on_chunk("BBBB", "second", 0.0);

        let best = select_best_answer(&engine, "q?", "AAAABBBB", size(4), FailurePolicy::Propagate)
            .await
            .unwrap();

        assert!(best.is_none());
        assert_eq!(engine.calls(), 2);
    }

    #[tokio::test]
    async fn test_ties_keep_first_chunk() {
        let engine = ScriptedEngine::new()
            .on_chunk("AAAA", "first", 0.7)
            .on_chunk("BBBB", "second", 0.7);

        let best = select_best_answer(&engine, "q?", "AAAABBBB", size(4), FailurePolicy::Propagate)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(best.text, "first");
        assert_eq!(best.chunk_index, 0);
    }

    #[tokio::test]
    async fn test_empty_context_skips_engine() {
        let engine = ScriptedEngine::new();

        let best = select_best_answer(&engine, "q?", "", size(4000), FailurePolicy::Propagate)
            .await
            .unwrap();

        assert!(best.is_none());
        assert_eq!(engine.calls(), 0);
    }

    #[tokio::test]
    async fn test_engine_failure_propagates() {
        let engine = ScriptedEngine::new()
            .on_chunk("AAAA", "first", 0.4)
            .failing_on_chunk("BBBB")
            .on_chunk("CCCC", "third", 0.9);

        let result = select_best_answer(
            &engine,
            "q?",
            "AAAABBBBCCCC",
            size(4),
            FailurePolicy::Propagate,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(engine.calls(), 2);
    }

    #[tokio::test]
    async fn test_engine_failure_isolated() {
        let engine = ScriptedEngine::new()
            .on_chunk("AAAA", "first", 0.4)
            .failing_on_chunk("BBBB")
            .on_chunk("CCCC", "third", 0.9);

        let best = select_best_answer(
            &engine,
            "q?",
            "AAAABBBBCCCC",
            size(4),
            FailurePolicy::Isolate,
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(best.text, "third");
        assert_eq!(best.chunk_index, 2);
        assert_eq!(engine.calls(), 3);
    }

    #[tokio::test]
    async fn test_each_chunk_gets_the_same_question() {
        let engine = ScriptedEngine::new();

        select_best_answer(
            &engine,
            "where?",
            "AAAABBBBCC",
            size(4),
            FailurePolicy::Propagate,
        )
        .await
        .unwrap();

        assert_eq!(
            engine.requests(),
            vec![
                ("where?".to_string(), "AAAA".to_string()),
                ("where?".to_string(), "BBBB".to_string()),
                ("where?".to_string(), "CC".to_string()),
            ]
        );
    }
}
