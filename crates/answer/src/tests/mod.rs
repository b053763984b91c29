//! Shared test fixtures and cross-module scenarios.


use docqa_core::{AppError, AppResult};
use docqa_engine::{AnswerEngine, AnswerRequest, CandidateAnswer};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum Reply {
    Answer(String, f64),
    Fail,
}

/// In-memory engine with canned replies.
///
/// Lookup order: exact (question, chunk) pair, then question, then chunk.
/// Unscripted requests get an empty zero-score candidate.
#[derive(Debug, Default)]
pub(crate) struct ScriptedEngine {
    by_pair: HashMap<(String, String), Reply>,
    by_question: HashMap<String, Reply>,
    by_chunk: HashMap<String, Reply>,
    log: Mutex<Vec<(String, String)>>,
}

impl ScriptedEngine {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn on_pair(mut self, question: &str, chunk: &str, answer: &str, score: f64) -> Self {
        self.by_pair.insert(
            (question.to_string(), chunk.to_string()),
            Reply::Answer(answer.to_string(), score),
        );
        self
    }

    pub(crate) fn on_question(mut self, question: &str, answer: &str, score: f64) -> Self {
        self.by_question
            .insert(question.to_string(), Reply::Answer(answer.to_string(), score));
        self
    }

    pub(crate) fn on_chunk(mut self, chunk: &str, answer: &str, score: f64) -> Self {
        self.by_chunk
            .insert(chunk.to_string(), Reply::Answer(answer.to_string(), score));
        self
    }

    pub(crate) fn failing_on_question(mut self, question: &str) -> Self {
        self.by_question.insert(question.to_string(), Reply::Fail);
        self
    }

    pub(crate) fn failing_on_chunk(mut self, chunk: &str) -> Self {
        self.by_chunk.insert(chunk.to_string(), Reply::Fail);
        self
    }

    /// Requests seen so far, as (question, chunk) pairs.
    pub(crate) fn requests(&self) -> Vec<(String, String)> {
        self.log.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.log.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl AnswerEngine for ScriptedEngine {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn answer(&self, request: &AnswerRequest<'_>) -> AppResult<CandidateAnswer> {
        self.log
            .lock()
            .unwrap()
            .push((request.question.to_string(), request.context.to_string()));

        let reply = self
            .by_pair
            .get(&(request.question.to_string(), request.context.to_string()))
            .or_else(|| self.by_question.get(request.question))
            .or_else(|| self.by_chunk.get(request.context));

        match reply {
            Some(Reply::Answer(answer, score)) => Ok(CandidateAnswer::new(answer.clone(), *score)),
            Some(Reply::Fail) => Err(AppError::Engine(format!(
                "scripted failure for {:?}",
                request.question
            ))),
            None => Ok(CandidateAnswer::empty()),
        }
    }
}
