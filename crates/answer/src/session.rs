//! Process-scoped answering session.
//!
//! The corpus and the engine are expensive to build and never change while
//! the process runs. A [`QaSession`] builds both once and every question is
//! answered against it.

use crate::combiner::{answer_question, AnswerOptions, AnswerReport};
use crate::selector::FailurePolicy;
use crate::source::{extract_folder, Corpus};
use crate::splitter::{CompoundQuestionSplitter, HeuristicSplitter};
use docqa_core::{AppConfig, AppResult};
use docqa_engine::{create_engine, AnswerEngine, EngineOptions};
use std::sync::Arc;
use std::time::Duration;

/// Result of submitting a question to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum AskOutcome {
    /// The question was empty or whitespace; nothing was asked.
    EmptyQuestion,
    Answered(AnswerReport),
}

/// Corpus, engine and splitter shared by all questions.
pub struct QaSession {
    corpus: Corpus,
    engine: Arc<dyn AnswerEngine>,
    splitter: Box<dyn CompoundQuestionSplitter>,
    options: AnswerOptions,
}

impl QaSession {
    /// Create a session from already-built parts, using the heuristic splitter.
    pub fn new(corpus: Corpus, engine: Arc<dyn AnswerEngine>, options: AnswerOptions) -> Self {
        Self {
            corpus,
            engine,
            splitter: Box::new(HeuristicSplitter::new()),
            options,
        }
    }

    /// Replace the compound question splitter.
    pub fn with_splitter(mut self, splitter: Box<dyn CompoundQuestionSplitter>) -> Self {
        self.splitter = splitter;
        self
    }

    /// Extract the documents folder and build the engine named by `config`.
    pub fn initialize(config: &AppConfig) -> AppResult<Self> {
        config.validate()?;

        let corpus = extract_folder(&config.docs_path())?;
        if corpus.is_empty() {
            tracing::warn!(
                "No text extracted from {:?}; every question will go unanswered",
                config.docs_path()
            );
        }

        let engine = create_engine(&config.provider, &engine_options(config))?;
        tracing::info!("Answer engine ready: {}", engine.provider_name());

        Ok(Self::new(corpus, engine, answer_options(config)?))
    }

    /// Answer one question.
    ///
    /// Empty or whitespace-only questions are rejected before the engine is
    /// called.
    pub async fn ask(&self, question: &str) -> AppResult<AskOutcome> {
        if question.trim().is_empty() {
            return Ok(AskOutcome::EmptyQuestion);
        }

        let report = answer_question(
            self.engine.as_ref(),
            self.splitter.as_ref(),
            question,
            self.corpus.text(),
            self.options,
        )
        .await?;

        Ok(AskOutcome::Answered(report))
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn engine_name(&self) -> &str {
        self.engine.provider_name()
    }
}

/// Engine construction options from the application configuration.
pub fn engine_options(config: &AppConfig) -> EngineOptions {
    EngineOptions {
        model: config.model.clone(),
        endpoint: config.endpoint.clone(),
        api_key: config.resolve_api_key(),
        timeout: config.timeout_secs.map(Duration::from_secs),
        max_answer_chars: config.lexical_max_answer_chars(),
    }
}

/// Answering options from the application configuration.
pub fn answer_options(config: &AppConfig) -> AppResult<AnswerOptions> {
    Ok(AnswerOptions {
        chunk_size: config.chunk_size()?,
        failure_policy: if config.isolate_failures {
            FailurePolicy::Isolate
        } else {
            FailurePolicy::Propagate
        },
    })
}
