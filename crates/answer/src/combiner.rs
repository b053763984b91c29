//! Smart answering: split, select per sub-question, recombine.

use crate::selector::{select_best_answer, BestAnswer, FailurePolicy};
use crate::splitter::CompoundQuestionSplitter;
use docqa_core::{config::DEFAULT_CHUNK_SIZE, AppResult};
use docqa_engine::AnswerEngine;
use serde::Serialize;
use std::num::NonZeroUsize;

/// Per-query answering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOptions {
    pub chunk_size: NonZeroUsize,
    pub failure_policy: FailurePolicy,
}

impl Default for AnswerOptions {
    fn default() -> Self {
        Self {
            chunk_size: NonZeroUsize::new(DEFAULT_CHUNK_SIZE).unwrap_or(NonZeroUsize::MIN),
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// Final outcome of a question.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SmartAnswer {
    /// Every sub-question was answered.
    Answer { text: String },
    /// Some sub-questions were answered; `text` joins what was found.
    Partial { text: String, missing: Vec<String> },
    NoAnswer,
}

impl SmartAnswer {
    /// Answer text, full or partial.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Answer { text } | Self::Partial { text, .. } => Some(text),
            Self::NoAnswer => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Answer { .. })
    }
}

/// A sub-question and its best answer, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubAnswer {
    pub question: String,
    pub answer: Option<BestAnswer>,
}

impl SubAnswer {
    /// Answer text, ignoring blank answers.
    fn text(&self) -> Option<&str> {
        self.answer
            .as_ref()
            .map(|a| a.text.as_str())
            .filter(|t| !t.trim().is_empty())
    }
}

/// Everything produced while answering one question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerReport {
    pub question: String,
    pub sub_answers: Vec<SubAnswer>,
    pub answer: SmartAnswer,
}

/// Answer a question, splitting compound questions first.
///
/// Sub-questions are answered one after another, each over the whole
/// context. Under [`FailurePolicy::Isolate`] an engine error on one
/// sub-question leaves only that sub-question unanswered.
pub async fn answer_question(
    engine: &dyn AnswerEngine,
    splitter: &dyn CompoundQuestionSplitter,
    question: &str,
    context: &str,
    options: AnswerOptions,
) -> AppResult<AnswerReport> {
    let sub_questions = splitter.split(question);
    let mut sub_answers = Vec::with_capacity(sub_questions.len());

    for sub_question in sub_questions {
        let result = select_best_answer(
            engine,
            &sub_question,
            context,
            options.chunk_size,
            options.failure_policy,
        )
        .await;

        let answer = match result {
            Ok(answer) => answer,
            Err(e) if options.failure_policy == FailurePolicy::Isolate => {
                tracing::warn!("Engine failed on {:?}: {}", sub_question, e);
                None
            }
            Err(e) => return Err(e),
        };

        sub_answers.push(SubAnswer {
            question: sub_question,
            answer,
        });
    }

    let answer = combine(&sub_answers);

    Ok(AnswerReport {
        question: question.to_string(),
        sub_answers,
        answer,
    })
}

/// Answer a question and return only the final outcome.
pub async fn smart_answer(
    engine: &dyn AnswerEngine,
    splitter: &dyn CompoundQuestionSplitter,
    question: &str,
    context: &str,
    options: AnswerOptions,
) -> AppResult<SmartAnswer> {
    answer_question(engine, splitter, question, context, options)
        .await
        .map(|report| report.answer)
}

/// Merge sub-answers into one outcome.
///
/// Two answers use the "<fact> in <place or time>." template; more are joined
/// with spaces. A missing answer turns the outcome into
/// [`SmartAnswer::Partial`] whatever the number of sub-answers, including the
/// more-than-two case where a bare join of the found answers would hide the
/// gap. The heuristic splitter never yields more than two sub-questions, so
/// that case only arises with a custom [`CompoundQuestionSplitter`].
pub fn combine(sub_answers: &[SubAnswer]) -> SmartAnswer {
    let present: Vec<&str> = sub_answers.iter().filter_map(SubAnswer::text).collect();

    if present.is_empty() {
        return SmartAnswer::NoAnswer;
    }

    if present.len() < sub_answers.len() {
        let missing = sub_answers
            .iter()
            .filter(|s| s.text().is_none())
            .map(|s| s.question.clone())
            .collect();
        return SmartAnswer::Partial {
            text: present.join(" "),
            missing,
        };
    }

    let text = match present.as_slice() {
        [single] => single.to_string(),
        [fact, locator] => format!("{} in {}.", capitalize(fact), locator),
        many => many.join(" "),
    };

    SmartAnswer::Answer { text }
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
