//! Document question answering.
//!
//! Extracts a text corpus from a documents folder and answers questions over
//! it with an extractive [`AnswerEngine`](docqa_engine::AnswerEngine):
//! - [`source`]: folder text extraction, built once per process
//! - [`chunker`] / [`selector`]: best answer across fixed-size chunks
//! - [`splitter`]: compound "when and where" question splitting
//! - [`combiner`]: answering sub-questions and merging their answers
//! - [`session`]: the process-scoped corpus + engine pair

pub mod chunker;
pub mod combiner;
pub mod parser;
pub mod selector;
pub mod session;
pub mod source;
pub mod splitter;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use combiner::{answer_question, smart_answer, AnswerOptions, AnswerReport, SmartAnswer, SubAnswer};
pub use selector::{select_best_answer, BestAnswer, FailurePolicy};
pub use session::{AskOutcome, QaSession};
pub use source::{extract_folder, Corpus, DocumentRecord, SkippedDocument};
pub use splitter::{split_compound, CompoundQuestionSplitter, HeuristicSplitter};
