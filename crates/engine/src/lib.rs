//! Answer engine integration crate for docqa.
//!
//! This crate provides a provider-agnostic abstraction over extractive
//! question-answering engines: given a question and a context passage, an
//! engine returns the answer span it found and a confidence score in [0, 1].
//!
//! # Providers
//! - **lexical**: Local, deterministic sentence-overlap engine (default)
//! - **huggingface** / **http**: Hosted or self-hosted extractive QA models
//!
//! # Example
//! ```no_run
//! use docqa_engine::{AnswerEngine, AnswerRequest, providers::LexicalEngine};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = LexicalEngine::new();
//! let request = AnswerRequest::new("Where was he born?", "He was born in Honolulu.");
//! let candidate = engine.answer(&request).await?;
//! println!("{} ({:.2})", candidate.answer, candidate.score);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{AnswerEngine, AnswerRequest, CandidateAnswer};
pub use factory::{create_engine, EngineOptions};
pub use providers::{HttpAnswerEngine, LexicalEngine};
