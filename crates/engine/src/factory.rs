//! Answer engine factory.
//!
//! Builds the engine named by the configuration once at startup; the
//! returned handle is shared for the rest of the process.

use crate::client::AnswerEngine;
use crate::providers::{lexical::DEFAULT_MAX_ANSWER_CHARS, HttpAnswerEngine, LexicalEngine};
use docqa_core::{AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;

/// Provider-independent engine construction options.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Model identifier (HTTP engines)
    pub model: String,

    /// Endpoint override (HTTP engines)
    pub endpoint: Option<String>,

    /// API key (HTTP engines)
    pub api_key: Option<String>,

    /// Per-request timeout (HTTP engines)
    pub timeout: Option<Duration>,

    /// Answer length cap (lexical engine)
    pub max_answer_chars: Option<usize>,
}

/// Create an answer engine based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("lexical", "huggingface", "http")
/// * `options` - Model, endpoint, credentials and limits
///
/// # Errors
/// Returns error if:
/// - Provider is unknown
/// - The `http` provider has no endpoint
/// - The HTTP client cannot be built
pub fn create_engine(provider: &str, options: &EngineOptions) -> AppResult<Arc<dyn AnswerEngine>> {
    match provider.to_lowercase().as_str() {
        "lexical" => {
            let max_chars = options.max_answer_chars.unwrap_or(DEFAULT_MAX_ANSWER_CHARS);
            Ok(Arc::new(LexicalEngine::with_max_answer_chars(max_chars)))
        }
        "huggingface" | "hf" => {
            let engine = HttpAnswerEngine::huggingface(
                options.endpoint.as_deref(),
                &options.model,
                options.api_key.as_deref(),
                options.timeout,
            )?;
            Ok(Arc::new(engine))
        }
        "http" => {
            let url = options.endpoint.as_deref().ok_or_else(|| {
                AppError::Config("The http provider requires an endpoint".to_string())
            })?;
            let engine =
                HttpAnswerEngine::with_url(url, options.api_key.as_deref(), options.timeout)?;
            Ok(Arc::new(engine))
        }
        _ => Err(AppError::Config(format!(
            "Unknown answer engine provider: '{}'. Supported providers: lexical, huggingface, http",
            provider
        ))),
    }
}
