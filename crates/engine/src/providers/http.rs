//! HTTP extractive question-answering provider.
//!
//! Speaks the Hugging Face inference "question-answering" task format, which
//! is also served by most self-hosted extractive QA servers:
//!
//! ```text
//! POST {url}
//! {"inputs": {"question": "...", "context": "..."}}
//! -> {"answer": "...", "score": 0.97, "start": 12, "end": 20}
//! ```

use crate::client::{AnswerEngine, AnswerRequest, CandidateAnswer};
use docqa_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Hugging Face inference endpoint.
pub const HUGGINGFACE_ENDPOINT: &str = "https://api-inference.huggingface.co";

/// Inference API request format.
#[derive(Debug, Serialize)]
struct QaRequest<'a> {
    inputs: QaInputs<'a>,
}

#[derive(Debug, Serialize)]
struct QaInputs<'a> {
    question: &'a str,
    context: &'a str,
}

/// Inference API response format. Some servers wrap the answer in a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QaResponse {
    Single(QaAnswer),
    List(Vec<QaAnswer>),
}

#[derive(Debug, Deserialize)]
struct QaAnswer {
    answer: String,
    score: f64,
    #[serde(default)]
    start: Option<usize>,
    #[serde(default)]
    end: Option<usize>,
}

/// Extractive QA engine backed by an HTTP inference server.
pub struct HttpAnswerEngine {
    /// Provider name reported in logs
    provider: String,

    /// Full inference URL
    url: String,

    /// Bearer token, if the server needs one
    api_key: Option<String>,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpAnswerEngine {
    /// Create an engine for a model hosted on the Hugging Face inference API.
    ///
    /// The request URL is `{endpoint}/models/{model}`.
    pub fn huggingface(
        endpoint: Option<&str>,
        model: &str,
        api_key: Option<&str>,
        timeout: Option<Duration>,
    ) -> AppResult<Self> {
        let base = endpoint.unwrap_or(HUGGINGFACE_ENDPOINT).trim_end_matches('/');
        let url = format!("{}/models/{}", base, model);
        Self::build("huggingface", url, api_key, timeout)
    }

    /// Create an engine that posts directly to an inference URL.
    pub fn with_url(
        url: impl Into<String>,
        api_key: Option<&str>,
        timeout: Option<Duration>,
    ) -> AppResult<Self> {
        Self::build("http", url.into(), api_key, timeout)
    }

    fn build(
        provider: &str,
        url: String,
        api_key: Option<&str>,
        timeout: Option<Duration>,
    ) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Engine(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            provider: provider.to_string(),
            url,
            api_key: api_key.map(str::to_string),
            client,
        })
    }

    /// The URL requests are sent to.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn to_qa_request<'a>(request: &AnswerRequest<'a>) -> QaRequest<'a> {
        QaRequest {
            inputs: QaInputs {
                question: request.question,
                context: request.context,
            },
        }
    }

    fn convert_response(response: QaResponse) -> CandidateAnswer {
        let answer = match response {
            QaResponse::Single(answer) => Some(answer),
            QaResponse::List(answers) => answers.into_iter().next(),
        };

        match answer {
            Some(a) => {
                let candidate = CandidateAnswer::new(a.answer.trim(), a.score);
                match (a.start, a.end) {
                    (Some(start), Some(end)) => candidate.with_span(start, end),
                    _ => candidate,
                }
            }
            None => CandidateAnswer::empty(),
        }
    }
}

#[async_trait::async_trait]
impl AnswerEngine for HttpAnswerEngine {
    fn provider_name(&self) -> &str {
        &self.provider
    }

    async fn answer(&self, request: &AnswerRequest<'_>) -> AppResult<CandidateAnswer> {
        tracing::debug!(
            "Sending question to {} ({} context bytes)",
            self.url,
            request.context.len()
        );

        let mut http_request = self.client.post(&self.url).json(&Self::to_qa_request(request));
        if let Some(ref key) = self.api_key {
            http_request = http_request.bearer_auth(key);
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| AppError::Engine(format!("Failed to reach {}: {}", self.url, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Engine(format!(
                "Inference API error ({}): {}",
                status, error_text
            )));
        }

        let qa_response: QaResponse = response
            .json()
            .await
            .map_err(|e| AppError::Engine(format!("Failed to parse inference response: {}", e)))?;

        tracing::debug!("Inference response: {:?}", qa_response);

        Ok(Self::convert_response(qa_response))
    }
}
