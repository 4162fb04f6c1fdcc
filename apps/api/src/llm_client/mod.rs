//! LLM client: the single point of entry for all Gemini API calls.
//!
//! One POST per call, fixed timeout, no retries. The upstream body is returned
//! untouched so the handler can relay it byte-for-byte.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

pub mod prompts;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const RESPONSE_MIME_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("failed to build request: {0}")]
    Build(#[source] reqwest::Error),

    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
}

/// Thin wrapper over the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_base: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_base: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(LlmError::Build)?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }

    /// Sends `prompt` as the sole content part and returns the raw response body.
    /// Any non-2xx status is an error carrying the upstream body.
    pub async fn generate_content(&self, api_key: &str, prompt: &str) -> Result<Bytes, LlmError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: RESPONSE_MIME_TYPE,
            },
        };

        let request = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .header("content-type", "application/json")
            .json(&body)
            .build()
            .map_err(|e| LlmError::Build(e.without_url()))?;

        debug!(model = %self.model, prompt_len = prompt.len(), "Sending generateContent request");

        let response = self
            .client
            .execute(request)
            .await
            // The URL carries the API key; keep it out of error messages.
            .map_err(|e| LlmError::Transport(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LlmError::Body(e.without_url()))?;
        info!(model = %self.model, bytes = bytes.len(), "generateContent succeeded");
        Ok(bytes)
    }
}
