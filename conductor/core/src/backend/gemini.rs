//! Gemini Backend Implementation
//!
//! LLM backend for Google's Generative Language API.
//!
//! # API
//!
//! - `POST /v1beta/models/{model}:generateContent` - single-shot completion
//! - `GET /v1beta/models/{model}` - model metadata (used as a health probe)
//!
//! Authentication uses the `x-goog-api-key` header.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::traits::{BackendError, LlmBackend, LlmRequest, LlmResponse};
use crate::config::ClarifyConfig;

/// Public endpoint of the Generative Language API
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini backend client
#[derive(Clone)]
pub struct GeminiBackend {
    /// API key sent with every request
    api_key: String,
    /// Base URL (scheme + host, no trailing slash)
    base_url: String,
    /// Model probed by `health_check`
    model: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl std::fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiBackend")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key_set", &!self.api_key.is_empty())
            .finish_non_exhaustive()
    }
}

impl GeminiBackend {
    /// Create a new Gemini backend without a request timeout
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Create from the application configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built with the
    /// configured timeout.
    pub fn from_config(config: &ClarifyConfig) -> Result<Self, BackendError> {
        let mut backend = Self::new(&config.api_key, &config.base_url, &config.model);
        if let Some(timeout) = config.request_timeout {
            backend.http_client = reqwest::Client::builder().timeout(timeout).build()?;
        }
        Ok(backend)
    }

    /// Get generate endpoint URL for a model
    fn generate_url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }

    /// Get model metadata URL
    fn model_url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}", self.base_url)
    }

    fn ensure_api_key(&self) -> Result<(), BackendError> {
        if self.api_key.trim().is_empty() {
            return Err(BackendError::MissingApiKey {
                backend: self.name().to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn health_check(&self) -> bool {
        if self.ensure_api_key().is_err() {
            return false;
        }
        match self
            .http_client
            .get(self.model_url(&self.model))
            .header(API_KEY_HEADER, &self.api_key)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "Gemini health check failed");
                false
            }
        }
    }

    async fn send(&self, request: &LlmRequest) -> Result<LlmResponse, BackendError> {
        self.ensure_api_key()?;

        let start = Instant::now();
        let body = GenerateContentRequest::from_request(request);

        let response = self
            .http_client
            .post(self.generate_url(&request.model))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            return Err(BackendError::from_status(status.as_u16(), raw));
        }

        let text = parse_response_text(&raw)?;

        Ok(LlmResponse {
            text,
            model: request.model.clone(),
            duration_ms: u64::try_from(start.elapsed().as_millis()).ok(),
        })
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_request(request: &'a LlmRequest) -> Self {
        Self {
            system_instruction: request.system_instruction.as_deref().map(|text| Content {
                role: None,
                parts: vec![Part { text }],
            }),
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.content,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Extract the completion text from a `generateContent` response body
///
/// Text parts of the first candidate are concatenated. A response with no
/// candidates or no text parts yields `None`.
fn parse_response_text(raw: &str) -> Result<Option<String>, BackendError> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(raw).map_err(|e| BackendError::MalformedResponse(e.to_string()))?;

    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect()
        })
        .unwrap_or_default();

    Ok((!text.is_empty()).then_some(text))
}
