//! LLM Backend Traits
//!
//! Trait definitions for text-generation backends. The Correction Client
//! talks to this abstraction so the remote provider can be swapped (or
//! mocked in tests) without touching the controller.
//!
//! A backend takes one request and yields one completion or one failure.
//! There is no streaming and no retry at this layer.

use async_trait::async_trait;
use thiserror::Error;

/// Default sampling temperature when none is set
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// A single completion request
#[derive(Clone, Debug, PartialEq)]
pub struct LlmRequest {
    /// Model identifier (backend-specific)
    pub model: String,
    /// The user content to operate on
    pub content: String,
    /// System instruction steering the model
    pub system_instruction: Option<String>,
    /// Sampling temperature (0.0-2.0, lower = more deterministic)
    pub temperature: f32,
}

impl Default for LlmRequest {
    fn default() -> Self {
        Self {
            model: String::new(),
            content: String::new(),
            system_instruction: None,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl LlmRequest {
    /// Create a new request with content and model
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    /// Set system instruction
    #[must_use]
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }
}

/// Response from a completion request
#[derive(Clone, Debug, PartialEq)]
pub struct LlmResponse {
    /// The generated text, if the backend produced any
    pub text: Option<String>,
    /// Model that generated the response
    pub model: String,
    /// Round-trip time in milliseconds
    pub duration_ms: Option<u64>,
}

/// Failures raised by a backend call
#[derive(Debug, Error)]
pub enum BackendError {
    /// No API key was configured
    #[error("no API key configured for {backend}")]
    MissingApiKey {
        /// Backend name
        backend: String,
    },

    /// Transport-level failure (DNS, TLS, connection reset, timeout)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected our credentials
    #[error("backend rejected credentials ({status}): {body}")]
    Unauthorized {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Rate limit or quota exhausted
    #[error("quota exceeded: {body}")]
    QuotaExceeded {
        /// Response body
        body: String,
    },

    /// Any other non-success status
    #[error("backend returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// The backend answered with something we could not decode
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl BackendError {
    /// Map a non-success HTTP status to the matching variant
    #[must_use]
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => Self::Unauthorized { status, body },
            429 => Self::QuotaExceeded { body },
            _ => Self::Status { status, body },
        }
    }

    /// Whether trying again later could plausibly succeed
    ///
    /// Only used to enrich logs; nothing retries automatically.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::QuotaExceeded { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            Self::MissingApiKey { .. } | Self::Unauthorized { .. } | Self::MalformedResponse(_) => {
                false
            }
        }
    }
}

/// LLM Backend trait
///
/// Implement this trait to add support for a different provider.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Get the backend name (e.g., "Gemini")
    fn name(&self) -> &str;

    /// Check if the backend is reachable and accepts our credentials
    async fn health_check(&self) -> bool;

    /// Send a request and wait for the complete response
    async fn send(&self, request: &LlmRequest) -> Result<LlmResponse, BackendError>;
}
