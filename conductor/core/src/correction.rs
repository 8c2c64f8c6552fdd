//! Correction Client
//!
//! Turns `(text, tone)` into one backend request and the backend's answer
//! into corrected text. There is no retry and no streaming here: one call,
//! one outcome.

use std::fmt::Write as _;
use std::sync::Arc;

use thiserror::Error;

use crate::backend::{BackendError, LlmBackend, LlmRequest};
use crate::tone::Tone;

/// Sampling temperature for corrections (low = faithful to the input)
pub const CORRECTION_TEMPERATURE: f32 = 0.3;

/// Why a correction produced no text
#[derive(Debug, Error)]
pub enum CorrectionError {
    /// The backend answered but returned nothing usable
    #[error("No correction generated.")]
    NoCorrection,

    /// The backend call itself failed
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Build the system instruction for a tone
///
/// Names the target tone and lists every tone's description so the model
/// sees the whole scale it is choosing from.
#[must_use]
pub fn system_instruction(tone: Tone) -> String {
    let mut prompt = format!(
        "You are an expert professional editor and proofreader.\n\
         Your task is to analyze the user's input text and correct all grammar, spelling, \
         punctuation, and phrasing errors, while adapting the tone to be \"{tone}\".\n\
         \n\
         Strict Guidelines:\n\
         1. Correct all grammar and spelling errors.\n\
         2. Adapt the tone to: {tone}.\n"
    );
    for t in Tone::ALL {
        let _ = writeln!(prompt, "   - {}: {}", t.label(), t.description());
    }
    prompt.push_str(
        "3. Preserve the original meaning and intent completely.\n\
         4. Do NOT add conversational filler (e.g., \"Here is the corrected text\").\n\
         5. Return ONLY the corrected text string.",
    );
    prompt
}

/// Sends correction requests to a backend
pub struct CorrectionClient<B: LlmBackend> {
    backend: Arc<B>,
    model: String,
}

impl<B: LlmBackend> Clone for CorrectionClient<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            model: self.model.clone(),
        }
    }
}

impl<B: LlmBackend> CorrectionClient<B> {
    /// Create a client for a backend and model
    pub fn new(backend: Arc<B>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    /// Model requests are sent to
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The backend in use
    #[must_use]
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Build the request for `text` in `tone`
    #[must_use]
    pub fn build_request(&self, text: &str, tone: Tone) -> LlmRequest {
        LlmRequest::new(text, self.model.as_str())
            .with_system_instruction(system_instruction(tone))
            .with_temperature(CORRECTION_TEMPERATURE)
    }

    /// Correct `text` in the given tone
    ///
    /// Blank input short-circuits to an empty string without touching the
    /// backend.
    ///
    /// # Errors
    ///
    /// Returns [`CorrectionError::NoCorrection`] if the backend produced no
    /// text, or [`CorrectionError::Backend`] if the call failed.
    pub async fn correct(&self, text: &str, tone: Tone) -> Result<String, CorrectionError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        tracing::debug!(%tone, length = text.chars().count(), "Processing text");

        let request = self.build_request(text, tone);
        let response = match self.backend.send(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    backend = self.backend.name(),
                    retryable = e.is_retryable(),
                    error = %e,
                    "Correction request failed"
                );
                return Err(e.into());
            }
        };

        let corrected = response
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                tracing::error!(backend = self.backend.name(), "Backend returned no text");
                CorrectionError::NoCorrection
            })?;

        tracing::debug!(duration_ms = ?response.duration_ms, "Correction successful");
        Ok(corrected.to_string())
    }
}
