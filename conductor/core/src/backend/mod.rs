//! LLM Backend Integration
//!
//! This module provides abstracted access to text-generation backends
//! through a common trait interface.
//!
//! # Available Backends
//!
//! - **Gemini**: Google Generative Language API (default)
//!
//! # Usage
//!
//! ```ignore
//! use clarify_conductor::backend::{GeminiBackend, LlmBackend, LlmRequest};
//!
//! let backend = GeminiBackend::from_config(&config)?;
//! let request = LlmRequest::new("i has a apple", "gemini-3-flash-preview")
//!     .with_temperature(0.3);
//! let response = backend.send(&request).await?;
//! ```

mod gemini;
mod traits;

pub use gemini::{GeminiBackend, DEFAULT_BASE_URL};
pub use traits::{BackendError, LlmBackend, LlmRequest, LlmResponse};
