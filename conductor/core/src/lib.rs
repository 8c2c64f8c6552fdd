//! Clarify Conductor - Headless core of the Clarify text-correction assistant
//!
//! This crate holds everything Clarify does except drawing: the editor state,
//! the request lifecycle, the correction client and the backend it talks to.
//! It has no UI dependencies, so the terminal surface stays thin and the
//! whole lifecycle can be tested headless.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         UI Surface                           │
//! │                 (ratatui TUI / test harness)                 │
//! └───────────────┬───────────────────────────────▲──────────────┘
//!                 │ SurfaceEvent (up)             │ ConductorMessage (down)
//! ┌───────────────▼───────────────────────────────┴──────────────┐
//! │                        CONDUCTOR CORE                        │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │ Conductor: input buffer, tone, LifecycleStatus         │  │
//! │  │            single in-flight request (RequestId)        │  │
//! │  └───────────────────────────┬────────────────────────────┘  │
//! │  ┌───────────────────────────▼────────────────────────────┐  │
//! │  │ CorrectionClient: system instruction, temperature 0.3  │  │
//! │  └───────────────────────────┬────────────────────────────┘  │
//! │  ┌───────────────────────────▼────────────────────────────┐  │
//! │  │ LlmBackend (GeminiBackend over reqwest)                │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use clarify_conductor::{
//!     backend::GeminiBackend, config::load_config, Conductor, ConductorConfig,
//!     SurfaceEvent,
//! };
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = load_config()?;
//!     let (tx, mut rx) = mpsc::channel(100);
//!
//!     let backend = GeminiBackend::from_config(&config)?;
//!     let mut conductor = Conductor::new(backend, ConductorConfig::from(&config), tx);
//!     conductor.start().await;
//!
//!     conductor.handle_event(SurfaceEvent::InputChanged { text: "i has went".into() }).await;
//!     conductor.submit().await;
//!
//!     while let Ok(msg) = rx.try_recv() {
//!         // Render message to UI
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`backend`]: LLM backend abstraction and the Gemini client
//! - [`conductor`]: The interaction controller
//! - [`config`]: Layered configuration (defaults, TOML, env, CLI)
//! - [`correction`]: Prompt building and response handling
//! - [`events`]: Events from UI surfaces to Conductor
//! - [`history`]: Correction history record
//! - [`messages`]: Messages from Conductor to UI surfaces
//! - [`status`]: Request lifecycle types
//! - [`tone`]: Tone selection
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod conductor;
pub mod config;
pub mod correction;
pub mod events;
pub mod history;
pub mod messages;
pub mod status;
pub mod tone;

// Re-exports for convenience
pub use backend::{BackendError, GeminiBackend, LlmBackend, LlmRequest, LlmResponse};
pub use conductor::{Conductor, ConductorConfig};
pub use config::{
    default_config_path, default_log_path, load_config, load_config_from_path, ClarifyConfig,
    ClarifyToml, ConfigError, ConfigOverrides, ConfigSource, input_length, DEFAULT_MAX_INPUT_LENGTH,
};
pub use correction::{system_instruction, CorrectionClient, CorrectionError, CORRECTION_TEMPERATURE};
pub use events::{SurfaceEvent, SurfaceType};
pub use history::HistoryItem;
pub use messages::{ConductorMessage, NotifyLevel};
pub use status::{CorrectionResult, LifecycleStatus, RequestId, StatusKind, GENERIC_ERROR_MESSAGE};
pub use tone::{ParseToneError, Tone};
