//! Conductor - The Interaction Controller
//!
//! The Conductor owns the editor state of Clarify:
//! - the input buffer and its length bound
//! - the selected tone
//! - the request lifecycle ([`LifecycleStatus`])
//! - the single in-flight correction, if any
//!
//! # Design Philosophy
//!
//! The Conductor is UI-agnostic. It doesn't know or care whether it's talking to
//! a TUI or a test harness. It communicates through:
//! - `ConductorMessage`: Commands sent TO the UI surface
//! - `SurfaceEvent`: Events received FROM the UI surface
//!
//! # Single flight
//!
//! At most one correction is outstanding. Each submission is tagged with a
//! [`RequestId`] from a monotonic counter, and an outcome is applied only if
//! its tag is still the current `Loading` request. Anything else is a stale
//! response and is dropped.

use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};

use crate::backend::LlmBackend;
use crate::config::{input_length, ClarifyConfig};
use crate::correction::{CorrectionClient, CorrectionError};
use crate::events::{SurfaceEvent, SurfaceType};
use crate::messages::{ConductorMessage, NotifyLevel};
use crate::status::{CorrectionResult, LifecycleStatus, RequestId};
use crate::tone::Tone;

/// Conductor configuration
#[derive(Clone, Debug)]
pub struct ConductorConfig {
    /// Model to request corrections from
    pub model: String,
    /// Maximum input length in UTF-16 code units
    pub max_input_length: usize,
    /// Tone selected at startup
    pub default_tone: Tone,
    /// Environment name, reported to the surface
    pub environment: String,
    /// Application version, reported to the surface
    pub version: String,
    /// Whether an API key is configured
    pub api_key_configured: bool,
}

impl Default for ConductorConfig {
    fn default() -> Self {
        Self::from(&ClarifyConfig::default())
    }
}

impl From<&ClarifyConfig> for ConductorConfig {
    fn from(config: &ClarifyConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_input_length: config.max_input_length,
            default_tone: config.default_tone,
            environment: config.environment.clone(),
            version: config.version.clone(),
            api_key_configured: config.has_api_key(),
        }
    }
}

/// Outcome of one correction, as delivered by the worker task
type Outcome = Result<String, CorrectionError>;

/// A submission waiting for its outcome
struct PendingCorrection {
    request: RequestId,
    original: String,
    tone: Tone,
    rx: oneshot::Receiver<Outcome>,
}

/// The Conductor - headless interaction controller
pub struct Conductor<B: LlmBackend> {
    /// Configuration
    config: ConductorConfig,
    /// Correction client wrapping the backend
    client: CorrectionClient<B>,
    /// Current input buffer
    input: String,
    /// Selected tone
    tone: Tone,
    /// Lifecycle status
    status: LifecycleStatus,
    /// Sequence number for the next submission
    next_request: u64,
    /// In-flight correction
    pending: Option<PendingCorrection>,
    /// Channel to send messages to UI surface
    tx: mpsc::Sender<ConductorMessage>,
    /// Connected surface info
    surface_type: Option<SurfaceType>,
}

impl<B: LlmBackend + 'static> Conductor<B> {
    /// Create a new Conductor with the given backend
    pub fn new(backend: B, config: ConductorConfig, tx: mpsc::Sender<ConductorMessage>) -> Self {
        Self::with_shared_backend(Arc::new(backend), config, tx)
    }

    /// Create a new Conductor around a backend that is shared elsewhere
    pub fn with_shared_backend(
        backend: Arc<B>,
        config: ConductorConfig,
        tx: mpsc::Sender<ConductorMessage>,
    ) -> Self {
        let client = CorrectionClient::new(backend, config.model.clone());
        Self {
            tone: config.default_tone,
            config,
            client,
            input: String::new(),
            status: LifecycleStatus::Idle,
            next_request: 1,
            pending: None,
            tx,
            surface_type: None,
        }
    }

    // ============================================
    // Accessors
    // ============================================

    /// Current input buffer
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Selected tone
    pub fn tone(&self) -> Tone {
        self.tone
    }

    /// Lifecycle status
    pub fn status(&self) -> &LifecycleStatus {
        &self.status
    }

    /// Result of the last correction (Success only)
    pub fn result(&self) -> Option<&CorrectionResult> {
        self.status.result()
    }

    /// User-facing error message (Error only)
    pub fn error_message(&self) -> Option<&str> {
        self.status.error_message()
    }

    /// Whether a correction is in flight
    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// Whether `submit` would start a request right now
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.input.trim().is_empty()
    }

    /// Maximum input length in UTF-16 code units
    pub fn max_input_length(&self) -> usize {
        self.config.max_input_length
    }

    /// Configuration in use
    pub fn config(&self) -> &ConductorConfig {
        &self.config
    }

    /// Surface that announced itself, if any
    pub fn surface_type(&self) -> Option<&SurfaceType> {
        self.surface_type.as_ref()
    }

    // ============================================
    // Lifecycle
    // ============================================

    /// Start the Conductor
    ///
    /// Checks configuration and backend health. Problems are reported to
    /// the surface as warnings; none of them stop the Conductor.
    pub async fn start(&mut self) {
        if self.config.api_key_configured {
            if !self.client.backend().health_check().await {
                tracing::warn!(
                    backend = self.client.backend().name(),
                    "Backend health check failed"
                );
                self.notify(
                    NotifyLevel::Warning,
                    "Backend not reachable - corrections may fail",
                )
                .await;
            }
        } else {
            self.notify(
                NotifyLevel::Warning,
                "No API key configured - set CLARIFY_API_KEY to enable corrections",
            )
            .await;
        }

        self.send_session_info().await;
        self.publish_state().await;
    }

    /// Handle an event from the UI surface
    pub async fn handle_event(&mut self, event: SurfaceEvent) {
        tracing::trace!(event = event.name(), "Surface event");
        match event {
            SurfaceEvent::Connected { surface_type } => {
                tracing::debug!(surface = surface_type.name(), "Surface connected");
                self.surface_type = Some(surface_type);
                self.send_session_info().await;
                self.publish_state().await;
            }

            SurfaceEvent::InputChanged { text } => {
                self.set_input(text).await;
            }

            SurfaceEvent::ToneSelected { tone } => {
                self.set_tone(tone).await;
            }

            SurfaceEvent::SubmitRequested => {
                self.begin_submit().await;
            }

            SurfaceEvent::ClearRequested => {
                self.clear().await;
            }

            SurfaceEvent::CopyCompleted { ok } => {
                if ok {
                    tracing::debug!("Result copied to clipboard");
                } else {
                    tracing::error!("Failed to copy result to clipboard");
                    self.notify(NotifyLevel::Error, "Could not copy to clipboard")
                        .await;
                }
            }

            SurfaceEvent::QuitRequested => {
                self.shutdown().await;
            }
        }
    }

    /// Replace the input buffer
    ///
    /// Text longer than the maximum is rejected silently and `false` is
    /// returned. An accepted edit in Success or Error returns to Idle; an
    /// edit during Loading abandons the in-flight request.
    pub async fn set_input(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        let length = input_length(&text);
        if length > self.config.max_input_length {
            tracing::trace!(
                length,
                max = self.config.max_input_length,
                "Rejected oversized input"
            );
            return false;
        }

        self.input = text;
        self.send(ConductorMessage::Input {
            text: self.input.clone(),
            max_len: self.config.max_input_length,
        })
        .await;

        if self.status.is_loading() {
            self.abandon_pending();
            self.set_status(LifecycleStatus::Idle).await;
        } else if self.status.is_terminal() {
            self.set_status(LifecycleStatus::Idle).await;
        }
        true
    }

    /// Select a tone
    ///
    /// Does not touch the lifecycle status: a shown result keeps the tone it
    /// was produced with.
    pub async fn set_tone(&mut self, tone: Tone) {
        self.tone = tone;
        self.send(ConductorMessage::Tone { tone }).await;
    }

    /// Empty the buffer and return to Idle from any state
    pub async fn clear(&mut self) {
        self.abandon_pending();
        self.input.clear();
        self.send(ConductorMessage::Input {
            text: String::new(),
            max_len: self.config.max_input_length,
        })
        .await;
        self.set_status(LifecycleStatus::Idle).await;
        self.send(ConductorMessage::FocusInput).await;
    }

    /// Submit the buffer and wait for the outcome
    ///
    /// No-op (returns `false`) if the buffer is blank or a request is
    /// already in flight.
    pub async fn submit(&mut self) -> bool {
        if self.begin_submit().await.is_none() {
            return false;
        }
        self.await_correction().await
    }

    /// Start a correction without waiting for it
    ///
    /// Returns the tag of the new request, or `None` if submission is not
    /// allowed right now. Call [`Self::poll_correction`] to apply the
    /// outcome once it arrives.
    pub async fn begin_submit(&mut self) -> Option<RequestId> {
        if self.is_loading() {
            tracing::debug!("Submit ignored: request already in flight");
            return None;
        }
        if self.input.trim().is_empty() {
            return None;
        }

        let request = RequestId(self.next_request);
        self.next_request += 1;

        let original = self.input.clone();
        let tone = self.tone;
        let (done_tx, done_rx) = oneshot::channel();

        let client = self.client.clone();
        let text = original.clone();
        tokio::spawn(async move {
            let outcome = client.correct(&text, tone).await;
            // Receiver gone means the request was abandoned
            let _ = done_tx.send(outcome);
        });

        tracing::debug!(%request, %tone, "Correction started");
        self.pending = Some(PendingCorrection {
            request,
            original,
            tone,
            rx: done_rx,
        });
        self.set_status(LifecycleStatus::Loading { request }).await;
        Some(request)
    }

    /// Apply a finished correction, if one is ready
    ///
    /// Returns true if the status changed.
    pub async fn poll_correction(&mut self) -> bool {
        let outcome = match self.pending.as_mut() {
            None => return false,
            Some(pending) => match pending.rx.try_recv() {
                Ok(outcome) => Some(outcome),
                Err(oneshot::error::TryRecvError::Empty) => return false,
                Err(oneshot::error::TryRecvError::Closed) => None,
            },
        };
        match self.pending.take() {
            Some(pending) => self.finish(pending, outcome).await,
            None => false,
        }
    }

    /// Wait for the in-flight correction and apply it
    async fn await_correction(&mut self) -> bool {
        let Some(mut pending) = self.pending.take() else {
            return false;
        };
        let outcome = (&mut pending.rx).await.ok();
        self.finish(pending, outcome).await
    }

    /// Apply an outcome if it belongs to the current request
    ///
    /// `None` means the worker went away without answering.
    async fn finish(&mut self, pending: PendingCorrection, outcome: Option<Outcome>) -> bool {
        if self.status.request() != Some(pending.request) {
            tracing::debug!(request = %pending.request, "Discarding stale correction");
            return false;
        }

        let status = match outcome {
            Some(Ok(corrected)) => {
                tracing::info!(request = %pending.request, "Correction succeeded");
                LifecycleStatus::Success(CorrectionResult {
                    original: pending.original,
                    corrected,
                    tone: pending.tone,
                })
            }
            Some(Err(e)) => {
                tracing::error!(request = %pending.request, error = %e, "Correction failed");
                LifecycleStatus::failed()
            }
            None => {
                tracing::error!(request = %pending.request, "Correction task ended without a result");
                LifecycleStatus::failed()
            }
        };
        self.set_status(status).await;
        true
    }

    /// Drop the in-flight request; its late outcome is never applied
    fn abandon_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::debug!(request = %pending.request, "Abandoning in-flight correction");
        }
    }

    /// Shut down the Conductor
    pub async fn shutdown(&mut self) {
        self.abandon_pending();
        self.send(ConductorMessage::Quit {
            message: Some("Goodbye!".to_string()),
        })
        .await;
    }

    // ============================================
    // Outgoing messages
    // ============================================

    /// Send the full editor state to the surface
    async fn publish_state(&self) {
        self.send(ConductorMessage::Input {
            text: self.input.clone(),
            max_len: self.config.max_input_length,
        })
        .await;
        self.send(ConductorMessage::Tone { tone: self.tone }).await;
        self.send(ConductorMessage::Status {
            status: self.status.clone(),
        })
        .await;
    }

    async fn send_session_info(&self) {
        self.send(ConductorMessage::SessionInfo {
            model: self.config.model.clone(),
            environment: self.config.environment.clone(),
            version: self.config.version.clone(),
        })
        .await;
    }

    /// Set status and notify UI
    async fn set_status(&mut self, status: LifecycleStatus) {
        tracing::debug!(from = ?self.status.kind(), to = ?status.kind(), "Status change");
        self.status = status;
        self.send(ConductorMessage::Status {
            status: self.status.clone(),
        })
        .await;
    }

    /// Send notification
    async fn notify(&self, level: NotifyLevel, message: &str) {
        self.send(ConductorMessage::Notify {
            level,
            message: message.to_string(),
        })
        .await;
    }

    /// Send a message to the UI surface
    ///
    /// Never waits: the surface drains this channel on the same task that
    /// drives the Conductor, so a full channel drops the message.
    async fn send(&self, msg: ConductorMessage) {
        match self.tx.try_send(msg) {
            Ok(()) => {}
            Err(TrySendError::Full(msg)) => {
                tracing::warn!(message = ?msg, "Surface channel full, dropping message");
            }
            Err(TrySendError::Closed(_)) => {
                tracing::warn!("Surface channel closed, dropping message");
            }
        }
    }
}
