//! Conductor Client
//!
//! Thin wrapper around the Conductor for TUI integration.
//! This client embeds the Conductor directly (no network) and provides
//! a convenient interface for sending events and receiving messages.
//!
//! # Architecture
//!
//! The TUI is a "thin client" - it doesn't contain any business logic.
//! All state transitions happen in the Conductor. The TUI's job is:
//! 1. Convert terminal events to SurfaceEvents
//! 2. Send SurfaceEvents to Conductor
//! 3. Receive ConductorMessages
//! 4. Render display state based on messages

use std::sync::Arc;

use tokio::sync::mpsc;

use clarify_conductor::{
    ClarifyConfig, Conductor, ConductorConfig, ConductorMessage, LifecycleStatus, LlmBackend,
    SurfaceEvent, SurfaceType, Tone,
};

/// Capacity of the Conductor -> surface channel
const CHANNEL_CAPACITY: usize = 100;

/// Client for communicating with the embedded Conductor
pub struct ConductorClient<B: LlmBackend> {
    /// The embedded Conductor instance
    conductor: Conductor<B>,
    /// Receiver for messages from Conductor
    rx: mpsc::Receiver<ConductorMessage>,
}

impl<B: LlmBackend + 'static> ConductorClient<B> {
    /// Create a client around a backend, configured from `config`
    pub fn new(backend: B, config: &ClarifyConfig) -> Self {
        Self::with_shared_backend(Arc::new(backend), ConductorConfig::from(config))
    }

    /// Create a client around a backend shared with the caller
    pub fn with_shared_backend(backend: Arc<B>, config: ConductorConfig) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let conductor = Conductor::with_shared_backend(backend, config, tx);
        Self { conductor, rx }
    }

    /// Start the Conductor (configuration and health checks)
    pub async fn start(&mut self) {
        self.conductor.start().await;
    }

    /// Connect this surface to the Conductor
    pub async fn connect(&mut self) {
        self.send_event(SurfaceEvent::Connected {
            surface_type: SurfaceType::Tui,
        })
        .await;
    }

    /// Send a surface event to the Conductor
    pub async fn send_event(&mut self, event: SurfaceEvent) {
        self.conductor.handle_event(event).await;
    }

    /// Apply a finished correction (must be called regularly)
    pub async fn poll_correction(&mut self) -> bool {
        self.conductor.poll_correction().await
    }

    /// Receive all pending messages from the Conductor (non-blocking)
    pub fn recv_all(&mut self) -> Vec<ConductorMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Current lifecycle status
    pub fn status(&self) -> &LifecycleStatus {
        self.conductor.status()
    }

    /// Current input buffer
    pub fn input(&self) -> &str {
        self.conductor.input()
    }

    /// Selected tone
    pub fn tone(&self) -> Tone {
        self.conductor.tone()
    }
}
