//! Surface Events
//!
//! Events sent from UI surfaces to the Conductor.
//!
//! Surfaces are "dumb" renderers that forward user actions. They report
//! what happened; the Conductor decides what it means.

use serde::{Deserialize, Serialize};

use crate::tone::Tone;

/// Events from UI Surface to Conductor
///
/// The Conductor responds with [`ConductorMessage`](crate::ConductorMessage)s.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    // ============================================
    // Connection Events
    // ============================================
    /// Surface connected to Conductor
    Connected {
        /// Surface type identifier
        surface_type: SurfaceType,
    },

    // ============================================
    // User Input Events
    // ============================================
    /// The editor content changed
    ///
    /// Carries the whole buffer, not a delta.
    InputChanged {
        /// Proposed buffer content
        text: String,
    },

    /// User picked a tone
    ToneSelected {
        /// The chosen tone
        tone: Tone,
    },

    /// User asked for a correction
    SubmitRequested,

    /// User asked to reset the editor
    ClearRequested,

    /// Surface finished a clipboard copy of the result
    CopyCompleted {
        /// Whether the copy succeeded
        ok: bool,
    },

    // ============================================
    // Lifecycle Events
    // ============================================
    /// User requested quit
    QuitRequested,
}

impl SurfaceEvent {
    /// Short name for logging
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "Connected",
            Self::InputChanged { .. } => "InputChanged",
            Self::ToneSelected { .. } => "ToneSelected",
            Self::SubmitRequested => "SubmitRequested",
            Self::ClearRequested => "ClearRequested",
            Self::CopyCompleted { .. } => "CopyCompleted",
            Self::QuitRequested => "QuitRequested",
        }
    }
}

/// Type of UI surface
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceType {
    /// Terminal UI (ratatui/crossterm)
    Tui,
    /// Headless (for testing/automation)
    Headless,
    /// Custom surface type
    Custom(String),
}

impl SurfaceType {
    /// Human-readable name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Tui => "Terminal",
            Self::Headless => "Headless",
            Self::Custom(name) => name,
        }
    }
}
