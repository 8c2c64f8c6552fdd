//! Conductor Messages
//!
//! Messages sent from the Conductor to UI surfaces.
//!
//! # Design Philosophy
//!
//! The Conductor owns every piece of state. Surfaces are pure renderers that
//! display what the Conductor tells them to, which keeps the terminal UI
//! thin and lets tests drive the whole lifecycle headless.

use serde::{Deserialize, Serialize};

use crate::status::LifecycleStatus;
use crate::tone::Tone;

/// Messages from Conductor to UI Surface
///
/// The UI should not have any business logic - just render what it's told.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConductorMessage {
    // ============================================
    // Editor State
    // ============================================
    /// Current input buffer
    Input {
        /// Buffer content
        text: String,
        /// Maximum allowed length in UTF-16 code units
        max_len: usize,
    },

    /// Currently selected tone
    Tone {
        /// The tone
        tone: Tone,
    },

    /// Lifecycle status changed
    Status {
        /// The new status
        status: LifecycleStatus,
    },

    /// Move keyboard focus to the input editor
    FocusInput,

    // ============================================
    // System Messages
    // ============================================
    /// System notification
    Notify {
        /// Notification level
        level: NotifyLevel,
        /// Message content
        message: String,
    },

    /// Session information
    SessionInfo {
        /// Model being used
        model: String,
        /// Environment name
        environment: String,
        /// Application version
        version: String,
    },

    /// Request surface to quit
    Quit {
        /// Optional goodbye message
        message: Option<String>,
    },
}

/// Notification levels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyLevel {
    /// Informational
    Info,
    /// Warning
    Warning,
    /// Error
    Error,
    /// Success
    Success,
}

impl NotifyLevel {
    /// Short label for status lines
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Success => "ok",
        }
    }
}
