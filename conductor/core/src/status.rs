//! Request Lifecycle
//!
//! The lifecycle of a correction request is a tagged union. Each state
//! carries only the data that is meaningful in it, so a result and an error
//! can never be active at the same time.
//!
//! ```text
//!            submit              response ok
//!   Idle ─────────────▶ Loading ─────────────▶ Success
//!    ▲                     │                      │
//!    │                     │ failure              │
//!    │                     ▼                      │
//!    └──── edit/clear ── Error ◀──────────────────┘ (edit/clear → Idle)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tone::Tone;

/// The one message the user sees when a correction fails
pub const GENERIC_ERROR_MESSAGE: &str = "Failed to refine text. Please try again later.";

/// Sequence tag identifying one submission
///
/// Issued from a monotonic counter owned by the Conductor. An outcome is
/// only applied while its tag is still the current `Loading` request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req_{}", self.0)
    }
}

/// A successful correction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionResult {
    /// Text exactly as submitted
    pub original: String,
    /// Rewritten text returned by the backend
    pub corrected: String,
    /// Tone in effect when the request was sent
    pub tone: Tone,
}

/// Where the current request stands
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleStatus {
    /// Nothing in flight, nothing to show
    #[default]
    Idle,
    /// Waiting for the backend
    Loading {
        /// The submission being waited on
        request: RequestId,
    },
    /// The last request succeeded
    Success(CorrectionResult),
    /// The last request failed
    Error {
        /// User-facing message
        message: String,
    },
}

/// Payload-free discriminant of [`LifecycleStatus`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// See [`LifecycleStatus::Idle`]
    Idle,
    /// See [`LifecycleStatus::Loading`]
    Loading,
    /// See [`LifecycleStatus::Success`]
    Success,
    /// See [`LifecycleStatus::Error`]
    Error,
}

impl StatusKind {
    /// Human-readable description
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::Loading => "Refining...",
            Self::Success => "Done",
            Self::Error => "Error",
        }
    }
}

impl LifecycleStatus {
    /// The generic failure state
    #[must_use]
    pub fn failed() -> Self {
        Self::Error {
            message: GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// Discriminant without payload
    #[must_use]
    pub fn kind(&self) -> StatusKind {
        match self {
            Self::Idle => StatusKind::Idle,
            Self::Loading { .. } => StatusKind::Loading,
            Self::Success(_) => StatusKind::Success,
            Self::Error { .. } => StatusKind::Error,
        }
    }

    /// Whether a request is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Whether the status is Success or Error
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Error { .. })
    }

    /// The in-flight request, if any
    #[must_use]
    pub fn request(&self) -> Option<RequestId> {
        match self {
            Self::Loading { request } => Some(*request),
            _ => None,
        }
    }

    /// The result, only in Success
    #[must_use]
    pub fn result(&self) -> Option<&CorrectionResult> {
        match self {
            Self::Success(result) => Some(result),
            _ => None,
        }
    }

    /// The error message, only in Error
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }
}
