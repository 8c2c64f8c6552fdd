//! Tone Selection
//!
//! The closed set of stylistic registers a rewrite can target. A tone drives
//! both the surface (which toggle is lit) and the system instruction sent to
//! the backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stylistic register for a correction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    /// Formal, objective, clear
    #[default]
    Professional,
    /// Relaxed and conversational
    Casual,
    /// Brief and direct
    Concise,
    /// Warm and approachable
    Friendly,
}

impl Tone {
    /// All tones in display order
    pub const ALL: [Tone; 4] = [
        Tone::Professional,
        Tone::Casual,
        Tone::Concise,
        Tone::Friendly,
    ];

    /// Label shown on the tone toggle
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Professional => "Professional",
            Self::Casual => "Casual",
            Self::Concise => "Concise",
            Self::Friendly => "Friendly",
        }
    }

    /// Description fragment embedded in the system instruction
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Professional => "Formal, objective, clear.",
            Self::Casual => "Relaxed, conversational, friendly but correct.",
            Self::Concise => "Brief, direct, remove formatting/fluff.",
            Self::Friendly => "Warm, approachable, empathetic.",
        }
    }

    /// Position of this tone in [`Tone::ALL`]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Professional => 0,
            Self::Casual => 1,
            Self::Concise => 2,
            Self::Friendly => 3,
        }
    }

    /// The tone after this one, wrapping around
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The tone before this one, wrapping around
    #[must_use]
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string names no known tone
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown tone '{0}' (expected one of: Professional, Casual, Concise, Friendly)")]
pub struct ParseToneError(pub String);

impl FromStr for Tone {
    type Err = ParseToneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|tone| tone.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseToneError(wanted.to_string()))
    }
}
