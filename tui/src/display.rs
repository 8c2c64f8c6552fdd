//! Display State Types
//!
//! Types that represent the current display state for the TUI.
//! These are derived from ConductorMessages and used for rendering.
//!
//! # Design Philosophy
//!
//! The TUI is a "thin client" - it just renders what the Conductor tells it to.
//! Display state is the bridge between ConductorMessages and rendering. The
//! only state it owns itself is presentation timing: how long a notification
//! stays up and how long the "Copied" badge is shown.

use std::time::Duration;

use clarify_conductor::{
    input_length, ConductorMessage, CorrectionResult, LifecycleStatus, NotifyLevel, Tone,
    DEFAULT_MAX_INPUT_LENGTH,
};

/// How long a notification stays on screen
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(4);

/// How long the "Copied" badge stays on screen
pub const COPIED_DURATION: Duration = Duration::from_secs(2);

/// Counter turns amber above this share of the limit
const NEAR_LIMIT_RATIO: f64 = 0.9;

/// Session details reported by the Conductor
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionInfo {
    /// Model being used
    pub model: String,
    /// Environment name
    pub environment: String,
    /// Application version
    pub version: String,
}

/// A notification to display
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayNotification {
    /// Notification level
    pub level: NotifyLevel,
    /// Message content
    pub message: String,
    /// Time left on screen
    pub remaining: Duration,
}

/// The full display state for the TUI
#[derive(Debug)]
pub struct DisplayState {
    /// Editor buffer as last published
    pub input: String,
    /// Maximum input length in UTF-16 code units
    pub max_len: usize,
    /// Selected tone
    pub tone: Tone,
    /// Lifecycle status
    pub status: LifecycleStatus,
    /// Session info, once received
    pub session: Option<SessionInfo>,
    /// Pending notification (if any)
    pub notification: Option<DisplayNotification>,
    /// Time left on the "Copied" badge
    copied_remaining: Option<Duration>,
    /// Set when the Conductor asks for editor focus
    focus_requested: bool,
    /// Set once the Conductor asks the surface to quit
    pub quit: bool,
    /// Goodbye message sent with the quit request
    pub goodbye: Option<String>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            input: String::new(),
            max_len: DEFAULT_MAX_INPUT_LENGTH,
            tone: Tone::default(),
            status: LifecycleStatus::Idle,
            session: None,
            notification: None,
            copied_remaining: None,
            focus_requested: false,
            quit: false,
            goodbye: None,
        }
    }
}

impl DisplayState {
    /// Create a new display state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a ConductorMessage to update display state
    pub fn apply_message(&mut self, msg: ConductorMessage) {
        match msg {
            ConductorMessage::Input { text, max_len } => {
                self.input = text;
                self.max_len = max_len;
            }
            ConductorMessage::Tone { tone } => {
                self.tone = tone;
            }
            ConductorMessage::Status { status } => {
                // A new result (or leaving Success) drops the old badge
                if !matches!(status, LifecycleStatus::Success(_)) || self.status != status {
                    self.copied_remaining = None;
                }
                self.status = status;
            }
            ConductorMessage::FocusInput => {
                self.focus_requested = true;
            }
            ConductorMessage::Notify { level, message } => {
                self.notification = Some(DisplayNotification {
                    level,
                    message,
                    remaining: NOTIFICATION_DURATION,
                });
            }
            ConductorMessage::SessionInfo {
                model,
                environment,
                version,
            } => {
                self.session = Some(SessionInfo {
                    model,
                    environment,
                    version,
                });
            }
            ConductorMessage::Quit { message } => {
                self.quit = true;
                self.goodbye = message;
            }
        }
    }

    /// Advance timers by `delta`
    pub fn update(&mut self, delta: Duration) {
        if let Some(notification) = self.notification.as_mut() {
            notification.remaining = notification.remaining.saturating_sub(delta);
            if notification.remaining.is_zero() {
                self.notification = None;
            }
        }

        if let Some(remaining) = self.copied_remaining {
            let remaining = remaining.saturating_sub(delta);
            self.copied_remaining = (!remaining.is_zero()).then_some(remaining);
        }
    }

    /// Start the "Copied" badge
    pub fn mark_copied(&mut self) {
        self.copied_remaining = Some(COPIED_DURATION);
    }

    /// Whether the "Copied" badge is showing
    pub fn is_copied(&self) -> bool {
        self.copied_remaining.is_some()
    }

    /// Consume a pending focus request
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    /// Buffer length as the input bound counts it
    pub fn char_count(&self) -> usize {
        input_length(&self.input)
    }

    /// Whether the counter should warn
    pub fn near_limit(&self) -> bool {
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.char_count() as f64 / self.max_len.max(1) as f64;
        ratio > NEAR_LIMIT_RATIO
    }

    /// Whether a submit would start a request
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.input.trim().is_empty()
    }

    /// Whether a correction is in flight
    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// Result of the last correction, if shown
    pub fn result(&self) -> Option<&CorrectionResult> {
        self.status.result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clarify_conductor::RequestId;
    use pretty_assertions::assert_eq;

    fn success(corrected: &str) -> LifecycleStatus {
        LifecycleStatus::Success(CorrectionResult {
            original: "i has went".to_string(),
            corrected: corrected.to_string(),
            tone: Tone::Professional,
        })
    }

    #[test]
    fn test_default_state() {
        let state = DisplayState::new();
        assert_eq!(state.input, "");
        assert_eq!(state.max_len, 1000);
        assert_eq!(state.tone, Tone::Professional);
        assert_eq!(state.status, LifecycleStatus::Idle);
        assert!(!state.can_submit());
        assert!(!state.quit);
    }

    #[test]
    fn test_apply_input_and_tone() {
        let mut state = DisplayState::new();
        state.apply_message(ConductorMessage::Input {
            text: "hello".to_string(),
            max_len: 10,
        });
        state.apply_message(ConductorMessage::Tone { tone: Tone::Casual });

        assert_eq!(state.input, "hello");
        assert_eq!(state.max_len, 10);
        assert_eq!(state.tone, Tone::Casual);
        assert_eq!(state.char_count(), 5);
        assert!(state.can_submit());
    }

    #[test]
    fn test_loading_blocks_submit() {
        let mut state = DisplayState::new();
        state.apply_message(ConductorMessage::Input {
            text: "text".to_string(),
            max_len: 1000,
        });
        state.apply_message(ConductorMessage::Status {
            status: LifecycleStatus::Loading {
                request: RequestId(1),
            },
        });
        assert!(state.is_loading());
        assert!(!state.can_submit());
    }

    #[test]
    fn test_near_limit_threshold() {
        let mut state = DisplayState::new();
        state.apply_message(ConductorMessage::Input {
            text: "a".repeat(90),
            max_len: 100,
        });
        assert!(!state.near_limit());

        state.apply_message(ConductorMessage::Input {
            text: "a".repeat(91),
            max_len: 100,
        });
        assert!(state.near_limit());
    }

    #[test]
    fn test_char_count_counts_utf16_units() {
        let mut state = DisplayState::new();
        state.apply_message(ConductorMessage::Input {
            text: "héllo wörld".to_string(),
            max_len: 1000,
        });
        assert_eq!(state.char_count(), 11);

        // Emoji outside the BMP take two units each
        state.apply_message(ConductorMessage::Input {
            text: "ok 😀😀".to_string(),
            max_len: 1000,
        });
        assert_eq!(state.char_count(), 7);
    }

    #[test]
    fn test_notification_expires() {
        let mut state = DisplayState::new();
        state.apply_message(ConductorMessage::Notify {
            level: NotifyLevel::Warning,
            message: "No API key".to_string(),
        });
        assert!(state.notification.is_some());

        state.update(Duration::from_secs(3));
        assert!(state.notification.is_some());
        state.update(Duration::from_secs(1));
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_copied_badge_expires() {
        let mut state = DisplayState::new();
        state.apply_message(ConductorMessage::Status {
            status: success("I went."),
        });
        state.mark_copied();
        assert!(state.is_copied());

        state.update(Duration::from_millis(1500));
        assert!(state.is_copied());
        state.update(Duration::from_millis(500));
        assert!(!state.is_copied());
    }

    #[test]
    fn test_copied_badge_cleared_by_status_change() {
        let mut state = DisplayState::new();
        state.apply_message(ConductorMessage::Status {
            status: success("I went."),
        });
        state.mark_copied();

        // Same result republished keeps the badge
        state.apply_message(ConductorMessage::Status {
            status: success("I went."),
        });
        assert!(state.is_copied());

        state.apply_message(ConductorMessage::Status {
            status: LifecycleStatus::Idle,
        });
        assert!(!state.is_copied());
    }

    #[test]
    fn test_focus_request_is_consumed() {
        let mut state = DisplayState::new();
        state.apply_message(ConductorMessage::FocusInput);
        assert!(state.take_focus_request());
        assert!(!state.take_focus_request());
    }

    #[test]
    fn test_session_info_and_quit() {
        let mut state = DisplayState::new();
        state.apply_message(ConductorMessage::SessionInfo {
            model: "gemini-test".to_string(),
            environment: "development".to_string(),
            version: "1.3.0".to_string(),
        });
        state.apply_message(ConductorMessage::Quit {
            message: Some("Goodbye!".to_string()),
        });

        assert_eq!(
            state.session.as_ref().map(|s| s.model.as_str()),
            Some("gemini-test")
        );
        assert!(state.quit);
        assert_eq!(state.goodbye.as_deref(), Some("Goodbye!"));
    }

    #[test]
    fn test_error_status_exposes_message() {
        let mut state = DisplayState::new();
        state.apply_message(ConductorMessage::Status {
            status: LifecycleStatus::failed(),
        });
        assert_eq!(
            state.status.error_message(),
            Some("Failed to refine text. Please try again later.")
        );
        assert!(state.result().is_none());
    }
}
