// SPDX-License-Identifier: MPL-2.0
//! Voice capture domain types.
//!
//! A capture session moves `Idle -> Preparing -> Listening -> Transcribing
//! -> Idle`. `Preparing` covers the microphone permission prompt; `Error` is
//! reachable from every active state and left by starting a new session.

use crate::domain::error::VoiceError;

/// State of the voice capture state machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// No session.
    #[default]
    Idle,
    /// Waiting for the microphone permission prompt.
    Preparing,
    /// The recognizer is recording.
    Listening,
    /// Recording stopped; waiting for the final transcript.
    Transcribing,
    /// The last session failed.
    Error(VoiceError),
}

impl CaptureState {
    /// Returns true while a session is being prepared or is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            CaptureState::Preparing | CaptureState::Listening | CaptureState::Transcribing
        )
    }

    /// Returns the i18n key of the status line for this state.
    #[must_use]
    pub fn status_key(&self) -> &'static str {
        match self {
            CaptureState::Idle | CaptureState::Error(_) => "voice-status-ready",
            CaptureState::Preparing => "voice-status-initializing",
            CaptureState::Listening => "voice-status-listening",
            CaptureState::Transcribing => "voice-status-transcribing",
        }
    }
}

/// Identifier distinguishing one capture session from the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SessionId(u64);

impl SessionId {
    /// Returns the identifier following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Events emitted by a speech recognizer during one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceEvent {
    /// The recognizer started recording.
    Started,
    /// The recognizer stopped recording.
    Ended,
    /// Candidate transcripts, most confident first.
    Results(Vec<String>),
    /// The recognizer failed.
    Error(String),
    /// The event channel closed; no further events will arrive.
    Disconnected,
}

/// Outcome of the microphone permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    /// Recording is allowed.
    Granted,
    /// Recording is not allowed.
    Denied,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_running_states_are_active() {
        assert!(!CaptureState::Idle.is_active());
        assert!(CaptureState::Preparing.is_active());
        assert!(CaptureState::Listening.is_active());
        assert!(CaptureState::Transcribing.is_active());
        assert!(!CaptureState::Error(VoiceError::PermissionDenied).is_active());
    }

    #[test]
    fn status_keys() {
        assert_eq!(CaptureState::Listening.status_key(), "voice-status-listening");
        assert_eq!(
            CaptureState::Error(VoiceError::Unavailable).status_key(),
            "voice-status-ready"
        );
    }
}
