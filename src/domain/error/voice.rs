// SPDX-License-Identifier: MPL-2.0
//! Errors produced by voice capture sessions.

use std::fmt;

/// Failure of a voice capture session.
///
/// Voice errors are shown to the user but never touch the search state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceError {
    /// The platform refused microphone access.
    PermissionDenied,

    /// The recognizer reported an error during the session.
    Recognition(String),

    /// A session is already running; it must be stopped first.
    AlreadyActive,

    /// No speech-to-text backend is configured.
    Unavailable,

    /// The backend could not be started or controlled.
    Engine(String),
}

impl VoiceError {
    /// Returns the i18n message key for this error type.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            VoiceError::PermissionDenied => "error-voice-permission-denied",
            VoiceError::Recognition(_) => "error-voice-recognition",
            VoiceError::AlreadyActive => "error-voice-already-active",
            VoiceError::Unavailable => "error-voice-unavailable",
            VoiceError::Engine(_) => "error-voice-engine",
        }
    }
}

impl fmt::Display for VoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoiceError::PermissionDenied => write!(f, "Microphone permission is required"),
            VoiceError::Recognition(msg) => write!(f, "Speech recognition failed: {msg}"),
            VoiceError::AlreadyActive => write!(f, "A voice session is already active"),
            VoiceError::Unavailable => write!(f, "Voice recognition is not configured"),
            VoiceError::Engine(msg) => write!(f, "Failed to start voice recognition: {msg}"),
        }
    }
}

impl std::error::Error for VoiceError {}
