// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for activity tracking.
//!
//! Events never carry query text or transcripts, only their lengths.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Where a search query came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuerySource {
    /// Typed into the search bar.
    Typed,
    /// Final transcript of a voice session.
    Voice,
    /// Command line or configured default query.
    Startup,
}

/// User-initiated actions that can be captured for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserAction {
    /// Submit a new search.
    Search {
        /// Length of the query in characters.
        query_chars: usize,
        source: QuerySource,
    },

    /// Request the next page of results.
    LoadMore,

    /// Retry the latest search.
    Refresh,

    /// Open an item in the lightbox.
    SelectItem {
        item_id: u64,
    },

    /// Close the lightbox.
    CloseLightbox,

    /// Start a voice session.
    StartListening,

    /// Stop the running voice session.
    StopListening,
}

/// Background operations and their outcomes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum AppOperation {
    /// A page request finished and was applied.
    FetchPage {
        page: u32,
        item_count: usize,
        duration_ms: u64,
    },

    /// A page request failed.
    FetchFailed {
        page: u32,
        /// i18n key of the error.
        error_key: String,
    },

    /// A response arrived for a superseded request and was dropped.
    StaleResponseDiscarded {
        epoch: u64,
    },

    /// A voice session produced a transcript.
    TranscriptReceived {
        /// Length of the transcript in characters.
        chars: usize,
    },

    /// A voice session closed.
    VoiceSessionClosed {
        session: u64,
    },
}

impl fmt::Display for AppOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchPage {
                page,
                item_count,
                duration_ms,
            } => write!(f, "page {page}: {item_count} items in {duration_ms} ms"),
            Self::FetchFailed { page, error_key } => write!(f, "page {page} failed: {error_key}"),
            Self::StaleResponseDiscarded { epoch } => {
                write!(f, "discarded response from epoch {epoch}")
            }
            Self::TranscriptReceived { chars } => write!(f, "transcript of {chars} chars"),
            Self::VoiceSessionClosed { session } => write!(f, "voice session {session} closed"),
        }
    }
}

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    /// The type and data of the event
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }

    /// Creates a new diagnostic event with a specific timestamp.
    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self { timestamp, kind }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// User-initiated action.
    UserAction {
        action: UserAction,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },

    /// Background operation.
    Operation { operation: AppOperation },

    /// Non-critical warning.
    Warning { message: String },

    /// Operation failure.
    Error { message: String },
}

impl fmt::Display for DiagnosticEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserAction { action, details } => {
                write!(f, "action {action:?}")?;
                if let Some(details) = details {
                    write!(f, " ({details})")?;
                }
                Ok(())
            }
            Self::Operation { operation } => write!(f, "operation {operation}"),
            Self::Warning { message } => write!(f, "warning {message}"),
            Self::Error { message } => write!(f, "error {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_event_new_creates_with_current_timestamp() {
        let before = Instant::now();
        let event = DiagnosticEvent::new(DiagnosticEventKind::Warning {
            message: "slow".to_string(),
        });
        let after = Instant::now();

        assert!(event.timestamp >= before);
        assert!(event.timestamp <= after);
    }

    #[test]
    fn user_action_serializes_query_length_only() {
        let kind = DiagnosticEventKind::UserAction {
            action: UserAction::Search {
                query_chars: 12,
                source: QuerySource::Voice,
            },
            details: None,
        };

        let json = serde_json::to_string(&kind).expect("serialization should succeed");
        assert!(json.contains("\"type\":\"user_action\""));
        assert!(json.contains("\"action\":\"search\""));
        assert!(json.contains("\"query_chars\":12"));
        assert!(json.contains("\"source\":\"voice\""));
    }

    #[test]
    fn operation_deserializes_from_json() {
        let json = r#"{"type":"operation","operation":{"operation":"fetch_failed","page":2,"error_key":"error-search-network"}}"#;
        let kind: DiagnosticEventKind =
            serde_json::from_str(json).expect("deserialization should succeed");

        assert_eq!(
            kind,
            DiagnosticEventKind::Operation {
                operation: AppOperation::FetchFailed {
                    page: 2,
                    error_key: "error-search-network".to_string(),
                },
            }
        );
    }

    #[test]
    fn display_is_single_line() {
        let kind = DiagnosticEventKind::Operation {
            operation: AppOperation::FetchPage {
                page: 1,
                item_count: 16,
                duration_ms: 240,
            },
        };
        assert_eq!(kind.to_string(), "operation page 1: 16 items in 240 ms");
    }
}
