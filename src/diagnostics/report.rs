// SPDX-License-Identifier: MPL-2.0
//! JSON shape of an exported session report.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DiagnosticEventKind;

/// Why a report could not be written.
#[derive(Debug)]
pub enum ExportError {
    Io(io::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot write diagnostics report: {err}"),
            Self::Serialization(err) => write!(f, "cannot encode diagnostics report: {err}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(match self {
            Self::Io(err) => err,
            Self::Serialization(err) => err,
        })
    }
}

impl From<io::Error> for ExportError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

/// Replaces `path` with `content` in one rename so readers never see a
/// half-written report.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, content)?;
    fs::rename(&staging, path).inspect_err(|_| {
        let _ = fs::remove_file(&staging);
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// RFC 3339.
    pub generated_at: String,
    pub app_version: String,
    /// RFC 3339.
    pub collection_started_at: String,
    pub collection_duration_ms: u64,
    pub event_count: usize,
    /// Events pushed out of the history before export.
    #[serde(default)]
    pub events_evicted: u64,
}

impl ReportMetadata {
    #[must_use]
    pub fn new(started_at: DateTime<Utc>, duration_ms: u64, event_count: usize) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            app_version: env!("CARGO_PKG_VERSION").to_owned(),
            collection_started_at: started_at.to_rfc3339(),
            collection_duration_ms: duration_ms,
            event_count,
            events_evicted: 0,
        }
    }

    #[must_use]
    pub fn with_evicted(mut self, evicted: u64) -> Self {
        self.events_evicted = evicted;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub cpu_cores: usize,
}

impl SystemInfo {
    #[must_use]
    pub fn collect() -> Self {
        Self {
            os: std::env::consts::OS.to_owned(),
            arch: std::env::consts::ARCH.to_owned(),
            cpu_cores: std::thread::available_parallelism().map_or(1, usize::from),
        }
    }
}

/// One event, stamped relative to the start of the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializableEvent {
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl SerializableEvent {
    #[must_use]
    pub fn new(at: Instant, session_start: Instant, kind: DiagnosticEventKind) -> Self {
        let offset = at.saturating_duration_since(session_start).as_millis();
        Self {
            timestamp_ms: u64::try_from(offset).unwrap_or(u64::MAX),
            kind,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportSummary {
    pub user_actions: usize,
    pub operations: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl ReportSummary {
    #[must_use]
    pub fn from_events(events: &[SerializableEvent]) -> Self {
        let mut summary = Self::default();
        for event in events {
            let counter = match event.kind {
                DiagnosticEventKind::UserAction { .. } => &mut summary.user_actions,
                DiagnosticEventKind::Operation { .. } => &mut summary.operations,
                DiagnosticEventKind::Warning { .. } => &mut summary.warnings,
                DiagnosticEventKind::Error { .. } => &mut summary.errors,
            };
            *counter += 1;
        }
        summary
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub metadata: ReportMetadata,
    pub system_info: SystemInfo,
    pub events: Vec<SerializableEvent>,
    pub summary: ReportSummary,
}

impl DiagnosticReport {
    #[must_use]
    pub fn new(
        metadata: ReportMetadata,
        system_info: SystemInfo,
        events: Vec<SerializableEvent>,
    ) -> Self {
        Self {
            summary: ReportSummary::from_events(&events),
            metadata,
            system_info,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    fn warning(message: &str) -> DiagnosticEventKind {
        DiagnosticEventKind::Warning {
            message: message.to_owned(),
        }
    }

    #[test]
    fn timestamps_are_offsets_from_session_start() {
        let start = Instant::now();
        let event = SerializableEvent::new(start + Duration::from_millis(1500), start, warning("x"));
        assert_eq!(event.timestamp_ms, 1500);

        let early = SerializableEvent::new(start, start + Duration::from_secs(1), warning("x"));
        assert_eq!(early.timestamp_ms, 0);
    }

    #[test]
    fn summary_tallies_each_category() {
        let now = Instant::now();
        let error = |m: &str| DiagnosticEventKind::Error { message: m.into() };
        let events = [warning("a"), error("b"), error("c")]
            .into_iter()
            .map(|kind| SerializableEvent::new(now, now, kind))
            .collect::<Vec<_>>();

        assert_eq!(
            ReportSummary::from_events(&events),
            ReportSummary {
                warnings: 1,
                errors: 2,
                ..ReportSummary::default()
            }
        );
    }

    #[test]
    fn metadata_without_eviction_field_still_parses() {
        let json = r#"{"generated_at":"a","app_version":"0.1.0","collection_started_at":"b","collection_duration_ms":3,"event_count":0}"#;
        let metadata: ReportMetadata = serde_json::from_str(json).expect("parse");
        assert_eq!(metadata.events_evicted, 0);
    }

    #[test]
    fn atomic_write_replaces_previous_report() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("report.json");
        fs::write(&path, "old").expect("seed");

        write_atomic(&path, "{\"new\":true}").expect("write");

        assert_eq!(fs::read_to_string(&path).expect("read"), "{\"new\":true}");
        assert!(!path.with_extension("json.tmp").exists());
    }
}
