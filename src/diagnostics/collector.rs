// SPDX-License-Identifier: MPL-2.0
//! Event intake for the session report.
//!
//! Update handlers hold a [`DiagnosticsHandle`] and fire events into a
//! bounded channel. The [`DiagnosticsCollector`] is owned by the app and
//! drains that channel on every diagnostics tick.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use super::report::{write_atomic, ExportError};
use super::{
    AppOperation, BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind,
    DiagnosticReport, ReportMetadata, SerializableEvent, SystemInfo, UserAction,
};

/// Events a handle may queue before the collector drains them.
const PENDING_LIMIT: usize = 100;

/// Cloneable sender side. Every method is fire-and-forget: a full queue
/// drops the event instead of stalling the UI thread.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    pub fn log_action(&self, action: UserAction) {
        self.log_action_with_details(action, None);
    }

    pub fn log_action_with_details(&self, action: UserAction, details: Option<String>) {
        self.fire(DiagnosticEventKind::UserAction { action, details });
    }

    pub fn log_operation(&self, operation: AppOperation) {
        self.fire(DiagnosticEventKind::Operation { operation });
    }

    pub fn log_warning(&self, message: impl Into<String>) {
        self.fire(DiagnosticEventKind::Warning {
            message: message.into(),
        });
    }

    pub fn log_error(&self, message: impl Into<String>) {
        self.fire(DiagnosticEventKind::Error {
            message: message.into(),
        });
    }

    /// Queues `action`, reporting a full or closed queue to the caller.
    ///
    /// # Errors
    ///
    /// `TrySendError::Full` when [`PENDING_LIMIT`] events are waiting,
    /// `TrySendError::Disconnected` once the collector is gone.
    pub fn try_log_action(&self, action: UserAction) -> Result<(), TrySendError<DiagnosticEvent>> {
        self.tx
            .try_send(DiagnosticEvent::new(DiagnosticEventKind::UserAction {
                action,
                details: None,
            }))
    }

    fn fire(&self, kind: DiagnosticEventKind) {
        let _ = self.tx.try_send(DiagnosticEvent::new(kind));
    }
}

/// Owns the event history of one app session.
pub struct DiagnosticsCollector {
    history: CircularBuffer<DiagnosticEvent>,
    rx: Receiver<DiagnosticEvent>,
    tx: Sender<DiagnosticEvent>,
    started: Instant,
    started_utc: DateTime<Utc>,
    verbose: bool,
}

impl std::fmt::Debug for DiagnosticsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsCollector")
            .field("events", &self.history.len())
            .field("evicted", &self.history.evicted())
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (tx, rx) = bounded(PENDING_LIMIT);
        Self {
            history: CircularBuffer::new(capacity),
            rx,
            tx,
            started: Instant::now(),
            started_utc: Utc::now(),
            verbose: false,
        }
    }

    /// Echo recorded warnings and errors to stderr (`--verbose`).
    #[must_use]
    pub fn with_verbose(self, verbose: bool) -> Self {
        Self { verbose, ..self }
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            tx: self.tx.clone(),
        }
    }

    /// Moves every queued event into the history.
    pub fn process_pending(&mut self) {
        let queued: Vec<_> = self.rx.try_iter().collect();
        for event in queued {
            self.record(event);
        }
    }

    pub fn log_action(&mut self, action: UserAction) {
        self.record(DiagnosticEvent::new(DiagnosticEventKind::UserAction {
            action,
            details: None,
        }));
    }

    pub fn log_operation(&mut self, operation: AppOperation) {
        self.record(DiagnosticEvent::new(DiagnosticEventKind::Operation {
            operation,
        }));
    }

    fn record(&mut self, event: DiagnosticEvent) {
        let notable = matches!(
            event.kind,
            DiagnosticEventKind::Warning { .. } | DiagnosticEventKind::Error { .. }
        );
        if self.verbose && notable {
            let at = event.timestamp.saturating_duration_since(self.started);
            eprintln!("[voice_lens +{:>7.3}s] {}", at.as_secs_f64(), event.kind);
        }
        self.history.push(event);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.history.iter()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Renders the session report as pretty JSON.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.report())
    }

    /// Writes the report to `path` through a temporary sibling file.
    ///
    /// # Errors
    ///
    /// See [`ExportError`].
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let path = path.as_ref();
        write_atomic(path, &self.export_json()?)?;
        Ok(path.to_path_buf())
    }

    fn report(&self) -> DiagnosticReport {
        let events: Vec<SerializableEvent> = self
            .history
            .iter()
            .map(|event| SerializableEvent::new(event.timestamp, self.started, event.kind.clone()))
            .collect();

        let elapsed_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let metadata = ReportMetadata::new(self.started_utc, elapsed_ms, events.len())
            .with_evicted(self.history.evicted());

        DiagnosticReport::new(metadata, SystemInfo::collect(), events)
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::QuerySource;
    use tempfile::tempdir;

    #[test]
    fn queued_events_land_on_process_pending() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        handle.log_action(UserAction::LoadMore);
        handle.log_warning("slow response");
        assert!(collector.is_empty());

        collector.process_pending();
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn full_queue_rejects_further_events() {
        let collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        for _ in 0..PENDING_LIMIT {
            handle.log_action(UserAction::Refresh);
        }
        assert!(matches!(
            handle.try_log_action(UserAction::Refresh),
            Err(TrySendError::Full(_))
        ));
    }

    #[test]
    fn closed_collector_disconnects_handles() {
        let collector = DiagnosticsCollector::default();
        let handle = collector.handle();
        drop(collector);

        assert!(matches!(
            handle.try_log_action(UserAction::StopListening),
            Err(TrySendError::Disconnected(_))
        ));
    }

    #[test]
    fn oldest_selections_are_evicted_and_counted() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::new(10));
        for item_id in 0..15 {
            collector.log_action(UserAction::SelectItem { item_id });
        }

        assert_eq!(collector.len(), 10);
        let oldest = collector.iter().next().expect("history kept");
        assert_eq!(
            oldest.kind,
            DiagnosticEventKind::UserAction {
                action: UserAction::SelectItem { item_id: 5 },
                details: None,
            }
        );

        let json = collector.export_json().expect("export");
        let report: serde_json::Value = serde_json::from_str(&json).expect("json");
        assert_eq!(report["metadata"]["events_evicted"], 5);
    }

    #[test]
    fn report_counts_searches_and_fetches() {
        let mut collector = DiagnosticsCollector::default();
        collector.log_action(UserAction::Search {
            query_chars: 9,
            source: QuerySource::Typed,
        });
        collector.log_operation(AppOperation::FetchPage {
            page: 1,
            item_count: 16,
            duration_ms: 120,
        });

        let json = collector.export_json().expect("export");
        let report: serde_json::Value = serde_json::from_str(&json).expect("json");

        assert_eq!(report["metadata"]["event_count"], 2);
        assert_eq!(report["metadata"]["events_evicted"], 0);
        assert_eq!(report["summary"]["user_actions"], 1);
        assert_eq!(report["summary"]["operations"], 1);
        assert_eq!(report["events"][0]["type"], "user_action");
    }

    #[test]
    fn report_file_is_written_on_export() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("diagnostics.json");
        let mut collector = DiagnosticsCollector::default();
        collector.log_action(UserAction::StartListening);

        let written = collector.export_to_file(&path).expect("export");

        assert_eq!(written, path);
        let content = std::fs::read_to_string(&path).expect("report on disk");
        assert!(content.contains("start_listening"));
    }
}
