// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for collecting and exporting activity reports.
//!
//! Events are captured during application usage, stored in a memory-bounded
//! circular buffer, and exported as JSON on request.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped event with a [`DiagnosticEventKind`]
//! - [`DiagnosticsCollector`]: Owns the buffer, drains the channel
//! - [`DiagnosticsHandle`]: Cloneable non-blocking sender
//!
//! # Privacy
//!
//! Search queries and transcripts are recorded by length only.

mod buffer;
mod collector;
mod events;
mod report;

pub use buffer::{buffer_capacity_bounds, BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{AppOperation, DiagnosticEvent, DiagnosticEventKind, QuerySource, UserAction};
pub use report::{
    write_atomic, DiagnosticReport, ExportError, ReportMetadata, ReportSummary,
    SerializableEvent, SystemInfo,
};
