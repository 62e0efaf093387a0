// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::application::pagination::FetchTicket;
use crate::domain::error::SearchError;
use crate::domain::search::{ItemId, PageResponse, RequestEpoch};
use crate::domain::voice::{PermissionStatus, SessionId, VoiceEvent};
use iced::widget::image::Handle;
use iced::window;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// The search field was edited.
    QueryChanged(String),
    /// Search for the text in the search field.
    SubmitSearch,
    /// Re-run the first page of the latest search.
    Refresh,
    /// Fetch the next page.
    LoadMore,
    /// A page request finished.
    PageFetched {
        ticket: FetchTicket,
        started: Instant,
        result: Result<PageResponse, SearchError>,
    },
    /// A grid thumbnail finished downloading.
    ThumbnailLoaded {
        epoch: RequestEpoch,
        id: ItemId,
        result: Result<Handle, SearchError>,
    },
    /// The lightbox preview finished downloading.
    PreviewLoaded {
        id: ItemId,
        result: Result<Handle, SearchError>,
    },
    SelectItem(ItemId),
    CloseLightbox,
    StartListening,
    StopListening,
    /// The microphone prompt of the given session resolved.
    PermissionResolved(SessionId, PermissionStatus),
    /// An event of the voice session with the given id.
    VoiceEvent(SessionId, VoiceEvent),
    /// Hide the notice banner.
    DismissNotice,
    Tick(Instant), // Periodic tick draining diagnostics
    /// Window close requested - export diagnostics and release the microphone.
    WindowCloseRequested(window::Id),
}

/// Runtime flags passed in from the command line.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 format (e.g., `fr`).
    pub lang: Option<String>,
    /// Optional config directory override (for settings.toml).
    pub config_dir: Option<String>,
    /// Where to write the diagnostics report when the window closes.
    pub diagnostics_path: Option<PathBuf>,
    /// Mirror diagnostic warnings and errors to stderr.
    pub verbose: bool,
    /// Query searched on startup instead of `[search].default_query`.
    pub initial_query: Option<String>,
}
