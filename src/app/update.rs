// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application.
//!
//! Each handler applies one message to the app state and returns the side
//! effects as a [`Task`]. Page requests go out through the pagination
//! controller's tickets; responses come back as `PageFetched` and are
//! merged by the controller, which decides whether they are still current.

use super::{App, Message, Notice};
use crate::application::pagination::{ApplyOutcome, FetchTicket};
use crate::diagnostics::{AppOperation, QuerySource, UserAction};
use crate::domain::error::SearchError;
use crate::domain::search::{ItemId, PageResponse, RequestEpoch};
use crate::domain::voice::{CaptureState, PermissionStatus, SessionId, VoiceEvent};
use iced::widget::image::Handle;
use iced::{window, Task};
use std::time::Instant;

impl App {
    pub(super) fn handle_message(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::QueryChanged(value) => {
                self.query_input = value;
                Task::none()
            }
            Message::SubmitSearch => {
                let input = self.query_input.clone();
                self.start_search(&input, QuerySource::Typed)
            }
            Message::Refresh => {
                self.diagnostics.log_action(UserAction::Refresh);
                match self.controller.refresh() {
                    Some(ticket) => self.dispatch(ticket),
                    None => Task::none(),
                }
            }
            Message::LoadMore => match self.controller.load_more() {
                Some(ticket) => {
                    self.diagnostics.log_action(UserAction::LoadMore);
                    self.dispatch(ticket)
                }
                None => Task::none(),
            },
            Message::PageFetched {
                ticket,
                started,
                result,
            } => self.handle_page_fetched(&ticket, started, result),
            Message::ThumbnailLoaded { epoch, id, result } => {
                self.handle_thumbnail_loaded(epoch, id, result);
                Task::none()
            }
            Message::PreviewLoaded { id, result } => {
                if self.selected == Some(id) {
                    match result {
                        Ok(handle) => self.preview = Some(handle),
                        Err(err) => self
                            .diagnostics_handle
                            .log_warning(format!("preview {id}: {err}")),
                    }
                }
                Task::none()
            }
            Message::SelectItem(id) => self.select_item(id),
            Message::CloseLightbox => {
                if self.selected.take().is_some() {
                    self.diagnostics.log_action(UserAction::CloseLightbox);
                }
                self.preview = None;
                Task::none()
            }
            Message::StartListening => self.start_listening(),
            Message::StopListening => {
                self.diagnostics.log_action(UserAction::StopListening);
                if let Err(err) = self.orchestrator.stop() {
                    self.diagnostics_handle
                        .log_error(format!("voice stop failed: {err}"));
                }
                Task::none()
            }
            Message::PermissionResolved(id, status) => self.handle_permission(id, status),
            Message::VoiceEvent(id, event) => self.handle_voice_event(id, event),
            Message::DismissNotice => {
                self.notice = None;
                Task::none()
            }
            Message::Tick(_) => {
                self.diagnostics.process_pending();
                Task::none()
            }
            Message::WindowCloseRequested(id) => {
                self.shutdown();
                window::close(id)
            }
        }
    }

    /// Starts a new search for `input`. Blank input is ignored.
    pub(super) fn start_search(&mut self, input: &str, source: QuerySource) -> Task<Message> {
        let Some(ticket) = self.controller.search(input) else {
            return Task::none();
        };
        self.diagnostics.log_action(UserAction::Search {
            query_chars: ticket.query().char_count(),
            source,
        });
        self.dispatch(ticket)
    }

    fn dispatch(&self, ticket: FetchTicket) -> Task<Message> {
        let future = ticket.dispatch(self.services.search.as_ref());
        let started = Instant::now();
        Task::perform(future, move |result| Message::PageFetched {
            ticket,
            started,
            result,
        })
    }

    fn handle_page_fetched(
        &mut self,
        ticket: &FetchTicket,
        started: Instant,
        result: Result<PageResponse, SearchError>,
    ) -> Task<Message> {
        let page = ticket.page().value();

        match self.controller.apply(ticket, result) {
            ApplyOutcome::Replaced { count } => {
                self.log_fetch(page, count, started);
                self.thumbnails.clear();
                self.close_lightbox_if_missing();
                self.load_thumbnails(0)
            }
            ApplyOutcome::Appended { count } => {
                self.log_fetch(page, count, started);
                let skip = self.controller.results().len().saturating_sub(count);
                self.load_thumbnails(skip)
            }
            ApplyOutcome::EndOfResults => {
                self.log_fetch(page, 0, started);
                Task::none()
            }
            ApplyOutcome::Empty => {
                self.log_fetch(page, 0, started);
                self.thumbnails.clear();
                self.close_lightbox_if_missing();
                Task::none()
            }
            ApplyOutcome::Failed(err) => {
                self.diagnostics.log_operation(AppOperation::FetchFailed {
                    page,
                    error_key: err.i18n_key().to_string(),
                });
                self.diagnostics_handle.log_error(err.to_string());
                Task::none()
            }
            ApplyOutcome::Stale => {
                self.diagnostics
                    .log_operation(AppOperation::StaleResponseDiscarded {
                        epoch: ticket.epoch().value(),
                    });
                Task::none()
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    fn log_fetch(&mut self, page: u32, item_count: usize, started: Instant) {
        self.diagnostics.log_operation(AppOperation::FetchPage {
            page,
            item_count,
            duration_ms: started.elapsed().as_millis() as u64,
        });
    }

    /// Downloads thumbnails of the results after the first `skip` items.
    fn load_thumbnails(&self, skip: usize) -> Task<Message> {
        let Some(downloader) = &self.services.downloader else {
            return Task::none();
        };
        let epoch = self.controller.epoch();

        Task::batch(self.controller.results().iter().skip(skip).map(|item| {
            let id = item.id;
            Task::perform(downloader.fetch(&item.thumbnail_url), move |result| {
                Message::ThumbnailLoaded {
                    epoch,
                    id,
                    result: result.map(Handle::from_bytes),
                }
            })
        }))
    }

    fn handle_thumbnail_loaded(
        &mut self,
        epoch: RequestEpoch,
        id: ItemId,
        result: Result<Handle, SearchError>,
    ) {
        // Downloads of a superseded search or an item no longer shown.
        if epoch != self.controller.epoch() || self.controller.results().get(id).is_none() {
            return;
        }
        match result {
            Ok(handle) => {
                self.thumbnails.insert(id, handle);
            }
            Err(err) => self
                .diagnostics_handle
                .log_warning(format!("thumbnail {id}: {err}")),
        }
    }

    fn select_item(&mut self, id: ItemId) -> Task<Message> {
        let Some(url) = self
            .controller
            .results()
            .get(id)
            .map(|item| item.preview_url.clone())
        else {
            return Task::none();
        };

        self.diagnostics
            .log_action(UserAction::SelectItem { item_id: id });
        self.selected = Some(id);
        self.preview = None;

        match &self.services.downloader {
            Some(downloader) => Task::perform(downloader.fetch(&url), move |result| {
                Message::PreviewLoaded {
                    id,
                    result: result.map(Handle::from_bytes),
                }
            }),
            None => Task::none(),
        }
    }

    fn close_lightbox_if_missing(&mut self) {
        let still_listed = self
            .selected
            .is_some_and(|id| self.controller.results().get(id).is_some());
        if !still_listed {
            self.selected = None;
            self.preview = None;
        }
    }

    fn start_listening(&mut self) -> Task<Message> {
        self.diagnostics.log_action(UserAction::StartListening);
        match self.orchestrator.start() {
            Ok(id) => Task::perform(self.services.microphone.request(), move |status| {
                Message::PermissionResolved(id, status)
            }),
            Err(err) => {
                self.notice = Some(Notice::error(err.i18n_key()));
                Task::none()
            }
        }
    }

    fn handle_permission(&mut self, id: SessionId, status: PermissionStatus) -> Task<Message> {
        match self.orchestrator.permission_resolved(id, status) {
            Some(session) => {
                Task::run(session.tagged(), |(id, event)| Message::VoiceEvent(id, event))
            }
            None => {
                if let CaptureState::Error(err) = self.orchestrator.state() {
                    self.diagnostics_handle
                        .log_error(format!("voice session not started: {err}"));
                }
                Task::none()
            }
        }
    }

    fn handle_voice_event(&mut self, id: SessionId, event: VoiceEvent) -> Task<Message> {
        match &event {
            VoiceEvent::Error(message) => self
                .diagnostics_handle
                .log_error(format!("recognizer: {message}")),
            VoiceEvent::Disconnected => {
                self.diagnostics
                    .log_operation(AppOperation::VoiceSessionClosed {
                        session: id.value(),
                    });
            }
            VoiceEvent::Started | VoiceEvent::Ended | VoiceEvent::Results(_) => {}
        }

        let Some(query) = self.orchestrator.handle_event(id, event) else {
            return Task::none();
        };
        self.diagnostics
            .log_operation(AppOperation::TranscriptReceived {
                chars: query.char_count(),
            });
        self.query_input = query.as_str().to_string();
        self.start_search(query.as_str(), QuerySource::Voice)
    }

    /// Releases the microphone and writes the diagnostics report.
    fn shutdown(&mut self) {
        self.orchestrator.teardown();
        self.diagnostics.process_pending();

        if let Some(path) = &self.diagnostics_path {
            if let Err(err) = self.diagnostics.export_to_file(path) {
                eprintln!("Failed to export diagnostics to {}: {err}", path.display());
            }
        }
    }
}
