// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use iced::keyboard::{self, key};
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// How often queued diagnostic events are drained.
const DIAGNOSTICS_TICK: Duration = Duration::from_millis(500);

/// Routes window close requests, and Escape to close the lightbox.
///
/// Escape is only forwarded when no widget (e.g. the search field)
/// captured it.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| match event {
        event::Event::Window(window::Event::CloseRequested) => {
            Some(Message::WindowCloseRequested(window_id))
        }
        event::Event::Keyboard(keyboard::Event::KeyPressed {
            key: keyboard::Key::Named(key::Named::Escape),
            ..
        }) if matches!(status, event::Status::Ignored) => Some(Message::CloseLightbox),
        _ => None,
    })
}

/// Creates a periodic tick draining diagnostics, only while someone reads
/// them (verbose output or an export on close).
pub fn create_tick_subscription(diagnostics_active: bool) -> Subscription<Message> {
    if diagnostics_active {
        time::every(DIAGNOSTICS_TICK).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
