// SPDX-License-Identifier: MPL-2.0
//! Voice capture port definitions.
//!
//! A [`VoiceEngine`] starts capture sessions. Each session is returned as a
//! [`VoiceSession`] handle that owns the event channel and the engine-side
//! controls: dropping the handle destroys the session and closes the
//! channel, so no listener outlives its session.
//!
//! Permission prompts are a separate port ([`MicrophonePermission`]) since
//! they are platform-specific and resolve before any session exists.

use crate::domain::error::VoiceError;
use crate::domain::voice::{PermissionStatus, VoiceEvent};
use futures_util::future::BoxFuture;
use futures_util::stream::{self, BoxStream, StreamExt};
use std::fmt;
use tokio::sync::mpsc;

/// Sending half handed to engines to publish session events.
pub type VoiceEventSender = mpsc::UnboundedSender<VoiceEvent>;

/// Engine-side controls of a running session.
pub trait SessionControl: Send {
    /// Asks the recognizer to stop recording and deliver its transcript.
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError::Engine`] if the recognizer cannot be signalled.
    fn stop(&mut self) -> Result<(), VoiceError>;

    /// Tears the session down immediately, discarding pending results.
    fn destroy(&mut self);
}

/// Speech recognizer able to run one capture session at a time.
pub trait VoiceEngine: Send + Sync {
    /// Starts recording in `locale` (BCP-47, e.g. `en-US`).
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError::AlreadyActive`] if the engine is busy with
    /// another session, [`VoiceError::Unavailable`] if no recognizer is
    /// configured, and [`VoiceError::Engine`] if it fails to start.
    fn start(&self, locale: &str) -> Result<VoiceSession, VoiceError>;
}

/// Resolves the platform microphone permission.
pub trait MicrophonePermission: Send + Sync {
    /// Prompts for (or checks) microphone access.
    fn request(&self) -> BoxFuture<'static, PermissionStatus>;
}

/// Scoped handle on a running capture session.
pub struct VoiceSession {
    events: Option<mpsc::UnboundedReceiver<VoiceEvent>>,
    control: Box<dyn SessionControl>,
}

impl VoiceSession {
    /// Creates a session handle and the sender the engine publishes on.
    #[must_use]
    pub fn channel(control: Box<dyn SessionControl>) -> (Self, VoiceEventSender) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let session = Self {
            events: Some(receiver),
            control,
        };
        (session, sender)
    }

    /// Takes the event stream. Returns `None` once it has been taken.
    ///
    /// The stream ends with [`VoiceEvent::Disconnected`] when the engine side
    /// of the channel is closed.
    pub fn take_events(&mut self) -> Option<BoxStream<'static, VoiceEvent>> {
        self.events.take().map(event_stream)
    }

    /// Asks the recognizer to finish the session.
    ///
    /// # Errors
    ///
    /// Propagates the engine's [`SessionControl::stop`] error.
    pub fn stop(&mut self) -> Result<(), VoiceError> {
        self.control.stop()
    }
}

impl fmt::Debug for VoiceSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceSession")
            .field("events_taken", &self.events.is_none())
            .finish_non_exhaustive()
    }
}

impl Drop for VoiceSession {
    fn drop(&mut self) {
        self.control.destroy();
    }
}

/// Adapts a receiver into a stream terminated by [`VoiceEvent::Disconnected`].
fn event_stream(receiver: mpsc::UnboundedReceiver<VoiceEvent>) -> BoxStream<'static, VoiceEvent> {
    stream::unfold(Some(receiver), |state| async move {
        let mut receiver = state?;
        match receiver.recv().await {
            Some(event) => Some((event, Some(receiver))),
            None => Some((VoiceEvent::Disconnected, None)),
        }
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Counters {
        stops: AtomicUsize,
        destroys: AtomicUsize,
    }

    struct CountingControl(Arc<Counters>);

    impl SessionControl for CountingControl {
        fn stop(&mut self) -> Result<(), VoiceError> {
            self.0.stops.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn destroy(&mut self) {
            self.0.destroys.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn dropping_session_destroys_it_once() {
        let counters = Arc::new(Counters::default());
        let (mut session, _sender) =
            VoiceSession::channel(Box::new(CountingControl(counters.clone())));
        session.stop().expect("stop succeeds");
        drop(session);

        assert_eq!(counters.stops.load(Ordering::SeqCst), 1);
        assert_eq!(counters.destroys.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn events_can_only_be_taken_once() {
        let counters = Arc::new(Counters::default());
        let (mut session, _sender) = VoiceSession::channel(Box::new(CountingControl(counters)));
        assert!(session.take_events().is_some());
        assert!(session.take_events().is_none());
    }

    #[tokio::test]
    async fn stream_ends_with_disconnected() {
        let counters = Arc::new(Counters::default());
        let (mut session, sender) = VoiceSession::channel(Box::new(CountingControl(counters)));
        let events = session.take_events().expect("fresh session");

        sender.send(VoiceEvent::Started).expect("receiver alive");
        sender
            .send(VoiceEvent::Results(vec!["red balloons".to_string()]))
            .expect("receiver alive");
        drop(sender);

        let collected: Vec<_> = events.collect().await;
        assert_eq!(
            collected,
            vec![
                VoiceEvent::Started,
                VoiceEvent::Results(vec!["red balloons".to_string()]),
                VoiceEvent::Disconnected,
            ]
        );
    }
}
