// SPDX-License-Identifier: MPL-2.0
//! Voice-driven search orchestration.
//!
//! [`SearchOrchestrator`] runs the capture state machine on top of a
//! [`VoiceEngine`] and turns a finalized transcript into a [`Query`] for the
//! pagination controller. It never touches search state itself: the caller
//! feeds the returned query into `PaginationController::search`, so voice
//! and typed searches share one controller.
//!
//! Only one session exists at a time. The running [`VoiceSession`] is owned
//! here and dropped as soon as the session finishes, fails, or the
//! orchestrator itself is dropped, which releases the engine and closes the
//! event channel.

use crate::application::port::{VoiceEngine, VoiceSession};
use crate::domain::error::VoiceError;
use crate::domain::search::Query;
use crate::domain::voice::{CaptureState, PermissionStatus, SessionId, VoiceEvent};
use futures_util::stream::{BoxStream, StreamExt};
use std::fmt;
use std::sync::Arc;

/// Event stream of a freshly started session, tagged with its id.
pub struct ActiveSession {
    /// Identifier to pass back with every event.
    pub id: SessionId,
    /// Engine events, ending with [`VoiceEvent::Disconnected`].
    pub events: BoxStream<'static, VoiceEvent>,
}

impl ActiveSession {
    /// Pairs every event with the session id.
    #[must_use]
    pub fn tagged(self) -> BoxStream<'static, (SessionId, VoiceEvent)> {
        let id = self.id;
        self.events.map(move |event| (id, event)).boxed()
    }
}

impl fmt::Debug for ActiveSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveSession").field("id", &self.id).finish()
    }
}

/// Bridges voice capture sessions to search requests.
pub struct SearchOrchestrator {
    engine: Arc<dyn VoiceEngine>,
    locale: String,
    state: CaptureState,
    session: Option<VoiceSession>,
    session_id: SessionId,
    transcript: Option<String>,
}

impl fmt::Debug for SearchOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchOrchestrator")
            .field("locale", &self.locale)
            .field("state", &self.state)
            .field("session_id", &self.session_id)
            .field("has_session", &self.session.is_some())
            .finish()
    }
}

impl SearchOrchestrator {
    /// Creates an idle orchestrator recording in `locale`.
    #[must_use]
    pub fn new(engine: Arc<dyn VoiceEngine>, locale: impl Into<String>) -> Self {
        Self {
            engine,
            locale: locale.into(),
            state: CaptureState::Idle,
            session: None,
            session_id: SessionId::default(),
            transcript: None,
        }
    }

    /// Returns the current capture state.
    #[must_use]
    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    /// Returns the last non-empty transcript, if any.
    #[must_use]
    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    /// Returns the recording locale.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Begins a session and waits for the permission prompt.
    ///
    /// The returned id must accompany the prompt's answer, so a prompt
    /// belonging to a cancelled session cannot start a later one.
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError::AlreadyActive`] while another session is being
    /// prepared or is running; the caller must stop it first.
    pub fn start(&mut self) -> Result<SessionId, VoiceError> {
        if self.state.is_active() {
            return Err(VoiceError::AlreadyActive);
        }
        self.transcript = None;
        self.session_id = self.session_id.next();
        self.state = CaptureState::Preparing;
        Ok(self.session_id)
    }

    /// Continues session `id` once its permission prompt resolves.
    ///
    /// Denial moves straight to `Error` without ever listening. When granted,
    /// the engine is started and its event stream returned; the caller must
    /// feed every event back through [`Self::handle_event`]. Returns `None`
    /// if the session was cancelled or superseded meanwhile, or could not
    /// start.
    pub fn permission_resolved(
        &mut self,
        id: SessionId,
        status: PermissionStatus,
    ) -> Option<ActiveSession> {
        if id != self.session_id || self.state != CaptureState::Preparing {
            return None;
        }

        if status == PermissionStatus::Denied {
            self.state = CaptureState::Error(VoiceError::PermissionDenied);
            return None;
        }

        let mut session = match self.engine.start(&self.locale) {
            Ok(session) => session,
            Err(err) => {
                self.state = CaptureState::Error(err);
                return None;
            }
        };
        let Some(events) = session.take_events() else {
            // Dropping `session` here destroys it.
            self.state = CaptureState::Error(VoiceError::Engine(
                "voice session has no event stream".to_string(),
            ));
            return None;
        };
        self.session = Some(session);
        self.state = CaptureState::Listening;
        Some(ActiveSession { id, events })
    }

    /// Stops recording.
    ///
    /// While listening, asks the engine for its final transcript. While
    /// preparing, cancels the session. While transcribing, gives up on the
    /// transcript and destroys the session. Otherwise a no-op.
    ///
    /// # Errors
    ///
    /// Returns the engine error if it cannot be stopped; the session is torn
    /// down and the state becomes `Error`.
    pub fn stop(&mut self) -> Result<(), VoiceError> {
        match self.state {
            CaptureState::Listening => {
                if let Some(session) = self.session.as_mut() {
                    if let Err(err) = session.stop() {
                        self.release(CaptureState::Error(err.clone()));
                        return Err(err);
                    }
                }
                self.state = CaptureState::Transcribing;
                Ok(())
            }
            CaptureState::Preparing | CaptureState::Transcribing => {
                self.release(CaptureState::Idle);
                Ok(())
            }
            CaptureState::Idle | CaptureState::Error(_) => Ok(()),
        }
    }

    /// Applies an engine event.
    ///
    /// Returns the query to search for when the session produced a
    /// non-empty transcript. Events from any session other than the running
    /// one are ignored, so a transcript triggers at most one search.
    pub fn handle_event(&mut self, id: SessionId, event: VoiceEvent) -> Option<Query> {
        if id != self.session_id || self.session.is_none() {
            return None;
        }

        match event {
            VoiceEvent::Started => None,
            VoiceEvent::Ended => {
                if self.state == CaptureState::Listening {
                    self.state = CaptureState::Transcribing;
                }
                None
            }
            VoiceEvent::Results(candidates) => {
                self.release(CaptureState::Idle);
                let best = candidates.into_iter().next().unwrap_or_default();
                let query = Query::parse(&best);
                self.transcript = query.as_ref().map(|q| q.as_str().to_string());
                query
            }
            VoiceEvent::Error(message) => {
                self.release(CaptureState::Error(VoiceError::Recognition(message)));
                None
            }
            VoiceEvent::Disconnected => {
                self.release(CaptureState::Idle);
                None
            }
        }
    }

    /// Drops the running session, if any, and returns to `Idle`.
    pub fn teardown(&mut self) {
        self.release(CaptureState::Idle);
    }

    fn release(&mut self, next: CaptureState) {
        self.session = None;
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::{SessionControl, VoiceEventSender};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Probe {
        starts: AtomicUsize,
        stops: AtomicUsize,
        destroys: AtomicUsize,
        sender: Mutex<Option<VoiceEventSender>>,
    }

    struct ProbeControl(Arc<Probe>);

    impl SessionControl for ProbeControl {
        fn stop(&mut self) -> Result<(), VoiceError> {
            self.0.stops.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn destroy(&mut self) {
            self.0.destroys.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct ProbeEngine {
        probe: Arc<Probe>,
        fail_with: Option<VoiceError>,
        /// Hands out sessions whose event stream is already gone.
        drain_events: bool,
    }

    impl VoiceEngine for ProbeEngine {
        fn start(&self, _locale: &str) -> Result<VoiceSession, VoiceError> {
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            self.probe.starts.fetch_add(1, Ordering::SeqCst);
            let (mut session, sender) =
                VoiceSession::channel(Box::new(ProbeControl(self.probe.clone())));
            *self.probe.sender.lock().expect("lock") = Some(sender);
            if self.drain_events {
                drop(session.take_events());
            }
            Ok(session)
        }
    }

    fn orchestrator() -> (SearchOrchestrator, Arc<Probe>) {
        let probe = Arc::new(Probe::default());
        let engine = ProbeEngine {
            probe: probe.clone(),
            fail_with: None,
            drain_events: false,
        };
        (SearchOrchestrator::new(Arc::new(engine), "en-US"), probe)
    }

    fn listening(orchestrator: &mut SearchOrchestrator) -> SessionId {
        let id = orchestrator.start().expect("idle");
        orchestrator
            .permission_resolved(id, PermissionStatus::Granted)
            .expect("session started")
            .id
    }

    #[test]
    fn granted_permission_starts_listening() {
        let (mut orchestrator, probe) = orchestrator();
        let id = orchestrator.start().expect("idle");
        assert_eq!(orchestrator.state(), &CaptureState::Preparing);

        let session = orchestrator.permission_resolved(id, PermissionStatus::Granted);
        assert_eq!(session.map(|s| s.id), Some(id));
        assert_eq!(orchestrator.state(), &CaptureState::Listening);
        assert_eq!(probe.starts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn denied_permission_never_listens() {
        let (mut orchestrator, probe) = orchestrator();
        let id = orchestrator.start().expect("idle");

        assert!(orchestrator
            .permission_resolved(id, PermissionStatus::Denied)
            .is_none());
        assert_eq!(
            orchestrator.state(),
            &CaptureState::Error(VoiceError::PermissionDenied)
        );
        assert_eq!(probe.starts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn starting_twice_is_rejected() {
        let (mut orchestrator, _probe) = orchestrator();
        listening(&mut orchestrator);
        assert_eq!(orchestrator.start(), Err(VoiceError::AlreadyActive));
    }

    #[test]
    fn transcript_produces_exactly_one_query() {
        let (mut orchestrator, probe) = orchestrator();
        let id = listening(&mut orchestrator);

        let query = orchestrator.handle_event(id, VoiceEvent::Results(vec![
            "red balloons".to_string(),
            "read balloons".to_string(),
        ]));
        assert_eq!(query.as_ref().map(Query::as_str), Some("red balloons"));
        assert_eq!(orchestrator.state(), &CaptureState::Idle);
        assert_eq!(orchestrator.transcript(), Some("red balloons"));
        assert_eq!(probe.destroys.load(Ordering::SeqCst), 1);

        let again = orchestrator.handle_event(id, VoiceEvent::Results(vec!["red balloons".into()]));
        assert!(again.is_none());
    }

    #[test]
    fn empty_transcript_reverts_silently() {
        let (mut orchestrator, _probe) = orchestrator();
        let id = listening(&mut orchestrator);

        assert!(orchestrator
            .handle_event(id, VoiceEvent::Results(vec![String::new()]))
            .is_none());
        assert_eq!(orchestrator.state(), &CaptureState::Idle);
        assert!(orchestrator.transcript().is_none());
    }

    #[test]
    fn stop_waits_for_transcript() {
        let (mut orchestrator, probe) = orchestrator();
        let id = listening(&mut orchestrator);

        orchestrator.stop().expect("stop");
        assert_eq!(orchestrator.state(), &CaptureState::Transcribing);
        assert_eq!(probe.stops.load(Ordering::SeqCst), 1);

        let query = orchestrator.handle_event(id, VoiceEvent::Results(vec!["sunset".into()]));
        assert_eq!(query.map(|q| q.to_string()), Some("sunset".to_string()));
    }

    #[test]
    fn ended_moves_to_transcribing() {
        let (mut orchestrator, _probe) = orchestrator();
        let id = listening(&mut orchestrator);
        orchestrator.handle_event(id, VoiceEvent::Started);
        assert_eq!(orchestrator.state(), &CaptureState::Listening);
        orchestrator.handle_event(id, VoiceEvent::Ended);
        assert_eq!(orchestrator.state(), &CaptureState::Transcribing);
    }

    #[test]
    fn stop_while_idle_is_a_no_op() {
        let (mut orchestrator, probe) = orchestrator();
        orchestrator.stop().expect("no-op");
        assert_eq!(orchestrator.state(), &CaptureState::Idle);
        assert_eq!(probe.stops.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn stop_while_preparing_cancels() {
        let (mut orchestrator, probe) = orchestrator();
        let id = orchestrator.start().expect("idle");
        orchestrator.stop().expect("cancel");
        assert_eq!(orchestrator.state(), &CaptureState::Idle);

        assert!(orchestrator
            .permission_resolved(id, PermissionStatus::Granted)
            .is_none());
        assert_eq!(probe.starts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn late_prompt_of_cancelled_session_is_ignored() {
        let (mut orchestrator, probe) = orchestrator();
        let cancelled = orchestrator.start().expect("idle");
        orchestrator.stop().expect("cancel");
        let current = orchestrator.start().expect("idle again");
        assert_ne!(cancelled, current);

        assert!(orchestrator
            .permission_resolved(cancelled, PermissionStatus::Denied)
            .is_none());
        assert_eq!(orchestrator.state(), &CaptureState::Preparing);
        assert_eq!(probe.starts.load(Ordering::SeqCst), 0);

        assert!(orchestrator
            .permission_resolved(current, PermissionStatus::Granted)
            .is_some());
        assert_eq!(orchestrator.state(), &CaptureState::Listening);
    }

    #[test]
    fn second_stop_abandons_a_stuck_transcription() {
        let (mut orchestrator, probe) = orchestrator();
        let stuck = listening(&mut orchestrator);

        orchestrator.stop().expect("stop");
        assert_eq!(orchestrator.state(), &CaptureState::Transcribing);
        orchestrator.stop().expect("abandon");

        assert_eq!(orchestrator.state(), &CaptureState::Idle);
        assert_eq!(probe.stops.load(Ordering::SeqCst), 1);
        assert_eq!(probe.destroys.load(Ordering::SeqCst), 1);
        assert!(orchestrator
            .handle_event(stuck, VoiceEvent::Results(vec!["late".into()]))
            .is_none());

        listening(&mut orchestrator);
        assert_eq!(orchestrator.state(), &CaptureState::Listening);
        assert_eq!(probe.starts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn session_without_events_ends_in_error() {
        let probe = Arc::new(Probe::default());
        let engine = ProbeEngine {
            probe: probe.clone(),
            fail_with: None,
            drain_events: true,
        };
        let mut orchestrator = SearchOrchestrator::new(Arc::new(engine), "en-US");
        let id = orchestrator.start().expect("idle");

        assert!(orchestrator
            .permission_resolved(id, PermissionStatus::Granted)
            .is_none());
        assert!(matches!(
            orchestrator.state(),
            CaptureState::Error(VoiceError::Engine(_))
        ));
        assert_eq!(probe.destroys.load(Ordering::SeqCst), 1);
        orchestrator.start().expect("error state allows a new session");
    }

    #[test]
    fn recognition_error_is_reported() {
        let (mut orchestrator, _probe) = orchestrator();
        let id = listening(&mut orchestrator);

        orchestrator.handle_event(id, VoiceEvent::Error("no speech".into()));
        assert_eq!(
            orchestrator.state(),
            &CaptureState::Error(VoiceError::Recognition("no speech".into()))
        );
        orchestrator.start().expect("error state allows a new session");
    }

    #[test]
    fn events_from_old_sessions_are_ignored() {
        let (mut orchestrator, _probe) = orchestrator();
        let old = listening(&mut orchestrator);
        orchestrator.handle_event(old, VoiceEvent::Disconnected);
        let current = listening(&mut orchestrator);
        assert_ne!(old, current);

        assert!(orchestrator
            .handle_event(old, VoiceEvent::Results(vec!["stale".into()]))
            .is_none());
        assert_eq!(orchestrator.state(), &CaptureState::Listening);
    }

    #[test]
    fn engine_failure_is_reported() {
        let probe = Arc::new(Probe::default());
        let engine = ProbeEngine {
            probe,
            fail_with: Some(VoiceError::Unavailable),
            drain_events: false,
        };
        let mut orchestrator = SearchOrchestrator::new(Arc::new(engine), "en-US");
        let id = orchestrator.start().expect("idle");

        assert!(orchestrator
            .permission_resolved(id, PermissionStatus::Granted)
            .is_none());
        assert_eq!(
            orchestrator.state(),
            &CaptureState::Error(VoiceError::Unavailable)
        );
    }

    #[test]
    fn dropping_orchestrator_releases_session() {
        let (mut orchestrator, probe) = orchestrator();
        listening(&mut orchestrator);
        drop(orchestrator);
        assert_eq!(probe.destroys.load(Ordering::SeqCst), 1);
    }
}
