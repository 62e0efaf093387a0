// SPDX-License-Identifier: MPL-2.0
//! Speech capture adapters.
//!
//! [`CommandVoiceEngine`] drives an external speech-to-text program. The
//! program is expected to record from the default microphone until its
//! standard input is closed, then print candidate transcripts on standard
//! output, one per line, most confident first. A non-zero exit status is
//! reported as a recognition error carrying the program's stderr.
//!
//! [`CpalMicrophone`] answers the permission prompt by probing the default
//! audio input device.

use crate::application::port::{
    MicrophonePermission, SessionControl, VoiceEngine, VoiceEventSender, VoiceSession,
};
use crate::domain::error::VoiceError;
use crate::domain::voice::{PermissionStatus, VoiceEvent};
use cpal::traits::HostTrait;
use futures_util::future::BoxFuture;
use std::io::{self, Read};
use std::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

/// Placeholder replaced by the capture locale in command arguments.
pub const LOCALE_PLACEHOLDER: &str = "{locale}";

/// Voice engine backed by an external recognizer command.
///
/// Only one session runs at a time; [`VoiceEngine::start`] fails with
/// [`VoiceError::AlreadyActive`] until the previous session is destroyed.
#[derive(Debug, Clone)]
pub struct CommandVoiceEngine {
    argv: Vec<String>,
    busy: Arc<AtomicBool>,
}

impl CommandVoiceEngine {
    /// Creates an engine that runs `argv` for each session.
    ///
    /// An empty `argv` yields an engine that always reports
    /// [`VoiceError::Unavailable`].
    #[must_use]
    pub fn new(argv: Vec<String>) -> Self {
        Self {
            argv,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns true when a recognizer command is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.argv.first().is_some_and(|program| !program.trim().is_empty())
    }

    fn command(&self, locale: &str) -> Option<Command> {
        let (program, args) = self.argv.split_first()?;
        if program.trim().is_empty() {
            return None;
        }
        let mut command = Command::new(program);
        command.args(args.iter().map(|arg| arg.replace(LOCALE_PLACEHOLDER, locale)));
        Some(command)
    }
}

impl VoiceEngine for CommandVoiceEngine {
    fn start(&self, locale: &str) -> Result<VoiceSession, VoiceError> {
        let mut command = self.command(locale).ok_or(VoiceError::Unavailable)?;

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(VoiceError::AlreadyActive);
        }

        let spawned = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                self.busy.store(false, Ordering::Release);
                return Err(VoiceError::Engine(e.to_string()));
            }
        };

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let child = Arc::new(Mutex::new(Some(child)));

        let control = CommandControl {
            stdin,
            child: Arc::clone(&child),
            busy: Arc::clone(&self.busy),
            released: false,
        };
        let (session, sender) = VoiceSession::channel(Box::new(control));

        let _ = sender.send(VoiceEvent::Started);
        thread::spawn(move || collect_transcripts(&child, stdout, stderr, &sender));

        Ok(session)
    }
}

/// Reads `pipe` to the end on its own thread.
fn drain(pipe: Option<impl Read + Send + 'static>) -> JoinHandle<io::Result<String>> {
    thread::spawn(move || {
        let mut text = String::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_string(&mut text)?;
        }
        Ok(text)
    })
}

/// Waits for the recognizer to finish and publishes its output.
///
/// Both pipes are drained concurrently; a recognizer that fills the stderr
/// pipe would otherwise never close stdout.
fn collect_transcripts(
    child: &Arc<Mutex<Option<Child>>>,
    stdout: Option<ChildStdout>,
    stderr: Option<ChildStderr>,
    sender: &VoiceEventSender,
) {
    let errors = drain(stderr);
    let output = match drain(stdout).join() {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            let _ = sender.send(VoiceEvent::Error(e.to_string()));
            return;
        }
        Err(_) => {
            let _ = sender.send(VoiceEvent::Error("stdout reader panicked".to_string()));
            return;
        }
    };
    let errors = errors.join().ok().and_then(Result::ok).unwrap_or_default();

    // The session may have been destroyed while we were reading.
    let status = {
        let mut guard = child.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_mut() {
            Some(process) => process.wait(),
            None => return,
        }
    };

    match status {
        Ok(status) if status.success() => {
            let transcripts: Vec<String> = output
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();
            let _ = sender.send(VoiceEvent::Results(transcripts));
            let _ = sender.send(VoiceEvent::Ended);
        }
        Ok(status) => {
            let message = match errors.trim() {
                "" => status.to_string(),
                text => text.to_string(),
            };
            let _ = sender.send(VoiceEvent::Error(message));
        }
        Err(e) => {
            let _ = sender.send(VoiceEvent::Error(e.to_string()));
        }
    }
}

struct CommandControl {
    stdin: Option<ChildStdin>,
    child: Arc<Mutex<Option<Child>>>,
    busy: Arc<AtomicBool>,
    released: bool,
}

impl SessionControl for CommandControl {
    fn stop(&mut self) -> Result<(), VoiceError> {
        // Closing stdin tells the recognizer to finalize.
        self.stdin.take();
        Ok(())
    }

    fn destroy(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.stdin.take();

        let process = self
            .child
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(mut process) = process {
            let _ = process.kill();
            let _ = process.wait();
        }
        self.busy.store(false, Ordering::Release);
    }
}

/// Microphone permission probe using the default `cpal` host.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpalMicrophone;

impl MicrophonePermission for CpalMicrophone {
    fn request(&self) -> BoxFuture<'static, PermissionStatus> {
        Box::pin(async {
            let available = tokio::task::spawn_blocking(|| {
                cpal::default_host().default_input_device().is_some()
            })
            .await
            .unwrap_or(false);

            if available {
                PermissionStatus::Granted
            } else {
                PermissionStatus::Denied
            }
        })
    }
}
