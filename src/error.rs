// SPDX-License-Identifier: MPL-2.0
//! Errors raised while setting the app up or persisting settings.
//!
//! Failures of a search or a voice session are domain errors
//! ([`crate::domain::error`]); they convert into [`Error`] when they abort
//! setup.

use crate::domain::error::{SearchError, VoiceError};
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    /// Filesystem access failed.
    Io(String),
    /// `settings.toml` could not be parsed or written.
    Config(String),
    /// The HTTP client could not be built.
    Http(String),
    Search(SearchError),
    Voice(VoiceError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Fluent key describing the failure.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Self::Io(_) => "error-io",
            Self::Config(_) => "error-config",
            Self::Http(_) => "error-http-client",
            Self::Search(err) => err.i18n_key(),
            Self::Voice(err) => err.i18n_key(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (context, detail): (&str, &dyn fmt::Display) = match self {
            Self::Io(detail) => ("file access failed", detail),
            Self::Config(detail) => ("invalid settings", detail),
            Self::Http(detail) => ("HTTP client unavailable", detail),
            Self::Search(err) => ("search failed", err),
            Self::Voice(err) => ("voice capture failed", err),
        };
        write!(f, "{context}: {detail}")
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Search(err) => Some(err),
            Self::Voice(err) => Some(err),
            Self::Io(_) | Self::Config(_) | Self::Http(_) => None,
        }
    }
}

impl From<SearchError> for Error {
    fn from(err: SearchError) -> Self {
        Self::Search(err)
    }
}

impl From<VoiceError> for Error {
    fn from(err: VoiceError) -> Self {
        Self::Voice(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.message().to_owned())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}
