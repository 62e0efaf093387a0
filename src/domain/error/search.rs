// SPDX-License-Identifier: MPL-2.0
//! Errors produced while fetching a page of image results.

use std::fmt;

/// Failure of a single image search call.
///
/// The client never retries; the controller turns any of these into
/// `FetchState::Error` and waits for the user to search again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    Network(String),

    /// The server answered with a non-success status code.
    Http(u16),

    /// The response body was not the expected JSON document.
    Parse(String),

    /// The first page of a query contained zero items.
    EmptyResult,

    /// The query was empty after trimming.
    InvalidQuery,
}

impl SearchError {
    /// Returns the i18n message key for this error type.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            SearchError::Network(_) => "error-search-network",
            SearchError::Http(401 | 403) => "error-search-unauthorized",
            SearchError::Http(429) => "error-search-rate-limited",
            SearchError::Http(_) => "error-search-http",
            SearchError::Parse(_) => "error-search-parse",
            SearchError::EmptyResult => "error-search-empty",
            SearchError::InvalidQuery => "error-search-invalid-query",
        }
    }

    /// Whether the user can reasonably retry the same request.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            SearchError::Network(_) => true,
            SearchError::Http(status) => *status == 429 || *status >= 500,
            SearchError::Parse(_) | SearchError::EmptyResult | SearchError::InvalidQuery => false,
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Network(msg) => write!(f, "Network error: {msg}"),
            SearchError::Http(status) => write!(f, "HTTP error! status: {status}"),
            SearchError::Parse(msg) => write!(f, "Malformed response: {msg}"),
            SearchError::EmptyResult => write!(f, "No images found"),
            SearchError::InvalidQuery => write!(f, "Search query is empty"),
        }
    }
}

impl std::error::Error for SearchError {}
