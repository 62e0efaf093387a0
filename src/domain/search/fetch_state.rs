// SPDX-License-Identifier: MPL-2.0
//! Fetch lifecycle state driving the presentation layer.

use crate::domain::error::SearchError;

/// Exactly one of these is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    /// Nothing has been searched yet.
    #[default]
    Idle,
    /// A page request is in flight.
    Loading,
    /// The last page was applied.
    Success,
    /// The first page of the committed query had no items.
    Empty,
    /// The last request failed; results are left as they were.
    Error(SearchError),
}

impl FetchState {
    /// Returns true while a request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// Returns the active error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&SearchError> {
        match self {
            FetchState::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the banner to show for this state, if any.
    ///
    /// The empty state is reported as [`SearchError::EmptyResult`] so both
    /// share the same banner.
    #[must_use]
    pub fn banner(&self) -> Option<SearchError> {
        match self {
            FetchState::Error(err) => Some(err.clone()),
            FetchState::Empty => Some(SearchError::EmptyResult),
            _ => None,
        }
    }
}
