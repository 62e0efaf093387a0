// SPDX-License-Identifier: MPL-2.0
//! Image search port definition.
//!
//! This module defines the [`ImageSearch`] trait implemented by remote search
//! providers. Each call maps to exactly one outbound request; retry policy,
//! if any, belongs to the caller.

use crate::domain::error::SearchError;
use crate::domain::search::{PageNumber, PageResponse, PageSize, Query};
use futures_util::future::BoxFuture;

/// Future resolving to one page of results.
pub type SearchFuture = BoxFuture<'static, Result<PageResponse, SearchError>>;

/// Fetches pages of image results for a query.
///
/// Implementations return a `'static` future so callers can hand it to an
/// Iced `Task` without borrowing the provider.
pub trait ImageSearch: Send + Sync {
    /// Requests page `page` (one-based) of `query` with `page_size` items.
    ///
    /// # Errors
    ///
    /// The future resolves to [`SearchError::Network`] on transport failure,
    /// [`SearchError::Http`] for a non-success status, and
    /// [`SearchError::Parse`] when the body is not well-formed.
    fn fetch(&self, query: &Query, page: PageNumber, page_size: PageSize) -> SearchFuture;
}
