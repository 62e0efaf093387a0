// SPDX-License-Identifier: MPL-2.0
//! Search domain types.
//!
//! Value objects for queries and pagination, the result model, and the
//! fetch lifecycle state.

mod fetch_state;
pub mod newtypes;
mod types;

pub use fetch_state::FetchState;
pub use newtypes::{page_size_bounds, PageNumber, PageSize, Query, RequestEpoch};
pub use types::{ItemId, PageResponse, ResultItem, ResultSet};

#[cfg(test)]
pub(crate) use types::sample_item;
