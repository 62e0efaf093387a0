// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core search logic with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`error`]: Domain error types ([`SearchError`](error::SearchError),
//!   [`VoiceError`](error::VoiceError))
//! - [`search`]: Search types ([`Query`](search::Query), [`PageNumber`](search::PageNumber),
//!   [`ResultItem`](search::ResultItem), [`ResultSet`](search::ResultSet),
//!   [`FetchState`](search::FetchState))
//! - [`voice`]: Voice capture types ([`CaptureState`](voice::CaptureState),
//!   [`VoiceEvent`](voice::VoiceEvent))

pub mod error;
pub mod search;
pub mod voice;
