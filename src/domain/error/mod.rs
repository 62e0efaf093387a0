// SPDX-License-Identifier: MPL-2.0
//! Domain error types.
//!
//! This module provides pure domain error types that are independent
//! of external crates and infrastructure concerns. Errors never cross a
//! component boundary as panics; they travel as typed `Result` values and
//! end up as a translated banner through [`SearchError::i18n_key`] or
//! [`VoiceError::i18n_key`].

mod search;
mod voice;

pub use search::SearchError;
pub use voice::VoiceError;
