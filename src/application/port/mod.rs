// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`image_search`]: Remote image search, one page per call
//! - [`voice`]: Speech recognition sessions and microphone permission
//!
//! # Design Notes
//!
//! - All traits use domain types only (no Iced handles, no `reqwest` types)
//! - Traits are `Send + Sync` so adapters can be shared behind an `Arc`
//! - Asynchronous operations return boxed `'static` futures or streams that
//!   callers wrap in Iced's `Task`

pub mod image_search;
pub mod voice;

// Re-export main types for convenience
pub use image_search::{ImageSearch, SearchFuture};
pub use voice::{MicrophonePermission, SessionControl, VoiceEngine, VoiceEventSender, VoiceSession};
