// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`:
//!
//! - [`pexels`]: image search over HTTP (implements [`ImageSearch`])
//! - [`voice`]: speech capture through an external recognizer (implements
//!   [`VoiceEngine`] and [`MicrophonePermission`])
//!
//! [`ImageSearch`]: crate::application::port::ImageSearch
//! [`VoiceEngine`]: crate::application::port::VoiceEngine
//! [`MicrophonePermission`]: crate::application::port::MicrophonePermission

pub mod pexels;
pub mod voice;

pub use pexels::{ImageDownloader, PexelsClient, SearchEndpoint};
pub use voice::{CommandVoiceEngine, CpalMicrophone};
