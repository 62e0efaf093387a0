// SPDX-License-Identifier: MPL-2.0
//! `voice_lens` is a voice-driven stock photo search built with the Iced GUI
//! framework.
//!
//! Queries are typed or spoken, results are fetched page by page from an
//! image search API and shown as a thumbnail grid with a lightbox preview.
//!
//! # Layers
//!
//! - [`domain`]: value types and errors, free of external dependencies
//! - [`application`]: the pagination controller, the voice search
//!   orchestrator and the port traits they rely on
//! - [`infrastructure`]: HTTP search client and speech capture adapters
//! - [`app`] and [`ui`]: the Iced application and its widgets
//! - [`config`], [`i18n`], [`diagnostics`], [`error`]: supporting services

#![doc(html_root_url = "https://docs.rs/voice_lens/0.1.0")]

pub mod app;
pub mod application;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod ui;

pub use app::config;
