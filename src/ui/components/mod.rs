// SPDX-License-Identifier: MPL-2.0
//! Reusable view components.
//!
//! Components are generic over the message type and take callbacks, so the
//! app layer owns all message routing.

pub mod error_banner;
pub mod lightbox;
pub mod result_grid;
pub mod search_bar;
pub mod voice_panel;
