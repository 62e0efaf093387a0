// SPDX-License-Identifier: MPL-2.0
//! User interface building blocks: tokens, styles, theming and components.

pub mod components;
pub mod design_tokens;
pub mod styles;
pub mod theming;
