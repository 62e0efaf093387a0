// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{opacity, palette, radius};
use iced::widget::container::Style;
use iced::{Border, Color, Theme};

fn scrim(alpha: f32) -> Style {
    Style::default()
        .background(Color {
            a: alpha,
            ..palette::BLACK
        })
        .color(palette::WHITE)
}

/// Photographer strip along the bottom of a thumbnail.
pub fn caption(_theme: &Theme) -> Style {
    scrim(opacity::OVERLAY_MEDIUM)
}

/// Lightbox backdrop.
pub fn backdrop(_theme: &Theme) -> Style {
    scrim(opacity::OVERLAY_PRESSED)
}

/// Tile shown until the thumbnail arrives.
pub fn placeholder(theme: &Theme) -> Style {
    Style::default()
        .background(theme.extended_palette().background.weak.color)
        .border(Border::default().rounded(radius::MD))
}
