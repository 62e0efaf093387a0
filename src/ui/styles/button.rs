// SPDX-License-Identifier: MPL-2.0
//! Button styles.

use crate::ui::design_tokens::{opacity, palette, radius, shadow};
use iced::widget::button::{Status, Style};
use iced::{Background, Border, Color, Shadow, Theme};

fn style(background: Option<Color>, text_color: Color, border: Border, shadow: Shadow) -> Style {
    Style {
        background: background.map(Background::Color),
        text_color,
        border,
        shadow,
        snap: true,
    }
}

fn outlined(color: Color, width: f32, corner: f32) -> Border {
    Border {
        color,
        width,
        radius: corner.into(),
    }
}

fn rounded(corner: f32) -> Border {
    Border {
        radius: corner.into(),
        ..Border::default()
    }
}

fn disabled() -> Style {
    style(
        Some(palette::GRAY_200),
        palette::GRAY_400,
        outlined(palette::GRAY_400, 1.0, radius::SM),
        shadow::NONE,
    )
}

/// Accent-filled button: Search, Retry.
pub fn primary(_theme: &Theme, status: Status) -> Style {
    let (fill, edge, lift) = match status {
        Status::Hovered => (palette::PRIMARY_400, palette::PRIMARY_500, shadow::MD),
        Status::Active | Status::Pressed => (palette::PRIMARY_500, palette::PRIMARY_600, shadow::SM),
        Status::Disabled => return disabled(),
    };
    style(Some(fill), palette::WHITE, outlined(edge, 1.0, radius::SM), lift)
}

/// Accent outline on the page background: Load more.
pub fn outline(theme: &Theme, status: Status) -> Style {
    let accent = match status {
        Status::Hovered => palette::PRIMARY_400,
        Status::Active | Status::Pressed => palette::PRIMARY_500,
        Status::Disabled => return disabled(),
    };
    let surface = theme.extended_palette().background.base.color;
    style(Some(surface), accent, outlined(accent, 2.0, radius::SM), shadow::NONE)
}

/// Circular mic button; red while a session is capturing.
pub fn mic(recording: bool) -> impl Fn(&Theme, Status) -> Style {
    let base = if recording {
        palette::ERROR_500
    } else {
        palette::PRIMARY_500
    };
    move |_theme, status| {
        let fill = match status {
            Status::Disabled => palette::GRAY_200,
            Status::Hovered => Color {
                a: opacity::OVERLAY_HOVER,
                ..base
            },
            Status::Active | Status::Pressed => base,
        };
        style(Some(fill), palette::WHITE, rounded(radius::FULL), shadow::MD)
    }
}

/// Black scrim button drawn on top of imagery. `rest` and `hover` are the
/// scrim alpha for those states.
pub fn overlay(text_color: Color, rest: f32, hover: f32) -> impl Fn(&Theme, Status) -> Style {
    move |_theme, status| {
        let a = match status {
            Status::Hovered => hover,
            Status::Pressed => opacity::OVERLAY_PRESSED,
            Status::Active | Status::Disabled => rest,
        };
        style(
            Some(Color { a, ..palette::BLACK }),
            text_color,
            rounded(radius::MD),
            shadow::NONE,
        )
    }
}

/// Grid tile; only the hover ring is visible.
pub fn thumbnail(_theme: &Theme, status: Status) -> Style {
    let ring = if status == Status::Hovered {
        palette::PRIMARY_400
    } else {
        Color::TRANSPARENT
    };
    style(None, palette::WHITE, outlined(ring, 2.0, radius::MD), shadow::NONE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mic_turns_red_while_recording() {
        let idle = mic(false)(&Theme::Light, Status::Active);
        let recording = mic(true)(&Theme::Light, Status::Active);
        assert_eq!(recording.background, Some(Background::Color(palette::ERROR_500)));
        assert_ne!(idle.background, recording.background);
    }

    #[test]
    fn disabled_buttons_share_gray_fill() {
        for style in [
            primary(&Theme::Dark, Status::Disabled),
            outline(&Theme::Dark, Status::Disabled),
        ] {
            assert_eq!(style.background, Some(Background::Color(palette::GRAY_200)));
        }
    }

    #[test]
    fn thumbnail_ring_only_on_hover() {
        let rest = thumbnail(&Theme::Light, Status::Active);
        let hover = thumbnail(&Theme::Light, Status::Hovered);
        assert_eq!(rest.border.color, Color::TRANSPARENT);
        assert_eq!(hover.border.color, palette::PRIMARY_400);
    }
}
