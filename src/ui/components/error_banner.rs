// SPDX-License-Identifier: MPL-2.0
//! Inline banner for errors, empty results and warnings.
//!
//! ```ignore
//! ErrorBanner::new(BannerSeverity::Error)
//!     .message(i18n.tr(error.i18n_key()))
//!     .action(i18n.tr("retry-button"), Message::Refresh)
//!     .view()
//! ```

use crate::ui::design_tokens::{palette, radius, sizing, spacing, typography};
use crate::ui::styles::button as button_styles;
use iced::widget::{button, container, text, Container, Row, Space, Text};
use iced::{alignment, Border, Color, Element, Length, Theme};

/// Severity level determines the accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BannerSeverity {
    #[default]
    Error,
    Warning,
    Info,
}

impl BannerSeverity {
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            BannerSeverity::Error => palette::ERROR_500,
            BannerSeverity::Warning => palette::WARNING_500,
            BannerSeverity::Info => palette::INFO_500,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorBanner<Message> {
    severity: BannerSeverity,
    message: String,
    action: Option<(String, Message)>,
    dismiss: Option<Message>,
}

impl<Message: Clone + 'static> ErrorBanner<Message> {
    #[must_use]
    pub fn new(severity: BannerSeverity) -> Self {
        Self {
            severity,
            message: String::new(),
            action: None,
            dismiss: None,
        }
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Adds a button emitting `message` (e.g. retry).
    #[must_use]
    pub fn action(mut self, label: impl Into<String>, message: Message) -> Self {
        self.action = Some((label.into(), message));
        self
    }

    /// Adds a close glyph emitting `message`.
    #[must_use]
    pub fn on_dismiss(mut self, message: Message) -> Self {
        self.dismiss = Some(message);
        self
    }

    pub fn view(self) -> Element<'static, Message> {
        let accent = self.severity.color();

        let mut row = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(
                Text::new(self.message)
                    .size(typography::BODY)
                    .style(move |_theme: &Theme| text::Style {
                        color: Some(accent),
                    }),
            )
            .push(Space::new().width(Length::Fill));

        if let Some((label, message)) = self.action {
            row = row.push(
                button(Text::new(label).size(typography::BODY))
                    .on_press(message)
                    .style(button_styles::primary),
            );
        }
        if let Some(message) = self.dismiss {
            row = row.push(
                button(Text::new("×").size(typography::BODY_LG))
                    .on_press(message)
                    .style(button_styles::overlay(palette::WHITE, 0.0, 0.3)),
            );
        }

        Container::new(row)
            .width(Length::Fill)
            .max_width(sizing::BANNER_MAX_WIDTH)
            .padding(spacing::SM)
            .style(move |theme: &Theme| {
                container::Style::default()
                    .background(theme.extended_palette().background.weak.color)
                    .border(Border::default().color(accent).width(1.0).rounded(radius::MD))
                    .color(theme.palette().text)
            })
            .into()
    }
}
