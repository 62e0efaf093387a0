// SPDX-License-Identifier: MPL-2.0
//! Microphone button with the capture status line.

use crate::domain::voice::CaptureState;
use crate::i18n::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles::button as button_styles;
use iced::widget::{button, text, Column, Row, Text};
use iced::{alignment, Element, Length, Theme};

pub struct VoicePanel<'a, Message> {
    pub i18n: &'a I18n,
    pub state: &'a CaptureState,
    pub transcript: Option<&'a str>,
    /// False when no recognizer is configured.
    pub available: bool,
    pub on_start: Message,
    pub on_stop: Message,
}

pub fn view<Message: Clone + 'static>(panel: VoicePanel<'_, Message>) -> Element<'static, Message> {
    let i18n = panel.i18n;
    let recording = matches!(panel.state, CaptureState::Listening);

    let (label, on_press) = match panel.state {
        CaptureState::Listening => (i18n.tr("voice-stop-button"), Some(panel.on_stop)),
        // Waiting on the permission prompt or the final transcript.
        CaptureState::Preparing | CaptureState::Transcribing => {
            (i18n.tr("voice-cancel-button"), Some(panel.on_stop))
        }
        CaptureState::Idle | CaptureState::Error(_) => (
            i18n.tr("voice-start-button"),
            panel.available.then_some(panel.on_start),
        ),
    };

    let mic = button(
        Text::new(label)
            .size(typography::BODY)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center),
    )
    .width(Length::Fixed(sizing::MIC_BUTTON))
    .height(Length::Fixed(sizing::MIC_BUTTON))
    .on_press_maybe(on_press)
    .style(button_styles::mic(recording));

    let status_line: Element<'static, Message> = match panel.state {
        CaptureState::Error(error) => Text::new(i18n.tr(error.i18n_key()))
            .size(typography::BODY)
            .style(|_theme: &Theme| text::Style {
                color: Some(palette::ERROR_500),
            })
            .into(),
        _ if !panel.available => Text::new(i18n.tr("error-voice-unavailable"))
            .size(typography::BODY)
            .style(|theme: &Theme| text::Style {
                color: Some(theme.extended_palette().secondary.base.text),
            })
            .into(),
        state => Text::new(i18n.tr(state.status_key()))
            .size(typography::BODY)
            .into(),
    };

    let mut details = Column::new().spacing(spacing::XXS).push(status_line);
    if let Some(transcript) = panel.transcript.filter(|t| !t.is_empty()) {
        details = details.push(
            Text::new(i18n.tr_with_args("voice-transcript", &[("text", transcript)]))
                .size(typography::CAPTION),
        );
    }

    Row::new()
        .spacing(spacing::MD)
        .align_y(alignment::Vertical::Center)
        .push(mic)
        .push(details)
        .into()
}
