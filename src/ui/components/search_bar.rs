// SPDX-License-Identifier: MPL-2.0
//! Text search bar with a submit button.

use crate::ui::design_tokens::{radius, sizing, spacing, typography};
use crate::ui::styles::button as button_styles;
use iced::widget::{button, text_input, Row, Text};
use iced::{alignment, Border, Element, Length, Theme};

/// Labels and callbacks for [`view`].
pub struct SearchBar<'a, Message> {
    pub value: &'a str,
    pub placeholder: String,
    pub button_label: String,
    pub on_input: fn(String) -> Message,
    pub on_submit: Message,
    /// Submission is disabled while a first page is loading.
    pub busy: bool,
}

pub fn view<Message: Clone + 'static>(bar: SearchBar<'_, Message>) -> Element<'_, Message> {
    let submit = (!bar.busy && !bar.value.trim().is_empty()).then(|| bar.on_submit.clone());

    let mut input = text_input(bar.placeholder.as_str(), bar.value)
        .on_input(bar.on_input)
        .padding(spacing::XS)
        .size(typography::BODY_LG)
        .width(Length::Fill)
        .style(|theme: &Theme, status| {
            let mut style = text_input::default(theme, status);
            style.border = Border {
                radius: radius::FULL.into(),
                ..style.border
            };
            style
        });
    if let Some(message) = submit.clone() {
        input = input.on_submit(message);
    }

    let search_button = button(
        Text::new(bar.button_label)
            .size(typography::BODY)
            .align_y(alignment::Vertical::Center),
    )
    .height(Length::Fixed(sizing::BUTTON_HEIGHT))
    .padding([0.0, spacing::MD])
    .on_press_maybe(submit)
    .style(button_styles::primary);

    Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .height(Length::Fixed(sizing::INPUT_HEIGHT))
        .push(input)
        .push(search_button)
        .into()
}
