// SPDX-License-Identifier: MPL-2.0
//! Full-window preview of one result.

use crate::domain::search::ResultItem;
use crate::i18n::I18n;
use crate::ui::design_tokens::{opacity, palette, spacing, typography};
use crate::ui::styles::{button as button_styles, container as container_styles};
use iced::widget::image::{self, Handle};
use iced::widget::{button, text, Column, Container, Row, Space, Text};
use iced::{alignment, ContentFit, Element, Length, Theme};

pub struct Lightbox<'a, Message> {
    pub i18n: &'a I18n,
    pub item: &'a ResultItem,
    /// Large rendition, once downloaded. A loading caption is shown until then.
    pub preview: Option<&'a Handle>,
    pub on_close: Message,
}

pub fn view<Message: Clone + 'static>(lightbox: Lightbox<'_, Message>) -> Element<'static, Message> {
    let i18n = lightbox.i18n;
    let item = lightbox.item;

    let close = button(Text::new("×").size(typography::CLOSE_GLYPH))
        .on_press(lightbox.on_close)
        .style(button_styles::overlay(
            palette::WHITE,
            0.0,
            opacity::OVERLAY_MEDIUM,
        ));
    let header = Row::new()
        .push(Space::new().width(Length::Fill))
        .push(close);

    let picture: Element<'static, Message> = match lightbox.preview {
        Some(handle) => image::Image::new(handle.clone())
            .width(Length::FillPortion(9))
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        None => Text::new(i18n.tr("image-loading"))
            .size(typography::BODY_LG)
            .into(),
    };

    let info = Column::new()
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Center)
        .push(
            Text::new(i18n.tr_with_args(
                "photographer-credit",
                &[("name", item.attribution_name.as_str())],
            ))
            .size(typography::BODY_LG),
        )
        .push(
            Text::new(i18n.tr_with_args(
                "lightbox-size",
                &[("size", item.dimensions_label().as_str())],
            ))
            .size(typography::BODY)
            .style(|_theme: &Theme| text::Style {
                color: Some(palette::GRAY_200),
            }),
        );

    let body = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::LG)
        .align_x(alignment::Horizontal::Center)
        .push(header)
        .push(
            Container::new(picture)
                .width(Length::Fill)
                .height(Length::FillPortion(7))
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center),
        )
        .push(info);

    Container::new(body)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(container_styles::backdrop)
        .into()
}
