// SPDX-License-Identifier: MPL-2.0
//! Thumbnail grid with photographer captions.

use crate::domain::search::{ItemId, ResultItem};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles::{button as button_styles, container as container_styles};
use iced::widget::image::{self, Handle};
use iced::widget::{button, Column, Container, Row, Space, Stack, Text};
use iced::{alignment, ContentFit, Element, Length};
use std::collections::HashMap;

pub struct ResultGrid<'a, Message> {
    pub items: &'a [ResultItem],
    pub thumbnails: &'a HashMap<ItemId, Handle>,
    pub columns: usize,
    pub on_select: fn(ItemId) -> Message,
}

pub fn view<Message: Clone + 'static>(grid: ResultGrid<'_, Message>) -> Element<'static, Message> {
    let columns = grid.columns.max(1);

    grid.items
        .chunks(columns)
        .fold(Column::new().spacing(spacing::MD), |column, chunk| {
            let row = chunk.iter().fold(
                Row::new().spacing(spacing::MD),
                |row, item| row.push(tile(item, grid.thumbnails.get(&item.id), grid.on_select)),
            );
            // Keep a short last row aligned with the rows above.
            let row = (chunk.len()..columns).fold(row, |row, _| {
                row.push(Space::new().width(Length::Fixed(sizing::THUMBNAIL)))
            });
            column.push(row)
        })
        .into()
}

fn tile<Message: Clone + 'static>(
    item: &ResultItem,
    thumbnail: Option<&Handle>,
    on_select: fn(ItemId) -> Message,
) -> Element<'static, Message> {
    let picture: Element<'static, Message> = match thumbnail {
        Some(handle) => image::Image::new(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Cover)
            .into(),
        None => Container::new(Space::new())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(container_styles::placeholder)
            .into(),
    };

    let caption = Container::new(
        Container::new(Text::new(item.attribution_name.clone()).size(typography::CAPTION))
            .width(Length::Fill)
            .padding(spacing::XXS)
            .style(container_styles::caption),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .align_y(alignment::Vertical::Bottom);

    let content = Stack::new()
        .width(Length::Fixed(sizing::THUMBNAIL))
        .height(Length::Fixed(sizing::THUMBNAIL))
        .push(picture)
        .push(caption);

    button(content)
        .padding(0)
        .on_press(on_select(item.id))
        .style(button_styles::thumbnail)
        .into()
}
