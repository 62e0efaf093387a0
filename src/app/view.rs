// SPDX-License-Identifier: MPL-2.0
//! Main view composition: search bar, voice panel, banners, result grid and
//! the lightbox overlay.

use super::{Message, Notice};
use crate::application::pagination::PaginationController;
use crate::domain::error::SearchError;
use crate::domain::search::{ItemId, ResultItem};
use crate::domain::voice::CaptureState;
use crate::i18n::I18n;
use crate::ui::components::error_banner::{BannerSeverity, ErrorBanner};
use crate::ui::components::lightbox::{self, Lightbox};
use crate::ui::components::result_grid::{self, ResultGrid};
use crate::ui::components::search_bar::{self, SearchBar};
use crate::ui::components::voice_panel::{self, VoicePanel};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles::button as button_styles;
use iced::widget::image::Handle;
use iced::widget::{button, scrollable, Column, Container, Stack, Text};
use iced::{alignment, Element, Length};
use std::collections::HashMap;

/// Everything the main view reads from the application state.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub query_input: &'a str,
    pub controller: &'a PaginationController,
    pub voice_state: &'a CaptureState,
    pub transcript: Option<&'a str>,
    pub voice_available: bool,
    pub thumbnails: &'a HashMap<ItemId, Handle>,
    pub grid_columns: usize,
    pub selected: Option<&'a ResultItem>,
    pub preview: Option<&'a Handle>,
    pub notice: Option<&'a Notice>,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;
    let info = ctx.controller.info();

    let mut content = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::LG)
        .width(Length::Fill)
        .push(search_bar::view(SearchBar {
            value: ctx.query_input,
            placeholder: i18n.tr("search-placeholder"),
            button_label: i18n.tr("search-button"),
            on_input: Message::QueryChanged,
            on_submit: Message::SubmitSearch,
            busy: info.is_loading && info.item_count == 0,
        }))
        .push(voice_panel::view(VoicePanel {
            i18n,
            state: ctx.voice_state,
            transcript: ctx.transcript,
            available: ctx.voice_available,
            on_start: Message::StartListening,
            on_stop: Message::StopListening,
        }));

    if let Some(notice) = ctx.notice {
        content = content.push(
            ErrorBanner::new(notice.severity)
                .message(i18n.tr(&notice.key))
                .on_dismiss(Message::DismissNotice)
                .view(),
        );
    }

    match ctx.controller.fetch_state().banner() {
        // Results stay hidden behind the banner until a retry succeeds.
        Some(SearchError::EmptyResult) => {
            content = content.push(
                ErrorBanner::new(BannerSeverity::Info)
                    .message(i18n.tr(SearchError::EmptyResult.i18n_key()))
                    .view(),
            );
        }
        Some(error) => {
            content = content.push(
                ErrorBanner::new(BannerSeverity::Error)
                    .message(i18n.tr(error.i18n_key()))
                    .action(i18n.tr("retry-button"), Message::Refresh)
                    .view(),
            );
        }
        None => {
            content = content.push(result_grid::view(ResultGrid {
                items: ctx.controller.results().items(),
                thumbnails: ctx.thumbnails,
                columns: ctx.grid_columns,
                on_select: Message::SelectItem,
            }));
            content = content.push(footer(i18n, ctx.controller));
        }
    }

    let base = scrollable(
        Container::new(content)
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
    )
    .height(Length::Fill);

    match ctx.selected {
        Some(item) => Stack::new()
            .push(base)
            .push(lightbox::view(Lightbox {
                i18n,
                item,
                preview: ctx.preview,
                on_close: Message::CloseLightbox,
            }))
            .into(),
        None => base.into(),
    }
}

/// Result count, loading indicator and the "Load more" button.
fn footer<'a>(i18n: &I18n, controller: &PaginationController) -> Element<'a, Message> {
    let info = controller.info();
    let mut column = Column::new()
        .spacing(spacing::SM)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center);

    if info.item_count > 0 {
        let count = info.item_count.to_string();
        let summary = match info.total_available {
            Some(total) => i18n.tr_with_args(
                "results-summary",
                &[("count", count.as_str()), ("total", total.to_string().as_str())],
            ),
            None => i18n.tr_with_args("results-summary-open", &[("count", count.as_str())]),
        };
        column = column.push(Text::new(summary).size(typography::CAPTION));
    }

    if info.is_loading {
        column = column.push(Text::new(i18n.tr("loading-indicator")).size(typography::BODY));
    } else if controller.has_more() {
        column = column.push(
            button(
                Text::new(i18n.tr("load-more-button"))
                    .size(typography::BODY_LG)
                    .align_y(alignment::Vertical::Center),
            )
            .height(Length::Fixed(sizing::BUTTON_HEIGHT))
            .padding([0.0, spacing::LG])
            .on_press(Message::LoadMore)
            .style(button_styles::outline),
        );
    }

    column.into()
}
