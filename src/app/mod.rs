// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between search, voice capture
//! and the result views.
//!
//! The `App` struct wires together the pagination controller, the voice
//! search orchestrator and localization, and translates messages into side
//! effects like page requests, thumbnail downloads or microphone prompts.
//! Business rules live in `application`; this layer only routes outcomes.

pub mod config;
mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::application::pagination::PaginationController;
use crate::application::port::{ImageSearch, MicrophonePermission, SearchFuture, VoiceEngine};
use crate::application::voice_search::SearchOrchestrator;
use crate::diagnostics::{DiagnosticsCollector, DiagnosticsHandle, QuerySource};
use crate::domain::error::SearchError;
use crate::domain::search::{ItemId, PageNumber, PageSize, Query};
use crate::error::Result;
use crate::i18n::I18n;
use crate::infrastructure::{
    CommandVoiceEngine, CpalMicrophone, ImageDownloader, PexelsClient, SearchEndpoint,
};
use crate::ui::components::error_banner::BannerSeverity;
use crate::ui::theming::ThemeMode;
use config::Config;
use iced::widget::image::Handle;
use iced::{window, Element, Subscription, Task, Theme};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;
pub const WINDOW_DEFAULT_WIDTH: u32 = 900;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 520;

/// External services the application talks to.
#[derive(Clone)]
pub struct Services {
    pub search: Arc<dyn ImageSearch>,
    /// Thumbnail and preview downloads. `None` disables image loading.
    pub downloader: Option<ImageDownloader>,
    pub voice: Arc<dyn VoiceEngine>,
    pub microphone: Arc<dyn MicrophonePermission>,
    /// False when no recognizer command is configured.
    pub voice_available: bool,
    /// False when no search credential is configured.
    pub has_credential: bool,
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("downloader", &self.downloader.is_some())
            .field("voice_available", &self.voice_available)
            .field("has_credential", &self.has_credential)
            .finish_non_exhaustive()
    }
}

impl Services {
    /// Builds the production adapters described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = PexelsClient::new(SearchEndpoint {
            url: config.search.endpoint.clone(),
            api_key: config.search.resolved_api_key(),
            timeout: config.search.timeout(),
        })?;
        let voice = CommandVoiceEngine::new(config.voice.command.clone());

        Ok(Self {
            downloader: Some(client.downloader()),
            has_credential: client.has_credential(),
            search: Arc::new(client),
            voice_available: voice.is_configured(),
            voice: Arc::new(voice),
            microphone: Arc::new(CpalMicrophone),
        })
    }

    /// Services used when the HTTP client could not be built: every search
    /// fails with `reason` so the retry banner stays reachable.
    fn offline(config: &Config, reason: String) -> Self {
        let voice = CommandVoiceEngine::new(config.voice.command.clone());
        Self {
            search: Arc::new(Unreachable(reason)),
            downloader: None,
            voice_available: voice.is_configured(),
            voice: Arc::new(voice),
            microphone: Arc::new(CpalMicrophone),
            has_credential: false,
        }
    }
}

/// Search provider that always fails with a network error.
struct Unreachable(String);

impl ImageSearch for Unreachable {
    fn fetch(&self, _query: &Query, _page: PageNumber, _page_size: PageSize) -> SearchFuture {
        let reason = self.0.clone();
        Box::pin(async move { Err(SearchError::Network(reason)) })
    }
}

/// Dismissible banner shown above the results.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub severity: BannerSeverity,
    /// i18n key of the message.
    pub key: String,
}

impl Notice {
    fn warning(key: impl Into<String>) -> Self {
        Self {
            severity: BannerSeverity::Warning,
            key: key.into(),
        }
    }

    fn error(key: impl Into<String>) -> Self {
        Self {
            severity: BannerSeverity::Error,
            key: key.into(),
        }
    }
}

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    config: Config,
    controller: PaginationController,
    orchestrator: SearchOrchestrator,
    services: Services,
    /// Current contents of the search field.
    query_input: String,
    /// Decoded thumbnails of the current result set.
    thumbnails: HashMap<ItemId, Handle>,
    /// Item shown in the lightbox.
    selected: Option<ItemId>,
    preview: Option<Handle>,
    notice: Option<Notice>,
    diagnostics: DiagnosticsCollector,
    diagnostics_handle: DiagnosticsHandle,
    /// Where to export the diagnostics report on close.
    diagnostics_path: Option<PathBuf>,
    verbose: bool,
    theme_mode: ThemeMode,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("fetch_state", self.controller.fetch_state())
            .field("results", &self.controller.results().len())
            .field("voice", self.orchestrator.state())
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

/// Builds the window settings.
///
/// Close requests are handled by the application so the voice session is
/// released and diagnostics are written before the window goes away.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a Fn boot closure; flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads configuration, builds the services and searches the initial
    /// query.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_overrides(flags.config_dir.clone());
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);

        let (services, setup_error) = match Services::from_config(&config) {
            Ok(services) => (services, None),
            Err(err) => {
                let key = err.i18n_key();
                (Services::offline(&config, err.to_string()), Some(key))
            }
        };

        let mut app = Self::with_services(i18n, config, services);
        app.diagnostics_path = flags.diagnostics_path;
        app.verbose = flags.verbose;
        app.diagnostics = DiagnosticsCollector::default().with_verbose(flags.verbose);
        app.diagnostics_handle = app.diagnostics.handle();

        if !app.services.has_credential {
            app.notice = Some(Notice::warning("notification-missing-api-key"));
        }
        if let Some(key) = config_warning {
            app.diagnostics_handle.log_warning(key.clone());
            app.notice = Some(Notice::warning(key));
        }
        if let Some(key) = setup_error {
            app.diagnostics_handle.log_error(key);
            app.notice = Some(Notice::error(key));
        }

        let query = flags
            .initial_query
            .unwrap_or_else(|| app.config.search.default_query().to_string());
        app.query_input.clone_from(&query);
        let task = app.start_search(&query, QuerySource::Startup);

        (app, task)
    }

    /// Builds an idle application on top of the given services.
    fn with_services(i18n: I18n, config: Config, services: Services) -> Self {
        let controller = PaginationController::new(config.search.page_size());
        let orchestrator =
            SearchOrchestrator::new(Arc::clone(&services.voice), config.voice.locale());
        let diagnostics = DiagnosticsCollector::default();
        let diagnostics_handle = diagnostics.handle();

        Self {
            i18n,
            theme_mode: config.general.theme_mode,
            config,
            controller,
            orchestrator,
            services,
            query_input: String::new(),
            thumbnails: HashMap::new(),
            selected: None,
            preview: None,
            notice: None,
            diagnostics,
            diagnostics_handle,
            diagnostics_path: None,
            verbose: false,
        }
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.controller.query() {
            Some(query) => format!("{} - {app_name}", query.as_str()),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let tick_sub =
            subscription::create_tick_subscription(self.diagnostics_path.is_some() || self.verbose);
        Subscription::batch([event_sub, tick_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        self.handle_message(message)
    }

    fn view(&self) -> Element<'_, Message> {
        let selected = self
            .selected
            .and_then(|id| self.controller.results().get(id));

        view::view(view::ViewContext {
            i18n: &self.i18n,
            query_input: &self.query_input,
            controller: &self.controller,
            voice_state: self.orchestrator.state(),
            transcript: self.orchestrator.transcript(),
            voice_available: self.services.voice_available,
            thumbnails: &self.thumbnails,
            grid_columns: self.config.search.grid_columns(),
            selected,
            preview: self.preview.as_ref(),
            notice: self.notice.as_ref(),
        })
    }
}
