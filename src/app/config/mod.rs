// SPDX-License-Identifier: MPL-2.0
//! User settings stored in `settings.toml`.
//!
//! ```toml
//! [general]
//! language = "fr"
//! theme_mode = "dark"
//!
//! [search]
//! api_key = "..."
//! page_size = 24
//! default_query = "lighthouse"
//!
//! [voice]
//! locale = "fr-FR"
//! command = ["whisper-stream", "--lang", "{locale}"]
//! ```
//!
//! Every key is optional. Numeric settings are clamped when read through
//! the accessor methods, never rejected. The file lives in the directory
//! chosen by [`paths`](crate::app::paths); `VOICE_LENS_API_KEY` takes
//! precedence over `[search].api_key`.

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::search::PageSize;
use crate::error::Result;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// i18n key of the notice shown when `settings.toml` cannot be parsed.
pub const LOAD_ERROR_KEY: &str = "notification-config-load-error";

pub const ENV_API_KEY: &str = "VOICE_LENS_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    /// UI locale such as `en-US`. Unset means the OS locale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub theme_mode: ThemeMode,
}

#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Thumbnails per grid row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_columns: Option<u16>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_owned(),
            api_key: None,
            page_size: Some(DEFAULT_PAGE_SIZE),
            default_query: Some(DEFAULT_QUERY.to_owned()),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            grid_columns: Some(DEFAULT_GRID_COLUMNS),
        }
    }
}

// Keeps the credential out of logs and panic messages.
impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("page_size", &self.page_size)
            .field("default_query", &self.default_query)
            .field("timeout_secs", &self.timeout_secs)
            .field("grid_columns", &self.grid_columns)
            .finish()
    }
}

impl SearchConfig {
    #[must_use]
    pub fn page_size(&self) -> PageSize {
        PageSize::new(self.page_size.unwrap_or(DEFAULT_PAGE_SIZE))
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        let secs = self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS))
    }

    #[must_use]
    pub fn grid_columns(&self) -> usize {
        let columns = self.grid_columns.unwrap_or(DEFAULT_GRID_COLUMNS);
        columns.clamp(MIN_GRID_COLUMNS, MAX_GRID_COLUMNS).into()
    }

    #[must_use]
    pub fn default_query(&self) -> &str {
        self.default_query.as_deref().unwrap_or(DEFAULT_QUERY)
    }

    /// Credential sent with every request. Empty when none is configured.
    #[must_use]
    pub fn resolved_api_key(&self) -> String {
        resolve_api_key(std::env::var(ENV_API_KEY).ok(), self.api_key.as_deref())
    }
}

fn resolve_api_key(from_env: Option<String>, from_file: Option<&str>) -> String {
    match from_env {
        Some(key) if !key.trim().is_empty() => key,
        _ => from_file.unwrap_or_default().to_owned(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VoiceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Recognizer argv; `{locale}` is replaced before spawning. Empty
    /// disables voice search.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            locale: Some(DEFAULT_VOICE_LOCALE.to_owned()),
            command: Vec::new(),
        }
    }
}

impl VoiceConfig {
    #[must_use]
    pub fn locale(&self) -> &str {
        self.locale.as_deref().unwrap_or(DEFAULT_VOICE_LOCALE)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub search: SearchConfig,
    pub voice: VoiceConfig,
}

fn settings_path(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|dir| dir.join(CONFIG_FILE))
}

/// Reads settings from the resolved config directory.
///
/// Never fails: a missing file yields defaults, and an unreadable one
/// yields defaults plus [`LOAD_ERROR_KEY`] for the UI to display.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    match settings_path(base_dir) {
        Some(path) if path.exists() => match load_from_path(&path) {
            Ok(config) => (config, None),
            Err(_) => (Config::default(), Some(LOAD_ERROR_KEY.to_owned())),
        },
        _ => (Config::default(), None),
    }
}

/// # Errors
///
/// I/O failures and TOML syntax or type errors.
pub fn load_from_path(path: &Path) -> Result<Config> {
    Ok(toml::from_str(&fs::read_to_string(path)?)?)
}

/// Writes settings to the resolved config directory. Does nothing on
/// platforms without one.
///
/// # Errors
///
/// See [`save_to_path`].
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// # Errors
///
/// See [`save_to_path`].
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    match settings_path(base_dir) {
        Some(path) => save_to_path(config, &path),
        None => Ok(()),
    }
}

/// Creates missing parent directories, then writes `config` as TOML.
///
/// # Errors
///
/// I/O failures and serialization errors.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(config)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    fn write_settings(content: &str) -> tempfile::TempDir {
        let dir = tempdir().expect("temp dir");
        fs::write(dir.path().join(CONFIG_FILE), content).expect("write settings");
        dir
    }

    #[test]
    fn every_section_survives_a_save_load_cycle() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_owned()),
                theme_mode: ThemeMode::Light,
            },
            search: SearchConfig {
                api_key: Some("abc123".to_owned()),
                page_size: Some(24),
                default_query: Some("mountains".to_owned()),
                grid_columns: Some(4),
                ..SearchConfig::default()
            },
            voice: VoiceConfig {
                locale: Some("fr-FR".to_owned()),
                command: vec!["stt".into(), "--lang".into(), "{locale}".into()],
            },
        };
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join(CONFIG_FILE);

        save_to_path(&config, &path).expect("save");

        assert_eq!(load_from_path(&path).expect("load"), config);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let dir = write_settings("not = valid = toml");
        let result = load_from_path(&dir.path().join(CONFIG_FILE));
        assert!(matches!(result, Err(Error::Config(_))), "{result:?}");
    }

    #[test]
    fn broken_file_falls_back_with_notice() {
        let dir = write_settings("[search\npage_size = ");
        let (config, notice) = load_with_override(Some(dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(notice.as_deref(), Some(LOAD_ERROR_KEY));
    }

    #[test]
    fn missing_file_falls_back_silently() {
        let dir = tempdir().expect("temp dir");
        let (config, notice) = load_with_override(Some(dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(notice.is_none());
    }

    #[test]
    fn save_with_override_creates_settings_file() {
        let dir = tempdir().expect("temp dir");
        save_with_override(&Config::default(), Some(dir.path().to_path_buf())).expect("save");
        assert!(dir.path().join(CONFIG_FILE).is_file());
    }

    #[test]
    fn unspecified_keys_take_defaults() {
        let dir = write_settings("[search]\npage_size = 30\n");
        let loaded = load_from_path(&dir.path().join(CONFIG_FILE)).expect("load");

        assert_eq!(loaded.search.page_size().value(), 30);
        assert_eq!(loaded.search.endpoint, DEFAULT_SEARCH_ENDPOINT);
        assert_eq!(loaded.search.default_query(), DEFAULT_QUERY);
        assert_eq!(loaded.voice.locale(), DEFAULT_VOICE_LOCALE);
        assert_eq!(loaded.general.theme_mode, ThemeMode::System);
    }

    #[test]
    fn theme_mode_accepts_any_case() {
        let config: Config = toml::from_str("[general]\ntheme_mode = \"DARK\"\n").expect("parse");
        assert_eq!(config.general.theme_mode, ThemeMode::Dark);
        assert!(toml::from_str::<Config>("[general]\ntheme_mode = \"sepia\"\n").is_err());
    }

    #[test]
    fn numeric_settings_are_clamped_on_read() {
        let search = SearchConfig {
            page_size: Some(500),
            timeout_secs: Some(0),
            grid_columns: Some(40),
            ..SearchConfig::default()
        };
        assert_eq!(search.page_size().value(), 80);
        assert_eq!(search.timeout(), Duration::from_secs(MIN_TIMEOUT_SECS));
        assert_eq!(search.grid_columns(), usize::from(MAX_GRID_COLUMNS));
    }

    #[test]
    fn env_credential_overrides_file_unless_blank() {
        assert_eq!(resolve_api_key(Some("env".into()), Some("file")), "env");
        assert_eq!(resolve_api_key(Some("  ".into()), Some("file")), "file");
        assert_eq!(resolve_api_key(None, None), "");
    }

    #[test]
    fn debug_output_hides_credential() {
        let search = SearchConfig {
            api_key: Some("secret".into()),
            ..SearchConfig::default()
        };
        assert!(!format!("{search:?}").contains("secret"));
    }
}
