// SPDX-License-Identifier: MPL-2.0
//! Where `settings.toml` lives.
//!
//! The first source that yields a directory wins: an explicit argument,
//! then `--config-dir`, then [`ENV_CONFIG_DIR`], then the platform config
//! directory joined with `VoiceLens`.

use std::path::PathBuf;
use std::sync::OnceLock;

const APP_DIR_NAME: &str = "VoiceLens";

pub const ENV_CONFIG_DIR: &str = "VOICE_LENS_CONFIG_DIR";

static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records `--config-dir`. Returns `false` when called a second time; the
/// first value stays in effect.
pub fn init_cli_overrides(config_dir: Option<String>) -> bool {
    CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_ok()
}

/// Resolved config directory, or `None` on platforms without one.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

pub fn get_app_config_dir_with_override(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit
        .or_else(|| CLI_CONFIG_DIR.get().cloned().flatten())
        .or_else(from_env)
        .or_else(|| dirs::config_dir().map(|base| base.join(APP_DIR_NAME)))
}

fn from_env() -> Option<PathBuf> {
    std::env::var_os(ENV_CONFIG_DIR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Holds the env lock and restores the variable on drop.
    struct EnvVar<'a> {
        _guard: MutexGuard<'a, ()>,
    }

    impl EnvVar<'_> {
        fn set(value: Option<&str>) -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            match value {
                Some(value) => std::env::set_var(ENV_CONFIG_DIR, value),
                None => std::env::remove_var(ENV_CONFIG_DIR),
            }
            Self { _guard: guard }
        }
    }

    impl Drop for EnvVar<'_> {
        fn drop(&mut self) {
            std::env::remove_var(ENV_CONFIG_DIR);
        }
    }

    fn ends_with_app_dir(path: &std::path::Path) -> bool {
        path.file_name().is_some_and(|name| name == APP_DIR_NAME)
    }

    #[test]
    fn platform_default_uses_app_directory() {
        let _env = EnvVar::set(None);
        if let Some(path) = get_app_config_dir() {
            assert!(ends_with_app_dir(&path), "{}", path.display());
        }
    }

    #[test]
    fn env_var_is_used_when_set() {
        let _env = EnvVar::set(Some("/srv/voice_lens"));
        assert_eq!(get_app_config_dir(), Some(PathBuf::from("/srv/voice_lens")));
    }

    #[test]
    fn blank_env_var_is_ignored() {
        let _env = EnvVar::set(Some(""));
        if let Some(path) = get_app_config_dir() {
            assert!(ends_with_app_dir(&path));
        }
    }

    #[test]
    fn explicit_directory_beats_env_var() {
        let _env = EnvVar::set(Some("/srv/voice_lens"));
        let explicit = PathBuf::from("/tmp/lens-test");
        assert_eq!(
            get_app_config_dir_with_override(Some(explicit.clone())),
            Some(explicit)
        );
    }
}
