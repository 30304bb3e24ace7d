use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::i18n::{resolve_locale, Locale};
use crate::theme::{parse_theme_mode, ThemeMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("neither XDG_CONFIG_HOME nor HOME is set")]
    MissingHomeDirectory,
}

const APP_DIR: &str = "palm-classifier";
const APP_CONFIG_FILE: &str = "config.json";
const SERVER_URL_ENV: &str = "PALM_CLASSIFIER_SERVER_URL";

pub const DEFAULT_SERVER_URL: &str = "https://palm-tree-classifier-server.onrender.com";

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct AppConfig {
    #[serde(default)]
    pub(crate) server_url: Option<String>,
    #[serde(default)]
    pub(crate) language: Option<String>,
    #[serde(default)]
    pub(crate) theme: Option<String>,
}

/// Values the session starts with. The server URL never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupSettings {
    pub server_url: String,
    pub locale: Locale,
    pub theme: ThemeMode,
}

impl Default for StartupSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            locale: Locale::default(),
            theme: ThemeMode::default(),
        }
    }
}

pub fn load_startup_settings() -> StartupSettings {
    let config = load_app_config();
    let env_server_url = std::env::var(SERVER_URL_ENV).ok();
    resolve_startup_settings(&config, env_server_url.as_deref())
}

pub(crate) fn resolve_startup_settings(
    config: &AppConfig,
    env_server_url: Option<&str>,
) -> StartupSettings {
    let server_url = env_server_url
        .and_then(normalize_server_url)
        .or_else(|| config.server_url.as_deref().and_then(normalize_server_url))
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

    let theme = config
        .theme
        .as_deref()
        .and_then(parse_theme_mode)
        .unwrap_or_default();

    StartupSettings {
        server_url,
        locale: resolve_locale(config.language.as_deref()),
        theme,
    }
}

/// Trim whitespace and trailing slashes; empty values count as unset.
pub(crate) fn normalize_server_url(value: &str) -> Option<String> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(err) => {
            tracing::warn!(%err, "cannot locate config.json; using defaults");
            return AppConfig::default();
        }
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
