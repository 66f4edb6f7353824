//! Client settings (API base URL, paging, search debounce).
//!
//! Stored in `~/.config/letterplay/settings.toml`:
//!
//! ```toml
//! [api]
//! base_url = "http://127.0.0.1:8000"
//! page_limit = 20
//!
//! [search]
//! debounce_ms = 500
//! ```
//!
//! The base URL resolves as: `LETTERPLAY_API_URL` env var, then the settings
//! file, then the built-in default.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const BASE_URL_ENV: &str = "LETTERPLAY_API_URL";

/// Directory holding `settings.toml` and `session.toml`.
pub fn config_dir() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("letterplay")
}

/// Canonical path to the settings file.
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.toml")
}

/// Where the effective base URL came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingSource {
    CommandLine,
    EnvVar(&'static str),
    SettingsFile,
    Default,
}

impl std::fmt::Display for SettingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CommandLine => write!(f, "command line"),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::SettingsFile => write!(f, "settings file"),
            Self::Default => write!(f, "default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub base_url_source: SettingSource,
    pub page_limit: u32,
    pub debounce: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            base_url_source: SettingSource::Default,
            page_limit: DEFAULT_PAGE_LIMIT,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

impl Settings {
    /// Load from the canonical settings file and environment.
    pub fn load() -> Self {
        Self::load_from(&settings_path(), std::env::var(BASE_URL_ENV).ok())
    }

    /// Load from an explicit file, with an optional env override for the base URL.
    ///
    /// A missing or unparsable file yields defaults.
    pub fn load_from(path: &Path, env_base_url: Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(doc) = read_doc(path) {
            if let Some(url) = doc
                .get("api")
                .and_then(|api| api.get("base_url"))
                .and_then(toml::Value::as_str)
                .filter(|s| !s.trim().is_empty())
            {
                settings.base_url = trim_base_url(url);
                settings.base_url_source = SettingSource::SettingsFile;
            }
            if let Some(limit) = doc
                .get("api")
                .and_then(|api| api.get("page_limit"))
                .and_then(toml::Value::as_integer)
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n > 0)
            {
                settings.page_limit = limit;
            }
            if let Some(ms) = doc
                .get("search")
                .and_then(|s| s.get("debounce_ms"))
                .and_then(toml::Value::as_integer)
                .and_then(|n| u64::try_from(n).ok())
            {
                settings.debounce = Duration::from_millis(ms);
            }
        }

        if let Some(url) = env_base_url.filter(|s| !s.trim().is_empty()) {
            settings.base_url = trim_base_url(&url);
            settings.base_url_source = SettingSource::EnvVar(BASE_URL_ENV);
        }

        log::debug!(
            "settings: base_url={} ({}), page_limit={}, debounce={}ms",
            settings.base_url,
            settings.base_url_source,
            settings.page_limit,
            settings.debounce.as_millis()
        );
        settings
    }

    /// Apply a one-off override (e.g. a `--api-url` flag).
    pub fn with_base_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.base_url = trim_base_url(&url);
            self.base_url_source = SettingSource::CommandLine;
        }
        self
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn read_doc(path: &Path) -> Option<toml::Value> {
    let contents = std::fs::read_to_string(path).ok()?;
    match contents.parse::<toml::Value>() {
        Ok(doc) => Some(doc),
        Err(e) => {
            log::warn!("Ignoring malformed {}: {}", path.display(), e);
            None
        }
    }
}

/// Save (or clear) `api.base_url` in the settings file.
///
/// Uses `toml::Value` for a surgical update so other keys are preserved.
pub fn save_base_url(path: &Path, url: Option<&str>) -> io::Result<()> {
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(path) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let api = table
        .entry("api")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let api_table = api
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[api] is not a table"))?;

    match url {
        Some(u) => {
            api_table.insert("base_url".to_string(), toml::Value::String(trim_base_url(u)));
        }
        None => {
            api_table.remove("base_url");
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;

    Ok(())
}

/// Load the settings file as a pretty-printed TOML string for display.
pub fn load_settings_string(path: &Path) -> Option<String> {
    let doc = read_doc(path)?;
    toml::to_string_pretty(&doc).ok()
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
