use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use letterplay_client::settings::{self, BASE_URL_ENV};
use letterplay_client::{SessionStore, Settings};

use crate::cli_types::ConfigAction;
use crate::display::success;
use crate::error::CliError;

pub(crate) fn run(action: &ConfigAction, api_url: Option<String>) -> Result<(), CliError> {
    match action {
        ConfigAction::Show => run_config_show(api_url),
        ConfigAction::Path => {
            log::info!("{}", settings::settings_path().display());
            Ok(())
        }
        ConfigAction::SetUrl { url, clear } => {
            let url = if *clear { None } else { url.as_deref() };
            run_config_set_url(url)
        }
    }
}

/// Show the effective settings and their sources.
fn run_config_show(api_url: Option<String>) -> Result<(), CliError> {
    let path = settings::settings_path();
    let resolved = Settings::load().with_base_url(api_url);

    log::info!(
        "{}",
        "LetterPlay Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    log::info!(
        "  Settings file: {} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        if path.exists() {
            "(exists)".if_supports_color(Stdout, |t| t.green()).to_string()
        } else {
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()).to_string()
        },
    );
    crate::log_blank();

    log::info!(
        "  {:<12} {}  {}",
        "base_url",
        resolved.base_url,
        format!("({})", resolved.base_url_source).if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!("  {:<12} {}", "page_limit", resolved.page_limit);
    log::info!("  {:<12} {}ms", "debounce", resolved.debounce.as_millis());
    crate::log_blank();

    let store = SessionStore::default_location();
    let session = store.load();
    match (&session.username, session.is_logged_in()) {
        (Some(name), true) => log::info!(
            "  Session: logged in as {}",
            name.if_supports_color(Stdout, |t| t.bold()),
        ),
        (None, true) => log::info!("  Session: logged in"),
        _ => log::info!(
            "  Session: {}",
            "not logged in".if_supports_color(Stdout, |t| t.dimmed()),
        ),
    }

    if let Some(contents) = settings::load_settings_string(&path) {
        crate::log_blank();
        log::info!("{}", "settings.toml:".if_supports_color(Stdout, |t| t.dimmed()));
        for line in contents.lines() {
            log::info!("  {}", line);
        }
    }
    Ok(())
}

fn run_config_set_url(url: Option<&str>) -> Result<(), CliError> {
    if let Some(url) = url {
        let trimmed = url.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(CliError::config(format!(
                "'{}' is not an http(s) URL",
                trimmed
            )));
        }
    }

    let path = settings::settings_path();
    settings::save_base_url(&path, url)
        .map_err(|e| CliError::config(format!("Failed to write {}: {}", path.display(), e)))?;

    match url {
        Some(u) => success(&format!("API URL set to {}", u.trim())),
        None => success("API URL cleared, using the default"),
    }
    if std::env::var(BASE_URL_ENV).is_ok() {
        log::warn!("Note: ${} is set and takes precedence over settings.toml.", BASE_URL_ENV);
    }
    Ok(())
}
