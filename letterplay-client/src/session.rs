//! Explicit session context.
//!
//! A [`Session`] holds the tokens and identity of the logged-in user. It is
//! loaded once when the client starts ([`SessionStore::load`]) and cleared on
//! logout ([`SessionStore::clear`]). Nothing else reads or writes the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::settings::config_dir;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn bearer(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

/// TOML file format.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    session: Option<Session>,
}

/// Where the session is persisted. `None` keeps it in memory only.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: Option<PathBuf>,
}

impl SessionStore {
    /// `~/.config/letterplay/session.toml`
    pub fn default_location() -> Self {
        Self::at(config_dir().join("session.toml"))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn in_memory() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read the persisted session. Missing or unreadable files yield an
    /// empty (logged-out) session.
    pub fn load(&self) -> Session {
        let Some(path) = &self.path else {
            return Session::default();
        };
        let Ok(content) = std::fs::read_to_string(path) else {
            return Session::default();
        };
        match toml::from_str::<SessionFile>(&content) {
            Ok(file) => file.session.unwrap_or_default(),
            Err(e) => {
                log::warn!("Ignoring unreadable session file {}: {}", path.display(), e);
                Session::default()
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<(), ClientError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = SessionFile {
            session: Some(session.clone()),
        };
        let toml_str = toml::to_string_pretty(&file)
            .map_err(|e| ClientError::config(format!("Failed to serialize session: {e}")))?;
        let tmp_path = path.with_extension("toml.tmp");
        std::fs::write(&tmp_path, toml_str)?;
        std::fs::rename(&tmp_path, path)?;
        log::debug!("session saved to {}", path.display());
        Ok(())
    }

    pub fn clear(&self) -> Result<(), ClientError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
